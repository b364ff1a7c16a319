use anyhow::Result;

use crate::{ContentKey, Fields};

use super::super::Container;
use super::format_write_outcome;

pub struct SetController<'a> {
    container: &'a Container,
}

impl<'a> SetController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn set(
        &self,
        key: String,
        id: Option<String>,
        fields: Vec<String>,
    ) -> Result<String> {
        let key = ContentKey::parse(&key)?;
        let fields = Fields::from_assignments(&fields)?;

        let outcome = self
            .container
            .repository()
            .upsert_singleton(&key, id.as_deref(), &fields)
            .await;
        format_write_outcome(&outcome)
    }
}
