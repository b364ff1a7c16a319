use anyhow::Result;

use crate::{ContentKey, Fields};

use super::super::Container;
use super::format_write_outcome;

pub struct UpdateController<'a> {
    container: &'a Container,
}

impl<'a> UpdateController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn update(&self, key: String, fields: Vec<String>) -> Result<String> {
        let key = ContentKey::parse(&key)?;
        let fixed_id = key.require_fixed_id()?;
        let fields = Fields::from_assignments(&fields)?;

        let outcome = self
            .container
            .repository()
            .update_fields(&key, fixed_id, &fields)
            .await;
        format_write_outcome(&outcome)
    }
}
