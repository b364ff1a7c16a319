use anyhow::{anyhow, Result};

use crate::ContentKey;

use super::super::Container;
use super::format_write_outcome;

pub struct SeedController<'a> {
    container: &'a Container,
}

impl<'a> SeedController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    /// Merges the conventional defaults into the key's fixed-id document.
    pub async fn seed(&self, key: String) -> Result<String> {
        let key = ContentKey::parse(&key)?;
        let fixed_id = key.require_fixed_id()?;
        let defaults = self
            .container
            .defaults_for(&key)
            .ok_or_else(|| anyhow!("No default content is defined for '{}'", key.collection()))?;

        let outcome = self
            .container
            .repository()
            .initialize_with_defaults(&key, fixed_id, &defaults)
            .await;
        format_write_outcome(&outcome)
    }
}
