use anyhow::{bail, Result};

use crate::{ContentKey, ContentView, ReadOutcome};

use super::super::Container;

pub struct ShowController<'a> {
    container: &'a Container,
}

impl<'a> ShowController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn show(&self, key: String) -> Result<String> {
        let key = ContentKey::parse(&key)?;
        let view = self.container.show_use_case().execute(&key).await;
        self.format_view(&key, &view)
    }

    fn format_view(&self, key: &ContentKey, view: &ContentView) -> Result<String> {
        if let ContentView::Read(ReadOutcome::Failed(reason)) = view {
            bail!("Failed to read '{}': {}", key.collection(), reason);
        }

        match view.to_canonical_json() {
            Some(json) => Ok(serde_json::to_string_pretty(&json)?),
            None => Ok(format!("No content stored for '{}'.", key.collection())),
        }
    }
}
