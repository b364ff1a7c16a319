pub mod seed_controller;
pub mod set_controller;
pub mod show_controller;
pub mod update_controller;

pub use seed_controller::SeedController;
pub use set_controller::SetController;
pub use show_controller::ShowController;
pub use update_controller::UpdateController;

use anyhow::{anyhow, Result};

use crate::WriteOutcome;

/// Renders a write outcome; a failed write becomes an error so the process
/// exits non-zero.
pub(crate) fn format_write_outcome(outcome: &WriteOutcome) -> Result<String> {
    let json = serde_json::to_string_pretty(outcome)?;
    if outcome.is_success() {
        Ok(json)
    } else {
        Err(anyhow!(json))
    }
}
