use anyhow::{bail, Result};

use crate::Commands;

use super::container::Container;
use super::controller::{SeedController, SetController, ShowController, UpdateController};

pub struct Router<'a> {
    show_controller: ShowController<'a>,
    seed_controller: SeedController<'a>,
    set_controller: SetController<'a>,
    update_controller: UpdateController<'a>,
}

impl<'a> Router<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            show_controller: ShowController::new(container),
            seed_controller: SeedController::new(container),
            set_controller: SetController::new(container),
            update_controller: UpdateController::new(container),
        }
    }

    pub async fn route(&self, command: Commands) -> Result<String> {
        match command {
            Commands::Show { key } => self.show_controller.show(key).await,
            Commands::Seed { key } => self.seed_controller.seed(key).await,
            Commands::Set { key, id, fields } => self.set_controller.set(key, id, fields).await,
            Commands::Update { key, fields } => self.update_controller.update(key, fields).await,
            Commands::Serve { .. } => bail!("The serve command is handled by main"),
        }
    }
}
