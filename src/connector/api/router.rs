use anyhow::Result;

use crate::Commands;

use super::container::Container;
use super::controller::{AskController, ModesController};

pub struct Router<'a> {
    ask_controller: AskController<'a>,
    modes_controller: ModesController<'a>,
}

impl<'a> Router<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            ask_controller: AskController::new(container),
            modes_controller: ModesController::new(container),
        }
    }

    pub async fn route(&self, command: Commands) -> Result<String> {
        match command {
            Commands::Ask { message, mode } => self.ask_controller.ask(message, mode).await,
            Commands::Modes => self.modes_controller.list().await,
            Commands::Serve { .. } => unreachable!("serve command is handled separately in main"),
        }
    }
}
