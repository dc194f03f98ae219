pub mod ask_controller;
pub mod modes_controller;

pub use ask_controller::AskController;
pub use modes_controller::ModesController;
