mod completion;
mod message;
mod mode;
mod prompt;

pub use completion::*;
pub use message::*;
pub use mode::*;
pub use prompt::*;
