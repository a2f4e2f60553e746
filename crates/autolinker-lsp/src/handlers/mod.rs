mod command;
mod completion;
mod configuration;
mod edit;
mod lifecycle;
mod notifications;

pub use command::*;
pub use completion::*;
pub use configuration::*;
pub use lifecycle::*;
pub use notifications::*;
