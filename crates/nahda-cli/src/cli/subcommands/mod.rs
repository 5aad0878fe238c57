mod edit;
mod session;
mod transition;

pub use edit::EditCommands;
pub use session::SessionCommands;
pub use transition::{TaskActor, TransitionCommands};
