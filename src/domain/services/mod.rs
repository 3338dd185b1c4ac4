pub mod actions;
pub mod clipboard;
mod store;
mod storyboard;
mod workflow;

pub use store::*;
pub use storyboard::*;
pub use workflow::*;
