mod action;
mod aspect_ratio;
mod backend;
mod event;
mod failure;
mod image;
mod key_selector;
mod scene;
mod session;
mod slash_commands;
mod story;

pub use action::*;
pub use aspect_ratio::*;
pub use backend::*;
pub use event::*;
pub use failure::*;
pub use image::*;
pub use key_selector::*;
pub use scene::*;
pub use session::*;
pub use slash_commands::*;
pub use story::*;
