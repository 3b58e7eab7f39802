//! Presentation: a renderer-independent view model plus the terminal front-end.

pub mod command;
pub mod terminal;
pub mod view;

pub use command::{parse_command, Command};
pub use view::ViewState;
