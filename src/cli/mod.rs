/// Terminal front end
///
/// Menu, validated prompts, table output and the interactive session.

pub mod display;
pub mod menu;
pub mod prompt;
pub mod session;

pub use menu::MenuChoice;
pub use prompt::Prompter;
pub use session::Session;
