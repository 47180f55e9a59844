mod catalog;
mod file_token;
mod mac;
mod platform;
mod session;
mod shell_component;

pub use catalog::*;
pub use file_token::*;
pub use mac::*;
pub use platform::*;
pub use session::*;
pub use shell_component::*;
