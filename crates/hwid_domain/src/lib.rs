mod component;
mod encoding;
mod error;
mod formatter;
mod hash;
mod registry;

pub use component::*;
pub use encoding::*;
pub use error::*;
pub use formatter::*;
pub use hash::*;
pub use registry::*;
