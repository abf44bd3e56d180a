pub mod command;
pub mod session;

pub use command::*;
pub use session::*;
