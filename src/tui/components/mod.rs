pub mod cards;
pub mod input;
pub mod log;
pub mod progress;

pub use cards::*;
pub use input::*;
pub use log::*;
pub use progress::*;
