#![forbid(unsafe_code)]

pub mod advancement;
pub mod model;
pub mod progress;
pub mod sequence;

pub use advancement::{Advancement, advance};
pub use progress::Progress;
pub use sequence::{FlatSequence, Position};
