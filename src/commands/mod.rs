//! Command implementations for the recipe-reader CLI

mod inspect;
mod misc;
mod replay;

pub use inspect::*;
pub use misc::*;
pub use replay::*;
