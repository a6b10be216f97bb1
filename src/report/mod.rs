//! Report rendering - the final pipeline stage.

pub mod generator;
mod template;

pub use generator::*;
