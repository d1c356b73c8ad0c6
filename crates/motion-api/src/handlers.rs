//! Request handlers.

pub mod generate;
pub mod health;
pub mod sample;

pub use generate::*;
pub use health::*;
pub use sample::*;
