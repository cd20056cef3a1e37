//! Utility types shared by the codec.
//!
//! - [`Error`] / [`Result`] - Error handling
//! - Math type re-exports from glam

mod error;
mod math;

pub use error::*;
pub use math::*;
