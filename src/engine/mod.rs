//! Transformation engine for processing byte streams.
//!
//! - [`Transformer`] - Stateful engine with `transform()`/`finish()` API
//! - [`notation`] - `-v` rendering of a single byte

mod quote;
mod transformer;

pub use quote::{Notation, notation};
pub use transformer::Transformer;
