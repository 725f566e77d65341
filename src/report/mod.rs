//! Report renderers.
//!
//! - [`terminal`]: dependency table and license text, with the
//!   `No license found.` placeholder for missing licenses.
//! - [`json`]: pretty-printed JSON of the same data.

pub mod json;
pub mod terminal;
