//! Core definitions (error type and precondition checks), relied upon by all emplace-* crates.

pub mod error;
pub mod result;

pub use error::{Error, ErrorKind};
pub use result::Result;
