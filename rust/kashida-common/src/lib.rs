//! Core definitions (error taxonomy, result type, owner keep-alive trait),
//! relied upon by all kashida-* crates.

pub mod error;
pub mod owner;
pub mod result;

pub use result::Result;
