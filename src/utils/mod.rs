//! Utility module

mod error;
mod text;

pub use error::{Error, Result};
pub use text::{take_chars, title_case, truncate_with_marker};
