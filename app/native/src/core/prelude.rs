//! Common re-exports for convenience.
//!
//! # Usage
//!
//! ```ignore
//! use crate::core::prelude::*;
//! ```

pub use super::constants::{APP_NAME, APP_VERSION, URI_SCHEME};
pub use super::error::{Error, Result};
