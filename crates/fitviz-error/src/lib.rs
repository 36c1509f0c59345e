//! # fitviz-error
//!
//! Unified error handling for fitviz.
//!
//! - **ErrorKind**: what went wrong (e.g. `ParseFailed`, `InvalidFormat`)
//! - **Operation**: where it went wrong (e.g. `identifier::parse`)
//! - **Context**: ordered key/value pairs locating the offending input
//! - **Source**: the wrapped lower-level error, if any
//!
//! ## Usage
//!
//! ```rust
//! use fitviz_error::{Error, ErrorKind};
//!
//! fn example() -> Result<(), Error> {
//!     Err(Error::new(ErrorKind::ParseFailed, "missing '#' count separator")
//!         .with_operation("identifier::parse")
//!         .with_context("segment", "svc:GET /a"))
//! }
//! ```
//!
//! The pipeline is one-shot: every error aborts the run, so there is no
//! retry classification.

mod error;
mod kind;

pub use error::Error;
pub use kind::ErrorKind;

/// Result type alias using the fitviz Error
pub type Result<T> = std::result::Result<T, Error>;
