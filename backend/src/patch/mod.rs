//! Partial updates of planets using JSON-patch style operations.
//!
//! - [`operation`]: the [`PatchOperation`] type and document decoding
//! - [`pointer`]: pointer parsing and resolution against the planet shape
//! - [`apply`]: all-or-nothing application to a [`Planet`](crate::models::Planet)
//! - [`error`]: failure types

pub mod apply;
pub mod error;
pub mod operation;
pub mod pointer;

pub use apply::patched_copy;
pub use error::{OperationError, PatchError};
pub use operation::{parse_document, PatchOperation};
