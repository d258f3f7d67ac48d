//! The error type shared by fallible tree operations.

use thiserror::Error;

/// Errors returned by [`Tree`](crate::Tree) operations that need an explicit outcome.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The requested key is not stored in the tree. The tree is left untouched.
    #[error("key not found in tree")]
    KeyNotFound,
}
