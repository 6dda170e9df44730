//! Error types for rendering and evaluating literal expressions.
//!
//! ## Error Categories
//!
//! - **Unsupported types**: a value (usually an extension object without its own
//!   renderer) that the base formatter refuses. These propagate unchanged from
//!   any depth of the recursion.
//! - **Shape mismatches**: table columns or concatenated pieces whose extents
//!   disagree.
//! - **Syntax errors**: malformed expression text handed to [`crate::from_str`],
//!   with line and column information.
//! - **Type mismatches**: well-formed text whose pieces cannot be combined
//!   (e.g. concatenating an `int8` array with a string array).
//!
//! ## Examples
//!
//! ```rust
//! use litexpr::{from_str, Error};
//!
//! let result = from_str("[1 2; 3");
//! assert!(matches!(result, Err(Error::Syntax { .. })));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while rendering or evaluating.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// IO error while writing rendered output
    #[error("IO error: {0}")]
    Io(String),

    /// A value the renderer cannot express
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// Extents that should agree do not
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    /// A rendering option outside its valid range
    #[error("Invalid option: {0}")]
    InvalidOption(String),

    /// Syntax error in expression text
    #[error("Syntax error at line {line}, column {col}: {msg}")]
    Syntax { line: usize, col: usize, msg: String },

    /// Call to a function the evaluator does not know
    #[error("Unknown function `{0}`")]
    UnknownFunction(String),

    /// Evaluated operands of the wrong kind
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a syntax error with line and column information.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use litexpr::Error;
    ///
    /// let err = Error::syntax(1, 5, "unexpected `]`");
    /// assert!(err.to_string().contains("column 5"));
    /// ```
    pub fn syntax(line: usize, col: usize, msg: &str) -> Self {
        Error::Syntax {
            line,
            col,
            msg: msg.to_string(),
        }
    }

    /// Creates a type mismatch error.
    pub fn type_mismatch(expected: &str, found: &str) -> Self {
        Error::TypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Creates a shape mismatch error.
    pub fn shape_mismatch<T: fmt::Display>(msg: T) -> Self {
        Error::ShapeMismatch(msg.to_string())
    }

    /// Creates an unsupported type error for values that have no literal form.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates an invalid option error.
    pub fn invalid_option(msg: &str) -> Self {
        Error::InvalidOption(msg.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use litexpr::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl From<ndarray::ShapeError> for Error {
    fn from(err: ndarray::ShapeError) -> Self {
        Error::ShapeMismatch(err.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
