//! # litexpr
//!
//! Render in-memory structured values as literal expressions that evaluate
//! back to the same value.
//!
//! ## What Gets Rendered
//!
//! A [`Value`] can be a numeric array of any rank and class, a logical or
//! string array, a heterogeneous cell array, a struct array, calendar instants
//! and durations, a table, or a user extension object. Rendering recurses
//! through containers and emits a single line of text in a small expression
//! language:
//!
//! | Value | Expression |
//! |-------|------------|
//! | `2×2` double | `[1 2; 3 4]` |
//! | `int8` row | `int8([1 2 3])` |
//! | `2×2×2` array | `concat(3, [1 2; 3 4], [5 6; 7 8])` |
//! | cell | `{1 "a"; true []}` |
//! | record | `record_from({1; "a"}, {"x"; "label"})` |
//! | instants | `instant_from(719529.5, origin="serial_day")` |
//! | durations | `duration_from("01:30:00.000", format="mm:ss")` |
//! | table | `table_from([1; 2], columnNames={"id"})` |
//!
//! ## Key Features
//!
//! - **Round-trip**: [`from_str`] evaluates rendered text back into an equal value
//! - **Type preserving**: non-double numeric classes carry their class tag
//! - **Serde bridge**: any `T: Serialize` renders through [`to_string`]
//! - **Pluggable leaves**: scalars and matrices go through a [`BaseFormatter`]
//!
//! ## Quick Start
//!
//! ```rust
//! use litexpr::{cell, from_str, to_expression, Value};
//!
//! let value = cell![Value::matrix(2, 2, vec![1i32, 2, 3, 4]).unwrap(), "label"];
//! let text = to_expression(&value).unwrap();
//! assert_eq!(text, "{int32([1 2; 3 4]) \"label\"}");
//! assert_eq!(from_str(&text).unwrap(), value);
//! ```
//!
//! ### Serde Types
//!
//! ```rust
//! use litexpr::to_string;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Reading { sensor: String, values: Vec<f64> }
//!
//! let reading = Reading { sensor: "t1".into(), values: vec![20.5, 21.0] };
//! assert_eq!(
//!     to_string(&reading).unwrap(),
//!     "record_from({\"t1\"; [20.5 21]}, {\"sensor\"; \"values\"})"
//! );
//! ```
//!
//! ### Options
//!
//! ```rust
//! use litexpr::{to_expression_with_options, RenderOptions, Value};
//!
//! let options = RenderOptions::new().with_precision(4);
//! let text = to_expression_with_options(&Value::row(vec![1.0 / 3.0, 2.0 / 3.0]), options).unwrap();
//! assert_eq!(text, "[0.3333 0.6667]");
//! ```
//!
//! ## Logging
//!
//! Entry points log through the [`log`] facade at `debug` level and every
//! dispatch decision at `trace` level. No logger is installed by this crate.

pub mod assemble;
pub mod base;
pub mod calendar;
pub mod error;
pub mod eval;
pub mod macros;
pub mod map;
pub mod options;
pub mod render;
pub mod ser;
mod shape;
pub mod value;

pub use base::{BaseFormatter, LiteralFormatter, TypeTag};
pub use error::{Error, Result};
pub use eval::from_str;
pub use map::FieldMap;
pub use options::RenderOptions;
pub use render::Renderer;
pub use ser::{to_value, ValueSerializer};
pub use value::{
    Column, DurationArray, Element, Extension, ExtensionObject, NumericArray, NumericClass,
    StructArray, Table, Value, DEFAULT_DURATION_FORMAT,
};

use log::debug;
use serde::Serialize;
use std::io;

/// Render a [`Value`] as a literal expression with default options.
///
/// # Examples
///
/// ```rust
/// use litexpr::{to_expression, Value};
///
/// assert_eq!(to_expression(&Value::from(1.5)).unwrap(), "1.5");
/// assert_eq!(to_expression(&Value::empty()).unwrap(), "[]");
/// ```
///
/// # Errors
///
/// Returns [`Error::UnsupportedType`] if the value holds an extension object
/// without its own renderer.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_expression(value: &Value) -> Result<String> {
    to_expression_with_options(value, RenderOptions::default())
}

/// Render a [`Value`] as a literal expression with custom options.
///
/// The options reach every leaf unchanged.
///
/// # Errors
///
/// Returns [`Error::InvalidOption`] for a precision of zero digits, plus the
/// errors of [`to_expression`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_expression_with_options(value: &Value, options: RenderOptions) -> Result<String> {
    debug!(
        "rendering {} of shape {:?} with {:?}",
        value.kind_name(),
        value.shape(),
        options
    );
    Renderer::new(options).render(value)
}

/// Render any `T: Serialize` as a literal expression.
///
/// The value goes through [`to_value`] first; see [`ser`] for the mapping.
///
/// # Examples
///
/// ```rust
/// use litexpr::to_string;
///
/// assert_eq!(to_string(&vec![1i64, -2]).unwrap(), "int64([1 -2])");
/// assert_eq!(to_string(&("a", true)).unwrap(), "{\"a\" true}");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be converted or rendered.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, RenderOptions::default())
}

/// Render any `T: Serialize` as a literal expression with custom options.
///
/// # Errors
///
/// Returns an error if the value cannot be converted or rendered.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: RenderOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_expression_with_options(&to_value(value)?, options)
}

/// Render a [`Value`] into a writer.
///
/// # Examples
///
/// ```rust
/// use litexpr::{to_writer, Value};
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &Value::row(vec![1.0, 2.0])).unwrap();
/// assert_eq!(buffer, b"[1 2]");
/// ```
///
/// # Errors
///
/// Returns an error if rendering fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W>(writer: W, value: &Value) -> Result<()>
where
    W: io::Write,
{
    to_writer_with_options(writer, value, RenderOptions::default())
}

/// Render a [`Value`] into a writer with custom options.
///
/// # Errors
///
/// Returns an error if rendering fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W>(mut writer: W, value: &Value, options: RenderOptions) -> Result<()>
where
    W: io::Write,
{
    let expression = to_expression_with_options(value, options)?;
    writer
        .write_all(expression.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Evaluate expression text read from an I/O stream.
///
/// # Examples
///
/// ```rust
/// use litexpr::from_reader;
/// use std::io::Cursor;
///
/// let value = from_reader(Cursor::new(b"{1 \"a\"}")).unwrap();
/// assert_eq!(value, litexpr::cell![1.0, "a"]);
/// ```
///
/// # Errors
///
/// Returns an error if reading fails or the text does not evaluate.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R>(mut reader: R) -> Result<Value>
where
    R: io::Read,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}
