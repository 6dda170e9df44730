//! Recursive rendering of values into literal expressions.
//!
//! [`Renderer`] is the dispatcher. Each call inspects the value, picks the
//! specialized renderer for its kind, and those renderers call back into
//! [`Renderer::render`] for their children. Leaves end up in the
//! [`BaseFormatter`].
//!
//! ## Dispatch Order
//!
//! The first matching rule wins:
//!
//! 1. more than two dimensions: `concat(d, ...)` over slices of the last dimension
//! 2. cell array: `{...}`
//! 3. struct array: `record_from(...)`
//! 4. instants: `instant_from(...)`
//! 5. durations: `duration_from(...)`
//! 6. table: `table_from(...)`
//! 7. extension object with its own renderer: whatever it returns
//! 8. numeric: base formatter, with the class tag for non-double classes
//! 9. anything else: base formatter without a tag
//!
//! ## Usage
//!
//! Most users should use [`crate::to_expression`]. The renderer is exposed for
//! callers that bring their own base formatter:
//!
//! ```rust
//! use litexpr::render::Renderer;
//! use litexpr::{cell, RenderOptions};
//!
//! let renderer = Renderer::new(RenderOptions::new());
//! assert_eq!(renderer.render(&cell![1.0, "a"]).unwrap(), "{1 \"a\"}");
//! ```

mod calendar;
mod collection;
mod ndim;
mod record;
mod table;

use crate::base::{BaseFormatter, LiteralFormatter, TypeTag};
use crate::{RenderOptions, Result, Value};
use log::trace;

/// The recursive renderer.
///
/// Holds the caller's options and hands them unchanged to every recursive
/// call and to the base formatter.
#[derive(Clone, Debug)]
pub struct Renderer<F = LiteralFormatter> {
    options: RenderOptions,
    formatter: F,
}

impl Renderer<LiteralFormatter> {
    #[must_use]
    pub fn new(options: RenderOptions) -> Self {
        Renderer {
            options,
            formatter: LiteralFormatter,
        }
    }
}

impl<F: BaseFormatter> Renderer<F> {
    /// Creates a renderer that sends leaves to `formatter`.
    pub fn with_formatter(options: RenderOptions, formatter: F) -> Self {
        Renderer { options, formatter }
    }

    #[must_use]
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Renders `value` as an expression that evaluates back to it.
    ///
    /// # Errors
    ///
    /// Returns the first error raised anywhere in the recursion, unchanged:
    /// usually [`crate::Error::UnsupportedType`] for an extension object with
    /// no renderer of its own.
    pub fn render(&self, value: &Value) -> Result<String> {
        let rank = value.ndims();
        if rank > 2 {
            trace!("{}-dimensional {}: slicing", rank, value.kind_name());
            return self.render_ndim(value, rank);
        }

        match value {
            Value::Cell(cell) => {
                trace!("cell {:?}", cell.shape());
                self.render_cell(cell)
            }
            Value::Struct(records) => {
                trace!("struct with fields {:?}", records.fields());
                self.render_struct(records)
            }
            Value::DateTime(instants) => {
                trace!("datetime {:?}", instants.shape());
                self.render_instants(instants)
            }
            Value::Duration(durations) => {
                trace!("duration {:?}", durations.values().shape());
                self.render_durations(durations)
            }
            Value::Table(table) => {
                trace!("table {}x{}", table.height(), table.width());
                self.render_table(table)
            }
            Value::Object(object) => match object.get().to_expression(&self.options) {
                Some(expr) => {
                    trace!("{} renders itself", object.get().type_name());
                    expr
                }
                None => {
                    trace!("{} has no renderer, trying base", object.get().type_name());
                    self.formatter.format(value, &self.options, TypeTag::Omit)
                }
            },
            Value::Numeric(numeric) => {
                trace!("{} {:?} to base", numeric.class(), numeric.shape());
                self.formatter.format(value, &self.options, TypeTag::Emit)
            }
            Value::Logical(_) | Value::Text(_) => {
                trace!("{} to base", value.kind_name());
                self.formatter.format(value, &self.options, TypeTag::Omit)
            }
        }
    }
}

impl Default for Renderer<LiteralFormatter> {
    fn default() -> Self {
        Renderer::new(RenderOptions::default())
    }
}
