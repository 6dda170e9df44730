//! Base literal formatter for scalars, vectors and matrices.
//!
//! The renderer treats this layer as an external collaborator: it hands over
//! rank ≤ 2 numeric, logical and string arrays and takes back literal text.
//! [`BaseFormatter`] is the seam; [`LiteralFormatter`] is the formatter used
//! unless the caller plugs in another one.
//!
//! ## Output
//!
//! | Value | Literal |
//! |-------|---------|
//! | double scalar | `1.5`, `Inf`, `NaN` |
//! | double matrix | `[1 2; 3 4]` |
//! | typed matrix | `int32([1 2; 3 4])` |
//! | logical | `true`, `[true false]` |
//! | string | `"a"`, `["a" "b"]` |
//! | empty | `[]`, `zeros(0, 3)`, `zeros(0, 0, "int8")`, `false(0, 2)`, `strings(1, 0)` |

use crate::assemble::{assemble, Delimiters, ROW_SEPARATOR};
use crate::shape::normalize_shape;
use crate::value::{with_numeric, Element, NumericArray, NumericClass};
use crate::{Error, RenderOptions, Result, Value};
use ndarray::ArrayD;

/// Whether a non-default numeric class is written out around the literal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeTag {
    Omit,
    Emit,
}

/// Formats rank ≤ 2 numeric, logical and string values as literals.
pub trait BaseFormatter {
    /// # Errors
    ///
    /// Implementations refuse values they have no literal form for.
    fn format(&self, value: &Value, options: &RenderOptions, tag: TypeTag) -> Result<String>;
}

/// The default [`BaseFormatter`].
#[derive(Clone, Copy, Debug, Default)]
pub struct LiteralFormatter;

impl BaseFormatter for LiteralFormatter {
    fn format(&self, value: &Value, options: &RenderOptions, tag: TypeTag) -> Result<String> {
        if options.precision_digits == Some(0) {
            return Err(Error::invalid_option("precision_digits must be at least 1"));
        }
        if value.ndims() > 2 {
            return Err(Error::unsupported_type(&format!(
                "{}-dimensional {} has no matrix literal",
                value.ndims(),
                value.kind_name()
            )));
        }

        match value {
            Value::Numeric(n) => Ok(format_numeric(n, options.precision_digits, tag)),
            Value::Logical(a) => Ok(literal_grid(
                a,
                |r, c| format!("false({}, {})", r, c),
                |b| if *b { "true" } else { "false" }.to_string(),
            )),
            Value::Text(a) => Ok(literal_grid(
                a,
                |r, c| format!("strings({}, {})", r, c),
                |s| quote_string(s),
            )),
            other => Err(Error::unsupported_type(&format!(
                "{} has no literal form",
                other.kind_name()
            ))),
        }
    }
}

fn format_numeric(n: &NumericArray, precision: Option<u32>, tag: TypeTag) -> String {
    let class = n.class();
    let tagged = tag == TypeTag::Emit && class != NumericClass::Double;

    let literal = with_numeric!(n, a => literal_grid(
        a,
        |r, c| {
            if r == 0 && c == 0 && !tagged {
                "[]".to_string()
            } else if tagged {
                format!("zeros({}, {}, \"{}\")", r, c, class)
            } else {
                format!("zeros({}, {})", r, c)
            }
        },
        |x| x.to_literal(precision),
    ));

    if tagged && !n.is_empty() {
        format!("{}({})", class, literal)
    } else {
        literal
    }
}

/// Scalar text for `1×1`, `empty(rows, cols)` for empties, assembled matrix otherwise.
fn literal_grid<A>(
    arr: &ArrayD<A>,
    empty: impl FnOnce(usize, usize) -> String,
    leaf: impl Fn(&A) -> String,
) -> String {
    let shape = normalize_shape(arr.shape());
    let (rows, cols) = (shape[0], shape[1]);

    if rows == 0 || cols == 0 {
        return empty(rows, cols);
    }
    let grid: Vec<String> = arr.iter().map(leaf).collect();
    if rows == 1 && cols == 1 {
        return grid.into_iter().next().unwrap_or_default();
    }
    assemble(&grid, rows, cols, Delimiters::SQUARE, ROW_SEPARATOR)
}

/// Double-quoted string literal with backslash escapes.
pub(crate) fn quote_string(s: &str) -> String {
    let mut output = String::with_capacity(s.len() + 2);
    output.push('"');
    for ch in s.chars() {
        match ch {
            '"' => output.push_str("\\\""),
            '\\' => output.push_str("\\\\"),
            '\n' => output.push_str("\\n"),
            '\r' => output.push_str("\\r"),
            '\t' => output.push_str("\\t"),
            '\0' => output.push_str("\\0"),
            _ => output.push(ch),
        }
    }
    output.push('"');
    output
}
