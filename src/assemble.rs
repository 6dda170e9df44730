//! Joining rendered children into a bracketed row/column literal.

/// Opening and closing bracket around an assembled literal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Delimiters {
    pub open: &'static str,
    pub close: &'static str,
}

impl Delimiters {
    /// `[` `]`, for numeric, logical and string matrices.
    pub const SQUARE: Delimiters = Delimiters {
        open: "[",
        close: "]",
    };

    /// `{` `}`, for cell arrays.
    pub const CURLY: Delimiters = Delimiters {
        open: "{",
        close: "}",
    };
}

impl Default for Delimiters {
    fn default() -> Self {
        Delimiters::SQUARE
    }
}

/// Separator between assembled rows.
pub const ROW_SEPARATOR: &str = "; ";

/// Assembles a row-major grid of `rows × cols` rendered strings.
///
/// Entries within a row are joined by one space, rows by `row_separator`, and
/// the result is wrapped in `delimiters`. A grid with no rows or no columns
/// yields just the two delimiters.
///
/// ```rust
/// use litexpr::assemble::{assemble, Delimiters, ROW_SEPARATOR};
///
/// let grid = ["1", "2", "3", "4"].map(String::from);
/// assert_eq!(assemble(&grid, 2, 2, Delimiters::SQUARE, ROW_SEPARATOR), "[1 2; 3 4]");
/// assert_eq!(assemble(&[], 0, 3, Delimiters::CURLY, ROW_SEPARATOR), "{}");
/// ```
#[must_use]
pub fn assemble(
    grid: &[String],
    rows: usize,
    cols: usize,
    delimiters: Delimiters,
    row_separator: &str,
) -> String {
    let mut output = String::with_capacity(grid.iter().map(|s| s.len() + 1).sum::<usize>() + 2);
    output.push_str(delimiters.open);

    if rows > 0 && cols > 0 {
        for (r, row) in grid.chunks(cols).take(rows).enumerate() {
            if r > 0 {
                output.push_str(row_separator);
            }
            for (c, entry) in row.iter().enumerate() {
                if c > 0 {
                    output.push(' ');
                }
                output.push_str(entry);
            }
        }
    }

    output.push_str(delimiters.close);
    output
}
