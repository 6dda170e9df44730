//! Cell arrays.

use super::Renderer;
use crate::assemble::{assemble, Delimiters, ROW_SEPARATOR};
use crate::base::BaseFormatter;
use crate::shape::normalize_shape;
use crate::{Result, Value};
use ndarray::ArrayD;

impl<F: BaseFormatter> Renderer<F> {
    /// Renders every element in row-major order and assembles the grid in
    /// curly braces. Any empty cell array becomes `{}`.
    pub(super) fn render_cell(&self, cell: &ArrayD<Value>) -> Result<String> {
        let shape = normalize_shape(cell.shape());
        let grid = cell
            .iter()
            .map(|element| self.render(element))
            .collect::<Result<Vec<_>>>()?;
        Ok(assemble(
            &grid,
            shape[0],
            shape[1],
            Delimiters::CURLY,
            ROW_SEPARATOR,
        ))
    }
}

#[cfg(test)]
mod tests {
    use crate::render::Renderer;
    use crate::{cell, Value};

    fn render(value: &Value) -> String {
        Renderer::default().render(value).unwrap()
    }

    #[test]
    fn test_mixed_row() {
        assert_eq!(render(&cell![1.0, "x", true]), "{1 \"x\" true}");
    }

    #[test]
    fn test_matrix_of_cells() {
        let c = Value::cell(
            2,
            2,
            vec![
                Value::from(1u8),
                Value::row(vec![1.0, 2.0]),
                cell!["nested"],
                Value::empty(),
            ],
        )
        .unwrap();
        assert_eq!(render(&c), "{uint8(1) [1 2]; {\"nested\"} []}");
    }

    #[test]
    fn test_empty_cells() {
        assert_eq!(render(&Value::empty_cell()), "{}");
        assert_eq!(render(&Value::cell(0, 3, vec![]).unwrap()), "{}");
        assert_eq!(render(&Value::cell_row(vec![])), "{}");
    }
}
