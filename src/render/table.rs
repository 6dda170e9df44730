//! Tables.

use super::Renderer;
use crate::base::BaseFormatter;
use crate::{Result, Table, Value};

impl<F: BaseFormatter> Renderer<F> {
    /// Renders `table_from(v1, ..., vW, columnNames=names[, rowNames=rows])`.
    ///
    /// Column names are a `1×W` cell of strings, row names an `H×1` cell.
    /// Descriptions and units are not written.
    pub(super) fn render_table(&self, table: &Table) -> Result<String> {
        let mut args = Vec::with_capacity(table.width() + 2);
        for (_, column) in table.columns() {
            args.push(self.render(&column.data)?);
        }

        let names = Value::cell_row(table.column_names().map(Value::from).collect());
        args.push(format!("columnNames={}", self.render(&names)?));

        if let Some(rows) = table.row_names().filter(|rows| !rows.is_empty()) {
            let rows = Value::cell_column(rows.iter().map(|r| Value::from(r.as_str())).collect());
            args.push(format!("rowNames={}", self.render(&rows)?));
        }

        Ok(format!("table_from({})", args.join(", ")))
    }
}
