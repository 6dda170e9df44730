//! Struct arrays.

use super::Renderer;
use crate::base::BaseFormatter;
use crate::{Result, StructArray, Value};

impl<F: BaseFormatter> Renderer<F> {
    /// Renders `record_from(coll, names)`.
    ///
    /// `coll` is the field-value cell of shape `[F, s...]` and `names` the
    /// `F×1` cell of field names, both in field declaration order.
    pub(super) fn render_struct(&self, records: &StructArray) -> Result<String> {
        let values = Value::Cell(records.to_field_cell());
        let names = Value::cell_column(
            records
                .fields()
                .iter()
                .map(|name| Value::from(name.as_str()))
                .collect(),
        );
        Ok(format!(
            "record_from({}, {})",
            self.render(&values)?,
            self.render(&names)?
        ))
    }
}
