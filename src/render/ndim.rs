//! Arrays of more than two dimensions.

use super::Renderer;
use crate::base::BaseFormatter;
use crate::{Result, Value};

impl<F: BaseFormatter> Renderer<F> {
    /// Renders a rank-`d` value as `concat(d, e1, ..., eL)` over the `L` slices
    /// of its last dimension.
    ///
    /// Each slice drops the last dimension and is dispatched again, so a slice
    /// of rank > 2 recurses here. `L = 0` gives `concat(d)`.
    pub(super) fn render_ndim(&self, value: &Value, rank: usize) -> Result<String> {
        let extent = value.shape()[rank - 1];
        let mut output = format!("concat({}", rank);
        for index in 0..extent {
            let slice = value.slice_along(rank - 1, index);
            output.push_str(", ");
            output.push_str(&self.render(&slice)?);
        }
        output.push(')');
        Ok(output)
    }
}
