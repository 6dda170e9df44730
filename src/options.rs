//! Configuration options for rendering.
//!
//! [`RenderOptions`] is handed to the top-level call and forwarded unchanged
//! through every recursive call down to the base formatter. The renderer itself
//! never looks inside it.
//!
//! ## Examples
//!
//! ```rust
//! use litexpr::{to_expression_with_options, RenderOptions, Value};
//!
//! let options = RenderOptions::new().with_precision(3);
//! let text = to_expression_with_options(&Value::from(1.23456), options).unwrap();
//! assert_eq!(text, "1.23");
//! ```

use serde::{Deserialize, Serialize};

/// Options forwarded through every recursive render call.
///
/// Derives `Serialize`/`Deserialize` so it can live in a caller's own
/// configuration file.
///
/// # Examples
///
/// ```rust
/// use litexpr::RenderOptions;
///
/// let options = RenderOptions::new();
/// assert_eq!(options.precision_digits, None);
///
/// let options = RenderOptions::new().with_precision(4);
/// assert_eq!(options.precision_digits, Some(4));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Round every floating-point leaf to this many significant digits.
    pub precision_digits: Option<u32>,
}

impl RenderOptions {
    /// Creates default options (full precision).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of significant digits for floating-point leaves.
    ///
    /// Must be at least 1; the base formatter rejects 0 when it sees it.
    #[must_use]
    pub fn with_precision(mut self, digits: u32) -> Self {
        self.precision_digits = Some(digits);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_precision() {
        assert_eq!(RenderOptions::default().precision_digits, None);
    }

    #[test]
    fn test_load_from_json_config() {
        let options: RenderOptions = serde_json::from_str(r#"{"precision_digits": 6}"#).unwrap();
        assert_eq!(options, RenderOptions::new().with_precision(6));

        let options: RenderOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, RenderOptions::new());
    }
}
