/// Builds a [`FieldMap`](crate::FieldMap) with fields in the written order.
///
/// Values go through `Value::from`, so plain literals work.
///
/// ```rust
/// use litexpr::{record, Value};
///
/// let point = Value::from(record! { "x" => 1.0, "y" => "b" });
/// assert!(point.is_struct());
/// ```
#[macro_export]
macro_rules! record {
    () => {
        $crate::FieldMap::new()
    };

    ($($name:expr => $value:expr),+ $(,)?) => {{
        let mut fields = $crate::FieldMap::new();
        $(
            fields.insert($name, $crate::Value::from($value));
        )+
        fields
    }};
}

/// Builds a `1×n` cell array; `cell![]` is the `0×0` cell.
///
/// ```rust
/// use litexpr::{cell, Value};
///
/// let mixed = cell![1.0, "a", true];
/// assert_eq!(mixed.shape(), vec![1, 3]);
/// assert_eq!(cell![].shape(), vec![0, 0]);
/// ```
#[macro_export]
macro_rules! cell {
    () => {
        $crate::Value::empty_cell()
    };

    ($($elem:expr),+ $(,)?) => {
        $crate::Value::cell_row(vec![$($crate::Value::from($elem)),+])
    };
}

#[cfg(test)]
mod tests {
    use crate::{FieldMap, Value};

    #[test]
    fn test_record_macro_keeps_order() {
        let fields = record! { "b" => 2.0, "a" => "x" };
        let names: Vec<_> = fields.keys().cloned().collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(fields.get("a"), Some(&Value::from("x")));
        assert_eq!(record! {}, FieldMap::new());
    }

    #[test]
    fn test_cell_macro() {
        let c = cell![1.0, "a"];
        let elements: Vec<_> = c.as_cell().unwrap().iter().cloned().collect();
        assert_eq!(elements, vec![Value::from(1.0), Value::from("a")]);
        assert!(cell![].as_cell().unwrap().is_empty());
    }
}
