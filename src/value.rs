//! Dynamic value representation.
//!
//! This module provides the [`Value`] enum, the input of every render call. It
//! covers numeric arrays of any rank and class, logical and string arrays,
//! heterogeneous cell arrays, struct arrays, calendar instants and durations,
//! tables, and user extension objects.
//!
//! ## Shapes
//!
//! Every array-shaped variant holds an [`ndarray::ArrayD`]. The constructors in
//! this module keep shapes normalized: at least two dimensions, with trailing
//! singleton dimensions past the second dropped. A scalar is `1×1`.
//!
//! ## Creating Values
//!
//! ```rust
//! use litexpr::{Value, NumericClass};
//!
//! let x = Value::from(1.5);
//! assert_eq!(x.shape(), vec![1, 1]);
//!
//! let m = Value::matrix(2, 3, vec![1i32, 2, 3, 4, 5, 6]).unwrap();
//! assert_eq!(m.as_numeric().map(|n| n.class()), Some(NumericClass::Int32));
//!
//! let c = Value::cell_row(vec![Value::from(1.0), Value::from("a")]);
//! assert!(c.is_cell());
//! ```

use crate::map::FieldMap;
use crate::options::RenderOptions;
use crate::shape::{self, normalize, normalize_shape};
use crate::{Error, Result};
use chrono::{NaiveDateTime, TimeDelta};
use indexmap::IndexMap;
use ndarray::{Array1, ArrayD, Axis, Dimension, IxDyn};
use std::fmt;
use std::sync::Arc;

/// Display-format tag a duration carries unless told otherwise.
pub const DEFAULT_DURATION_FORMAT: &str = "hh:mm:ss";

/// Concrete class of a numeric array.
///
/// `Double` is the default class; every other class is written out as a type
/// tag so evaluation recovers the exact class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NumericClass {
    Double,
    Single,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
}

impl NumericClass {
    /// Type tag used in rendered expressions.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            NumericClass::Double => "double",
            NumericClass::Single => "single",
            NumericClass::Int8 => "int8",
            NumericClass::Int16 => "int16",
            NumericClass::Int32 => "int32",
            NumericClass::Int64 => "int64",
            NumericClass::UInt8 => "uint8",
            NumericClass::UInt16 => "uint16",
            NumericClass::UInt32 => "uint32",
            NumericClass::UInt64 => "uint64",
        }
    }

    /// Looks a class up by its type tag.
    ///
    /// ```rust
    /// use litexpr::NumericClass;
    ///
    /// assert_eq!(NumericClass::from_name("uint16"), Some(NumericClass::UInt16));
    /// assert_eq!(NumericClass::from_name("quad"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "double" => Some(NumericClass::Double),
            "single" => Some(NumericClass::Single),
            "int8" => Some(NumericClass::Int8),
            "int16" => Some(NumericClass::Int16),
            "int32" => Some(NumericClass::Int32),
            "int64" => Some(NumericClass::Int64),
            "uint8" => Some(NumericClass::UInt8),
            "uint16" => Some(NumericClass::UInt16),
            "uint32" => Some(NumericClass::UInt32),
            "uint64" => Some(NumericClass::UInt64),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_float(self) -> bool {
        matches!(self, NumericClass::Double | NumericClass::Single)
    }
}

impl fmt::Display for NumericClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A numeric array of one concrete class.
#[derive(Clone, Debug, PartialEq)]
pub enum NumericArray {
    Double(ArrayD<f64>),
    Single(ArrayD<f32>),
    Int8(ArrayD<i8>),
    Int16(ArrayD<i16>),
    Int32(ArrayD<i32>),
    Int64(ArrayD<i64>),
    UInt8(ArrayD<u8>),
    UInt16(ArrayD<u16>),
    UInt32(ArrayD<u32>),
    UInt64(ArrayD<u64>),
}

/// Evaluates `$body` with `$a` bound to the inner array, whatever its class.
macro_rules! with_numeric {
    ($arr:expr, $a:ident => $body:expr) => {
        match $arr {
            $crate::value::NumericArray::Double($a) => $body,
            $crate::value::NumericArray::Single($a) => $body,
            $crate::value::NumericArray::Int8($a) => $body,
            $crate::value::NumericArray::Int16($a) => $body,
            $crate::value::NumericArray::Int32($a) => $body,
            $crate::value::NumericArray::Int64($a) => $body,
            $crate::value::NumericArray::UInt8($a) => $body,
            $crate::value::NumericArray::UInt16($a) => $body,
            $crate::value::NumericArray::UInt32($a) => $body,
            $crate::value::NumericArray::UInt64($a) => $body,
        }
    };
}

/// Like [`with_numeric`], re-wrapping the resulting array in the same class.
macro_rules! map_numeric {
    ($arr:expr, $a:ident => $body:expr) => {
        match $arr {
            $crate::value::NumericArray::Double($a) => $crate::value::NumericArray::Double($body),
            $crate::value::NumericArray::Single($a) => $crate::value::NumericArray::Single($body),
            $crate::value::NumericArray::Int8($a) => $crate::value::NumericArray::Int8($body),
            $crate::value::NumericArray::Int16($a) => $crate::value::NumericArray::Int16($body),
            $crate::value::NumericArray::Int32($a) => $crate::value::NumericArray::Int32($body),
            $crate::value::NumericArray::Int64($a) => $crate::value::NumericArray::Int64($body),
            $crate::value::NumericArray::UInt8($a) => $crate::value::NumericArray::UInt8($body),
            $crate::value::NumericArray::UInt16($a) => $crate::value::NumericArray::UInt16($body),
            $crate::value::NumericArray::UInt32($a) => $crate::value::NumericArray::UInt32($body),
            $crate::value::NumericArray::UInt64($a) => $crate::value::NumericArray::UInt64($body),
        }
    };
}

/// Evaluates `$body` with the type alias `$t` bound to the Rust element type of `$class`.
macro_rules! with_class {
    ($class:expr, $t:ident => $body:expr) => {
        match $class {
            $crate::value::NumericClass::Double => {
                type $t = f64;
                $body
            }
            $crate::value::NumericClass::Single => {
                type $t = f32;
                $body
            }
            $crate::value::NumericClass::Int8 => {
                type $t = i8;
                $body
            }
            $crate::value::NumericClass::Int16 => {
                type $t = i16;
                $body
            }
            $crate::value::NumericClass::Int32 => {
                type $t = i32;
                $body
            }
            $crate::value::NumericClass::Int64 => {
                type $t = i64;
                $body
            }
            $crate::value::NumericClass::UInt8 => {
                type $t = u8;
                $body
            }
            $crate::value::NumericClass::UInt16 => {
                type $t = u16;
                $body
            }
            $crate::value::NumericClass::UInt32 => {
                type $t = u32;
                $body
            }
            $crate::value::NumericClass::UInt64 => {
                type $t = u64;
                $body
            }
        }
    };
}

pub(crate) use {with_class, with_numeric};

/// Rust element types that can back a [`NumericArray`].
pub trait Element: Clone + Default + fmt::Debug + PartialEq + 'static {
    const CLASS: NumericClass;

    /// Wraps an array of this element type.
    fn wrap(arr: ArrayD<Self>) -> NumericArray;

    /// Borrows the inner array when `numeric` has this element type.
    fn unwrap_ref(numeric: &NumericArray) -> Option<&ArrayD<Self>>;

    /// Literal text for one element, rounding floats to `precision` significant digits.
    fn to_literal(&self, precision: Option<u32>) -> String;

    /// Parses literal text produced by [`Element::to_literal`].
    fn parse_literal(raw: &str) -> Option<Self>;
}

macro_rules! impl_int_element {
    ($($t:ty => $variant:ident;)*) => {
        $(
            impl Element for $t {
                const CLASS: NumericClass = NumericClass::$variant;

                fn wrap(arr: ArrayD<Self>) -> NumericArray {
                    NumericArray::$variant(arr)
                }

                fn unwrap_ref(numeric: &NumericArray) -> Option<&ArrayD<Self>> {
                    match numeric {
                        NumericArray::$variant(arr) => Some(arr),
                        _ => None,
                    }
                }

                fn to_literal(&self, _precision: Option<u32>) -> String {
                    self.to_string()
                }

                fn parse_literal(raw: &str) -> Option<Self> {
                    raw.parse().ok()
                }
            }
        )*
    };
}

impl_int_element! {
    i8 => Int8;
    i16 => Int16;
    i32 => Int32;
    i64 => Int64;
    u8 => UInt8;
    u16 => UInt16;
    u32 => UInt32;
    u64 => UInt64;
}

macro_rules! impl_float_element {
    ($($t:ty => $variant:ident;)*) => {
        $(
            impl Element for $t {
                const CLASS: NumericClass = NumericClass::$variant;

                fn wrap(arr: ArrayD<Self>) -> NumericArray {
                    NumericArray::$variant(arr)
                }

                fn unwrap_ref(numeric: &NumericArray) -> Option<&ArrayD<Self>> {
                    match numeric {
                        NumericArray::$variant(arr) => Some(arr),
                        _ => None,
                    }
                }

                fn to_literal(&self, precision: Option<u32>) -> String {
                    let v = *self;
                    if v.is_nan() {
                        return "NaN".to_string();
                    }
                    if v.is_infinite() {
                        return if v > 0.0 { "Inf" } else { "-Inf" }.to_string();
                    }
                    let v = match precision {
                        Some(digits) if v != 0.0 => {
                            let digits = digits.saturating_sub(1) as usize;
                            format!("{:.*e}", digits, v).parse::<$t>().unwrap_or(v)
                        }
                        _ => v,
                    };
                    // Debug gives the shortest round-trip text and switches to
                    // exponent form for very large or small magnitudes.
                    let text = format!("{:?}", v);
                    match text.strip_suffix(".0") {
                        Some(whole) => whole.to_string(),
                        None => text,
                    }
                }

                fn parse_literal(raw: &str) -> Option<Self> {
                    match raw {
                        "Inf" => Some(<$t>::INFINITY),
                        "-Inf" => Some(<$t>::NEG_INFINITY),
                        "NaN" | "-NaN" => Some(<$t>::NAN),
                        _ => raw.parse().ok(),
                    }
                }
            }
        )*
    };
}

impl_float_element! {
    f64 => Double;
    f32 => Single;
}

impl NumericArray {
    /// Builds a normalized numeric array from row-major data.
    pub fn from_shape_vec<T: Element>(shape: &[usize], data: Vec<T>) -> Result<Self> {
        Ok(T::wrap(shape::from_row_major(shape, data)?))
    }

    #[must_use]
    pub fn class(&self) -> NumericClass {
        match self {
            NumericArray::Double(_) => NumericClass::Double,
            NumericArray::Single(_) => NumericClass::Single,
            NumericArray::Int8(_) => NumericClass::Int8,
            NumericArray::Int16(_) => NumericClass::Int16,
            NumericArray::Int32(_) => NumericClass::Int32,
            NumericArray::Int64(_) => NumericClass::Int64,
            NumericArray::UInt8(_) => NumericClass::UInt8,
            NumericArray::UInt16(_) => NumericClass::UInt16,
            NumericArray::UInt32(_) => NumericClass::UInt32,
            NumericArray::UInt64(_) => NumericClass::UInt64,
        }
    }

    #[must_use]
    pub fn shape(&self) -> &[usize] {
        with_numeric!(self, a => a.shape())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        with_numeric!(self, a => a.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrows the inner array as element type `T`, if that is its class.
    ///
    /// ```rust
    /// use litexpr::NumericArray;
    ///
    /// let arr = NumericArray::from_shape_vec(&[1, 2], vec![1u8, 2]).unwrap();
    /// assert!(arr.as_array::<u8>().is_some());
    /// assert!(arr.as_array::<f64>().is_none());
    /// ```
    #[must_use]
    pub fn as_array<T: Element>(&self) -> Option<&ArrayD<T>> {
        T::unwrap_ref(self)
    }
}

/// A struct array: instances sharing one ordered field set.
///
/// Each element of the instance array holds that instance's field values in
/// field order.
#[derive(Clone, Debug, PartialEq)]
pub struct StructArray {
    fields: Vec<String>,
    elements: ArrayD<Vec<Value>>,
}

impl StructArray {
    /// Builds a struct array from field names and per-instance field values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] if field names repeat or an instance does
    /// not hold exactly one value per field.
    pub fn new(fields: Vec<String>, elements: ArrayD<Vec<Value>>) -> Result<Self> {
        for (i, name) in fields.iter().enumerate() {
            if fields[..i].contains(name) {
                return Err(Error::shape_mismatch(format!("duplicate field `{}`", name)));
            }
        }
        if let Some(bad) = elements.iter().find(|values| values.len() != fields.len()) {
            return Err(Error::shape_mismatch(format!(
                "instance has {} values for {} fields",
                bad.len(),
                fields.len()
            )));
        }
        Ok(StructArray {
            fields,
            elements: normalize(elements),
        })
    }

    /// A `1×1` struct array holding one record.
    #[must_use]
    pub fn scalar(record: FieldMap) -> Self {
        let (fields, values): (Vec<String>, Vec<Value>) = record.into_iter().unzip();
        StructArray {
            fields,
            elements: normalize(ArrayD::from_elem(IxDyn(&[1, 1]), values)),
        }
    }

    /// Builds a struct array of the given shape from row-major records.
    ///
    /// Every record must carry the same field set; field order follows the
    /// first record.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use litexpr::{record, StructArray, Value};
    ///
    /// let people = StructArray::from_records(
    ///     &[1, 2],
    ///     vec![
    ///         record! { "name" => "Ada", "age" => 36.0 },
    ///         record! { "age" => 41.0, "name" => "Alan" },
    ///     ],
    /// )
    /// .unwrap();
    /// assert_eq!(people.fields(), ["name", "age"]);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] if field sets disagree or the record count
    /// does not fit `shape`.
    pub fn from_records(shape: &[usize], records: Vec<FieldMap>) -> Result<Self> {
        let fields: Vec<String> = match records.first() {
            Some(first) => first.keys().cloned().collect(),
            None => Vec::new(),
        };

        let mut elements = Vec::with_capacity(records.len());
        for mut record in records {
            if record.len() != fields.len() {
                return Err(Error::shape_mismatch("records have different field sets"));
            }
            let mut values = Vec::with_capacity(fields.len());
            for name in &fields {
                let value = record
                    .remove(name)
                    .ok_or_else(|| Error::shape_mismatch(format!("record lacks field `{}`", name)))?;
                values.push(value);
            }
            elements.push(values);
        }

        StructArray::new(fields, shape::from_row_major(shape, elements)?)
    }

    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    #[must_use]
    pub fn elements(&self) -> &ArrayD<Vec<Value>> {
        &self.elements
    }

    #[must_use]
    pub fn shape(&self) -> &[usize] {
        self.elements.shape()
    }

    /// Looks up one field of the instance at `index`.
    #[must_use]
    pub fn get(&self, index: &[usize], field: &str) -> Option<&Value> {
        let position = self.fields.iter().position(|f| f == field)?;
        self.elements.get(index)?.get(position)
    }

    /// Spreads the struct array into a field-value cell of shape `[F, s...]`.
    ///
    /// Slot `f` along the leading dimension holds every instance's value for
    /// field `f`, so field order is the leading index.
    pub(crate) fn to_field_cell(&self) -> ArrayD<Value> {
        let mut cell_shape = vec![self.fields.len()];
        cell_shape.extend_from_slice(self.elements.shape());
        let cell = ArrayD::from_shape_fn(IxDyn(&cell_shape), |idx| {
            let slice = idx.slice();
            self.elements[&slice[1..]][slice[0]].clone()
        });
        normalize(cell)
    }

    /// Inverse of [`StructArray::to_field_cell`].
    ///
    /// Dropping the leading dimension leaves the instance shape; a single
    /// remaining dimension `n` means an `n×1` array.
    pub(crate) fn from_field_cell(cell: &ArrayD<Value>, fields: Vec<String>) -> Result<Self> {
        let shape = cell.shape();
        if cell.is_empty() && shape.first().copied().unwrap_or(0) != fields.len() {
            // `{}` carries no shape, so the instance array comes back 0×0
            return StructArray::new(fields, ArrayD::from_elem(IxDyn(&[0, 0]), Vec::new()));
        }
        if shape.first().copied().unwrap_or(0) != fields.len() {
            return Err(Error::shape_mismatch(format!(
                "{} field names for a field-value cell with {} slots",
                fields.len(),
                shape.first().copied().unwrap_or(0)
            )));
        }

        let rest = &shape[1..];
        let instance_shape = normalize_shape(rest);
        let elements = ArrayD::from_shape_fn(IxDyn(&instance_shape), |idx| {
            let idx = idx.slice();
            let mut at = vec![0; shape.len()];
            for (k, slot) in at[1..].iter_mut().enumerate() {
                *slot = idx.get(k).copied().unwrap_or(0);
            }
            (0..fields.len())
                .map(|f| {
                    at[0] = f;
                    cell[at.as_slice()].clone()
                })
                .collect::<Vec<_>>()
        });

        StructArray::new(fields, elements)
    }
}

/// An array of durations with a display-format tag.
///
/// The tag only affects how a duration displays, never its length.
#[derive(Clone, Debug, PartialEq)]
pub struct DurationArray {
    values: ArrayD<TimeDelta>,
    format: String,
}

impl DurationArray {
    /// Wraps durations with the default `hh:mm:ss` format.
    #[must_use]
    pub fn new(values: ArrayD<TimeDelta>) -> Self {
        DurationArray {
            values: normalize(values),
            format: DEFAULT_DURATION_FORMAT.to_string(),
        }
    }

    #[must_use]
    pub fn with_format(mut self, format: &str) -> Self {
        self.format = format.to_string();
        self
    }

    #[must_use]
    pub fn values(&self) -> &ArrayD<TimeDelta> {
        &self.values
    }

    #[must_use]
    pub fn format(&self) -> &str {
        &self.format
    }

    #[inline]
    #[must_use]
    pub fn has_default_format(&self) -> bool {
        self.format == DEFAULT_DURATION_FORMAT
    }
}

/// One table column: its data plus descriptive metadata.
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    pub data: Value,
    pub description: String,
    pub units: String,
}

/// A table: ordered, uniquely named, equal-height columns with optional row names.
///
/// # Examples
///
/// ```rust
/// use litexpr::{Table, Value};
///
/// let table = Table::from_columns(vec![
///     ("id", Value::column(vec![1.0, 2.0])),
///     ("name", Value::strings(2, 1, vec!["a".into(), "b".into()]).unwrap()),
/// ])
/// .unwrap()
/// .with_row_names(vec!["first".into(), "second".into()])
/// .unwrap();
///
/// assert_eq!(table.height(), 2);
/// assert_eq!(table.width(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Table {
    columns: IndexMap<String, Column>,
    row_names: Option<Vec<String>>,
    height: usize,
    pub description: String,
}

impl Table {
    /// Creates an empty table with no columns.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from `(name, data)` pairs in column order.
    pub fn from_columns<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        let mut table = Table::new();
        for (name, data) in columns {
            table.push_column(name, data)?;
        }
        Ok(table)
    }

    /// Appends a column.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] if the name is taken or the column height
    /// differs from the table height.
    pub fn push_column<S: Into<String>>(&mut self, name: S, data: Value) -> Result<()> {
        let name = name.into();
        if self.columns.contains_key(&name) {
            return Err(Error::shape_mismatch(format!("duplicate column `{}`", name)));
        }
        let rows = data.shape()[0];
        if self.columns.is_empty() && self.row_names.is_none() {
            self.height = rows;
        } else if rows != self.height {
            return Err(Error::shape_mismatch(format!(
                "column `{}` has {} rows, table has {}",
                name, rows, self.height
            )));
        }
        self.columns.insert(
            name,
            Column {
                data,
                description: String::new(),
                units: String::new(),
            },
        );
        Ok(())
    }

    /// Attaches row names; an empty list clears them.
    ///
    /// A table without columns takes its height from the row names.
    pub fn with_row_names(mut self, names: Vec<String>) -> Result<Self> {
        if names.is_empty() {
            self.row_names = None;
            return Ok(self);
        }
        if self.columns.is_empty() {
            self.height = names.len();
        } else if names.len() != self.height {
            return Err(Error::shape_mismatch(format!(
                "{} row names for {} rows",
                names.len(),
                self.height
            )));
        }
        self.row_names = Some(names);
        Ok(self)
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    /// Mutable access to a column, for editing its metadata.
    pub fn column_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns.get_mut(name)
    }

    #[must_use]
    pub fn row_names(&self) -> Option<&[String]> {
        self.row_names.as_deref()
    }

    /// A copy with the table description and every column's description and
    /// units cleared.
    #[must_use]
    pub fn without_metadata(&self) -> Table {
        let mut table = self.clone();
        table.description.clear();
        for column in table.columns.values_mut() {
            column.description.clear();
            column.units.clear();
        }
        table
    }
}

/// A user type that sits outside the closed set of value kinds.
///
/// Implementors that know how to write themselves as an expression return it
/// from [`Extension::to_expression`]; the rest are refused by the base
/// formatter.
pub trait Extension: fmt::Debug + Send + Sync {
    fn type_name(&self) -> &str;

    /// Renders this object, receiving the caller's options verbatim.
    fn to_expression(&self, options: &RenderOptions) -> Option<Result<String>> {
        let _ = options;
        None
    }
}

/// Shared handle to an [`Extension`]. Two handles are equal when they point
/// at the same object.
#[derive(Clone, Debug)]
pub struct ExtensionObject(Arc<dyn Extension>);

impl ExtensionObject {
    pub fn new<E: Extension + 'static>(extension: E) -> Self {
        ExtensionObject(Arc::new(extension))
    }

    #[must_use]
    pub fn get(&self) -> &dyn Extension {
        self.0.as_ref()
    }
}

impl PartialEq for ExtensionObject {
    fn eq(&self, other: &Self) -> bool {
        Arc::as_ptr(&self.0) as *const () == Arc::as_ptr(&other.0) as *const ()
    }
}

/// Any value that can be rendered.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Numeric(NumericArray),
    Logical(ArrayD<bool>),
    Text(ArrayD<String>),
    Cell(ArrayD<Value>),
    Struct(StructArray),
    DateTime(ArrayD<NaiveDateTime>),
    Duration(DurationArray),
    Table(Table),
    Object(ExtensionObject),
}

impl Default for Value {
    /// The `0×0` double array.
    fn default() -> Self {
        Value::empty()
    }
}

impl Value {
    /// The `0×0` double array.
    #[must_use]
    pub fn empty() -> Self {
        Value::Numeric(NumericArray::Double(ArrayD::zeros(IxDyn(&[0, 0]))))
    }

    /// A numeric array of any shape from row-major data.
    pub fn array<T: Element>(shape: &[usize], data: Vec<T>) -> Result<Self> {
        Ok(Value::Numeric(NumericArray::from_shape_vec(shape, data)?))
    }

    /// A `rows×cols` numeric matrix from row-major data.
    pub fn matrix<T: Element>(rows: usize, cols: usize, data: Vec<T>) -> Result<Self> {
        Value::array(&[rows, cols], data)
    }

    /// A `1×n` numeric row vector.
    #[must_use]
    pub fn row<T: Element>(data: Vec<T>) -> Self {
        Value::Numeric(T::wrap(row_array(data)))
    }

    /// An `n×1` numeric column vector.
    #[must_use]
    pub fn column<T: Element>(data: Vec<T>) -> Self {
        Value::Numeric(T::wrap(column_array(data)))
    }

    /// A `rows×cols` logical array from row-major data.
    pub fn logical(rows: usize, cols: usize, data: Vec<bool>) -> Result<Self> {
        Ok(Value::Logical(shape::from_row_major(&[rows, cols], data)?))
    }

    /// A `rows×cols` string array from row-major data.
    pub fn strings(rows: usize, cols: usize, data: Vec<String>) -> Result<Self> {
        Ok(Value::Text(shape::from_row_major(&[rows, cols], data)?))
    }

    /// A `rows×cols` cell array from row-major elements.
    pub fn cell(rows: usize, cols: usize, elements: Vec<Value>) -> Result<Self> {
        Ok(Value::Cell(shape::from_row_major(&[rows, cols], elements)?))
    }

    /// A cell array of any shape from row-major elements.
    pub fn cell_array(shape: &[usize], elements: Vec<Value>) -> Result<Self> {
        Ok(Value::Cell(shape::from_row_major(shape, elements)?))
    }

    /// The `0×0` cell array.
    #[must_use]
    pub fn empty_cell() -> Self {
        Value::Cell(ArrayD::from_shape_fn(IxDyn(&[0, 0]), |_| Value::empty()))
    }

    /// A `1×n` cell array.
    #[must_use]
    pub fn cell_row(elements: Vec<Value>) -> Self {
        Value::Cell(row_array(elements))
    }

    /// An `n×1` cell array.
    #[must_use]
    pub fn cell_column(elements: Vec<Value>) -> Self {
        Value::Cell(column_array(elements))
    }

    /// An array of calendar instants from row-major data.
    pub fn datetimes(shape: &[usize], data: Vec<NaiveDateTime>) -> Result<Self> {
        Ok(Value::DateTime(shape::from_row_major(shape, data)?))
    }

    /// An array of durations from row-major data, with the default format.
    pub fn durations(shape: &[usize], data: Vec<TimeDelta>) -> Result<Self> {
        Ok(Value::Duration(DurationArray::new(shape::from_row_major(shape, data)?)))
    }

    /// Wraps a user extension object.
    pub fn extension<E: Extension + 'static>(extension: E) -> Self {
        Value::Object(ExtensionObject::new(extension))
    }

    /// Normalized shape. Tables are `height×width`; extension objects are scalars.
    #[must_use]
    pub fn shape(&self) -> Vec<usize> {
        let raw: &[usize] = match self {
            Value::Numeric(n) => n.shape(),
            Value::Logical(a) => a.shape(),
            Value::Text(a) => a.shape(),
            Value::Cell(a) => a.shape(),
            Value::Struct(s) => s.shape(),
            Value::DateTime(a) => a.shape(),
            Value::Duration(d) => d.values.shape(),
            Value::Table(t) => return vec![t.height(), t.width()],
            Value::Object(_) => return vec![1, 1],
        };
        normalize_shape(raw)
    }

    #[inline]
    #[must_use]
    pub fn ndims(&self) -> usize {
        self.shape().len()
    }

    /// Name of the value's kind, as used in messages.
    #[must_use]
    pub fn kind_name(&self) -> &str {
        match self {
            Value::Numeric(n) => n.class().name(),
            Value::Logical(_) => "logical",
            Value::Text(_) => "string",
            Value::Cell(_) => "cell",
            Value::Struct(_) => "struct",
            Value::DateTime(_) => "datetime",
            Value::Duration(_) => "duration",
            Value::Table(_) => "table",
            Value::Object(obj) => obj.get().type_name(),
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Value::Numeric(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_cell(&self) -> bool {
        matches!(self, Value::Cell(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_struct(&self) -> bool {
        matches!(self, Value::Struct(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_table(&self) -> bool {
        matches!(self, Value::Table(_))
    }

    #[must_use]
    pub fn as_numeric(&self) -> Option<&NumericArray> {
        match self {
            Value::Numeric(n) => Some(n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_cell(&self) -> Option<&ArrayD<Value>> {
        match self {
            Value::Cell(c) => Some(c),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_struct(&self) -> Option<&StructArray> {
        match self {
            Value::Struct(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Value::Table(t) => Some(t),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_duration(&self) -> Option<&DurationArray> {
        match self {
            Value::Duration(d) => Some(d),
            _ => None,
        }
    }

    /// If the value is a `1×1` string, returns it.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(a) if a.len() == 1 => a.iter().next().map(String::as_str),
            _ => None,
        }
    }

    /// Slice at `index` along dimension `axis` (zero-based), normalized.
    ///
    /// Only defined for array-shaped kinds; tables and extension objects come
    /// back unchanged since they are never more than two-dimensional.
    pub(crate) fn slice_along(&self, axis: usize, index: usize) -> Value {
        match self {
            Value::Numeric(n) => Value::Numeric(map_numeric!(n, a => shape::slice_axis(a, axis, index))),
            Value::Logical(a) => Value::Logical(shape::slice_axis(a, axis, index)),
            Value::Text(a) => Value::Text(shape::slice_axis(a, axis, index)),
            Value::Cell(a) => Value::Cell(shape::slice_axis(a, axis, index)),
            Value::Struct(s) => Value::Struct(StructArray {
                fields: s.fields.clone(),
                elements: shape::slice_axis(&s.elements, axis, index),
            }),
            Value::DateTime(a) => Value::DateTime(shape::slice_axis(a, axis, index)),
            Value::Duration(d) => Value::Duration(DurationArray {
                values: shape::slice_axis(&d.values, axis, index),
                format: d.format.clone(),
            }),
            Value::Table(_) | Value::Object(_) => self.clone(),
        }
    }

    /// Concatenates values of one kind along a zero-based `axis`.
    ///
    /// Numeric parts must share a class, struct parts a field set (order
    /// follows the first part), and duration parts take the first part's
    /// format.
    pub(crate) fn concat(axis: usize, parts: &[Value]) -> Result<Value> {
        let first = parts
            .first()
            .ok_or_else(|| Error::shape_mismatch("nothing to concatenate"))?;

        macro_rules! collect_parts {
            ($variant:ident, $p:ident => $inner:expr) => {
                parts
                    .iter()
                    .map(|part| match part {
                        Value::$variant($p) => Ok($inner),
                        other => Err(Error::type_mismatch(first.kind_name(), other.kind_name())),
                    })
                    .collect::<Result<Vec<_>>>()?
            };
        }

        Ok(match first {
            Value::Numeric(n) => {
                let class = n.class();
                let nums = collect_parts!(Numeric, p => p);
                with_class!(class, T => {
                    let arrays = nums
                        .iter()
                        .map(|n| {
                            n.as_array::<T>()
                                .ok_or_else(|| Error::type_mismatch(class.name(), n.class().name()))
                        })
                        .collect::<Result<Vec<_>>>()?;
                    Value::Numeric(T::wrap(shape::concat(axis, &arrays)?))
                })
            }
            Value::Logical(_) => {
                let arrays = collect_parts!(Logical, a => a);
                Value::Logical(shape::concat(axis, &arrays)?)
            }
            Value::Text(_) => {
                let arrays = collect_parts!(Text, a => a);
                Value::Text(shape::concat(axis, &arrays)?)
            }
            Value::Cell(_) => {
                let arrays = collect_parts!(Cell, a => a);
                Value::Cell(shape::concat(axis, &arrays)?)
            }
            Value::DateTime(_) => {
                let arrays = collect_parts!(DateTime, a => a);
                Value::DateTime(shape::concat(axis, &arrays)?)
            }
            Value::Duration(d) => {
                let arrays = collect_parts!(Duration, p => &p.values);
                Value::Duration(DurationArray {
                    values: shape::concat(axis, &arrays)?,
                    format: d.format.clone(),
                })
            }
            Value::Struct(s) => {
                let structs = collect_parts!(Struct, p => p);
                let reordered = structs
                    .iter()
                    .map(|other| reorder_fields(other, &s.fields))
                    .collect::<Result<Vec<_>>>()?;
                let arrays: Vec<_> = reordered.iter().collect();
                Value::Struct(StructArray {
                    fields: s.fields.clone(),
                    elements: shape::concat(axis, &arrays)?,
                })
            }
            Value::Table(_) | Value::Object(_) => {
                return Err(Error::type_mismatch("array", first.kind_name()))
            }
        })
    }
}

/// Instance values of `s` rearranged into the field order `fields`.
fn reorder_fields(s: &StructArray, fields: &[String]) -> Result<ArrayD<Vec<Value>>> {
    if s.fields == fields {
        return Ok(s.elements.clone());
    }
    if s.fields.len() != fields.len() {
        return Err(Error::shape_mismatch("structs have different field sets"));
    }
    let order = fields
        .iter()
        .map(|name| {
            s.fields
                .iter()
                .position(|f| f == name)
                .ok_or_else(|| Error::shape_mismatch(format!("struct lacks field `{}`", name)))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(s.elements.map(|values| order.iter().map(|&i| values[i].clone()).collect()))
}

fn row_array<A>(data: Vec<A>) -> ArrayD<A> {
    Array1::from(data).into_dyn().insert_axis(Axis(0))
}

fn column_array<A>(data: Vec<A>) -> ArrayD<A> {
    normalize(Array1::from(data).into_dyn())
}

// Conversions from primitives and builders

impl<T: Element> From<T> for NumericArray {
    fn from(value: T) -> Self {
        T::wrap(ArrayD::from_elem(IxDyn(&[1, 1]), value))
    }
}

impl From<NumericArray> for Value {
    fn from(value: NumericArray) -> Self {
        Value::Numeric(value)
    }
}

macro_rules! impl_from_scalar {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(value: $t) -> Self {
                    Value::Numeric(NumericArray::from(value))
                }
            }
        )*
    };
}

impl_from_scalar!(f64, f32, i8, i16, i32, i64, u8, u16, u32, u64);

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Logical(ArrayD::from_elem(IxDyn(&[1, 1]), value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(ArrayD::from_elem(IxDyn(&[1, 1]), value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::from(value.to_string())
    }
}

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Value::DateTime(ArrayD::from_elem(IxDyn(&[1, 1]), value))
    }
}

impl From<TimeDelta> for Value {
    fn from(value: TimeDelta) -> Self {
        Value::Duration(DurationArray::new(ArrayD::from_elem(IxDyn(&[1, 1]), value)))
    }
}

impl From<DurationArray> for Value {
    fn from(value: DurationArray) -> Self {
        Value::Duration(value)
    }
}

impl From<StructArray> for Value {
    fn from(value: StructArray) -> Self {
        Value::Struct(value)
    }
}

impl From<FieldMap> for Value {
    fn from(value: FieldMap) -> Self {
        Value::Struct(StructArray::scalar(value))
    }
}

impl From<Table> for Value {
    fn from(value: Table) -> Self {
        Value::Table(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record;

    #[test]
    fn test_scalars_are_one_by_one() {
        assert_eq!(Value::from(1.0).shape(), vec![1, 1]);
        assert_eq!(Value::from("x").shape(), vec![1, 1]);
        assert_eq!(Value::from(true).shape(), vec![1, 1]);
        assert_eq!(Value::from(record! { "a" => 1.0 }).shape(), vec![1, 1]);
    }

    #[test]
    fn test_numeric_class_tracks_element_type() {
        assert_eq!(
            Value::from(7i32).as_numeric().map(NumericArray::class),
            Some(NumericClass::Int32)
        );
        assert_eq!(
            Value::from(7.0f32).as_numeric().map(NumericArray::class),
            Some(NumericClass::Single)
        );
        assert_eq!(Value::from(7u64).kind_name(), "uint64");
    }

    #[test]
    fn test_trailing_singletons_elided() {
        let v = Value::array(&[2, 2, 1], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(v.ndims(), 2);

        let v = Value::array(&[2, 1, 3], vec![0.0; 6]).unwrap();
        assert_eq!(v.shape(), vec![2, 1, 3]);
    }

    #[test]
    fn test_row_and_column_vectors() {
        assert_eq!(Value::row(vec![1.0, 2.0, 3.0]).shape(), vec![1, 3]);
        assert_eq!(Value::column(vec![1.0, 2.0, 3.0]).shape(), vec![3, 1]);
        assert_eq!(Value::row(Vec::<f64>::new()).shape(), vec![1, 0]);
        assert_eq!(Value::cell_row(vec![]).shape(), vec![1, 0]);
    }

    #[test]
    fn test_float_literals() {
        assert_eq!(1.0f64.to_literal(None), "1");
        assert_eq!(0.1f64.to_literal(None), "0.1");
        assert_eq!((-2.5f64).to_literal(None), "-2.5");
        assert_eq!(f64::INFINITY.to_literal(None), "Inf");
        assert_eq!(f64::NEG_INFINITY.to_literal(None), "-Inf");
        assert_eq!(f64::NAN.to_literal(None), "NaN");
        assert_eq!(1e-7f64.to_literal(None), "1e-7");
        assert_eq!(1.23456f64.to_literal(Some(3)), "1.23");
        assert_eq!(98765.0f64.to_literal(Some(2)), "99000");
    }

    #[test]
    fn test_float_literals_parse_back() {
        for v in [0.1, -3.75, 1e-7, 6.02e23, 123456789.125] {
            assert_eq!(f64::parse_literal(&v.to_literal(None)), Some(v));
        }
        let single = 0.1f32;
        assert_eq!(f32::parse_literal(&single.to_literal(None)), Some(single));
    }

    #[test]
    fn test_struct_from_records_reorders_fields() {
        let s = StructArray::from_records(
            &[1, 2],
            vec![record! { "x" => 1.0, "y" => "a" }, record! { "y" => "b", "x" => 2.0 }],
        )
        .unwrap();
        assert_eq!(s.fields(), ["x", "y"]);
        assert_eq!(s.get(&[0, 1], "y"), Some(&Value::from("b")));
    }

    #[test]
    fn test_struct_from_records_rejects_field_mismatch() {
        let result = StructArray::from_records(
            &[1, 2],
            vec![record! { "x" => 1.0 }, record! { "z" => 2.0 }],
        );
        assert!(matches!(result, Err(Error::ShapeMismatch(_))));
    }

    #[test]
    fn test_field_cell_round_trip() {
        let s = StructArray::from_records(
            &[1, 3],
            vec![
                record! { "x" => 1.0, "y" => "a" },
                record! { "x" => 2.0, "y" => "b" },
                record! { "x" => 3.0, "y" => "c" },
            ],
        )
        .unwrap();

        let cell = s.to_field_cell();
        assert_eq!(cell.shape(), &[2, 1, 3]);
        let back = StructArray::from_field_cell(&cell, s.fields().to_vec()).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn test_field_cell_of_column_struct() {
        let s = StructArray::from_records(
            &[2, 1],
            vec![record! { "x" => 1.0 }, record! { "x" => 2.0 }],
        )
        .unwrap();
        let cell = s.to_field_cell();
        assert_eq!(cell.shape(), &[1, 2]);
        let back = StructArray::from_field_cell(&cell, vec!["x".into()]).unwrap();
        assert_eq!(back.shape(), &[2, 1]);
        assert_eq!(back, s);
    }

    #[test]
    fn test_table_rejects_ragged_columns() {
        let mut table = Table::new();
        table.push_column("a", Value::column(vec![1.0, 2.0])).unwrap();
        let err = table.push_column("b", Value::column(vec![1.0])).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch(_)));
        let err = table.push_column("a", Value::column(vec![3.0, 4.0])).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch(_)));
    }

    #[test]
    fn test_table_row_names_must_match_height() {
        let table = Table::from_columns(vec![("a", Value::column(vec![1.0, 2.0]))]).unwrap();
        assert!(table.clone().with_row_names(vec!["r1".into()]).is_err());
        let named = table.with_row_names(vec!["r1".into(), "r2".into()]).unwrap();
        assert_eq!(named.row_names().map(<[String]>::len), Some(2));
    }

    #[test]
    fn test_concat_requires_same_class() {
        let a = Value::from(1i8);
        let b = Value::from(1.0);
        assert!(matches!(
            Value::concat(1, &[a, b]),
            Err(Error::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_slice_along_keeps_class() {
        let cube = Value::array(&[2, 2, 2], (0i16..8).collect()).unwrap();
        assert_eq!(
            cube.slice_along(2, 1),
            Value::matrix(2, 2, vec![1i16, 3, 5, 7]).unwrap()
        );
    }

    #[derive(Debug)]
    struct Opaque;

    impl Extension for Opaque {
        fn type_name(&self) -> &str {
            "Opaque"
        }
    }

    #[test]
    fn test_extension_identity_equality() {
        let a = Value::extension(Opaque);
        let b = a.clone();
        let c = Value::extension(Opaque);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.kind_name(), "Opaque");
    }
}
