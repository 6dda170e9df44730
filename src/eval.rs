//! Reading rendered expressions back into values.
//!
//! This module provides [`from_str`], the inverse of [`crate::to_expression`].
//! It understands exactly the expression language the renderer writes:
//! literals, `[...]` matrices, `{...}` cells, class tags, the shape-preserving
//! empties and the constructor calls.
//!
//! ## Overview
//!
//! - **Single pass**: text is parsed into a small syntax tree, then evaluated
//! - **Exact numbers**: literal text is kept until its class is known, so
//!   `int64(9223372036854775807)` never goes through a double
//! - **Error reporting**: syntax errors carry line and column information
//!
//! ## Examples
//!
//! ```rust
//! use litexpr::{from_str, NumericClass, Value};
//!
//! let v = from_str("int16([1 2; 3 4])").unwrap();
//! assert_eq!(v.shape(), vec![2, 2]);
//! assert_eq!(v.as_numeric().map(|n| n.class()), Some(NumericClass::Int16));
//!
//! let c = from_str("{1, \"a\"; true, []}").unwrap();
//! assert!(c.is_cell());
//! ```

use crate::calendar::{from_serial_day, parse_duration};
use crate::shape;
use crate::value::{with_class, Element};
use crate::{
    DurationArray, Error, NumericArray, NumericClass, Result, StructArray, Table, Value,
};
use log::debug;
use ndarray::{ArrayD, IxDyn};

/// Evaluates an expression into a [`Value`].
///
/// # Errors
///
/// Returns [`Error::Syntax`] for malformed text, [`Error::UnknownFunction`]
/// for calls outside the expression language, and [`Error::TypeMismatch`] or
/// [`Error::ShapeMismatch`] when well-formed pieces do not fit together.
pub fn from_str(input: &str) -> Result<Value> {
    debug!("evaluating {} bytes of expression text", input.len());
    let mut parser = Parser::new(input);
    let expr = parser.parse_expr()?;
    parser.skip_whitespace();
    if !parser.at_end() {
        return Err(Error::syntax(
            parser.line,
            parser.column,
            "unexpected trailing characters",
        ));
    }
    evaluate(&expr)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Pos {
    line: usize,
    col: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Brackets {
    Square,
    Curly,
}

#[derive(Debug, PartialEq)]
enum Expr {
    /// Unsigned literal text, parsed once its class is known.
    Number(String),
    Str(String),
    Ident(String, Pos),
    Neg(Box<Expr>),
    Matrix(Brackets, Vec<Vec<Expr>>),
    Call(Call),
}

#[derive(Debug, PartialEq)]
struct Call {
    name: String,
    args: Vec<Expr>,
    named: Vec<(String, Expr)>,
    pos: Pos,
}

struct Parser<'a> {
    input: &'a str,
    position: usize,
    line: usize,
    column: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Parser {
            input,
            position: 0,
            line: 1,
            column: 1,
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.position += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while self.peek_char().is_some_and(char::is_whitespace) {
            self.next_char();
        }
    }

    fn at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn pos(&self) -> Pos {
        Pos {
            line: self.line,
            col: self.column,
        }
    }

    fn error(&self, msg: &str) -> Error {
        Error::syntax(self.line, self.column, msg)
    }

    fn expect(&mut self, expected: char) -> Result<()> {
        match self.next_char() {
            Some(ch) if ch == expected => Ok(()),
            Some(ch) => Err(self.error(&format!("expected `{}`, found `{}`", expected, ch))),
            None => Err(self.error(&format!("expected `{}`, found end of input", expected))),
        }
    }

    fn parse_expr(&mut self) -> Result<Expr> {
        self.skip_whitespace();
        match self.peek_char() {
            Some('[') => self.parse_matrix(Brackets::Square),
            Some('{') => self.parse_matrix(Brackets::Curly),
            Some('"') => Ok(Expr::Str(self.parse_string()?)),
            Some('-') => {
                self.next_char();
                Ok(Expr::Neg(Box::new(self.parse_expr()?)))
            }
            Some(ch) if ch.is_ascii_digit() || ch == '.' => self.parse_number(),
            Some(ch) if ch.is_alphabetic() || ch == '_' => self.parse_ident_or_call(),
            Some(ch) => Err(self.error(&format!("unexpected `{}`", ch))),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn parse_number(&mut self) -> Result<Expr> {
        let start = self.position;
        self.eat_digits();
        if self.peek_char() == Some('.') {
            self.next_char();
            self.eat_digits();
        }
        if matches!(self.peek_char(), Some('e' | 'E')) {
            self.next_char();
            if matches!(self.peek_char(), Some('+' | '-')) {
                self.next_char();
            }
            if !self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
                return Err(self.error("malformed exponent"));
            }
            self.eat_digits();
        }
        let text = &self.input[start..self.position];
        if text == "." {
            return Err(self.error("malformed number"));
        }
        Ok(Expr::Number(text.to_string()))
    }

    fn eat_digits(&mut self) {
        while self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
            self.next_char();
        }
    }

    fn parse_identifier(&mut self) -> String {
        let start = self.position;
        while self
            .peek_char()
            .is_some_and(|c| c.is_alphanumeric() || c == '_')
        {
            self.next_char();
        }
        self.input[start..self.position].to_string()
    }

    fn parse_ident_or_call(&mut self) -> Result<Expr> {
        let pos = self.pos();
        let name = self.parse_identifier();
        if self.peek_char() != Some('(') {
            return Ok(Expr::Ident(name, pos));
        }
        self.next_char();

        let mut args = Vec::new();
        let mut named = Vec::new();
        loop {
            self.skip_whitespace();
            if self.peek_char() == Some(')') {
                self.next_char();
                break;
            }
            if !args.is_empty() || !named.is_empty() {
                self.expect(',')?;
                self.skip_whitespace();
            }

            if let Some(key) = self.try_parse_name() {
                named.push((key, self.parse_expr()?));
            } else if named.is_empty() {
                args.push(self.parse_expr()?);
            } else {
                return Err(self.error("positional argument after named argument"));
            }
        }

        Ok(Expr::Call(Call {
            name,
            args,
            named,
            pos,
        }))
    }

    /// Consumes `ident =` if it comes next, otherwise leaves the input alone.
    fn try_parse_name(&mut self) -> Option<String> {
        let saved = (self.position, self.line, self.column);
        if self.peek_char().is_some_and(|c| c.is_alphabetic() || c == '_') {
            let key = self.parse_identifier();
            self.skip_whitespace();
            if self.peek_char() == Some('=') {
                self.next_char();
                return Some(key);
            }
        }
        (self.position, self.line, self.column) = saved;
        None
    }

    fn parse_matrix(&mut self, brackets: Brackets) -> Result<Expr> {
        let close = match brackets {
            Brackets::Square => ']',
            Brackets::Curly => '}',
        };
        self.next_char();

        let mut rows = Vec::new();
        let mut row = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek_char() {
                Some(ch) if ch == close => {
                    self.next_char();
                    break;
                }
                Some(';') => {
                    self.next_char();
                    if !row.is_empty() {
                        rows.push(std::mem::take(&mut row));
                    }
                }
                Some(',') => {
                    self.next_char();
                }
                None => {
                    return Err(self.error(&format!("unterminated matrix, expected `{}`", close)))
                }
                Some(_) => row.push(self.parse_expr()?),
            }
        }
        if !row.is_empty() {
            rows.push(row);
        }
        Ok(Expr::Matrix(brackets, rows))
    }

    fn parse_string(&mut self) -> Result<String> {
        self.next_char();
        let mut result = String::new();
        while let Some(ch) = self.next_char() {
            match ch {
                '"' => return Ok(result),
                '\\' => match self.next_char() {
                    Some('"') => result.push('"'),
                    Some('\\') => result.push('\\'),
                    Some('n') => result.push('\n'),
                    Some('r') => result.push('\r'),
                    Some('t') => result.push('\t'),
                    Some('0') => result.push('\0'),
                    Some(other) => {
                        return Err(self.error(&format!("unknown escape `\\{}`", other)))
                    }
                    None => break,
                },
                _ => result.push(ch),
            }
        }
        Err(self.error("unterminated string"))
    }
}

fn evaluate(expr: &Expr) -> Result<Value> {
    match expr {
        Expr::Number(text) => f64::parse_literal(text)
            .map(Value::from)
            .ok_or_else(|| Error::type_mismatch("number", text)),
        Expr::Str(s) => Ok(Value::from(s.as_str())),
        Expr::Ident(name, pos) => match name.as_str() {
            "true" => Ok(Value::from(true)),
            "false" => Ok(Value::from(false)),
            "Inf" => Ok(Value::from(f64::INFINITY)),
            "NaN" => Ok(Value::from(f64::NAN)),
            _ => Err(Error::syntax(
                pos.line,
                pos.col,
                &format!("undefined identifier `{}`", name),
            )),
        },
        Expr::Neg(inner) => negate(evaluate(inner)?),
        Expr::Matrix(Brackets::Square, rows) => evaluate_matrix(rows, evaluate),
        Expr::Matrix(Brackets::Curly, rows) => evaluate_cell(rows),
        Expr::Call(call) => evaluate_call(call),
    }
}

/// Joins each row horizontally, then the rows vertically.
fn evaluate_matrix(rows: &[Vec<Expr>], element: impl Fn(&Expr) -> Result<Value>) -> Result<Value> {
    if rows.is_empty() {
        return Ok(Value::empty());
    }
    let rows = rows
        .iter()
        .map(|row| {
            let parts = row.iter().map(&element).collect::<Result<Vec<_>>>()?;
            join(1, parts)
        })
        .collect::<Result<Vec<_>>>()?;
    join(0, rows)
}

fn join(axis: usize, mut parts: Vec<Value>) -> Result<Value> {
    if parts.len() == 1 {
        return Ok(parts.remove(0));
    }
    Value::concat(axis, &parts)
}

fn evaluate_cell(rows: &[Vec<Expr>]) -> Result<Value> {
    let Some(first) = rows.first() else {
        return Ok(Value::empty_cell());
    };
    let cols = first.len();
    if let Some(ragged) = rows.iter().find(|row| row.len() != cols) {
        return Err(Error::shape_mismatch(format!(
            "cell rows of {} and {} elements",
            cols,
            ragged.len()
        )));
    }
    let elements = rows
        .iter()
        .flatten()
        .map(evaluate)
        .collect::<Result<Vec<_>>>()?;
    Value::cell(rows.len(), cols, elements)
}

macro_rules! negate_signed {
    ($numeric:expr, $($variant:ident => $neg:expr),* $(,)?) => {
        match $numeric {
            $(NumericArray::$variant(a) => Ok(Value::Numeric(NumericArray::$variant(a.mapv($neg)))),)*
            other => Err(Error::type_mismatch("signed number", other.class().name())),
        }
    };
}

fn negate(value: Value) -> Result<Value> {
    match value {
        Value::Numeric(numeric) => negate_signed!(numeric,
            Double => |x: f64| -x,
            Single => |x: f32| -x,
            Int8 => i8::saturating_neg,
            Int16 => i16::saturating_neg,
            Int32 => i32::saturating_neg,
            Int64 => i64::saturating_neg,
        ),
        other => Err(Error::type_mismatch("number", other.kind_name())),
    }
}

/// Literal text of a (possibly negated) number, `Inf` or `NaN`.
fn literal_text(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Number(text) => Some(text.clone()),
        Expr::Ident(name, _) if name == "Inf" || name == "NaN" => Some(name.clone()),
        Expr::Neg(inner) => match inner.as_ref() {
            Expr::Number(_) | Expr::Ident(..) => literal_text(inner).map(|t| format!("-{}", t)),
            _ => None,
        },
        _ => None,
    }
}

/// Evaluates the argument of a class tag directly in that class.
fn evaluate_typed(class: NumericClass, expr: &Expr) -> Result<Value> {
    if let Some(text) = literal_text(expr) {
        return with_class!(class, T => T::parse_literal(&text)
            .map(|x| Value::Numeric(NumericArray::from(x)))
            .ok_or_else(|| Error::type_mismatch(class.name(), &text)));
    }
    match expr {
        Expr::Matrix(Brackets::Square, rows) if !rows.is_empty() => {
            evaluate_matrix(rows, |e| evaluate_typed(class, e))
        }
        _ => match evaluate(expr)? {
            Value::Numeric(n) if n.class() == class => Ok(Value::Numeric(n)),
            Value::Numeric(n) if n.is_empty() => empty_of(class, n.shape()),
            other => Err(Error::type_mismatch(class.name(), other.kind_name())),
        },
    }
}

fn empty_of(class: NumericClass, shape: &[usize]) -> Result<Value> {
    with_class!(class, T => Ok(Value::Numeric(T::wrap(shape::empty::<T>(shape)?))))
}

struct Args<'a> {
    call: &'a Call,
}

impl<'a> Args<'a> {
    fn error(&self, msg: &str) -> Error {
        Error::syntax(
            self.call.pos.line,
            self.call.pos.col,
            &format!("{}: {}", self.call.name, msg),
        )
    }

    fn expect_count(&self, min: usize, max: usize) -> Result<()> {
        let n = self.call.args.len();
        if n < min || n > max {
            let expected = if min == max {
                format!("{}", min)
            } else {
                format!("{} to {}", min, max)
            };
            return Err(self.error(&format!("expected {} arguments, found {}", expected, n)));
        }
        Ok(())
    }

    fn allow_named(&self, allowed: &[&str]) -> Result<()> {
        for (key, _) in &self.call.named {
            if !allowed.contains(&key.as_str()) {
                return Err(self.error(&format!("unexpected named argument `{}`", key)));
            }
        }
        Ok(())
    }

    fn named(&self, key: &str) -> Option<&'a Expr> {
        self.call
            .named
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, expr)| expr)
    }

    fn dimension(&self, index: usize) -> Result<usize> {
        let value = evaluate(&self.call.args[index])?;
        let dim = value
            .as_numeric()
            .and_then(|n| n.as_array::<f64>())
            .filter(|a| a.len() == 1)
            .and_then(|a| a.iter().next().copied())
            .filter(|d| *d >= 0.0 && d.fract() == 0.0)
            .ok_or_else(|| self.error("dimensions must be non-negative integers"))?;
        Ok(dim as usize)
    }

    /// The `(rows, cols)` pair of an empty-array constructor.
    fn empty_shape(&self) -> Result<[usize; 2]> {
        let shape = [self.dimension(0)?, self.dimension(1)?];
        if !shape.contains(&0) {
            return Err(self.error("one dimension must be 0"));
        }
        Ok(shape)
    }

    fn string(&self, expr: &Expr) -> Result<String> {
        evaluate(expr)?
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| self.error("expected a string"))
    }
}

fn evaluate_call(call: &Call) -> Result<Value> {
    let args = Args { call };

    if let Some(class) = NumericClass::from_name(&call.name) {
        args.expect_count(1, 1)?;
        args.allow_named(&[])?;
        return evaluate_typed(class, &call.args[0]);
    }

    match call.name.as_str() {
        "concat" => evaluate_concat(&args),
        "record_from" => evaluate_record(&args),
        "instant_from" => evaluate_instants(&args),
        "duration_from" => evaluate_durations(&args),
        "table_from" => evaluate_table(&args),
        "zeros" => {
            args.expect_count(2, 3)?;
            args.allow_named(&[])?;
            let shape = args.empty_shape()?;
            let class = match call.args.get(2) {
                Some(expr) => {
                    let name = args.string(expr)?;
                    NumericClass::from_name(&name)
                        .ok_or_else(|| args.error(&format!("unknown class `{}`", name)))?
                }
                None => NumericClass::Double,
            };
            empty_of(class, &shape)
        }
        "false" => {
            args.expect_count(2, 2)?;
            args.allow_named(&[])?;
            let shape = args.empty_shape()?;
            Ok(Value::Logical(shape::empty(&shape)?))
        }
        "strings" => {
            args.expect_count(2, 2)?;
            args.allow_named(&[])?;
            let shape = args.empty_shape()?;
            Ok(Value::Text(shape::empty(&shape)?))
        }
        _ => Err(Error::UnknownFunction(call.name.clone())),
    }
}

fn evaluate_concat(args: &Args<'_>) -> Result<Value> {
    if args.call.args.is_empty() {
        return Err(args.error("missing dimension"));
    }
    args.allow_named(&[])?;
    let dim = args.dimension(0)?;
    if dim == 0 || dim > shape::MAX_RANK {
        return Err(args.error(&format!(
            "dimension must be between 1 and {}",
            shape::MAX_RANK
        )));
    }
    let parts = args.call.args[1..]
        .iter()
        .map(evaluate)
        .collect::<Result<Vec<_>>>()?;
    if parts.is_empty() {
        return Ok(Value::empty());
    }
    Value::concat(dim - 1, &parts)
}

/// Strings held in a cell of `1×1` strings, or in a string array.
fn string_list(args: &Args<'_>, value: &Value) -> Result<Vec<String>> {
    match value {
        Value::Cell(cell) => cell
            .iter()
            .map(|v| {
                v.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| args.error("names must be strings"))
            })
            .collect(),
        Value::Text(text) => Ok(text.iter().cloned().collect()),
        Value::Numeric(n) if n.is_empty() => Ok(Vec::new()),
        _ => Err(args.error("names must be a cell of strings")),
    }
}

fn evaluate_record(args: &Args<'_>) -> Result<Value> {
    args.expect_count(2, 2)?;
    args.allow_named(&[])?;
    let values = match evaluate(&args.call.args[0])? {
        Value::Cell(cell) => cell,
        // `concat(d)` with no slices evaluates to `[]`
        Value::Numeric(n) if n.is_empty() => ArrayD::from_elem(IxDyn(&[0, 0]), Value::empty()),
        other => return Err(Error::type_mismatch("cell", other.kind_name())),
    };
    let names = string_list(args, &evaluate(&args.call.args[1])?)?;
    Ok(Value::Struct(StructArray::from_field_cell(&values, names)?))
}

fn evaluate_instants(args: &Args<'_>) -> Result<Value> {
    args.expect_count(1, 1)?;
    args.allow_named(&["origin"])?;
    if let Some(origin) = args.named("origin") {
        let origin = args.string(origin)?;
        if origin != "serial_day" {
            return Err(args.error(&format!("unsupported origin `{}`", origin)));
        }
    }

    let days = match evaluate(&args.call.args[0])? {
        Value::Numeric(NumericArray::Double(days)) => days,
        other => return Err(Error::type_mismatch("double", other.kind_name())),
    };
    let instants = days
        .iter()
        .map(|day| from_serial_day(*day))
        .collect::<Result<Vec<_>>>()?;
    Ok(Value::DateTime(shape::from_row_major(days.shape(), instants)?))
}

fn evaluate_durations(args: &Args<'_>) -> Result<Value> {
    args.expect_count(1, 1)?;
    args.allow_named(&["format"])?;

    let text = match evaluate(&args.call.args[0])? {
        Value::Text(text) => text,
        other => return Err(Error::type_mismatch("string", other.kind_name())),
    };
    let values = text
        .iter()
        .map(|s| parse_duration(s))
        .collect::<Result<Vec<_>>>()?;
    let mut durations = DurationArray::new(shape::from_row_major(text.shape(), values)?);
    if let Some(format) = args.named("format") {
        durations = durations.with_format(&args.string(format)?);
    }
    Ok(Value::Duration(durations))
}

fn evaluate_table(args: &Args<'_>) -> Result<Value> {
    args.allow_named(&["columnNames", "rowNames"])?;
    let names = match args.named("columnNames") {
        Some(expr) => string_list(args, &evaluate(expr)?)?,
        None => return Err(args.error("missing columnNames")),
    };
    if names.len() != args.call.args.len() {
        return Err(args.error(&format!(
            "{} column names for {} columns",
            names.len(),
            args.call.args.len()
        )));
    }

    let columns = args
        .call
        .args
        .iter()
        .map(evaluate)
        .collect::<Result<Vec<_>>>()?;
    let mut table = Table::from_columns(names.into_iter().zip(columns))?;
    if let Some(expr) = args.named("rowNames") {
        table = table.with_row_names(string_list(args, &evaluate(expr)?)?)?;
    }
    Ok(Value::Table(table))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record;
    use chrono::{NaiveDate, TimeDelta};

    #[test]
    fn test_scalars() {
        assert_eq!(from_str("2.5").unwrap(), Value::from(2.5));
        assert_eq!(from_str("-3").unwrap(), Value::from(-3.0));
        assert_eq!(from_str("1e-7").unwrap(), Value::from(1e-7));
        assert_eq!(from_str("-Inf").unwrap(), Value::from(f64::NEG_INFINITY));
        assert_eq!(from_str("true").unwrap(), Value::from(true));
        assert_eq!(from_str(r#""a\"b\n""#).unwrap(), Value::from("a\"b\n"));
    }

    #[test]
    fn test_matrices() {
        assert_eq!(
            from_str("[1 2; 3 4]").unwrap(),
            Value::matrix(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap()
        );
        assert_eq!(from_str("[1, -2]").unwrap(), Value::row(vec![1.0, -2.0]));
        assert_eq!(from_str("[]").unwrap(), Value::empty());
        assert_eq!(
            from_str("[\"a\" \"b\"]").unwrap(),
            Value::strings(1, 2, vec!["a".into(), "b".into()]).unwrap()
        );
    }

    #[test]
    fn test_typed_literals_are_exact() {
        assert_eq!(
            from_str("int64(9223372036854775807)").unwrap(),
            Value::from(i64::MAX)
        );
        assert_eq!(
            from_str("uint64([18446744073709551615 0])").unwrap(),
            Value::row(vec![u64::MAX, 0])
        );
        assert_eq!(from_str("int8(-128)").unwrap(), Value::from(i8::MIN));
        assert!(matches!(
            from_str("uint8(256)"),
            Err(Error::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_empties() {
        assert_eq!(from_str("zeros(0, 3)").unwrap().shape(), vec![0, 3]);
        let typed = from_str("zeros(2, 0, \"int16\")").unwrap();
        assert_eq!(typed.kind_name(), "int16");
        assert_eq!(typed.shape(), vec![2, 0]);
        assert_eq!(from_str("false(1, 0)").unwrap().kind_name(), "logical");
        assert_eq!(from_str("strings(0, 0)").unwrap().kind_name(), "string");
        assert_eq!(from_str("{}").unwrap(), Value::empty_cell());
    }

    #[test]
    fn test_concat() {
        let v = from_str("concat(3, [1 3], [2 4])").unwrap();
        assert_eq!(
            v,
            Value::array(&[1, 2, 2], vec![1.0, 2.0, 3.0, 4.0]).unwrap()
        );
        assert_eq!(from_str("concat(3)").unwrap(), Value::empty());
        assert!(matches!(
            from_str("concat(2, [1 2], \"a\")"),
            Err(Error::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_concat_dimension_bounds() {
        assert_eq!(from_str("concat(32, 1, 2)").unwrap().ndims(), 32);
        for text in [
            "concat(0, [1], [2])",
            "concat(-1, [1], [2])",
            "concat(1.5, [1], [2])",
            "concat(33, [1], [2])",
            "concat(100000000, [1], [2])",
            "concat(1e300)",
        ] {
            assert!(
                matches!(from_str(text), Err(Error::Syntax { .. })),
                "{}",
                text
            );
        }
    }

    #[test]
    fn test_empties_reject_oversized_or_filled_shapes() {
        for text in [
            "zeros(1e19, 1e19)",
            "zeros(2, 2)",
            "false(3, 1)",
            "strings(1, 1)",
            "zeros(1, 1, \"int8\")",
        ] {
            assert!(
                matches!(from_str(text), Err(Error::Syntax { .. })),
                "{}",
                text
            );
        }
        for text in ["zeros(0, 1e19)", "false(1e19, 0)", "strings(0, 1e300)"] {
            assert!(
                matches!(from_str(text), Err(Error::ShapeMismatch(_))),
                "{}",
                text
            );
        }
    }

    #[test]
    fn test_record() {
        let v = from_str("record_from({1; \"a\"}, {\"x\"; \"label\"})").unwrap();
        assert_eq!(v, Value::from(record! { "x" => 1.0, "label" => "a" }));
    }

    #[test]
    fn test_instants_and_durations() {
        let v = from_str("instant_from(719529.5, origin=\"serial_day\")").unwrap();
        let noon = NaiveDate::from_ymd_opt(1970, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        assert_eq!(v, Value::from(noon));

        let d = from_str("duration_from(\"00:01:00.000\", format=\"mm:ss\")").unwrap();
        let d = d.as_duration().unwrap();
        assert_eq!(d.format(), "mm:ss");
        assert_eq!(d.values().iter().next(), Some(&TimeDelta::minutes(1)));
    }

    #[test]
    fn test_table() {
        let v = from_str("table_from([1; 2], columnNames={\"a\"}, rowNames={\"x\"; \"y\"})").unwrap();
        let table = v.as_table().unwrap();
        assert_eq!(table.height(), 2);
        assert_eq!(table.column_names().collect::<Vec<_>>(), vec!["a"]);
        assert_eq!(table.row_names().map(<[String]>::len), Some(2));
    }

    #[test]
    fn test_syntax_errors_have_positions() {
        match from_str("[1 2;\n 3") {
            Err(Error::Syntax { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected syntax error, got {:?}", other),
        }
        assert!(matches!(from_str("[1] 2"), Err(Error::Syntax { .. })));
        assert!(matches!(from_str("foo"), Err(Error::Syntax { .. })));
    }

    #[test]
    fn test_unknown_function() {
        assert_eq!(
            from_str("frobnicate(1)"),
            Err(Error::UnknownFunction("frobnicate".into()))
        );
    }
}
