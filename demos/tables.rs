//! Tables with calendar columns and row names.
//!
//! Run with: cargo run --example tables

use chrono::{NaiveDate, TimeDelta};
use litexpr::{from_str, to_expression, DurationArray, Table, Value};
use ndarray::{ArrayD, IxDyn};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let start = NaiveDate::from_ymd_opt(2024, 3, 1)
        .and_then(|d| d.and_hms_opt(9, 30, 0))
        .ok_or("invalid date")?;
    let started = Value::datetimes(&[3, 1], vec![start, start + TimeDelta::hours(2), start])?;

    let laps = ArrayD::from_shape_vec(
        IxDyn(&[3, 1]),
        vec![
            TimeDelta::milliseconds(61_250),
            TimeDelta::milliseconds(59_900),
            TimeDelta::milliseconds(-1_500),
        ],
    )?;
    let laps = DurationArray::new(laps).with_format("mm:ss.SSS");

    let mut table = Table::from_columns([
        ("runner", Value::strings(3, 1, vec!["ana".into(), "bo".into(), "cy".into()])?),
        ("started", started),
        ("lap", Value::from(laps)),
    ])?
    .with_row_names(vec!["r1".into(), "r2".into(), "r3".into()])?;
    table.description = "spring heats".to_string();

    let text = to_expression(&Value::from(table.clone()))?;
    println!("{}\n", text);

    // descriptions and units are not part of the expression
    let back = from_str(&text)?;
    assert_eq!(back, Value::from(table.without_metadata()));
    println!("✓ Round-trip successful (metadata dropped)");

    Ok(())
}
