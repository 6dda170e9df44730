//! Rendering arrays, cells and records, then evaluating them back.
//!
//! Run with: cargo run --example simple

use litexpr::{cell, from_str, record, to_expression, StructArray, Value};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let matrix = Value::matrix(2, 3, vec![1.0, 2.5, -3.0, 4.0, 5.0, 6.0])?;
    let cube = Value::array(&[2, 2, 2], (1u8..=8).collect())?;
    let mixed = cell![
        "label",
        true,
        Value::row(vec![1i16, 2, 3]),
        cell![Value::empty()]
    ];
    let points = StructArray::from_records(
        &[1, 2],
        vec![
            record! { "x" => 1.0, "y" => 2.0 },
            record! { "x" => -4.0, "y" => 0.5 },
        ],
    )?;

    for value in [matrix, cube, mixed, Value::from(points)] {
        let text = to_expression(&value)?;
        println!("{}", text);

        let back = from_str(&text)?;
        assert_eq!(value, back);
    }

    println!("✓ Round-trip successful");
    Ok(())
}
