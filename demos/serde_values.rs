//! Rendering serde types, including dynamic JSON documents.
//!
//! Run with: cargo run --example serde_values

use litexpr::{to_string, to_string_with_options, RenderOptions};
use serde::Serialize;
use std::error::Error;

#[derive(Serialize)]
enum Status {
    Active,
    Suspended { days: u16 },
}

#[derive(Serialize)]
struct Account {
    id: u64,
    owner: String,
    balance: f64,
    status: Status,
    history: Vec<f64>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let accounts = vec![
        Account {
            id: 1,
            owner: "Alice".to_string(),
            balance: 1520.125,
            status: Status::Active,
            history: vec![1000.0, 1520.125],
        },
        Account {
            id: 2,
            owner: "Bob".to_string(),
            balance: -12.5,
            status: Status::Suspended { days: 30 },
            history: vec![],
        },
    ];

    println!("Accounts:\n{}\n", to_string(&accounts)?);

    let short = RenderOptions::new().with_precision(4);
    println!(
        "Balances (4 digits):\n{}\n",
        to_string_with_options(&vec![1520.125, -12.5, 1.0 / 3.0], short)?
    );

    let document: serde_json::Value = serde_json::from_str(
        r#"{"name": "probe", "readings": [1.5, 2.25, 3], "tags": ["a", "b"], "meta": null}"#,
    )?;
    println!("JSON document:\n{}", to_string(&document)?);

    Ok(())
}
