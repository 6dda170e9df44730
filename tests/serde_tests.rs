use litexpr::{from_str, to_string, to_string_with_options, to_value, RenderOptions, Value};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Serialize, Debug, PartialEq)]
struct User {
    id: u32,
    name: String,
    active: bool,
    tags: Vec<String>,
}

#[derive(Serialize, Debug, PartialEq)]
struct Product {
    sku: String,
    price: f64,
    quantity: u32,
}

#[derive(Serialize, Debug, PartialEq)]
struct Order {
    order_id: u32,
    customer: User,
    items: Vec<Product>,
    total: f64,
}

fn sample_order() -> Order {
    Order {
        order_id: 12345,
        customer: User {
            id: 123,
            name: "Alice".to_string(),
            active: true,
            tags: vec!["vip".to_string()],
        },
        items: vec![
            Product {
                sku: "WIDGET-001".to_string(),
                price: 29.99,
                quantity: 2,
            },
            Product {
                sku: "GADGET-002".to_string(),
                price: 49.99,
                quantity: 1,
            },
        ],
        total: 109.97,
    }
}

#[test]
fn test_simple_struct() {
    let user = User {
        id: 123,
        name: "Alice".to_string(),
        active: true,
        tags: vec!["admin".to_string(), "developer".to_string()],
    };

    let text = to_string(&user).unwrap();
    assert_eq!(
        text,
        "record_from({uint32(123); \"Alice\"; true; [\"admin\" \"developer\"]}, \
         {\"id\"; \"name\"; \"active\"; \"tags\"})"
    );
}

#[test]
fn test_nested_struct_round_trips_as_value() {
    let value = to_value(&sample_order()).unwrap();
    let text = to_string(&sample_order()).unwrap();
    assert_eq!(from_str(&text).unwrap(), value);
}

#[test]
fn test_array_of_structs_is_struct_array() {
    let value = to_value(&sample_order().items).unwrap();
    let items = value.as_struct().unwrap();
    assert_eq!(items.shape(), &[1, 2]);
    assert_eq!(items.fields(), ["sku", "price", "quantity"]);
    assert_eq!(items.get(&[0, 1], "quantity"), Some(&Value::from(1u32)));
}

#[test]
fn test_options_and_unit_values() {
    #[derive(Serialize)]
    struct Sparse {
        a: Option<f64>,
        b: Option<f64>,
        c: (),
    }

    let text = to_string(&Sparse {
        a: Some(1.5),
        b: None,
        c: (),
    })
    .unwrap();
    assert_eq!(text, "record_from({1.5; []; []}, {\"a\"; \"b\"; \"c\"})");
}

#[test]
fn test_matrix_from_nested_vectors() {
    let rows = vec![vec![1i8, 2, 3], vec![4, 5, 6]];
    assert_eq!(to_string(&rows).unwrap(), "int8([1 2 3; 4 5 6])");
}

#[test]
fn test_map_keeps_key_order() {
    let mut map = BTreeMap::new();
    map.insert("b".to_string(), "second");
    map.insert("a".to_string(), "first");
    assert_eq!(
        to_string(&map).unwrap(),
        "record_from({\"first\"; \"second\"}, {\"a\"; \"b\"})"
    );
}

#[test]
fn test_precision_through_serde() {
    let options = RenderOptions::new().with_precision(3);
    assert_eq!(
        to_string_with_options(&vec![3.14159, 2.71828], options).unwrap(),
        "[3.14 2.72]"
    );
}

#[test]
fn test_empty_sequence() {
    assert_eq!(to_string(&Vec::<u8>::new()).unwrap(), "[]");
}
