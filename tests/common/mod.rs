use serde_json::{Value, json};

#[allow(dead_code)]
pub fn rex_input() -> Value {
    json!({
        "name": "Rex",
        "age": 3,
        "weight": 12,
        "is_vaccinated": true
    })
}

/// `rex_input` with `field` removed
#[allow(dead_code)]
pub fn rex_without(field: &str) -> Value {
    let mut input = rex_input();
    if let Value::Object(map) = &mut input {
        map.remove(field);
    }
    input
}

/// `rex_input` with `field` replaced by `value`
#[allow(dead_code)]
pub fn rex_with(field: &str, value: Value) -> Value {
    let mut input = rex_input();
    input[field] = value;
    input
}
