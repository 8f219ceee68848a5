use criterion::{Criterion, criterion_group, criterion_main};
use petschema::*;
use serde_json::{Value, json};
use std::hint::black_box;

fn valid_input() -> Value {
    json!({"name": "Rex", "age": 3, "weight": 12, "is_vaccinated": true})
}

fn invalid_input() -> Value {
    json!({"name": 1, "age": "five", "is_vaccinated": "yes", "color": "brown"})
}

fn bench_construction(c: &mut Criterion) {
    let valid = valid_input();
    let invalid = invalid_input();

    c.bench_function("pet_from_valid_value", |b| {
        b.iter(|| Pet::from_value(black_box(&valid)))
    });

    c.bench_function("pet_from_invalid_value", |b| {
        b.iter(|| Pet::from_value(black_box(&invalid)))
    });

    c.bench_function("pet_try_new", |b| {
        b.iter(|| Pet::try_new(black_box("Rex"), black_box(3), black_box(12), black_box(true)))
    });
}

fn bench_batch_validation(c: &mut Criterion) {
    let inputs: Vec<Value> = (0..1000)
        .map(|i| if i % 10 == 0 { invalid_input() } else { valid_input() })
        .collect();
    let engine = ModelValidationEngine::new();

    c.bench_function("validate_batch_1000", |b| {
        b.iter(|| engine.validate_batch(black_box(&inputs), Pet::schema()))
    });
}

criterion_group!(benches, bench_construction, bench_batch_validation);
criterion_main!(benches);
