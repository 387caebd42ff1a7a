use crate::data::Dataset;

pub const BUILTIN_NAMES: &[&str] = &["xor", "and", "or"];

const TRUTH_TABLE_INPUTS: [[f64; 2]; 4] = [
    [1.0, 0.0],
    [1.0, 1.0],
    [0.0, 1.0],
    [0.0, 0.0],
];

fn truth_table(name: &str, gate: fn(bool, bool) -> bool) -> Dataset {
    let inputs: Vec<Vec<f64>> = TRUTH_TABLE_INPUTS.iter().map(|row| row.to_vec()).collect();
    let outputs = TRUTH_TABLE_INPUTS.iter()
        .map(|row| {
            let out = gate(row[0] > 0.5, row[1] > 0.5);
            vec![if out { 1.0 } else { 0.0 }]
        })
        .collect();
    Dataset { name: name.to_owned(), inputs, outputs }
}

/// XOR truth table: 4 examples, 2 inputs, 1 output.
pub fn builtin_xor() -> Dataset {
    truth_table("XOR", |a, b| a != b)
}

pub fn builtin_and() -> Dataset {
    truth_table("AND", |a, b| a && b)
}

pub fn builtin_or() -> Dataset {
    truth_table("OR", |a, b| a || b)
}

/// Looks up a built-in dataset by (case-insensitive) name.
pub fn builtin(name: &str) -> Option<Dataset> {
    match name.to_ascii_lowercase().as_str() {
        "xor" => Some(builtin_xor()),
        "and" => Some(builtin_and()),
        "or" => Some(builtin_or()),
        _ => None,
    }
}
