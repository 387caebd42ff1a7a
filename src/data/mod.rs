pub mod builtin;
pub mod csv;

pub use builtin::{builtin, builtin_and, builtin_or, builtin_xor, BUILTIN_NAMES};
pub use csv::{load_csv, parse_csv};

/// Paired example vectors ready for `Network::train`.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Short name shown in reports (e.g. "XOR" or the CSV file stem).
    pub name: String,
    pub inputs: Vec<Vec<f64>>,
    pub outputs: Vec<Vec<f64>>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    pub fn input_width(&self) -> Option<usize> {
        self.inputs.first().map(Vec::len)
    }

    pub fn output_width(&self) -> Option<usize> {
        self.outputs.first().map(Vec::len)
    }
}
