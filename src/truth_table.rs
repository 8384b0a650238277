use std::{collections::BTreeMap, fmt};

use crate::signal::{join_signals, Signal};

/// Every tuple over `{U, 0, 1}` of the given length. Tuple `i` holds
/// `Signal::ALL[(i / 3^p) % 3]` at position `p`.
pub fn ternary_counter(arity: usize) -> impl Iterator<Item = Vec<Signal>> {
    let total = 3usize.saturating_pow(arity as u32);
    (0..total).map(move |n| {
        let mut rest = n;
        (0..arity)
            .map(|_| {
                let digit = Signal::ALL[rest % 3];
                rest /= 3;
                digit
            })
            .collect::<Vec<Signal>>()
    })
}

pub fn tuple_index(inputs: &[Signal]) -> usize {
    inputs.iter().rev().fold(0, |acc, signal| {
        let digit = match signal {
            Signal::Unknown => 0,
            Signal::Zero => 1,
            Signal::One => 2,
        };
        acc * 3 + digit
    })
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    pub inputs: Vec<Signal>,
    pub outputs: Vec<Signal>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TruthTable {
    pub arity: usize,
    pub outputs: usize,
    pub rows: Vec<Row>,
}

impl TruthTable {
    pub fn new(arity: usize, outputs: usize) -> Self {
        TruthTable {
            arity,
            outputs,
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, inputs: Vec<Signal>, outputs: Vec<Signal>) {
        self.rows.push(Row { inputs, outputs });
    }

    pub fn get(&self, inputs: &[Signal]) -> Option<&[Signal]> {
        if inputs.len() != self.arity {
            return None;
        }
        self.rows
            .get(tuple_index(inputs))
            .map(|row| row.outputs.as_slice())
    }

    pub fn keyed(&self) -> BTreeMap<String, String> {
        self.rows
            .iter()
            .map(|row| (join_signals(&row.inputs), join_signals(&row.outputs)))
            .collect()
    }

    pub fn binary_rows(&self) -> impl Iterator<Item = &Row> {
        self.rows
            .iter()
            .filter(|row| row.inputs.iter().all(|signal| signal.is_known()))
    }
}

impl fmt::Display for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header = (0..self.arity)
            .map(|i| format!("i{i}"))
            .chain(std::iter::once("|".to_string()))
            .chain((0..self.outputs).map(|i| format!("o{i}")))
            .collect::<Vec<_>>();
        writeln!(f, "{}", header.join(" "))?;
        for row in &self.rows {
            let cells = row
                .inputs
                .iter()
                .map(|signal| format!("{signal:<2}"))
                .chain(std::iter::once("|".to_string()))
                .chain(row.outputs.iter().map(|signal| format!("{signal:<2}")))
                .collect::<Vec<_>>();
            writeln!(f, "{}", cells.join(" ").trim_end())?;
        }
        Ok(())
    }
}
