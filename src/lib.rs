pub mod circuit;
pub mod circuit_builder;
pub mod components;
pub mod config;
pub mod editor;
pub mod error;
pub mod evaluator;
pub mod gate;
pub mod library;
pub mod memo;
pub mod signal;
pub mod truth_table;

pub use circuit::Circuit;
pub use config::SolverConfig;
pub use error::{Error, Result};
pub use evaluator::{Evaluator, Solution};
pub use gate::{GateKind, Source};
pub use library::Library;
pub use signal::Signal;
pub use truth_table::TruthTable;
