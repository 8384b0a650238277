use std::path::PathBuf;

use clap::{Parser, Subcommand};
use nandsim::SolverConfig;

/// Three-valued NAND circuit simulator
#[derive(Parser, Debug)]
#[command(name = "nandsim")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Solver settings as JSON; missing fields keep their defaults
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the passes allowed per component
    #[arg(long, global = true)]
    pub passes_per_component: Option<usize>,

    /// Override the passes allowed on top of the per-component budget
    #[arg(long, global = true)]
    pub extra_passes: Option<usize>,

    /// Override the largest input count a truth table may enumerate
    #[arg(long, global = true)]
    pub max_table_arity: Option<usize>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the gate library with arities
    Gates,
    /// Print the truth table of a library gate
    Table {
        gate: String,
    },
    /// Solve a saved circuit for one input vector
    Solve {
        circuit: PathBuf,
        /// Comma separated input values, e.g. 1,0,U
        #[arg(short = 'i', long, default_value = "")]
        inputs: String,
        /// Print every intermediate value array
        #[arg(long, default_value_t = false)]
        trace: bool,
    },
    /// Solve a saved circuit for every input vector over {U, 0, 1}
    Sweep {
        circuit: PathBuf,
        /// Print the table as a JSON object keyed by input tuple
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

impl Args {
    pub fn to_config(&self) -> nandsim::Result<SolverConfig> {
        let mut config = match &self.config {
            Some(path) => SolverConfig::load(path)?,
            None => SolverConfig::default(),
        };
        if let Some(passes) = self.passes_per_component {
            config.passes_per_component = passes;
        }
        if let Some(passes) = self.extra_passes {
            config.extra_passes = passes;
        }
        if let Some(arity) = self.max_table_arity {
            config.max_table_arity = arity;
        }
        config.validate()
    }
}
