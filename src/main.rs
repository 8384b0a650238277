//! Command line front end: inspect the gate library and solve saved circuits.

mod args;

use clap::Parser;
use nandsim::{
    components::mux,
    evaluator::Trace,
    signal::{join_signals, parse_signals},
    Circuit, Evaluator, Library,
};
use tracing::info;

use args::{Args, Command};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = args.to_config()?;

    let mut library = Library::standard()?;
    mux::define_mux(&mut library)?;
    let mut evaluator = Evaluator::with_config(&library, config);

    match args.command {
        Command::Gates => {
            for name in library.names() {
                let arity = library.get(name)?.arity();
                println!("{name:<8} {arity}");
            }
        }
        Command::Table { gate } => {
            let table = evaluator.gate_truth_table(&gate)?;
            print!("{table}");
        }
        Command::Solve {
            circuit,
            inputs,
            trace,
        } => {
            info!("Loading circuit: {}", circuit.display());
            let circuit = Circuit::load(&circuit)?;
            let inputs = parse_signals(&inputs)?;

            let mut frames = Trace::default();
            let solution = evaluator.solve_with_hooks(&circuit, &inputs, &mut frames)?;
            info!(passes = solution.passes, "circuit settled");

            if trace {
                for (step, frame) in frames.frames.iter().enumerate() {
                    let changed = frame
                        .changed
                        .map_or_else(|| "-".to_string(), |component| component.to_string());
                    println!("{step:>4} {changed:>4}  {}", join_signals(&frame.values));
                }
                println!();
            }
            println!("values:  {}", join_signals(&solution.values));
            println!("outputs: {}", join_signals(&solution.outputs));
        }
        Command::Sweep { circuit, json } => {
            info!("Loading circuit: {}", circuit.display());
            let circuit = Circuit::load(&circuit)?;
            let table = evaluator.truth_table(&circuit)?;
            info!(
                rows = table.rows.len(),
                memo_entries = evaluator.memo().len(),
                "sweep finished"
            );

            if json {
                println!("{}", serde_json::to_string_pretty(&table.keyed())?);
            } else {
                print!("{table}");
            }
        }
    }

    Ok(())
}
