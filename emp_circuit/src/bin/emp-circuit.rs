use std::{collections::BTreeMap, fs, path::PathBuf};

use anyhow::Context;
use emp_circuit::{check_settings, CircuitSource, EmpCircuit, Values};
use structopt::StructOpt;
use tracing_subscriber::EnvFilter;

#[derive(StructOpt, Debug)]
#[structopt(name = "emp-circuit", about = "Prepare circuits for a two-or-more party garbling engine")]
enum Command {
    /// Print the renumbered circuit in simplified Bristol layout
    Emit {
        #[structopt(short, long, parse(from_os_str))]
        source: PathBuf,
    },
    /// Evaluate the renumbered circuit in plaintext
    Eval {
        #[structopt(short, long, parse(from_os_str))]
        source: PathBuf,
        /// JSON object of party name to named input values
        #[structopt(short, long, parse(from_os_str))]
        inputs: PathBuf,
    },
    /// Check that every party observes every output and the circuit renumbers
    Check {
        #[structopt(short, long, parse(from_os_str))]
        source: PathBuf,
    },
}

fn load_source(path: &PathBuf) -> anyhow::Result<CircuitSource> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read circuit source from {}", path.display()))?;
    let source = CircuitSource::from_json(&text)
        .with_context(|| format!("Failed to decode circuit source {}", path.display()))?;
    Ok(source)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match Command::from_args() {
        Command::Emit { source } => {
            let circ = EmpCircuit::new(&load_source(&source)?)?;
            let m = circ.metadata();
            tracing::info!(
                wire_count = m.wire_count,
                input_bits_0 = m.input_bits_0,
                input_bits_1 = m.input_bits_1,
                output_bits = m.output_bits,
                "emitting circuit"
            );
            println!("{}", circ.simplified_bristol());
        }
        Command::Eval { source, inputs } => {
            let circ = EmpCircuit::new(&load_source(&source)?)?;
            let text = fs::read_to_string(&inputs)
                .with_context(|| format!("Failed to read inputs from {}", inputs.display()))?;
            let inputs: BTreeMap<String, Values> = serde_json::from_str(&text)?;
            let outputs = circ.eval(&inputs)?;
            println!("{}", serde_json::to_string_pretty(&outputs)?);
        }
        Command::Check { source } => {
            let source = load_source(&source)?;
            check_settings(&source)?;
            let circ = EmpCircuit::new(&source)?;
            tracing::info!(parties = ?circ.party_names(), gates = circ.gates().len(), "circuit ok");
        }
    }
    Ok(())
}
