use clap::Args;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use commission_core::bracketed;
use commission_core::flat_rate::{self, FlatRateInput};
use commission_core::model::CommissionInput;
use commission_core::tiered;
use commission_core::ComputationOutput;

use crate::{input, output};

/// Arguments shared by every commission policy
#[derive(Args)]
pub struct PolicyArgs {
    /// Path to the users/deals JSON input (reads piped stdin when omitted)
    pub input: Option<String>,

    /// Write the commissions document to this file instead of printing the
    /// full report to stdout
    pub destination: Option<String>,
}

fn load<T: DeserializeOwned>(args: &PolicyArgs) -> Result<T, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        input::file::read_json(path)
    } else if let Some(data) = input::stdin::read_stdin()? {
        Ok(data)
    } else {
        Err("<INPUT> file path or piped stdin JSON required".into())
    }
}

/// Hand the bare result to the file writer when a destination is given,
/// otherwise return the whole envelope for stdout formatting.
fn deliver<T: Serialize>(
    args: &PolicyArgs,
    computed: ComputationOutput<T>,
) -> Result<Option<Value>, Box<dyn std::error::Error>> {
    match args.destination {
        Some(ref path) => {
            output::file::write_json(path, &computed.result)?;
            info!(path = %path, "commissions written");
            Ok(None)
        }
        None => Ok(Some(serde_json::to_value(computed)?)),
    }
}

pub fn run_flat_rate(args: PolicyArgs) -> Result<Option<Value>, Box<dyn std::error::Error>> {
    let flat_input: FlatRateInput = load(&args)?;
    let result = flat_rate::calculate_flat_rate_commissions(&flat_input)?;
    deliver(&args, result)
}

pub fn run_bracketed(args: PolicyArgs) -> Result<Option<Value>, Box<dyn std::error::Error>> {
    let commission_input: CommissionInput = load(&args)?;
    let result = bracketed::calculate_bracketed_commissions(&commission_input)?;
    deliver(&args, result)
}

pub fn run_tiered(args: PolicyArgs) -> Result<Option<Value>, Box<dyn std::error::Error>> {
    let commission_input: CommissionInput = load(&args)?;
    let result = tiered::calculate_tiered_commissions(&commission_input)?;
    deliver(&args, result)
}
