use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::{debug, info};

use lease_calc_core::lease_accounting::journal;
use lease_calc_core::lease_accounting::validation::rate_from_percent;
use lease_calc_core::lease_accounting::{self, LeaseParameters, PaymentTiming};

use crate::input;
use crate::output::csv_out;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TimingArg {
    /// End of period
    Arrears,
    /// Start of period
    Advance,
}

impl From<TimingArg> for PaymentTiming {
    fn from(t: TimingArg) -> Self {
        match t {
            TimingArg::Arrears => PaymentTiming::Arrears,
            TimingArg::Advance => PaymentTiming::Advance,
        }
    }
}

/// Lease inputs shared by every lease command. Flag defaults reproduce the
/// 4-period, 25,000 per period, 5% classroom example.
#[derive(Args)]
pub struct LeaseInputArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Lease term in periods (1-50)
    #[arg(long, default_value_t = 4)]
    pub term: u32,

    /// Periodic lease payment (0-1,000,000)
    #[arg(long, default_value = "25000")]
    pub payment: Decimal,

    /// Discount rate per period in percent (0-100)
    #[arg(long, default_value = "5")]
    pub rate_pct: Decimal,

    /// Payment timing
    #[arg(long, value_enum, default_value = "arrears")]
    pub timing: TimingArg,

    /// Useful life of the underlying asset in periods (1-50)
    #[arg(long, default_value_t = 4)]
    pub useful_life: u32,

    /// Initial direct costs
    #[arg(long, default_value = "0")]
    pub initial_direct_costs: Decimal,

    /// Lease payments made before commencement
    #[arg(long, default_value = "0")]
    pub prepaid_payments: Decimal,

    /// Lease incentives received
    #[arg(long, default_value = "0")]
    pub lease_incentives: Decimal,
}

impl LeaseInputArgs {
    /// Build parameters from the individual flags.
    pub fn to_parameters(&self) -> LeaseParameters {
        LeaseParameters {
            term: self.term,
            payment: self.payment,
            rate: rate_from_percent(self.rate_pct),
            payment_timing: self.timing.into(),
            useful_life: self.useful_life,
            initial_direct_costs: self.initial_direct_costs,
            prepaid_payments: self.prepaid_payments,
            lease_incentives: self.lease_incentives,
        }
    }
}

/// Arguments for lease measurement
#[derive(Args)]
pub struct ComputeArgs {
    #[command(flatten)]
    pub lease: LeaseInputArgs,

    /// Also write the amortisation schedule to this CSV file
    #[arg(long)]
    pub export: Option<String>,
}

/// Arguments for journal entries
#[derive(Args)]
pub struct JournalArgs {
    #[command(flatten)]
    pub lease: LeaseInputArgs,
}

/// Input file, then piped stdin JSON, then flags.
fn resolve_parameters(
    args: &LeaseInputArgs,
) -> Result<LeaseParameters, Box<dyn std::error::Error>> {
    let params = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(params) = input::stdin::read_stdin()? {
        params
    } else {
        args.to_parameters()
    };
    debug!(?params, "lease parameters resolved");
    Ok(params)
}

pub fn run_compute(args: ComputeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = resolve_parameters(&args.lease)?;
    let result = lease_accounting::calculate_lease(&params)?;

    if let Some(ref path) = args.export {
        csv_out::write_schedule_file(path, &result.result.schedule)?;
        info!(path = %path, rows = result.result.schedule.len(), "schedule exported");
    }

    Ok(serde_json::to_value(result)?)
}

pub fn run_journal(args: JournalArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = resolve_parameters(&args.lease)?;
    let result = journal::generate_journal(&params)?;
    Ok(serde_json::to_value(result)?)
}
