//! Illustrative journal entries and financial statement extracts.
//!
//! Entries are derived from the measured lease: the commencement entry
//! recognises the ROU asset and liability, and the period-1 entries book
//! interest, the liability repayment and depreciation from the first
//! schedule row.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use crate::error::LeaseCalcError;
use crate::lease_accounting::measurement::{compute, LeaseParameters, LeaseResult};
use crate::lease_accounting::validation::validate_parameters;
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::LeaseCalcResult;

const BALANCE_TOLERANCE: Money = dec!(0.000001);

pub const ROU_ASSET: &str = "Right-of-Use Asset";
pub const LEASE_LIABILITY: &str = "Lease Liability";
pub const CASH: &str = "Cash";
pub const PREPAID_LEASE_PAYMENTS: &str = "Prepaid Lease Payments";
pub const INTEREST_EXPENSE: &str = "Interest Expense";
pub const DEPRECIATION_EXPENSE: &str = "Depreciation Expense";
pub const ACCUMULATED_DEPRECIATION: &str = "Accumulated Depreciation";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntrySide {
    Debit,
    Credit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalLine {
    pub account: String,
    pub side: EntrySide,
    pub amount: Money,
}

/// A dated double-entry posting made up of debit and credit lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// When the entry is booked, e.g. "At commencement"
    pub label: String,
    pub lines: Vec<JournalLine>,
}

impl JournalEntry {
    fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            lines: Vec::new(),
        }
    }

    fn debit(mut self, account: &str, amount: Money) -> Self {
        self.lines.push(JournalLine {
            account: account.to_string(),
            side: EntrySide::Debit,
            amount,
        });
        self
    }

    fn credit(mut self, account: &str, amount: Money) -> Self {
        self.lines.push(JournalLine {
            account: account.to_string(),
            side: EntrySide::Credit,
            amount,
        });
        self
    }

    pub fn total_debits(&self) -> Money {
        self.side_total(EntrySide::Debit)
    }

    pub fn total_credits(&self) -> Money {
        self.side_total(EntrySide::Credit)
    }

    /// Debits equal credits to within a millionth of a currency unit.
    pub fn is_balanced(&self) -> bool {
        (self.total_debits() - self.total_credits()).abs() < BALANCE_TOLERANCE
    }

    fn side_total(&self, side: EntrySide) -> Money {
        self.lines
            .iter()
            .filter(|l| l.side == side)
            .map(|l| l.amount)
            .sum()
    }
}

/// Balances and charges at the end of period 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementExtracts {
    /// Statement of financial position: ROU asset net of one period's depreciation
    pub rou_asset_net_book_value: Money,
    /// Statement of financial position: period-1 closing liability
    pub lease_liability: Money,
    /// Profit or loss
    pub depreciation_expense: Money,
    /// Profit or loss
    pub interest_expense: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalOutput {
    pub commencement: JournalEntry,
    /// Advance leases only: the payment made at commencement
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commencement_payment: Option<JournalEntry>,
    pub first_period: Vec<JournalEntry>,
    pub extracts: StatementExtracts,
    /// Undiscounted cash paid over the schedule
    pub total_payments: Money,
    /// Interest expense over the schedule
    pub total_interest: Money,
}

impl JournalOutput {
    /// Every entry in booking order.
    pub fn entries(&self) -> impl Iterator<Item = &JournalEntry> {
        std::iter::once(&self.commencement)
            .chain(self.commencement_payment.iter())
            .chain(self.first_period.iter())
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Derive journal entries and period-1 statement extracts from a measured
/// lease.
pub fn journal_entries(
    params: &LeaseParameters,
    result: &LeaseResult,
) -> LeaseCalcResult<JournalOutput> {
    let row1 = result
        .schedule
        .iter()
        .find(|r| r.period == 1)
        .ok_or_else(|| {
            LeaseCalcError::InsufficientData(
                "Journal entries require a period-1 schedule row".into(),
            )
        })?;

    let commencement = commencement_entry(params, result);

    let commencement_payment = result.schedule.first().filter(|r| r.period == 0).map(|r0| {
        JournalEntry::new("At commencement (payment in advance)")
            .debit(LEASE_LIABILITY, r0.principal_reduction)
            .credit(CASH, r0.principal_reduction)
    });

    let first_period = vec![
        JournalEntry::new("End of period 1: lease payment")
            .debit(INTEREST_EXPENSE, row1.interest)
            .debit(LEASE_LIABILITY, row1.principal_reduction)
            .credit(CASH, row1.payment),
        JournalEntry::new("End of period 1: depreciation")
            .debit(DEPRECIATION_EXPENSE, result.annual_depreciation)
            .credit(ACCUMULATED_DEPRECIATION, result.annual_depreciation),
    ];

    let extracts = StatementExtracts {
        rou_asset_net_book_value: result.initial_rou_asset - result.annual_depreciation,
        lease_liability: row1.closing,
        depreciation_expense: result.annual_depreciation,
        interest_expense: row1.interest,
    };

    Ok(JournalOutput {
        commencement,
        commencement_payment,
        first_period,
        extracts,
        total_payments: result.schedule.iter().map(|r| r.payment).sum(),
        total_interest: result.schedule.iter().map(|r| r.interest).sum(),
    })
}

/// Validate parameters, measure the lease and produce its journal entries
/// wrapped with methodology and warnings.
pub fn generate_journal(
    params: &LeaseParameters,
) -> LeaseCalcResult<ComputationOutput<JournalOutput>> {
    let start = Instant::now();
    validate_parameters(params)?;

    let result = compute(*params);
    let output = journal_entries(params, &result)?;

    let mut warnings = Vec::new();
    for entry in output.entries() {
        if !entry.is_balanced() {
            warnings.push(format!(
                "'{}' does not balance: debits {} vs credits {}",
                entry.label,
                entry.total_debits(),
                entry.total_credits()
            ));
        }
    }

    let entries = output.entries().count();
    debug!(
        entries,
        total_interest = %output.total_interest,
        "journal generated"
    );

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "IFRS 16 lessee journal entries: commencement and end of period 1",
        params,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn commencement_entry(params: &LeaseParameters, result: &LeaseResult) -> JournalEntry {
    let mut entry = JournalEntry::new("At commencement").debit(ROU_ASSET, result.initial_rou_asset);
    if params.lease_incentives > Decimal::ZERO {
        entry = entry.debit(CASH, params.lease_incentives);
    }
    entry = entry.credit(LEASE_LIABILITY, result.initial_liability);
    if params.initial_direct_costs > Decimal::ZERO {
        entry = entry.credit(CASH, params.initial_direct_costs);
    }
    if params.prepaid_payments > Decimal::ZERO {
        entry = entry.credit(PREPAID_LEASE_PAYMENTS, params.prepaid_payments);
    }
    entry
}
