use crate::constants::CURRENCY_SCALE;
use crate::models::{BalanceRow, Expense, ParticipantShare, Transaction};
use log::debug;
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

/// Rounding policy applied to each emitted amount.
///
/// Running balances always carry full precision; only the emitted copy
/// of an amount is rounded, so rounding error never compounds across
/// settlement steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rounding {
    /// Emit amounts exactly as computed.
    Exact,
    /// Emit amounts rounded half-away-from-zero to currency precision.
    Currency,
}

impl Rounding {
    fn apply(self, amount: Decimal) -> Decimal {
        match self {
            Rounding::Exact => amount,
            Rounding::Currency => {
                amount.round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::MidpointAwayFromZero)
            }
        }
    }
}

/// Accumulates net balances (lent minus owed) per participant.
///
/// Repeated rows for the same user fold into one entry; first-appearance
/// order is preserved so the sort in [`settle`] breaks ties by source order.
pub fn net_balances(shares: &[ParticipantShare]) -> Vec<(Uuid, Decimal)> {
    let mut index: HashMap<Uuid, usize> = HashMap::new();
    let mut dues: Vec<(Uuid, Decimal)> = Vec::new();
    for share in shares {
        match index.entry(share.user_id) {
            Entry::Occupied(slot) => dues[*slot.get()].1 += share.net(),
            Entry::Vacant(slot) => {
                slot.insert(dues.len());
                dues.push((share.user_id, share.net()));
            }
        }
    }
    dues
}

/// Reduces a balanced scope of participant shares to a minimal list of
/// pairwise transactions (minimum cash-flow reduction).
///
/// Participants are sorted by net balance ascending, then a two-pointer
/// walk repeatedly moves `min(|lowest|, |highest|)` from the most
/// indebted participant to the most owed one; each step zeroes at least
/// one side, so at most `n - 1` transactions are emitted for `n`
/// participants. Transactions whose emitted amount rounds to zero are
/// dropped.
///
/// The caller is responsible for supplying a balanced scope (total lent
/// equals total owed); an unbalanced scope yields an incorrect result,
/// not an error.
pub fn settle(shares: &[ParticipantShare], rounding: Rounding) -> Vec<Transaction> {
    let mut dues = net_balances(shares);
    dues.sort_by(|a, b| a.1.cmp(&b.1));

    let mut transactions = Vec::new();
    if dues.is_empty() {
        return transactions;
    }

    let mut low = 0;
    let mut high = dues.len() - 1;
    while low < high {
        let amount = dues[low].1.abs().min(dues[high].1.abs());
        let emitted = rounding.apply(amount);
        if !emitted.is_zero() {
            transactions.push(Transaction {
                from_user: dues[low].0,
                to_user: dues[high].0,
                amount: emitted,
            });
        }
        // The running balances take the unrounded amount.
        dues[low].1 += amount;
        dues[high].1 -= amount;
        if dues[low].1.is_zero() {
            low += 1;
        } else {
            high -= 1;
        }
    }

    debug!(
        "Settled {} shares into {} transactions",
        shares.len(),
        transactions.len()
    );
    transactions
}

/// Consolidates one user's position across expenses into one signed row
/// per counter-party.
///
/// Each expense is settled independently with [`Rounding::Exact`], its
/// transactions touching the user are projected onto signed
/// per-counter-party deltas, and the per-expense maps are combined with
/// a fold. Positive means the counter-party owes the user. Rows whose
/// emitted amount rounds to zero are dropped; output is ordered by
/// counter-party id.
pub fn aggregate_for_user(user_id: Uuid, expenses: &[Expense]) -> Vec<BalanceRow> {
    let totals = expenses
        .iter()
        .map(|expense| expense_contribution(user_id, expense))
        .fold(BTreeMap::new(), merge_contributions);

    let rows: Vec<BalanceRow> = totals
        .into_iter()
        .filter_map(|(user, total)| {
            let emitted = Rounding::Currency.apply(total);
            (!emitted.is_zero()).then_some(BalanceRow {
                user,
                amount: emitted,
            })
        })
        .collect();

    debug!(
        "Aggregated {} expenses into {} balance rows for user {}",
        expenses.len(),
        rows.len(),
        user_id
    );
    rows
}

fn expense_contribution(user_id: Uuid, expense: &Expense) -> BTreeMap<Uuid, Decimal> {
    let mut contribution = BTreeMap::new();
    for tx in settle(&expense.shares, Rounding::Exact) {
        if tx.from_user == user_id {
            *contribution.entry(tx.to_user).or_insert(Decimal::ZERO) -= tx.amount;
        } else if tx.to_user == user_id {
            *contribution.entry(tx.from_user).or_insert(Decimal::ZERO) += tx.amount;
        }
    }
    contribution
}

fn merge_contributions(
    mut acc: BTreeMap<Uuid, Decimal>,
    next: BTreeMap<Uuid, Decimal>,
) -> BTreeMap<Uuid, Decimal> {
    for (user, amount) in next {
        *acc.entry(user).or_insert(Decimal::ZERO) += amount;
    }
    acc
}
