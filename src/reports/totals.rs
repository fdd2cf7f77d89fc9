//! Income/expense aggregation shared by the totals reports

use std::collections::HashMap;
use std::hash::Hash;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Money, Transaction, TransactionType};

/// Income and expense sums for one group of transactions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub income: Money,
    pub expense: Money,
}

impl Totals {
    /// Income minus expense
    ///
    /// Both sides are non-negative sums, so the difference always fits.
    pub fn balance(&self) -> Money {
        self.income - self.expense
    }

    /// Add one transaction's value to the matching side
    pub fn record(&mut self, txn: &Transaction) -> ExpenseResult<()> {
        let side = match txn.transaction_type() {
            TransactionType::Income => &mut self.income,
            TransactionType::Expense => &mut self.expense,
        };
        *side = side.checked_add(txn.value()).ok_or_else(overflow)?;
        Ok(())
    }

    /// Combine two groups, failing instead of wrapping around
    pub fn checked_add(self, rhs: Totals) -> ExpenseResult<Totals> {
        Ok(Totals {
            income: self.income.checked_add(rhs.income).ok_or_else(overflow)?,
            expense: self.expense.checked_add(rhs.expense).ok_or_else(overflow)?,
        })
    }
}

fn overflow() -> ExpenseError {
    ExpenseError::Storage("Stored transaction values add up to more than can be totaled".into())
}

/// Sum transactions per group key
///
/// One entry per key, in the order of `keys`; keys without transactions get
/// zero totals. Transactions whose key is not listed are ignored. The second
/// value is the grand total over the listed groups.
pub fn compute_totals<K, F>(
    transactions: &[Transaction],
    keys: &[K],
    key_fn: F,
) -> ExpenseResult<(Vec<(K, Totals)>, Totals)>
where
    K: Copy + Eq + Hash,
    F: Fn(&Transaction) -> K,
{
    let mut sums: HashMap<K, Totals> = keys.iter().map(|&k| (k, Totals::default())).collect();

    for txn in transactions {
        if let Some(totals) = sums.get_mut(&key_fn(txn)) {
            totals.record(txn)?;
        }
    }

    let groups: Vec<_> = keys
        .iter()
        .map(|k| (*k, sums.get(k).copied().unwrap_or_default()))
        .collect();
    let grand = groups
        .iter()
        .try_fold(Totals::default(), |acc, (_, totals)| acc.checked_add(*totals))?;

    Ok((groups, grand))
}
