//! Transaction aggregation for the dashboard.
//!
//! Provides the totals, the expense breakdown by category, monthly income and
//! expense series, the 50/30/20 budget allocation, and the duplicate check used
//! before recording a new transaction.
//!
//! Every function here is pure: it only looks at the transactions it is given.

use std::collections::BTreeMap;

use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde::Serialize;

use crate::transaction::{Transaction, TransactionKind, TransactionType};

/// The share of income budgeted for needs.
pub const NEEDS_SHARE: Decimal = Decimal::from_parts(5, 0, 0, false, 1);
/// The share of income budgeted for wants.
pub const WANTS_SHARE: Decimal = Decimal::from_parts(3, 0, 0, false, 1);
/// The share of income budgeted for savings.
pub const SAVINGS_SHARE: Decimal = Decimal::from_parts(2, 0, 0, false, 1);

/// Income, expenses and the difference between them.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Totals {
    /// The sum of all income.
    pub total_income: Decimal,
    /// The magnitude of all expenses, never negative.
    pub total_expenses: Decimal,
    /// `total_income - total_expenses`.
    pub balance: Decimal,
    /// The number of transactions the totals were computed from.
    pub count: usize,
}

impl Totals {
    /// Whether there were no transactions at all, as opposed to transactions
    /// that sum to zero.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Calculate total income, total expenses and the balance.
///
/// Sums saturate at the limits of [Decimal] instead of overflowing.
pub fn compute_totals(transactions: &[Transaction]) -> Totals {
    let total_income = sum_of_kind(transactions, TransactionKind::Income);
    let total_expenses = sum_of_kind(transactions, TransactionKind::Expense).abs();

    Totals {
        total_income,
        total_expenses,
        balance: total_income.saturating_sub(total_expenses),
        count: transactions.len(),
    }
}

fn sum_of_kind(transactions: &[Transaction], kind: TransactionKind) -> Decimal {
    transactions
        .iter()
        .filter(|transaction| transaction.kind == kind)
        .fold(Decimal::ZERO, |total, transaction| {
            total.saturating_add(transaction.amount)
        })
}

/// Sum expenses by category.
///
/// Categories are keyed by the stored string and sorted by name. Categories
/// with no expenses do not appear.
pub fn compute_category_breakdown(transactions: &[Transaction]) -> BTreeMap<String, Decimal> {
    let mut totals: BTreeMap<String, Decimal> = BTreeMap::new();

    for transaction in transactions
        .iter()
        .filter(|transaction| transaction.kind == TransactionKind::Expense)
    {
        let total = totals.entry(transaction.category.clone()).or_default();
        *total = total.saturating_add(transaction.amount);
    }

    for total in totals.values_mut() {
        *total = total.abs();
    }

    totals
}

/// The income and expenses for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTotals {
    /// The month formatted as "YYYY-MM".
    pub month: String,
    /// The month's total income.
    pub income: Decimal,
    /// The magnitude of the month's expenses.
    pub expense: Decimal,
}

/// Sum income and expenses per month.
///
/// Months are in chronological order. Months without any transactions are not
/// included.
pub fn compute_monthly_series(transactions: &[Transaction]) -> Vec<MonthlyTotals> {
    let mut months: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();

    for transaction in transactions {
        let month = format!(
            "{:04}-{:02}",
            transaction.date.year(),
            u8::from(transaction.date.month())
        );
        let (income, expense) = months.entry(month).or_default();

        match transaction.kind {
            TransactionKind::Income => *income = income.saturating_add(transaction.amount),
            TransactionKind::Expense => *expense = expense.saturating_add(transaction.amount),
        }
    }

    months
        .into_iter()
        .map(|(month, (income, expense))| MonthlyTotals {
            month,
            income,
            expense: expense.abs(),
        })
        .collect()
}

/// Spending against the budget for one of the 50/30/20 groups.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct BudgetBucket {
    /// The magnitude of the expenses classified into this group.
    pub spent: Decimal,
    /// The group's share of total income.
    pub budget: Decimal,
    /// `spent / budget` as a percentage clamped to [0, 100], or 0 if there is
    /// no budget.
    pub percent_used: f64,
}

impl BudgetBucket {
    fn new(spent: Decimal, budget: Decimal) -> Self {
        let percent_used = if budget <= Decimal::ZERO {
            0.0
        } else {
            percent_of(spent, budget)
                .unwrap_or(Decimal::ONE_HUNDRED)
                .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
                .to_f64()
                .unwrap_or(100.0)
        };

        Self {
            spent,
            budget,
            percent_used,
        }
    }

    /// How much of the budget is left. Negative when the group is overspent.
    pub fn remaining(&self) -> Decimal {
        self.budget.saturating_sub(self.spent)
    }

    /// Spending as a percentage of `total_income`.
    ///
    /// Unlike [BudgetBucket::percent_used] this is not clamped, so overspending
    /// shows up as a share above the group's target. Returns 0 if there is no
    /// income or the share is too large to represent.
    pub fn share_of_income(&self, total_income: Decimal) -> f64 {
        if total_income <= Decimal::ZERO {
            return 0.0;
        }

        percent_of(self.spent, total_income)
            .and_then(|percent| percent.to_f64())
            .unwrap_or(0.0)
    }
}

fn percent_of(numerator: Decimal, denominator: Decimal) -> Option<Decimal> {
    numerator
        .checked_div(denominator)?
        .checked_mul(Decimal::ONE_HUNDRED)
}

/// Spending and budgets for needs, wants and savings under the 50/30/20 rule.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct BudgetAllocation {
    /// Essentials, budgeted 50% of income.
    pub needs: BudgetBucket,
    /// Discretionary spending, budgeted 30% of income.
    pub wants: BudgetBucket,
    /// Savings and debt repayment, budgeted 20% of income.
    pub savings: BudgetBucket,
}

impl BudgetAllocation {
    /// The groups paired with their type and target share of income, in
    /// display order.
    pub fn buckets(&self) -> [(TransactionType, Decimal, &BudgetBucket); 3] {
        [
            (TransactionType::Need, NEEDS_SHARE, &self.needs),
            (TransactionType::Want, WANTS_SHARE, &self.wants),
            (TransactionType::Savings, SAVINGS_SHARE, &self.savings),
        ]
    }
}

/// Split `total_income` into 50/30/20 budgets and sum the classified expenses
/// against them.
///
/// Income transactions never count as spending, regardless of their
/// classification. Expenses without a classification count towards no group.
pub fn compute_budget_allocation(
    transactions: &[Transaction],
    total_income: Decimal,
) -> BudgetAllocation {
    let spent = |transaction_type: TransactionType| {
        transactions
            .iter()
            .filter(|transaction| {
                transaction.kind == TransactionKind::Expense
                    && transaction.transaction_type == Some(transaction_type)
            })
            .fold(Decimal::ZERO, |total, transaction| {
                total.saturating_add(transaction.amount)
            })
            .abs()
    };

    BudgetAllocation {
        needs: BudgetBucket::new(spent(TransactionType::Need), NEEDS_SHARE * total_income),
        wants: BudgetBucket::new(spent(TransactionType::Want), WANTS_SHARE * total_income),
        savings: BudgetBucket::new(
            spent(TransactionType::Savings),
            SAVINGS_SHARE * total_income,
        ),
    }
}

/// Whether `candidate` has already been recorded.
///
/// Two transactions are the same if they have the same date, trimmed
/// description, amount and category. The kind and classification are ignored.
/// This scans every existing transaction.
pub fn is_duplicate(existing: &[Transaction], candidate: &Transaction) -> bool {
    let description = candidate.description.trim();

    existing.iter().any(|transaction| {
        transaction.date == candidate.date
            && transaction.description.trim() == description
            && transaction.amount == candidate.amount
            && transaction.category == candidate.category
    })
}
