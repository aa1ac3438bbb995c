//! Defines the core data models for transactions and the rules for recording new ones.

use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;
use unicode_segmentation::UnicodeSegmentation;

use crate::Error;

/// The minimum number of characters in a trimmed description.
pub const MIN_DESCRIPTION_LENGTH: usize = 3;

/// The largest amount a single transaction may have, one trillion dollars.
///
/// Keeps sums over a whole sheet far from the limits of [Decimal].
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

// ============================================================================
// MODELS
// ============================================================================

/// Whether money was earned or spent.
///
/// Stored in the `type` column of the transactions sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    /// All kinds, in the order they are offered in filters.
    pub const ALL: [TransactionKind; 2] = [TransactionKind::Income, TransactionKind::Expense];

    /// The value stored in the sheet.
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            other => Err(format!("unknown transaction kind \"{other}\"")),
        }
    }
}

/// The classification used for 50/30/20 budgeting.
///
/// This is orthogonal to [TransactionKind], although new transactions derive
/// their kind from it (see [TransactionType::kind]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    Need,
    Want,
    Savings,
    Income,
}

impl TransactionType {
    /// All transaction types in the order they are shown in the entry form.
    pub const ALL: [TransactionType; 4] = [
        TransactionType::Need,
        TransactionType::Want,
        TransactionType::Savings,
        TransactionType::Income,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Need => "Need",
            TransactionType::Want => "Want",
            TransactionType::Savings => "Savings",
            TransactionType::Income => "Income",
        }
    }

    /// The categories offered in the entry form for this transaction type.
    ///
    /// Stored transactions are not validated against this list, a stored
    /// category may be any string.
    pub fn categories(self) -> &'static [&'static str] {
        match self {
            TransactionType::Need => &[
                "Housing",
                "Utilities",
                "Groceries",
                "Transportation",
                "Healthcare",
                "Insurance",
            ],
            TransactionType::Want => &[
                "Entertainment",
                "Dining Out",
                "Shopping",
                "Travel",
                "Subscriptions",
            ],
            TransactionType::Savings => &[
                "Emergency Fund",
                "Investments",
                "Retirement",
                "Debt Repayment",
            ],
            TransactionType::Income => &[
                "Salary",
                "Freelance",
                "Investment Income",
                "Other Income",
            ],
        }
    }

    /// The kind of a newly entered transaction with this type.
    pub fn kind(self) -> TransactionKind {
        match self {
            TransactionType::Income => TransactionKind::Income,
            _ => TransactionKind::Expense,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text.trim().to_lowercase().as_str() {
            "need" => Ok(TransactionType::Need),
            "want" => Ok(TransactionType::Want),
            "savings" => Ok(TransactionType::Savings),
            "income" => Ok(TransactionType::Income),
            other => Err(format!("unknown transaction type \"{other}\"")),
        }
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// Transactions are appended to the sheet once and never modified.
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// When the transaction happened.
    pub date: Date,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The amount of money spent or earned, recorded as a positive magnitude.
    pub amount: Decimal,
    /// The category label, e.g. "Groceries".
    pub category: String,
    /// Whether the money was earned or spent.
    pub kind: TransactionKind,
    /// The 50/30/20 classification, absent for sheets that predate it.
    pub transaction_type: Option<TransactionType>,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(amount: Decimal, date: Date, description: &str) -> TransactionBuilder {
        TransactionBuilder {
            amount,
            date,
            description: description.to_owned(),
            category: String::new(),
            kind: TransactionKind::Expense,
            transaction_type: None,
        }
    }
}

/// A builder for creating [Transaction] instances.
///
/// Use [TransactionBuilder::finalise] for rows that were already stored, and
/// [TransactionBuilder::validate] for transactions entered by the user.
///
/// # Examples
///
/// ```
/// use budget_pro::{Transaction, TransactionType};
/// use rust_decimal::Decimal;
/// use time::macros::date;
///
/// let transaction = Transaction::build(Decimal::new(4599, 2), date!(2025 - 01 - 15), "Weekly shop")
///     .category("Groceries")
///     .transaction_type(Some(TransactionType::Need))
///     .validate()
///     .unwrap();
/// ```
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    pub amount: Decimal,
    pub date: Date,
    pub description: String,
    /// Defaults to an empty string, which [TransactionBuilder::validate] rejects.
    pub category: String,
    /// Defaults to [TransactionKind::Expense].
    pub kind: TransactionKind,
    pub transaction_type: Option<TransactionType>,
}

impl TransactionBuilder {
    pub fn category(mut self, category: &str) -> Self {
        self.category = category.to_owned();
        self
    }

    pub fn kind(mut self, kind: TransactionKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the 50/30/20 classification.
    ///
    /// This does not change the kind, use [TransactionBuilder::kind] or
    /// [TransactionBuilder::classified_as] for that.
    pub fn transaction_type(mut self, transaction_type: Option<TransactionType>) -> Self {
        self.transaction_type = transaction_type;
        self
    }

    /// Set the classification and the kind derived from it, the way the entry
    /// form records transactions.
    pub fn classified_as(self, transaction_type: TransactionType) -> Self {
        self.kind(transaction_type.kind())
            .transaction_type(Some(transaction_type))
    }

    /// Create the transaction without checking the entry rules.
    pub fn finalise(self) -> Transaction {
        Transaction {
            date: self.date,
            description: self.description,
            amount: self.amount,
            category: self.category,
            kind: self.kind,
            transaction_type: self.transaction_type,
        }
    }

    /// Check the entry rules and create the transaction.
    ///
    /// The description and category are trimmed.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::EmptyDescription] if the trimmed description is empty,
    /// - [Error::DescriptionTooShort] if the trimmed description is shorter than [MIN_DESCRIPTION_LENGTH],
    /// - [Error::NonPositiveAmount] if the amount is zero or negative,
    /// - [Error::AmountTooLarge] if the amount is larger than [MAX_AMOUNT],
    /// - or [Error::EmptyCategory] if the trimmed category is empty.
    pub fn validate(self) -> Result<Transaction, Error> {
        let description = self.description.trim();

        if description.is_empty() {
            return Err(Error::EmptyDescription);
        }

        if description.graphemes(true).count() < MIN_DESCRIPTION_LENGTH {
            return Err(Error::DescriptionTooShort(MIN_DESCRIPTION_LENGTH));
        }

        if self.amount <= Decimal::ZERO {
            return Err(Error::NonPositiveAmount(self.amount));
        }

        if self.amount > MAX_AMOUNT {
            return Err(Error::AmountTooLarge(self.amount));
        }

        let category = self.category.trim();

        if category.is_empty() {
            return Err(Error::EmptyCategory);
        }

        Ok(Transaction {
            date: self.date,
            description: description.to_owned(),
            amount: self.amount,
            category: category.to_owned(),
            kind: self.kind,
            transaction_type: self.transaction_type,
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================
