//! Customer models and related types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::{ensure_positive, Amount};
use crate::error::{Error, Result};
#[cfg(feature = "utoipa")]
use crate::utoipa::ToSchema;

/// Direction of a statement operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    /// Funds in
    Credit,
    /// Funds out
    Debit,
}

/// A single statement entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
pub struct Operation {
    /// Free-text description
    pub description: String,
    /// Always strictly positive, the direction is carried by `kind`
    #[serde(with = "rust_decimal::serde::float")]
    #[cfg_attr(feature = "utoipa", schema(value_type = f64, example = 100.0))]
    pub amount: Amount,
    /// Credit or debit
    #[serde(rename = "type")]
    pub kind: OperationType,
    /// Insertion timestamp
    pub created_at: DateTime<Utc>,
}

impl Operation {
    /// Create an operation stamped with an explicit time
    pub fn new(
        kind: OperationType,
        description: impl Into<String>,
        amount: Amount,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            description: description.into(),
            amount,
            kind,
            created_at,
        }
    }

    /// Create a credit stamped with the current time
    pub fn credit(description: impl Into<String>, amount: Amount) -> Self {
        Self::new(OperationType::Credit, description, amount, Utc::now())
    }

    /// Create a debit stamped with the current time
    pub fn debit(description: impl Into<String>, amount: Amount) -> Self {
        Self::new(OperationType::Debit, description, amount, Utc::now())
    }

    /// Signed contribution of this operation to a balance
    pub fn signed_amount(&self) -> Amount {
        match self.kind {
            OperationType::Credit => self.amount,
            OperationType::Debit => -self.amount,
        }
    }

    /// Whether the operation happened on the given UTC calendar date
    pub fn occurred_on(&self, date: NaiveDate) -> bool {
        self.created_at.date_naive() == date
    }
}

/// Customer account model
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
pub struct Customer {
    /// Unique customer ID
    pub id: Uuid,
    /// Caller-supplied identifier, unique among live customers
    pub cpf: String,
    /// Display name
    pub name: String,
    /// Append-only operation history in chronological order
    pub statement: Vec<Operation>,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    /// Create a new customer with an empty statement
    pub fn new(cpf: impl Into<String>, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            cpf: cpf.into(),
            name: name.into(),
            statement: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Current balance: credits minus debits, folded in stored order
    ///
    /// `record` never admits an operation that would overflow, so the
    /// saturating fold is exact for every stored statement.
    pub fn balance(&self) -> Amount {
        self.statement
            .iter()
            .fold(Amount::ZERO, |acc, op| acc.saturating_add(op.signed_amount()))
    }

    /// Change the display name
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.updated_at = Utc::now();
    }

    /// Append an operation to the statement
    ///
    /// Debits larger than the current balance, and credits that would push
    /// the balance past the representable maximum, are rejected and leave
    /// the statement untouched.
    pub fn record(&mut self, operation: Operation) -> Result<Operation> {
        ensure_positive(operation.amount)?;

        let balance = self.balance();
        match operation.kind {
            OperationType::Debit if operation.amount > balance => {
                return Err(Error::InsufficientFunds(format!(
                    "Cannot withdraw {} with a balance of {}",
                    operation.amount, balance
                )));
            }
            OperationType::Credit if balance.checked_add(operation.amount).is_none() => {
                return Err(Error::InvalidArgument(format!(
                    "Deposit of {} would exceed the maximum balance",
                    operation.amount
                )));
            }
            _ => {}
        }

        self.statement.push(operation.clone());
        self.updated_at = Utc::now();
        Ok(operation)
    }

    /// Operations recorded on the given UTC calendar date
    pub fn statement_on(&self, date: NaiveDate) -> Vec<Operation> {
        self.statement
            .iter()
            .filter(|op| op.occurred_on(date))
            .cloned()
            .collect()
    }

    /// Full statement together with the computed balance
    pub fn to_statement(&self) -> Statement {
        Statement {
            balance: self.balance(),
            statement: self.statement.clone(),
        }
    }
}

/// Statement read model
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
pub struct Statement {
    /// Balance computed over the whole statement
    #[serde(with = "rust_decimal::serde::float")]
    #[cfg_attr(feature = "utoipa", schema(value_type = f64))]
    pub balance: Amount,
    /// Operations in chronological order
    pub statement: Vec<Operation>,
}

/// Balance read model
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
pub struct Balance {
    /// Customer ID
    pub customer_id: Uuid,
    /// Credits minus debits
    #[serde(with = "rust_decimal::serde::float")]
    #[cfg_attr(feature = "utoipa", schema(value_type = f64))]
    pub amount: Amount,
    /// When the balance was computed
    pub computed_at: DateTime<Utc>,
}

impl Balance {
    /// Compute the balance of a customer now
    pub fn of(customer: &Customer) -> Self {
        Self {
            customer_id: customer.id,
            amount: customer.balance(),
            computed_at: Utc::now(),
        }
    }
}
