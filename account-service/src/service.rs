//! Account service implementation

use std::sync::Arc;

use chrono::NaiveDate;
use common::decimal::{ensure_positive, Amount};
use common::error::{Error, ErrorExt, Result};
use common::model::customer::{Balance, Customer, Operation, Statement};
use tracing::{debug, info, warn};

use crate::config::AccountServiceConfig;
use crate::repository::{CustomerRepository, InMemoryCustomerRepository};

/// Account service for managing customers and their statements
///
/// Operations that act on an existing customer take the customer returned by
/// [`AccountService::resolve_customer`], so identity resolution always runs
/// before validation and mutation.
pub struct AccountService {
    /// Repository for customer data
    repo: Arc<dyn CustomerRepository>,
    /// Service configuration
    config: AccountServiceConfig,
}

impl AccountService {
    /// Create a new account service backed by an in-memory repository
    pub fn new() -> Self {
        Self::with_config(&AccountServiceConfig::from_env())
    }

    /// Create a new account service with a configuration
    pub fn with_config(config: &AccountServiceConfig) -> Self {
        Self {
            repo: Arc::new(InMemoryCustomerRepository::new()),
            config: config.clone(),
        }
    }

    /// Create a new account service on top of an existing repository
    pub fn with_repository(repo: Arc<dyn CustomerRepository>, config: &AccountServiceConfig) -> Self {
        Self {
            repo,
            config: config.clone(),
        }
    }

    /// Locate a customer by exact cpf match
    pub async fn resolve_customer(&self, cpf: &str) -> Result<Customer> {
        if cpf.trim().is_empty() {
            return Err(Error::ValidationError("cpf must not be empty".to_string()));
        }

        self.repo
            .get_customer(cpf)
            .await?
            .ok_or_else(|| Error::NotFound(format!("No customer with cpf {}", cpf)))
    }

    /// Create a new customer account
    pub async fn create_account(&self, cpf: &str, name: &str) -> Result<Customer> {
        if cpf.trim().is_empty() {
            return Err(Error::ValidationError("cpf must not be empty".to_string()));
        }
        if name.trim().is_empty() {
            return Err(Error::ValidationError("name must not be empty".to_string()));
        }

        info!("Creating account for cpf {}", cpf);
        let customer = self.repo.create_customer(Customer::new(cpf, name)).await?;
        debug!("Created customer {}", customer.id);
        Ok(customer)
    }

    /// Change the display name of a customer
    pub async fn update_account(&self, customer: &Customer, name: &str) -> Result<Customer> {
        if name.trim().is_empty() {
            return Err(Error::ValidationError("name must not be empty".to_string()));
        }

        info!("Renaming customer {}", customer.id);
        self.repo
            .update_name(&customer.cpf, name)
            .await
            .with_context(|| format!("Failed to rename customer {}", customer.id))
    }

    /// Remove a customer account
    pub async fn delete_account(&self, customer: &Customer) -> Result<Customer> {
        info!("Deleting customer {}", customer.id);
        self.repo
            .delete_customer(customer)
            .await
            .with_context(|| format!("Failed to delete customer {}", customer.id))
    }

    /// Deposit funds, appending a credit
    pub async fn deposit(&self, customer: &Customer, description: &str, amount: Amount) -> Result<Operation> {
        let amount = ensure_positive(amount)?;

        let operation = self
            .repo
            .append_operation(&customer.cpf, Operation::credit(description, amount))
            .await
            .with_context(|| format!("Failed to deposit into customer {}", customer.id))?;

        self.log_operation(customer, &operation);
        Ok(operation)
    }

    /// Withdraw funds, appending a debit
    ///
    /// Fails with `InsufficientFunds` when `amount` exceeds the balance. The
    /// balance is folded by the repository under the customer's lock, not
    /// from the resolved snapshot, so concurrent withdrawals cannot overdraw.
    pub async fn withdraw(&self, customer: &Customer, description: &str, amount: Amount) -> Result<Operation> {
        let amount = ensure_positive(amount)?;

        let operation = self
            .repo
            .append_operation(&customer.cpf, Operation::debit(description, amount))
            .await
            .map_err(|e| {
                if let Error::InsufficientFunds(_) = e {
                    warn!("Rejected withdrawal of {} from customer {}", amount, customer.id);
                }
                e
            })
            .with_context(|| format!("Failed to withdraw from customer {}", customer.id))?;

        self.log_operation(customer, &operation);
        Ok(operation)
    }

    /// Full statement with the computed balance
    pub fn statement(&self, customer: &Customer) -> Statement {
        customer.to_statement()
    }

    /// Operations recorded on a given calendar date
    pub fn statement_by_date(&self, customer: &Customer, date: NaiveDate) -> Vec<Operation> {
        customer.statement_on(date)
    }

    /// Current balance of a customer
    pub fn balance(&self, customer: &Customer) -> Balance {
        Balance::of(customer)
    }

    /// Number of live customers
    pub async fn customer_count(&self) -> Result<usize> {
        self.repo.customer_count().await
    }

    fn log_operation(&self, customer: &Customer, operation: &Operation) {
        if self.config.transaction_logging {
            info!(
                "Recorded {:?} of {} for customer {}: {}",
                operation.kind, operation.amount, customer.id, operation.description
            );
        } else {
            debug!(
                "Recorded {:?} of {} for customer {}",
                operation.kind, operation.amount, customer.id
            );
        }
    }
}

impl Default for AccountService {
    fn default() -> Self {
        Self::new()
    }
}
