//! Repository for customer data

use async_trait::async_trait;
use common::error::{Error, Result};
use common::model::customer::{Customer, Operation};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::debug;

/// Customer repository trait defining the interface for customer storage
///
/// Implementations must serialize every mutation of a single customer so that
/// `cpf` stays unique and statements stay append-only under concurrent
/// requests.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Insert a new customer, failing if the cpf is already taken
    async fn create_customer(&self, customer: Customer) -> Result<Customer>;

    /// Get a customer by cpf
    async fn get_customer(&self, cpf: &str) -> Result<Option<Customer>>;

    /// Change the name of an existing customer
    async fn update_name(&self, cpf: &str, name: &str) -> Result<Customer>;

    /// Remove a customer, matching on both cpf and id
    async fn delete_customer(&self, customer: &Customer) -> Result<Customer>;

    /// Append an operation to a customer's statement
    async fn append_operation(&self, cpf: &str, operation: Operation) -> Result<Operation>;

    /// Number of live customers
    async fn customer_count(&self) -> Result<usize>;
}

/// In-memory repository for customer data
pub struct InMemoryCustomerRepository {
    /// Customers by cpf
    pub customers: DashMap<String, Customer>,
}

impl InMemoryCustomerRepository {
    /// Create a new, empty in-memory customer repository
    pub fn new() -> Self {
        Self {
            customers: DashMap::new(),
        }
    }
}

impl Default for InMemoryCustomerRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn create_customer(&self, customer: Customer) -> Result<Customer> {
        match self.customers.entry(customer.cpf.clone()) {
            Entry::Occupied(_) => Err(Error::AlreadyExists(format!(
                "A customer with cpf {} already exists",
                customer.cpf
            ))),
            Entry::Vacant(slot) => {
                debug!("Storing customer {} under cpf {}", customer.id, customer.cpf);
                slot.insert(customer.clone());
                Ok(customer)
            }
        }
    }

    async fn get_customer(&self, cpf: &str) -> Result<Option<Customer>> {
        Ok(self.customers.get(cpf).map(|c| c.clone()))
    }

    async fn update_name(&self, cpf: &str, name: &str) -> Result<Customer> {
        let mut customer = self
            .customers
            .get_mut(cpf)
            .ok_or_else(|| Error::NotFound(format!("No customer with cpf {}", cpf)))?;

        customer.rename(name);
        Ok(customer.clone())
    }

    async fn delete_customer(&self, customer: &Customer) -> Result<Customer> {
        // A customer re-created under the same cpf has a new id and must survive
        self.customers
            .remove_if(&customer.cpf, |_, stored| stored.id == customer.id)
            .map(|(_, removed)| removed)
            .ok_or_else(|| Error::NotFound(format!("No customer with cpf {}", customer.cpf)))
    }

    async fn append_operation(&self, cpf: &str, operation: Operation) -> Result<Operation> {
        // The shard lock is held across the funds check and the push
        let mut customer = self
            .customers
            .get_mut(cpf)
            .ok_or_else(|| Error::NotFound(format!("No customer with cpf {}", cpf)))?;

        customer.record(operation)
    }

    async fn customer_count(&self) -> Result<usize> {
        Ok(self.customers.len())
    }
}
