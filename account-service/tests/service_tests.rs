use std::sync::Arc;

use account_service::{AccountService, AccountServiceConfig, CustomerRepository, InMemoryCustomerRepository};
use chrono::{NaiveDate, TimeZone, Utc};
use common::decimal::{dec, Amount};
use common::error::Error;
use common::model::customer::{Operation, OperationType};
use uuid::Uuid;

fn service() -> AccountService {
    AccountService::with_config(&AccountServiceConfig::new(false))
}

#[tokio::test]
async fn test_create_account() {
    let service = service();
    let customer = service.create_account("123", "Alice").await.unwrap();

    assert_ne!(customer.id, Uuid::nil());
    assert_eq!(customer.cpf, "123");
    assert_eq!(customer.name, "Alice");
    assert!(customer.statement.is_empty());
    assert_eq!(customer.created_at.date_naive(), Utc::now().date_naive());
}

#[tokio::test]
async fn test_create_account_with_existing_cpf_fails() {
    let service = service();
    service.create_account("123", "Alice").await.unwrap();

    let result = service.create_account("123", "Alice").await;
    assert!(matches!(result, Err(Error::AlreadyExists(_))));
    assert_eq!(service.customer_count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_create_account_requires_cpf_and_name() {
    let service = service();

    assert!(matches!(service.create_account("", "Alice").await, Err(Error::ValidationError(_))));
    assert!(matches!(service.create_account("123", "  ").await, Err(Error::ValidationError(_))));
    assert_eq!(service.customer_count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_resolve_customer() {
    let service = service();
    let created = service.create_account("123", "Alice").await.unwrap();

    let resolved = service.resolve_customer("123").await.unwrap();
    assert_eq!(resolved.id, created.id);

    assert!(matches!(service.resolve_customer("999").await, Err(Error::NotFound(_))));
    assert!(matches!(service.resolve_customer("").await, Err(Error::ValidationError(_))));
}

#[tokio::test]
async fn test_update_account() {
    let service = service();
    let customer = service.create_account("123", "Alice").await.unwrap();

    let updated = service.update_account(&customer, "Alice Smith").await.unwrap();
    assert_eq!(updated.id, customer.id);
    assert_eq!(updated.name, "Alice Smith");

    let blank = service.update_account(&customer, "").await;
    assert!(matches!(blank, Err(Error::ValidationError(_))));
}

#[tokio::test]
async fn test_delete_account() {
    let service = service();
    let alice = service.create_account("123", "Alice").await.unwrap();
    service.create_account("456", "Bob").await.unwrap();

    service.delete_account(&alice).await.unwrap();

    assert!(matches!(service.resolve_customer("123").await, Err(Error::NotFound(_))));
    assert!(service.resolve_customer("456").await.is_ok());

    // Deleting twice reports the customer as gone
    assert!(matches!(service.delete_account(&alice).await, Err(Error::NotFound(_))));
}

#[tokio::test]
async fn test_deposit_then_withdraw() {
    let service = service();
    service.create_account("123", "Alice").await.unwrap();

    let customer = service.resolve_customer("123").await.unwrap();
    let credit = service.deposit(&customer, "salary", dec!(100)).await.unwrap();
    assert_eq!(credit.kind, OperationType::Credit);
    assert_eq!(credit.amount, dec!(100));

    let customer = service.resolve_customer("123").await.unwrap();
    let debit = service.withdraw(&customer, "groceries", dec!(30)).await.unwrap();
    assert_eq!(debit.kind, OperationType::Debit);

    let customer = service.resolve_customer("123").await.unwrap();
    assert_eq!(service.balance(&customer).amount, dec!(70));
    assert_eq!(service.statement(&customer).statement.len(), 2);
}

#[tokio::test]
async fn test_withdraw_more_than_balance_appends_nothing() {
    let service = service();
    let customer = service.create_account("123", "Alice").await.unwrap();
    service.deposit(&customer, "salary", dec!(100)).await.unwrap();

    let result = service.withdraw(&customer, "car", dec!(150)).await;
    assert!(matches!(result, Err(Error::InsufficientFunds(_))));

    let customer = service.resolve_customer("123").await.unwrap();
    assert_eq!(customer.statement.len(), 1);
    assert_eq!(service.balance(&customer).amount, dec!(100));
}

#[tokio::test]
async fn test_non_positive_amounts_are_rejected() {
    let service = service();
    let customer = service.create_account("123", "Alice").await.unwrap();

    for amount in [Amount::ZERO, dec!(-10)] {
        let deposit = service.deposit(&customer, "bad", amount).await;
        assert!(matches!(deposit, Err(Error::InvalidArgument(_))));

        let withdraw = service.withdraw(&customer, "bad", amount).await;
        assert!(matches!(withdraw, Err(Error::InvalidArgument(_))));
    }

    let customer = service.resolve_customer("123").await.unwrap();
    assert!(customer.statement.is_empty());
}

#[tokio::test]
async fn test_operations_on_deleted_customer_fail() {
    let service = service();
    let customer = service.create_account("123", "Alice").await.unwrap();
    service.delete_account(&customer).await.unwrap();

    let result = service.deposit(&customer, "late", dec!(10)).await;
    assert!(matches!(result, Err(Error::NotFound(_))));
}

#[tokio::test]
async fn test_balance_of_new_customer_is_zero() {
    let service = service();
    let customer = service.create_account("123", "Alice").await.unwrap();

    let balance = service.balance(&customer);
    assert_eq!(balance.amount, Amount::ZERO);
    assert_eq!(balance.customer_id, customer.id);
}

#[tokio::test]
async fn test_statement_by_date() -> anyhow::Result<()> {
    let repo = Arc::new(InMemoryCustomerRepository::new());
    let service = AccountService::with_repository(repo.clone(), &AccountServiceConfig::new(true));
    service.create_account("123", "Alice").await?;

    let morning = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
    let night = Utc.with_ymd_and_hms(2024, 5, 1, 23, 30, 0).unwrap();
    let next_day = Utc.with_ymd_and_hms(2024, 5, 2, 9, 0, 0).unwrap();

    repo.append_operation("123", Operation::new(OperationType::Credit, "salary", dec!(100), morning)).await?;
    repo.append_operation("123", Operation::new(OperationType::Debit, "dinner", dec!(20), night)).await?;
    repo.append_operation("123", Operation::new(OperationType::Debit, "bus", dec!(5), next_day)).await?;

    let customer = service.resolve_customer("123").await?;

    let first_day = service.statement_by_date(&customer, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
    assert_eq!(first_day.len(), 2);
    assert_eq!(first_day[0].description, "salary");
    assert_eq!(first_day[1].description, "dinner");

    let second_day = service.statement_by_date(&customer, NaiveDate::from_ymd_opt(2024, 5, 2).unwrap());
    assert_eq!(second_day.len(), 1);

    let statement = service.statement(&customer);
    assert_eq!(statement.balance, dec!(75));
    assert_eq!(statement.statement.len(), 3);

    Ok(())
}
