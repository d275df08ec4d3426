pub mod customer;
pub mod employee;
pub mod financial_statement;
pub mod generation_manifest;
pub mod operation;
pub mod sales_transaction;

pub use customer::Entity as CustomerRow;
pub use employee::Entity as EmployeeRow;
pub use financial_statement::Entity as FinancialStatementRow;
pub use generation_manifest::Entity as GenerationManifest;
pub use operation::Entity as OperationRow;
pub use sales_transaction::Entity as SalesTransactionRow;
