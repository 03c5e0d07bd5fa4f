//! 领域模型 (Domain Models)
//!
//! 与后端 REST 接口一一对应。客户端不持有权威数据，这些类型只是服务器状态的镜像；
//! `*Draft` 类型是表单提交的请求体。

mod account;
mod activity;
mod auth;
mod category;
mod fiscal_year;
mod invoice;
mod partner;
mod product;
mod report;
mod stock;
mod tax_rate;
mod transaction;
mod warehouse;

pub use account::{Account, AccountDraft, AccountType};
pub use activity::{ActivityEntity, ActivityFilter, ActivityLog, ActivityType};
pub use auth::{AuthResponse, Credentials, LogoutRequest, Tenant, TenantSettingsUpdate, User};
pub use category::{Category, CategoryDraft};
pub use fiscal_year::{FiscalYear, FiscalYearDetail, FiscalYearStatus, FiscalYearSummary};
pub use invoice::{
    CancelInvoice, Invoice, InvoicePayment, InvoicePayments, InvoiceStats, InvoiceStatsRequest,
    InvoiceStatus, PaymentDraft, PaymentMethod, RecordPayment, SendInvoice,
};
pub use partner::{
    ContactDetails, ContactPerson, Counterparty, EmployeeDetails, Partner, PartnerCategory,
    PartnerDraft, PartnerPayload, PartnerProfile,
};
pub use product::{Product, ProductDraft, ProductType};
pub use report::{
    AccountYearBalance, BalanceSheet, BalanceSheetLine, CashFlowLine, CashFlowStatement,
    IncomeStatement, IncomeStatementLine, ReportRequest, Statement, TrialBalance, TrialBalanceLine,
};
pub use stock::{MovementType, StockAdjustment, StockFilter, StockMovement, StockTransfer};
pub use tax_rate::{TaxRate, TaxRateDraft};
pub use transaction::{Transaction, TransactionDraft, TransactionFilter, TransactionType};
pub use warehouse::{Warehouse, WarehouseDraft};

/// 把空白字符串归一化为 `None`，表单里的可选字段都走这里
pub fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
