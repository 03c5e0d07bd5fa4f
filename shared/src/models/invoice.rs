use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::protocol::{ApiRequest, HttpMethod, NoFilter, Resource};
use crate::serde_helper;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Draft,
    Sent,
    PartiallyPaid,
    Paid,
    Overdue,
    Cancelled,
}

impl InvoiceStatus {
    pub const ALL: [InvoiceStatus; 6] = [
        InvoiceStatus::Draft,
        InvoiceStatus::Sent,
        InvoiceStatus::PartiallyPaid,
        InvoiceStatus::Paid,
        InvoiceStatus::Overdue,
        InvoiceStatus::Cancelled,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "Draft",
            InvoiceStatus::Sent => "Sent",
            InvoiceStatus::PartiallyPaid => "Partially Paid",
            InvoiceStatus::Paid => "Paid",
            InvoiceStatus::Overdue => "Overdue",
            InvoiceStatus::Cancelled => "Cancelled",
        }
    }

    /// daisyUI badge 样式
    pub fn badge_class(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "badge badge-ghost",
            InvoiceStatus::Sent => "badge badge-info",
            InvoiceStatus::PartiallyPaid => "badge badge-warning",
            InvoiceStatus::Paid => "badge badge-success",
            InvoiceStatus::Overdue => "badge badge-error",
            InvoiceStatus::Cancelled => "badge badge-neutral",
        }
    }
}

/// 发票
///
/// 列表接口带客户名与收款笔数；发送、作废接口只返回发票本身，这些字段缺省。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: String,
    pub invoice_number: String,
    #[serde(default)]
    pub customer_name: Option<String>,
    pub invoice_date: NaiveDate,
    pub due_date: NaiveDate,
    pub status: InvoiceStatus,
    #[serde(deserialize_with = "serde_helper::number")]
    pub total_amount: f64,
    #[serde(deserialize_with = "serde_helper::number")]
    pub total_paid: f64,
    #[serde(deserialize_with = "serde_helper::number")]
    pub balance_due: f64,
    #[serde(default)]
    pub payments_count: u32,
}

impl Invoice {
    /// 只有草稿可以发送
    pub fn can_send(&self) -> bool {
        self.status == InvoiceStatus::Draft
    }

    /// 已有收款的发票不能作废
    pub fn can_cancel(&self) -> bool {
        self.status != InvoiceStatus::Cancelled && self.payments_count == 0
    }

    pub fn can_record_payment(&self) -> bool {
        !matches!(self.status, InvoiceStatus::Cancelled | InvoiceStatus::Draft)
            && self.balance_due > 0.0
    }
}

impl Resource for Invoice {
    type Filter = NoFilter;
    const COLLECTION: &'static str = "/invoices";
    const LABEL: &'static str = "invoice";

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InvoiceStats {
    pub total_invoices: u32,
    pub draft_count: u32,
    pub sent_count: u32,
    pub paid_count: u32,
    pub overdue_count: u32,
    #[serde(deserialize_with = "serde_helper::number")]
    pub total_outstanding: f64,
    #[serde(deserialize_with = "serde_helper::number")]
    pub total_paid_this_month: f64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InvoiceStatsRequest;

impl ApiRequest for InvoiceStatsRequest {
    type Response = InvoiceStats;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("{}/stats", Invoice::COLLECTION)
    }
}

/// `POST /invoices/{id}/send`：草稿标记为已发送
#[derive(Debug, Clone)]
pub struct SendInvoice {
    pub id: String,
}

impl ApiRequest for SendInvoice {
    type Response = Invoice;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        format!("{}/{}/send", Invoice::COLLECTION, self.id)
    }
}

/// `POST /invoices/{id}/cancel`
#[derive(Debug, Clone)]
pub struct CancelInvoice {
    pub id: String,
}

impl ApiRequest for CancelInvoice {
    type Response = Invoice;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        format!("{}/{}/cancel", Invoice::COLLECTION, self.id)
    }
}

// =========================================================
// 收款
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    BankTransfer,
    Check,
    CreditCard,
    MobileMoney,
    Other,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 6] = [
        PaymentMethod::Cash,
        PaymentMethod::BankTransfer,
        PaymentMethod::Check,
        PaymentMethod::CreditCard,
        PaymentMethod::MobileMoney,
        PaymentMethod::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::BankTransfer => "bank_transfer",
            PaymentMethod::Check => "check",
            PaymentMethod::CreditCard => "credit_card",
            PaymentMethod::MobileMoney => "mobile_money",
            PaymentMethod::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::BankTransfer => "Bank transfer",
            PaymentMethod::Check => "Check",
            PaymentMethod::CreditCard => "Credit card",
            PaymentMethod::MobileMoney => "Mobile money",
            PaymentMethod::Other => "Other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == s)
    }
}

/// 一笔发票收款；服务器会同时记一笔收入交易
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoicePayment {
    pub id: String,
    pub invoice_id: String,
    pub payment_date: NaiveDate,
    #[serde(deserialize_with = "serde_helper::number")]
    pub amount: f64,
    pub payment_method: PaymentMethod,
    pub account_id: String,
    #[serde(default)]
    pub account_name: Option<String>,
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub reference_number: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// `GET /invoices/{id}/payments`，按收款日期倒序
#[derive(Debug, Clone)]
pub struct InvoicePayments {
    pub invoice_id: String,
}

impl ApiRequest for InvoicePayments {
    type Response = Vec<InvoicePayment>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("{}/{}/payments", Invoice::COLLECTION, self.invoice_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentDraft {
    pub payment_date: Option<NaiveDate>,
    pub amount: f64,
    pub payment_method: PaymentMethod,
    pub account_id: String,
    pub reference_number: Option<String>,
    pub notes: Option<String>,
}

/// `POST /invoices/{id}/payments`
///
/// `balance_due` 只用于提交前校验，不进请求体。
#[derive(Debug, Clone, PartialEq)]
pub struct RecordPayment {
    pub invoice_id: String,
    pub balance_due: f64,
    pub payment: PaymentDraft,
}

impl RecordPayment {
    /// 默认收取全部余额
    pub fn for_invoice(invoice: &Invoice, payment_date: Option<NaiveDate>) -> Self {
        Self {
            invoice_id: invoice.id.clone(),
            balance_due: invoice.balance_due,
            payment: PaymentDraft {
                payment_date,
                amount: invoice.balance_due,
                payment_method: PaymentMethod::BankTransfer,
                account_id: String::new(),
                reference_number: None,
                notes: None,
            },
        }
    }
}

impl ApiRequest for RecordPayment {
    type Response = InvoicePayment;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        format!("{}/{}/payments", Invoice::COLLECTION, self.invoice_id)
    }

    fn body(&self) -> Result<Option<String>, serde_json::Error> {
        serde_json::to_string(&self.payment).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ApiClient;
    use crate::crud;
    use crate::error::SaveError;
    use crate::models::Credentials;
    use crate::testing::{MockBackend, TEST_EMAIL, TEST_PASSWORD, test_client};
    use serde_json::json;

    fn invoice_json(id: &str, status: &str) -> serde_json::Value {
        json!({
            "id": id,
            "invoice_number": format!("INV-{id}"),
            "customer_name": "Globex",
            "invoice_date": "2024-03-01",
            "due_date": "2024-03-31",
            "status": status,
            "total_amount": 250.0,
            "total_paid": 0.0,
            "balance_due": 250.0,
            "payments_count": 0
        })
    }

    async fn signed_in(backend: MockBackend) -> ApiClient<MockBackend> {
        let client = test_client(backend);
        client
            .login(&Credentials {
                email: TEST_EMAIL.to_string(),
                password: TEST_PASSWORD.to_string(),
            })
            .await
            .unwrap();
        client
    }

    fn payment(invoice: &Invoice, amount: f64) -> RecordPayment {
        let mut request = RecordPayment::for_invoice(invoice, NaiveDate::from_ymd_opt(2024, 3, 10));
        request.payment.amount = amount;
        request.payment.account_id = "a-1".to_string();
        request
    }

    #[test]
    fn test_lifecycle_guards() {
        let mut invoice: Invoice = serde_json::from_value(invoice_json("1", "draft")).unwrap();
        assert!(invoice.can_send());
        assert!(invoice.can_cancel());
        assert!(!invoice.can_record_payment());

        invoice.status = InvoiceStatus::Sent;
        assert!(!invoice.can_send());
        assert!(invoice.can_record_payment());

        invoice.payments_count = 1;
        assert!(!invoice.can_cancel());

        invoice.status = InvoiceStatus::Paid;
        invoice.balance_due = 0.0;
        assert!(!invoice.can_record_payment());
    }

    #[test]
    fn test_payment_body_omits_invoice_fields() {
        let invoice: Invoice = serde_json::from_value(invoice_json("7", "sent")).unwrap();
        let request = payment(&invoice, 100.0);
        assert_eq!(request.path(), "/invoices/7/payments");
        let body: serde_json::Value =
            serde_json::from_str(&request.body().unwrap().unwrap()).unwrap();
        assert_eq!(body["payment_method"], "bank_transfer");
        assert_eq!(body["payment_date"], "2024-03-10");
        assert!(body.get("balance_due").is_none());
        assert!(body.get("invoice_id").is_none());
    }

    #[tokio::test]
    async fn test_send_then_collect_in_two_payments() {
        let backend = MockBackend::new();
        backend.seed("/invoices", invoice_json("inv-1", "draft"));
        let client = signed_in(backend).await;

        let sent = client.send(&SendInvoice { id: "inv-1".to_string() }).await.unwrap();
        assert_eq!(sent.status, InvoiceStatus::Sent);

        crud::submit(&client, &payment(&sent, 100.0)).await.unwrap();
        let invoices = client.list::<Invoice>(NoFilter).await.unwrap();
        assert_eq!(invoices[0].status, InvoiceStatus::PartiallyPaid);
        assert_eq!(invoices[0].balance_due, 150.0);

        // 超出余额在本地就被拦下
        let err = crud::submit(&client, &payment(&invoices[0], 150.01)).await.unwrap_err();
        assert!(matches!(err, SaveError::Invalid(_)));

        crud::submit(&client, &payment(&invoices[0], 150.0)).await.unwrap();
        let payments = client
            .send(&InvoicePayments { invoice_id: "inv-1".to_string() })
            .await
            .unwrap();
        assert_eq!(payments.len(), 2);
        let invoices = client.list::<Invoice>(NoFilter).await.unwrap();
        assert_eq!(invoices[0].status, InvoiceStatus::Paid);
        assert!(!invoices[0].can_record_payment());
    }

    #[tokio::test]
    async fn test_server_refuses_to_resend_or_cancel_paid_invoice() {
        let backend = MockBackend::new();
        backend.seed("/invoices", invoice_json("inv-2", "sent"));
        let client = signed_in(backend).await;

        let err = client
            .send(&SendInvoice { id: "inv-2".to_string() })
            .await
            .unwrap_err();
        assert_eq!(err.user_message("Failed to send invoice"), "Cannot send invoice with status: sent");

        let invoice = client.list::<Invoice>(NoFilter).await.unwrap().remove(0);
        crud::submit(&client, &payment(&invoice, 50.0)).await.unwrap();
        let err = client
            .send(&CancelInvoice { id: "inv-2".to_string() })
            .await
            .unwrap_err();
        assert_eq!(
            err.user_message("Failed to cancel invoice"),
            "Cannot cancel invoice with existing payments"
        );
    }

    #[tokio::test]
    async fn test_cancel_unpaid_invoice() {
        let backend = MockBackend::new();
        backend.seed("/invoices", invoice_json("inv-3", "sent"));
        let client = signed_in(backend).await;

        let cancelled = client
            .send(&CancelInvoice { id: "inv-3".to_string() })
            .await
            .unwrap();
        assert_eq!(cancelled.status, InvoiceStatus::Cancelled);
        assert!(!cancelled.can_cancel());
        assert!(!cancelled.can_record_payment());
    }
}
