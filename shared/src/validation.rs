//! 提交前的客户端校验
//!
//! 校验失败会在发出任何网络请求之前阻止保存，错误显示在表单内。

use crate::error::ValidationError;
use crate::models::{
    AccountDraft, CategoryDraft, Credentials, PartnerDraft, PartnerProfile, ProductDraft,
    RecordPayment, StockAdjustment, StockTransfer, TaxRateDraft, TenantSettingsUpdate,
    TransactionDraft, WarehouseDraft,
};

pub type ValidationResult = Result<(), ValidationError>;

pub trait Validate {
    fn validate(&self) -> ValidationResult;
}

fn required(field: &'static str, label: &str, value: &str) -> ValidationResult {
    if value.trim().is_empty() {
        Err(ValidationError::new(field, format!("{label} is required")))
    } else {
        Ok(())
    }
}

fn max_len(field: &'static str, label: &str, value: Option<&str>, max: usize) -> ValidationResult {
    match value {
        Some(v) if v.chars().count() > max => Err(ValidationError::new(
            field,
            format!("{label} must be at most {max} characters"),
        )),
        _ => Ok(()),
    }
}

fn non_negative(field: &'static str, label: &str, value: f64) -> ValidationResult {
    if !value.is_finite() || value < 0.0 {
        Err(ValidationError::new(
            field,
            format!("{label} cannot be negative"),
        ))
    } else {
        Ok(())
    }
}

/// `#RRGGBB`
pub fn is_hex_color(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 7 && bytes[0] == b'#' && bytes[1..].iter().all(u8::is_ascii_hexdigit)
}

impl Validate for Credentials {
    fn validate(&self) -> ValidationResult {
        required("email", "Email", &self.email)?;
        if !self.email.contains('@') {
            return Err(ValidationError::new("email", "Enter a valid email address"));
        }
        required("password", "Password", &self.password)
    }
}

impl Validate for AccountDraft {
    fn validate(&self) -> ValidationResult {
        required("name", "Account name", &self.name)?;
        max_len("name", "Account name", Some(&self.name), 255)?;
        max_len(
            "account_number",
            "Account number",
            self.account_number.as_deref(),
            100,
        )?;
        non_negative("opening_balance", "Opening balance", self.opening_balance)
    }
}

impl Validate for CategoryDraft {
    fn validate(&self) -> ValidationResult {
        required("name", "Category name", &self.name)?;
        max_len("name", "Category name", Some(&self.name), 255)?;
        if let Some(color) = &self.color {
            if !is_hex_color(color) {
                return Err(ValidationError::new(
                    "color",
                    "Color must be a hex value like #1a2b3c",
                ));
            }
        }
        max_len("icon", "Icon", self.icon.as_deref(), 50)
    }
}

impl Validate for PartnerDraft {
    fn validate(&self) -> ValidationResult {
        required("name", "Name", &self.name)?;
        max_len("name", "Name", Some(&self.name), 255)?;
        let payload = self.to_payload();
        if let Some(email) = payload.email.as_deref() {
            if !email.contains('@') {
                return Err(ValidationError::new("email", "Enter a valid email address"));
            }
        }
        if let PartnerProfile::Employee(e) = &self.profile {
            if let (Some(start), Some(end)) = (e.joining_date, e.end_date) {
                if end < start {
                    return Err(ValidationError::new(
                        "end_date",
                        "End date must be after the joining date",
                    ));
                }
            }
        }
        Ok(())
    }
}

impl Validate for ProductDraft {
    fn validate(&self) -> ValidationResult {
        required("name", "Product name", &self.name)?;
        max_len("name", "Product name", Some(&self.name), 255)?;
        max_len("sku", "SKU", self.sku.as_deref(), 100)?;
        non_negative("unit_price", "Unit price", self.unit_price)?;
        if let Some(cost) = self.cost_price {
            non_negative("cost_price", "Cost price", cost)?;
        }
        if self.track_inventory {
            if let Some(qty) = self.stock_quantity {
                non_negative("stock_quantity", "Stock quantity", qty)?;
            }
            if let Some(threshold) = self.low_stock_threshold {
                non_negative("low_stock_threshold", "Low stock threshold", threshold)?;
            }
        }
        Ok(())
    }
}

impl Validate for WarehouseDraft {
    fn validate(&self) -> ValidationResult {
        required("name", "Warehouse name", &self.name)?;
        max_len("name", "Warehouse name", Some(&self.name), 100)?;
        max_len("code", "Code", self.code.as_deref(), 20)?;
        max_len("postal_code", "Postal code", self.postal_code.as_deref(), 20)
    }
}

impl Validate for TaxRateDraft {
    fn validate(&self) -> ValidationResult {
        required("name", "Tax name", &self.name)?;
        if !self.rate.is_finite() || self.rate <= 0.0 {
            return Err(ValidationError::new("rate", "Rate must be greater than 0"));
        }
        if self.rate > 100.0 {
            return Err(ValidationError::new("rate", "Rate cannot exceed 100%"));
        }
        Ok(())
    }
}

impl Validate for StockAdjustment {
    fn validate(&self) -> ValidationResult {
        required("product_id", "Product", &self.product_id)?;
        required("warehouse_id", "Warehouse", &self.warehouse_id)?;
        if !self.quantity.is_finite() || self.quantity == 0.0 {
            return Err(ValidationError::new(
                "quantity",
                "Quantity must be a non-zero number",
            ));
        }
        required("reason", "Reason", &self.reason)
    }
}

impl Validate for StockTransfer {
    fn validate(&self) -> ValidationResult {
        required("product_id", "Product", &self.product_id)?;
        required("from_warehouse_id", "Source warehouse", &self.from_warehouse_id)?;
        required("to_warehouse_id", "Destination warehouse", &self.to_warehouse_id)?;
        if self.from_warehouse_id == self.to_warehouse_id {
            return Err(ValidationError::new(
                "to_warehouse_id",
                "Source and destination warehouses must differ",
            ));
        }
        if !self.quantity.is_finite() || self.quantity <= 0.0 {
            return Err(ValidationError::new(
                "quantity",
                "Quantity must be greater than 0",
            ));
        }
        Ok(())
    }
}

impl Validate for TransactionDraft {
    fn validate(&self) -> ValidationResult {
        required("account_id", "Account", &self.account_id)?;
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(ValidationError::new("amount", "Amount must be greater than 0"));
        }
        if self.transaction_date.is_none() {
            return Err(ValidationError::new("transaction_date", "Date is required"));
        }
        max_len(
            "reference_number",
            "Reference number",
            self.reference_number.as_deref(),
            100,
        )
    }
}

impl Validate for RecordPayment {
    fn validate(&self) -> ValidationResult {
        let payment = &self.payment;
        required("account_id", "Deposit account", &payment.account_id)?;
        if payment.payment_date.is_none() {
            return Err(ValidationError::new("payment_date", "Payment date is required"));
        }
        if !payment.amount.is_finite() || payment.amount <= 0.0 {
            return Err(ValidationError::new(
                "amount",
                "Payment amount must be greater than zero",
            ));
        }
        // 与服务器一致，按分比较避免浮点误差
        if (payment.amount * 100.0).round() > (self.balance_due * 100.0).round() {
            return Err(ValidationError::new(
                "amount",
                format!("Payment amount cannot exceed balance due ({:.2})", self.balance_due),
            ));
        }
        max_len(
            "reference_number",
            "Reference number",
            payment.reference_number.as_deref(),
            100,
        )
    }
}

impl Validate for TenantSettingsUpdate {
    fn validate(&self) -> ValidationResult {
        if let Some(name) = &self.company_name {
            if name.trim().chars().count() < 2 {
                return Err(ValidationError::new(
                    "company_name",
                    "Company name must be at least 2 characters",
                ));
            }
        }
        if let Some(rate) = self.default_tax_rate {
            if !(0.0..=100.0).contains(&rate) {
                return Err(ValidationError::new(
                    "default_tax_rate",
                    "Default tax rate must be between 0 and 100",
                ));
            }
        }
        if let Some(label) = &self.tax_label {
            if !matches!(label.as_str(), "Tax" | "VAT" | "GST") {
                return Err(ValidationError::new(
                    "tax_label",
                    "Tax label must be Tax, VAT or GST",
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContactDetails, EmployeeDetails};
    use chrono::NaiveDate;

    #[test]
    fn test_blank_name_blocks_save() {
        let draft = CategoryDraft {
            name: "   ".to_string(),
            ..CategoryDraft::default()
        };
        assert_eq!(draft.validate().unwrap_err().field, "name");
    }

    #[test]
    fn test_tax_rate_must_be_positive() {
        let mut draft = TaxRateDraft {
            name: "VAT".to_string(),
            rate: 0.0,
            ..TaxRateDraft::default()
        };
        assert_eq!(draft.validate().unwrap_err().field, "rate");
        draft.rate = -5.0;
        assert!(draft.validate().is_err());
        draft.rate = 100.5;
        assert!(draft.validate().is_err());
        draft.rate = 15.0;
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_category_color_format() {
        let mut draft = CategoryDraft {
            name: "Rent".to_string(),
            color: Some("blue".to_string()),
            ..CategoryDraft::default()
        };
        assert_eq!(draft.validate().unwrap_err().field, "color");
        draft.color = Some("#A0b1C2".to_string());
        assert!(draft.validate().is_ok());
        draft.color = None;
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_partner_rules() {
        let mut draft = PartnerDraft {
            name: "Lee".to_string(),
            profile: PartnerProfile::Other(ContactDetails {
                email: Some("not-an-email".to_string()),
                ..ContactDetails::default()
            }),
            ..PartnerDraft::default()
        };
        assert_eq!(draft.validate().unwrap_err().field, "email");

        draft.profile = PartnerProfile::Employee(Box::new(EmployeeDetails {
            joining_date: NaiveDate::from_ymd_opt(2024, 3, 1),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            ..EmployeeDetails::default()
        }));
        assert_eq!(draft.validate().unwrap_err().field, "end_date");
    }

    #[test]
    fn test_stock_forms() {
        let adjustment = StockAdjustment {
            product_id: "p".to_string(),
            warehouse_id: "w".to_string(),
            quantity: -3.0,
            reason: String::new(),
            notes: None,
            movement_date: None,
        };
        assert_eq!(adjustment.validate().unwrap_err().field, "reason");

        let transfer = StockTransfer {
            product_id: "p".to_string(),
            from_warehouse_id: "w".to_string(),
            to_warehouse_id: "w".to_string(),
            quantity: 1.0,
            notes: None,
            movement_date: None,
        };
        assert_eq!(transfer.validate().unwrap_err().field, "to_warehouse_id");
    }

    #[test]
    fn test_transaction_rules() {
        let mut draft = TransactionDraft::new(
            crate::models::TransactionType::Expense,
            NaiveDate::from_ymd_opt(2024, 5, 1),
        );
        assert_eq!(draft.validate().unwrap_err().field, "account_id");
        draft.account_id = "a-1".to_string();
        assert_eq!(draft.validate().unwrap_err().field, "amount");
        draft.amount = 12.5;
        assert!(draft.validate().is_ok());
        draft.transaction_date = None;
        assert_eq!(draft.validate().unwrap_err().field, "transaction_date");
    }

    #[test]
    fn test_payment_cannot_exceed_balance() {
        let mut payment = RecordPayment {
            invoice_id: "inv-1".to_string(),
            balance_due: 99.99,
            payment: crate::models::PaymentDraft {
                payment_date: NaiveDate::from_ymd_opt(2024, 5, 1),
                amount: 100.0,
                payment_method: crate::models::PaymentMethod::Cash,
                account_id: "a-1".to_string(),
                reference_number: None,
                notes: None,
            },
        };
        let err = payment.validate().unwrap_err();
        assert_eq!(err.field, "amount");
        assert!(err.message.contains("99.99"));
        payment.payment.amount = 99.99;
        assert!(payment.validate().is_ok());
        payment.payment.amount = 0.0;
        assert_eq!(payment.validate().unwrap_err().field, "amount");
    }

    #[test]
    fn test_tenant_settings_rules() {
        let update = TenantSettingsUpdate {
            tax_label: Some("Sales tax".to_string()),
            ..TenantSettingsUpdate::default()
        };
        assert_eq!(update.validate().unwrap_err().field, "tax_label");
        let update = TenantSettingsUpdate {
            default_tax_rate: Some(101.0),
            ..TenantSettingsUpdate::default()
        };
        assert!(update.validate().is_err());
    }
}
