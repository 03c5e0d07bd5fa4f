use super::*;
use crate::models::{
    Category, CategoryDraft, ContactDetails, ContactPerson, Counterparty, Credentials, Partner,
    PartnerDraft, PartnerProfile, StockAdjustment, StockTransfer, TaxRate, TaxRateDraft,
    Transaction, TransactionDraft, TransactionFilter, TransactionType,
};
use crate::testing::{MockBackend, TEST_EMAIL, TEST_PASSWORD, test_client};

async fn signed_in() -> ApiClient<MockBackend> {
    let client = test_client(MockBackend::new());
    client
        .login(&Credentials {
            email: TEST_EMAIL.to_string(),
            password: TEST_PASSWORD.to_string(),
        })
        .await
        .unwrap();
    client
}

async fn refresh<R: Resource>(client: &ApiClient<MockBackend>, list: &mut ListState<R>) {
    let ticket = list.begin();
    let result = client.list::<R>(R::Filter::default()).await;
    assert!(list.complete(ticket, result, "Failed to load"));
}

// =========================================================
// 列表状态
// =========================================================

#[test]
fn test_stale_response_is_dropped() {
    let mut list: ListState<u32> = ListState::new();
    let first = list.begin();
    let second = list.begin();

    assert!(list.complete(second, Ok(vec![2]), "x"));
    assert!(!list.complete(first, Ok(vec![1]), "x"));
    assert_eq!(list.items(), &[2]);
}

#[test]
fn test_spinner_only_until_first_load() {
    let mut list: ListState<u32> = ListState::new();
    let ticket = list.begin();
    assert!(list.show_spinner());
    assert!(list.complete(ticket, Ok(vec![1, 2]), "x"));
    assert!(!list.show_spinner());

    let ticket = list.begin();
    assert!(list.is_loading());
    assert!(!list.show_spinner());
    assert!(list.complete(
        ticket,
        Err(ApiError::Network("offline".to_string())),
        "Failed to load categories"
    ));
    // 失败时保留上一次的数据
    assert_eq!(list.items(), &[1, 2]);
    assert_eq!(list.error(), Some("Failed to load categories"));
}

#[test]
fn test_filter_tab() {
    let items = vec![("a", true), ("b", false), ("c", true)];
    assert_eq!(filter_tab(&items, None::<&bool>, |i| i.1).len(), 3);
    let active = filter_tab(&items, Some(&true), |i| i.1);
    assert_eq!(active, vec![("a", true), ("c", true)]);
    assert_eq!(count_where(&items, |i| !i.1), 1);
}

#[test]
fn test_confirm_state() {
    let mut confirm: ConfirmState<String> = ConfirmState::new();
    assert!(!confirm.is_open());
    confirm.request("Delete Rent?", "c-1".to_string());
    assert_eq!(confirm.message(), Some("Delete Rent?"));
    assert_eq!(confirm.confirm(), Some("c-1".to_string()));
    assert_eq!(confirm.confirm(), None);

    confirm.request("Delete Fuel?", "c-2".to_string());
    confirm.cancel();
    assert!(!confirm.is_open());
    assert_eq!(confirm.confirm(), None);
}

#[test]
fn test_editor_messages() {
    let editor = Editor::create(TaxRateDraft::default());
    assert_eq!(editor.title(TaxRate::LABEL), "New tax rate");
    assert_eq!(saved_message(TaxRate::LABEL, &editor.mode), "Tax rate created successfully");
    let editor = Editor::edit("t-1", TaxRateDraft::default());
    assert!(editor.is_edit());
    assert_eq!(editor.title(TaxRate::LABEL), "Edit tax rate");
    assert_eq!(deleted_message("partner"), "Partner deleted successfully");
}

// =========================================================
// 与后端往返
// =========================================================

#[tokio::test]
async fn test_create_then_refetch_matches_input() {
    let client = signed_in().await;
    let draft = CategoryDraft {
        name: "Office rent".to_string(),
        transaction_type: TransactionType::Expense,
        description: Some("Monthly".to_string()),
        color: Some("#112233".to_string()),
        icon: None,
        is_active: true,
    };
    save::<_, Category>(&client, &EditorMode::Create, &draft).await.unwrap();

    let mut list: ListState<Category> = ListState::new();
    refresh(&client, &mut list).await;
    assert_eq!(list.items().len(), 1);
    let record: &Category = &list.items()[0];
    assert!(!record.id.is_empty());
    assert_eq!(CategoryDraft::from(record), draft);
}

#[tokio::test]
async fn test_update_then_refetch() {
    let client = signed_in().await;
    let mut draft = TaxRateDraft {
        name: "VAT".to_string(),
        rate: 15.0,
        applies_to_income: true,
        ..TaxRateDraft::default()
    };
    let created: TaxRate = save(&client, &EditorMode::Create, &draft).await.unwrap();

    draft.rate = 7.5;
    let mode = EditorMode::Edit(created.id.clone());
    save::<_, TaxRate>(&client, &mode, &draft).await.unwrap();

    let mut list = ListState::new();
    refresh::<TaxRate>(&client, &mut list).await;
    assert_eq!(TaxRateDraft::from(&list.items()[0]), draft);
}

#[tokio::test]
async fn test_transaction_edit_keeps_fiscal_window() {
    let client = signed_in().await;
    let mut draft = TransactionDraft::new(TransactionType::Income, crate::date::parse_date("2024-05-01"));
    draft.account_id = "a-1".to_string();
    draft.amount = 80.0;
    draft.description = Some("Consulting".to_string());
    let created: Transaction = save(&client, &EditorMode::Create, &draft).await.unwrap();

    draft.amount = 95.5;
    draft.transaction_date = crate::date::parse_date("2024-05-03");
    save::<_, Transaction>(&client, &EditorMode::Edit(created.id.clone()), &draft)
        .await
        .unwrap();

    let in_may = TransactionFilter {
        start_date: crate::date::parse_date("2024-05-01"),
        end_date: crate::date::parse_date("2024-05-31"),
        ..TransactionFilter::default()
    };
    let listed = client.list::<Transaction>(in_may).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(TransactionDraft::from(&listed[0]), draft);

    let in_june = TransactionFilter {
        start_date: crate::date::parse_date("2024-06-01"),
        ..TransactionFilter::default()
    };
    assert!(client.list::<Transaction>(in_june).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_partner_variant_round_trip() {
    let client = signed_in().await;
    let draft = PartnerDraft {
        name: "Northwind Supplies".to_string(),
        profile: PartnerProfile::Vendor(Counterparty::Company {
            contact: ContactDetails {
                email: Some("sales@northwind.test".to_string()),
                phone: None,
                address: Some("12 Dock Rd".to_string()),
            },
            tax_id: Some("TIN-1".to_string()),
            registration_number: Some("REG-9".to_string()),
            contact_person: ContactPerson {
                name: Some("Ana".to_string()),
                email: None,
                mobile: Some("555".to_string()),
            },
        }),
        description: None,
        is_active: true,
    };
    save::<_, Partner>(&client, &EditorMode::Create, &draft).await.unwrap();

    let mut list = ListState::new();
    refresh::<Partner>(&client, &mut list).await;
    assert_eq!(list.items()[0].draft(), draft);
}

#[tokio::test]
async fn test_invalid_draft_sends_nothing() {
    let client = signed_in().await;
    let before = client.transport().request_count();
    let draft = TaxRateDraft {
        name: "Zero".to_string(),
        rate: 0.0,
        ..TaxRateDraft::default()
    };
    let err = save::<_, TaxRate>(&client, &EditorMode::Create, &draft)
        .await
        .unwrap_err();
    assert!(matches!(err, SaveError::Invalid(_)));
    assert_eq!(client.transport().request_count(), before);

    let mut editor = Editor::create(draft);
    editor.begin_save();
    editor.fail(&err, "Failed to save tax rate");
    assert_eq!(editor.error.as_deref(), Some("Rate must be greater than 0"));
    assert!(!editor.saving);
}

#[tokio::test]
async fn test_server_rejection_stays_in_editor() {
    let client = signed_in().await;
    client
        .transport()
        .fail_next("/categories/", 400, "Category with this name already exists");
    let mut editor = Editor::create(CategoryDraft {
        name: "Rent".to_string(),
        ..CategoryDraft::default()
    });
    editor.begin_save();
    let err = save::<_, Category>(&client, &editor.mode, &editor.draft)
        .await
        .unwrap_err();
    editor.fail(&err, "Failed to save category");
    assert_eq!(
        editor.error.as_deref(),
        Some("Category with this name already exists")
    );
}

#[tokio::test]
async fn test_confirmed_delete_removes_record() {
    let client = signed_in().await;
    let draft = CategoryDraft {
        name: "Fuel".to_string(),
        ..CategoryDraft::default()
    };
    let created: Category = save(&client, &EditorMode::Create, &draft).await.unwrap();

    let mut confirm = ConfirmState::new();
    confirm.request(format!("Delete {}?", created.name), created.id.clone());
    let id = confirm.confirm().unwrap();
    remove::<_, Category>(&client, &id).await.unwrap();

    let mut list: ListState<Category> = ListState::new();
    refresh(&client, &mut list).await;
    assert!(list.items().is_empty());
}

#[tokio::test]
async fn test_cancelled_delete_keeps_record() {
    let client = signed_in().await;
    let draft = CategoryDraft {
        name: "Fuel".to_string(),
        ..CategoryDraft::default()
    };
    let created: Category = save(&client, &EditorMode::Create, &draft).await.unwrap();

    let mut confirm = ConfirmState::new();
    confirm.request("Delete Fuel?", created.id.clone());
    confirm.cancel();
    if let Some(id) = confirm.confirm() {
        remove::<_, Category>(&client, &id).await.unwrap();
    }

    let mut list: ListState<Category> = ListState::new();
    refresh(&client, &mut list).await;
    assert_eq!(list.items().len(), 1);
    assert_eq!(list.items()[0].id, created.id);
}

#[tokio::test]
async fn test_submit_stock_adjustment() {
    let client = signed_in().await;
    client.transport().mock_response(
        "/stock-movements/adjustment",
        201,
        serde_json::json!({
            "id": "sm-1",
            "movement_type": "adjustment",
            "movement_date": "2024-05-02",
            "product_id": "p-1",
            "warehouse_id": "w-1",
            "quantity": "-3.00",
            "reason": "Damaged"
        }),
    );
    let adjustment = StockAdjustment {
        product_id: "p-1".to_string(),
        warehouse_id: "w-1".to_string(),
        quantity: -3.0,
        reason: "Damaged".to_string(),
        notes: None,
        movement_date: None,
    };
    let movement = submit(&client, &adjustment).await.unwrap();
    assert_eq!(movement.id, "sm-1");
    assert_eq!(movement.quantity, -3.0);

    let (url, method, _, body) = client.transport().requests().pop().unwrap();
    assert!(url.ends_with("/api/v1/stock-movements/adjustment"));
    assert_eq!(method, "POST");
    assert!(body.unwrap().contains("\"reason\":\"Damaged\""));
}

#[tokio::test]
async fn test_invalid_transfer_sends_nothing() {
    let client = signed_in().await;
    let before = client.transport().request_count();
    let transfer = StockTransfer {
        product_id: "p-1".to_string(),
        from_warehouse_id: "w-1".to_string(),
        to_warehouse_id: "w-1".to_string(),
        quantity: 5.0,
        notes: None,
        movement_date: None,
    };
    let err = submit(&client, &transfer).await.unwrap_err();
    assert_eq!(
        err.user_message("Failed to transfer stock"),
        "Source and destination warehouses must differ"
    );
    assert_eq!(client.transport().request_count(), before);
}
