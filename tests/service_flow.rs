// tests/service_flow.rs
//
// Fluxos ponta a ponta sobre o armazenamento em memória, passando pelos
// mesmos serviços que os handlers usam.

use std::sync::Arc;

use chrono::{Duration, Utc};
use snk_crm::{
    common::error::AppError,
    config::AppState,
    db::MemStore,
    models::customer::{
        CustomerDraft, CustomerPriority, CustomerStatus, CustomerType, DirectImport, ValueTier,
    },
    services::{
        export::export_csv,
        filter::CustomerFilter,
    },
};

fn state() -> AppState {
    AppState::with_store(Arc::new(MemStore::new()))
}

fn minimal_draft(name: &str) -> CustomerDraft {
    serde_json::from_value(serde_json::json!({
        "name": name,
        "country": "BR",
        "city": "São Paulo",
        "contactPerson": "Ana",
        "email": "ana@exemplo.com",
    }))
    .unwrap()
}

#[tokio::test]
async fn create_applies_documented_defaults() {
    let state = state();
    let customer = state
        .customer_service
        .create(minimal_draft("Acme"))
        .await
        .unwrap();

    assert_eq!(customer.customer_type, CustomerType::Other);
    assert_eq!(customer.status, CustomerStatus::Lead);
    assert_eq!(customer.priority, CustomerPriority::Medium);
    assert_eq!(customer.value_tier, ValueTier::Standard);
    assert_eq!(customer.direct_import, DirectImport::No);
    assert!(customer.tags.is_empty());
    assert!(!customer.is_hot_lead);
    assert!(!customer.is_pinned);
    assert!(customer.next_follow_up_date.is_none());
    assert_eq!(customer.created_at, customer.updated_at);
}

#[tokio::test]
async fn create_rejects_missing_required_fields() {
    let state = state();
    let draft: CustomerDraft = serde_json::from_value(serde_json::json!({
        "name": "",
        "country": "BR",
        "city": "São Paulo",
        "contactPerson": "Ana",
        "email": "não-é-email",
    }))
    .unwrap();

    let err = state.customer_service.create(draft).await.unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));
}

#[tokio::test]
async fn toggling_twice_restores_state_and_leaves_two_audit_entries() {
    let state = state();
    let customer = state
        .customer_service
        .create(minimal_draft("Acme"))
        .await
        .unwrap();

    let on = state
        .customer_service
        .toggle_hot_lead(customer.id)
        .await
        .unwrap();
    assert!(on.is_hot_lead);

    let off = state
        .customer_service
        .toggle_hot_lead(customer.id)
        .await
        .unwrap();
    assert!(!off.is_hot_lead);

    let trail = state.recorder.list_for_customer(customer.id).await.unwrap();
    assert_eq!(trail.len(), 2);
    // Mais recente primeiro.
    assert_eq!(trail[0].action, "Hot Lead Removed");
    assert_eq!(trail[1].action, "Hot Lead Added");
    assert_eq!(trail[1].description, "Customer was marked as Hot Lead");
}

#[tokio::test]
async fn logging_an_email_records_the_subject_in_the_audit_trail() {
    let state = state();
    let customer = state
        .customer_service
        .create(minimal_draft("Acme"))
        .await
        .unwrap();

    let draft = serde_json::from_value(serde_json::json!({
        "subject": "Proposta Q3",
        "content": "Segue em anexo.",
    }))
    .unwrap();
    state
        .customer_service
        .log_email(customer.id, draft)
        .await
        .unwrap();

    let trail = state.recorder.list_for_customer(customer.id).await.unwrap();
    assert_eq!(trail[0].action, "Email Logged");
    assert_eq!(trail[0].description, "Email \"Proposta Q3\" was logged");
}

#[tokio::test]
async fn upcoming_window_is_inclusive_on_both_ends() {
    let state = state();
    let today = Utc::now().date_naive();

    for (name, offset) in [
        ("Yesterday", Some(-1)),
        ("Today", Some(0)),
        ("Edge", Some(7)),
        ("Beyond", Some(8)),
        ("Unscheduled", None),
    ] {
        let mut draft = minimal_draft(name);
        draft.next_follow_up_date = offset.map(|d| today + Duration::days(d));
        state.customer_service.create(draft).await.unwrap();
    }

    // Janela [hoje, hoje+7], fechada nas duas pontas, ordenada pela data.
    let hits = state.followup_service.upcoming(7).await.unwrap();
    let names: Vec<&str> = hits.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Today", "Edge"]);
}

#[tokio::test]
async fn needing_attention_is_hot_or_pinned_only() {
    let state = state();
    let today = Utc::now().date_naive();

    let hot = state.customer_service.create(minimal_draft("Hot")).await.unwrap();
    state.customer_service.toggle_hot_lead(hot.id).await.unwrap();

    let pinned = state.customer_service.create(minimal_draft("Pinned")).await.unwrap();
    state.customer_service.toggle_pinned(pinned.id).await.unwrap();

    // Follow-up atrasado não basta para entrar na lista.
    let mut overdue = minimal_draft("Overdue");
    overdue.next_follow_up_date = Some(today - Duration::days(3));
    state.customer_service.create(overdue).await.unwrap();

    state.customer_service.create(minimal_draft("Plain")).await.unwrap();

    let attention = state.followup_service.needing_attention().await.unwrap();
    let names: Vec<&str> = attention.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Hot", "Pinned"]);
}

#[tokio::test]
async fn negative_feed_limit_returns_empty_instead_of_failing() {
    let state = state();
    let customer = state.customer_service.create(minimal_draft("Acme")).await.unwrap();
    state.customer_service.toggle_hot_lead(customer.id).await.unwrap();

    let feed = state.recorder.list_all(Some(-5)).await.unwrap();
    assert!(feed.is_empty());

    let feed = state.recorder.list_all(None).await.unwrap();
    assert_eq!(feed.len(), 1);
}

#[tokio::test]
async fn deleting_a_customer_cascades_and_repeat_delete_is_not_found() {
    let state = state();
    let customer = state
        .customer_service
        .create(minimal_draft("Acme"))
        .await
        .unwrap();

    let note_draft = serde_json::from_value(serde_json::json!({"text": "ligar amanhã"})).unwrap();
    let note = state
        .customer_service
        .add_note(customer.id, note_draft)
        .await
        .unwrap();

    let email_draft =
        serde_json::from_value(serde_json::json!({"subject": "Oi", "content": "..."})).unwrap();
    state
        .customer_service
        .log_email(customer.id, email_draft)
        .await
        .unwrap();

    state.customer_service.delete(customer.id).await.unwrap();

    assert!(matches!(
        state.customer_service.get(customer.id).await.unwrap_err(),
        AppError::NotFound(_)
    ));
    assert!(matches!(
        state.customer_service.toggle_key_note(note.id).await.unwrap_err(),
        AppError::NotFound(_)
    ));
    assert!(matches!(
        state.customer_service.delete(customer.id).await.unwrap_err(),
        AppError::NotFound(_)
    ));
}

#[tokio::test]
async fn children_cannot_be_attached_to_unknown_customers() {
    let state = state();
    let ghost = uuid::Uuid::new_v4();

    let note_draft = serde_json::from_value(serde_json::json!({"text": "x"})).unwrap();
    assert!(matches!(
        state.customer_service.add_note(ghost, note_draft).await.unwrap_err(),
        AppError::NotFound(_)
    ));

    let email_draft =
        serde_json::from_value(serde_json::json!({"subject": "x", "content": "y"})).unwrap();
    assert!(matches!(
        state.customer_service.log_email(ghost, email_draft).await.unwrap_err(),
        AppError::NotFound(_)
    ));
}

#[tokio::test]
async fn import_counts_good_and_bad_rows_independently() {
    let state = state();
    // A segunda linha não tem e-mail válido, a terceira está completa.
    let csv = "\
Customer Name,Country,City,Contact Person,Email,Status,Tags
Alpha,BR,Rio,Bia,bia@alpha.com,won,\"vip, 2025\"
Beta,BR,Rio,Caio,sem-email,lead,
Gamma,US,LA,Dana,dana@gamma.com,negotiation,export
";

    let report = state.import_service.import_csv(csv.as_bytes()).await.unwrap();
    assert_eq!(report.imported, 2);
    assert_eq!(report.failed, 1);

    let all = state
        .customer_service
        .list(&CustomerFilter::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].name, "Alpha");
    assert_eq!(all[0].status, CustomerStatus::Won);
    assert_eq!(all[0].tags, ["vip", "2025"]);
}

#[tokio::test]
async fn export_then_import_preserves_the_portfolio() {
    let source = state();
    let mut draft = minimal_draft("Acme Surfaces");
    draft.tags = vec!["vip".to_string()];
    draft.is_hot_lead = true;
    draft.status = CustomerStatus::MeetingScheduled;
    draft.value_tier = ValueTier::Unset;
    source.customer_service.create(draft).await.unwrap();
    source
        .customer_service
        .create(minimal_draft("Beta Stone"))
        .await
        .unwrap();

    let customers = source
        .customer_service
        .list(&CustomerFilter::default())
        .await
        .unwrap();
    let csv = export_csv(&customers).unwrap();

    let target = state();
    let report = target.import_service.import_csv(csv.as_bytes()).await.unwrap();
    assert_eq!(report.imported, 2);
    assert_eq!(report.failed, 0);

    let restored = target
        .customer_service
        .list(&CustomerFilter::default())
        .await
        .unwrap();
    assert_eq!(restored[0].name, "Acme Surfaces");
    assert_eq!(restored[0].status, CustomerStatus::MeetingScheduled);
    assert_eq!(restored[0].tags, ["vip"]);
    assert!(restored[0].is_hot_lead);
    // O vazio do legado sobrevive ao ciclo exportar/importar.
    assert_eq!(restored[0].value_tier, ValueTier::Unset);
    assert_eq!(restored[1].name, "Beta Stone");
}

#[tokio::test]
async fn unreadable_csv_is_rejected_upfront() {
    let state = state();
    let err = state.import_service.import_csv(b"").await.unwrap_err();
    assert!(matches!(err, AppError::InvalidCsv(_)));
}
