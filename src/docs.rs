// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;
use crate::services;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Clientes ---
        handlers::customers::create_customer,
        handlers::customers::list_customers,
        handlers::customers::get_customer,
        handlers::customers::update_customer,
        handlers::customers::delete_customer,
        handlers::customers::toggle_hot_lead,
        handlers::customers::toggle_pinned,
        handlers::customers::needs_attention,

        // --- Notas ---
        handlers::notes::add_note,
        handlers::notes::list_notes,
        handlers::notes::update_note,
        handlers::notes::delete_note,
        handlers::notes::toggle_key_note,

        // --- E-mails ---
        handlers::email_logs::log_email,
        handlers::email_logs::list_email_logs,
        handlers::email_logs::delete_email_log,

        // --- Auditoria ---
        handlers::activity_logs::list_activity_logs,
        handlers::activity_logs::list_customer_activity,

        // --- Follow-ups ---
        handlers::followups::upcoming_follow_ups,
        handlers::followups::follow_up_calendar,

        // --- Dashboard ---
        handlers::dashboard::dashboard_stats,

        // --- Transferência ---
        handlers::transfer::export_customers,
        handlers::transfer::import_customers,
    ),
    components(
        schemas(
            // --- Clientes ---
            models::customer::Customer,
            models::customer::CustomerDraft,
            models::customer::CustomerType,
            models::customer::CustomerStatus,
            models::customer::CustomerPriority,
            models::customer::ValueTier,
            models::customer::DirectImport,

            // --- Notas ---
            models::note::Note,
            models::note::NoteDraft,

            // --- Logs ---
            models::logs::EmailLog,
            models::logs::EmailLogDraft,
            models::logs::ActivityLog,

            // --- Serviços ---
            services::followup::FollowUpGroup,
            services::followup::FollowUpUrgency,
            services::dashboard_service::DashboardStats,
            services::import::ImportReport,
        )
    ),
    tags(
        (name = "Clientes", description = "CRUD da carteira de clientes"),
        (name = "Notas", description = "Anotações por cliente"),
        (name = "E-mails", description = "Histórico de e-mails"),
        (name = "Auditoria", description = "Trilha de atividades"),
        (name = "Follow-ups", description = "Agenda de acompanhamento"),
        (name = "Dashboard", description = "Visão agregada"),
        (name = "Transferência", description = "Importação e exportação CSV"),
    )
)]
pub struct ApiDoc;
