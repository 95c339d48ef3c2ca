//src/main.rs

use axum::{
    Router,
    routing::{get, patch, post, put},
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use snk_crm::{config::AppState, docs::ApiDoc, handlers};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // As rotas fixas vêm antes de /{id} no matcher do Axum.
    let customer_routes = Router::new()
        .route(
            "/",
            post(handlers::customers::create_customer).get(handlers::customers::list_customers),
        )
        .route("/needs-attention", get(handlers::customers::needs_attention))
        .route("/export", get(handlers::transfer::export_customers))
        .route("/import", post(handlers::transfer::import_customers))
        .route(
            "/{id}",
            get(handlers::customers::get_customer)
                .put(handlers::customers::update_customer)
                .delete(handlers::customers::delete_customer),
        )
        .route("/{id}/toggle-hot-lead", post(handlers::customers::toggle_hot_lead))
        .route("/{id}/toggle-pinned", post(handlers::customers::toggle_pinned))
        .route(
            "/{id}/notes",
            post(handlers::notes::add_note).get(handlers::notes::list_notes),
        )
        .route(
            "/{id}/email-logs",
            post(handlers::email_logs::log_email).get(handlers::email_logs::list_email_logs),
        )
        .route(
            "/{id}/activity-logs",
            get(handlers::activity_logs::list_customer_activity),
        );

    let note_routes = Router::new()
        .route(
            "/{id}",
            put(handlers::notes::update_note).delete(handlers::notes::delete_note),
        )
        .route("/{id}/toggle-key", patch(handlers::notes::toggle_key_note));

    let follow_up_routes = Router::new()
        .route("/", get(handlers::followups::upcoming_follow_ups))
        .route("/calendar", get(handlers::followups::follow_up_calendar));

    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/customers", customer_routes)
        .nest("/api/notes", note_routes)
        .route(
            "/api/email-logs/{id}",
            axum::routing::delete(handlers::email_logs::delete_email_log),
        )
        .route(
            "/api/activity-logs",
            get(handlers::activity_logs::list_activity_logs),
        )
        .nest("/api/follow-ups", follow_up_routes)
        .route("/api/dashboard/stats", get(handlers::dashboard::dashboard_stats))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state);

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("0.0.0.0:{port}");
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", addr);
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
