//! JSON API over [`RegistryService`].
//!
//! Every route lives under `/api` except the service index at `/`.
//! Validation failures answer 400, unknown ids and keys 404, storage
//! failures 500, always with an `{"error": "..."}` body.

pub mod error;
pub mod handlers;
pub mod payloads;

use crate::libs::registry::RegistryService;
use axum::routing::get;
use axum::{Extension, Router};
use handlers::*;
use std::future::Future;
use tokio::net::TcpListener;

pub fn router(registry: RegistryService) -> Router {
    let api = Router::new()
        .route("/colaboradores", get(list_employees).post(create_employee))
        .route("/colaboradores/:key", get(get_employee))
        .route("/colaboradores/cpf/:cpf", get(get_employee_by_national_id))
        .route("/colaboradores/buscar-por-cpf/:cpf", get(get_employee_by_national_id))
        .route("/epis", get(list_items).post(create_item))
        .route("/epis/:id", get(get_item))
        .route("/epis/ca/:ca", get(get_item_by_certification_code))
        .route("/epis/buscar-por-ca/:ca", get(get_item_by_certification_code))
        .route("/registros", get(list_deliveries).post(create_delivery))
        .route("/registros/:id", get(get_delivery))
        .route("/registros/colaborador/:id", get(deliveries_for_employee))
        .route("/status", get(status));

    Router::new()
        .route("/", get(index))
        .nest("/api", api)
        .layer(Extension(registry))
}

/// Serves the API on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, registry: RegistryService, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(registry)).with_graceful_shutdown(shutdown).await
}
