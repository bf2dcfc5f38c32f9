use super::error::{ApiError, ApiResult};
use super::payloads::{self, DeliveryPayload, EmployeeSearch};
use crate::libs::app_info;
use crate::libs::delivery::{DeliveryReceipt, DeliveryRecord};
use crate::libs::employee::Employee;
use crate::libs::error::RegistryResult;
use crate::libs::item::ProtectiveItem;
use crate::libs::registry::RegistryService;
use crate::store::Upserted;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Extension, Path, Query};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};

/// Runs a registry call on the blocking pool; both stores do synchronous I/O.
async fn blocking<T, F>(registry: RegistryService, call: F) -> ApiResult<T>
where
    T: Send + 'static,
    F: FnOnce(&RegistryService) -> RegistryResult<T> + Send + 'static,
{
    let result = tokio::task::spawn_blocking(move || call(&registry)).await?;
    Ok(result?)
}

fn upserted_response<T: serde::Serialize>(upserted: Upserted<T>) -> Response {
    let status = if upserted.created { StatusCode::CREATED } else { StatusCode::OK };
    (status, Json(upserted.record)).into_response()
}

fn path_value<T>(path: Result<Path<T>, PathRejection>) -> ApiResult<T> {
    path.map(|Path(value)| value).map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

fn json_body(body: Result<Json<Value>, JsonRejection>) -> ApiResult<Value> {
    body.map(|Json(value)| value).map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

pub async fn index() -> Json<Value> {
    Json(json!({
        "name": app_info::display_name(),
        "status": "online",
        "endpoints": ["/api/colaboradores", "/api/epis", "/api/registros", "/api/status"],
    }))
}

pub async fn status(Extension(registry): Extension<RegistryService>) -> Json<Value> {
    Json(json!({
        "status": "online",
        "name": app_info::name(),
        "version": app_info::version(),
        "storage": registry.backend().to_string(),
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

pub async fn list_employees(
    Extension(registry): Extension<RegistryService>,
    query: Result<Query<EmployeeSearch>, QueryRejection>,
) -> ApiResult<Json<Vec<Employee>>> {
    let Query(search) = query.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let employees = blocking(registry, move |r| r.list_employees(search.nome.as_deref())).await?;
    Ok(Json(employees))
}

/// `GET /api/colaboradores/:key`: a numeric key is an id, anything else a
/// formatted CPF such as `123.456.789-00`.
pub async fn get_employee(
    Extension(registry): Extension<RegistryService>,
    key: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<Employee>> {
    let key = path_value(key)?;
    let employee = match key.parse::<i64>() {
        Ok(id) => blocking(registry, move |r| r.employee(id)).await?,
        Err(_) => blocking(registry, move |r| r.employee_by_national_id(&key)).await?,
    };
    Ok(Json(employee))
}

pub async fn get_employee_by_national_id(
    Extension(registry): Extension<RegistryService>,
    national_id: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<Employee>> {
    let national_id = path_value(national_id)?;
    Ok(Json(blocking(registry, move |r| r.employee_by_national_id(&national_id)).await?))
}

pub async fn create_employee(
    Extension(registry): Extension<RegistryService>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Response> {
    let draft = payloads::employee_draft(json_body(body)?)?;
    let upserted = blocking(registry, move |r| r.create_employee(&draft)).await?;
    Ok(upserted_response(upserted))
}

pub async fn list_items(Extension(registry): Extension<RegistryService>) -> ApiResult<Json<Vec<ProtectiveItem>>> {
    Ok(Json(blocking(registry, |r| r.list_items()).await?))
}

pub async fn get_item(
    Extension(registry): Extension<RegistryService>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<ProtectiveItem>> {
    let id = path_value(id)?;
    Ok(Json(blocking(registry, move |r| r.item(id)).await?))
}

pub async fn get_item_by_certification_code(
    Extension(registry): Extension<RegistryService>,
    code: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<ProtectiveItem>> {
    let code = path_value(code)?;
    Ok(Json(blocking(registry, move |r| r.item_by_certification_code(&code)).await?))
}

pub async fn create_item(
    Extension(registry): Extension<RegistryService>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Response> {
    let draft = payloads::item_draft(json_body(body)?)?;
    let upserted = blocking(registry, move |r| r.create_item(&draft)).await?;
    Ok(upserted_response(upserted))
}

pub async fn list_deliveries(Extension(registry): Extension<RegistryService>) -> ApiResult<Json<Vec<DeliveryRecord>>> {
    Ok(Json(blocking(registry, |r| r.list_deliveries()).await?))
}

pub async fn get_delivery(
    Extension(registry): Extension<RegistryService>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<DeliveryRecord>> {
    let id = path_value(id)?;
    Ok(Json(blocking(registry, move |r| r.delivery(id)).await?))
}

pub async fn deliveries_for_employee(
    Extension(registry): Extension<RegistryService>,
    employee_id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Vec<DeliveryRecord>>> {
    let employee_id = path_value(employee_id)?;
    Ok(Json(blocking(registry, move |r| r.deliveries_for_employee(employee_id)).await?))
}

/// `POST /api/registros`: compound registration when the body carries
/// employee/item/record envelopes, plain record otherwise. Both answer 201.
pub async fn create_delivery(
    Extension(registry): Extension<RegistryService>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Response> {
    match DeliveryPayload::from_value(json_body(body)?)? {
        DeliveryPayload::Bundle(draft) => {
            let receipt: DeliveryReceipt = blocking(registry, move |r| r.register_delivery(&draft)).await?;
            Ok((StatusCode::CREATED, Json(receipt)).into_response())
        }
        DeliveryPayload::Flat(draft) => {
            let record = blocking(registry, move |r| r.record_delivery(&draft)).await?;
            Ok((StatusCode::CREATED, Json(record)).into_response())
        }
    }
}
