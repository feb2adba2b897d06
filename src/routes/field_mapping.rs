use crate::error::app_error::AppError;
use crate::error::json::JsonBody;
use crate::models::field_mapping::{FieldCatalogResponse, MappingExport, MappingExportRequest, MappingStatus, MappingStatusRequest};
use crate::service::field_mapping::{catalog, export_mapping, mapping_status};
use rocket::serde::json::Json;
use rocket::{get, post};
use rocket_okapi::openapi;

/// System field catalog and the default (all unmapped) mapping set.
#[openapi(tag = "Field Mapping")]
#[get("/catalog")]
pub async fn get_catalog() -> Json<FieldCatalogResponse> {
    Json(catalog())
}

/// Readiness of a mapping set: ready once every required field is mapped.
#[openapi(tag = "Field Mapping")]
#[post("/status", data = "<payload>")]
pub async fn get_mapping_status(payload: JsonBody<MappingStatusRequest>) -> Result<Json<MappingStatus>, AppError> {
    Ok(Json(mapping_status(&payload.field_mappings)?))
}

/// Export document for a mapping set, stamped with the current time.
#[openapi(tag = "Field Mapping")]
#[post("/export", data = "<payload>")]
pub async fn export_mappings(payload: JsonBody<MappingExportRequest>) -> Result<Json<MappingExport>, AppError> {
    Ok(Json(export_mapping(payload.into_inner(), chrono::Utc::now())?))
}

pub fn routes() -> (Vec<rocket::Route>, okapi::openapi3::OpenApi) {
    rocket_okapi::openapi_get_routes_spec![get_catalog, get_mapping_status, export_mappings]
}
