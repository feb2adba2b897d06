use crate::cache::ResponseCache;
use crate::config::CacheConfig;
use crate::error::app_error::AppError;
use crate::error::json::JsonBody;
use crate::gateway::http_gateway::HttpGateway;
use crate::models::client::{Client, CreateClientRequest};
use crate::service::client::ClientService;
use rocket::response::status;
use rocket::serde::json::Json;
use rocket::{State, get, post};
use rocket_okapi::openapi;
use std::sync::Arc;

/// List all clients
#[openapi(tag = "Clients")]
#[get("/")]
pub async fn list_clients(
    gateway: &State<HttpGateway>,
    cache: &State<Arc<ResponseCache>>,
    cache_config: &State<CacheConfig>,
) -> Result<Json<Vec<Client>>, AppError> {
    let service = ClientService::new(gateway.inner(), cache.inner(), cache_config.inner());
    Ok(Json(service.list().await?))
}

/// Create a new client
#[openapi(tag = "Clients")]
#[post("/", data = "<payload>")]
pub async fn create_client(
    gateway: &State<HttpGateway>,
    cache: &State<Arc<ResponseCache>>,
    cache_config: &State<CacheConfig>,
    payload: JsonBody<CreateClientRequest>,
) -> Result<status::Created<Json<Client>>, AppError> {
    let service = ClientService::new(gateway.inner(), cache.inner(), cache_config.inner());
    let client = service.create(&payload).await?;
    Ok(status::Created::new(format!("/clients/{}", client.id)).body(Json(client)))
}

pub fn routes() -> (Vec<rocket::Route>, okapi::openapi3::OpenApi) {
    rocket_okapi::openapi_get_routes_spec![list_clients, create_client]
}
