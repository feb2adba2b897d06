use crate::cache::ResponseCache;
use crate::models::health::HealthResponse;
use rocket::serde::json::Json;
use rocket::{State, get};
use rocket_okapi::openapi;
use std::sync::Arc;

/// Liveness probe. Does not call upstream services.
#[openapi(tag = "Health")]
#[get("/")]
pub async fn healthcheck(cache: &State<Arc<ResponseCache>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        cached_entries: cache.len().await,
    })
}

pub fn routes() -> (Vec<rocket::Route>, okapi::openapi3::OpenApi) {
    rocket_okapi::openapi_get_routes_spec![healthcheck]
}

#[cfg(test)]
mod tests {
    use crate::{Config, build_rocket};
    use rocket::http::Status;
    use rocket::local::asynchronous::Client;

    #[rocket::async_test]
    async fn health_check_works() {
        let client = Client::tracked(build_rocket(Config::default())).await.expect("valid rocket instance");
        let response = client.get("/api/v1/health").dispatch().await;
        assert_eq!(response.status(), Status::Ok);

        let body = response.into_string().await.expect("body");
        assert!(body.contains("\"status\":\"ok\""));
    }

    #[rocket::async_test]
    async fn unknown_route_returns_json_not_found() {
        let client = Client::tracked(build_rocket(Config::default())).await.expect("valid rocket instance");
        let response = client.get("/api/v1/nope").dispatch().await;
        assert_eq!(response.status(), Status::NotFound);
        assert_eq!(response.into_string().await.as_deref(), Some(r#"{"message":"Not found"}"#));
    }
}
