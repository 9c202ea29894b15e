//! HTTP boundary for the concept map
//!
//! A single read-only endpoint, `GET /api/concept-map`. Failures collapse to
//! two fixed JSON bodies so clients never see internal error detail.

use crate::config::is_valid_origin;
use crate::source::{ConceptMapService, FailureKind};
use std::convert::Infallible;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::reply::{WithHeader, WithStatus};
use warp::{Filter, Rejection, Reply};

/// Body returned with 404
pub const NOT_FOUND_BODY: &str = r#"{"error":"concept map not found"}"#;

/// Body returned with 500
pub const READ_FAILURE_BODY: &str = r#"{"error":"failed to read concept map"}"#;

const JSON_CONTENT_TYPE: &str = "application/json";

type JsonReply = WithStatus<WithHeader<String>>;

fn json_reply(body: impl Into<String>, status: StatusCode) -> JsonReply {
    warp::reply::with_status(
        warp::reply::with_header(body.into(), "content-type", JSON_CONTENT_TYPE),
        status,
    )
}

async fn get_concept_map(service: Arc<ConceptMapService>) -> Result<JsonReply, Infallible> {
    let reply = match service.current_json().await {
        Ok(json) if ConceptMapService::is_valid_json(&json) => json_reply(json, StatusCode::OK),
        Ok(_) => {
            tracing::error!("encoded concept map failed validation");
            json_reply(READ_FAILURE_BODY, StatusCode::INTERNAL_SERVER_ERROR)
        }
        Err(e) => match e.kind() {
            FailureKind::NotFound => {
                tracing::warn!(error = %e, "concept map not found");
                json_reply(NOT_FOUND_BODY, StatusCode::NOT_FOUND)
            }
            FailureKind::ReadFailure => {
                tracing::error!(error = %e, "failed to read concept map");
                json_reply(READ_FAILURE_BODY, StatusCode::INTERNAL_SERVER_ERROR)
            }
        },
    };
    Ok(reply)
}

/// `GET`/`HEAD /api/concept-map` without CORS
pub fn concept_map(
    service: Arc<ConceptMapService>,
) -> impl Filter<Extract = (JsonReply,), Error = Rejection> + Clone {
    warp::path!("api" / "concept-map")
        .and(warp::get().or(warp::head()).unify())
        .and(warp::any().map(move || Arc::clone(&service)))
        .and_then(get_concept_map)
}

/// Full API with CORS for `allowed_origins`
///
/// Origins not of the form `scheme://host[:port]` are skipped with a warning;
/// [`ServiceConfig::load`](crate::ServiceConfig::load) rejects them earlier.
pub fn api(
    service: Arc<ConceptMapService>,
    allowed_origins: &[String],
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let origins = allowed_origins.iter().filter(|origin| {
        let valid = is_valid_origin(origin);
        if !valid {
            tracing::warn!(%origin, "ignoring malformed CORS origin");
        }
        valid
    });
    let cors = warp::cors()
        .allow_origins(origins.map(String::as_str))
        .allow_methods(["GET", "HEAD", "OPTIONS"])
        .allow_header("content-type");

    concept_map(service)
        .with(cors)
        .with(warp::trace::request())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_is_404() {
        let service = Arc::new(ConceptMapService::from_file("/no/such/concept-map.json"));
        let resp = warp::test::request()
            .method("GET")
            .path("/api/concept-map")
            .reply(&concept_map(service))
            .await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(resp.body(), NOT_FOUND_BODY);
        assert_eq!(resp.headers()["content-type"], JSON_CONTENT_TYPE);
    }

    #[tokio::test]
    async fn other_methods_are_not_routed() {
        let service = Arc::new(ConceptMapService::from_file("unused.json"));
        let resp = warp::test::request()
            .method("POST")
            .path("/api/concept-map")
            .reply(&concept_map(service))
            .await;
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
