//! HTTP routes and wire contract
//!
//! - `POST /v1/request` — submit an operational request
//! - `GET /health` — liveness check
//! - `GET /` — service info
//!
//! Header and payload validation happen here; the core pipeline receives
//! only already-validated requests.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{SecondsFormat, Utc};
use opsguide_core::{Environment, OperationalRequest, OperationalResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::AppError;
use crate::state::AppState;

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/v1/request", post(submit_request))
        .route("/health", get(health))
        .route("/", get(root))
        .with_state(state)
}

/// Incoming body for `POST /v1/request`
#[derive(Debug, Deserialize)]
struct SubmitRequestBody {
    query: Option<String>,
    environment: Option<String>,
}

/// Response for `POST /v1/request`
#[derive(Debug, Serialize)]
struct SubmitResponse {
    request_id: String,
    status: &'static str,
    timestamp: String,
    input: InputEcho,
    classification: ClassificationDto,
    extracted_entities: EntitiesDto,
    next_steps: Option<NextStepsDto>,
}

#[derive(Debug, Serialize)]
struct InputEcho {
    query: String,
    environment: &'static str,
    user_id: String,
}

#[derive(Debug, Serialize)]
struct ClassificationDto {
    task_id: Option<&'static str>,
    confidence: f64,
    service: String,
    environment: &'static str,
}

#[derive(Debug, Serialize)]
struct EntitiesDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    order_id: Option<String>,
    service: String,
    target_status: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    priority: Option<&'static str>,
}

#[derive(Debug, Serialize)]
struct NextStepsDto {
    description: String,
    runbook: String,
    api_spec: String,
    typical_steps: Vec<String>,
}

impl SubmitResponse {
    fn from_result(result: OperationalResult) -> Self {
        Self {
            request_id: result.request_id.to_string(),
            status: "processed",
            timestamp: result.timestamp.to_rfc3339_opts(SecondsFormat::Micros, true),
            input: InputEcho {
                query: result.request.query,
                environment: result.request.environment.as_str(),
                user_id: result.request.user_id,
            },
            classification: ClassificationDto {
                task_id: result.classification.task_id.wire_value(),
                confidence: result.classification.confidence,
                service: result.entities.service.clone(),
                environment: result.environment.as_str(),
            },
            extracted_entities: EntitiesDto {
                order_id: result.entities.identifier,
                service: result.entities.service,
                target_status: result.entities.target_status.map(|s| s.as_str()),
                priority: result.entities.priority.map(|p| p.as_str()),
            },
            next_steps: result.knowledge.map(|k| NextStepsDto {
                description: k.description,
                runbook: k.runbook_path,
                api_spec: k.api_spec_path,
                typical_steps: k.typical_steps,
            }),
        }
    }
}

/// Handle `POST /v1/request`
async fn submit_request(
    headers: HeaderMap,
    State(state): State<AppState>,
    Json(body): Json<SubmitRequestBody>,
) -> Result<Json<SubmitResponse>, AppError> {
    let user_id = validate_headers(&headers)?;
    let request = validate_body(body, user_id)?;

    let result = state.pipeline.process(&request);
    Ok(Json(SubmitResponse::from_result(result)))
}

/// Validate the required headers, returning the caller's user id
///
/// Token verification itself belongs to the surrounding auth layer; this
/// only checks the documented shape.
fn validate_headers(headers: &HeaderMap) -> Result<String, AppError> {
    let auth = headers
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::MissingHeader("Authorization"))?;
    if !auth.starts_with("Bearer ") {
        return Err(AppError::InvalidAuthorization);
    }

    let user_id = headers
        .get("X-User-ID")
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .ok_or(AppError::MissingHeader("X-User-ID"))?;

    Ok(user_id.to_string())
}

/// Validate the request body into an [`OperationalRequest`]
fn validate_body(body: SubmitRequestBody, user_id: String) -> Result<OperationalRequest, AppError> {
    let query = body
        .query
        .ok_or_else(|| AppError::Validation("Missing or invalid 'query' field".to_string()))?;
    let query = query.trim();
    if query.is_empty() {
        return Err(AppError::Validation("Query cannot be empty".to_string()));
    }

    let environment = match body.environment.as_deref() {
        None => Environment::default(),
        Some(value) => value.parse::<Environment>().map_err(|_| {
            AppError::Validation("Environment must be one of: dev, staging, prod".to_string())
        })?,
    };

    Ok(OperationalRequest::new(query, environment, user_id))
}

/// Handle `GET /health`
async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "opsguide",
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        "version": opsguide_core::VERSION,
        "components": {
            "parsing_validation": "active",
            "pattern_classification": "active",
            "entity_extraction": "active"
        }
    }))
}

/// Handle `GET /` - service info
async fn root() -> Json<Value> {
    Json(json!({
        "service": "OpsGuide",
        "version": opsguide_core::VERSION,
        "description": "Operational request processing with pattern matching",
        "endpoints": {
            "POST /v1/request": "Submit operational request",
            "GET /health": "Health check"
        },
        "supported_tasks": [
            "CANCEL_ORDER: cancel order ORDER-123",
            "CHANGE_ORDER_STATUS: change order status to completed"
        ]
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use pretty_assertions::assert_eq;

    fn valid_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("Authorization", HeaderValue::from_static("Bearer token"));
        headers.insert("X-User-ID", HeaderValue::from_static("user-42"));
        headers
    }

    fn body(query: &str, environment: Option<&str>) -> SubmitRequestBody {
        SubmitRequestBody {
            query: Some(query.to_string()),
            environment: environment.map(str::to_string),
        }
    }

    async fn submit(query: &str) -> SubmitResponse {
        let state = AppState::new().unwrap();
        submit_request(valid_headers(), State(state), Json(body(query, None)))
            .await
            .unwrap()
            .0
    }

    #[tokio::test]
    async fn cancel_order_contract() {
        let response = submit("cancel order ORDER-2024-001").await;

        assert_eq!(response.status, "processed");
        assert_eq!(response.classification.task_id, Some("CANCEL_ORDER"));
        assert_eq!(response.classification.confidence, 0.9);
        assert_eq!(response.classification.service, "Order");
        assert_eq!(response.extracted_entities.order_id.as_deref(), Some("2024"));
        assert_eq!(response.extracted_entities.target_status, None);

        let next = response.next_steps.unwrap();
        assert_eq!(next.runbook, "knowledge/runbooks/cancel-order-runbook.md");
        assert_eq!(next.typical_steps.len(), 4);
    }

    #[tokio::test]
    async fn status_change_contract() {
        let response = submit("change order status to completed for ORDER-456").await;

        assert_eq!(
            response.classification.task_id,
            Some("CHANGE_ORDER_STATUS")
        );
        assert_eq!(response.classification.confidence, 0.9);
        assert_eq!(
            response.extracted_entities.target_status,
            Some("completed")
        );
        assert_eq!(response.extracted_entities.order_id.as_deref(), Some("456"));
    }

    #[tokio::test]
    async fn unrecognized_query_contract() {
        let response = submit("do something random").await;

        assert_eq!(response.classification.task_id, None);
        assert_eq!(response.classification.confidence, 0.5);
        assert!(response.next_steps.is_none());
    }

    #[tokio::test]
    async fn unmatched_task_serializes_as_null() {
        let response = submit("do something random").await;
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["classification"]["task_id"], Value::Null);
        assert_eq!(value["next_steps"], Value::Null);
        // target_status is always present, null when absent.
        assert_eq!(value["extracted_entities"]["target_status"], Value::Null);
        // order_id is omitted entirely when nothing was extracted.
        assert!(value["extracted_entities"].get("order_id").is_none());
    }

    #[tokio::test]
    async fn input_is_echoed_back() {
        let response = submit("cancel order 123").await;
        assert_eq!(response.input.query, "cancel order 123");
        assert_eq!(response.input.user_id, "user-42");
        assert_eq!(response.input.environment, "dev");
    }

    #[tokio::test]
    async fn environment_in_query_overrides_declared() {
        let state = AppState::new().unwrap();
        let response = submit_request(
            valid_headers(),
            State(state),
            Json(body("cancel order 123 in prod", Some("staging"))),
        )
        .await
        .unwrap()
        .0;

        assert_eq!(response.input.environment, "staging");
        assert_eq!(response.classification.environment, "prod");
    }

    #[tokio::test]
    async fn missing_authorization_is_rejected() {
        let mut headers = HeaderMap::new();
        headers.insert("X-User-ID", HeaderValue::from_static("user-42"));

        let state = AppState::new().unwrap();
        let err = submit_request(headers, State(state), Json(body("cancel order 1", None)))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::MissingHeader("Authorization")));
    }

    #[tokio::test]
    async fn non_bearer_authorization_is_rejected() {
        let mut headers = HeaderMap::new();
        headers.insert("Authorization", HeaderValue::from_static("Basic abc"));
        headers.insert("X-User-ID", HeaderValue::from_static("user-42"));

        let state = AppState::new().unwrap();
        let err = submit_request(headers, State(state), Json(body("cancel order 1", None)))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidAuthorization));
    }

    #[tokio::test]
    async fn missing_user_id_is_rejected() {
        let mut headers = HeaderMap::new();
        headers.insert("Authorization", HeaderValue::from_static("Bearer token"));

        let state = AppState::new().unwrap();
        let err = submit_request(headers, State(state), Json(body("cancel order 1", None)))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::MissingHeader("X-User-ID")));
    }

    #[tokio::test]
    async fn empty_query_is_rejected() {
        let state = AppState::new().unwrap();
        let err = submit_request(valid_headers(), State(state), Json(body("   ", None)))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn unknown_environment_is_rejected() {
        let state = AppState::new().unwrap();
        let err = submit_request(
            valid_headers(),
            State(state),
            Json(body("cancel order 1", Some("qa"))),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn health_reports_components() {
        let value = health().await.0;
        assert_eq!(value["status"], "healthy");
        assert_eq!(value["components"]["pattern_classification"], "active");
    }

    #[tokio::test]
    async fn root_lists_endpoints() {
        let value = root().await.0;
        assert!(value["endpoints"]["POST /v1/request"].is_string());
    }
}
