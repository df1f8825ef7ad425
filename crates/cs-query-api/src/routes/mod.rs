//! API route definitions and router builder.

pub mod discovery;
pub mod health;
pub mod search;
pub mod sections;
pub mod tools;

use axum::Router;
use axum::routing::{get, post};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        // Tool-call surface
        .route("/tools", get(tools::list_tools))
        .route("/tools/{name}", post(tools::invoke_tool))
        // Search endpoints
        .route("/search", post(search::search_classes))
        .route("/search/by-schedule", post(search::find_by_schedule))
        .route("/search/conflicts", post(search::check_conflicts))
        .route("/search/instructor", get(search::search_by_instructor))
        // Course/section endpoints
        .route(
            "/courses/{subject}/{catalog}/sections",
            get(sections::compare_sections),
        )
        .route(
            "/classes/{term}/{class_number}",
            get(sections::get_class_details),
        )
        .route(
            "/classes/{term}/{class_number}/availability",
            get(sections::check_availability),
        )
        // Discovery endpoints
        .route("/filters/suggest", get(discovery::suggest_values))
        .route("/filters/{field}", get(discovery::filter_options));

    Router::new()
        .route("/health", get(health::health))
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn app() -> Router {
        build_router(AppState::with_mock_catalog())
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn list_tools_returns_nine() {
        let response = app()
            .oneshot(Request::get("/api/v1/tools").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json.as_array().unwrap().len(), 9);
        assert!(json[0]["schema"].is_object());
    }

    #[tokio::test]
    async fn search_endpoint_round_trip() {
        let body = serde_json::json!({"termCode": "1263", "subject": "CS"});
        let response = app()
            .oneshot(
                Request::post("/api/v1/search")
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_vec(&body).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["totalHits"], 5);
    }

    #[tokio::test]
    async fn invalid_filter_is_400_with_field() {
        let body = serde_json::json!({"termCode": "2263"});
        let response = app()
            .oneshot(
                Request::post("/api/v1/search")
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_vec(&body).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["field"], "termCode");
        assert_eq!(json["retryable"], false);
    }

    #[tokio::test]
    async fn class_details_found_and_missing() {
        let response = app()
            .oneshot(
                Request::get("/api/v1/classes/1263/10421")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app()
            .oneshot(
                Request::get("/api/v1/classes/1263/99999")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unknown_tool_is_404() {
        let response = app()
            .oneshot(
                Request::post("/api/v1/tools/register_for_class")
                    .header("content-type", "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
