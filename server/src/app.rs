use axum::Router;
use axum::http::Method;
use axum::routing::get;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};

use crate::routes;
use crate::state::AppState;

pub(crate) fn build_app(state: AppState) -> Router {
    // The dashboard front-end is served from elsewhere and only ever reads.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET]);

    Router::new()
        .route("/api", get(routes::api::get_members))
        .route("/api/members", get(routes::api::get_members))
        .route("/api/updates", get(routes::api::get_updates))
        .route("/api/rules", get(routes::api::get_rules))
        .route("/api/status", get(routes::api::get_status))
        .route("/api/health", get(routes::api::health))
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    use super::build_app;
    use crate::state::AppState;

    #[tokio::test]
    async fn unknown_routes_are_not_found() {
        let resp = build_app(AppState::new(None).expect("build app state"))
            .oneshot(
                Request::builder()
                    .uri("/api/leaderboard/write")
                    .body(Body::empty())
                    .expect("build request"),
            )
            .await
            .expect("router response");
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn views_are_readable_cross_origin() {
        let resp = build_app(AppState::new(None).expect("build app state"))
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .header(header::ORIGIN, "https://club.example.test")
                    .body(Body::empty())
                    .expect("build request"),
            )
            .await
            .expect("router response");
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|v| v.to_str().ok()),
            Some("*")
        );
    }

    #[tokio::test]
    async fn writes_are_not_routed() {
        let resp = build_app(AppState::new(None).expect("build app state"))
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/members")
                    .body(Body::empty())
                    .expect("build request"),
            )
            .await
            .expect("router response");
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
