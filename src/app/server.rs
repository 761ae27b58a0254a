use crate::app::handler::GrantFunction;
use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use std::sync::Arc;

/// Mounts the function at `/` and `/ai-grants` for every method; method
/// dispatch and CORS are left to [`GrantFunction::handle`]. Queries have no
/// size limit, so the body limit is off and every reply goes through the handler.
pub fn router(function: Arc<GrantFunction>) -> Router {
    Router::new()
        .route("/", any(handle_function))
        .route("/ai-grants", any(handle_function))
        .layer(DefaultBodyLimit::disable())
        .with_state(function)
}

pub async fn run_server(bind_addr: &str, function: Arc<GrantFunction>) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!("🚀 Grant matching function listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(function)).await?;
    Ok(())
}

async fn handle_function(
    State(function): State<Arc<GrantFunction>>,
    method: Method,
    body: Bytes,
) -> Response {
    let result = function.handle(method.as_str(), &body).await;

    let status = StatusCode::from_u16(result.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut headers = HeaderMap::new();
    for &(name, value) in &result.headers {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }

    (status, headers, result.body).into_response()
}

