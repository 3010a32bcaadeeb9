//! Simple API Key Authentication (Bearer Token)

use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
};

/// API Key from secrets
static API_KEY: std::sync::OnceLock<String> = std::sync::OnceLock::new();

/// Initialize the API key
pub fn init_api_key(key: String) {
    let _ = API_KEY.set(key);
}

fn get_api_key() -> Option<&'static str> {
    API_KEY.get().map(|s| s.as_str())
}

/// Authentication middleware
/// Validates Bearer token against the API key
pub async fn auth_middleware(request: Request, next: Next) -> Result<Response, StatusCode> {
    let api_key = match get_api_key() {
        Some(key) if !key.is_empty() => key,
        _ => {
            // No API key configured = auth disabled (for development)
            tracing::debug!("No API key configured, skipping authentication");
            return Ok(next.run(request).await);
        }
    };

    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    match check_bearer(auth_header, api_key) {
        Ok(()) => Ok(next.run(request).await),
        Err(reason) => {
            tracing::warn!(reason, "Rejected request");
            Err(StatusCode::UNAUTHORIZED)
        }
    }
}

fn check_bearer(header: Option<&str>, api_key: &str) -> Result<(), &'static str> {
    match header {
        Some(value) => match value.strip_prefix("Bearer ") {
            Some(token) if token == api_key => Ok(()),
            Some(_) => Err("invalid API key"),
            None => Err("invalid Authorization header format"),
        },
        None => Err("missing Authorization header"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_bearer() {
        assert_eq!(check_bearer(Some("Bearer s3cret"), "s3cret"), Ok(()));
        assert_eq!(check_bearer(Some("Bearer nope"), "s3cret"), Err("invalid API key"));
        assert_eq!(
            check_bearer(Some("Basic s3cret"), "s3cret"),
            Err("invalid Authorization header format")
        );
        assert_eq!(check_bearer(None, "s3cret"), Err("missing Authorization header"));
    }
}
