use axum::Json;
use axum::extract::FromRequestParts;
use axum::http::{StatusCode, request::Parts};
use serde_json::{Value, json};

/// Authenticated subject for a request.
///
/// Session handling itself lives in the fronting auth layer, which
/// injects the subject as the `x-user-id` header. Requests without it
/// are rejected before any handler logic runs.
#[derive(Debug)]
pub struct AuthUser(pub String);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<Value>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get("x-user-id")
            .and_then(|value| value.to_str().ok())
            .filter(|subject| !subject.is_empty())
            .map(|subject| AuthUser(subject.to_string()))
            .ok_or((
                StatusCode::UNAUTHORIZED,
                Json(json!({ "message": "Unauthorized" })),
            ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(request: Request<()>) -> Result<AuthUser, StatusCode> {
        let (mut parts, _) = request.into_parts();
        AuthUser::from_request_parts(&mut parts, &())
            .await
            .map_err(|(status, _)| status)
    }

    #[tokio::test]
    async fn accepts_a_subject_header() {
        let request = Request::builder()
            .header("x-user-id", "auth0|abc123")
            .body(())
            .unwrap();
        let AuthUser(subject) = extract(request).await.unwrap();
        assert_eq!(subject, "auth0|abc123");
    }

    #[tokio::test]
    async fn missing_subject_is_unauthorized() {
        let request = Request::builder().body(()).unwrap();
        assert_eq!(extract(request).await.unwrap_err(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn empty_subject_is_unauthorized() {
        let request = Request::builder().header("x-user-id", "").body(()).unwrap();
        assert_eq!(extract(request).await.unwrap_err(), StatusCode::UNAUTHORIZED);
    }
}
