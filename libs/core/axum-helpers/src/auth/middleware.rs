//! Role-based authorization middleware.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::errors::AppError;

use super::jwt::JwtAuth;

/// State for [`require_role`]: the verifier plus the roles allowed
/// through. An empty allow-list means any authenticated user passes.
#[derive(Clone)]
pub struct RoleGuard {
    pub auth: JwtAuth,
    pub allowed: Vec<String>,
}

impl RoleGuard {
    /// Guard that only requires a valid token.
    pub fn authenticated(auth: JwtAuth) -> Self {
        Self {
            auth,
            allowed: Vec::new(),
        }
    }

    /// Guard that additionally requires one of the given roles.
    pub fn with_roles(auth: JwtAuth, allowed: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            auth,
            allowed: allowed.into_iter().map(Into::into).collect(),
        }
    }
}

/// Bearer-token authorization middleware.
///
/// Rejections, in evaluation order:
/// - no `Authorization` header: 401
/// - a scheme other than `Bearer`: 400
/// - a token that fails verification (including an empty one): 401
/// - a verified token whose role is not in a non-empty allow-list: 403
///
/// On success the decoded claims are inserted into request extensions
/// for downstream handlers.
///
/// # Example
///
/// ```ignore
/// use axum::{middleware, routing::get, Router};
/// use axum_helpers::auth::{require_role, JwtAuth, RoleGuard};
///
/// let guard = RoleGuard::with_roles(jwt.clone(), ["ADMIN"]);
/// let admin_routes = Router::new()
///     .route("/reports", get(reports))
///     .layer(middleware::from_fn_with_state(guard, require_role));
/// ```
pub async fn require_role(
    State(guard): State<RoleGuard>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthenticated.into_response())?;

    let mut parts = header.splitn(2, ' ');
    let scheme = parts.next().unwrap_or_default();
    let token = parts.next().unwrap_or_default();

    if scheme != "Bearer" {
        return Err(
            AppError::BadRequest("Authorization type not supported".to_string()).into_response(),
        );
    }

    let claims = guard.auth.verify(token).map_err(|e| {
        tracing::debug!(error = %e, "Token verification failed");
        AppError::Unauthenticated.into_response()
    })?;

    if !guard.allowed.is_empty() {
        let permitted = claims
            .role
            .as_deref()
            .is_some_and(|role| guard.allowed.iter().any(|allowed| allowed == role));

        if !permitted {
            return Err(AppError::Unauthorized.into_response());
        }
    }

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::config::JwtConfig;
    use axum::{
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        middleware,
        routing::get,
        Extension, Router,
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::auth::jwt::Claims;

    fn jwt() -> JwtAuth {
        JwtAuth::new(&JwtConfig::new("test-secret-that-is-long-enough-to-pass"))
    }

    async fn whoami(Extension(claims): Extension<Claims>) -> String {
        claims.username
    }

    fn app(guard: RoleGuard) -> Router {
        Router::new()
            .route("/protected", get(whoami))
            .layer(middleware::from_fn_with_state(guard, require_role))
    }

    async fn call(guard: RoleGuard, auth_header: Option<&str>) -> (StatusCode, serde_json::Value) {
        let mut builder = HttpRequest::builder().uri("/protected");
        if let Some(value) = auth_header {
            builder = builder.header("authorization", value);
        }
        let response = app(guard)
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn test_missing_header_is_unauthenticated() {
        let (status, body) = call(RoleGuard::authenticated(jwt()), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "User unauthenticated");
        assert_eq!(body["message"], "You are not logged in");
    }

    #[tokio::test]
    async fn test_non_bearer_scheme_is_bad_request() {
        let (status, body) = call(RoleGuard::authenticated(jwt()), Some("Basic dXNlcg==")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid values");
        assert_eq!(body["message"], "Authorization type not supported");
    }

    #[tokio::test]
    async fn test_bare_bearer_is_unauthenticated() {
        // "Bearer" with no token at all fails verification, not parsing.
        let (status, _) = call(RoleGuard::authenticated(jwt()), Some("Bearer")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_invalid_token_is_unauthenticated() {
        let (status, _) = call(RoleGuard::authenticated(jwt()), Some("Bearer garbage")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_valid_token_passes_empty_allow_list() {
        let auth = jwt();
        let token = auth.sign("alice-anderson", None).unwrap();
        let (status, _) = call(
            RoleGuard::authenticated(auth),
            Some(&format!("Bearer {}", token)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_matching_role_passes() {
        let auth = jwt();
        let token = auth
            .sign("alice-anderson", Some("ADMIN".to_string()))
            .unwrap();
        let (status, _) = call(
            RoleGuard::with_roles(auth, ["ADMIN"]),
            Some(&format!("Bearer {}", token)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_role_is_unauthorized() {
        let auth = jwt();
        let token = auth.sign("bob-builder", None).unwrap();
        let (status, body) = call(
            RoleGuard::with_roles(auth, ["ADMIN"]),
            Some(&format!("Bearer {}", token)),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "User not authorised");
        assert_eq!(
            body["message"],
            "You do not have sufficient privilege to view this"
        );
    }

    #[tokio::test]
    async fn test_wrong_role_is_unauthorized() {
        let auth = jwt();
        let token = auth
            .sign("bob-builder", Some("AUDITOR".to_string()))
            .unwrap();
        let (status, _) = call(
            RoleGuard::with_roles(auth, ["ADMIN"]),
            Some(&format!("Bearer {}", token)),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_claims_available_to_handler() {
        let auth = jwt();
        let token = auth
            .sign("alice-anderson", Some("ADMIN".to_string()))
            .unwrap();
        let response = app(RoleGuard::with_roles(auth, ["ADMIN"]))
            .oneshot(
                HttpRequest::builder()
                    .uri("/protected")
                    .header("authorization", format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(bytes, "alice-anderson".as_bytes());
    }
}
