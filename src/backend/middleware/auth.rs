/**
 * Authentication Middleware
 *
 * Protects routes that require a caller identity. The bearer token is read
 * from the Authorization header, verified, and the caller is attached to the
 * request extensions for handlers to extract with [`AuthUser`].
 *
 * Every rejection is an authentication failure, answered with a fixed body by
 * the classifier; the reason stays in-process.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::backend::auth::Role;
use crate::backend::error::FailureEvent;
use crate::backend::server::state::AppState;

/// Caller identity extracted from a verified token
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub role: Role,
}

/// Authentication middleware
///
/// Rejects requests without a valid `Authorization: Bearer <token>` header.
pub async fn require_auth(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, FailureEvent> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| FailureEvent::authentication("missing Authorization header"))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| FailureEvent::authentication("unsupported authorization scheme"))?;

    let claims = app_state.verifier.verify(token)?;

    request.extensions_mut().insert(AuthenticatedUser {
        user_id: claims.sub,
        role: claims.role,
    });

    Ok(next.run(request).await)
}

/// Axum extractor for the authenticated caller
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl AuthUser {
    /// Require `role`, failing with an authorization failure otherwise
    pub fn require(&self, role: Role) -> Result<(), FailureEvent> {
        if self.0.role == role {
            Ok(())
        } else {
            Err(FailureEvent::authorization(format!(
                "user {} has role {}, {} required",
                self.0.user_id, self.0.role, role
            )))
        }
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = FailureEvent;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| FailureEvent::authentication("no authenticated user on request"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::error::FailureKind;
    use axum::http::Request as HttpRequest;

    fn user(role: Role) -> AuthUser {
        AuthUser(AuthenticatedUser {
            user_id: Uuid::new_v4(),
            role,
        })
    }

    #[test]
    fn test_require_matching_role() {
        assert!(user(Role::Admin).require(Role::Admin).is_ok());
    }

    #[test]
    fn test_require_missing_role() {
        let err = user(Role::User).require(Role::Admin).unwrap_err();
        assert_eq!(err.kind(), FailureKind::Authorization);
    }

    #[tokio::test]
    async fn test_extract_authenticated_user() {
        let expected = AuthenticatedUser {
            user_id: Uuid::new_v4(),
            role: Role::User,
        };
        let mut request = HttpRequest::builder().uri("/").body(()).unwrap();
        request.extensions_mut().insert(expected.clone());
        let (mut parts, _) = request.into_parts();

        let AuthUser(extracted) = AuthUser::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(extracted, expected);
    }

    #[tokio::test]
    async fn test_extract_authenticated_user_missing() {
        let request = HttpRequest::builder().uri("/").body(()).unwrap();
        let (mut parts, _) = request.into_parts();

        let err = AuthUser::from_request_parts(&mut parts, &()).await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::Authentication);
    }
}
