//! Authentication middleware and the current-user extractor.

use crate::AppState;
use crate::auth::{CurrentUser, session};
use crate::errors::Error;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|token| token.trim().to_string())
}

fn cookie_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;
    raw.split(';')
        .filter_map(|part| part.trim().split_once('='))
        .find(|(name, _)| *name == cookie_name)
        .map(|(_, value)| value.to_string())
}

/// Reject requests without a valid access token and stash the decoded
/// identity in request extensions. The bearer header takes priority over the
/// cookie, matching how browser and API clients present the same token.
#[tracing::instrument(skip_all)]
pub async fn require_auth(State(state): State<AppState>, mut request: Request, next: Next) -> Result<Response, Error> {
    let headers = request.headers();
    let token = bearer_token(headers).or_else(|| cookie_token(headers, &state.config.auth.cookie_name));

    let Some(token) = token else {
        return Err(Error::Unauthenticated { message: None });
    };

    let current_user = session::verify_access_token(&token, &state.config)?;
    request.extensions_mut().insert(current_user);

    Ok(next.run(request).await)
}

impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(Error::Unauthenticated { message: None })
    }
}
