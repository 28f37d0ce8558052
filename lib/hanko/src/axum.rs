use crate::{Error, SessionStore, StoreError, TokenGuard};
use axum_core::{
    extract::FromRequestParts,
    response::{IntoResponse, Response},
};
use http::{request::Parts, StatusCode};

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        debug!(error = ?self);

        match self {
            Self::MissingToken | Self::InvalidToken => StatusCode::FORBIDDEN.into_response(),
            Self::Store(..) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    }
}

/// Guard over the session of the current request
///
/// Fails with a store error if the handler isn't wrapped by the CSRF middleware or the request has no session attached
impl<S, St> FromRequestParts<S> for TokenGuard<St>
where
    S: Sync,
    St: SessionStore + Clone + Send + Sync + 'static,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Self>()
            .cloned()
            .ok_or_else(|| Error::store(StoreError::Missing))
    }
}
