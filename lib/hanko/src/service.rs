use crate::{
    error::{BoxError, Error},
    is_protected, Configuration, ResponseFuture, SessionStore, StoreError, TokenGuard,
};
use http::Request;
use std::{
    marker::PhantomData,
    task::{self, Poll},
};
use tower::Service;

/// Middleware rejecting protected requests that don't carry a valid token
///
/// The token pool is looked up in the session of the requesting client.
/// The hosting application's session layer has to insert that session's store (of type `St`) into the request extensions.
/// Protected requests without one are rejected with a store error, other requests are forwarded without a guard.
///
/// Accepted requests get a [`TokenGuard`] over their session inserted into their extensions,
/// which handlers use to issue tokens for the forms they render.
pub struct CsrfService<S, St> {
    inner: S,
    config: Configuration,
    _store: PhantomData<fn() -> St>,
}

impl<S, St> CsrfService<S, St>
where
    St: SessionStore,
{
    #[must_use]
    pub fn new(inner: S, config: Configuration) -> Self {
        Self {
            inner,
            config,
            _store: PhantomData,
        }
    }
}

impl<S, St> Clone for CsrfService<S, St>
where
    S: Clone,
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            config: self.config.clone(),
            _store: PhantomData,
        }
    }
}

impl<S, St, ReqBody> Service<Request<ReqBody>> for CsrfService<S, St>
where
    S: Service<Request<ReqBody>>,
    S::Error: Into<BoxError>,
    St: SessionStore + Clone + Send + Sync + 'static,
{
    type Error = BoxError;
    type Future = ResponseFuture<S::Future>;
    type Response = S::Response;

    fn poll_ready(&mut self, cx: &mut task::Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx).map_err(Into::into)
    }

    fn call(&mut self, mut req: Request<ReqBody>) -> Self::Future {
        let Some(store) = req.extensions().get::<St>().cloned() else {
            if !is_protected(req.method()) {
                return ResponseFuture::inner(self.inner.call(req));
            }

            debug!(method = %req.method(), "request has no session store attached");
            return ResponseFuture::rejected(Error::store(StoreError::Missing));
        };

        let mut guard = TokenGuard::with_config(store, self.config.clone());
        if let Err(error) = guard.validate(&req) {
            return ResponseFuture::rejected(error);
        }

        req.extensions_mut().insert(guard);

        ResponseFuture::inner(self.inner.call(req))
    }
}
