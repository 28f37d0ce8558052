use crate::{Configuration, CsrfService, SessionStore};
use std::marker::PhantomData;
use tower::Layer;

/// Layer applying [`CsrfService`]
///
/// `St` is the type of session store the hosting application attaches to each request
pub struct CsrfLayer<St> {
    config: Configuration,
    _store: PhantomData<fn() -> St>,
}

impl<St> CsrfLayer<St>
where
    St: SessionStore + Clone,
{
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Configuration::default())
    }

    #[must_use]
    pub fn with_config(config: Configuration) -> Self {
        Self {
            config,
            _store: PhantomData,
        }
    }
}

impl<St> Clone for CsrfLayer<St> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            _store: PhantomData,
        }
    }
}

impl<St> Default for CsrfLayer<St>
where
    St: SessionStore + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S, St> Layer<S> for CsrfLayer<St>
where
    St: SessionStore + Clone,
{
    type Service = CsrfService<S, St>;

    fn layer(&self, inner: S) -> Self::Service {
        CsrfService::new(inner, self.config.clone())
    }
}
