use crate::{
    error::{Error, Result},
    request::FormRequest,
    store::SessionStore,
    Configuration, Token,
};
use http::Method;
use std::num::NonZeroUsize;

/// Methods whose requests have to carry a valid token
///
/// Requests with any other method (`PUT`, `PATCH`, `DELETE`, ..) pass through unchecked
#[inline]
#[must_use]
pub fn is_protected(method: &Method) -> bool {
    *method == Method::GET || *method == Method::POST
}

/// Issues single-use tokens and validates them against the pool kept inside the session
#[derive(Clone)]
pub struct TokenGuard<S> {
    store: S,
    config: Configuration,
}

impl<S> TokenGuard<S>
where
    S: SessionStore,
{
    /// Construct a guard with the default configuration
    #[must_use]
    pub fn new(store: S) -> Self {
        Self::with_config(store, Configuration::default())
    }

    #[must_use]
    pub fn with_config(store: S, config: Configuration) -> Self {
        Self { store, config }
    }

    #[inline]
    #[must_use]
    pub fn session_key(&self) -> &str {
        &self.config.session_key
    }

    #[inline]
    #[must_use]
    pub fn form_key(&self) -> &str {
        &self.config.form_key
    }

    #[inline]
    #[must_use]
    pub fn limit(&self) -> NonZeroUsize {
        self.config.limit
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    #[inline]
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[inline]
    #[must_use]
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    #[inline]
    #[must_use]
    pub fn into_inner(self) -> S {
        self.store
    }

    /// Current token pool. An absent session entry is an empty pool
    pub fn tokens(&self) -> Result<Vec<Token>> {
        let tokens = self
            .store
            .get(&self.config.session_key)
            .map_err(Error::store)?;

        Ok(tokens.unwrap_or_default())
    }

    /// Generate a new token and add it to the pool
    ///
    /// Once the pool outgrows the limit, the oldest token gets evicted.
    /// Embedding the token into the response (as a hidden form field, for example) is up to the caller.
    pub fn generate_token(&mut self) -> Result<Token> {
        let token = Token::generate();

        let mut tokens = self.tokens()?;
        tokens.push(token.clone());
        if tokens.len() > self.config.limit.get() {
            tokens.remove(0);
            trace!(limit = self.config.limit.get(), "evicted oldest csrf token");
        }

        self.store
            .set(&self.config.session_key, tokens)
            .map_err(Error::store)?;

        trace!("issued csrf token");

        Ok(token)
    }

    /// Validate the request and consume its token
    ///
    /// Requests with unprotected methods are accepted without looking at them.
    pub fn validate<R>(&mut self, request: &R) -> Result<()>
    where
        R: FormRequest + ?Sized,
    {
        if !is_protected(request.method()) {
            return Ok(());
        }

        let Some(submitted) = request
            .parsed_body()
            .and_then(|params| params.get(&self.config.form_key))
        else {
            debug!(method = %request.method(), "request is missing the csrf token");
            return Err(Error::MissingToken);
        };

        let mut tokens = self.tokens()?;
        if !tokens.iter().any(|token| token.matches(submitted)) {
            debug!(method = %request.method(), "request carries an invalid csrf token");
            return Err(Error::InvalidToken);
        }

        tokens.retain(|token| !token.matches(submitted));
        self.store
            .set(&self.config.session_key, tokens)
            .map_err(Error::store)?;

        trace!("consumed csrf token");

        Ok(())
    }

    /// Validate the request, and on success, hand it over to the next handler
    ///
    /// `next` is called at most once, and only if the validation passed.
    /// Its return value is passed through unchanged.
    pub fn process<R, F, T>(&mut self, request: R, next: F) -> Result<T>
    where
        R: FormRequest,
        F: FnOnce(R) -> T,
    {
        self.validate(&request)?;
        Ok(next(request))
    }
}
