use crate::{error::BoxError, Token};
use std::{
    collections::HashMap,
    convert::Infallible,
    sync::{Mutex, PoisonError},
};
use thiserror::Error;
use triomphe::Arc;

/// Key-value handle onto the session of a single client
///
/// The guard only ever touches the one entry it has been configured with.
/// How the session is persisted (cookies, files, a cache server) is up to the implementation.
///
/// Anything that doesn't implement this trait is rejected at compile time:
///
/// ```compile_fail
/// struct Opaque;
///
/// let guard = hanko::TokenGuard::new(Opaque);
/// ```
pub trait SessionStore {
    type Error: Into<BoxError>;

    /// Read the token pool stored under `key`
    ///
    /// An absent entry is `Ok(None)`, not an error
    fn get(&self, key: &str) -> Result<Option<Vec<Token>>, Self::Error>;

    /// Replace the token pool stored under `key`
    fn set(&mut self, key: &str, tokens: Vec<Token>) -> Result<(), Self::Error>;
}

impl SessionStore for HashMap<String, Vec<Token>> {
    type Error = Infallible;

    #[inline]
    fn get(&self, key: &str) -> Result<Option<Vec<Token>>, Self::Error> {
        Ok(HashMap::get(self, key).cloned())
    }

    #[inline]
    fn set(&mut self, key: &str, tokens: Vec<Token>) -> Result<(), Self::Error> {
        self.insert(key.to_owned(), tokens);
        Ok(())
    }
}

impl<T> SessionStore for &mut T
where
    T: SessionStore + ?Sized,
{
    type Error = T::Error;

    #[inline]
    fn get(&self, key: &str) -> Result<Option<Vec<Token>>, Self::Error> {
        (**self).get(key)
    }

    #[inline]
    fn set(&mut self, key: &str, tokens: Vec<Token>) -> Result<(), Self::Error> {
        (**self).set(key, tokens)
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("No session store attached to the request")]
    Missing,

    #[error("Session store lock was poisoned")]
    Poisoned,
}

impl<T> From<PoisonError<T>> for StoreError {
    fn from(_value: PoisonError<T>) -> Self {
        Self::Poisoned
    }
}

/// In-memory session store
///
/// Holds the data of a single session. Clones are handles onto the same session,
/// so a session layer can keep one store per session and attach a clone of it to each request of that session
#[derive(Clone)]
pub struct MemoryStore {
    inner: Arc<Mutex<HashMap<String, Vec<Token>>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for MemoryStore {
    type Error = StoreError;

    fn get(&self, key: &str) -> Result<Option<Vec<Token>>, Self::Error> {
        let guard = self.inner.lock()?;
        Ok(guard.get(key).cloned())
    }

    fn set(&mut self, key: &str, tokens: Vec<Token>) -> Result<(), Self::Error> {
        self.inner.lock()?.insert(key.to_owned(), tokens);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::{MemoryStore, SessionStore, StoreError};
    use crate::{Error, Token, TokenGuard};
    use std::{collections::HashMap, thread};

    #[test]
    fn hashmap_absent_entry() {
        let session: HashMap<String, Vec<Token>> = HashMap::new();
        assert_eq!(SessionStore::get(&session, "csrf.tokens").unwrap(), None);
    }

    #[test]
    fn memory_store_shares_state() {
        let mut store = MemoryStore::new();
        let handle = store.clone();

        store
            .set("csrf.tokens", vec![Token::from_static("abc")])
            .unwrap();

        assert_eq!(
            handle.get("csrf.tokens").unwrap(),
            Some(vec![Token::from_static("abc")])
        );
    }

    #[test]
    fn poisoned_lock_is_an_error() {
        let mut store = MemoryStore::new();
        let handle = store.clone();

        let result = thread::spawn(move || {
            let _guard = handle.inner.lock().unwrap();
            panic!("poison the session");
        })
        .join();
        assert!(result.is_err());

        assert!(matches!(store.get("csrf.tokens"), Err(StoreError::Poisoned)));
        assert!(matches!(
            store.set("csrf.tokens", Vec::new()),
            Err(StoreError::Poisoned)
        ));

        let error = TokenGuard::new(store).generate_token().unwrap_err();
        assert!(matches!(error, Error::Store(..)));
        assert!(!error.is_rejection());
    }
}
