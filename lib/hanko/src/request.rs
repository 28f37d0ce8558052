use http::{request::Parts, Method, Request};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Parsed form parameters of a request
///
/// Parsing the body is the job of the hosting application.
/// Once parsed, insert the parameters into the request extensions so the guard can find them.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FormParams(HashMap<String, String>);

impl FormParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an `application/x-www-form-urlencoded` body
    pub fn from_urlencoded(body: &[u8]) -> Result<Self, serde_urlencoded::de::Error> {
        serde_urlencoded::from_bytes(body)
    }

    #[inline]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    #[inline]
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for FormParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

/// Request as seen by the guard
pub trait FormRequest {
    fn method(&self) -> &Method;

    /// Parsed parameters of the request. `None` if the request has no (parsed) body
    fn parsed_body(&self) -> Option<&FormParams>;
}

impl<B> FormRequest for Request<B> {
    #[inline]
    fn method(&self) -> &Method {
        self.method()
    }

    #[inline]
    fn parsed_body(&self) -> Option<&FormParams> {
        self.extensions().get()
    }
}

impl FormRequest for Parts {
    #[inline]
    fn method(&self) -> &Method {
        &self.method
    }

    #[inline]
    fn parsed_body(&self) -> Option<&FormParams> {
        self.extensions.get()
    }
}

impl<T> FormRequest for &T
where
    T: FormRequest + ?Sized,
{
    #[inline]
    fn method(&self) -> &Method {
        (**self).method()
    }

    #[inline]
    fn parsed_body(&self) -> Option<&FormParams> {
        (**self).parsed_body()
    }
}
