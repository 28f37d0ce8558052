use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use typed_builder::TypedBuilder;

pub const DEFAULT_SESSION_KEY: &str = "csrf.tokens";
pub const DEFAULT_FORM_KEY: &str = "_csrf";
pub const DEFAULT_LIMIT: NonZeroUsize = match NonZeroUsize::new(50) {
    Some(limit) => limit,
    None => panic!("default limit has to be non-zero"),
};

fn default_session_key() -> String {
    DEFAULT_SESSION_KEY.into()
}

fn default_form_key() -> String {
    DEFAULT_FORM_KEY.into()
}

fn default_limit() -> NonZeroUsize {
    DEFAULT_LIMIT
}

/// Settings of a token guard
///
/// Every field falls back to its default when omitted, both in the builder and when deserialising
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, TypedBuilder)]
#[serde(rename_all = "kebab-case")]
pub struct Configuration {
    /// Key of the session entry holding the token pool
    #[builder(default = default_session_key(), setter(into))]
    #[serde(default = "default_session_key")]
    pub session_key: String,

    /// Name of the form field carrying the submitted token
    #[builder(default = default_form_key(), setter(into))]
    #[serde(default = "default_form_key")]
    pub form_key: String,

    /// Maximum amount of tokens kept in the pool
    #[builder(default = default_limit())]
    #[serde(default = "default_limit")]
    pub limit: NonZeroUsize,
}

impl Configuration {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[cfg(test)]
mod test {
    use super::{Configuration, DEFAULT_FORM_KEY, DEFAULT_LIMIT, DEFAULT_SESSION_KEY};
    use std::num::NonZeroUsize;

    #[test]
    fn defaults() {
        let config = Configuration::default();
        assert_eq!(config.session_key, DEFAULT_SESSION_KEY);
        assert_eq!(config.form_key, DEFAULT_FORM_KEY);
        assert_eq!(config.limit.get(), 50);
    }

    #[test]
    fn builder_overrides() {
        let config = Configuration::builder()
            .form_key("authenticity_token")
            .limit(NonZeroUsize::new(3).unwrap())
            .build();

        assert_eq!(config.session_key, DEFAULT_SESSION_KEY);
        assert_eq!(config.form_key, "authenticity_token");
        assert_eq!(config.limit.get(), 3);
    }

    #[test]
    fn parse_partial_toml() {
        let config = Configuration::from_toml(r#"session-key = "forms.tokens""#).unwrap();
        assert_eq!(config.session_key, "forms.tokens");
        assert_eq!(config.form_key, DEFAULT_FORM_KEY);
        assert_eq!(config.limit, DEFAULT_LIMIT);

        let config = Configuration::from_toml("").unwrap();
        assert_eq!(config, Configuration::default());
    }

    #[test]
    fn reject_zero_limit() {
        assert!(Configuration::from_toml("limit = 0").is_err());
    }
}
