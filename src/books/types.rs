//! Request-scoped types and error definitions.

use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;

/// A validated search. Built per request and dropped with it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookQuery {
    pub author: Option<String>,
    pub title: Option<String>,
    pub isbn: Option<Vec<String>>,
    pub offset: Option<u64>,
}

/// Field name → messages, in the order the findings were recorded.
///
/// Array-element problems are reported under the pseudo-field `isbn[]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: Vec<(String, Vec<String>)>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message against `field`, keeping earlier messages.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        let message = message.into();
        match self.fields.iter_mut().find(|(name, _)| name == field) {
            Some((_, messages)) => messages.push(message),
            None => self.fields.push((field.to_string(), vec![message])),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, messages)| messages.as_slice())
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }
}

impl Serialize for ValidationErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (field, messages) in &self.fields {
            map.serialize_entry(field, messages)?;
        }
        map.end()
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, (field, messages)) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", field, messages.join(" "))?;
        }
        Ok(())
    }
}

/// Failure of the outbound call before a complete response was received.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The call exceeded the configured deadline.
    #[error("upstream timed out: {0}")]
    Timeout(String),

    /// DNS or TCP connection failure.
    #[error("upstream connection failed: {0}")]
    Connect(String),

    /// Anything else that prevented a full response (reset, bad framing).
    #[error("upstream transport error: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::Connect(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// The two ways a books request can end in error.
#[derive(Debug, Error)]
pub enum BooksError {
    /// Client input failed one or more field rules.
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    /// The upstream could not be reached.
    #[error(transparent)]
    UpstreamUnavailable(#[from] UpstreamError),
}
