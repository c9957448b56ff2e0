//! Raw query-string decoding.
//!
//! Keys follow the bracket convention for arrays: `isbn[]=a&isbn[]=b` (or
//! `isbn[0]=a`) yields a list, plain `isbn=a` a scalar. A later plain key
//! replaces whatever came before it; a bracketed key appends to an
//! existing list or replaces a scalar with a new list.
//!
//! Values are trimmed. An empty scalar means the field was not supplied.
//! An empty list element is kept, since it is a real (invalid) element.

use url::form_urlencoded;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Scalar(String),
    List(Vec<String>),
}

/// Decoded query parameters in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: Vec<(String, ParamValue)>,
}

impl QueryParams {
    /// Decode a raw (still percent-encoded) query string, without the `?`.
    pub fn parse(raw: &str) -> Self {
        let mut params = Self::default();
        for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
            let value = value.trim().to_string();
            match split_key(&key) {
                (name, true) => params.push_element(name, value),
                (name, false) => params.set_scalar(name, value),
            }
        }
        params
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn set_scalar(&mut self, key: &str, value: String) {
        if value.is_empty() {
            self.entries.retain(|(name, _)| name != key);
            return;
        }
        match self.slot(key) {
            Some(slot) => *slot = ParamValue::Scalar(value),
            None => self
                .entries
                .push((key.to_string(), ParamValue::Scalar(value))),
        }
    }

    fn push_element(&mut self, key: &str, value: String) {
        match self.slot(key) {
            Some(ParamValue::List(items)) => items.push(value),
            Some(slot) => *slot = ParamValue::List(vec![value]),
            None => self
                .entries
                .push((key.to_string(), ParamValue::List(vec![value]))),
        }
    }

    fn slot(&mut self, key: &str) -> Option<&mut ParamValue> {
        self.entries
            .iter_mut()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }
}

/// Split `name[...]` into (`name`, true); anything else is (`key`, false).
fn split_key(key: &str) -> (&str, bool) {
    match key.find('[') {
        Some(open) if open > 0 && key.ends_with(']') => (&key[..open], true),
        _ => (key, false),
    }
}
