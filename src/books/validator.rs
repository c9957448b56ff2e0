//! Field rules for the books search.
//!
//! Every rule runs; findings accumulate in one [`ValidationErrors`]. Any
//! finding fails the whole request.

use crate::books::params::{ParamValue, QueryParams};
use crate::books::types::{BookQuery, ValidationErrors};

pub const MAX_TEXT_CHARS: usize = 255;
pub const ISBN_LENGTHS: [usize; 2] = [10, 13];
pub const OFFSET_STEP: u64 = 20;

pub const ISBN_NOT_ARRAY: &str = "The isbn must be an array.";
pub const ISBN_ELEMENT: &str = "ISBN must be a number 10 or 13 characters long";
/// No trailing period: this is the exact text clients already match on.
pub const OFFSET_INVALID: &str = "Offset must be a number 0 or multiple of 20";

/// Key used for element-level ISBN problems.
pub const ISBN_ELEMENT_FIELD: &str = "isbn[]";

/// Largest offset that survives the float round-trip exactly (2^53).
const MAX_EXACT_OFFSET: f64 = 9_007_199_254_740_992.0;

/// Check raw parameters, producing either a query or the full error set.
pub fn validate(params: &QueryParams) -> Result<BookQuery, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let query = BookQuery {
        author: check_text(params, "author", &mut errors),
        title: check_text(params, "title", &mut errors),
        isbn: check_isbn(params, &mut errors),
        offset: check_offset(params, &mut errors),
    };

    if errors.is_empty() {
        Ok(query)
    } else {
        Err(errors)
    }
}

fn check_text(params: &QueryParams, field: &str, errors: &mut ValidationErrors) -> Option<String> {
    match params.get(field)? {
        ParamValue::Scalar(value) => {
            if value.chars().count() > MAX_TEXT_CHARS {
                errors.add(
                    field,
                    format!("The {field} must not be greater than {MAX_TEXT_CHARS} characters."),
                );
            }
            Some(value.clone())
        }
        ParamValue::List(_) => {
            errors.add(field, format!("The {field} must be a string."));
            None
        }
    }
}

fn check_isbn(params: &QueryParams, errors: &mut ValidationErrors) -> Option<Vec<String>> {
    match params.get("isbn")? {
        // Not short-circuited: a scalar also fails the element rule.
        ParamValue::Scalar(_) => {
            errors.add("isbn", ISBN_NOT_ARRAY);
            errors.add(ISBN_ELEMENT_FIELD, ISBN_ELEMENT);
            None
        }
        ParamValue::List(items) => {
            if items.iter().any(|isbn| !is_isbn_length(isbn)) {
                errors.add(ISBN_ELEMENT_FIELD, ISBN_ELEMENT);
            }
            Some(items.clone())
        }
    }
}

fn is_isbn_length(isbn: &str) -> bool {
    ISBN_LENGTHS.contains(&isbn.chars().count())
}

fn check_offset(params: &QueryParams, errors: &mut ValidationErrors) -> Option<u64> {
    let raw = params.get("offset")?;
    let offset = match raw {
        ParamValue::Scalar(value) => parse_offset(value),
        ParamValue::List(_) => None,
    };
    if offset.is_none() {
        errors.add("offset", OFFSET_INVALID);
    }
    offset
}

/// Accepts any numeric string (sign, fraction, exponent) whose value is a
/// non-negative integral multiple of [`OFFSET_STEP`].
fn parse_offset(value: &str) -> Option<u64> {
    let number: f64 = value.parse().ok()?;
    if !number.is_finite() || number < 0.0 || number.fract() != 0.0 || number > MAX_EXACT_OFFSET {
        return None;
    }
    let offset = number as u64;
    (offset % OFFSET_STEP == 0).then_some(offset)
}
