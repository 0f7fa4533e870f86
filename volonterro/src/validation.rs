//! Request-body validation gate.
//!
//! Every create/update payload declares a [`FieldSchema`] table: a data-driven
//! list of per-field constraints evaluated before any storage access. All
//! constraints are checked (no short-circuit) so a failing request reports
//! every violation at once.
//!
//! Classification of failures follows the platform's boundary rules:
//!
//! - A body that is not a JSON object at all (invalid JSON, array, scalar)
//!   is **malformed** and yields 400.
//! - Any per-field violation - an unknown property, a missing required field,
//!   a type mismatch, or a broken declared constraint - carries a
//!   constraint message and yields 409 with the full message list.
//!
//! The input schema is closed-world: properties not declared by the schema
//! are always rejected.

use crate::errors::Error;
use axum::extract::{FromRequest, Request};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::str::FromStr;
use uuid::Uuid;

/// A single declared constraint on one field.
#[derive(Debug, Clone)]
pub enum Constraint {
    /// Value must be a JSON string
    String,
    /// Value must be a string holding a well-formed UUID
    Uuid,
    /// Value must parse as an exact decimal (string or JSON number)
    Decimal,
    /// Value must be an RFC 3339 date-time string
    DateTime,
    /// String length upper bound
    MaxLength(usize),
    /// String must be exactly this many ASCII digits (card numbers)
    Digits(usize),
    /// Decimal lower bound, inclusive
    DecimalMin(Decimal),
    /// Date-time must not be in the future
    MaxDateNow,
    /// String must be one of the listed values
    OneOf(&'static [&'static str]),
}

/// One field of an entity schema.
#[derive(Debug, Clone)]
pub struct FieldSchema {
    pub name: &'static str,
    pub required: bool,
    pub constraints: Vec<Constraint>,
}

impl FieldSchema {
    /// A field that must be present and non-null.
    pub fn required(name: &'static str, constraints: Vec<Constraint>) -> Self {
        Self {
            name,
            required: true,
            constraints,
        }
    }

    /// A field validated only when present and non-null.
    pub fn optional(name: &'static str, constraints: Vec<Constraint>) -> Self {
        Self {
            name,
            required: false,
            constraints,
        }
    }

    fn check_value(&self, value: &Value, violations: &mut Vec<String>) {
        let name = self.name;
        for constraint in &self.constraints {
            match constraint {
                Constraint::String => {
                    if !value.is_string() {
                        violations.push(format!("{name} must be a string"));
                    }
                }
                Constraint::Uuid => match value.as_str() {
                    Some(s) if Uuid::parse_str(s).is_ok() => {}
                    _ => violations.push(format!("{name} must be a UUID")),
                },
                Constraint::Decimal => {
                    if parse_decimal(value).is_none() {
                        violations.push(format!("{name} is not a valid decimal number"));
                    }
                }
                Constraint::DateTime => match value.as_str() {
                    Some(s) if DateTime::parse_from_rfc3339(s).is_ok() => {}
                    _ => violations.push(format!("{name} must be a valid ISO 8601 date string")),
                },
                Constraint::MaxLength(max) => {
                    if let Some(s) = value.as_str() {
                        if s.chars().count() > *max {
                            violations.push(format!("{name} must be shorter than or equal to {max} characters"));
                        }
                    }
                }
                Constraint::Digits(count) => match value.as_str() {
                    Some(s) if s.chars().count() == *count && s.chars().all(|c| c.is_ascii_digit()) => {}
                    _ => violations.push(format!("{name} must be a string of exactly {count} digits")),
                },
                Constraint::DecimalMin(min) => {
                    if let Some(d) = parse_decimal(value) {
                        if d < *min {
                            violations.push(format!("{name} must not be less than {min}"));
                        }
                    }
                }
                Constraint::MaxDateNow => {
                    if let Some(s) = value.as_str() {
                        if let Ok(parsed) = DateTime::parse_from_rfc3339(s) {
                            if parsed.with_timezone(&Utc) > Utc::now() {
                                violations.push(format!("maximal allowed date for {name} is the current date"));
                            }
                        }
                    }
                }
                Constraint::OneOf(allowed) => match value.as_str() {
                    Some(s) if allowed.contains(&s) => {}
                    _ => violations.push(format!("{name} must be one of the following values: {}", allowed.join(", "))),
                },
            }
        }
    }
}

/// Parse a JSON value into an exact decimal. JSON numbers go through their
/// shortest string representation, so `8500.5` stays `8500.5`.
fn parse_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
        Value::String(s) => Decimal::from_str(s).ok(),
        _ => None,
    }
}

/// The full declared field table for one request payload.
#[derive(Debug, Clone)]
pub struct EntitySchema {
    fields: Vec<FieldSchema>,
}

impl EntitySchema {
    pub fn new(fields: Vec<FieldSchema>) -> Self {
        Self { fields }
    }

    /// Evaluate the whole schema against a parsed request body, collecting
    /// every violation before classifying the outcome.
    pub fn check(&self, body: &Value) -> Result<(), Error> {
        let Some(map) = body.as_object() else {
            return Err(Error::Malformed {
                messages: vec!["request body must be a JSON object".to_string()],
            });
        };

        let mut violations = Vec::new();

        // Closed-world schema: unknown properties are rejected outright
        for key in map.keys() {
            if !self.fields.iter().any(|f| f.name == key) {
                violations.push(format!("property {key} should not exist"));
            }
        }

        for field in &self.fields {
            match map.get(field.name) {
                None | Some(Value::Null) => {
                    if field.required {
                        violations.push(format!("{} should not be null or undefined", field.name));
                    }
                }
                Some(value) => field.check_value(value, &mut violations),
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation { messages: violations })
        }
    }
}

/// Implemented by every request payload that passes through the gate.
pub trait ValidatedEntity {
    fn schema() -> &'static EntitySchema;
}

/// JSON extractor that runs the validation gate before deserializing.
///
/// Rejections are [`Error::Malformed`] (400) for undecodable bodies and
/// [`Error::Validation`] (409) for constraint violations, so the gate's
/// classification applies before a handler ever runs.
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: ValidatedEntity + DeserializeOwned,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|_| Error::Malformed {
            messages: vec!["unable to read request body".to_string()],
        })?;

        let body: Value = serde_json::from_slice(&bytes).map_err(|e| Error::Malformed {
            messages: vec![format!("invalid JSON body: {e}")],
        })?;

        T::schema().check(&body)?;

        let payload = serde_json::from_value(body).map_err(|e| Error::Malformed {
            messages: vec![format!("invalid request body: {e}")],
        })?;

        Ok(ValidatedJson(payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use serde_json::json;

    fn donation_schema() -> EntitySchema {
        EntitySchema::new(vec![
            FieldSchema::required("postId", vec![Constraint::Uuid]),
            FieldSchema::required(
                "cardNumber",
                vec![Constraint::String, Constraint::MaxLength(16), Constraint::Digits(16)],
            ),
            FieldSchema::required(
                "donation",
                vec![Constraint::Decimal, Constraint::DecimalMin(Decimal::new(1, 2))],
            ),
            FieldSchema::required("datetime", vec![Constraint::DateTime, Constraint::MaxDateNow]),
            FieldSchema::optional("note", vec![Constraint::String, Constraint::MaxLength(10)]),
        ])
    }

    fn valid_body() -> Value {
        json!({
            "postId": "b7af9cd4-5533-4737-862b-78bce985c987",
            "cardNumber": "5594148605144157",
            "donation": 8500.5,
            "datetime": "2023-06-30T00:00:00Z",
        })
    }

    #[test]
    fn accepts_a_valid_body() {
        assert!(donation_schema().check(&valid_body()).is_ok());
    }

    #[test]
    fn non_object_body_is_malformed() {
        let err = donation_schema().check(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unknown_property_is_a_conflict() {
        let mut body = valid_body();
        body["asdasd"] = json!(123);

        let err = donation_schema().check(&body).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        match err {
            Error::Validation { messages } => {
                assert_eq!(messages, vec!["property asdasd should not exist".to_string()]);
            }
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    #[test]
    fn missing_required_field_is_a_conflict() {
        let mut body = valid_body();
        body.as_object_mut().unwrap().remove("cardNumber");

        let err = donation_schema().check(&body).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn all_violations_are_reported_at_once() {
        let mut body = valid_body();
        body["cardNumber"] = json!("1234");
        body["donation"] = json!(0);

        let err = donation_schema().check(&body).unwrap_err();
        match err {
            Error::Validation { messages } => {
                assert_eq!(messages.len(), 2);
                assert!(messages.iter().any(|m| m.contains("cardNumber")));
                assert!(messages.iter().any(|m| m.contains("donation")));
            }
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    #[test]
    fn donation_below_the_declared_minimum_is_rejected() {
        let mut body = valid_body();
        body["donation"] = json!(0);
        assert!(donation_schema().check(&body).is_err());

        body["donation"] = json!(0.01);
        assert!(donation_schema().check(&body).is_ok());
    }

    #[test]
    fn future_datetime_is_rejected() {
        let mut body = valid_body();
        body["datetime"] = json!("2099-01-01T00:00:00Z");

        let err = donation_schema().check(&body).unwrap_err();
        match err {
            Error::Validation { messages } => {
                assert_eq!(messages, vec!["maximal allowed date for datetime is the current date".to_string()]);
            }
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    #[test]
    fn optional_field_is_skipped_when_absent_or_null() {
        let mut body = valid_body();
        assert!(donation_schema().check(&body).is_ok());

        body["note"] = json!(null);
        assert!(donation_schema().check(&body).is_ok());

        body["note"] = json!("far too long for the bound");
        assert!(donation_schema().check(&body).is_err());
    }

    #[test]
    fn decimal_accepts_both_numbers_and_strings() {
        let mut body = valid_body();
        body["donation"] = json!("1551.60");
        assert!(donation_schema().check(&body).is_ok());

        body["donation"] = json!(true);
        assert!(donation_schema().check(&body).is_err());
    }
}
