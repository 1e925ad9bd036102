//! JSON body extraction with field validation.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};
use vidnotes_core::error::CoreError;

use crate::error::{AppError, AppResult};

/// JSON body that has passed its `validator` rules.
///
/// Bodies are parsed regardless of `Content-Type`. Malformed JSON and failed
/// rules both reject with 400 and the usual `{"error"}` body.
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        parse_validated(&body).map(ValidatedJson)
    }
}

/// Deserialize and validate a JSON body.
pub fn parse_validated<T: DeserializeOwned + Validate>(body: &[u8]) -> AppResult<T> {
    let value: T = serde_json::from_slice(body)
        .map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {e}")))?;
    value
        .validate()
        .map_err(|errors| AppError::Core(CoreError::Validation(first_message(&errors))))?;
    Ok(value)
}

/// Pick one message to report, deterministically (first field by name).
fn first_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .find_map(|(field, errs)| {
            errs.first().map(|e| match &e.message {
                Some(msg) => msg.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .unwrap_or_else(|| "Invalid request body".to_string())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, Validate)]
    struct Pair {
        #[serde(default)]
        #[validate(length(min = 1, message = "alpha empty"))]
        alpha: String,
        #[serde(default)]
        #[validate(length(min = 1, message = "beta empty"))]
        beta: String,
    }

    #[test]
    fn valid_body_parses() {
        let pair: Pair = parse_validated(br#"{"alpha":"a","beta":"b"}"#).unwrap();
        assert_eq!(pair.alpha, "a");
    }

    #[test]
    fn missing_fields_report_first_field_message() {
        let err = parse_validated::<Pair>(b"{}").unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::Validation(msg)) if msg == "alpha empty");
    }

    #[test]
    fn malformed_json_is_bad_request() {
        assert_matches!(parse_validated::<Pair>(b"{nope"), Err(AppError::BadRequest(_)));
        assert_matches!(parse_validated::<Pair>(b""), Err(AppError::BadRequest(_)));
    }
}
