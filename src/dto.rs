//! Request/response bodies for the todo API.
//!
//! Requests are checked here, before any repository call, so that a bad
//! payload never reaches the store. Rejections carry the fixed messages the
//! frontend matches on.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::db::repository::{TEXT_AND_DATE_REQUIRED, VALID_PERCENTAGE_REQUIRED};
use crate::error::{AppError, AppResult};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Standard success message response
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// POST /api/todos
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTodoRequest {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub text: String,

    /// Calendar day as `YYYY-MM-DD`
    #[serde(default)]
    #[validate(length(min = 1))]
    pub date: String,
}

impl CreateTodoRequest {
    pub fn into_parts(self) -> AppResult<(String, NaiveDate)> {
        if self.validate().is_err() || self.text.trim().is_empty() {
            return Err(AppError::Validation(TEXT_AND_DATE_REQUIRED.into()));
        }
        let date = parse_date(&self.date)?;
        Ok((self.text, date))
    }
}

/// PUT /api/todos/:id/complete
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CompleteTodoRequest {
    #[validate(range(min = 0, max = 100))]
    pub completion_percentage: Option<i32>,

    pub reason: Option<String>,
}

impl CompleteTodoRequest {
    pub fn completion_percentage(&self) -> AppResult<i32> {
        match self.completion_percentage {
            Some(percentage) if self.validate().is_ok() => Ok(percentage),
            _ => Err(AppError::Validation(VALID_PERCENTAGE_REQUIRED.into())),
        }
    }
}

pub fn parse_date(raw: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| AppError::Validation("Invalid date".into()))
}

pub fn parse_id(raw: &str) -> AppResult<i64> {
    raw.parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::Validation("Invalid todo id".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(text: &str, date: &str) -> CreateTodoRequest {
        CreateTodoRequest {
            text: text.into(),
            date: date.into(),
        }
    }

    fn complete(percentage: Option<i32>) -> CompleteTodoRequest {
        CompleteTodoRequest {
            completion_percentage: percentage,
            reason: None,
        }
    }

    #[test]
    fn create_request_parses_date() {
        let (text, date) = create("Buy milk", "2024-01-01").into_parts().unwrap();
        assert_eq!(text, "Buy milk");
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn create_request_requires_text_and_date() {
        for (text, date) in [("", "2024-01-01"), ("  ", "2024-01-01"), ("Buy milk", "")] {
            let err = create(text, date).into_parts().unwrap_err();
            assert_eq!(err.to_string(), TEXT_AND_DATE_REQUIRED);
        }
    }

    #[test]
    fn create_request_rejects_bad_dates() {
        for date in ["tomorrow", "2024-02-30", "01/01/2024"] {
            let err = create("Buy milk", date).into_parts().unwrap_err();
            assert_eq!(err.to_string(), "Invalid date");
        }
    }

    #[test]
    fn missing_fields_deserialize_as_empty() {
        let body: CreateTodoRequest = serde_json::from_str(r#"{"text":"Buy milk"}"#).unwrap();
        assert!(body.into_parts().is_err());
    }

    #[test]
    fn completion_percentage_must_be_present_and_in_range() {
        assert_eq!(complete(Some(0)).completion_percentage().unwrap(), 0);
        assert_eq!(complete(Some(100)).completion_percentage().unwrap(), 100);

        for percentage in [None, Some(-1), Some(101)] {
            let err = complete(percentage).completion_percentage().unwrap_err();
            assert_eq!(err.to_string(), VALID_PERCENTAGE_REQUIRED);
        }
    }

    #[test]
    fn complete_request_reads_camel_case() {
        let body: CompleteTodoRequest =
            serde_json::from_str(r#"{"completionPercentage":75,"reason":"tired"}"#).unwrap();
        assert_eq!(body.completion_percentage, Some(75));
        assert_eq!(body.reason.as_deref(), Some("tired"));
    }

    #[test]
    fn ids_must_be_positive_integers() {
        assert_eq!(parse_id("12").unwrap(), 12);
        for raw in ["0", "-3", "abc", "1.5"] {
            assert!(parse_id(raw).is_err());
        }
    }
}
