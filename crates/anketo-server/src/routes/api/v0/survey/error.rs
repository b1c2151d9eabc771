use axum::response::{IntoResponse, Response};
use http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum SurveyError {
    #[error("survey was not found")]
    SurveyNotFound,
    #[error("category was not found")]
    CategoryNotFound,
    #[error("category number {0} is out of range")]
    CategoryNumberOutOfRange(i32),
    #[error("question {question} references unknown category {category}")]
    UnknownCategory { question: i32, category: i64 },
    #[error("duplicate question number {0}")]
    DuplicateQuestionNumber(i32),
    #[error("invalid survey window: {0}")]
    InvalidWindow(#[from] anketo_utils::date::error::DateError),
    #[error("an invalid answer was submitted for question {0}")]
    InvalidAnswer(i32),
    #[error("rating {value} for question {question} is outside the scale {min}-{max}")]
    RatingOutOfRange {
        question: i32,
        value: i32,
        min: i32,
        max: i32,
    },
    #[error("survey is no longer accepting responses")]
    SurveyClosed,
    #[error(transparent)]
    Db(#[from] anketo_db::sea_orm::DbErr),
}

impl IntoResponse for SurveyError {
    fn into_response(self) -> Response {
        match self {
            Self::SurveyNotFound | Self::CategoryNotFound => StatusCode::NOT_FOUND.into_response(),
            Self::SurveyClosed => (StatusCode::CONFLICT, self.to_string()).into_response(),
            Self::CategoryNumberOutOfRange(_)
            | Self::UnknownCategory { .. }
            | Self::DuplicateQuestionNumber(_)
            | Self::InvalidWindow(_)
            | Self::InvalidAnswer(_)
            | Self::RatingOutOfRange { .. } => (StatusCode::BAD_REQUEST, self.to_string()).into_response(),
            Self::Db(error) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Database error: {error}")).into_response(),
        }
    }
}
