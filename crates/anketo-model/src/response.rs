use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// One submission: a list of answers keyed by question number.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
#[schema(example = json!({"answers": [{"question": 1, "rating": 4}]}))]
pub struct ResponseUpload {
    pub answers: Vec<AnswerUpload>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct AnswerUpload {
    /// The question number from the survey document.
    pub question: i32,
    pub rating: Option<i32>,
    pub number: Option<f64>,
    pub text: Option<String>,
    #[serde(default)]
    pub selected_options: Vec<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubmissionReceipt {
    pub response_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ResponseRecord {
    pub id: Uuid,
    pub submitted_at: DateTime<Utc>,
    pub answers: Vec<AnswerRecord>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AnswerRecord {
    pub question: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub selected_options: Vec<Uuid>,
}
