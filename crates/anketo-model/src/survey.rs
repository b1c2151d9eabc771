use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

pub mod upload;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, strum::Display, strum::IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum QuestionType {
    SingleChoice,
    MultiSelect,
    Rating,
    Number,
    Text,
}

/// A survey as served to clients: the same nested shape ingestion accepts,
/// with generated ids and the derived `is_active` flag.
#[derive(Debug, Serialize, ToSchema)]
pub struct SurveyDocument {
    pub id: Uuid,
    pub is_active: bool,
    pub metadata: SurveyMetadata,
    pub questions: Vec<Question>,
    pub key_choice: Vec<KeyChoice>,
    pub question_categories: Vec<QuestionCategory>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SurveyMetadata {
    pub title: String,
    pub instructions: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub version: String,
    pub language: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Question {
    /// The document-assigned question number, unique within the survey.
    pub id: i32,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub question: String,
    pub label: String,
    pub category: Uuid,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub options: Vec<QuestionOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QuestionOption {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub is_other: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct KeyChoice {
    pub key: String,
    pub description: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QuestionCategory {
    pub id: Uuid,
    pub cat_number: i32,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_serialization_omits_null_fields() {
        let option = QuestionOption {
            id: Uuid::nil(),
            value: None,
            label: "Yes".to_owned(),
            text: None,
            is_other: false,
        };
        let json = serde_json::to_value(&option).unwrap();
        let object = json.as_object().unwrap();
        assert!(!object.contains_key("value"));
        assert!(!object.contains_key("text"));
        assert_eq!(object["label"], "Yes");
        assert_eq!(object["is_other"], false);
    }

    #[test]
    fn test_question_type_wire_names() {
        assert_eq!(
            serde_json::to_value(QuestionType::SingleChoice).unwrap(),
            "single_choice"
        );
        assert_eq!(serde_json::to_value(QuestionType::MultiSelect).unwrap(), "multi_select");
        let parsed: QuestionType = serde_json::from_str("\"rating\"").unwrap();
        assert_eq!(parsed, QuestionType::Rating);
    }
}
