use super::QuestionType;
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;

/// The nested document a survey is created from. Every section is optional;
/// ingestion fills the same defaults the legacy importer used.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct SurveyUpload {
    #[serde(default)]
    pub metadata: MetadataUpload,
    #[serde(default)]
    pub question_categories: Vec<CategoryUpload>,
    #[serde(default)]
    pub questions: Vec<QuestionUpload>,
    #[serde(default)]
    pub key_choice: Vec<KeyChoiceUpload>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct MetadataUpload {
    pub title: Option<String>,
    pub instructions: Option<String>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub version: Option<String>,
    pub language: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CategoryUpload {
    /// Document-local id the questions reference.
    pub id: i64,
    pub name: Option<String>,
    pub cat_number: Option<i32>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct QuestionUpload {
    /// Question number; defaults to the position in the document.
    pub id: Option<i32>,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub question: String,
    pub label: Option<String>,
    pub category: i64,
    #[serde(default)]
    pub options: Vec<OptionUpload>,
    pub scale: Option<String>,
    pub placeholder: Option<String>,
}

/// Options come either as a bare label or as a full object.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum OptionUpload {
    Inline(String),
    Detailed(OptionDetail),
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct OptionDetail {
    pub id: Option<i32>,
    pub value: Option<String>,
    pub label: Option<String>,
    pub text: Option<String>,
    #[serde(default)]
    pub is_other: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct KeyChoiceUpload {
    pub key: String,
    pub description: String,
}

/// Admin request bodies for category maintenance.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CategoryCreate {
    pub name: String,
    pub cat_number: Option<i32>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub cat_number: Option<i32>,
}
