use crate::survey::QuestionType;
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Descriptive statistics over every stored response of one survey.
#[derive(Debug, Serialize, ToSchema)]
pub struct SurveyAnalysis {
    pub total_responses: u64,
    /// Rating key legend, `key` to display description.
    pub key_choices: IndexMap<String, String>,
    /// Per-category blocks in `cat_number` order, keyed by category name.
    pub by_category: IndexMap<String, CategoryAnalysis>,
    /// Answered responses / total responses, per question label.
    pub completion_rate: IndexMap<String, f64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryAnalysis {
    pub questions: Vec<QuestionAnalysis>,
    /// Mean of the category's per-question rating averages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_rating: Option<f64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QuestionAnalysis {
    pub id: i32,
    pub text: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    #[serde(flatten)]
    pub stats: QuestionStats,
}

/// Per-type tabulation block, flattened into the question object.
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum QuestionStats {
    Rating {
        avg_rating: f64,
        total_answers: u64,
        /// A count for every point of the question's scale, zeros included.
        rating_distribution: BTreeMap<i32, u64>,
    },
    Choice {
        selection_counts: IndexMap<String, u64>,
        total_responded: u64,
    },
    Number {
        avg_value: f64,
        total_answers: u64,
    },
    Text {
        total_answers: u64,
    },
}
