use crate::convert::{FromDbModel, IntoModel};
use anketo_entity::{category, key_choice, question, question_option, survey};
use anketo_model::survey::{KeyChoice, Question, QuestionCategory, QuestionOption, SurveyDocument, SurveyMetadata};
use chrono::NaiveDateTime;

/// Everything needed to assemble one survey document. `now` is passed in so
/// the derived `is_active` flag stays deterministic for callers and tests.
pub struct SurveyRows {
    pub survey: survey::Model,
    pub categories: Vec<category::Model>,
    pub key_choices: Vec<key_choice::Model>,
    pub questions: Vec<(question::Model, Vec<question_option::Model>)>,
    pub now: NaiveDateTime,
}

impl FromDbModel<SurveyRows> for SurveyDocument {
    fn from_db_model(rows: SurveyRows) -> Self {
        let SurveyRows {
            survey,
            categories,
            key_choices,
            questions,
            now,
        } = rows;
        Self {
            id: survey.id,
            is_active: now <= survey.end_time,
            metadata: SurveyMetadata {
                title: survey.title,
                instructions: survey.instructions,
                start: survey.start_time.date(),
                end: survey.end_time.date(),
                version: survey.version,
                language: survey.language,
            },
            questions: questions
                .into_iter()
                .map(|(question, options)| Question {
                    id: question.question_number,
                    question_type: question.question_type.into_model(),
                    question: question.question_text,
                    label: question.question_label,
                    category: question.category_id,
                    options: options.into_iter().map(IntoModel::into_model).collect(),
                    scale: question.scale,
                    placeholder: question.placeholder,
                })
                .collect(),
            key_choice: key_choices.into_iter().map(IntoModel::into_model).collect(),
            question_categories: categories.into_iter().map(IntoModel::into_model).collect(),
        }
    }
}

impl FromDbModel<question_option::Model> for QuestionOption {
    fn from_db_model(model: question_option::Model) -> Self {
        Self {
            id: model.id,
            value: model.value,
            label: model.label,
            text: model.text,
            is_other: model.is_other,
        }
    }
}

impl FromDbModel<key_choice::Model> for KeyChoice {
    fn from_db_model(model: key_choice::Model) -> Self {
        Self {
            key: model.key,
            description: model.description,
        }
    }
}

impl FromDbModel<category::Model> for QuestionCategory {
    fn from_db_model(model: category::Model) -> Self {
        Self {
            id: model.id,
            cat_number: model.cat_number,
            name: model.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn survey_model(end_time: &str) -> survey::Model {
        survey::Model {
            id: Uuid::new_v4(),
            title: "Developer Experience".to_owned(),
            instructions: String::new(),
            version: "1.0".to_owned(),
            language: "en".to_owned(),
            start_time: "2026-03-01T00:00:00".parse().unwrap(),
            end_time: end_time.parse().unwrap(),
            created_at: "2026-02-01T08:00:00".parse().unwrap(),
            updated_at: "2026-02-01T08:00:00".parse().unwrap(),
        }
    }

    fn document(end_time: &str, now: &str) -> SurveyDocument {
        SurveyRows {
            survey: survey_model(end_time),
            categories: Vec::new(),
            key_choices: Vec::new(),
            questions: Vec::new(),
            now: now.parse().unwrap(),
        }
        .into_model()
    }

    #[test]
    fn test_is_active_follows_end_time() {
        assert!(document("2026-03-31T23:59:59", "2026-03-15T12:00:00").is_active);
        assert!(!document("2026-03-31T23:59:59", "2026-04-01T00:00:00").is_active);
        // the closing second itself still counts
        assert!(document("2026-03-31T23:59:59", "2026-03-31T23:59:59").is_active);
    }

    #[test]
    fn test_metadata_uses_calendar_dates() {
        let document = document("2026-03-31T23:59:59", "2026-03-15T12:00:00");
        assert_eq!(document.metadata.start.to_string(), "2026-03-01");
        assert_eq!(document.metadata.end.to_string(), "2026-03-31");
        assert_eq!(document.metadata.version, "1.0");
    }
}
