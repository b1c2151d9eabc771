use crate::convert::{FromDbModel, FromModel};
use anketo_entity::question::QuestionType as QuestionTypeDb;
use anketo_model::survey::QuestionType;

impl FromDbModel<QuestionTypeDb> for QuestionType {
    fn from_db_model(model: QuestionTypeDb) -> Self {
        match model {
            QuestionTypeDb::SingleChoice => Self::SingleChoice,
            QuestionTypeDb::MultiSelect => Self::MultiSelect,
            QuestionTypeDb::Rating => Self::Rating,
            QuestionTypeDb::Number => Self::Number,
            QuestionTypeDb::Text => Self::Text,
        }
    }
}

impl FromModel<QuestionType> for QuestionTypeDb {
    fn from_model(model: QuestionType) -> Self {
        match model {
            QuestionType::SingleChoice => Self::SingleChoice,
            QuestionType::MultiSelect => Self::MultiSelect,
            QuestionType::Rating => Self::Rating,
            QuestionType::Number => Self::Number,
            QuestionType::Text => Self::Text,
        }
    }
}
