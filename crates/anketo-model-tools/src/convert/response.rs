use crate::convert::FromDbModel;
use anketo_entity::{answer, response};
use anketo_model::response::{AnswerRecord, ResponseRecord};
use std::collections::HashMap;
use uuid::Uuid;

/// One stored response with its answers and their selected option ids.
/// `question_numbers` maps question rows back to the document numbering.
pub struct ResponseRows {
    pub response: response::Model,
    pub answers: Vec<(answer::Model, Vec<Uuid>)>,
    pub question_numbers: HashMap<Uuid, i32>,
}

impl FromDbModel<ResponseRows> for ResponseRecord {
    fn from_db_model(rows: ResponseRows) -> Self {
        let ResponseRows {
            response,
            answers,
            question_numbers,
        } = rows;
        Self {
            id: response.id,
            submitted_at: response.submitted_at.and_utc(),
            answers: answers
                .into_iter()
                .filter_map(|(answer, selected_options)| {
                    let question = question_numbers.get(&answer.question_id).copied()?;
                    Some(AnswerRecord {
                        question,
                        rating: answer.rating_value,
                        number: answer.number_value,
                        text: answer.text_value,
                        selected_options,
                    })
                })
                .collect(),
        }
    }
}
