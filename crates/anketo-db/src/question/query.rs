use anketo_entity::{question, question_option};
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};
use std::error::Error;
use uuid::Uuid;

pub struct Query;

impl Query {
    /// Questions of one survey in `question_number` order.
    pub async fn load_questions<C: ConnectionTrait>(conn: &C, survey_id: Uuid) -> Result<Vec<question::Model>, DbErr> {
        question::Entity::find()
            .filter(question::Column::SurveyId.eq(survey_id))
            .order_by_asc(question::Column::QuestionNumber)
            .all(conn)
            .await
            .inspect_err(
                |error| tracing::error!(error = error as &dyn Error, %survey_id, "failed to load questions"),
            )
    }

    /// All options of the given questions, grouped by the caller.
    pub async fn load_options<C: ConnectionTrait>(
        conn: &C,
        question_ids: &[Uuid],
    ) -> Result<Vec<question_option::Model>, DbErr> {
        if question_ids.is_empty() {
            return Ok(Vec::new());
        }
        question_option::Entity::find()
            .filter(question_option::Column::QuestionId.is_in(question_ids.iter().copied()))
            .order_by_asc(question_option::Column::OptionNumber)
            .all(conn)
            .await
            .inspect_err(|error| tracing::error!(error = error as &dyn Error, "failed to load question options"))
    }
}
