use anketo_entity::{answer, answer_option, response};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait,
};
use std::error::Error;
use uuid::Uuid;

pub struct Query;

impl Query {
    pub async fn load_responses<C: ConnectionTrait>(conn: &C, survey_id: Uuid) -> Result<Vec<response::Model>, DbErr> {
        response::Entity::find()
            .filter(response::Column::SurveyId.eq(survey_id))
            .order_by_asc(response::Column::SubmittedAt)
            .all(conn)
            .await
            .inspect_err(
                |error| tracing::error!(error = error as &dyn Error, %survey_id, "failed to load responses"),
            )
    }

    pub async fn count_responses<C: ConnectionTrait>(conn: &C, survey_id: Uuid) -> Result<u64, DbErr> {
        response::Entity::find()
            .filter(response::Column::SurveyId.eq(survey_id))
            .count(conn)
            .await
            .inspect_err(
                |error| tracing::error!(error = error as &dyn Error, %survey_id, "failed to count responses"),
            )
    }

    /// Every answer belonging to the survey, joined through its response.
    pub async fn load_answers_for_survey<C: ConnectionTrait>(
        conn: &C,
        survey_id: Uuid,
    ) -> Result<Vec<answer::Model>, DbErr> {
        answer::Entity::find()
            .join(JoinType::InnerJoin, answer::Relation::Response.def())
            .filter(response::Column::SurveyId.eq(survey_id))
            .all(conn)
            .await
            .inspect_err(
                |error| tracing::error!(error = error as &dyn Error, %survey_id, "failed to load survey answers"),
            )
    }

    /// The selected-option links of the given answers, grouped by the caller.
    pub async fn load_selections<C: ConnectionTrait>(
        conn: &C,
        answer_ids: &[Uuid],
    ) -> Result<Vec<answer_option::Model>, DbErr> {
        if answer_ids.is_empty() {
            return Ok(Vec::new());
        }
        answer_option::Entity::find()
            .filter(answer_option::Column::AnswerId.is_in(answer_ids.iter().copied()))
            .all(conn)
            .await
            .inspect_err(|error| tracing::error!(error = error as &dyn Error, "failed to load answer selections"))
    }
}
