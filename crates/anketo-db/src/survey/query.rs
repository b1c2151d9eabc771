use anketo_entity::{key_choice, survey};
use chrono::NaiveDateTime;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};
use std::error::Error;
use uuid::Uuid;

pub struct Query;

impl Query {
    pub async fn load_survey<C: ConnectionTrait>(conn: &C, survey_id: Uuid) -> Result<Option<survey::Model>, DbErr> {
        survey::Entity::find_by_id(survey_id)
            .one(conn)
            .await
            .inspect_err(|error| tracing::error!(error = error as &dyn Error, %survey_id, "failed to load survey"))
    }

    /// Surveys in creation order. `language` filters by exact tag; unless
    /// `include_inactive` is set, surveys whose `end_time` has passed are
    /// dropped.
    pub async fn load_surveys<C: ConnectionTrait>(
        conn: &C,
        language: Option<&str>,
        include_inactive: bool,
        now: NaiveDateTime,
    ) -> Result<Vec<survey::Model>, DbErr> {
        let mut query = survey::Entity::find();
        if let Some(language) = language {
            query = query.filter(survey::Column::Language.eq(language));
        }
        if !include_inactive {
            query = query.filter(survey::Column::EndTime.gte(now));
        }
        query
            .order_by_asc(survey::Column::CreatedAt)
            .all(conn)
            .await
            .inspect_err(|error| tracing::error!(error = error as &dyn Error, "failed to load surveys"))
    }

    pub async fn load_key_choices<C: ConnectionTrait>(
        conn: &C,
        survey_id: Uuid,
    ) -> Result<Vec<key_choice::Model>, DbErr> {
        key_choice::Entity::find()
            .filter(key_choice::Column::SurveyId.eq(survey_id))
            .order_by_asc(key_choice::Column::Key)
            .all(conn)
            .await
            .inspect_err(
                |error| tracing::error!(error = error as &dyn Error, %survey_id, "failed to load key choices"),
            )
    }
}
