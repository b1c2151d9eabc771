use anketo_entity::category;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};
use std::error::Error;
use uuid::Uuid;

pub struct Query;

impl Query {
    /// Categories of one survey in `cat_number` order.
    pub async fn load_categories<C: ConnectionTrait>(
        conn: &C,
        survey_id: Uuid,
    ) -> Result<Vec<category::Model>, DbErr> {
        category::Entity::find()
            .filter(category::Column::SurveyId.eq(survey_id))
            .order_by_asc(category::Column::CatNumber)
            .all(conn)
            .await
            .inspect_err(
                |error| tracing::error!(error = error as &dyn Error, %survey_id, "failed to load categories"),
            )
    }

    pub async fn load_category<C: ConnectionTrait>(
        conn: &C,
        survey_id: Uuid,
        category_id: Uuid,
    ) -> Result<Option<category::Model>, DbErr> {
        category::Entity::find()
            .filter(category::Column::SurveyId.eq(survey_id))
            .filter(category::Column::Id.eq(category_id))
            .one(conn)
            .await
            .inspect_err(
                |error| tracing::error!(error = error as &dyn Error, %category_id, "failed to load category"),
            )
    }
}
