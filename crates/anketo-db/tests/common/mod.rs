pub mod survey;

use sea_orm::{ConnectionTrait, DbConn, DbErr};

pub async fn setup_schema(db: &DbConn) -> Result<(), DbErr> {
    let migration = match db.get_database_backend() {
        sea_orm::DatabaseBackend::Sqlite => include_str!("sqlite.sql"),
        #[allow(clippy::unimplemented)]
        _ => unimplemented!(),
    };

    db.execute_unprepared(migration).await?;
    Ok(())
}
