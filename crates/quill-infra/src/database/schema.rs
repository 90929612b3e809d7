//! Initial table creation from the entity definitions.

use sea_orm::{ConnectionTrait, DbConn, DbErr, EntityTrait, Schema};

use super::entity;

/// Create the `categories` and `posts` tables if they do not exist yet.
///
/// Categories go first so the posts foreign key has a target.
pub async fn create_schema(db: &DbConn) -> Result<(), DbErr> {
    create_table(db, entity::Category).await?;
    create_table(db, entity::Post).await?;
    tracing::info!("Database schema ready");
    Ok(())
}

async fn create_table<E>(db: &DbConn, entity: E) -> Result<(), DbErr>
where
    E: EntityTrait,
{
    let backend = db.get_database_backend();
    let mut statement = Schema::new(backend).create_table_from_entity(entity);
    statement.if_not_exists();

    db.execute(backend.build(&statement)).await?;
    tracing::debug!(table = entity.table_name(), "Table ensured");
    Ok(())
}
