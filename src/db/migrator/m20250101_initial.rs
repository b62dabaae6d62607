use crate::entities::prelude::*;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{EntityTrait, Schema};

#[derive(DeriveMigrationName)]
pub struct Migration;

async fn create<E: EntityTrait>(
    manager: &SchemaManager<'_>,
    schema: &Schema,
    entity: E,
) -> Result<(), DbErr> {
    manager
        .create_table(
            schema
                .create_table_from_entity(entity)
                .if_not_exists()
                .to_owned(),
        )
        .await
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        // Referenced tables first so foreign keys resolve.
        create(manager, &schema, Users).await?;
        create(manager, &schema, Officers).await?;
        create(manager, &schema, IssueStatuses).await?;
        create(manager, &schema, Issues).await?;
        create(manager, &schema, IssueStatusHistory).await?;
        create(manager, &schema, Comments).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Comments).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(IssueStatusHistory).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Issues).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(IssueStatuses).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Officers).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users).to_owned())
            .await?;

        Ok(())
    }
}
