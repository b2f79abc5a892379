use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CustomerAccounts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CustomerAccounts::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string(CustomerAccounts::Username))
                    .col(string(CustomerAccounts::PasswordHash))
                    .col(big_integer(CustomerAccounts::CustomerId))
                    .col(
                        timestamp_with_time_zone(CustomerAccounts::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(CustomerAccounts::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_customer_accounts_customer_id")
                            .from(CustomerAccounts::Table, CustomerAccounts::CustomerId)
                            .to(Customers::Table, Customers::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_customer_accounts_username")
                    .table(CustomerAccounts::Table)
                    .col(CustomerAccounts::Username)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // One account per customer
        manager
            .create_index(
                Index::create()
                    .name("idx_customer_accounts_customer_id")
                    .table(CustomerAccounts::Table)
                    .col(CustomerAccounts::CustomerId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CustomerAccounts::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum CustomerAccounts {
    Table,
    Id,
    Username,
    PasswordHash,
    CustomerId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Customers {
    Table,
    Id,
}
