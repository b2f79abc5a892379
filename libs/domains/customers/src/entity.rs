//! Sea-ORM entities owned by the customers domain.

/// Entity for the customers table
pub mod customer {
    use sea_orm::ActiveValue::{NotSet, Set};
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "customers")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,
        pub name: String,
        pub email: String,
        pub phone: String,
        pub created_at: DateTimeWithTimeZone,
        pub updated_at: DateTimeWithTimeZone,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::account::Entity")]
        Account,
    }

    impl Related<super::account::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Account.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}

    impl From<Model> for crate::models::Customer {
        fn from(model: Model) -> Self {
            Self {
                id: model.id,
                name: model.name,
                email: model.email,
                phone: model.phone,
                created_at: model.created_at.into(),
                updated_at: model.updated_at.into(),
            }
        }
    }

    impl From<crate::models::CreateCustomer> for ActiveModel {
        fn from(input: crate::models::CreateCustomer) -> Self {
            let now = chrono::Utc::now();
            ActiveModel {
                id: NotSet,
                name: Set(input.name),
                email: Set(input.email),
                phone: Set(input.phone),
                created_at: Set(now.into()),
                updated_at: Set(now.into()),
            }
        }
    }
}

/// Entity for the customer_accounts table
pub mod account {
    use sea_orm::ActiveValue::{NotSet, Set};
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "customer_accounts")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,
        pub username: String,
        pub password_hash: String,
        pub customer_id: i64,
        pub created_at: DateTimeWithTimeZone,
        pub updated_at: DateTimeWithTimeZone,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::customer::Entity",
            from = "Column::CustomerId",
            to = "super::customer::Column::Id"
        )]
        Customer,
    }

    impl Related<super::customer::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Customer.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}

    // The password hash stays behind; the API type has no field for it
    impl From<Model> for crate::models::CustomerAccount {
        fn from(model: Model) -> Self {
            Self {
                id: model.id,
                username: model.username,
                customer_id: model.customer_id,
            }
        }
    }

    impl From<crate::models::NewAccount> for ActiveModel {
        fn from(input: crate::models::NewAccount) -> Self {
            let now = chrono::Utc::now();
            ActiveModel {
                id: NotSet,
                username: Set(input.username),
                password_hash: Set(input.password_hash),
                customer_id: Set(input.customer_id),
                created_at: Set(now.into()),
                updated_at: Set(now.into()),
            }
        }
    }
}
