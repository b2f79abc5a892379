//! Sea-ORM entities owned by the orders domain.

/// Entity for the orders table
pub mod order {
    use sea_orm::ActiveValue::{NotSet, Set};
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "orders")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,
        pub date: Date,
        pub customer_id: i64,
        pub created_at: DateTimeWithTimeZone,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::order_product::Entity")]
        OrderProduct,
    }

    impl Related<super::order_product::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::OrderProduct.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}

    impl Model {
        /// Pair the row with its join rows to build the domain order
        pub fn into_order(self, product_ids: Vec<i64>) -> crate::models::Order {
            crate::models::Order {
                id: self.id,
                date: self.date,
                customer_id: self.customer_id,
                product_ids,
                created_at: self.created_at.into(),
            }
        }
    }

    impl From<&crate::models::CreateOrder> for ActiveModel {
        fn from(input: &crate::models::CreateOrder) -> Self {
            ActiveModel {
                id: NotSet,
                date: Set(input.date),
                customer_id: Set(input.customer_id),
                created_at: Set(chrono::Utc::now().into()),
            }
        }
    }
}

/// Entity for the order_products join table
pub mod order_product {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "order_products")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub order_id: i64,
        #[sea_orm(primary_key, auto_increment = false)]
        pub product_id: i64,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::order::Entity",
            from = "Column::OrderId",
            to = "super::order::Column::Id"
        )]
        Order,
    }

    impl Related<super::order::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Order.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}
