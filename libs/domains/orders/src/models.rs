use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Order entity - one customer's purchase on a given date, together
/// with the ids of the products it contains
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Order {
    /// Unique identifier
    pub id: i64,
    /// Purchase date
    pub date: NaiveDate,
    /// Customer who placed the order
    pub customer_id: i64,
    /// Products contained in the order
    pub product_ids: Vec<i64>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// DTO for placing a new order
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateOrder {
    pub date: NaiveDate,
    #[validate(range(min = 1))]
    pub customer_id: i64,
    /// Ids of the products in the order; every id must exist
    #[serde(default)]
    pub product_ids: Vec<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_date_uses_iso_format_on_the_wire() {
        let order = Order {
            id: 1,
            date: NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
            customer_id: 2,
            product_ids: vec![3, 4],
            created_at: Utc::now(),
        };

        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(value["date"], "2025-08-01");
        assert_eq!(value["product_ids"], serde_json::json!([3, 4]));
    }

    #[test]
    fn product_ids_default_to_empty() {
        let input: CreateOrder =
            serde_json::from_str(r#"{"date": "2025-08-01", "customer_id": 1}"#).unwrap();
        assert!(input.product_ids.is_empty());
    }
}
