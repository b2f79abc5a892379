use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Customer entity - contact details for a store customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Customer {
    /// Unique identifier
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new customer
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCustomer {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(email, length(max = 320))]
    pub email: String,
    #[validate(length(min = 1, max = 15))]
    pub phone: String,
}

/// DTO for replacing a customer's details
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateCustomer {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(email, length(max = 320))]
    pub email: String,
    #[validate(length(min = 1, max = 15))]
    pub phone: String,
}

/// Customer account as exposed on the API; the password hash is not
/// part of this type and is therefore never serialized
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CustomerAccount {
    /// Unique identifier
    pub id: i64,
    pub username: String,
    /// Owning customer
    pub customer_id: i64,
}

/// DTO for creating a customer account
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCustomerAccount {
    #[validate(length(min = 1, max = 255))]
    pub username: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    #[validate(range(min = 1))]
    pub customer_id: i64,
}

/// DTO for replacing an account's credentials
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateCustomerAccount {
    #[validate(length(min = 1, max = 255))]
    pub username: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

/// Repository-facing input for account creation; the service has
/// already hashed the password at this point
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub password_hash: String,
    pub customer_id: i64,
}

/// Repository-facing input for account replacement
#[derive(Debug, Clone)]
pub struct AccountChanges {
    pub username: String,
    pub password_hash: String,
}

impl Customer {
    /// Create a new customer from CreateCustomer DTO with an assigned id
    pub fn new(id: i64, input: CreateCustomer) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: input.name,
            email: input.email,
            phone: input.phone,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace all mutable fields from UpdateCustomer DTO
    pub fn apply_update(&mut self, update: UpdateCustomer) {
        self.name = update.name;
        self.email = update.email;
        self.phone = update.phone;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_serialization_has_no_password_field() {
        let account = CustomerAccount {
            id: 1,
            username: "alice".to_string(),
            customer_id: 2,
        };

        let value = serde_json::to_value(&account).unwrap();
        let object = value.as_object().unwrap();
        assert!(!object.keys().any(|k| k.contains("password")));
    }

    #[test]
    fn invalid_email_fails_validation() {
        let input = CreateCustomer {
            name: "Alice".to_string(),
            email: "not-an-email".to_string(),
            phone: "555-0100".to_string(),
        };

        assert!(input.validate().is_err());
    }

    #[test]
    fn short_password_fails_validation() {
        let input = CreateCustomerAccount {
            username: "alice".to_string(),
            password: "short".to_string(),
            customer_id: 1,
        };

        assert!(input.validate().is_err());
    }
}
