use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use validator::{Validate, ValidationError};

/// A customer record as persisted by the repository.
///
/// Field names serialize in PascalCase (`Id`, `FirstName`, ...) to match the
/// stored table layout and the CSV interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "PascalCase")]
pub struct Customer {
    #[validate(range(min = 1, message = "Id is required."))]
    pub id: i32,
    #[validate(custom(function = "validate_first_name"))]
    pub first_name: String,
    #[validate(custom(function = "validate_last_name"))]
    pub last_name: String,
    #[validate(range(min = 19, message = "Age must be greater than 18."))]
    pub age: i32,
}

impl Customer {
    pub fn new(id: i32, first_name: &str, last_name: &str, age: i32) -> Self {
        Self {
            id,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            age,
        }
    }

    /// Total order used for the stored collection: last name, then first name,
    /// both compared ordinally (case-sensitive).
    pub fn name_order(&self, other: &Self) -> Ordering {
        self.last_name
            .cmp(&other.last_name)
            .then_with(|| self.first_name.cmp(&other.first_name))
    }
}

fn validate_first_name(value: &str) -> Result<(), ValidationError> {
    required(value, "First Name is required.")
}

fn validate_last_name(value: &str) -> Result<(), ValidationError> {
    required(value, "Last Name is required.")
}

fn required(value: &str, message: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("required");
        error.message = Some(message.into());
        return Err(error);
    }
    Ok(())
}

/// Sorts customers in place by [`Customer::name_order`].
///
/// The sort is stable, so customers with identical names keep their relative
/// order (existing rows before newly accepted ones).
pub fn sort_by_name(customers: &mut [Customer]) {
    customers.sort_by(Customer::name_order);
}
