use super::customer::Customer;
use crate::error::{Result, ServiceError};
use serde::{Deserialize, Serialize};

/// Optional criteria for listing customers. Absent fields impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomerFilters {
    pub id: Option<i32>,
    /// Case-insensitive substring of the first or last name.
    pub name: Option<String>,
    pub age: Option<i32>,
}

impl CustomerFilters {
    pub fn by_id(id: i32) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    pub fn by_name(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Self::default()
        }
    }

    pub fn by_age(age: i32) -> Self {
        Self {
            age: Some(age),
            ..Self::default()
        }
    }

    /// Rejects filters no stored customer could ever satisfy by construction.
    pub fn validate(&self) -> Result<()> {
        if let Some(age) = self.age
            && age < 0
        {
            return Err(ServiceError::InvalidArgument(format!(
                "age filter must not be negative, got {age}"
            )));
        }
        Ok(())
    }

    /// Deterministic cache key: equal field values always produce the same key.
    pub fn cache_key(&self) -> String {
        format!(
            "CustomerFiltersKey: Id:{} Name:{} Age:{}",
            self.id.map(|id| id.to_string()).unwrap_or_default(),
            self.name_term().unwrap_or_default(),
            self.age.map(|age| age.to_string()).unwrap_or_default(),
        )
    }

    /// Conjunction of every present criterion.
    pub fn matches(&self, customer: &Customer) -> bool {
        if let Some(id) = self.id
            && customer.id != id
        {
            return false;
        }

        if let Some(term) = self.name_term() {
            let term = term.to_lowercase();
            if !customer.first_name.to_lowercase().contains(&term)
                && !customer.last_name.to_lowercase().contains(&term)
            {
                return false;
            }
        }

        if let Some(age) = self.age
            && customer.age != age
        {
            return false;
        }

        true
    }

    fn name_term(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }
}
