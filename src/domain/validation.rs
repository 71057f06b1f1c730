use super::customer::Customer;
use super::notification::Notification;
use validator::Validate;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl From<FieldError> for Notification {
    fn from(error: FieldError) -> Self {
        Notification::new(error.field, error.message)
    }
}

/// Validation collaborator consulted for every write candidate.
///
/// An empty result means the candidate is valid.
pub trait CustomerValidator: Send + Sync {
    fn validate(&self, candidate: &Customer) -> Vec<FieldError>;
}

pub type CustomerValidatorBox = Box<dyn CustomerValidator>;

/// Rule declaration order, paired with the serialized name of each field.
const FIELD_ORDER: [(&str, &str); 4] = [
    ("id", "Id"),
    ("first_name", "FirstName"),
    ("last_name", "LastName"),
    ("age", "Age"),
];

fn field_rank(field: &str) -> (usize, &str) {
    FIELD_ORDER
        .iter()
        .enumerate()
        .find(|(_, (name, _))| *name == field)
        .map(|(rank, (_, column))| (rank, *column))
        .unwrap_or((FIELD_ORDER.len(), field))
}

/// Applies the rules declared on [`Customer`] through `validator`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeclarativeCustomerValidator;

impl CustomerValidator for DeclarativeCustomerValidator {
    fn validate(&self, candidate: &Customer) -> Vec<FieldError> {
        let Err(errors) = candidate.validate() else {
            return Vec::new();
        };

        let mut ranked: Vec<(usize, FieldError)> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                let (rank, column) = field_rank(field);
                let column = column.to_string();
                errors.iter().map(move |error| {
                    let message = error
                        .message
                        .as_ref()
                        .map(|message| message.to_string())
                        .unwrap_or_else(|| error.code.to_string());
                    (
                        rank,
                        FieldError {
                            field: column.clone(),
                            message,
                        },
                    )
                })
            })
            .collect();

        // field_errors() is unordered; report in rule declaration order.
        ranked.sort_by_key(|(rank, _)| *rank);
        ranked.into_iter().map(|(_, error)| error).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_candidate_has_no_errors() {
        let validator = DeclarativeCustomerValidator;
        assert!(validator.validate(&Customer::new(1, "Joel", "Drew", 25)).is_empty());
    }

    #[test]
    fn test_every_field_error_reported() {
        let validator = DeclarativeCustomerValidator;
        let errors = validator.validate(&Customer::new(0, "", "", 10));

        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["Id", "FirstName", "LastName", "Age"]);
        assert_eq!(errors[0].message, "Id is required.");
        assert_eq!(errors[1].message, "First Name is required.");
        assert_eq!(errors[3].message, "Age must be greater than 18.");
    }

    #[test]
    fn test_first_error_follows_rule_order() {
        let validator = DeclarativeCustomerValidator;
        let errors = validator.validate(&Customer::new(1, "", "Lane", 10));

        assert_eq!(
            errors,
            vec![
                FieldError {
                    field: "FirstName".to_string(),
                    message: "First Name is required.".to_string(),
                },
                FieldError {
                    field: "Age".to_string(),
                    message: "Age must be greater than 18.".to_string(),
                },
            ]
        );
    }
}
