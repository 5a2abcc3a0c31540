use std::collections::BTreeMap;
use std::fmt;

/**
 * Field name to the list of messages describing why the field was rejected.
 */
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/**
 * Represents the type of error that can occur within the application.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorType {
    Initialization,
    Validation,
    NotFound,
    InvalidState,
    Internal,
}

/**
 * Represents an error that occurs within the application.
 */
#[derive(Debug, Clone)]
pub struct ApplicationError {
    /**
     * Error type.
     */
    pub error_type: ErrorType,
    /**
     * Error message describing problem.
     */
    pub message: String,
    /**
     * Per field messages. Only populated for validation errors.
     */
    pub field_errors: FieldErrors,
}

impl ApplicationError {
    /**
     * Creates a new ApplicationError.
     *
     * #Arguments
     * `error_type`: The type of error.
     * `message`: A description of the error.
     */
    pub fn new(error_type: ErrorType, message: String) -> Self {
        ApplicationError { error_type, message, field_errors: FieldErrors::new() }
    }

    /**
     * Creates a validation error carrying the rejected fields.
     *
     * #Arguments
     * `field_errors`: Messages per rejected field.
     */
    pub fn validation(field_errors: FieldErrors) -> Self {
        let fields = field_errors.keys().map(String::as_str).collect::<Vec<_>>().join(", ");
        ApplicationError { error_type: ErrorType::Validation, message: format!("Invalid fields: {fields}"), field_errors }
    }
}

impl fmt::Display for ApplicationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApplicationError {}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_validation_error_message_lists_fields() {
        let mut field_errors = FieldErrors::new();
        field_errors.insert("name".to_string(), vec!["too short".to_string()]);
        field_errors.insert("latitude".to_string(), vec!["out of range".to_string()]);
        let error = ApplicationError::validation(field_errors);
        assert_eq!(error.error_type, ErrorType::Validation);
        assert_eq!(error.to_string(), "Invalid fields: latitude, name");
        assert_eq!(error.field_errors.len(), 2);
    }
}
