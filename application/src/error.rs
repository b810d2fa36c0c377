use std::fmt::Display;

use error_stack::{Context, ResultExt};
use kernel::KernelError;

/// A broken business rule, attributed to the input or attribute that caused it.
///
/// `message` is shown to users verbatim; `field` is what callers match on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceError {
    field: String,
    message: String,
}

impl ServiceError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// The persistence collaborator failed; the report keeps the `KernelError` frame.
    pub fn repository() -> Self {
        Self::new("repository", "Book repository is unavailable")
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Context for ServiceError {}

pub(crate) trait ConvertError {
    type Ok;
    fn convert_error(self) -> error_stack::Result<Self::Ok, ServiceError>;
}

impl<T> ConvertError for error_stack::Result<T, KernelError> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, ServiceError> {
        self.change_context_lazy(ServiceError::repository)
    }
}
