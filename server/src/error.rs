use std::collections::BTreeMap;
use std::process::{ExitCode, Termination};

use application::ServiceError;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use error_stack::Report;
use kernel::interface::validation::Violation;
use kernel::KernelError;

#[derive(Debug)]
pub struct StackTrace(Report<KernelError>);

impl From<Report<KernelError>> for StackTrace {
    fn from(e: Report<KernelError>) -> Self {
        StackTrace(e)
    }
}

impl Termination for StackTrace {
    fn report(self) -> ExitCode {
        self.0.report()
    }
}

/// Failed request. Rule and validation failures answer `400` with a
/// `{ "<field>": "<message>" }` body; storage failures map to a bare status.
#[derive(Debug)]
pub enum ErrorStatus {
    Service(Report<ServiceError>),
    Invalid(Vec<Violation>),
}

impl From<Report<ServiceError>> for ErrorStatus {
    fn from(e: Report<ServiceError>) -> Self {
        ErrorStatus::Service(e)
    }
}

impl From<Vec<Violation>> for ErrorStatus {
    fn from(violations: Vec<Violation>) -> Self {
        ErrorStatus::Invalid(violations)
    }
}

impl IntoResponse for ErrorStatus {
    fn into_response(self) -> axum::response::Response {
        match self {
            ErrorStatus::Service(report) => {
                if let Some(kernel) = report.downcast_ref::<KernelError>() {
                    tracing::error!("{report:?}");
                    return match kernel {
                        KernelError::Timeout => StatusCode::REQUEST_TIMEOUT,
                        KernelError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
                    }
                    .into_response();
                }
                let error = report.current_context();
                let body = BTreeMap::from([(error.field(), error.message())]);
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            ErrorStatus::Invalid(violations) => {
                let body = violations
                    .iter()
                    .map(|violation| (*violation.field(), *violation.message()))
                    .collect::<BTreeMap<_, _>>();
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
        }
    }
}
