use axum::{
    Json,
    extract::rejection::{BytesRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use snafu::Snafu;
use std::num::ParseIntError;

pub type RosterResult<T> = Result<T, RosterError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum RosterError {
    #[snafu(display("Error opening database"))]
    OpenDatabase { source: sqlx::Error },
    #[snafu(display("Error getting db connection"))]
    GetDatabaseConnection { source: sqlx::Error },
    #[snafu(display("Error making SQL query"))]
    MakeQuery { source: sqlx::Error },
    #[snafu(display("Error migrating DB schema"))]
    MigrateError { source: sqlx::migrate::MigrateError },
    #[snafu(display("Unable to retrieve env var `{}`", name))]
    BadEnvVar {
        source: dotenvy::Error,
        name: &'static str,
    },
    #[snafu(display("Unable to parse env var `{}` from {:?}", name, value))]
    ParseEnvVar {
        source: ParseIntError,
        name: &'static str,
        value: String,
    },
    #[snafu(display("first_name, last_name and email are required"))]
    MissingRequiredFields,
    #[snafu(display("email already exists"))]
    EmailAlreadyExists { email: String },
    #[snafu(display("Unable to find student with ID: {}", id))]
    MissingStudent { id: i64 },
    #[snafu(display("Unable to find student with ID: {:?}", original))]
    InvalidStudentId { original: String },
    #[snafu(display("Unable to find student with that ID"))]
    UnreadableStudentId { source: PathRejection },
    #[snafu(display("Error reading request body"))]
    ReadBody { source: BytesRejection },
    #[snafu(display("Invalid field in request body: {}", source))]
    MalformedField { source: serde_json::Error },
}

impl RosterError {
    pub fn status_code(&self) -> StatusCode {
        const ISE: StatusCode = StatusCode::INTERNAL_SERVER_ERROR; //internal server error
        const NF: StatusCode = StatusCode::NOT_FOUND; //not found
        const BI: StatusCode = StatusCode::BAD_REQUEST; //bad input

        match self {
            Self::OpenDatabase { .. } | Self::GetDatabaseConnection { .. } => ISE,
            Self::MakeQuery { .. } | Self::MigrateError { .. } => ISE,
            Self::BadEnvVar { .. } | Self::ParseEnvVar { .. } => ISE,
            Self::MissingRequiredFields | Self::EmailAlreadyExists { .. } => BI,
            Self::MissingStudent { .. } | Self::InvalidStudentId { .. } => NF,
            Self::UnreadableStudentId { .. } => NF,
            Self::ReadBody { source } => source.status(),
            Self::MalformedField { .. } => BI,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for RosterError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        if status_code.is_server_error() {
            error!(?self, "Error!");
        } else {
            debug!(?self, %status_code, "Rejected request");
        }

        (
            status_code,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
