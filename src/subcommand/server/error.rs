use {
  super::*,
  crate::registry::ErrorKind,
  axum::{http::StatusCode, response::Response},
};

#[derive(Debug)]
pub(super) enum ServerError {
  Internal(Error),
  Registry(RegistryError),
}

pub(super) type ServerResult<T = Response> = Result<T, ServerError>;

impl ServerError {
  fn status(kind: ErrorKind) -> StatusCode {
    match kind {
      ErrorKind::PermissionDenied => StatusCode::FORBIDDEN,
      ErrorKind::DuplicateEntry | ErrorKind::SlotLimitExceeded | ErrorKind::InvalidArgument => {
        StatusCode::BAD_REQUEST
      }
      ErrorKind::EntryNotFound => StatusCode::NOT_FOUND,
      ErrorKind::UpstreamUnavailable => StatusCode::SERVICE_UNAVAILABLE,
      ErrorKind::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl IntoResponse for ServerError {
  fn into_response(self) -> Response {
    match self {
      Self::Internal(error) => {
        log::error!("error serving request: {error}");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          StatusCode::INTERNAL_SERVER_ERROR
            .canonical_reason()
            .unwrap_or_default(),
        )
          .into_response()
      }
      Self::Registry(error) => {
        let status = Self::status(error.kind());

        if status.is_server_error() {
          log::error!("error serving request: {error}");
        }

        (
          status,
          Json(api::Error {
            error: error.kind(),
            message: error.to_string(),
          }),
        )
          .into_response()
      }
    }
  }
}

impl From<Error> for ServerError {
  fn from(error: Error) -> Self {
    Self::Internal(error)
  }
}

impl From<RegistryError> for ServerError {
  fn from(error: RegistryError) -> Self {
    Self::Registry(error)
  }
}
