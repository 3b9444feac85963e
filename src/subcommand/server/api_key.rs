use {
  super::*,
  axum::{
    body::BoxBody,
    http::{Request, StatusCode},
    response::Response,
  },
  tower_http::validate_request::ValidateRequest,
};

/// Shared secret expected in the `api-key` request header.
#[derive(Clone)]
pub(super) struct ApiKey(Arc<str>);

impl ApiKey {
  pub(super) const HEADER: &'static str = "api-key";

  pub(super) fn new(key: &str) -> Self {
    Self(key.into())
  }

  fn matches(&self, candidate: &[u8]) -> bool {
    let expected = self.0.as_bytes();

    expected.len() == candidate.len()
      && expected
        .iter()
        .zip(candidate)
        .fold(0, |acc, (a, b)| acc | (a ^ b))
        == 0
  }
}

impl<B> ValidateRequest<B> for ApiKey {
  type ResponseBody = BoxBody;

  fn validate(&mut self, request: &mut Request<B>) -> Result<(), Response<Self::ResponseBody>> {
    match request.headers().get(Self::HEADER) {
      Some(value) if self.matches(value.as_bytes()) => Ok(()),
      value => {
        log::warn!(
          "Rejected {} {}: {} API key",
          request.method(),
          request.uri().path(),
          if value.is_some() { "invalid" } else { "missing" },
        );
        Err((StatusCode::FORBIDDEN, "invalid API key").into_response())
      }
    }
  }
}
