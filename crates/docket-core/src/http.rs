use percent_encoding::{
  NON_ALPHANUMERIC,
  utf8_percent_encode
};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::model::ErrorBody;

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum Method {
  Get,
  Post,
  Delete
}

impl Method {
  pub fn as_str(self) -> &'static str {
    match self {
      | Method::Get => "GET",
      | Method::Post => "POST",
      | Method::Delete => "DELETE"
    }
  }
}

/// A request relative to the backend base URL. `path` carries the
/// query string.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
  pub method: Method,
  pub path:   String,
  pub body:   Option<serde_json::Value>
}

impl ApiRequest {
  pub fn get(path: impl Into<String>) -> Self {
    Self {
      method: Method::Get,
      path:   path.into(),
      body:   None
    }
  }

  pub fn delete(
    path: impl Into<String>
  ) -> Self {
    Self {
      method: Method::Delete,
      path:   path.into(),
      body:   None
    }
  }

  pub fn post<B>(
    path: impl Into<String>,
    body: &B
  ) -> Result<Self, ApiError>
  where
    B: Serialize + ?Sized
  {
    let body = serde_json::to_value(body)
      .map_err(|error| {
        ApiError::Decode(format!(
          "failed to encode body: {error}"
        ))
      })?;
    Ok(Self {
      method: Method::Post,
      path:   path.into(),
      body:   Some(body)
    })
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
  pub status: u16,
  pub body:   String
}

impl ApiResponse {
  pub fn new(
    status: u16,
    body: impl Into<String>
  ) -> Self {
    Self {
      status,
      body: body.into()
    }
  }

  pub fn is_success(&self) -> bool {
    (200..300).contains(&self.status)
  }

  pub fn is_unauthorized(&self) -> bool {
    self.status == 401
  }

  pub fn json<T: DeserializeOwned>(
    &self
  ) -> Result<T, ApiError> {
    serde_json::from_str(&self.body)
      .map_err(|error| {
        ApiError::Decode(error.to_string())
      })
  }

  /// The `message` field of an error body, if the server sent one.
  pub fn error_message(
    &self
  ) -> Option<String> {
    serde_json::from_str::<ErrorBody>(
      &self.body
    )
    .ok()
    .and_then(|body| body.message)
    .filter(|message| {
      !message.trim().is_empty()
    })
  }
}

/// Sends requests to the backend with the session cookies attached.
///
/// The client runs on a single-threaded event loop, so implementations
/// are not required to be `Send`.
#[allow(async_fn_in_trait)]
pub trait Transport {
  async fn send(
    &self,
    request: ApiRequest
  ) -> Result<ApiResponse, ApiError>;
}

pub fn with_query(
  path: &str,
  key: &str,
  value: &str
) -> String {
  let separator = if path.contains('?') {
    '&'
  } else {
    '?'
  };
  format!(
    "{path}{separator}{key}={}",
    utf8_percent_encode(
      value,
      NON_ALPHANUMERIC
    )
  )
}
