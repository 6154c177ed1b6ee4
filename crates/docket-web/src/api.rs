use docket_core::ApiError;
use docket_core::http::{
  ApiRequest,
  ApiResponse,
  Method,
  Transport
};
use gloo::net::http::{
  Request,
  RequestBuilder
};
use web_sys::RequestCredentials;

/// Browser `fetch` transport. Every request carries the session cookies.
pub struct GlooTransport {
  base_url: String
}

impl GlooTransport {
  pub fn new(base_url: &str) -> Self {
    Self {
      base_url: base_url
        .trim_end_matches('/')
        .to_string()
    }
  }

  fn builder(
    &self,
    request: &ApiRequest
  ) -> RequestBuilder {
    let url = format!(
      "{}{}",
      self.base_url, request.path
    );
    let builder = match request.method {
      | Method::Get => Request::get(&url),
      | Method::Post => Request::post(&url),
      | Method::Delete => {
        Request::delete(&url)
      }
    };
    builder.credentials(
      RequestCredentials::Include
    )
  }
}

impl Transport for GlooTransport {
  async fn send(
    &self,
    request: ApiRequest
  ) -> Result<ApiResponse, ApiError> {
    let builder = self.builder(&request);
    let prepared = match &request.body {
      | Some(body) => builder.json(body),
      | None => builder.build()
    }
    .map_err(|error| {
      ApiError::Transport(
        error.to_string()
      )
    })?;

    let response = prepared
      .send()
      .await
      .map_err(|error| {
        tracing::error!(
          method = request.method.as_str(),
          path = %request.path,
          %error,
          "request did not complete"
        );
        ApiError::Transport(
          error.to_string()
        )
      })?;

    let status = response.status();
    let body =
      response.text().await.map_err(
        |error| {
          ApiError::Transport(
            error.to_string()
          )
        }
      )?;
    Ok(ApiResponse::new(status, body))
  }
}
