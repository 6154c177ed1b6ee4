use std::future::Future;

use tracing::{
  debug,
  info,
  warn
};

use crate::api::ApiClient;
use crate::context::{
  AppContext,
  Route
};
use crate::error::ApiError;
use crate::http::{
  ApiResponse,
  Transport
};
use crate::model::{
  Envelope,
  User
};

/// Exchanges an expired access token for a new one.
///
/// Returns the raw response, or `None` when nothing came back. Callers
/// treat `None` and a 401 alike as a failed refresh. Session state is
/// left untouched.
#[tracing::instrument(skip_all)]
pub async fn refresh_access_token<T>(
  client: &ApiClient<T>
) -> Option<ApiResponse>
where
  T: Transport
{
  match client.refresh_token().await {
    | Ok(response) => Some(response),
    | Err(error) => {
      warn!(%error, "token refresh request failed");
      None
    }
  }
}

/// Judges a refresh result. `None` means the refresh failed; otherwise
/// the inner value is the identity the server reported, if any.
pub fn refreshed_identity(
  response: Option<ApiResponse>
) -> Option<Option<User>> {
  let response = response?;
  if response.is_unauthorized()
    || !response.is_success()
  {
    warn!(
      status = response.status,
      "token refresh rejected"
    );
    return None;
  }

  let user = response
    .json::<Envelope<User>>()
    .ok()
    .and_then(|envelope| envelope.data)
    .filter(|user| {
      !user.username.is_empty()
    });
  Some(user)
}

/// The context plus the API client, with the single place where a 401
/// is turned into a refresh, a retry, or a forced sign-out.
pub struct Session<T> {
  ctx:    AppContext,
  client: ApiClient<T>
}

impl<T> Clone for Session<T> {
  fn clone(&self) -> Self {
    Self {
      ctx:    self.ctx.clone(),
      client: self.client.clone()
    }
  }
}

impl<T> PartialEq for Session<T> {
  fn eq(&self, other: &Self) -> bool {
    self.ctx == other.ctx
  }
}

impl<T: Transport> Session<T> {
  pub fn new(
    ctx: AppContext,
    client: ApiClient<T>
  ) -> Self {
    Self {
      ctx,
      client
    }
  }

  pub fn context(&self) -> &AppContext {
    &self.ctx
  }

  pub fn client(&self) -> &ApiClient<T> {
    &self.client
  }

  /// Refreshes the session once, applying any identity the server
  /// returns. Returns whether the refresh succeeded.
  pub async fn refresh(&self) -> bool {
    match refreshed_identity(
      refresh_access_token(&self.client)
        .await
    ) {
      | Some(identity) => {
        if let Some(user) = identity {
          info!(username = %user.username, "session refreshed");
          self.ctx.set_user(Some(user));
        } else {
          debug!(
            "session refreshed without \
             identity"
          );
        }
        true
      }
      | None => false
    }
  }

  /// Runs `call`; on a 401 refreshes once and retries once. When the
  /// refresh fails or the retry is still unauthorized, the user is
  /// cleared, navigation to registration is requested, and
  /// `ApiError::SessionExpired` is returned.
  pub async fn authorized<R, F, Fut>(
    &self,
    mut call: F
  ) -> Result<R, ApiError>
  where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<R, ApiError>>
  {
    match call().await {
      | Err(ApiError::Unauthorized) => {}
      | other => return other
    }

    warn!(
      "request unauthorized; attempting \
       token refresh"
    );
    if !self.refresh().await {
      return Err(self.expire());
    }

    match call().await {
      | Err(ApiError::Unauthorized) => {
        Err(self.expire())
      }
      | other => other
    }
  }

  fn expire(&self) -> ApiError {
    warn!(
      "session expired; redirecting to \
       registration"
    );
    self.ctx.clear_user();
    self.ctx.navigate(Route::Register);
    ApiError::SessionExpired
  }
}
