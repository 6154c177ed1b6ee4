use tracing::{
  debug,
  info,
  warn
};

use crate::context::Route;
use crate::error::ApiError;
use crate::http::Transport;
use crate::session::Session;

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum GateState {
  Unknown,
  Validating,
  Authenticated,
  Unauthenticated
}

/// Route guard that settles whether the visitor has a live session.
#[derive(Debug, Clone)]
pub struct AuthGate {
  state: GateState
}

impl Default for AuthGate {
  fn default() -> Self {
    Self {
      state: GateState::Unknown
    }
  }
}

impl AuthGate {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn state(&self) -> GateState {
    self.state
  }

  fn settle(
    &mut self,
    session: &Session<impl Transport>,
    state: GateState,
    route: Route
  ) -> GateState {
    debug!(?state, route = route.path(), "auth gate settled");
    self.state = state;
    session.context().navigate(route);
    state
  }

  /// Validates the session, refreshing once on a 401. A refresh that
  /// reports no user is followed by one more validation, so the gate
  /// only settles `Authenticated` with an identity stored.
  ///
  /// A known username short-circuits to `Authenticated` without a
  /// request or a navigation. Re-running after the identity was cleared
  /// validates again.
  #[tracing::instrument(skip_all)]
  pub async fn resolve<T: Transport>(
    &mut self,
    session: &Session<T>
  ) -> GateState {
    let ctx = session.context();
    if ctx.has_identity() {
      self.state = GateState::Authenticated;
      return self.state;
    }

    self.state = GateState::Validating;
    debug!("validating session");

    match session.client().validate().await {
      | Ok(user) => {
        info!(username = %user.username, "session validated");
        ctx.set_user(Some(user));
        self.settle(
          session,
          GateState::Authenticated,
          Route::Home
        )
      }
      | Err(ApiError::Unauthorized) => {
        if !session.refresh().await {
          warn!("session refresh failed");
          return self.settle(
            session,
            GateState::Unauthenticated,
            Route::Register
          );
        }
        if ctx.has_identity() {
          return self.settle(
            session,
            GateState::Authenticated,
            Route::Home
          );
        }

        // The refresh carried no user; ask once more with the new token.
        match session.client().validate().await {
          | Ok(user) => {
            info!(username = %user.username, "session revalidated");
            ctx.set_user(Some(user));
            self.settle(
              session,
              GateState::Authenticated,
              Route::Home
            )
          }
          | Err(error) => {
            warn!(%error, "no identity after refresh");
            self.settle(
              session,
              GateState::Unauthenticated,
              Route::Register
            )
          }
        }
      }
      | Err(error) => {
        warn!(%error, "session validation failed");
        self.settle(
          session,
          GateState::Unauthenticated,
          Route::Register
        )
      }
    }
  }
}
