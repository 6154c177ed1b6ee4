use tracing::{
  error,
  info,
  warn
};

use crate::busy::InFlight;
use crate::context::Route;
use crate::error::{
  ApiError,
  FieldError
};
use crate::http::Transport;
use crate::model::{
  LoginRequest,
  RegisterRequest,
  User
};
use crate::session::Session;
use crate::validation::{
  is_strong_password,
  is_valid_email
};

#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub struct RegisterForm {
  pub username: String,
  pub email:    String,
  pub password: String
}

impl RegisterForm {
  pub fn validate(
    &self
  ) -> Result<(), FieldError> {
    if self.username.is_empty()
      || self.email.is_empty()
      || self.password.is_empty()
    {
      return Err(
        FieldError::MissingRegisterFields
      );
    }
    if !is_valid_email(&self.email) {
      return Err(FieldError::InvalidEmail);
    }
    if !is_strong_password(&self.password) {
      return Err(FieldError::WeakPassword);
    }
    Ok(())
  }

  pub fn clear(&mut self) {
    *self = Self::default();
  }

  fn to_request(&self) -> RegisterRequest {
    RegisterRequest {
      username: self.username.clone(),
      email:    self.email.clone(),
      password: self.password.clone()
    }
  }
}

#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub struct LoginForm {
  pub identifier: String,
  pub password:   String
}

impl LoginForm {
  pub fn validate(
    &self
  ) -> Result<(), FieldError> {
    if self.identifier.is_empty()
      || self.password.is_empty()
    {
      return Err(
        FieldError::MissingLoginFields
      );
    }
    Ok(())
  }

  pub fn clear(&mut self) {
    *self = Self::default();
  }
}

const REGISTER_KEY: &str = "register";
const LOGIN_KEY: &str = "login";
const LOGOUT_KEY: &str = "logout";

/// Registration, login and logout.
pub struct AuthActions<T> {
  session:   Session<T>,
  in_flight: InFlight
}

impl<T> Clone for AuthActions<T> {
  fn clone(&self) -> Self {
    Self {
      session:   self.session.clone(),
      in_flight: self.in_flight.clone()
    }
  }
}

impl<T: Transport> AuthActions<T> {
  pub fn new(session: Session<T>) -> Self {
    let in_flight =
      InFlight::new(session.context().clone());
    Self {
      session,
      in_flight
    }
  }

  pub fn is_busy(&self) -> bool {
    !self.in_flight.is_idle()
  }

  /// Validates locally, then registers. Nothing is sent when the form
  /// is invalid.
  #[tracing::instrument(skip_all)]
  pub async fn register(
    &self,
    form: &RegisterForm
  ) -> Result<(), ApiError> {
    let ctx = self.session.context();
    if let Err(invalid) = form.validate() {
      ctx.error(invalid.to_string());
      return Err(invalid.into());
    }
    let _guard = self
      .in_flight
      .begin(REGISTER_KEY)
      .ok_or(ApiError::Busy)?;

    match self
      .session
      .client()
      .register(&form.to_request())
      .await
    {
      | Ok(()) => {
        info!(username = %form.username, "user registered");
        ctx.success(
          "User registered successfully."
        );
        ctx.navigate(Route::Login);
        Ok(())
      }
      | Err(failure) => {
        let message = match &failure {
          | ApiError::Http {
            status: 400,
            ..
          } => "User already exists.",
          | ApiError::Http { .. }
          | ApiError::Unauthorized => {
            "Error registering user."
          }
          | _ => {
            "Network error. Please try \
             again."
          }
        };
        warn!(error = %failure, "registration failed");
        ctx.error(message);
        Err(failure)
      }
    }
  }

  #[tracing::instrument(skip_all)]
  pub async fn login(
    &self,
    form: &LoginForm
  ) -> Result<User, ApiError> {
    let ctx = self.session.context();
    if let Err(invalid) = form.validate() {
      ctx.error(invalid.to_string());
      return Err(invalid.into());
    }
    let _guard = self
      .in_flight
      .begin(LOGIN_KEY)
      .ok_or(ApiError::Busy)?;

    let request = LoginRequest {
      identifier: form.identifier.clone(),
      password:   form.password.clone()
    };
    match self
      .session
      .client()
      .login(&request)
      .await
    {
      | Ok(user) => {
        info!(username = %user.username, "logged in");
        ctx.set_user(Some(user.clone()));
        ctx.success("Login successful!");
        ctx.navigate(Route::Home);
        Ok(user)
      }
      | Err(failure) => {
        warn!(error = %failure, "login failed");
        ctx.error("Invalid credentials");
        Err(failure)
      }
    }
  }

  /// Ends the server session. Failures are only logged; the local
  /// identity is kept so the user can retry.
  #[tracing::instrument(skip_all)]
  pub async fn logout(
    &self
  ) -> Result<(), ApiError> {
    let ctx = self.session.context();
    let _guard = self
      .in_flight
      .begin(LOGOUT_KEY)
      .ok_or(ApiError::Busy)?;
    let user_id = ctx
      .user()
      .map(|user| user.user_id)
      .unwrap_or_default();

    match self
      .session
      .client()
      .logout(&user_id)
      .await
    {
      | Ok(()) => {
        info!("logged out");
        ctx.clear_user();
        ctx.navigate(Route::Root);
        ctx.success("Logged out successfully");
        Ok(())
      }
      | Err(failure) => {
        error!(error = %failure, "error logging out");
        Err(failure)
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn filled() -> RegisterForm {
    RegisterForm {
      username: "ada".to_string(),
      email:    "ada@example.com"
        .to_string(),
      password: "Secur3!pw".to_string()
    }
  }

  #[test]
  fn register_form_checks_in_order() {
    assert_eq!(filled().validate(), Ok(()));

    let mut missing = filled();
    missing.username.clear();
    missing.email = "bad".to_string();
    assert_eq!(
      missing.validate(),
      Err(FieldError::MissingRegisterFields)
    );

    let mut bad_email = filled();
    bad_email.email = "ada@".to_string();
    bad_email.password = "weak".to_string();
    assert_eq!(
      bad_email.validate(),
      Err(FieldError::InvalidEmail)
    );

    let mut weak = filled();
    weak.password = "password".to_string();
    assert_eq!(
      weak.validate(),
      Err(FieldError::WeakPassword)
    );
  }

  #[test]
  fn login_form_requires_both_fields() {
    let form = LoginForm {
      identifier: "ada".to_string(),
      password:   String::new()
    };
    assert_eq!(
      form.validate(),
      Err(FieldError::MissingLoginFields)
    );
  }
}
