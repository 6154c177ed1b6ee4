use thiserror::Error;

pub const UNKNOWN_ERROR: &str =
  "An unknown error occurred.";

/// Client-side validation failures. These never reach the server; the
/// display text is what the user sees.
#[derive(
  Debug, Clone, PartialEq, Eq, Error,
)]
pub enum FieldError {
  #[error("Please fill in all fields.")]
  MissingRegisterFields,
  #[error("Please fill in all fields")]
  MissingLoginFields,
  #[error("Enter a valid email.")]
  InvalidEmail,
  #[error(
    "Enter a strong password:\n\
     • At least 8 characters long\n\
     • Contains a lowercase letter\n\
     • Contains an uppercase letter\n\
     • Contains a number\n\
     • Contains a special character"
  )]
  WeakPassword,
  #[error("Enter a category name.")]
  EmptyCategoryName,
  #[error("Empty fields found.")]
  MissingTaskFields,
  #[error(
    "Task title is limited to {limit} \
     characters."
  )]
  TitleTooLong { limit: usize },
  #[error(
    "Task description is limited to \
     {limit} characters."
  )]
  DescriptionTooLong { limit: usize },
  #[error("Select a category first.")]
  NoActiveCategory
}

#[derive(
  Debug, Clone, PartialEq, Eq, Error,
)]
pub enum ApiError {
  #[error("request was not authorized")]
  Unauthorized,
  #[error(
    "session could not be refreshed"
  )]
  SessionExpired,
  #[error("server responded with {status}")]
  Http {
    status:  u16,
    message: Option<String>
  },
  #[error("transport error: {0}")]
  Transport(String),
  #[error(
    "failed to decode response: {0}"
  )]
  Decode(String),
  #[error(transparent)]
  Validation(#[from] FieldError),
  #[error(
    "another request is still in flight"
  )]
  Busy
}

impl ApiError {
  pub fn status(&self) -> Option<u16> {
    match self {
      | ApiError::Unauthorized => {
        Some(401)
      }
      | ApiError::Http {
        status,
        ..
      } => Some(*status),
      | _ => None
    }
  }

  /// Text for the transient notification shown after a failed call.
  /// `fallback` covers auth failures and error responses without a
  /// server message.
  pub fn user_message(
    &self,
    fallback: &str
  ) -> String {
    match self {
      | ApiError::Http {
        message: Some(message),
        ..
      } => {
        let message = message.trim();
        if message.ends_with('.') {
          message.to_string()
        } else {
          format!("{message}.")
        }
      }
      | ApiError::Validation(error) => {
        error.to_string()
      }
      | ApiError::Transport(_)
      | ApiError::Decode(_) => {
        UNKNOWN_ERROR.to_string()
      }
      | ApiError::Http {
        message: None,
        ..
      }
      | ApiError::Unauthorized
      | ApiError::SessionExpired
      | ApiError::Busy => {
        fallback.to_string()
      }
    }
  }
}
