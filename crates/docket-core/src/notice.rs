#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum NoticeLevel {
  Success,
  Error
}

impl NoticeLevel {
  pub fn css_class(self) -> &'static str {
    match self {
      | NoticeLevel::Success => {
        "toast success"
      }
      | NoticeLevel::Error => "toast error"
    }
  }
}

/// A transient, non-blocking message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
  pub id:      u64,
  pub level:   NoticeLevel,
  pub message: String
}

impl Notice {
  pub fn lines(
    &self
  ) -> impl Iterator<Item = &str> {
    self.message.lines()
  }
}
