use std::sync::LazyLock;

use regex::Regex;

static EMAIL_RE: LazyLock<Regex> =
  LazyLock::new(|| {
    Regex::new(
      r"^[^\s@]+@[^\s@]+\.[^\s@]+$"
    )
    .expect("email pattern compiles")
  });

// One pattern per required character class; the regex engine has no
// lookahead to fold them together.
static PASSWORD_CLASSES: LazyLock<
  [Regex; 4]
> = LazyLock::new(|| {
  [r"[a-z]", r"[A-Z]", r"[0-9]", r"[^A-Za-z0-9]"]
    .map(|pattern| {
      Regex::new(pattern)
        .expect("password pattern compiles")
    })
});

pub const MIN_PASSWORD_LEN: usize = 8;

pub fn is_valid_email(raw: &str) -> bool {
  EMAIL_RE.is_match(raw)
}

/// At least eight characters with a lowercase letter, an uppercase
/// letter, a digit and a special character.
pub fn is_strong_password(
  raw: &str
) -> bool {
  raw.chars().count() >= MIN_PASSWORD_LEN
    && PASSWORD_CLASSES
      .iter()
      .all(|class| class.is_match(raw))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn email_shapes() {
    assert!(is_valid_email("ada@example.com"));
    assert!(is_valid_email("a.b+c@mail.co.uk"));
    assert!(!is_valid_email("ada@example"));
    assert!(!is_valid_email("ada example@x.io"));
    assert!(!is_valid_email("@example.com"));
    assert!(!is_valid_email(""));
  }

  #[test]
  fn password_needs_every_class() {
    assert!(is_strong_password("Secur3!pw"));
    assert!(!is_strong_password("S3!shor"));
    assert!(!is_strong_password("alllower1!"));
    assert!(!is_strong_password("ALLUPPER1!"));
    assert!(!is_strong_password("NoDigits!!"));
    assert!(!is_strong_password("NoSpecial12"));
  }
}
