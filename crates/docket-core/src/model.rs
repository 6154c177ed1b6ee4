use chrono::{
  DateTime,
  NaiveDate,
  Utc
};
use serde::{
  Deserialize,
  Serialize
};

/// The signed-in account as reported by login, validation and token
/// refresh.
#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
pub struct User {
  #[serde(rename = "id", default)]
  pub user_id:  String,
  #[serde(default)]
  pub username: String
}

impl User {
  pub fn new(
    user_id: &str,
    username: &str
  ) -> Self {
    Self {
      user_id:  user_id.to_string(),
      username: username.to_string()
    }
  }
}

#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct Category {
  #[serde(rename = "_id")]
  pub id:         String,
  #[serde(rename = "categoryName")]
  pub name:       String,
  #[serde(default)]
  pub created_at: Option<DateTime<Utc>>,
  #[serde(default)]
  pub updated_at: Option<DateTime<Utc>>,
  #[serde(rename = "todos", default)]
  pub todo_ids:   Vec<String>
}

#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct Task {
  #[serde(rename = "_id")]
  pub id:          String,
  pub title:       String,
  #[serde(default)]
  pub description: String,
  pub deadline:    DateTime<Utc>,
  #[serde(default)]
  pub is_complete: bool,
  #[serde(rename = "todoCategoryId")]
  pub category_id: String,
  #[serde(default)]
  pub created_at:  Option<DateTime<Utc>>,
  #[serde(default)]
  pub updated_at:  Option<DateTime<Utc>>
}

impl Task {
  /// Calendar day of the deadline, read in UTC.
  ///
  /// Deadlines are stored as the picked day at UTC midnight, so the UTC
  /// day is the day the user chose in every timezone. Callers compare it
  /// against the user's local "today". A deadline written by another
  /// client at local midnight east of UTC reads as the day before.
  pub fn deadline_date(&self) -> NaiveDate {
    self.deadline.date_naive()
  }
}

/// `{ "data": ... }` wrapper used by every successful response.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
  pub data: Option<T>
}

#[derive(
  Debug, Clone, Default, Deserialize,
)]
pub struct ErrorBody {
  #[serde(default)]
  pub message: Option<String>
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
  pub username: String,
  pub email:    String,
  pub password: String
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
  pub identifier: String,
  pub password:   String
}

#[derive(Debug, Clone, Serialize)]
pub struct LogoutRequest {
  pub userid: String
}

#[derive(Debug, Clone, Serialize)]
pub struct NewCategory {
  #[serde(rename = "categoryName")]
  pub name: String
}

#[derive(
  Debug, Clone, PartialEq, Eq, Serialize,
)]
pub struct NewTask {
  pub title:       String,
  pub description: String,
  /// ISO-8601 UTC timestamp, midnight of the chosen day.
  pub deadline:    String,
  #[serde(rename = "todoCategoryId")]
  pub category_id: String
}
