use chrono::NaiveDate;
use tracing::{
  debug,
  info
};

use crate::busy::InFlight;
use crate::config::{
  ClientConfig,
  Limits
};
use crate::error::{
  ApiError,
  FieldError
};
use crate::http::Transport;
use crate::model::{
  NewTask,
  Task
};
use crate::session::Session;

const CREATE_KEY: &str = "create-task";

/// Case-insensitive substring match on the title. Order is preserved.
pub fn filter_tasks<'a>(
  tasks: &'a [Task],
  query: &str
) -> Vec<&'a Task> {
  let needle = query.to_lowercase();
  tasks
    .iter()
    .filter(|task| {
      needle.is_empty()
        || task
          .title
          .to_lowercase()
          .contains(&needle)
    })
    .collect()
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum DeadlineStatus {
  Overdue,
  DueToday,
  Upcoming
}

impl DeadlineStatus {
  pub fn css_class(self) -> &'static str {
    match self {
      | DeadlineStatus::Overdue => {
        "deadline overdue"
      }
      | DeadlineStatus::DueToday => {
        "deadline today"
      }
      | DeadlineStatus::Upcoming => {
        "deadline upcoming"
      }
    }
  }
}

pub fn deadline_status(
  deadline: NaiveDate,
  today: NaiveDate
) -> DeadlineStatus {
  match deadline.cmp(&today) {
    | std::cmp::Ordering::Less => {
      DeadlineStatus::Overdue
    }
    | std::cmp::Ordering::Equal => {
      DeadlineStatus::DueToday
    }
    | std::cmp::Ordering::Greater => {
      DeadlineStatus::Upcoming
    }
  }
}

/// Long British form, e.g. "15 March 2026".
pub fn format_deadline(
  date: NaiveDate
) -> String {
  date.format("%-d %B %Y").to_string()
}

/// Midnight UTC of `date` in ISO-8601 with milliseconds.
pub fn deadline_iso(date: NaiveDate) -> String {
  date
    .format("%Y-%m-%dT00:00:00.000Z")
    .to_string()
}

/// Remaining characters for a character-limited field. Goes negative
/// when the value is over the limit.
pub fn remaining(
  value: &str,
  limit: usize
) -> i64 {
  limit as i64 - value.chars().count() as i64
}

/// The add-task form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
  pub title:       String,
  pub description: String,
  pub deadline:    Option<NaiveDate>
}

impl TaskDraft {
  pub fn new(today: NaiveDate) -> Self {
    Self {
      title:       String::new(),
      description: String::new(),
      deadline:    Some(today)
    }
  }

  pub fn reset(&mut self, today: NaiveDate) {
    *self = Self::new(today);
  }

  /// Accepts `value` only when it fits `limits.title`.
  pub fn set_title(
    &mut self,
    value: &str,
    limits: &Limits
  ) -> bool {
    if value.chars().count() > limits.title {
      return false;
    }
    self.title = value.to_string();
    true
  }

  /// Accepts `value` only when it fits `limits.description`.
  pub fn set_description(
    &mut self,
    value: &str,
    limits: &Limits
  ) -> bool {
    if value.chars().count()
      > limits.description
    {
      return false;
    }
    self.description = value.to_string();
    true
  }

  pub fn title_remaining(
    &self,
    limits: &Limits
  ) -> i64 {
    remaining(&self.title, limits.title)
  }

  pub fn description_remaining(
    &self,
    limits: &Limits
  ) -> i64 {
    remaining(
      &self.description,
      limits.description
    )
  }

  pub fn validate(
    &self,
    limits: &Limits
  ) -> Result<NaiveDate, FieldError> {
    let Some(deadline) = self.deadline
    else {
      return Err(
        FieldError::MissingTaskFields
      );
    };
    if self.title.is_empty() {
      return Err(
        FieldError::MissingTaskFields
      );
    }
    if self.title_remaining(limits) < 0 {
      return Err(FieldError::TitleTooLong {
        limit: limits.title
      });
    }
    if self.description_remaining(limits) < 0
    {
      return Err(
        FieldError::DescriptionTooLong {
          limit: limits.description
        }
      );
    }
    Ok(deadline)
  }

  pub fn to_request(
    &self,
    category_id: &str,
    config: &ClientConfig
  ) -> Result<NewTask, FieldError> {
    let deadline =
      self.validate(&config.limits)?;
    let description =
      if self.description.trim().is_empty()
      {
        config.tasks.empty_description.clone()
      } else {
        self.description.clone()
      };
    Ok(NewTask {
      title: self.title.clone(),
      description,
      deadline: deadline_iso(deadline),
      category_id: category_id.to_string()
    })
  }
}

/// Tasks of the active category.
pub struct TaskPanel<T> {
  session:   Session<T>,
  config:    ClientConfig,
  in_flight: InFlight
}

impl<T> Clone for TaskPanel<T> {
  fn clone(&self) -> Self {
    Self {
      session:   self.session.clone(),
      config:    self.config.clone(),
      in_flight: self.in_flight.clone()
    }
  }
}

impl<T: Transport> TaskPanel<T> {
  pub fn new(
    session: Session<T>,
    config: ClientConfig
  ) -> Self {
    let in_flight =
      InFlight::new(session.context().clone());
    Self {
      session,
      config,
      in_flight
    }
  }

  pub fn config(&self) -> &ClientConfig {
    &self.config
  }

  pub fn is_creating(&self) -> bool {
    self.in_flight.is_active(CREATE_KEY)
  }

  pub fn is_pending(&self, task_id: &str) -> bool {
    self.in_flight.is_active(task_id)
  }

  /// Tasks of the active category in server order. With no active
  /// category nothing is requested and the list is empty.
  #[tracing::instrument(skip_all)]
  pub async fn list(
    &self
  ) -> Result<Vec<Task>, ApiError> {
    let ctx = self.session.context();
    let Some(category_id) =
      ctx.active_category()
    else {
      debug!("no active category; skipping task fetch");
      return Ok(Vec::new());
    };

    let client = self.session.client();
    let id = category_id.as_str();
    match self
      .session
      .authorized(|| client.list_tasks(id))
      .await
    {
      | Ok(tasks) => {
        debug!(category = %id, count = tasks.len(), "tasks loaded");
        Ok(tasks)
      }
      | Err(ApiError::Http {
        status: 404,
        ..
      }) => {
        debug!(category = %id, "category has no tasks");
        Ok(Vec::new())
      }
      | Err(ApiError::SessionExpired) => {
        Err(ApiError::SessionExpired)
      }
      | Err(failure) => {
        ctx.error(failure.user_message(
          "Error fetching tasks"
        ));
        Err(failure)
      }
    }
  }

  /// Validates the draft, then creates the task in the active
  /// category. Nothing is sent when validation fails.
  #[tracing::instrument(skip_all)]
  pub async fn create(
    &self,
    draft: &TaskDraft
  ) -> Result<(), ApiError> {
    let ctx = self.session.context();
    let request = ctx
      .active_category()
      .ok_or(FieldError::NoActiveCategory)
      .and_then(|category_id| {
        draft.to_request(
          &category_id,
          &self.config
        )
      });
    let request = match request {
      | Ok(request) => request,
      | Err(invalid) => {
        ctx.error(invalid.to_string());
        return Err(invalid.into());
      }
    };
    let _guard = self
      .in_flight
      .begin(CREATE_KEY)
      .ok_or(ApiError::Busy)?;

    let client = self.session.client();
    let body = &request;
    match self
      .session
      .authorized(|| client.create_task(body))
      .await
    {
      | Ok(()) => {
        info!(title = %request.title, "task created");
        ctx.success(format!(
          "{} task added.",
          request.title
        ));
        ctx.notify_tasks_changed();
        Ok(())
      }
      | Err(ApiError::SessionExpired) => {
        Err(ApiError::SessionExpired)
      }
      | Err(failure) => {
        ctx.error(failure.user_message(
          "Unable to add task. Try again."
        ));
        Err(failure)
      }
    }
  }

  /// Flips completion on the server. The returned copy reflects the new
  /// state; it is produced only after the server accepted the change.
  #[tracing::instrument(skip_all)]
  pub async fn toggle(
    &self,
    task: &Task
  ) -> Result<Task, ApiError> {
    let ctx = self.session.context();
    let _guard = self
      .in_flight
      .begin(&task.id)
      .ok_or(ApiError::Busy)?;

    let client = self.session.client();
    let id = task.id.as_str();
    match self
      .session
      .authorized(|| client.toggle_task(id))
      .await
    {
      | Ok(()) => {
        let mut updated = task.clone();
        updated.is_complete =
          !task.is_complete;
        info!(%id, complete = updated.is_complete, "task toggled");
        ctx.notify_tasks_changed();
        Ok(updated)
      }
      | Err(ApiError::SessionExpired) => {
        Err(ApiError::SessionExpired)
      }
      | Err(failure) => {
        ctx.error(failure.user_message(
          "Unable to update task. Try \
           again."
        ));
        Err(failure)
      }
    }
  }

  #[tracing::instrument(skip_all)]
  pub async fn delete(
    &self,
    task: &Task
  ) -> Result<(), ApiError> {
    let ctx = self.session.context();
    let _guard = self
      .in_flight
      .begin(&task.id)
      .ok_or(ApiError::Busy)?;

    let client = self.session.client();
    let id = task.id.as_str();
    match self
      .session
      .authorized(|| client.delete_task(id))
      .await
    {
      | Ok(()) => {
        info!(%id, "task deleted");
        ctx.success(format!(
          "{} task deleted.",
          task.title
        ));
        ctx.notify_tasks_changed();
        Ok(())
      }
      | Err(ApiError::SessionExpired) => {
        Err(ApiError::SessionExpired)
      }
      | Err(failure) => {
        ctx.error(failure.user_message(
          "Unable to delete task. Try \
           again."
        ));
        Err(failure)
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use chrono::{
    DateTime,
    Utc
  };

  use super::*;

  fn date(
    y: i32,
    m: u32,
    d: u32
  ) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d)
      .expect("valid date")
  }

  fn task(title: &str) -> Task {
    Task {
      id:          title.to_lowercase(),
      title:       title.to_string(),
      description: String::new(),
      deadline:    DateTime::<Utc>::from_naive_utc_and_offset(
        date(2026, 3, 15)
          .and_hms_opt(0, 0, 0)
          .expect("midnight"),
        Utc
      ),
      is_complete: false,
      category_id: "c1".to_string(),
      created_at:  None,
      updated_at:  None
    }
  }

  #[test]
  fn search_is_case_insensitive_on_title() {
    let tasks =
      vec![task("Buy milk"), task("Pay bills")];
    let hits: Vec<&str> =
      filter_tasks(&tasks, "bu")
        .into_iter()
        .map(|task| task.title.as_str())
        .collect();
    assert_eq!(hits, vec!["Buy milk"]);

    assert_eq!(
      filter_tasks(&tasks, "").len(),
      2
    );
    assert!(
      filter_tasks(&tasks, "BILLS")
        .iter()
        .all(|task| task.title == "Pay bills")
    );
  }

  #[test]
  fn search_ignores_description() {
    let mut with_desc = task("Call mum");
    with_desc.description =
      "buy flowers".to_string();
    let tasks = vec![with_desc];
    assert!(filter_tasks(&tasks, "buy").is_empty());
  }

  #[test]
  fn deadline_status_compares_days() {
    let today = date(2026, 3, 15);
    assert_eq!(
      deadline_status(date(2026, 3, 14), today),
      DeadlineStatus::Overdue
    );
    assert_eq!(
      deadline_status(today, today),
      DeadlineStatus::DueToday
    );
    assert_eq!(
      deadline_status(date(2026, 3, 16), today),
      DeadlineStatus::Upcoming
    );
  }

  #[test]
  fn deadline_formats() {
    assert_eq!(
      format_deadline(date(2026, 3, 5)),
      "5 March 2026"
    );
    assert_eq!(
      deadline_iso(date(2026, 3, 5)),
      "2026-03-05T00:00:00.000Z"
    );
  }

  #[test]
  fn draft_refuses_input_past_limits() {
    let limits = Limits::default();
    let mut draft =
      TaskDraft::new(date(2026, 3, 15));

    assert!(draft.set_title(
      "fifteen chars!!",
      &limits
    ));
    assert_eq!(draft.title_remaining(&limits), 0);
    assert!(!draft.set_title(
      "sixteen chars!!!",
      &limits
    ));
    assert_eq!(draft.title, "fifteen chars!!");

    assert!(draft.set_description(
      "ünïcödé counts chars not bytes",
      &limits
    ));
    assert_eq!(
      draft.description_remaining(&limits),
      0
    );
  }

  #[test]
  fn sixteen_char_title_is_rejected_at_submit(
  ) {
    let config = ClientConfig::default();
    let mut draft =
      TaskDraft::new(date(2026, 3, 15));
    draft.title = "a".repeat(16);
    assert_eq!(
      draft.to_request("c1", &config),
      Err(FieldError::TitleTooLong {
        limit: 15
      })
    );
  }

  #[test]
  fn blank_description_gets_placeholder() {
    let config = ClientConfig::default();
    let mut draft =
      TaskDraft::new(date(2026, 3, 15));
    draft.title = "Buy milk".to_string();
    draft.description = "   ".to_string();

    let request = draft
      .to_request("c1", &config)
      .expect("valid draft");
    assert_eq!(
      request.description,
      "No description given"
    );
    assert_eq!(
      request.deadline,
      "2026-03-15T00:00:00.000Z"
    );
    assert_eq!(request.category_id, "c1");
  }

  #[test]
  fn title_and_date_are_required() {
    let limits = Limits::default();
    let mut draft =
      TaskDraft::new(date(2026, 3, 15));
    assert_eq!(
      draft.validate(&limits),
      Err(FieldError::MissingTaskFields)
    );
    draft.title = "Buy milk".to_string();
    draft.deadline = None;
    assert_eq!(
      draft.validate(&limits),
      Err(FieldError::MissingTaskFields)
    );
  }
}
