use tracing::{
  debug,
  info
};

use crate::busy::InFlight;
use crate::error::{
  ApiError,
  FieldError
};
use crate::http::Transport;
use crate::model::Category;
use crate::session::Session;

// Create and delete share one key: the sidebar disables both while
// either is outstanding.
const MUTATION_KEY: &str = "categories";

/// Lists, creates, deletes and selects task categories.
pub struct CategoryPanel<T> {
  session:   Session<T>,
  in_flight: InFlight
}

impl<T> Clone for CategoryPanel<T> {
  fn clone(&self) -> Self {
    Self {
      session:   self.session.clone(),
      in_flight: self.in_flight.clone()
    }
  }
}

impl<T: Transport> CategoryPanel<T> {
  pub fn new(session: Session<T>) -> Self {
    let in_flight =
      InFlight::new(session.context().clone());
    Self {
      session,
      in_flight
    }
  }

  pub fn is_busy(&self) -> bool {
    self.in_flight.is_active(MUTATION_KEY)
  }

  pub fn active(&self) -> Option<String> {
    self.session.context().active_category()
  }

  pub fn select(&self, category: &Category) {
    debug!(id = %category.id, "selecting category");
    self
      .session
      .context()
      .set_active_category(Some(
        category.id.clone()
      ));
  }

  /// Fetches the categories and keeps the active category pointing at
  /// one of them: an unknown or missing selection falls back to the
  /// first entry, or to none when the list is empty.
  #[tracing::instrument(skip_all)]
  pub async fn list(
    &self
  ) -> Result<Vec<Category>, ApiError> {
    let ctx = self.session.context();
    let client = self.session.client();

    match self
      .session
      .authorized(|| client.list_categories())
      .await
    {
      | Ok(categories) => {
        debug!(count = categories.len(), "categories loaded");
        let active = ctx.active_category();
        let still_present =
          active.as_ref().is_some_and(|id| {
            categories
              .iter()
              .any(|category| &category.id == id)
          });
        if !still_present {
          ctx.set_active_category(
            categories
              .first()
              .map(|category| category.id.clone())
          );
        }
        Ok(categories)
      }
      | Err(ApiError::SessionExpired) => {
        Err(ApiError::SessionExpired)
      }
      | Err(failure) => {
        ctx.error(failure.user_message(
          "Error fetching data"
        ));
        Err(failure)
      }
    }
  }

  #[tracing::instrument(skip_all)]
  pub async fn create(
    &self,
    name: &str
  ) -> Result<(), ApiError> {
    let ctx = self.session.context();
    let name = name.trim();
    if name.is_empty() {
      let invalid =
        FieldError::EmptyCategoryName;
      ctx.error(invalid.to_string());
      return Err(invalid.into());
    }
    let _guard = self
      .in_flight
      .begin(MUTATION_KEY)
      .ok_or(ApiError::Busy)?;

    let client = self.session.client();
    match self
      .session
      .authorized(|| {
        client.create_category(name)
      })
      .await
    {
      | Ok(()) => {
        info!(%name, "category created");
        ctx.success(format!(
          "{name} category added."
        ));
        ctx.notify_categories_changed();
        Ok(())
      }
      | Err(ApiError::SessionExpired) => {
        Err(ApiError::SessionExpired)
      }
      | Err(failure) => {
        ctx.error(failure.user_message(
          "Unable to add category. Try \
           again."
        ));
        Err(failure)
      }
    }
  }

  #[tracing::instrument(skip_all)]
  pub async fn delete(
    &self,
    category: &Category
  ) -> Result<(), ApiError> {
    let ctx = self.session.context();
    let _guard = self
      .in_flight
      .begin(MUTATION_KEY)
      .ok_or(ApiError::Busy)?;

    let client = self.session.client();
    let id = category.id.as_str();
    match self
      .session
      .authorized(|| client.delete_category(id))
      .await
    {
      | Ok(()) => {
        info!(%id, name = %category.name, "category deleted");
        ctx.success(format!(
          "{} category deleted.",
          category.name
        ));
        ctx.notify_categories_changed();
        Ok(())
      }
      | Err(ApiError::SessionExpired) => {
        Err(ApiError::SessionExpired)
      }
      | Err(failure) => {
        ctx.error(failure.user_message(
          "Failed to delete category. Try \
           again."
        ));
        Err(failure)
      }
    }
  }
}
