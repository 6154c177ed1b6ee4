use std::rc::Rc;

use serde::de::DeserializeOwned;
use tracing::{
  debug,
  warn
};

use crate::error::ApiError;
use crate::http::{
  ApiRequest,
  ApiResponse,
  Transport,
  with_query
};
use crate::model::{
  Category,
  Envelope,
  LoginRequest,
  LogoutRequest,
  NewCategory,
  NewTask,
  RegisterRequest,
  Task,
  User
};

pub mod endpoints {
  pub const REGISTER: &str =
    "/api/auth/register";
  pub const LOGIN: &str = "/api/auth/login";
  pub const LOGOUT: &str =
    "/api/auth/logout";
  pub const VALIDATION: &str =
    "/api/auth/validation";
  pub const NEW_TOKEN: &str =
    "/api/token/newToken";
  pub const LIST_CATEGORIES: &str =
    "/api/todo/getToDoCategory";
  pub const CREATE_CATEGORY: &str =
    "/api/todo/createToDoCategory";
  pub const DELETE_CATEGORY: &str =
    "/api/todo/deleteToDoCategory";
  pub const LIST_TASKS: &str =
    "/api/todo/getToDo";
  pub const CREATE_TASK: &str =
    "/api/todo/createToDo";
  pub const TOGGLE_TASK: &str =
    "/api/todo/toggleToDo";
  pub const DELETE_TASK: &str =
    "/api/todo/deleteToDo";
}

/// Typed wrapper over the backend REST endpoints.
pub struct ApiClient<T> {
  transport: Rc<T>
}

impl<T> Clone for ApiClient<T> {
  fn clone(&self) -> Self {
    Self {
      transport: Rc::clone(
        &self.transport
      )
    }
  }
}

impl<T: Transport> ApiClient<T> {
  pub fn new(transport: T) -> Self {
    Self {
      transport: Rc::new(transport)
    }
  }

  pub fn transport(&self) -> &T {
    &self.transport
  }

  async fn execute(
    &self,
    request: ApiRequest
  ) -> Result<ApiResponse, ApiError> {
    let method = request.method;
    let path = request.path.clone();
    let response =
      self.transport.send(request).await?;

    if response.is_unauthorized() {
      warn!(method = method.as_str(), %path, "request unauthorized");
      return Err(ApiError::Unauthorized);
    }
    if !response.is_success() {
      warn!(
        method = method.as_str(),
        %path,
        status = response.status,
        "request failed"
      );
      return Err(ApiError::Http {
        status:  response.status,
        message: response.error_message()
      });
    }

    debug!(method = method.as_str(), %path, status = response.status, "request ok");
    Ok(response)
  }

  async fn fetch_data<D>(
    &self,
    request: ApiRequest
  ) -> Result<Option<D>, ApiError>
  where
    D: DeserializeOwned
  {
    let response =
      self.execute(request).await?;
    if response.body.trim().is_empty() {
      return Ok(None);
    }
    Ok(response.json::<Envelope<D>>()?.data)
  }

  async fn fetch_identity(
    &self,
    request: ApiRequest
  ) -> Result<User, ApiError> {
    self
      .fetch_data::<User>(request)
      .await?
      .ok_or_else(|| {
        ApiError::Decode(
          "response carried no user"
            .to_string()
        )
      })
  }

  pub async fn register(
    &self,
    request: &RegisterRequest
  ) -> Result<(), ApiError> {
    self
      .execute(ApiRequest::post(
        endpoints::REGISTER,
        request
      )?)
      .await
      .map(|_| ())
  }

  pub async fn login(
    &self,
    request: &LoginRequest
  ) -> Result<User, ApiError> {
    self
      .fetch_identity(ApiRequest::post(
        endpoints::LOGIN,
        request
      )?)
      .await
  }

  pub async fn logout(
    &self,
    user_id: &str
  ) -> Result<(), ApiError> {
    let body = LogoutRequest {
      userid: user_id.to_string()
    };
    self
      .execute(ApiRequest::post(
        endpoints::LOGOUT,
        &body
      )?)
      .await
      .map(|_| ())
  }

  pub async fn validate(
    &self
  ) -> Result<User, ApiError> {
    self
      .fetch_identity(ApiRequest::get(
        endpoints::VALIDATION
      ))
      .await
  }

  /// Raw token refresh. The status is left for the caller to judge.
  pub async fn refresh_token(
    &self
  ) -> Result<ApiResponse, ApiError> {
    self
      .transport
      .send(ApiRequest::get(
        endpoints::NEW_TOKEN
      ))
      .await
  }

  pub async fn list_categories(
    &self
  ) -> Result<Vec<Category>, ApiError> {
    Ok(
      self
        .fetch_data::<Vec<Category>>(
          ApiRequest::get(
            endpoints::LIST_CATEGORIES
          )
        )
        .await?
        .unwrap_or_default()
    )
  }

  pub async fn create_category(
    &self,
    name: &str
  ) -> Result<(), ApiError> {
    let body = NewCategory {
      name: name.to_string()
    };
    self
      .execute(ApiRequest::post(
        endpoints::CREATE_CATEGORY,
        &body
      )?)
      .await
      .map(|_| ())
  }

  pub async fn delete_category(
    &self,
    id: &str
  ) -> Result<(), ApiError> {
    self
      .execute(ApiRequest::delete(
        with_query(
          endpoints::DELETE_CATEGORY,
          "id",
          id
        )
      ))
      .await
      .map(|_| ())
  }

  pub async fn list_tasks(
    &self,
    category_id: &str
  ) -> Result<Vec<Task>, ApiError> {
    Ok(
      self
        .fetch_data::<Vec<Task>>(
          ApiRequest::get(with_query(
            endpoints::LIST_TASKS,
            "categoryId",
            category_id
          ))
        )
        .await?
        .unwrap_or_default()
    )
  }

  pub async fn create_task(
    &self,
    task: &NewTask
  ) -> Result<(), ApiError> {
    self
      .execute(ApiRequest::post(
        endpoints::CREATE_TASK,
        task
      )?)
      .await
      .map(|_| ())
  }

  pub async fn toggle_task(
    &self,
    id: &str
  ) -> Result<(), ApiError> {
    self
      .execute(ApiRequest::get(
        with_query(
          endpoints::TOGGLE_TASK,
          "todoId",
          id
        )
      ))
      .await
      .map(|_| ())
  }

  pub async fn delete_task(
    &self,
    id: &str
  ) -> Result<(), ApiError> {
    self
      .execute(ApiRequest::delete(
        with_query(
          endpoints::DELETE_TASK,
          "id",
          id
        )
      ))
      .await
      .map(|_| ())
  }
}
