//! In-memory stand-in for the task backend, speaking the same paths and
//! payloads over the `Transport` seam.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::BTreeMap;

use chrono::{
  DateTime,
  Utc
};
use docket_core::api::endpoints;
use docket_core::http::{
  ApiRequest,
  ApiResponse,
  Method,
  Transport
};
use docket_core::model::{
  Category,
  Task,
  User
};
use docket_core::{
  ApiClient,
  ApiError,
  AppContext,
  Session
};
use percent_encoding::percent_decode_str;
use serde_json::{
  Value,
  json
};

#[derive(Debug, Clone)]
struct Account {
  id:       String,
  username: String,
  email:    String,
  password: String
}

#[derive(Debug, Default)]
struct BackendState {
  accounts:      Vec<Account>,
  signed_in:     Option<User>,
  access_valid:  bool,
  refresh_valid: bool,
  offline:       bool,
  // Refresh answers 200 without a user in the body.
  anonymous_refresh: bool,
  // Refresh answers 200 but access tokens keep failing.
  stale_refresh: bool,
  categories:    Vec<Category>,
  tasks:         Vec<Task>,
  next_id:       u64
}

#[derive(Debug, Default)]
pub struct FakeBackend {
  state: RefCell<BackendState>,
  log:   RefCell<Vec<ApiRequest>>
}

pub type TestSession = Session<FakeBackend>;

pub fn session_with(
  backend: FakeBackend
) -> TestSession {
  Session::new(
    AppContext::new(),
    ApiClient::new(backend)
  )
}

pub fn backend(
  session: &TestSession
) -> &FakeBackend {
  session.client().transport()
}

impl FakeBackend {
  pub fn new() -> Self {
    Self::default()
  }

  /// A backend with one account whose access and refresh tokens are
  /// both live.
  pub fn signed_in(username: &str) -> Self {
    let backend = Self::new();
    let user = backend.add_account(
      username,
      &format!("{username}@example.com"),
      "Secur3!pw"
    );
    {
      let mut state =
        backend.state.borrow_mut();
      state.signed_in = Some(user);
      state.access_valid = true;
      state.refresh_valid = true;
    }
    backend
  }

  fn next_id(&self, prefix: &str) -> String {
    let mut state = self.state.borrow_mut();
    state.next_id += 1;
    format!("{prefix}{}", state.next_id)
  }

  pub fn add_account(
    &self,
    username: &str,
    email: &str,
    password: &str
  ) -> User {
    let id = self.next_id("u");
    self.state.borrow_mut().accounts.push(
      Account {
        id:       id.clone(),
        username: username.to_string(),
        email:    email.to_string(),
        password: password.to_string()
      }
    );
    User::new(&id, username)
  }

  pub fn seed_category(
    &self,
    name: &str
  ) -> String {
    let id = self.next_id("c");
    self.state.borrow_mut().categories.push(
      Category {
        id:         id.clone(),
        name:       name.to_string(),
        created_at: None,
        updated_at: None,
        todo_ids:   vec![]
      }
    );
    id
  }

  pub fn seed_task(
    &self,
    category_id: &str,
    title: &str
  ) -> String {
    let id = self.next_id("t");
    let deadline = DateTime::parse_from_rfc3339(
      "2026-03-15T00:00:00.000Z"
    )
    .expect("valid deadline")
    .with_timezone(&Utc);
    let mut state = self.state.borrow_mut();
    state.tasks.push(Task {
      id:          id.clone(),
      title:       title.to_string(),
      description: String::new(),
      deadline,
      is_complete: false,
      category_id: category_id.to_string(),
      created_at:  None,
      updated_at:  None
    });
    if let Some(category) = state
      .categories
      .iter_mut()
      .find(|category| category.id == category_id)
    {
      category.todo_ids.push(id.clone());
    }
    id
  }

  pub fn expire_access(&self) {
    self.state.borrow_mut().access_valid =
      false;
  }

  pub fn revoke_refresh(&self) {
    self.state.borrow_mut().refresh_valid =
      false;
  }

  pub fn refresh_without_identity(&self) {
    self.state.borrow_mut().anonymous_refresh =
      true;
  }

  pub fn refresh_without_access(&self) {
    self.state.borrow_mut().stale_refresh = true;
  }

  pub fn go_offline(&self) {
    self.state.borrow_mut().offline = true;
  }

  pub fn task(&self, id: &str) -> Option<Task> {
    self
      .state
      .borrow()
      .tasks
      .iter()
      .find(|task| task.id == id)
      .cloned()
  }

  pub fn requests(&self) -> Vec<ApiRequest> {
    self.log.borrow().clone()
  }

  /// Paths without query strings, in request order.
  pub fn paths(&self) -> Vec<String> {
    self
      .log
      .borrow()
      .iter()
      .map(|request| {
        request
          .path
          .split('?')
          .next()
          .unwrap_or_default()
          .to_string()
      })
      .collect()
  }

  pub fn count(&self, endpoint: &str) -> usize {
    self
      .paths()
      .iter()
      .filter(|path| path.as_str() == endpoint)
      .count()
  }

  fn handle(
    &self,
    request: &ApiRequest
  ) -> ApiResponse {
    let (path, query) = split_query(&request.path);
    let body =
      request.body.clone().unwrap_or(Value::Null);

    match (request.method, path.as_str()) {
      | (Method::Post, endpoints::REGISTER) => {
        self.register(&body)
      }
      | (Method::Post, endpoints::LOGIN) => {
        self.login(&body)
      }
      | (Method::Post, endpoints::LOGOUT) => {
        let mut state = self.state.borrow_mut();
        state.signed_in = None;
        state.access_valid = false;
        state.refresh_valid = false;
        ok(json!({ "message": "logged out" }))
      }
      | (Method::Get, endpoints::VALIDATION) => {
        let state = self.state.borrow();
        match (&state.signed_in, state.access_valid) {
          | (Some(user), true) => ok(identity(user)),
          | _ => unauthorized()
        }
      }
      | (Method::Get, endpoints::NEW_TOKEN) => {
        let mut state = self.state.borrow_mut();
        match (state.signed_in.clone(), state.refresh_valid) {
          | (Some(user), true) => {
            state.access_valid = !state.stale_refresh;
            if state.anonymous_refresh {
              ok(json!({ "message": "Token refreshed" }))
            } else {
              ok(identity(&user))
            }
          }
          | _ => unauthorized()
        }
      }
      | _ => self.todo_route(request.method, &path, &query, &body)
    }
  }

  fn register(&self, body: &Value) -> ApiResponse {
    let username = text(body, "username");
    let taken = self
      .state
      .borrow()
      .accounts
      .iter()
      .any(|account| account.username == username);
    if taken {
      return status(
        400,
        json!({ "message": "User already exists" })
      );
    }
    self.add_account(
      &username,
      &text(body, "email"),
      &text(body, "password")
    );
    status(201, json!({ "message": "created" }))
  }

  fn login(&self, body: &Value) -> ApiResponse {
    let identifier = text(body, "identifier");
    let password = text(body, "password");
    let account = self
      .state
      .borrow()
      .accounts
      .iter()
      .find(|account| {
        (account.username == identifier
          || account.email == identifier)
          && account.password == password
      })
      .cloned();
    let Some(account) = account else {
      return status(
        401,
        json!({ "message": "Invalid credentials" })
      );
    };
    let user = User::new(&account.id, &account.username);
    let mut state = self.state.borrow_mut();
    state.signed_in = Some(user.clone());
    state.access_valid = true;
    state.refresh_valid = true;
    ok(identity(&user))
  }

  fn todo_route(
    &self,
    method: Method,
    path: &str,
    query: &BTreeMap<String, String>,
    body: &Value
  ) -> ApiResponse {
    if !self.state.borrow().access_valid {
      return unauthorized();
    }
    let param = |key: &str| {
      query.get(key).cloned().unwrap_or_default()
    };

    match (method, path) {
      | (Method::Get, endpoints::LIST_CATEGORIES) => {
        let state = self.state.borrow();
        ok(json!({ "data": state.categories }))
      }
      | (Method::Post, endpoints::CREATE_CATEGORY) => {
        let name = text(body, "categoryName");
        let duplicate = self
          .state
          .borrow()
          .categories
          .iter()
          .any(|category| category.name == name);
        if duplicate {
          return status(
            409,
            json!({ "message": "Category already exists" })
          );
        }
        let id = self.seed_category(&name);
        status(201, json!({ "data": { "_id": id } }))
      }
      | (Method::Delete, endpoints::DELETE_CATEGORY) => {
        let id = param("id");
        let mut state = self.state.borrow_mut();
        let before = state.categories.len();
        state.categories.retain(|category| category.id != id);
        if before == state.categories.len() {
          return status(
            404,
            json!({ "message": "Category not found" })
          );
        }
        state.tasks.retain(|task| task.category_id != id);
        ok(json!({ "message": "deleted" }))
      }
      | (Method::Get, endpoints::LIST_TASKS) => {
        let id = param("categoryId");
        let state = self.state.borrow();
        if !state.categories.iter().any(|category| category.id == id) {
          return status(
            404,
            json!({ "message": "Category not found" })
          );
        }
        let tasks: Vec<&Task> = state
          .tasks
          .iter()
          .filter(|task| task.category_id == id)
          .collect();
        ok(json!({ "data": tasks }))
      }
      | (Method::Post, endpoints::CREATE_TASK) => {
        let category_id = text(body, "todoCategoryId");
        let id = self.seed_task(&category_id, &text(body, "title"));
        let deadline = DateTime::parse_from_rfc3339(&text(body, "deadline"))
          .map(|parsed| parsed.with_timezone(&Utc));
        let mut state = self.state.borrow_mut();
        if let Some(task) = state.tasks.iter_mut().find(|task| task.id == id) {
          task.description = text(body, "description");
          if let Ok(deadline) = deadline {
            task.deadline = deadline;
          }
        }
        status(201, json!({ "data": { "_id": id } }))
      }
      | (Method::Get, endpoints::TOGGLE_TASK) => {
        let id = param("todoId");
        let mut state = self.state.borrow_mut();
        match state.tasks.iter_mut().find(|task| task.id == id) {
          | Some(task) => {
            task.is_complete = !task.is_complete;
            ok(json!({ "message": "toggled" }))
          }
          | None => status(
            404,
            json!({ "message": "Task not found" })
          )
        }
      }
      | (Method::Delete, endpoints::DELETE_TASK) => {
        let id = param("id");
        let mut state = self.state.borrow_mut();
        state.tasks.retain(|task| task.id != id);
        for category in state.categories.iter_mut() {
          category.todo_ids.retain(|todo| *todo != id);
        }
        ok(json!({ "message": "deleted" }))
      }
      | _ => status(404, json!({ "message": "Not found" }))
    }
  }
}

impl Transport for FakeBackend {
  async fn send(
    &self,
    request: ApiRequest
  ) -> Result<ApiResponse, ApiError> {
    // Give other tasks on the loop a chance to run, as a real network
    // round trip would.
    tokio::task::yield_now().await;
    self.log.borrow_mut().push(request.clone());
    if self.state.borrow().offline {
      return Err(ApiError::Transport(
        "network unreachable".to_string()
      ));
    }
    Ok(self.handle(&request))
  }
}

fn split_query(
  raw: &str
) -> (String, BTreeMap<String, String>) {
  let (path, query) =
    raw.split_once('?').unwrap_or((raw, ""));
  let params = query
    .split('&')
    .filter_map(|pair| pair.split_once('='))
    .map(|(key, value)| {
      (
        key.to_string(),
        percent_decode_str(value)
          .decode_utf8_lossy()
          .into_owned()
      )
    })
    .collect();
  (path.to_string(), params)
}

fn text(body: &Value, key: &str) -> String {
  body
    .get(key)
    .and_then(Value::as_str)
    .unwrap_or_default()
    .to_string()
}

fn identity(user: &User) -> Value {
  json!({
    "data": {
      "id": user.user_id,
      "username": user.username
    }
  })
}

fn ok(body: Value) -> ApiResponse {
  status(200, body)
}

fn unauthorized() -> ApiResponse {
  status(
    401,
    json!({ "message": "Unauthorized" })
  )
}

fn status(code: u16, body: Value) -> ApiResponse {
  ApiResponse::new(code, body.to_string())
}
