//! Client-side core of the docket task manager.
//!
//! Everything here is browser-agnostic: the web front end plugs a
//! [`http::Transport`] into an [`api::ApiClient`], wraps it in a
//! [`session::Session`] together with the shared [`context::AppContext`],
//! and drives the panels from UI events.

pub mod api;
pub mod auth;
pub mod busy;
pub mod categories;
pub mod config;
pub mod context;
pub mod datepicker;
pub mod error;
pub mod gate;
pub mod http;
pub mod model;
pub mod notice;
pub mod session;
pub mod tasks;
pub mod validation;

pub use api::ApiClient;
pub use config::ClientConfig;
pub use context::{
  AppContext,
  Route,
  StoreEvent
};
pub use error::{
  ApiError,
  FieldError
};
pub use session::Session;
