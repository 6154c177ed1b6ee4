use std::cell::{
  Cell,
  RefCell
};
use std::rc::Rc;

use tracing::debug;

use crate::model::User;
use crate::notice::{
  Notice,
  NoticeLevel
};

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash,
)]
pub enum Route {
  Root,
  Register,
  Login,
  Home
}

impl Route {
  pub fn path(self) -> &'static str {
    match self {
      | Route::Root => "/",
      | Route::Register => "/register",
      | Route::Login => "/login",
      | Route::Home => "/home"
    }
  }

  pub fn from_path(
    path: &str
  ) -> Option<Self> {
    match path.trim_end_matches('/') {
      | "" => Some(Route::Root),
      | "/register" => {
        Some(Route::Register)
      }
      | "/login" => Some(Route::Login),
      | "/home" => Some(Route::Home),
      | _ => None
    }
  }
}

/// Change notifications published by [`AppContext`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
  UserChanged,
  ActiveCategoryChanged,
  CategoriesChanged,
  TasksChanged,
  BusyChanged,
  Navigate(Route),
  Notified
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub struct Subscription(u64);

type Listener = Rc<dyn Fn(&StoreEvent)>;

#[derive(Debug, Default)]
struct State {
  user:             Option<User>,
  active_category:  Option<String>,
  categories_rev:   u64,
  tasks_rev:        u64,
  redirect:         Option<Route>,
  notices:          Vec<Notice>,
  next_notice_id:   u64
}

/// Shared client state: identity, active category, pending navigation,
/// notifications and the change revisions views refetch on.
///
/// Cloning yields another handle to the same state. Borrows are never
/// held across an `.await`, so handlers interleaving on the event loop
/// always observe a consistent snapshot.
#[derive(Clone, Default)]
pub struct AppContext {
  state:         Rc<RefCell<State>>,
  listeners:
    Rc<RefCell<Vec<(u64, Listener)>>>,
  next_listener: Rc<Cell<u64>>
}

impl PartialEq for AppContext {
  fn eq(&self, other: &Self) -> bool {
    Rc::ptr_eq(&self.state, &other.state)
  }
}

impl std::fmt::Debug for AppContext {
  fn fmt(
    &self,
    f: &mut std::fmt::Formatter<'_>
  ) -> std::fmt::Result {
    f.debug_struct("AppContext")
      .field("state", &self.state.borrow())
      .field(
        "listeners",
        &self.listeners.borrow().len()
      )
      .finish()
  }
}

impl AppContext {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn subscribe<F>(
    &self,
    listener: F
  ) -> Subscription
  where
    F: Fn(&StoreEvent) + 'static
  {
    let id = self.next_listener.get();
    self.next_listener.set(id + 1);
    self
      .listeners
      .borrow_mut()
      .push((id, Rc::new(listener)));
    Subscription(id)
  }

  pub fn unsubscribe(
    &self,
    subscription: Subscription
  ) {
    self
      .listeners
      .borrow_mut()
      .retain(|(id, _)| {
        *id != subscription.0
      });
  }

  fn emit(&self, event: StoreEvent) {
    debug!(?event, "store event");
    let listeners: Vec<Listener> = self
      .listeners
      .borrow()
      .iter()
      .map(|(_, listener)| {
        Rc::clone(listener)
      })
      .collect();
    for listener in listeners {
      listener(&event);
    }
  }

  pub fn user(&self) -> Option<User> {
    self.state.borrow().user.clone()
  }

  /// True when a non-empty username is known.
  pub fn has_identity(&self) -> bool {
    self
      .state
      .borrow()
      .user
      .as_ref()
      .is_some_and(|user| {
        !user.username.is_empty()
      })
  }

  pub fn set_user(
    &self,
    user: Option<User>
  ) {
    let changed = {
      let mut state =
        self.state.borrow_mut();
      if state.user == user {
        false
      } else {
        state.user = user;
        true
      }
    };
    if changed {
      self.emit(StoreEvent::UserChanged);
    }
  }

  pub fn clear_user(&self) {
    self.set_user(None);
  }

  pub fn active_category(
    &self
  ) -> Option<String> {
    self
      .state
      .borrow()
      .active_category
      .clone()
  }

  pub fn set_active_category(
    &self,
    id: Option<String>
  ) {
    let id = id.filter(|id| {
      !id.trim().is_empty()
    });
    let changed = {
      let mut state =
        self.state.borrow_mut();
      if state.active_category == id {
        false
      } else {
        state.active_category = id;
        true
      }
    };
    if changed {
      self.emit(
        StoreEvent::ActiveCategoryChanged
      );
    }
  }

  pub fn categories_revision(&self) -> u64 {
    self.state.borrow().categories_rev
  }

  pub fn tasks_revision(&self) -> u64 {
    self.state.borrow().tasks_rev
  }

  /// Tells category views to refetch.
  pub fn notify_categories_changed(&self) {
    {
      let mut state =
        self.state.borrow_mut();
      state.categories_rev =
        state.categories_rev.wrapping_add(1);
    }
    self.emit(
      StoreEvent::CategoriesChanged
    );
  }

  /// Tells task views to refetch.
  pub fn notify_tasks_changed(&self) {
    {
      let mut state =
        self.state.borrow_mut();
      state.tasks_rev =
        state.tasks_rev.wrapping_add(1);
    }
    self.emit(StoreEvent::TasksChanged);
  }

  /// A request started or finished; disabled controls may change.
  pub fn notify_busy_changed(&self) {
    self.emit(StoreEvent::BusyChanged);
  }

  pub fn navigate(&self, route: Route) {
    self.state.borrow_mut().redirect =
      Some(route);
    self.emit(StoreEvent::Navigate(route));
  }

  /// The most recent navigation request, consumed.
  pub fn take_redirect(
    &self
  ) -> Option<Route> {
    self.state.borrow_mut().redirect.take()
  }

  pub fn pending_redirect(
    &self
  ) -> Option<Route> {
    self.state.borrow().redirect
  }

  pub fn push_notice(
    &self,
    level: NoticeLevel,
    message: impl Into<String>
  ) -> u64 {
    let id = {
      let mut state =
        self.state.borrow_mut();
      state.next_notice_id += 1;
      let id = state.next_notice_id;
      state.notices.push(Notice {
        id,
        level,
        message: message.into()
      });
      id
    };
    self.emit(StoreEvent::Notified);
    id
  }

  pub fn success(
    &self,
    message: impl Into<String>
  ) -> u64 {
    self.push_notice(
      NoticeLevel::Success,
      message
    )
  }

  pub fn error(
    &self,
    message: impl Into<String>
  ) -> u64 {
    self.push_notice(
      NoticeLevel::Error,
      message
    )
  }

  pub fn notices(&self) -> Vec<Notice> {
    self.state.borrow().notices.clone()
  }

  pub fn dismiss(&self, id: u64) {
    let removed = {
      let mut state =
        self.state.borrow_mut();
      let before = state.notices.len();
      state
        .notices
        .retain(|notice| notice.id != id);
      before != state.notices.len()
    };
    if removed {
      self.emit(StoreEvent::Notified);
    }
  }
}
