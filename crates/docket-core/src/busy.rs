use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use crate::context::AppContext;

/// Keys of the mutations currently awaiting a response.
///
/// A control whose key is active stays disabled; a second submission
/// while the first is outstanding is refused instead of queued. Every
/// change is published as [`StoreEvent::BusyChanged`] so views re-read
/// their disabled state.
///
/// [`StoreEvent::BusyChanged`]: crate::context::StoreEvent::BusyChanged
#[derive(Debug, Clone)]
pub struct InFlight {
  keys: Rc<RefCell<BTreeSet<String>>>,
  ctx:  AppContext
}

/// Releases its key when dropped.
#[derive(Debug)]
pub struct InFlightGuard {
  in_flight: InFlight,
  key:       String
}

impl InFlight {
  pub fn new(ctx: AppContext) -> Self {
    Self {
      keys: Rc::default(),
      ctx
    }
  }

  pub fn begin(
    &self,
    key: &str
  ) -> Option<InFlightGuard> {
    let inserted = self
      .keys
      .borrow_mut()
      .insert(key.to_string());
    if !inserted {
      return None;
    }
    self.ctx.notify_busy_changed();
    Some(InFlightGuard {
      in_flight: self.clone(),
      key:       key.to_string()
    })
  }

  pub fn is_active(&self, key: &str) -> bool {
    self.keys.borrow().contains(key)
  }

  pub fn is_idle(&self) -> bool {
    self.keys.borrow().is_empty()
  }
}

impl Drop for InFlightGuard {
  fn drop(&mut self) {
    self
      .in_flight
      .keys
      .borrow_mut()
      .remove(&self.key);
    self.in_flight.ctx.notify_busy_changed();
  }
}

#[cfg(test)]
mod tests {
  use std::cell::Cell;

  use super::*;
  use crate::context::StoreEvent;

  #[test]
  fn second_begin_is_refused_until_drop() {
    let in_flight =
      InFlight::new(AppContext::new());
    let guard = in_flight
      .begin("create")
      .expect("first begin");
    assert!(in_flight.begin("create").is_none());
    assert!(in_flight.is_active("create"));
    assert!(
      in_flight.begin("t1").is_some()
    );

    drop(guard);
    assert!(in_flight.is_idle());
    assert!(
      in_flight.begin("create").is_some()
    );
  }

  #[test]
  fn begin_and_release_are_published() {
    let ctx = AppContext::new();
    let seen = Rc::new(Cell::new(0));
    let counter = Rc::clone(&seen);
    ctx.subscribe(move |event| {
      if *event == StoreEvent::BusyChanged {
        counter.set(counter.get() + 1);
      }
    });

    let in_flight = InFlight::new(ctx);
    let guard = in_flight
      .begin("create")
      .expect("first begin");
    assert_eq!(seen.get(), 1);

    assert!(in_flight.begin("create").is_none());
    assert_eq!(seen.get(), 1);

    drop(guard);
    assert_eq!(seen.get(), 2);
  }
}
