use yew::{
  Callback,
  Html,
  function_component,
  html,
  use_state
};

use crate::app::{
  ui_debug,
  use_services,
  use_store
};

#[function_component(Navbar)]
pub fn navbar() -> Html {
  let services = use_services();
  use_store(services.ctx());
  let menu_open = use_state(|| false);
  let busy = services.auth.is_busy();

  let on_logout = {
    let auth = services.auth.clone();
    Callback::from(move |_| {
      if auth.is_busy() {
        return;
      }
      let auth = auth.clone();
      wasm_bindgen_futures::spawn_local(
        async move {
          let outcome = auth.logout().await;
          ui_debug(
            "navbar.logout",
            &format!("ok={}", outcome.is_ok())
          );
        }
      );
    })
  };

  let on_menu = {
    let menu_open = menu_open.clone();
    Callback::from(move |_| {
      menu_open.set(!*menu_open);
    })
  };

  html! {
      <nav class="navbar">
          <div class="navbar-inner">
              <h1 class="navbar-title">{ "ToDo" }</h1>
              <div class="navbar-actions desktop-only">
                  <button class="btn primary" onclick={on_logout.clone()} disabled={busy}>
                      { "Logout" }
                  </button>
              </div>
              <button class="menu-toggle mobile-only" onclick={on_menu}>
                  { "☰" }
              </button>
          </div>
          {
              if *menu_open {
                  html! {
                      <div class="navbar-menu mobile-only">
                          <button class="btn primary" onclick={on_logout} disabled={busy}>
                              { "Logout" }
                          </button>
                      </div>
                  }
              } else {
                  html! {}
              }
          }
      </nav>
  }
}
