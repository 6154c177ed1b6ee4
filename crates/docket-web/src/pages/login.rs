use docket_core::ApiError;
use docket_core::auth::LoginForm;
use web_sys::HtmlInputElement;
use yew::{
  Callback,
  Html,
  InputEvent,
  MouseEvent,
  SubmitEvent,
  TargetCast,
  classes,
  function_component,
  html,
  use_state
};
use yew_router::prelude::use_navigator;

use crate::app::{
  AppRoute,
  ui_debug,
  use_services,
  use_store
};

#[function_component(LoginPage)]
pub fn login_page() -> Html {
  let services = use_services();
  let navigator = use_navigator();
  let form = use_state(LoginForm::default);
  use_store(services.ctx());
  let loading = services.auth.is_busy();

  let on_identifier = {
    let form = form.clone();
    Callback::from(
      move |event: InputEvent| {
        let input: HtmlInputElement =
          event.target_unchecked_into();
        let mut next = (*form).clone();
        next.identifier = input.value();
        form.set(next);
      }
    )
  };

  let on_password = {
    let form = form.clone();
    Callback::from(
      move |event: InputEvent| {
        let input: HtmlInputElement =
          event.target_unchecked_into();
        let mut next = (*form).clone();
        next.password = input.value();
        form.set(next);
      }
    )
  };

  let on_submit = {
    let auth = services.auth.clone();
    let form = form.clone();
    Callback::from(
      move |event: SubmitEvent| {
        event.prevent_default();
        if auth.is_busy() {
          return;
        }
        let submitted = (*form).clone();
        let auth = auth.clone();
        let form = form.clone();
        wasm_bindgen_futures::spawn_local(
          async move {
            let outcome =
              auth.login(&submitted).await;
            ui_debug(
              "login.submit",
              &format!("ok={}", outcome.is_ok())
            );
            if !matches!(
              outcome,
              Err(ApiError::Validation(_))
            ) {
              form.set(LoginForm::default());
            }
          }
        );
      }
    )
  };

  let go_to_register = Callback::from(
    move |_: MouseEvent| {
      if let Some(navigator) = navigator.as_ref()
      {
        navigator.push(&AppRoute::Register);
      }
    }
  );

  html! {
      <div class="auth-page">
          <div class="auth-card">
              <h2 class="auth-title">{ "Login" }</h2>
              <form class="auth-form" onsubmit={on_submit}>
                  <label class="field">
                      <span class="field-label">{ "Username or Email" }</span>
                      <input class="input" type="text" placeholder="Enter username or email..."
                          value={form.identifier.clone()} oninput={on_identifier} />
                  </label>
                  <label class="field">
                      <span class="field-label">{ "Password" }</span>
                      <input class="input" type="password" placeholder="Enter password..."
                          value={form.password.clone()} oninput={on_password} />
                  </label>
                  <button type="submit" class="btn primary wide" disabled={loading}>
                      { if loading { "Logging in..." } else { "Login" } }
                  </button>
              </form>
              <span class={classes!("auth-switch", loading.then_some("disabled"))}>
                  <span>{ "Don't have an account?" }</span>
                  <span class="link" onclick={go_to_register}>{ "Register here." }</span>
              </span>
          </div>
      </div>
  }
}
