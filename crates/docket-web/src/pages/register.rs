use docket_core::ApiError;
use docket_core::auth::RegisterForm;
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

#[function_component(RegisterPage)]
pub fn register_page() -> Html {
  let services = use_services();
  let navigator = use_navigator();
  let form = use_state(RegisterForm::default);
  use_store(services.ctx());
  let loading = services.auth.is_busy();

  let field = |apply: fn(&mut RegisterForm, String)| {
    let form = form.clone();
    Callback::from(
      move |event: InputEvent| {
        let input: HtmlInputElement =
          event.target_unchecked_into();
        let mut next = (*form).clone();
        apply(&mut next, input.value());
        form.set(next);
      }
    )
  };
  let on_username =
    field(|form, value| form.username = value);
  let on_email =
    field(|form, value| form.email = value);
  let on_password =
    field(|form, value| form.password = value);

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
              auth.register(&submitted).await;
            ui_debug(
              "register.submit",
              &format!("ok={}", outcome.is_ok())
            );
            // Validation failures keep the input for correction.
            if !matches!(
              outcome,
              Err(ApiError::Validation(_))
            ) {
              form.set(RegisterForm::default());
            }
          }
        );
      }
    )
  };

  let go_to_login = Callback::from(
    move |_: MouseEvent| {
      if let Some(navigator) = navigator.as_ref()
      {
        navigator.push(&AppRoute::Login);
      }
    }
  );

  html! {
      <div class="auth-page">
          <div class="auth-card">
              <h2 class="auth-title">{ "Register" }</h2>
              <form class="auth-form" onsubmit={on_submit}>
                  <label class="field">
                      <span class="field-label">{ "Username" }</span>
                      <input class="input" type="text" placeholder="Enter username..."
                          value={form.username.clone()} oninput={on_username} />
                  </label>
                  <label class="field">
                      <span class="field-label">{ "Email" }</span>
                      <input class="input" type="email" placeholder="Enter email..."
                          value={form.email.clone()} oninput={on_email} />
                  </label>
                  <label class="field">
                      <span class="field-label">{ "Password" }</span>
                      <input class="input" type="password" placeholder="Enter password..."
                          value={form.password.clone()} oninput={on_password} />
                  </label>
                  <button type="submit" class="btn primary wide" disabled={loading}>
                      { if loading { "Registering..." } else { "Register" } }
                  </button>
              </form>
              <span class={classes!("auth-switch", loading.then_some("disabled"))}>
                  <span>{ "Already have an account?" }</span>
                  <span class="link" onclick={go_to_login}>{ "Login here." }</span>
              </span>
          </div>
      </div>
  }
}
