use docket_core::notice::Notice;
use gloo::timers::callback::Timeout;
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html,
  use_effect_with
};

use crate::app::{
  use_services,
  use_store
};

#[function_component(Toaster)]
pub fn toaster() -> Html {
  let services = use_services();
  use_store(services.ctx());
  let notices = services.ctx().notices();

  html! {
      <div class="toaster">
          {
              for notices.into_iter().map(|notice| {
                  html! { <Toast key={notice.id} notice={notice.clone()} /> }
              })
          }
      </div>
  }
}

#[derive(Properties, PartialEq)]
struct ToastProps {
  notice: Notice
}

#[function_component(Toast)]
fn toast(props: &ToastProps) -> Html {
  let services = use_services();
  let id = props.notice.id;

  {
    let ctx = services.ctx().clone();
    let dismiss_ms =
      services.config.toasts.dismiss_ms;
    use_effect_with(id, move |id| {
      let id = *id;
      let timeout =
        Timeout::new(dismiss_ms, move || {
          ctx.dismiss(id);
        });
      move || drop(timeout)
    });
  }

  let onclick = {
    let ctx = services.ctx().clone();
    Callback::from(move |_| ctx.dismiss(id))
  };

  html! {
      <div class={props.notice.level.css_class()} {onclick}>
          {
              for props.notice.lines().map(|line| {
                  html! { <div class="toast-line">{ line.to_string() }</div> }
              })
          }
      </div>
  }
}
