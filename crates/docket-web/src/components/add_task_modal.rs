use chrono::{
  Local,
  NaiveDate
};
use docket_core::tasks::TaskDraft;
use web_sys::{
  HtmlInputElement,
  HtmlTextAreaElement
};
use yew::{
  Callback,
  Html,
  InputEvent,
  MouseEvent,
  Properties,
  SubmitEvent,
  TargetCast,
  classes,
  function_component,
  html,
  use_state
};

use super::DatePickerField;
use crate::app::{
  ui_debug,
  use_services,
  use_store
};

#[derive(Properties, PartialEq)]
pub struct AddTaskModalProps {
  pub visible:  bool,
  pub on_close: Callback<()>
}

#[function_component(AddTaskModal)]
pub fn add_task_modal(
  props: &AddTaskModalProps
) -> Html {
  let services = use_services();
  use_store(services.ctx());
  let today = Local::now().date_naive();
  let draft =
    use_state(move || TaskDraft::new(today));
  let busy = services.tasks.is_creating();
  let limits = services.config.limits.clone();

  let on_title = {
    let draft = draft.clone();
    let limits = limits.clone();
    Callback::from(
      move |event: InputEvent| {
        let input: HtmlInputElement =
          event.target_unchecked_into();
        let mut next = (*draft).clone();
        if next.set_title(&input.value(), &limits)
        {
          draft.set(next);
        } else {
          // Over the limit: put the accepted value back.
          input.set_value(&draft.title);
        }
      }
    )
  };

  let on_description = {
    let draft = draft.clone();
    let limits = limits.clone();
    Callback::from(
      move |event: InputEvent| {
        let input: HtmlTextAreaElement =
          event.target_unchecked_into();
        let mut next = (*draft).clone();
        if next.set_description(
          &input.value(),
          &limits
        ) {
          draft.set(next);
        } else {
          input.set_value(&draft.description);
        }
      }
    )
  };

  let on_date = {
    let draft = draft.clone();
    Callback::from(move |date: NaiveDate| {
      let mut next = (*draft).clone();
      next.deadline = Some(date);
      draft.set(next);
    })
  };

  let on_cancel = {
    let draft = draft.clone();
    let on_close = props.on_close.clone();
    Callback::from(move |_: MouseEvent| {
      draft.set(TaskDraft::new(
        Local::now().date_naive()
      ));
      on_close.emit(());
    })
  };

  let on_submit = {
    let draft = draft.clone();
    let panel = services.tasks.clone();
    let on_close = props.on_close.clone();
    Callback::from(
      move |event: SubmitEvent| {
        event.prevent_default();
        if panel.is_creating() {
          return;
        }
        let submitted = (*draft).clone();
        let draft = draft.clone();
        let panel = panel.clone();
        let on_close = on_close.clone();
        wasm_bindgen_futures::spawn_local(
          async move {
            let outcome =
              panel.create(&submitted).await;
            ui_debug(
              "task.create",
              &format!(
                "ok={}",
                outcome.is_ok()
              )
            );
            if outcome.is_ok() {
              draft.set(TaskDraft::new(
                Local::now().date_naive()
              ));
              on_close.emit(());
            }
          }
        );
      }
    )
  };

  if !props.visible {
    return html! {};
  }

  let title_left = draft.title_remaining(&limits);
  let description_left =
    draft.description_remaining(&limits);
  let warn_below = limits.warn_below as i64;

  html! {
      <div class="modal-backdrop">
          <form class="modal" onsubmit={on_submit}>
              <h2>{ "Add Task" }</h2>
              <label class="field">
                  <span class="field-label">
                      { "Title " }
                      <span class={classes!("counter", (title_left < warn_below).then_some("low"))}>
                          { format!("[{title_left}/{}]", limits.title) }
                      </span>
                  </span>
                  <input
                      class="input"
                      type="text"
                      placeholder="Enter title..."
                      value={draft.title.clone()}
                      oninput={on_title}
                  />
              </label>
              <label class="field">
                  <span class="field-label">
                      { "Description " }
                      <span class={classes!("counter", (description_left < warn_below).then_some("low"))}>
                          { format!("[{description_left}/{}]", limits.description) }
                      </span>
                  </span>
                  <textarea
                      class="input"
                      placeholder="Enter description..."
                      value={draft.description.clone()}
                      oninput={on_description}
                  />
              </label>
              <div class="field">
                  <span class="field-label">{ "Deadline" }</span>
                  <DatePickerField
                      today={today}
                      selected={draft.deadline}
                      config={services.config.picker.clone()}
                      on_select={on_date}
                  />
              </div>
              <div class="modal-actions">
                  <button type="button" class="btn secondary" onclick={on_cancel}>
                      { "Cancel" }
                  </button>
                  <button type="submit" class="btn primary" disabled={busy}>
                      { if busy { "Adding..." } else { "Add Task" } }
                  </button>
              </div>
          </form>
      </div>
  }
}
