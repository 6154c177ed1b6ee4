use chrono::Local;
use docket_core::model::Task;
use docket_core::tasks::filter_tasks;
use web_sys::HtmlInputElement;
use yew::{
  Callback,
  Html,
  InputEvent,
  MouseEvent,
  TargetCast,
  function_component,
  html,
  use_effect_with,
  use_state
};

use super::{
  AddTaskModal,
  TaskCard
};
use crate::app::{
  ui_debug,
  use_services,
  use_store
};

#[function_component(MainContent)]
pub fn main_content() -> Html {
  let services = use_services();
  use_store(services.ctx());
  let tasks = use_state(Vec::<Task>::new);
  let loading = use_state(|| false);
  let query = use_state(String::new);
  let show_modal = use_state(|| false);

  let active =
    services.ctx().active_category();
  let revision =
    services.ctx().tasks_revision();
  let today = Local::now().date_naive();

  {
    let panel = services.tasks.clone();
    let tasks = tasks.clone();
    let loading = loading.clone();
    use_effect_with(
      (active.clone(), revision),
      move |(active, _)| {
        if active.is_none() {
          tasks.set(Vec::new());
        } else {
          loading.set(true);
          wasm_bindgen_futures::spawn_local(
            async move {
              match panel.list().await {
                | Ok(loaded) => {
                  ui_debug(
                    "main.tasks",
                    &format!(
                      "count={}",
                      loaded.len()
                    )
                  );
                  tasks.set(loaded);
                }
                | Err(error) => {
                  tracing::debug!(%error, "task list not refreshed");
                }
              }
              loading.set(false);
            }
          );
        }
        || ()
      }
    );
  }

  let on_search = {
    let query = query.clone();
    Callback::from(
      move |event: InputEvent| {
        let input: HtmlInputElement =
          event.target_unchecked_into();
        query.set(input.value());
      }
    )
  };

  let open_modal = {
    let show_modal = show_modal.clone();
    Callback::from(move |_: MouseEvent| {
      show_modal.set(true);
    })
  };

  let close_modal = {
    let show_modal = show_modal.clone();
    Callback::from(move |()| {
      show_modal.set(false);
    })
  };

  let on_toggle = {
    let panel = services.tasks.clone();
    let tasks = tasks.clone();
    Callback::from(move |task: Task| {
      if panel.is_pending(&task.id) {
        return;
      }
      let panel = panel.clone();
      let tasks = tasks.clone();
      wasm_bindgen_futures::spawn_local(
        async move {
          let outcome = panel.toggle(&task).await;
          ui_debug(
            "task.toggle",
            &format!(
              "id={} ok={}",
              task.id,
              outcome.is_ok()
            )
          );
          if let Ok(updated) = outcome {
            let next = tasks
              .iter()
              .map(|existing| {
                if existing.id == updated.id {
                  updated.clone()
                } else {
                  existing.clone()
                }
              })
              .collect();
            tasks.set(next);
          }
        }
      );
    })
  };

  let on_delete = {
    let panel = services.tasks.clone();
    Callback::from(move |task: Task| {
      if panel.is_pending(&task.id) {
        return;
      }
      let panel = panel.clone();
      wasm_bindgen_futures::spawn_local(
        async move {
          let outcome = panel.delete(&task).await;
          ui_debug(
            "task.delete",
            &format!(
              "id={} ok={}",
              task.id,
              outcome.is_ok()
            )
          );
        }
      );
    })
  };

  let visible = filter_tasks(&tasks, &query);

  html! {
      <main class="main-content">
          <div class="toolbar">
              <button class="btn primary" onclick={open_modal} disabled={active.is_none()}>
                  { "Add Task" }
              </button>
              <AddTaskModal visible={*show_modal} on_close={close_modal} />
              <input
                  class="input search"
                  type="text"
                  placeholder="Search tasks..."
                  value={(*query).clone()}
                  oninput={on_search}
              />
          </div>
          {
              if *loading {
                  html! {
                      <div class="loader">
                          <div class="spinner"></div>
                      </div>
                  }
              } else {
                  html! {
                      <div class="task-grid">
                          {
                              for visible.into_iter().map(|task| {
                                  html! {
                                      <TaskCard
                                          key={task.id.clone()}
                                          task={task.clone()}
                                          today={today}
                                          pending={services.tasks.is_pending(&task.id)}
                                          on_toggle={on_toggle.clone()}
                                          on_delete={on_delete.clone()}
                                      />
                                  }
                              })
                          }
                      </div>
                  }
              }
          }
      </main>
  }
}
