use chrono::NaiveDate;
use docket_core::model::Task;
use docket_core::tasks::{
  deadline_status,
  format_deadline
};
use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  classes,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct TaskCardProps {
  pub task:      Task,
  pub today:     NaiveDate,
  pub pending:   bool,
  pub on_toggle: Callback<Task>,
  pub on_delete: Callback<Task>
}

#[function_component(TaskCard)]
pub fn task_card(
  props: &TaskCardProps
) -> Html {
  let deadline = props.task.deadline_date();
  let status =
    deadline_status(deadline, props.today);
  let complete = props.task.is_complete;

  let on_toggle = {
    let on_toggle = props.on_toggle.clone();
    let task = props.task.clone();
    Callback::from(move |_: MouseEvent| {
      on_toggle.emit(task.clone());
    })
  };

  let on_delete = {
    let on_delete = props.on_delete.clone();
    let task = props.task.clone();
    Callback::from(move |_: MouseEvent| {
      on_delete.emit(task.clone());
    })
  };

  html! {
      <div class="task-card">
          <div class="task-body">
              <h3 class={classes!("task-title", complete.then_some("complete"))}>
                  { &props.task.title }
              </h3>
              <p class="task-description">{ &props.task.description }</p>
              <p class={status.css_class()}>
                  { format!("Deadline: {}", format_deadline(deadline)) }
              </p>
          </div>
          <div class="task-actions">
              <button class="btn primary" onclick={on_toggle} disabled={props.pending}>
                  { "✓ " }{ if complete { "Undo" } else { "Done" } }
              </button>
              <button class="btn primary icon" onclick={on_delete} disabled={props.pending} title="Delete task">
                  { "🗑" }
              </button>
          </div>
      </div>
  }
}
