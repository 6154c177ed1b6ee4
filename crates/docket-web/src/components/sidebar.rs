use docket_core::model::Category;
use web_sys::HtmlInputElement;
use yew::{
  Callback,
  Html,
  InputEvent,
  MouseEvent,
  TargetCast,
  classes,
  function_component,
  html,
  use_effect_with,
  use_state
};

use crate::app::{
  ui_debug,
  use_services,
  use_store
};

#[function_component(Sidebar)]
pub fn sidebar() -> Html {
  let services = use_services();
  use_store(services.ctx());
  let categories =
    use_state(Vec::<Category>::new);
  let draft_name = use_state(String::new);
  let open = use_state(|| false);

  let revision =
    services.ctx().categories_revision();
  let active =
    services.ctx().active_category();
  let has_identity =
    services.ctx().has_identity();
  let busy = services.categories.is_busy();

  {
    let panel = services.categories.clone();
    let categories = categories.clone();
    use_effect_with(
      (revision, has_identity),
      move |(revision, has_identity)| {
        if *has_identity {
          let revision = *revision;
          wasm_bindgen_futures::spawn_local(
            async move {
              if let Ok(loaded) =
                panel.list().await
              {
                ui_debug(
                  "sidebar.categories",
                  &format!(
                    "revision={revision} \
                     count={}",
                    loaded.len()
                  )
                );
                categories.set(loaded);
              }
            }
          );
        }
        || ()
      }
    );
  }

  let on_name_input = {
    let draft_name = draft_name.clone();
    Callback::from(
      move |event: InputEvent| {
        let input: HtmlInputElement =
          event.target_unchecked_into();
        draft_name.set(input.value());
      }
    )
  };

  let on_add = {
    let panel = services.categories.clone();
    let draft_name = draft_name.clone();
    Callback::from(move |_: MouseEvent| {
      if panel.is_busy() {
        return;
      }
      let name = (*draft_name).clone();
      draft_name.set(String::new());
      let panel = panel.clone();
      wasm_bindgen_futures::spawn_local(
        async move {
          let outcome = panel.create(&name).await;
          ui_debug(
            "category.create",
            &format!("ok={}", outcome.is_ok())
          );
        }
      );
    })
  };

  let toggle_open = {
    let open = open.clone();
    Callback::from(move |_: MouseEvent| {
      open.set(!*open);
    })
  };

  let items = categories.iter().map(|category| {
    let is_active =
      active.as_deref() == Some(category.id.as_str());

    let on_select = {
      let panel = services.categories.clone();
      let category = category.clone();
      Callback::from(move |_: MouseEvent| {
        panel.select(&category);
      })
    };

    let on_delete = {
      let panel = services.categories.clone();
      let category = category.clone();
      Callback::from(
        move |event: MouseEvent| {
          event.stop_propagation();
          if panel.is_busy() {
            return;
          }
          let panel = panel.clone();
          let category = category.clone();
          wasm_bindgen_futures::spawn_local(
            async move {
              let outcome =
                panel.delete(&category).await;
              ui_debug(
                "category.delete",
                &format!(
                  "id={} ok={}",
                  category.id,
                  outcome.is_ok()
                )
              );
            }
          );
        }
      )
    };

    html! {
        <li key={category.id.clone()}>
            <div class={classes!("category-item", is_active.then_some("active"))} onclick={on_select}>
                <span class="category-name">{ &category.name }</span>
                <button class="icon-btn delete" onclick={on_delete} disabled={busy} title="Delete category">
                    { "🗑" }
                </button>
            </div>
        </li>
    }
  });

  html! {
      <aside class="sidebar-wrap">
          <button class="menu-toggle mobile-only sidebar-toggle" onclick={toggle_open.clone()}>
              { if *open { "✕" } else { "☰" } }
          </button>
          <div class={classes!("sidebar", open.then_some("open"))}>
              <div class="sidebar-header">
                  <h2>{ "Add Todo Categories" }</h2>
                  <button class="icon-btn mobile-only" onclick={toggle_open}>{ "✕" }</button>
              </div>
              <input
                  class="input"
                  type="text"
                  placeholder="Enter Category name..."
                  value={(*draft_name).clone()}
                  oninput={on_name_input}
              />
              <button class="btn primary wide" onclick={on_add} disabled={busy}>
                  { "Add category" }
              </button>
              <hr />
              <h2>{ "Todo Categories" }</h2>
              <ul class="category-list">
                  { for items }
              </ul>
          </div>
      </aside>
  }
}
