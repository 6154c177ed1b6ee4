use std::rc::Rc;

use docket_core::auth::AuthActions;
use docket_core::categories::CategoryPanel;
use docket_core::gate::AuthGate;
use docket_core::tasks::TaskPanel;
use docket_core::{
  ApiClient,
  AppContext,
  ClientConfig,
  Route,
  Session,
  StoreEvent
};
use gloo::console::log;
use yew::context::ContextProvider;
use yew::functional::use_force_update;
use yew::{
  Html,
  function_component,
  hook,
  html,
  use_context,
  use_effect_with,
  use_state
};
use yew_router::prelude::{
  BrowserRouter,
  Redirect,
  Routable,
  Switch,
  use_navigator
};

use crate::api::GlooTransport;
use crate::components::Toaster;
use crate::pages::{
  HomePage,
  LoginPage,
  RegisterPage
};

const CLIENT_CONFIG_TOML: &str =
  include_str!("../assets/docket.toml");

#[derive(Clone, Routable, PartialEq)]
pub enum AppRoute {
  #[at("/")]
  Root,
  #[at("/register")]
  Register,
  #[at("/login")]
  Login,
  #[at("/home")]
  Home,
  #[not_found]
  #[at("/404")]
  NotFound
}

impl From<Route> for AppRoute {
  fn from(route: Route) -> Self {
    match route {
      | Route::Root => AppRoute::Root,
      | Route::Register => {
        AppRoute::Register
      }
      | Route::Login => AppRoute::Login,
      | Route::Home => AppRoute::Home
    }
  }
}

pub type WebSession = Session<GlooTransport>;

/// Everything the views share, handed down through a context provider.
#[derive(Clone)]
pub struct Services {
  pub session:    WebSession,
  pub config:     Rc<ClientConfig>,
  pub auth:       AuthActions<GlooTransport>,
  pub categories:
    CategoryPanel<GlooTransport>,
  pub tasks:      TaskPanel<GlooTransport>
}

impl PartialEq for Services {
  fn eq(&self, other: &Self) -> bool {
    self.session == other.session
  }
}

impl Services {
  fn new(config: ClientConfig) -> Self {
    let client = ApiClient::new(
      GlooTransport::new(
        &config.backend_url
      )
    );
    let session =
      Session::new(AppContext::new(), client);
    Self {
      auth: AuthActions::new(
        session.clone()
      ),
      categories: CategoryPanel::new(
        session.clone()
      ),
      tasks: TaskPanel::new(
        session.clone(),
        config.clone()
      ),
      config: Rc::new(config),
      session
    }
  }

  pub fn ctx(&self) -> &AppContext {
    self.session.context()
  }
}

fn load_client_config() -> ClientConfig {
  let config =
    match ClientConfig::from_toml_str(
      CLIENT_CONFIG_TOML
    ) {
      | Ok(config) => config,
      | Err(error) => {
        tracing::error!(error = %format!("{error:#}"), "failed parsing client config; using defaults");
        ClientConfig::default()
      }
    };

  match option_env!("DOCKET_BACKEND_URL") {
    | Some(url) => {
      tracing::info!(%url, "backend url overridden at build time");
      config.with_backend_url(url)
    }
    | None => config
  }
}

#[hook]
pub fn use_services() -> Services {
  use_context::<Services>().expect(
    "Services are provided by App"
  )
}

/// Re-renders the calling component on every store event.
#[hook]
pub fn use_store(ctx: &AppContext) {
  let trigger = use_force_update();
  let ctx = ctx.clone();
  use_effect_with((), move |_| {
    let subscription =
      ctx.subscribe(move |_| {
        trigger.force_update();
      });
    move || ctx.unsubscribe(subscription)
  });
}

#[function_component(App)]
pub fn app() -> Html {
  let services = use_state(|| {
    Services::new(load_client_config())
  });

  {
    use_effect_with((), move |_| {
      ui_debug(
        "app.mounted",
        "frontend mounted and services \
         initialized"
      );
      || ()
    });
  }

  html! {
      <ContextProvider<Services> context={(*services).clone()}>
          <BrowserRouter>
              <Shell />
          </BrowserRouter>
      </ContextProvider<Services>>
  }
}

#[function_component(Shell)]
fn shell() -> Html {
  let services = use_services();
  let navigator = use_navigator();
  use_store(services.ctx());
  let has_identity =
    services.ctx().has_identity();

  {
    let ctx = services.ctx().clone();
    use_effect_with((), move |_| {
      let follow = {
        let ctx = ctx.clone();
        move || {
          let Some(route) =
            ctx.take_redirect()
          else {
            return;
          };
          ui_debug(
            "router.redirect",
            route.path()
          );
          if let Some(navigator) =
            navigator.as_ref()
          {
            navigator
              .push(&AppRoute::from(route));
          }
        }
      };
      follow();
      let subscription =
        ctx.subscribe(move |event| {
          if let StoreEvent::Navigate(_) =
            event
          {
            follow();
          }
        });
      move || ctx.unsubscribe(subscription)
    });
  }

  {
    let session = services.session.clone();
    use_effect_with(
      has_identity,
      move |has_identity| {
        if !*has_identity {
          wasm_bindgen_futures::spawn_local(
            async move {
              let mut gate = AuthGate::new();
              let state =
                gate.resolve(&session).await;
              ui_debug(
                "auth.gate",
                &format!("{state:?}")
              );
            }
          );
        }
        || ()
      }
    );
  }

  html! {
      <div class="app">
          <Toaster />
          <Switch<AppRoute> render={switch} />
      </div>
  }
}

fn switch(route: AppRoute) -> Html {
  match route {
    | AppRoute::Root => html! {
        <div class="page-center">
            <div class="spinner"></div>
        </div>
    },
    | AppRoute::Register => {
      html! { <RegisterPage /> }
    }
    | AppRoute::Login => {
      html! { <LoginPage /> }
    }
    | AppRoute::Home => {
      html! { <HomePage /> }
    }
    | AppRoute::NotFound => html! {
        <Redirect<AppRoute> to={AppRoute::Root} />
    }
  }
}

pub fn ui_debug(
  event: &str,
  detail: &str
) {
  tracing::debug!(
    event, detail, "ui-debug"
  );
  log!(format!(
    "[ui-debug] {event}: {detail}"
  ));
}
