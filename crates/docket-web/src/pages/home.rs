use yew::{
  Html,
  function_component,
  html
};

use crate::components::{
  MainContent,
  Navbar,
  Sidebar
};

#[function_component(HomePage)]
pub fn home_page() -> Html {
  html! {
      <div class="home">
          <Navbar />
          <div class="home-body">
              <Sidebar />
              <MainContent />
          </div>
      </div>
  }
}
