use chrono::NaiveDate;
use docket_core::config::PickerConfig;
use docket_core::datepicker::{
  DatePicker,
  MONTH_LABELS,
  PickerMode,
  WEEKDAY_LABELS
};
use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  UseStateHandle,
  classes,
  function_component,
  html,
  use_effect_with,
  use_state
};

#[derive(Properties, PartialEq)]
pub struct DatePickerFieldProps {
  pub today:     NaiveDate,
  pub selected:  Option<NaiveDate>,
  pub config:    PickerConfig,
  pub on_select: Callback<NaiveDate>
}

fn picker_action(
  picker: &UseStateHandle<DatePicker>,
  apply: impl Fn(&mut DatePicker) + 'static
) -> Callback<MouseEvent> {
  let picker = picker.clone();
  Callback::from(move |_: MouseEvent| {
    let mut next = (*picker).clone();
    apply(&mut next);
    picker.set(next);
  })
}

#[function_component(DatePickerField)]
pub fn date_picker_field(
  props: &DatePickerFieldProps
) -> Html {
  let picker = {
    let today = props.today;
    let selected = props.selected;
    let config = props.config.clone();
    use_state(move || {
      DatePicker::with_config(
        today, selected, &config
      )
    })
  };

  {
    let picker = picker.clone();
    use_effect_with(
      props.selected,
      move |selected| {
        if picker.selected() != *selected {
          let mut next = (*picker).clone();
          next.set_selected(*selected);
          picker.set(next);
        }
        || ()
      }
    );
  }

  let toggle =
    picker_action(&picker, DatePicker::toggle);
  let previous = picker_action(
    &picker,
    DatePicker::previous
  );
  let next =
    picker_action(&picker, DatePicker::next);
  let show_months = picker_action(
    &picker,
    DatePicker::show_month_picker
  );
  let show_years = picker_action(
    &picker,
    DatePicker::show_year_picker
  );

  let grid = match picker.mode() {
    | PickerMode::Day => {
      day_grid(&picker, &props.on_select)
    }
    | PickerMode::Month => month_grid(&picker),
    | PickerMode::Year => year_grid(&picker)
  };

  html! {
      <div class="date-picker">
          <input
              class="input"
              type="text"
              readonly={true}
              placeholder="Select a date"
              value={picker.display_value()}
              onclick={toggle}
          />
          {
              if picker.is_open() {
                  html! {
                      <div class="picker-popup">
                          <div class="picker-header">
                              <button type="button" class="icon-btn" onclick={previous}>{ "‹" }</button>
                              <div class="picker-title">
                                  {
                                      if picker.mode() == PickerMode::Day {
                                          html! {
                                              <span class="picker-link" onclick={show_months}>
                                                  { picker.month_title() }
                                              </span>
                                          }
                                      } else {
                                          html! {}
                                      }
                                  }
                                  <span class="picker-link" onclick={show_years}>
                                      { picker.year_title() }
                                  </span>
                              </div>
                              <button type="button" class="icon-btn" onclick={next}>{ "›" }</button>
                          </div>
                          { grid }
                      </div>
                  }
              } else {
                  html! {}
              }
          }
      </div>
  }
}

fn day_grid(
  picker: &UseStateHandle<DatePicker>,
  on_select: &Callback<NaiveDate>
) -> Html {
  let blanks = (0..picker.leading_blanks())
    .map(|_| {
      html! { <div class="picker-cell blank"></div> }
    });

  let days = (1..=picker.days_in_month()).map(|day| {
    let onclick = {
      let picker = picker.clone();
      let on_select = on_select.clone();
      Callback::from(move |_: MouseEvent| {
        let mut next = (*picker).clone();
        if let Some(date) = next.select_day(day) {
          picker.set(next);
          on_select.emit(date);
        }
      })
    };
    let selected = picker.is_selected_day(day);
    html! {
        <button
            type="button"
            class={classes!("picker-cell", selected.then_some("selected"))}
            {onclick}
        >
            { day }
        </button>
    }
  });

  html! {
      <div class="picker-grid days">
          {
              for WEEKDAY_LABELS.iter().map(|label| {
                  html! { <div class="picker-weekday">{ *label }</div> }
              })
          }
          { for blanks }
          { for days }
      </div>
  }
}

fn month_grid(
  picker: &UseStateHandle<DatePicker>
) -> Html {
  let cells = MONTH_LABELS
    .iter()
    .zip(0_u32..)
    .map(|(label, month0)| {
      let onclick = picker_action(
        picker,
        move |next| next.select_month(month0)
      );
      let selected =
        picker.is_selected_month(month0);
      html! {
          <button
              type="button"
              class={classes!("picker-cell", selected.then_some("selected"))}
              {onclick}
          >
              { *label }
          </button>
      }
    });

  html! {
      <div class="picker-grid months">
          { for cells }
      </div>
  }
}

fn year_grid(
  picker: &UseStateHandle<DatePicker>
) -> Html {
  let cells =
    picker.years().into_iter().map(|year| {
      let onclick = picker_action(
        picker,
        move |next| next.select_year(year)
      );
      let selected =
        picker.is_selected_year(year);
      html! {
          <button
              type="button"
              class={classes!("picker-cell", selected.then_some("selected"))}
              {onclick}
          >
              { year }
          </button>
      }
    });

  html! {
      <div class="picker-grid years">
          { for cells }
      </div>
  }
}
