use chrono::{
  Datelike,
  Duration,
  NaiveDate
};
use tracing::debug;

use crate::config::PickerConfig;

pub const WEEKDAY_LABELS: [&str; 7] =
  ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

pub const MONTH_LABELS: [&str; 12] = [
  "Jan", "Feb", "Mar", "Apr", "May", "Jun",
  "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"
];

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum PickerMode {
  Day,
  Month,
  Year
}

/// Calendar popup used by the add-task form.
///
/// `header` is the date whose month (day mode), year (month mode) or
/// year window (year mode) is on screen. Only picking a day finalizes a
/// selection; picking a month or a year only changes what is shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePicker {
  open:        bool,
  mode:        PickerMode,
  header:      NaiveDate,
  selected:    Option<NaiveDate>,
  year_window: u32,
  years_back:  u32
}

impl DatePicker {
  pub fn new(
    today: NaiveDate,
    selected: Option<NaiveDate>
  ) -> Self {
    Self::with_config(
      today,
      selected,
      &PickerConfig::default()
    )
  }

  pub fn with_config(
    today: NaiveDate,
    selected: Option<NaiveDate>,
    config: &PickerConfig
  ) -> Self {
    Self {
      open: false,
      mode: PickerMode::Day,
      header: today,
      selected,
      year_window: config.year_window.max(1),
      years_back: config.years_back
    }
  }

  pub fn is_open(&self) -> bool {
    self.open
  }

  pub fn mode(&self) -> PickerMode {
    self.mode
  }

  pub fn header(&self) -> NaiveDate {
    self.header
  }

  pub fn selected(&self) -> Option<NaiveDate> {
    self.selected
  }

  /// Replaces the selection from outside, e.g. when the form resets.
  pub fn set_selected(
    &mut self,
    selected: Option<NaiveDate>
  ) {
    self.selected = selected;
  }

  pub fn toggle(&mut self) {
    self.open = !self.open;
  }

  pub fn close(&mut self) {
    self.open = false;
  }

  pub fn show_month_picker(&mut self) {
    self.mode = PickerMode::Month;
  }

  pub fn show_year_picker(&mut self) {
    self.mode = PickerMode::Year;
  }

  pub fn previous(&mut self) {
    self.step(-1);
  }

  pub fn next(&mut self) {
    self.step(1);
  }

  fn step(&mut self, direction: i32) {
    self.header = match self.mode {
      | PickerMode::Day => {
        shift_months(self.header, direction)
      }
      | PickerMode::Month => {
        shift_years(self.header, direction)
      }
      | PickerMode::Year => shift_years(
        self.header,
        direction * self.year_window as i32
      )
    };
    debug!(mode = ?self.mode, header = %self.header, "date picker moved");
  }

  /// Empty cells before day 1 so the grid starts on Sunday.
  pub fn leading_blanks(&self) -> u32 {
    first_day_of_month(
      self.header.year(),
      self.header.month()
    )
    .weekday()
    .num_days_from_sunday()
  }

  pub fn days_in_month(&self) -> u32 {
    days_in_month(
      self.header.year(),
      self.header.month()
    )
  }

  pub fn years(&self) -> Vec<i32> {
    let start = self.header.year()
      - self.years_back as i32;
    (0..self.year_window as i32)
      .map(|offset| start + offset)
      .collect()
  }

  /// Finalizes `day` of the displayed month and closes the popup.
  /// Days outside the month are ignored.
  pub fn select_day(
    &mut self,
    day: u32
  ) -> Option<NaiveDate> {
    let date = NaiveDate::from_ymd_opt(
      self.header.year(),
      self.header.month(),
      day
    )?;
    self.selected = Some(date);
    self.open = false;
    debug!(%date, "date picked");
    Some(date)
  }

  /// Shows the day grid of month `month0` (0 = January) of the
  /// displayed year.
  pub fn select_month(&mut self, month0: u32) {
    if month0 > 11 {
      return;
    }
    self.header = first_day_of_month(
      self.header.year(),
      month0 + 1
    );
    self.mode = PickerMode::Day;
  }

  /// Shows the month grid of `year`.
  pub fn select_year(&mut self, year: i32) {
    self.header = first_day_of_month(
      year,
      self.header.month()
    );
    self.mode = PickerMode::Month;
  }

  pub fn is_selected_day(&self, day: u32) -> bool {
    self.selected.is_some_and(|selected| {
      selected.year() == self.header.year()
        && selected.month()
          == self.header.month()
        && selected.day() == day
    })
  }

  pub fn is_selected_month(
    &self,
    month0: u32
  ) -> bool {
    self.selected.is_some_and(|selected| {
      selected.year() == self.header.year()
        && selected.month0() == month0
    })
  }

  pub fn is_selected_year(&self, year: i32) -> bool {
    self
      .selected
      .is_some_and(|selected| selected.year() == year)
  }

  pub fn month_title(&self) -> String {
    self.header.format("%B").to_string()
  }

  pub fn year_title(&self) -> String {
    self.header.year().to_string()
  }

  /// The selection as shown in the read-only text field.
  pub fn display_value(&self) -> String {
    self
      .selected
      .map(|date| date.format("%Y-%m-%d").to_string())
      .unwrap_or_default()
  }
}

fn shift_years(
  date: NaiveDate,
  years: i32
) -> NaiveDate {
  let year =
    date.year().saturating_add(years);
  let month = date.month();
  let day = date
    .day()
    .min(days_in_month(year, month));
  NaiveDate::from_ymd_opt(
    year, month, day
  )
  .unwrap_or(date)
}

fn shift_months(
  date: NaiveDate,
  months: i32
) -> NaiveDate {
  let mut year = date.year();
  let mut month =
    date.month() as i32 + months;

  while month < 1 {
    month += 12;
    year = year.saturating_sub(1);
  }
  while month > 12 {
    month -= 12;
    year = year.saturating_add(1);
  }

  let month = month as u32;
  let day = date
    .day()
    .min(days_in_month(year, month));
  NaiveDate::from_ymd_opt(
    year, month, day
  )
  .unwrap_or(date)
}

fn first_day_of_month(
  year: i32,
  month: u32
) -> NaiveDate {
  NaiveDate::from_ymd_opt(
    year, month, 1
  )
  .unwrap_or(NaiveDate::MIN)
}

fn days_in_month(
  year: i32,
  month: u32
) -> u32 {
  let (next_year, next_month) =
    if month >= 12 {
      (year.saturating_add(1), 1_u32)
    } else {
      (year, month + 1)
    };
  first_day_of_month(
    next_year, next_month
  )
  .checked_sub_signed(Duration::days(1))
  .map(|last| last.day())
  .unwrap_or(31)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn date(
    y: i32,
    m: u32,
    d: u32
  ) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d)
      .expect("valid date")
  }

  #[test]
  fn picking_a_day_finalizes_and_closes() {
    let mut picker =
      DatePicker::new(date(2026, 2, 10), None);
    picker.toggle();
    assert!(picker.is_open());

    let picked = picker.select_day(15);
    assert_eq!(picked, Some(date(2026, 2, 15)));
    assert_eq!(
      picker.selected(),
      Some(date(2026, 2, 15))
    );
    assert!(!picker.is_open());
    assert_eq!(
      picker.display_value(),
      "2026-02-15"
    );
  }

  #[test]
  fn day_outside_month_is_ignored() {
    let mut picker =
      DatePicker::new(date(2026, 2, 10), None);
    picker.toggle();
    assert_eq!(picker.select_day(30), None);
    assert!(picker.is_open());
    assert_eq!(picker.selected(), None);
  }

  #[test]
  fn month_pick_returns_to_day_grid_without_selecting(
  ) {
    let mut picker = DatePicker::new(
      date(2026, 2, 10),
      Some(date(2026, 2, 10))
    );
    picker.toggle();
    picker.show_month_picker();
    assert_eq!(picker.mode(), PickerMode::Month);

    picker.select_month(3);
    assert_eq!(picker.mode(), PickerMode::Day);
    assert_eq!(picker.header().month0(), 3);
    assert_eq!(picker.header().year(), 2026);
    assert_eq!(
      picker.selected(),
      Some(date(2026, 2, 10))
    );
    assert!(picker.is_open());
  }

  #[test]
  fn year_pick_moves_to_month_grid() {
    let mut picker =
      DatePicker::new(date(2026, 5, 20), None);
    picker.show_year_picker();
    picker.select_year(2030);
    assert_eq!(picker.mode(), PickerMode::Month);
    assert_eq!(picker.header(), date(2030, 5, 1));
    assert_eq!(picker.selected(), None);
  }

  #[test]
  fn steps_depend_on_mode() {
    let mut picker =
      DatePicker::new(date(2026, 1, 31), None);
    picker.next();
    assert_eq!(picker.header(), date(2026, 2, 28));
    picker.previous();
    picker.previous();
    assert_eq!(picker.header(), date(2025, 12, 28));

    picker.show_month_picker();
    picker.next();
    assert_eq!(picker.header().year(), 2026);

    picker.show_year_picker();
    picker.previous();
    assert_eq!(picker.header().year(), 2014);
  }

  #[test]
  fn year_window_starts_six_back() {
    let picker =
      DatePicker::new(date(2026, 5, 20), None);
    let years = picker.years();
    assert_eq!(years.len(), 12);
    assert_eq!(years.first(), Some(&2020));
    assert_eq!(years.last(), Some(&2031));
  }

  #[test]
  fn day_grid_starts_on_sunday() {
    // 1 March 2026 is a Sunday, 1 April 2026 a Wednesday.
    let mut picker =
      DatePicker::new(date(2026, 3, 10), None);
    assert_eq!(picker.leading_blanks(), 0);
    assert_eq!(picker.days_in_month(), 31);
    picker.next();
    assert_eq!(picker.leading_blanks(), 3);
    assert_eq!(picker.days_in_month(), 30);
  }

  #[test]
  fn highlights_follow_selection() {
    let picker = DatePicker::new(
      date(2026, 3, 10),
      Some(date(2026, 3, 15))
    );
    assert!(picker.is_selected_day(15));
    assert!(!picker.is_selected_day(14));
    assert!(picker.is_selected_month(2));
    assert!(!picker.is_selected_month(3));
    assert!(picker.is_selected_year(2026));
    assert_eq!(picker.month_title(), "March");
  }
}
