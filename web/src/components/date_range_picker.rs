use booking_core::{display_date, is_day_disabled, DateSelection, UnavailableDateIndex};
use chrono::{Datelike, Local, Months, NaiveDate};
use leptos::prelude::*;
use thaw::*;

const MAX_MONTHS_AHEAD: i32 = 12;
const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Two-click range calendar: first click picks the start, a later day closes the range.
#[component]
pub fn DateRangePicker(
    selection: RwSignal<DateSelection>,
    unavailable: RwSignal<UnavailableDateIndex>,
    is_loading: RwSignal<bool>,
) -> impl IntoView {
    // Read the clock in the browser only, so server and client render the same markup.
    let today = RwSignal::new(None::<NaiveDate>);
    Effect::new(move |_| today.set(Some(Local::now().date_naive())));
    let current_month_offset = RwSignal::new(0i32);

    view! {
        <div class="date-range-picker">
            <div class="date-picker-header">
                <Button
                    appearance=ButtonAppearance::Secondary
                    size=ButtonSize::Small
                    button_type=ButtonType::Button
                    on_click=move |_| {
                        current_month_offset.update(|v| *v -= 1);
                    }
                    disabled=Signal::derive(move || current_month_offset.get() <= 0)
                >
                    "←"
                </Button>

                <div class="month-label">
                    {move || month_label(today.get(), current_month_offset.get())}
                </div>

                <Button
                    appearance=ButtonAppearance::Secondary
                    size=ButtonSize::Small
                    button_type=ButtonType::Button
                    on_click=move |_| {
                        current_month_offset.update(|v| *v += 1);
                    }
                    disabled=Signal::derive(move || current_month_offset.get() >= MAX_MONTHS_AHEAD)
                >
                    "→"
                </Button>
            </div>

            {move || {
                match today.get().filter(|_| !is_loading.get()) {
                    None => view! {
                        <div class="date-picker-loading">
                            <Spinner size=SpinnerSize::Small />
                            <p>"Checking availability..."</p>
                        </div>
                    }
                    .into_any(),
                    Some(today) => {
                        let blocked = unavailable.get();
                        let current = selection.get();

                        view! {
                            <div class="date-picker-calendar">
                                <div class="weekday-headers">
                                    {WEEKDAYS
                                        .iter()
                                        .map(|name| view! { <div class="weekday-header">{*name}</div> })
                                        .collect_view()}
                                </div>

                                <div class="calendar-days">
                                    {calendar_cells(month_start(today, current_month_offset.get()))
                                        .into_iter()
                                        .map(|cell| match cell {
                                            Some(day) => {
                                                let disabled = is_day_disabled(day, today, &blocked);
                                                let is_blocked = blocked.contains(day);
                                                let is_past = day < today;
                                                let is_selected = current.contains(day);

                                                view! {
                                                    <button
                                                        type="button"
                                                        class="calendar-day"
                                                        class:unavailable=is_blocked
                                                        class:past=is_past
                                                        class:selected=is_selected
                                                        disabled=disabled
                                                        on:click=move |_| {
                                                            if !disabled {
                                                                selection.update(|s| s.select_day(day));
                                                            }
                                                        }
                                                    >
                                                        {day.day()}
                                                    </button>
                                                }
                                                .into_any()
                                            }
                                            None => view! { <div class="calendar-day empty"></div> }.into_any(),
                                        })
                                        .collect::<Vec<_>>()}
                                </div>
                            </div>
                        }
                        .into_any()
                    }
                }
            }}

            <div class="date-picker-footer">
                {move || match selection.get() {
                    DateSelection { from: Some(from), to: Some(to) } => view! {
                        <p class="selected-info">
                            {format!("{} to {}", display_date(from), display_date(to))}
                        </p>
                    }
                    .into_any(),
                    DateSelection { from: Some(from), to: None } => view! {
                        <p class="selected-info">
                            {format!("From {}. Pick an end date.", display_date(from))}
                        </p>
                    }
                    .into_any(),
                    _ => view! { <p class="no-selection">"Select your booking dates"</p> }.into_any(),
                }}
                <Button
                    appearance=ButtonAppearance::Subtle
                    size=ButtonSize::Small
                    button_type=ButtonType::Button
                    on_click=move |_| selection.update(DateSelection::clear)
                    disabled=Signal::derive(move || selection.with(DateSelection::is_empty))
                >
                    "Clear dates"
                </Button>
            </div>
        </div>
    }
}

/// First day of the month `offset` months away from `today`'s month.
fn month_start(today: NaiveDate, offset: i32) -> NaiveDate {
    let first = today.with_day(1).unwrap_or(today);
    let shifted = if offset >= 0 {
        first.checked_add_months(Months::new(offset.unsigned_abs()))
    } else {
        first.checked_sub_months(Months::new(offset.unsigned_abs()))
    };
    shifted.unwrap_or(first)
}

/// "March 2025" for the visible month; empty until the client clock has been read.
fn month_label(today: Option<NaiveDate>, offset: i32) -> String {
    today
        .map(|day| month_start(day, offset).format("%B %Y").to_string())
        .unwrap_or_default()
}

fn days_in_month(first: NaiveDate) -> u32 {
    first
        .checked_add_months(Months::new(1))
        .map(|next| next.signed_duration_since(first).num_days() as u32)
        .unwrap_or(31)
}

/// Sunday-first grid: leading blanks, then every day of the month.
fn calendar_cells(first: NaiveDate) -> Vec<Option<NaiveDate>> {
    let leading = first.weekday().num_days_from_sunday() as usize;
    let mut cells = vec![None; leading];
    cells.extend(first.iter_days().take(days_in_month(first) as usize).map(Some));
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_start_walks_across_years() {
        let today = date(2025, 11, 18);

        assert_eq!(month_start(today, 0), date(2025, 11, 1));
        assert_eq!(month_start(today, 2), date(2026, 1, 1));
        assert_eq!(month_start(today, -11), date(2024, 12, 1));
    }

    #[test]
    fn month_label_waits_for_the_clock() {
        assert_eq!(month_label(None, 3), "");
        assert_eq!(month_label(Some(date(2025, 11, 18)), 0), "November 2025");
        assert_eq!(month_label(Some(date(2025, 11, 18)), 2), "January 2026");
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(date(2024, 2, 1)), 29);
        assert_eq!(days_in_month(date(2025, 2, 1)), 28);
        assert_eq!(days_in_month(date(2025, 4, 1)), 30);
        assert_eq!(days_in_month(date(2025, 12, 1)), 31);
    }

    #[test]
    fn grid_starts_on_sunday() {
        // 1 January 2025 was a Wednesday.
        let cells = calendar_cells(date(2025, 1, 1));

        assert_eq!(cells.len(), 3 + 31);
        assert!(cells[..3].iter().all(Option::is_none));
        assert_eq!(cells[3], Some(date(2025, 1, 1)));
        assert_eq!(cells.last().copied().flatten(), Some(date(2025, 1, 31)));
    }
}
