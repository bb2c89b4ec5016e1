use chrono::{Datelike, Duration, NaiveDate, NaiveTime};
use serde::Serialize;

use crate::catalog::Catalog;
use crate::models::slot::{format_hhmm, minute_of_day};
use crate::models::{Barber, Booking, SlotGrid};

const DAY_LABELS: [&str; 6] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct GridPlacement {
    /// Zero-based column, one column per slot step from the first slot.
    pub column: u32,
    pub span: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarEntry {
    #[serde(flatten)]
    pub booking: Booking,
    pub service_names: Vec<String>,
    pub placement: GridPlacement,
}

#[derive(Debug, Clone, Serialize)]
pub struct DayColumn {
    pub label: &'static str,
    pub date: NaiveDate,
    pub is_today: bool,
    pub bookings: Vec<CalendarEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeekView {
    pub barber: Barber,
    pub offset: i64,
    pub label: String,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub columns: Vec<String>,
    pub today_count: usize,
    pub days: Vec<DayColumn>,
}

/// PIN lookup against the roster. A placeholder, not a security check.
pub fn authenticate<'a>(catalog: &'a Catalog, pin: &str) -> Option<&'a Barber> {
    catalog.barber_by_pin(pin.trim())
}

/// Monday of the week containing `today`, moved by `offset` weeks.
pub fn week_start(today: NaiveDate, offset: i64) -> NaiveDate {
    let monday = today - Duration::days(i64::from(today.weekday().num_days_from_monday()));
    monday + Duration::weeks(offset)
}

pub fn week_label(start: NaiveDate, end: NaiveDate) -> String {
    format!("{} — {}", start.format("%-d %b"), end.format("%-d %b"))
}

pub fn placement(grid: &SlotGrid, booking: &Booking) -> GridPlacement {
    let step = grid.step_minutes();
    let first = minute_of_day(&grid.first());
    let offset = booking.start_minute().saturating_sub(first);
    GridPlacement {
        column: round_half_up(offset, step),
        span: round_half_up(booking.duration_minutes, step).max(1),
    }
}

fn round_half_up(value: u32, step: u32) -> u32 {
    (value * 2 + step) / (step * 2)
}

/// Header times for every dashboard column.
pub fn column_times(grid: &SlotGrid) -> Vec<String> {
    let first = minute_of_day(&grid.first());
    (0..grid.column_count() as u32)
        .filter_map(|i| {
            let minute = first + i * grid.step_minutes();
            NaiveTime::from_hms_opt(minute / 60, minute % 60, 0)
        })
        .map(|t| format_hhmm(&t))
        .collect()
}

pub fn today_count(bookings: &[Booking], barber_id: &str, today: NaiveDate) -> usize {
    bookings
        .iter()
        .filter(|b| b.barber_id == barber_id && b.date == today && b.is_active())
        .count()
}

fn entry(catalog: &Catalog, grid: &SlotGrid, booking: &Booking) -> CalendarEntry {
    CalendarEntry {
        booking: booking.clone(),
        service_names: catalog.service_names(&booking.services),
        placement: placement(grid, booking),
    }
}

pub fn week_view(
    catalog: &Catalog,
    grid: &SlotGrid,
    bookings: &[Booking],
    barber: &Barber,
    today: NaiveDate,
    offset: i64,
) -> WeekView {
    let start = week_start(today, offset);

    let days: Vec<DayColumn> = DAY_LABELS
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let date = start + Duration::days(i as i64);
            let mut day_bookings: Vec<&Booking> = bookings
                .iter()
                .filter(|b| b.barber_id == barber.id && b.date == date)
                .collect();
            day_bookings.sort_by_key(|b| b.time);

            DayColumn {
                label: *label,
                date,
                is_today: date == today,
                bookings: day_bookings
                    .into_iter()
                    .map(|b| entry(catalog, grid, b))
                    .collect(),
            }
        })
        .collect();

    let end = start + Duration::days(DAY_LABELS.len() as i64 - 1);

    WeekView {
        barber: barber.clone(),
        offset,
        label: week_label(start, end),
        week_start: start,
        week_end: end,
        columns: column_times(grid),
        today_count: today_count(bookings, &barber.id, today),
        days,
    }
}

/// One of the barber's bookings with service names resolved.
pub fn booking_detail(
    catalog: &Catalog,
    grid: &SlotGrid,
    bookings: &[Booking],
    barber_id: &str,
    booking_id: &str,
) -> Option<CalendarEntry> {
    bookings
        .iter()
        .find(|b| b.id == booking_id && b.barber_id == barber_id)
        .map(|b| entry(catalog, grid, b))
}
