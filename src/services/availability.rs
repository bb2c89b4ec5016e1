use chrono::{NaiveDate, NaiveTime};

use crate::models::slot::minute_of_day;
use crate::models::Booking;

/// Active bookings for one barber on one day.
pub fn active_bookings_for<'a>(
    bookings: &'a [Booking],
    barber_id: &'a str,
    date: NaiveDate,
) -> impl Iterator<Item = &'a Booking> + 'a {
    bookings
        .iter()
        .filter(move |b| b.barber_id == barber_id && b.date == date && b.is_active())
}

/// Grid slots whose start does not fall inside any active booking of the
/// barber on that day. Without a barber or a date the grid is returned as is.
pub fn available_slots(
    slots: &[NaiveTime],
    barber_id: Option<&str>,
    date: Option<NaiveDate>,
    bookings: &[Booking],
) -> Vec<NaiveTime> {
    let (Some(barber_id), Some(date)) = (barber_id, date) else {
        return slots.to_vec();
    };

    let blocking: Vec<&Booking> = active_bookings_for(bookings, barber_id, date).collect();

    slots
        .iter()
        .filter(|slot| {
            let minute = minute_of_day(slot);
            !blocking.iter().any(|b| b.covers(minute))
        })
        .copied()
        .collect()
}

/// Like [`available_slots`], but also drops slots where a visit of
/// `duration_minutes` would run into a later booking.
pub fn bookable_slots(
    slots: &[NaiveTime],
    barber_id: Option<&str>,
    date: Option<NaiveDate>,
    bookings: &[Booking],
    duration_minutes: u32,
) -> Vec<NaiveTime> {
    let free = available_slots(slots, barber_id, date, bookings);
    let (Some(barber_id), Some(date)) = (barber_id, date) else {
        return free;
    };
    if duration_minutes == 0 {
        return free;
    }

    let blocking: Vec<&Booking> = active_bookings_for(bookings, barber_id, date).collect();

    free.into_iter()
        .filter(|slot| {
            let start = minute_of_day(slot);
            let end = start.saturating_add(duration_minutes);
            !blocking
                .iter()
                .any(|b| b.start_minute() < end && start < b.end_minute())
        })
        .collect()
}

/// First active booking that overlaps `candidate` on the same barber and day.
pub fn find_conflict<'a>(bookings: &'a [Booking], candidate: &Booking) -> Option<&'a Booking> {
    bookings.iter().find(|existing| {
        existing.is_active() && existing.id != candidate.id && existing.overlaps(candidate)
    })
}
