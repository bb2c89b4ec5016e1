use chrono::{Duration, NaiveDate, NaiveTime};

use crate::models::{Booking, BookingStatus};

struct SeedRow {
    id: &'static str,
    customer_name: &'static str,
    customer_phone: &'static str,
    barber_id: &'static str,
    services: &'static [&'static str],
    day_offset: i64,
    hour: u32,
    minute: u32,
    duration_minutes: u32,
    status: BookingStatus,
}

/// Demo bookings spread over today and the next two days.
pub fn mock_bookings(today: NaiveDate) -> Vec<Booking> {
    use BookingStatus::{Canceled, Confirmed, Uncertain};

    let rows = [
        row("bk1", "Jake L", "+1234567890", "b1", &["haircut"], 0, 9, 0, 30, Confirmed),
        row("bk2", "Caroline J", "+1234567891", "b1", &["beard"], 0, 10, 0, 20, Uncertain),
        row("bk3", "Hannah", "+1234567892", "b1", &["full"], 0, 13, 0, 50, Confirmed),
        row("bk4", "Lucy", "+1234567893", "b2", &["haircut"], 0, 9, 30, 30, Canceled),
        row("bk5", "Matthew", "+1234567894", "b2", &["full"], 0, 11, 0, 50, Confirmed),
        row("bk6", "Michael A", "+1234567895", "b3", &["haircut", "beard"], 0, 10, 0, 50, Confirmed),
        row("bk7", "Omar", "+1234567896", "b3", &["beard"], 0, 14, 0, 20, Confirmed),
        row("bk8", "Jakob", "+1234567897", "b1", &["full"], 1, 9, 30, 50, Confirmed),
        row("bk9", "Ana L", "+1234567898", "b2", &["haircut"], 1, 12, 0, 30, Uncertain),
        row("bk10", "Ben M", "+1234567899", "b3", &["beard"], 1, 9, 0, 20, Confirmed),
        row("bk11", "Bryce", "+1234568900", "b1", &["haircut"], 2, 10, 0, 30, Confirmed),
        row("bk12", "Trey", "+1234568901", "b2", &["full"], 2, 15, 0, 50, Confirmed),
    ];

    rows.into_iter()
        .filter_map(|r| {
            let time = NaiveTime::from_hms_opt(r.hour, r.minute, 0)?;
            Some(Booking {
                id: r.id.to_string(),
                customer_name: r.customer_name.to_string(),
                customer_phone: r.customer_phone.to_string(),
                barber_id: r.barber_id.to_string(),
                services: r.services.iter().map(|s| s.to_string()).collect(),
                date: today + Duration::days(r.day_offset),
                time,
                duration_minutes: r.duration_minutes,
                status: r.status,
            })
        })
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn row(
    id: &'static str,
    customer_name: &'static str,
    customer_phone: &'static str,
    barber_id: &'static str,
    services: &'static [&'static str],
    day_offset: i64,
    hour: u32,
    minute: u32,
    duration_minutes: u32,
    status: BookingStatus,
) -> SeedRow {
    SeedRow {
        id,
        customer_name,
        customer_phone,
        barber_id,
        services,
        day_offset,
        hour,
        minute,
        duration_minutes,
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_seed_dates_are_relative() {
        let today = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        let bookings = mock_bookings(today);
        assert_eq!(bookings.len(), 12);
        assert_eq!(bookings[0].date, today);
        assert_eq!(
            bookings[11].date,
            NaiveDate::from_ymd_opt(2026, 1, 2).unwrap()
        );
    }

    #[test]
    fn test_seed_durations_match_catalog() {
        let catalog = Catalog::default();
        for b in mock_bookings(NaiveDate::from_ymd_opt(2025, 6, 16).unwrap()) {
            assert_eq!(
                catalog.totals(&b.services).duration_minutes,
                b.duration_minutes,
                "{}",
                b.id
            );
            assert!(catalog.barber(&b.barber_id).is_some());
        }
    }
}
