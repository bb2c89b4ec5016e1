use chrono::{Duration, NaiveDate, NaiveTime};
use serde::Serialize;

use crate::catalog::Catalog;
use crate::models::customer::digit_count;
use crate::models::slot::format_hhmm;
use crate::models::{Booking, BookingStatus, SlotGrid, Step, Wizard, WizardAction};
use crate::services::availability::bookable_slots;
use crate::store::{BookingStore, StoreError};

const MIN_PHONE_DIGITS: usize = 7;
const CODE_LENGTH: usize = 4;

/// Read-only inputs the wizard needs besides the booking store.
pub struct WizardContext<'a> {
    pub catalog: &'a Catalog,
    pub grid: &'a SlotGrid,
    pub today: NaiveDate,
    pub booking_window_days: u32,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum WizardError {
    #[error("{action} is only accepted at the {expected} step, wizard is at {current}")]
    WrongStep {
        action: &'static str,
        expected: &'static str,
        current: &'static str,
    },

    #[error("{0}")]
    Blocked(String),

    #[error("unknown service: {0}")]
    UnknownService(String),

    #[error("unknown barber: {0}")]
    UnknownBarber(String),

    #[error("booking is already complete")]
    Finished,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result of a passed forward guard; selects the branch in the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    Passed,
    ReturningCustomer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Stayed,
    Moved(Step),
    Exited,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Progress {
    pub position: usize,
    pub total: usize,
}

/// Forward transition table keyed by (step, guard outcome).
pub fn next_step(step: Step, guard: Guard) -> Option<Step> {
    match (step, guard) {
        (Step::Phone, _) => Some(Step::Otp),
        (Step::Otp, Guard::ReturningCustomer) => Some(Step::Services),
        (Step::Otp, Guard::Passed) => Some(Step::Details),
        (Step::Details, _) => Some(Step::Services),
        (Step::Services, _) => Some(Step::Barber),
        (Step::Barber, _) => Some(Step::Time),
        (Step::Time, _) => Some(Step::Confirm),
        (Step::Confirm, _) => Some(Step::Booked),
        (Step::Booked, _) => None,
    }
}

/// Step before `step` in the skip-adjusted sequence; `None` means leave the wizard.
pub fn previous_step(step: Step, returning: bool) -> Option<Step> {
    let sequence = Step::sequence(returning);
    let idx = sequence.iter().position(|s| *s == step)?;
    idx.checked_sub(1).and_then(|i| sequence.get(i).copied())
}

pub fn progress(wizard: &Wizard) -> Progress {
    let sequence = Step::sequence(wizard.returning);
    let total = sequence.len();
    let position = sequence
        .iter()
        .position(|s| *s == wizard.step)
        .map(|i| i + 1)
        .unwrap_or(total);
    Progress { position, total }
}

/// Days a customer may pick, starting today.
pub fn booking_dates(ctx: &WizardContext<'_>) -> Vec<NaiveDate> {
    (0..i64::from(ctx.booking_window_days))
        .map(|offset| ctx.today + Duration::days(offset))
        .collect()
}

/// Slots offered at the time step for the current barber, date and services.
pub fn offered_slots(wizard: &Wizard, ctx: &WizardContext<'_>, bookings: &[Booking]) -> Vec<NaiveTime> {
    let duration = ctx.catalog.totals(&wizard.services).duration_minutes;
    bookable_slots(
        &ctx.grid.slots(),
        wizard.barber_id.as_deref(),
        wizard.date,
        bookings,
        duration,
    )
}

pub fn apply(
    wizard: &mut Wizard,
    action: WizardAction,
    ctx: &WizardContext<'_>,
    store: &mut BookingStore,
) -> Result<Navigation, WizardError> {
    match action {
        WizardAction::SetPhone { phone } => {
            expect_step(wizard, Step::Phone, "set_phone")?;
            wizard.phone = phone.trim().to_string();
        }
        WizardAction::SetCode { code } => {
            expect_step(wizard, Step::Otp, "set_code")?;
            wizard.code = code
                .chars()
                .filter(|c| c.is_ascii_digit())
                .take(CODE_LENGTH)
                .collect();
        }
        WizardAction::SetName { name } => {
            expect_step(wizard, Step::Details, "set_name")?;
            wizard.name = name;
        }
        WizardAction::ToggleService { service_id } => {
            expect_step(wizard, Step::Services, "toggle_service")?;
            if ctx.catalog.service(&service_id).is_none() {
                return Err(WizardError::UnknownService(service_id));
            }
            if let Some(pos) = wizard.services.iter().position(|s| *s == service_id) {
                wizard.services.remove(pos);
            } else {
                wizard.services.push(service_id);
            }
        }
        WizardAction::SelectBarber { barber_id } => {
            expect_step(wizard, Step::Barber, "select_barber")?;
            if ctx.catalog.barber(&barber_id).is_none() {
                return Err(WizardError::UnknownBarber(barber_id));
            }
            if wizard.barber_id.as_deref() != Some(barber_id.as_str()) {
                wizard.time = None;
            }
            wizard.barber_id = Some(barber_id);
        }
        WizardAction::SelectDate { date } => {
            expect_step(wizard, Step::Time, "select_date")?;
            if !booking_dates(ctx).contains(&date) {
                return Err(WizardError::Blocked(format!(
                    "{date} is outside the booking window"
                )));
            }
            wizard.date = Some(date);
            wizard.time = None;
        }
        WizardAction::SelectTime { time } => {
            expect_step(wizard, Step::Time, "select_time")?;
            if !offered_slots(wizard, ctx, store.list()).contains(&time) {
                return Err(WizardError::Blocked(format!(
                    "{} is not available",
                    format_hhmm(&time)
                )));
            }
            wizard.time = Some(time);
        }
        WizardAction::Next => return advance(wizard, ctx, store),
        WizardAction::Back => return back(wizard),
    }
    Ok(Navigation::Stayed)
}

fn expect_step(wizard: &Wizard, expected: Step, action: &'static str) -> Result<(), WizardError> {
    if wizard.step == Step::Booked {
        return Err(WizardError::Finished);
    }
    if wizard.step != expected {
        return Err(WizardError::WrongStep {
            action,
            expected: expected.as_str(),
            current: wizard.step.as_str(),
        });
    }
    Ok(())
}

fn evaluate_guard(
    wizard: &Wizard,
    ctx: &WizardContext<'_>,
    bookings: &[Booking],
) -> Result<Guard, WizardError> {
    match wizard.step {
        Step::Phone => {
            if digit_count(&wizard.phone) < MIN_PHONE_DIGITS {
                return Err(WizardError::Blocked(format!(
                    "phone number needs at least {MIN_PHONE_DIGITS} digits"
                )));
            }
            Ok(Guard::Passed)
        }
        Step::Otp => {
            if wizard.code.len() != CODE_LENGTH {
                return Err(WizardError::Blocked(format!(
                    "enter the {CODE_LENGTH}-digit code"
                )));
            }
            if ctx.catalog.known_customer(&wizard.phone).is_some() {
                Ok(Guard::ReturningCustomer)
            } else {
                Ok(Guard::Passed)
            }
        }
        Step::Details => {
            if wizard.name.trim().is_empty() {
                return Err(WizardError::Blocked("name is required".to_string()));
            }
            Ok(Guard::Passed)
        }
        Step::Services => {
            if wizard.services.is_empty() {
                return Err(WizardError::Blocked(
                    "select at least one service".to_string(),
                ));
            }
            Ok(Guard::Passed)
        }
        Step::Barber => {
            if wizard.barber_id.is_none() {
                return Err(WizardError::Blocked("select a barber".to_string()));
            }
            Ok(Guard::Passed)
        }
        Step::Time => {
            let time = wizard
                .time
                .ok_or_else(|| WizardError::Blocked("select a time".to_string()))?;
            if !offered_slots(wizard, ctx, bookings).contains(&time) {
                return Err(WizardError::Blocked(format!(
                    "{} is no longer available",
                    format_hhmm(&time)
                )));
            }
            Ok(Guard::Passed)
        }
        Step::Confirm => Ok(Guard::Passed),
        Step::Booked => Err(WizardError::Finished),
    }
}

fn advance(
    wizard: &mut Wizard,
    ctx: &WizardContext<'_>,
    store: &mut BookingStore,
) -> Result<Navigation, WizardError> {
    let guard = evaluate_guard(wizard, ctx, store.list())?;
    let next = next_step(wizard.step, guard).ok_or(WizardError::Finished)?;

    match (wizard.step, guard) {
        (Step::Otp, Guard::ReturningCustomer) => {
            if let Some(customer) = ctx.catalog.known_customer(&wizard.phone) {
                wizard.name = customer.name.clone();
            }
            wizard.returning = true;
        }
        (Step::Otp, Guard::Passed) => {
            // name came from the customer record, not from this caller
            if wizard.returning {
                wizard.name.clear();
            }
            wizard.returning = false;
        }
        (Step::Confirm, _) => {
            let booking = build_booking(wizard, ctx)?;
            let id = booking.id.clone();
            store.add(booking)?;
            wizard.booking_id = Some(id);
        }
        _ => {}
    }

    tracing::debug!(from = wizard.step.as_str(), to = next.as_str(), "wizard advanced");
    wizard.step = next;
    Ok(Navigation::Moved(next))
}

fn back(wizard: &mut Wizard) -> Result<Navigation, WizardError> {
    if wizard.step == Step::Booked {
        return Err(WizardError::Finished);
    }
    match previous_step(wizard.step, wizard.returning) {
        Some(prev) => {
            tracing::debug!(from = wizard.step.as_str(), to = prev.as_str(), "wizard went back");
            wizard.step = prev;
            Ok(Navigation::Moved(prev))
        }
        None => Ok(Navigation::Exited),
    }
}

fn build_booking(wizard: &Wizard, ctx: &WizardContext<'_>) -> Result<Booking, WizardError> {
    let missing = |what: &str| WizardError::Blocked(format!("{what} is missing"));

    Ok(Booking {
        id: format!("bk_{}", uuid::Uuid::new_v4().simple()),
        customer_name: wizard.name.trim().to_string(),
        customer_phone: wizard.phone.clone(),
        barber_id: wizard.barber_id.clone().ok_or_else(|| missing("barber"))?,
        services: wizard.services.clone(),
        date: wizard.date.ok_or_else(|| missing("date"))?,
        time: wizard.time.ok_or_else(|| missing("time"))?,
        duration_minutes: ctx.catalog.totals(&wizard.services).duration_minutes,
        status: BookingStatus::Confirmed,
    })
}
