use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::slot::hhmm;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Phone,
    Otp,
    Details,
    Services,
    Barber,
    Time,
    Confirm,
    Booked,
}

const FULL_SEQUENCE: [Step; 7] = [
    Step::Phone,
    Step::Otp,
    Step::Details,
    Step::Services,
    Step::Barber,
    Step::Time,
    Step::Confirm,
];

const RETURNING_SEQUENCE: [Step; 6] = [
    Step::Phone,
    Step::Otp,
    Step::Services,
    Step::Barber,
    Step::Time,
    Step::Confirm,
];

impl Step {
    pub fn as_str(&self) -> &'static str {
        match self {
            Step::Phone => "phone",
            Step::Otp => "otp",
            Step::Details => "details",
            Step::Services => "services",
            Step::Barber => "barber",
            Step::Time => "time",
            Step::Confirm => "confirm",
            Step::Booked => "booked",
        }
    }

    /// Steps a customer walks through, with `details` dropped for a
    /// returning customer. `booked` is terminal and not part of it.
    pub fn sequence(returning: bool) -> &'static [Step] {
        if returning {
            &RETURNING_SEQUENCE
        } else {
            &FULL_SEQUENCE
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum WizardAction {
    SetPhone { phone: String },
    SetCode { code: String },
    SetName { name: String },
    ToggleService { service_id: String },
    SelectBarber { barber_id: String },
    SelectDate { date: NaiveDate },
    SelectTime {
        #[serde(with = "hhmm")]
        time: NaiveTime,
    },
    Next,
    Back,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Wizard {
    pub step: Step,
    pub phone: String,
    pub code: String,
    pub name: String,
    pub returning: bool,
    pub services: Vec<String>,
    pub barber_id: Option<String>,
    pub date: Option<NaiveDate>,
    #[serde(with = "hhmm::option")]
    pub time: Option<NaiveTime>,
    pub booking_id: Option<String>,
}

impl Wizard {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            step: Step::Phone,
            phone: String::new(),
            code: String::new(),
            name: String::new(),
            returning: false,
            services: Vec::new(),
            barber_id: None,
            date: Some(today),
            time: None,
            booking_id: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct WizardSession {
    pub id: String,
    pub wizard: Wizard,
    pub last_activity: NaiveDateTime,
    pub expires_at: NaiveDateTime,
}
