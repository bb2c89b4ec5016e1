pub mod barber;
pub mod booking;
pub mod customer;
pub mod service;
pub mod slot;
pub mod wizard;

pub use barber::Barber;
pub use booking::{Booking, BookingStatus, BookingUpdate};
pub use customer::Customer;
pub use service::Service;
pub use slot::SlotGrid;
pub use wizard::{Step, Wizard, WizardAction, WizardSession};
