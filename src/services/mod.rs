pub mod availability;
pub mod dashboard;
pub mod sessions;
pub mod wizard;
