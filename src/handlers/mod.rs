pub mod availability;
pub mod catalog;
pub mod dashboard;
pub mod health;
pub mod pages;
pub mod wizard;
