use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Service {
    pub id: String,
    pub name: String,
    pub duration_minutes: u32,
    /// Whole dollars.
    pub price: u32,
    pub icon: String,
}
