use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Barber {
    pub id: String,
    pub name: String,
    pub title: String,
    pub avatar: String,
    #[serde(skip_serializing)]
    pub pin: String,
}
