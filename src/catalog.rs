use serde::Serialize;

use crate::models::customer::normalize_phone;
use crate::models::{Barber, Customer, Service};

/// Fixed reference data: services, the barber roster and known customers.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub services: Vec<Service>,
    pub barbers: Vec<Barber>,
    pub customers: Vec<Customer>,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
pub struct Totals {
    pub duration_minutes: u32,
    pub price: u32,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            services: vec![
                service("haircut", "Haircut", 30, 35, "✂️"),
                service("beard", "Beard Trim", 20, 20, "🪒"),
                service("full", "Full Service", 50, 50, "💈"),
                service("lineup", "Line Up", 15, 15, "📐"),
                service("shave", "Hot Shave", 25, 30, "🧴"),
                service("kids", "Kids Cut", 20, 22, "👦"),
            ],
            barbers: vec![
                barber("b1", "Marcus", "Senior Barber", "M", "1234"),
                barber("b2", "Jake", "Style Specialist", "J", "5678"),
                barber("b3", "Devon", "Master Barber", "D", "9012"),
            ],
            customers: vec![
                Customer {
                    phone: "+1234567890".to_string(),
                    name: "Jake L".to_string(),
                    email: Some("jake@example.com".to_string()),
                },
                Customer {
                    phone: "+1234567891".to_string(),
                    name: "Caroline J".to_string(),
                    email: None,
                },
                Customer {
                    phone: "+1234567892".to_string(),
                    name: "Hannah".to_string(),
                    email: None,
                },
            ],
        }
    }
}

impl Catalog {
    pub fn service(&self, id: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.id == id)
    }

    pub fn barber(&self, id: &str) -> Option<&Barber> {
        self.barbers.iter().find(|b| b.id == id)
    }

    pub fn barber_by_pin(&self, pin: &str) -> Option<&Barber> {
        self.barbers.iter().find(|b| b.pin == pin)
    }

    pub fn known_customer(&self, phone: &str) -> Option<&Customer> {
        let wanted = normalize_phone(phone);
        self.customers
            .iter()
            .find(|c| normalize_phone(&c.phone) == wanted)
    }

    /// Sums duration and price; unknown ids contribute nothing.
    pub fn totals(&self, service_ids: &[String]) -> Totals {
        service_ids
            .iter()
            .filter_map(|id| self.service(id))
            .fold(Totals::default(), |acc, s| Totals {
                duration_minutes: acc.duration_minutes + s.duration_minutes,
                price: acc.price + s.price,
            })
    }

    /// Display names in order, falling back to the raw id.
    pub fn service_names(&self, service_ids: &[String]) -> Vec<String> {
        service_ids
            .iter()
            .map(|id| {
                self.service(id)
                    .map(|s| s.name.clone())
                    .unwrap_or_else(|| id.clone())
            })
            .collect()
    }
}

fn service(id: &str, name: &str, duration_minutes: u32, price: u32, icon: &str) -> Service {
    Service {
        id: id.to_string(),
        name: name.to_string(),
        duration_minutes,
        price,
        icon: icon.to_string(),
    }
}

fn barber(id: &str, name: &str, title: &str, avatar: &str, pin: &str) -> Barber {
    Barber {
        id: id.to_string(),
        name: name.to_string(),
        title: title.to_string(),
        avatar: avatar.to_string(),
        pin: pin.to_string(),
    }
}
