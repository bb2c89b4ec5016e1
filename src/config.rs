use std::env;

use anyhow::Context;

use crate::models::slot::{parse_hhmm, SlotGrid};

const MAX_BOOKING_WINDOW_DAYS: u32 = 366;
const MAX_WIZARD_TTL_MINUTES: i64 = 7 * 24 * 60;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub shop_name: String,
    pub first_slot: String,
    pub last_slot: String,
    pub slot_minutes: u32,
    pub booking_window_days: u32,
    pub wizard_ttl_minutes: i64,
    pub seed_mock_data: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            shop_name: "Fade & Co".to_string(),
            first_slot: "09:00".to_string(),
            last_slot: "19:00".to_string(),
            slot_minutes: 30,
            booking_window_days: 7,
            wizard_ttl_minutes: 30,
            seed_mock_data: true,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            shop_name: env::var("SHOP_NAME").unwrap_or(defaults.shop_name),
            first_slot: env::var("FIRST_SLOT").unwrap_or(defaults.first_slot),
            last_slot: env::var("LAST_SLOT").unwrap_or(defaults.last_slot),
            slot_minutes: env::var("SLOT_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.slot_minutes),
            booking_window_days: env::var("BOOKING_WINDOW_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.booking_window_days),
            wizard_ttl_minutes: env::var("WIZARD_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.wizard_ttl_minutes),
            seed_mock_data: env::var("SEED_MOCK_DATA")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.seed_mock_data),
        }
    }

    /// Rejects limits that would overflow session expiry or blow up the
    /// list of bookable dates.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            (1..=MAX_BOOKING_WINDOW_DAYS).contains(&self.booking_window_days),
            "invalid BOOKING_WINDOW_DAYS {}: expected 1..={MAX_BOOKING_WINDOW_DAYS}",
            self.booking_window_days
        );
        anyhow::ensure!(
            (1..=MAX_WIZARD_TTL_MINUTES).contains(&self.wizard_ttl_minutes),
            "invalid WIZARD_TTL_MINUTES {}: expected 1..={MAX_WIZARD_TTL_MINUTES}",
            self.wizard_ttl_minutes
        );
        Ok(())
    }

    /// Builds the daily slot grid, failing on malformed or inverted bounds.
    pub fn slot_grid(&self) -> anyhow::Result<SlotGrid> {
        let first = parse_hhmm(&self.first_slot).context("invalid FIRST_SLOT")?;
        let last = parse_hhmm(&self.last_slot).context("invalid LAST_SLOT")?;
        SlotGrid::new(first, last, self.slot_minutes)
    }
}

fn parse_flag(v: &str) -> bool {
    !matches!(
        v.trim().to_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}
