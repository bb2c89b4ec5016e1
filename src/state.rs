use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{Local, NaiveDate, NaiveDateTime};

use crate::catalog::Catalog;
use crate::config::AppConfig;
use crate::errors::AppError;
use crate::models::SlotGrid;
use crate::services::sessions::WizardSessions;
use crate::services::wizard::WizardContext;
use crate::store::BookingStore;

pub struct AppState {
    pub store: Arc<Mutex<BookingStore>>,
    pub sessions: Mutex<WizardSessions>,
    pub catalog: Catalog,
    pub grid: SlotGrid,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(config: AppConfig, store: BookingStore) -> anyhow::Result<Self> {
        config.validate()?;
        let grid = config.slot_grid()?;
        Ok(Self {
            store: Arc::new(Mutex::new(store)),
            sessions: Mutex::new(WizardSessions::new(config.wizard_ttl_minutes)),
            catalog: Catalog::default(),
            grid,
            config,
        })
    }

    pub fn store(&self) -> Result<MutexGuard<'_, BookingStore>, AppError> {
        self.store
            .lock()
            .map_err(|_| AppError::Internal("booking store lock poisoned".to_string()))
    }

    pub fn sessions(&self) -> Result<MutexGuard<'_, WizardSessions>, AppError> {
        self.sessions
            .lock()
            .map_err(|_| AppError::Internal("wizard sessions lock poisoned".to_string()))
    }

    pub fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    pub fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    pub fn wizard_context(&self, today: NaiveDate) -> WizardContext<'_> {
        WizardContext {
            catalog: &self.catalog,
            grid: &self.grid,
            today,
            booking_window_days: self.config.booking_window_days,
        }
    }
}
