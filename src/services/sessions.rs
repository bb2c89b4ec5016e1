use std::collections::HashMap;

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::models::{Wizard, WizardSession};

/// Open wizard sessions keyed by id. Idle sessions expire after `ttl`.
#[derive(Debug)]
pub struct WizardSessions {
    sessions: HashMap<String, WizardSession>,
    ttl: Duration,
}

impl WizardSessions {
    pub fn new(ttl_minutes: i64) -> Self {
        Self {
            sessions: HashMap::new(),
            ttl: Duration::minutes(ttl_minutes),
        }
    }

    pub fn create(&mut self, today: NaiveDate, now: NaiveDateTime) -> &WizardSession {
        let expired = self.expire(now);
        if expired > 0 {
            tracing::debug!(count = expired, "expired idle wizard sessions");
        }

        let id = uuid::Uuid::new_v4().to_string();
        let session = WizardSession {
            id: id.clone(),
            wizard: Wizard::new(today),
            last_activity: now,
            expires_at: now + self.ttl,
        };
        self.sessions.entry(id).or_insert(session)
    }

    /// Live session for `id`, with its idle timer reset.
    pub fn touch(&mut self, id: &str, now: NaiveDateTime) -> Option<&mut WizardSession> {
        if self.sessions.get(id).is_some_and(|s| s.expires_at <= now) {
            self.sessions.remove(id);
            return None;
        }
        let ttl = self.ttl;
        self.sessions.get_mut(id).map(|s| {
            s.last_activity = now;
            s.expires_at = now + ttl;
            s
        })
    }

    pub fn remove(&mut self, id: &str) -> Option<WizardSession> {
        self.sessions.remove(id)
    }

    pub fn expire(&mut self, now: NaiveDateTime) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, s| s.expires_at > now);
        before - self.sessions.len()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
