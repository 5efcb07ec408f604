//! Typed session state over the key-value port.
//!
//! Persistence here is a convenience mirror, not a system of record: every
//! read or write is best-effort, and on any storage failure the in-memory
//! default wins. Failures are logged and swallowed so a broken store can
//! never take a session down with it.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::portal::billing::CardSummary;
use crate::portal::objections::{Objection, OwnerObjectionDraft};
use crate::portal::surveys::SurveyResponse;
use crate::storage::KeyValueStore;

const PROFILE_KEY: &str = "owner_profile";
const OBJECTIONS_KEY: &str = "owner_objections";
const DRAFT_KEY: &str = "objection_draft";
const SURVEYS_KEY: &str = "satisfaction_surveys";
const LAST_CARD_KEY: &str = "last_card";

/// Registration details of the signed-in owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerProfile {
    pub name: String,
    pub national_id: String,
    pub phone: String,
    pub email: String,
    pub unit: String,
    pub building: String,
    pub city: String,
}

impl Default for OwnerProfile {
    fn default() -> Self {
        Self {
            name: "رنيم عبد العزيز".to_string(),
            national_id: "1234567890".to_string(),
            phone: "0553816630".to_string(),
            email: "raneem@gmail.com".to_string(),
            unit: "A-12".to_string(),
            building: "برج الندى".to_string(),
            city: "الرياض".to_string(),
        }
    }
}

/// The session's persisted state, accessed through an injected store.
pub struct SessionStore<S> {
    store: Arc<S>,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn profile(&self) -> OwnerProfile {
        self.read(PROFILE_KEY).unwrap_or_default()
    }

    pub fn save_profile(&self, profile: &OwnerProfile) {
        self.write(PROFILE_KEY, profile);
    }

    pub fn objections(&self) -> Vec<Objection> {
        self.read(OBJECTIONS_KEY).unwrap_or_default()
    }

    pub fn save_objections(&self, objections: &[Objection]) {
        self.write(OBJECTIONS_KEY, &objections);
    }

    pub fn draft(&self) -> Option<OwnerObjectionDraft> {
        self.read(DRAFT_KEY)
    }

    pub fn save_draft(&self, draft: &OwnerObjectionDraft) {
        self.write(DRAFT_KEY, draft);
    }

    /// Drop the parked draft, typically after a successful submission.
    pub fn clear_draft(&self) {
        if let Err(err) = self.store.remove(DRAFT_KEY) {
            warn!(key = DRAFT_KEY, %err, "session store remove failed");
        }
    }

    pub fn surveys(&self) -> Vec<SurveyResponse> {
        self.read(SURVEYS_KEY).unwrap_or_default()
    }

    /// Append a survey to the response history.
    pub fn record_survey(&self, response: SurveyResponse) -> Vec<SurveyResponse> {
        let mut history = self.surveys();
        history.push(response);
        self.write(SURVEYS_KEY, &history);
        history
    }

    pub fn last_card(&self) -> Option<CardSummary> {
        self.read(LAST_CARD_KEY)
    }

    pub fn save_last_card(&self, summary: &CardSummary) {
        self.write(LAST_CARD_KEY, summary);
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                warn!(key, %err, "session store read failed; using defaults");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(key, %err, "session store held invalid JSON; using defaults");
                None
            }
        }
    }

    fn write<T: Serialize>(&self, key: &str, value: &T) {
        let encoded = match serde_json::to_string(value) {
            Ok(encoded) => encoded,
            Err(err) => {
                warn!(key, %err, "session value failed to encode");
                return;
            }
        };
        if let Err(err) = self.store.put(key, &encoded) {
            warn!(key, %err, "session store write failed; state kept in memory only");
        }
    }
}
