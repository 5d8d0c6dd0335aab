//! In-memory stand-ins for the datastore and spreadsheet service.

use std::sync::{Arc, Mutex as StdMutex};

use async_trait::async_trait;
use rand::{rngs::StdRng, RngCore, SeedableRng};
use serde_json::Value;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    config::Config,
    db::ReferralExt,
    models::referralmodel::{Group, ReferralLink},
    service::{
        referral::ReferralCodeSource,
        scraper::SampleScraper,
        sheets::{SheetsError, Spreadsheet, SpreadsheetExt},
    },
    AppState,
};

/// Deterministic code source: replays fixed UUIDs, then draws from a seeded RNG.
pub struct SeededCodeSource {
    fixed: StdMutex<Vec<Uuid>>,
    rng: StdMutex<StdRng>,
}

impl SeededCodeSource {
    pub fn new(seed: u64) -> Self {
        Self {
            fixed: StdMutex::new(Vec::new()),
            rng: StdMutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn fixed(mut uuids: Vec<Uuid>) -> Self {
        uuids.reverse();
        Self {
            fixed: StdMutex::new(uuids),
            rng: StdMutex::new(StdRng::seed_from_u64(0)),
        }
    }
}

impl ReferralCodeSource for SeededCodeSource {
    fn next_uuid(&self) -> Uuid {
        if let Some(uuid) = self.fixed.lock().unwrap().pop() {
            return uuid;
        }

        let mut bytes = [0u8; 16];
        self.rng.lock().unwrap().fill_bytes(&mut bytes);
        uuid::Builder::from_random_bytes(bytes).into_uuid()
    }
}

#[derive(Default, Clone)]
pub struct InMemoryReferralStore {
    groups: Arc<Mutex<Vec<Group>>>,
    links: Arc<Mutex<Vec<ReferralLink>>>,
    fail_inserts: bool,
}

impl InMemoryReferralStore {
    pub fn with_group(leader_user_id: Uuid, group_code: &str) -> Self {
        Self {
            groups: Arc::new(Mutex::new(vec![Group {
                leader_user_id,
                group_code: group_code.to_string(),
            }])),
            ..Default::default()
        }
    }

    pub fn failing_inserts(mut self) -> Self {
        self.fail_inserts = true;
        self
    }

    pub async fn links(&self) -> Vec<ReferralLink> {
        self.links.lock().await.clone()
    }
}

#[async_trait]
impl ReferralExt for InMemoryReferralStore {
    async fn get_group_by_leader(
        &self,
        leader_user_id: Uuid,
    ) -> Result<Option<Group>, sqlx::Error> {
        let groups = self.groups.lock().await;
        Ok(groups
            .iter()
            .find(|group| group.leader_user_id == leader_user_id)
            .cloned())
    }

    async fn save_referral_link(&self, link: &ReferralLink) -> Result<(), sqlx::Error> {
        if self.fail_inserts {
            return Err(sqlx::Error::PoolTimedOut);
        }

        self.links.lock().await.push(link.clone());
        Ok(())
    }
}

#[derive(Default, Clone)]
pub struct RecordingSheets {
    titles: Arc<Mutex<Vec<String>>>,
    writes: Arc<Mutex<Vec<(Spreadsheet, Vec<Vec<Value>>)>>>,
    fail_writes: bool,
}

impl RecordingSheets {
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub async fn titles(&self) -> Vec<String> {
        self.titles.lock().await.clone()
    }

    pub async fn writes(&self) -> Vec<(Spreadsheet, Vec<Vec<Value>>)> {
        self.writes.lock().await.clone()
    }
}

#[async_trait]
impl SpreadsheetExt for RecordingSheets {
    async fn create_spreadsheet(&self, title: &str) -> Result<Spreadsheet, SheetsError> {
        let mut titles = self.titles.lock().await;
        titles.push(title.to_string());

        Ok(Spreadsheet {
            id: format!("sheet-{}", titles.len()),
            first_sheet_title: "Sheet1".to_string(),
            first_sheet_id: 0,
        })
    }

    async fn write_rows(
        &self,
        spreadsheet: &Spreadsheet,
        rows: Vec<Vec<Value>>,
    ) -> Result<(), SheetsError> {
        if self.fail_writes {
            return Err(SheetsError::Api {
                status: 429,
                body: "Quota exceeded".to_string(),
            });
        }

        self.writes.lock().await.push((spreadsheet.clone(), rows));
        Ok(())
    }
}

pub fn test_app_state(store: InMemoryReferralStore, sheets: RecordingSheets) -> AppState {
    AppState {
        env: Config::for_tests(),
        db_client: Arc::new(store),
        sheets: Arc::new(sheets),
        scraper: Arc::new(SampleScraper),
        code_source: Arc::new(SeededCodeSource::new(2024)),
    }
}
