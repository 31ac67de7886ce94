//! # CSV Countdown Repository
//!
//! `countdowns.csv` normally holds a single row written by countdown
//! synthesis. Nothing in the application updates it afterwards.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::connection::CsvConnection;
use crate::domain::models::countdown::DomainCountdown;
use crate::storage::traits::CountdownStorage;

const COUNTDOWNS_FILE: &str = "countdowns.csv";
const COUNTDOWNS_HEADER: &str = "id,current_age,next_birthday,days_until_birthday,birth_date";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CountdownRecord {
    id: String,
    current_age: u32,
    next_birthday: String,
    days_until_birthday: i64,
    birth_date: String,
}

impl From<&DomainCountdown> for CountdownRecord {
    fn from(countdown: &DomainCountdown) -> Self {
        CountdownRecord {
            id: countdown.id.clone(),
            current_age: countdown.current_age,
            next_birthday: countdown
                .next_birthday
                .to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            days_until_birthday: countdown.days_until_birthday,
            birth_date: countdown.birth_date.format("%Y-%m-%d").to_string(),
        }
    }
}

impl TryFrom<CountdownRecord> for DomainCountdown {
    type Error = anyhow::Error;

    fn try_from(record: CountdownRecord) -> Result<Self> {
        let next_birthday = DateTime::parse_from_rfc3339(&record.next_birthday)
            .context("Failed to parse next_birthday")?
            .with_timezone(&Utc);
        let birth_date = NaiveDate::parse_from_str(&record.birth_date, "%Y-%m-%d")
            .context("Failed to parse birth_date")?;

        Ok(DomainCountdown {
            id: record.id,
            current_age: record.current_age,
            next_birthday,
            days_until_birthday: record.days_until_birthday,
            birth_date,
        })
    }
}

#[derive(Clone)]
pub struct CountdownRepository {
    connection: CsvConnection,
}

impl CountdownRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl CountdownStorage for CountdownRepository {
    async fn list_countdowns(&self) -> Result<Vec<DomainCountdown>> {
        let records: Vec<CountdownRecord> =
            self.connection.read_records(COUNTDOWNS_FILE, COUNTDOWNS_HEADER)?;

        let mut countdowns = Vec::with_capacity(records.len());
        for record in records {
            let id = record.id.clone();
            match DomainCountdown::try_from(record) {
                Ok(countdown) => countdowns.push(countdown),
                Err(e) => warn!("Skipping countdown record {}: {}", id, e),
            }
        }
        Ok(countdowns)
    }

    async fn create_countdown(&self, countdown: &DomainCountdown) -> Result<()> {
        let _guard = self.connection.lock_writes().await;
        self.connection.append_record(
            COUNTDOWNS_FILE,
            COUNTDOWNS_HEADER,
            &CountdownRecord::from(countdown),
        )?;

        info!(
            "Created countdown {} (next birthday {}, age {})",
            countdown.id, countdown.next_birthday, countdown.current_age
        );
        Ok(())
    }
}
