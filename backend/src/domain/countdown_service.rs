//! Countdown synthesis.
//!
//! The countdown record is created once, on the first load that finds none,
//! and is never refreshed afterwards. `current_age` and
//! `days_until_birthday` describe the moment of synthesis; the live
//! breakdown shown on the dashboard is derived from `next_birthday` alone.

use anyhow::{Context, Result};
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, TimeZone, Utc};
use shared::TimeLeft;
use std::sync::Arc;
use tracing::info;

use crate::domain::models::countdown::DomainCountdown;
use crate::storage::csv::{CountdownRepository, CsvConnection};
use crate::storage::CountdownStorage;

/// Local midnight of the birthday in `year`. A Feb 29 birthday falls on
/// Mar 1 in common years.
fn birthday_in_year<Tz: TimeZone>(birth_date: NaiveDate, year: i32, tz: &Tz) -> Result<DateTime<Tz>> {
    let date = NaiveDate::from_ymd_opt(year, birth_date.month(), birth_date.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
        .with_context(|| format!("No birthday date in year {}", year))?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .with_context(|| format!("Invalid midnight for {}", date))?;

    tz.from_local_datetime(&midnight)
        .earliest()
        .with_context(|| format!("Local midnight of {} does not exist", date))
}

/// Build the countdown record for `now`, evaluated in `now`'s time zone.
///
/// The next birthday is this year's unless it is already strictly in the
/// past, so at exactly local midnight of the birthday the countdown points
/// at that same instant with zero days left.
pub fn synthesize_countdown<Tz: TimeZone>(
    birth_date: NaiveDate,
    now: &DateTime<Tz>,
    id: String,
) -> Result<DomainCountdown> {
    let tz = now.timezone();

    let mut next_birthday = birthday_in_year(birth_date, now.year(), &tz)?;
    if next_birthday < *now {
        next_birthday = birthday_in_year(birth_date, now.year() + 1, &tz)?;
    }

    let current_age = (next_birthday.year() - birth_date.year()).max(0) as u32;

    let diff_ms = next_birthday
        .clone()
        .signed_duration_since(now.clone())
        .num_milliseconds();
    let days_until_birthday = (diff_ms + TimeLeft::DAY_MS - 1).div_euclid(TimeLeft::DAY_MS);

    Ok(DomainCountdown {
        id,
        current_age,
        next_birthday: next_birthday.with_timezone(&Utc),
        days_until_birthday,
        birth_date,
    })
}

#[derive(Clone)]
pub struct CountdownService {
    countdown_storage: Arc<dyn CountdownStorage>,
    birth_date: NaiveDate,
}

impl CountdownService {
    pub fn new(csv_conn: Arc<CsvConnection>, birth_date: NaiveDate) -> Self {
        Self::with_storage(
            Arc::new(CountdownRepository::new((*csv_conn).clone())),
            birth_date,
        )
    }

    pub fn with_storage(countdown_storage: Arc<dyn CountdownStorage>, birth_date: NaiveDate) -> Self {
        Self {
            countdown_storage,
            birth_date,
        }
    }

    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    /// Return the stored countdown, synthesizing and storing one on first use
    pub async fn load_or_create(&self, now: DateTime<FixedOffset>) -> Result<DomainCountdown> {
        let existing = self.countdown_storage.list_countdowns().await?;
        if let Some(countdown) = existing.into_iter().next() {
            return Ok(countdown);
        }

        let id = shared::BirthdayCountdown::generate_id(now.timestamp_millis().max(0) as u64);
        let countdown = synthesize_countdown(self.birth_date, &now, id)?;
        self.countdown_storage.create_countdown(&countdown).await?;

        info!(
            "Synthesized countdown: next birthday {} ({} days, turning {})",
            countdown.next_birthday, countdown.days_until_birthday, countdown.current_age
        );
        Ok(countdown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::csv::test_utils::{test_countdown, TestEnvironment};

    fn birth_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 20).unwrap()
    }

    fn at(value: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(value).unwrap()
    }

    fn utc(value: &str) -> DateTime<Utc> {
        at(value).with_timezone(&Utc)
    }

    #[test]
    fn test_after_birthday_rolls_to_next_year() {
        let countdown =
            synthesize_countdown(birth_date(), &at("2024-03-01T00:00:00Z"), "c".to_string()).unwrap();
        assert_eq!(countdown.next_birthday, utc("2025-02-20T00:00:00Z"));
        assert_eq!(countdown.current_age, 1);
        assert_eq!(countdown.days_until_birthday, 356);
    }

    #[test]
    fn test_before_birthday_uses_this_year() {
        let countdown =
            synthesize_countdown(birth_date(), &at("2025-01-10T12:00:00Z"), "c".to_string()).unwrap();
        assert_eq!(countdown.next_birthday, utc("2025-02-20T00:00:00Z"));
        assert_eq!(countdown.current_age, 1);
        // 40.5 days rounds up
        assert_eq!(countdown.days_until_birthday, 41);
    }

    #[test]
    fn test_exact_midnight_keeps_this_year() {
        let countdown =
            synthesize_countdown(birth_date(), &at("2025-02-20T00:00:00Z"), "c".to_string()).unwrap();
        assert_eq!(countdown.next_birthday, utc("2025-02-20T00:00:00Z"));
        assert_eq!(countdown.days_until_birthday, 0);
        assert_eq!(countdown.current_age, 1);

        let countdown =
            synthesize_countdown(birth_date(), &at("2025-02-20T00:00:00.001Z"), "c".to_string())
                .unwrap();
        assert_eq!(countdown.next_birthday, utc("2026-02-20T00:00:00Z"));
        assert_eq!(countdown.days_until_birthday, 365);
        assert_eq!(countdown.current_age, 2);
    }

    #[test]
    fn test_birthday_is_local_midnight() {
        let countdown = synthesize_countdown(
            birth_date(),
            &at("2025-02-19T20:00:00+09:00"),
            "c".to_string(),
        )
        .unwrap();
        assert_eq!(countdown.next_birthday, utc("2025-02-19T15:00:00Z"));
        assert_eq!(countdown.days_until_birthday, 1);
    }

    #[test]
    fn test_leap_day_birthday_falls_back_to_march_first() {
        let leap = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let countdown =
            synthesize_countdown(leap, &at("2025-01-01T00:00:00Z"), "c".to_string()).unwrap();
        assert_eq!(countdown.next_birthday, utc("2025-03-01T00:00:00Z"));

        let countdown =
            synthesize_countdown(leap, &at("2027-06-01T00:00:00Z"), "c".to_string()).unwrap();
        assert_eq!(countdown.next_birthday, utc("2028-02-29T00:00:00Z"));
        assert_eq!(countdown.current_age, 4);
    }

    #[tokio::test]
    async fn test_load_or_create_persists_once() {
        let env = TestEnvironment::new().unwrap();
        let service = CountdownService::new(Arc::new(env.connection.clone()), birth_date());

        let first = service.load_or_create(at("2024-03-01T00:00:00Z")).await.unwrap();
        assert_eq!(first.current_age, 1);
        assert!(first.id.starts_with("countdown::"));

        // A later load returns the stored record unchanged, stale fields included
        let second = service.load_or_create(at("2025-01-10T00:00:00Z")).await.unwrap();
        assert_eq!(second, first);

        let repo = CountdownRepository::new(env.connection.clone());
        assert_eq!(repo.list_countdowns().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_existing_record_is_never_updated() {
        let env = TestEnvironment::new().unwrap();
        let repo = CountdownRepository::new(env.connection.clone());
        let stored = test_countdown("countdown::seeded");
        repo.create_countdown(&stored).await.unwrap();

        let service = CountdownService::new(Arc::new(env.connection.clone()), birth_date());
        let loaded = service.load_or_create(at("2030-01-01T00:00:00Z")).await.unwrap();
        assert_eq!(loaded, stored);
    }
}
