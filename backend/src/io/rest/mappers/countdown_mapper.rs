//! backend/src/io/rest/mappers/countdown_mapper.rs

use chrono::SecondsFormat;

use crate::domain::models::countdown::DomainCountdown;
use shared::{BirthdayCountdown, CountdownResponse};

pub struct CountdownMapper;

impl CountdownMapper {
    /// `next_birthday` goes out as RFC 3339 UTC with millisecond precision
    pub fn to_dto(domain: DomainCountdown) -> BirthdayCountdown {
        BirthdayCountdown {
            id: domain.id,
            current_age: domain.current_age,
            next_birthday: domain.next_birthday.to_rfc3339_opts(SecondsFormat::Millis, true),
            days_until_birthday: domain.days_until_birthday,
            birth_date: domain.birth_date.format("%Y-%m-%d").to_string(),
        }
    }

    pub fn to_countdown_response(domain: DomainCountdown) -> CountdownResponse {
        CountdownResponse {
            countdown: Self::to_dto(domain),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::csv::test_utils::test_countdown;

    #[test]
    fn test_wire_format() {
        let dto = CountdownMapper::to_dto(test_countdown("countdown::1"));
        assert_eq!(dto.next_birthday, "2025-02-20T00:00:00.000Z");
        assert_eq!(dto.birth_date, "2024-02-20");

        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["daysUntilBirthday"], 90);
        assert_eq!(json["currentAge"], 1);
    }
}
