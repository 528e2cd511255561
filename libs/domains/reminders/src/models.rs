use chrono::{DateTime, Utc};
use domain_tasks::deadline::parse_due_date;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// A point in time at which a task should be brought to someone's attention
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Reminder {
    pub id: i32,
    pub task_id: i32,
    pub remind_at: DateTime<Utc>,
    pub is_notified: bool,
}

impl Reminder {
    /// Due and not yet delivered
    pub fn is_pending_at(&self, now: DateTime<Utc>) -> bool {
        !self.is_notified && self.remind_at <= now
    }

    pub fn apply_update(&mut self, update: UpdateReminder) {
        if let Some(remind_at) = update.remind_at {
            self.remind_at = remind_at;
        }
        if let Some(is_notified) = update.is_notified {
            self.is_notified = is_notified;
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateReminder {
    pub task_id: i32,
    /// ISO-8601; no offset means UTC
    #[serde(deserialize_with = "timestamp")]
    pub remind_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateReminder {
    #[serde(default, deserialize_with = "optional_timestamp")]
    pub remind_at: Option<DateTime<Utc>>,
    pub is_notified: Option<bool>,
}

fn timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_due_date(&raw).map_err(serde::de::Error::custom)
}

fn optional_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|raw| parse_due_date(&raw).map_err(serde::de::Error::custom))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_create_accepts_naive_timestamp() {
        let input: CreateReminder =
            serde_json::from_str(r#"{"task_id": 1, "remind_at": "2030-05-01T09:00:00"}"#)
                .unwrap();
        assert_eq!(
            input.remind_at,
            Utc.with_ymd_and_hms(2030, 5, 1, 9, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_create_requires_remind_at() {
        assert!(serde_json::from_str::<CreateReminder>(r#"{"task_id": 1}"#).is_err());
        assert!(
            serde_json::from_str::<CreateReminder>(r#"{"task_id": 1, "remind_at": "soon"}"#)
                .is_err()
        );
    }

    #[test]
    fn test_is_pending_at() {
        let now = Utc::now();
        let mut reminder = Reminder {
            id: 1,
            task_id: 1,
            remind_at: now - Duration::minutes(5),
            is_notified: false,
        };
        assert!(reminder.is_pending_at(now));
        assert!(!reminder.is_pending_at(now - Duration::minutes(10)));

        reminder.is_notified = true;
        assert!(!reminder.is_pending_at(now));
    }

    #[test]
    fn test_update_is_partial() {
        let update: UpdateReminder = serde_json::from_str(r#"{"is_notified": true}"#).unwrap();
        assert!(update.remind_at.is_none());

        let original = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        let mut reminder = Reminder {
            id: 1,
            task_id: 1,
            remind_at: original,
            is_notified: false,
        };
        reminder.apply_update(update);
        assert!(reminder.is_notified);
        assert_eq!(reminder.remind_at, original);
    }
}
