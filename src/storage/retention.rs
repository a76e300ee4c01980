//! Trash retention policy
//!
//! Shared by the category and entry stores. A trashed record expires once
//! the time since it was trashed reaches the retention period: exactly
//! `retention_days` elapsed is already expired. Active records never expire.

use chrono::{DateTime, Duration, Utc};

use crate::models::SoftDelete;

/// Retention period as a duration
pub fn retention_window(retention_days: u32) -> Duration {
    Duration::days(i64::from(retention_days))
}

/// Check whether a record trashed at `deleted_at` has expired at `now`
pub fn is_expired(deleted_at: DateTime<Utc>, now: DateTime<Utc>, retention_days: u32) -> bool {
    now.signed_duration_since(deleted_at) >= retention_window(retention_days)
}

/// Split records into those to keep and those whose retention has expired
pub fn partition_expired<T>(items: &[T], retention_days: u32, now: DateTime<Utc>) -> (Vec<T>, Vec<T>)
where
    T: SoftDelete + Clone,
{
    items.iter().cloned().partition(|item| match item.deleted_at() {
        Some(deleted_at) => !is_expired(deleted_at, now, retention_days),
        None => true,
    })
}

/// Split records into active ones and trashed ones, ignoring age
pub fn partition_trashed<T>(items: &[T]) -> (Vec<T>, Vec<T>)
where
    T: SoftDelete + Clone,
{
    items.iter().cloned().partition(|item| item.is_active())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Record {
        name: &'static str,
        deleted_at: Option<DateTime<Utc>>,
    }

    impl SoftDelete for Record {
        fn deleted_at(&self) -> Option<DateTime<Utc>> {
            self.deleted_at
        }
    }

    fn trashed(name: &'static str, days_ago: i64, now: DateTime<Utc>) -> Record {
        Record {
            name,
            deleted_at: Some(now - Duration::days(days_ago)),
        }
    }

    #[test]
    fn test_boundary_is_inclusive() {
        let now = Utc::now();
        assert!(!is_expired(now - Duration::days(29), now, 30));
        assert!(is_expired(now - Duration::days(30), now, 30));
        assert!(is_expired(now - Duration::days(31), now, 30));
        assert!(!is_expired(
            now - Duration::days(30) + Duration::seconds(1),
            now,
            30
        ));
    }

    #[test]
    fn test_future_deletion_is_kept() {
        let now = Utc::now();
        assert!(!is_expired(now + Duration::days(2), now, 1));
    }

    #[test]
    fn test_partition_expired() {
        let now = Utc::now();
        let items = vec![
            Record {
                name: "active",
                deleted_at: None,
            },
            trashed("fresh", 29, now),
            trashed("stale", 31, now),
        ];

        let (kept, expired) = partition_expired(&items, 30, now);

        assert_eq!(kept.iter().map(|r| r.name).collect::<Vec<_>>(), ["active", "fresh"]);
        assert_eq!(expired.iter().map(|r| r.name).collect::<Vec<_>>(), ["stale"]);
    }

    #[test]
    fn test_active_records_never_expire() {
        let now = Utc::now();
        let items = vec![Record {
            name: "active",
            deleted_at: None,
        }];
        let (kept, expired) = partition_expired(&items, 1, now + Duration::days(10_000));
        assert_eq!(kept.len(), 1);
        assert!(expired.is_empty());
    }

    #[test]
    fn test_partition_trashed() {
        let now = Utc::now();
        let items = vec![
            Record {
                name: "active",
                deleted_at: None,
            },
            trashed("today", 0, now),
        ];
        let (active, trash) = partition_trashed(&items);
        assert_eq!(active[0].name, "active");
        assert_eq!(trash[0].name, "today");
    }
}
