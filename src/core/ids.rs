//! Id allocation for todos and notes.

use chrono::{DateTime, Utc};

/// Allocate a new id from the creation time.
///
/// Ids are the millisecond Unix timestamp as a decimal string. When that
/// value is already taken, the next free integer above it is used.
#[must_use]
pub fn next_id<'a, I>(now: DateTime<Utc>, existing: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let taken: Vec<&str> = existing.into_iter().collect();
    let mut candidate = now.timestamp_millis();

    loop {
        let id = candidate.to_string();
        if !taken.contains(&id.as_str()) {
            return id;
        }
        candidate += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_next_id_uses_millis() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        assert_eq!(next_id(now, []), "1700000000123");
    }

    #[test]
    fn test_next_id_skips_taken() {
        let now = Utc.timestamp_millis_opt(1_000).unwrap();
        let existing = ["1000", "1001", "1003"];
        assert_eq!(next_id(now, existing), "1002");
    }
}
