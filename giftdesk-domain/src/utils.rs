use chrono::{DateTime, Duration, Utc};

/// Absolute distance between two instants.
pub fn abs_gap(a: DateTime<Utc>, b: DateTime<Utc>) -> Duration {
    let gap = a.signed_duration_since(b);
    if gap < Duration::zero() {
        -gap
    } else {
        gap
    }
}

pub fn normalize_optional_text(value: Option<String>) -> Option<String> {
    value.and_then(|raw| {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abs_gap_is_symmetric() {
        let now = Utc::now();
        let later = now + Duration::seconds(42);
        assert_eq!(abs_gap(now, later), Duration::seconds(42));
        assert_eq!(abs_gap(later, now), Duration::seconds(42));
    }

    #[test]
    fn blank_text_normalizes_to_none() {
        assert_eq!(normalize_optional_text(Some("  ".to_string())), None);
        assert_eq!(
            normalize_optional_text(Some(" wrong item ".to_string())),
            Some("wrong item".to_string())
        );
    }
}
