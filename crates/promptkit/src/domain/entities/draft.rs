//! Draft - In-progress form values saved for later

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::FormValues;

/// Draft - Form values not yet submitted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Draft {
    pub template_id: String,
    pub values: FormValues,
    pub saved_at: DateTime<Utc>,
}

impl Draft {
    /// Create a draft stamped at `saved_at`
    pub fn new(template_id: impl Into<String>, values: FormValues, saved_at: DateTime<Utc>) -> Self {
        Self {
            template_id: template_id.into(),
            values,
            saved_at,
        }
    }

    /// Whether the draft is younger than `freshness` at `now`
    pub fn is_fresh(&self, now: DateTime<Utc>, freshness: Duration) -> bool {
        now - self.saved_at < freshness
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_freshness_boundary() {
        let saved_at = Utc::now();
        let draft = Draft::new("essay", FormValues::new(), saved_at);
        let window = Duration::hours(24);

        assert!(draft.is_fresh(saved_at + Duration::hours(23), window));
        assert!(!draft.is_fresh(saved_at + Duration::hours(24), window));
    }
}
