use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use chrono::{DateTime, Utc};

/// Last-seen time per source address, for the live visitor counter.
///
/// Entries older than the window are dropped on every access, so the map
/// never grows beyond the set of sources seen within one window.
pub struct ActiveVisitors {
    window: chrono::Duration,
    last_seen: Mutex<HashMap<String, DateTime<Utc>>>,
}

impl ActiveVisitors {
    pub fn new(window: Duration) -> Self {
        Self {
            window: chrono::Duration::from_std(window).unwrap_or(chrono::Duration::MAX),
            last_seen: Mutex::new(HashMap::new()),
        }
    }

    /// Mark `source` as seen at `now`
    pub fn touch(&self, source: &str, now: DateTime<Utc>) {
        let mut map = self.last_seen.lock().unwrap_or_else(|e| e.into_inner());
        Self::prune(&mut map, now, self.window);
        map.insert(source.to_string(), now);
    }

    /// Number of sources seen within the window ending at `now`
    pub fn active_count(&self, now: DateTime<Utc>) -> usize {
        let mut map = self.last_seen.lock().unwrap_or_else(|e| e.into_inner());
        Self::prune(&mut map, now, self.window);
        map.len()
    }

    fn prune(map: &mut HashMap<String, DateTime<Utc>>, now: DateTime<Utc>, window: chrono::Duration) {
        map.retain(|_, seen| now.signed_duration_since(*seen) <= window);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> ActiveVisitors {
        ActiveVisitors::new(Duration::from_secs(30))
    }

    #[test]
    fn test_same_source_counts_once() {
        let active = tracker();
        let now = Utc::now();
        active.touch("10.0.0.1", now);
        active.touch("10.0.0.1", now + chrono::Duration::seconds(1));
        active.touch("10.0.0.2", now);

        assert_eq!(active.active_count(now + chrono::Duration::seconds(1)), 2);
    }

    #[test]
    fn test_idle_sources_expire() {
        let active = tracker();
        let now = Utc::now();
        active.touch("10.0.0.1", now);
        active.touch("10.0.0.2", now + chrono::Duration::seconds(20));

        assert_eq!(active.active_count(now + chrono::Duration::seconds(30)), 2);
        assert_eq!(active.active_count(now + chrono::Duration::seconds(31)), 1);
        assert_eq!(active.active_count(now + chrono::Duration::seconds(51)), 0);
    }

    #[test]
    fn test_touch_refreshes_last_seen() {
        let active = tracker();
        let now = Utc::now();
        active.touch("10.0.0.1", now);
        active.touch("10.0.0.1", now + chrono::Duration::seconds(25));

        assert_eq!(active.active_count(now + chrono::Duration::seconds(45)), 1);
    }
}
