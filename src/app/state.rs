use chrono::{DateTime, Local};

use crate::fetch::{FetchError, FetchKind, PriceSnapshot};

/// Busy/error indicator for the dashboard; at most one phase at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus {
    Idle,
    Loading,
    Refreshing,
    Error(String),
}

/// Screen-scoped dashboard state: the displayed snapshot, the time of the
/// last successful fetch, and the current fetch phase.
#[derive(Debug, Clone)]
pub struct DashboardState {
    snapshot: Option<PriceSnapshot>,
    last_updated: Option<DateTime<Local>>,
    status: FetchStatus,
}

impl DashboardState {
    pub fn new() -> Self {
        Self {
            snapshot: None,
            last_updated: None,
            status: FetchStatus::Idle,
        }
    }

    pub fn snapshot(&self) -> Option<&PriceSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn last_updated(&self) -> Option<DateTime<Local>> {
        self.last_updated
    }

    pub fn status(&self) -> &FetchStatus {
        &self.status
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            FetchStatus::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Mark a fetch as started. Timer-driven fetches take the full spinner,
    /// manual refreshes the lighter refresh indicator.
    pub fn begin(&mut self, kind: FetchKind) {
        self.status = match kind {
            FetchKind::Auto => FetchStatus::Loading,
            FetchKind::Manual => FetchStatus::Refreshing,
        };
    }

    /// Fold in a completed fetch.
    ///
    /// Failures keep the previous snapshot and its timestamp on screen
    /// (stale-while-error). Callers apply outcomes in arrival order; with
    /// overlapping fetches the last response to land wins.
    pub fn apply(
        &mut self,
        result: Result<PriceSnapshot, FetchError>,
        completed_at: DateTime<Local>,
    ) {
        match result {
            Ok(snapshot) => {
                self.snapshot = Some(snapshot);
                self.last_updated = Some(completed_at);
                self.status = FetchStatus::Idle;
            }
            Err(err) => {
                self.status = FetchStatus::Error(err.to_string());
            }
        }
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(gold_1g: &str) -> PriceSnapshot {
        PriceSnapshot {
            gold_price_1g: gold_1g.to_string(),
            gold_price_8g: "49600".to_string(),
            silver_price_1g: "75".to_string(),
        }
    }

    #[test]
    fn failure_keeps_stale_snapshot_and_timestamp() {
        let mut state = DashboardState::new();
        let succeeded_at = Local::now();

        state.begin(FetchKind::Auto);
        state.apply(Ok(snapshot("6200")), succeeded_at);
        state.begin(FetchKind::Auto);
        state.apply(Err(FetchError::Network), Local::now());

        assert_eq!(state.snapshot(), Some(&snapshot("6200")));
        assert_eq!(state.last_updated(), Some(succeeded_at));
        assert!(state.error().is_some());
    }

    #[test]
    fn begin_routes_kinds_to_distinct_phases() {
        let mut state = DashboardState::new();

        state.begin(FetchKind::Auto);
        assert_eq!(*state.status(), FetchStatus::Loading);

        state.begin(FetchKind::Manual);
        assert_eq!(*state.status(), FetchStatus::Refreshing);
    }

    #[test]
    fn last_applied_outcome_wins() {
        let mut state = DashboardState::new();

        state.apply(Ok(snapshot("6200")), Local::now());
        state.apply(Ok(snapshot("6250")), Local::now());

        assert_eq!(state.snapshot(), Some(&snapshot("6250")));
        assert_eq!(*state.status(), FetchStatus::Idle);
    }

    #[test]
    fn success_clears_a_previous_error_banner() {
        let mut state = DashboardState::new();

        state.apply(Err(FetchError::Timeout), Local::now());
        assert!(state.error().is_some());

        state.apply(Ok(snapshot("6200")), Local::now());
        assert!(state.error().is_none());
        assert!(state.last_updated().is_some());
    }

    #[test]
    fn error_before_any_success_leaves_no_timestamp() {
        let mut state = DashboardState::new();

        state.begin(FetchKind::Auto);
        state.apply(Err(FetchError::Http(502)), Local::now());

        assert!(state.snapshot().is_none());
        assert!(state.last_updated().is_none());
    }
}
