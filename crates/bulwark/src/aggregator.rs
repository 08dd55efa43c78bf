//! Posture aggregation state machine.
//!
//! The aggregator owns the [`PostureState`]. Subsystem statuses are set by
//! producers (via [`PostureAggregator::apply_report`]) or by direct updates
//! (via [`PostureAggregator::resolve_subsystem`]); every status change
//! recomputes the overall score when all three subsystems are resolved.
//!
//! ```text
//! begin_scan()        every subsystem -> scanning, generation += 1
//!   apply_report() x3 subsystem -> terminal status, recompute
//! end_scan()          is_scanning = false, last_scan_at = now
//! ```
//!
//! `end_scan` is driven by a timer, not by the reports.

use chrono::{DateTime, Utc};
use tracing::debug;

use bulwark_core::{PostureState, ScanTicket, Status, Subsystem, SubsystemReport};

use crate::classify::status_to_score;
use crate::config::StaleReportPolicy;

/// Holds the posture state and the current scan generation.
#[derive(Debug, Clone, Default)]
pub struct PostureAggregator {
    state: PostureState,
    generation: u64,
    policy: StaleReportPolicy,
}

impl PostureAggregator {
    /// New aggregator: every subsystem `Scanning`, overall score 0,
    /// stale reports discarded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// New aggregator with an explicit stale-report policy
    #[must_use]
    pub fn with_policy(policy: StaleReportPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> &PostureState {
        &self.state
    }

    /// Overall score; stale while [`Self::is_scanning`] is true
    #[must_use]
    pub const fn overall_score(&self) -> u8 {
        self.state.overall_score
    }

    /// True between `begin_scan` and `end_scan`
    #[must_use]
    pub const fn is_scanning(&self) -> bool {
        self.state.is_scanning
    }

    /// When the last cycle ended
    #[must_use]
    pub const fn last_scan_at(&self) -> Option<DateTime<Utc>> {
        self.state.last_scan_at
    }

    /// Status of one subsystem
    #[must_use]
    pub const fn status(&self, subsystem: Subsystem) -> Status {
        self.state.status_of(subsystem)
    }

    /// Ticket of the current cycle (generation 0 before the first scan)
    #[must_use]
    pub const fn current_ticket(&self) -> ScanTicket {
        ScanTicket {
            generation: self.generation,
        }
    }

    /// Set one subsystem's status and recompute the overall score.
    pub fn resolve_subsystem(&mut self, which: Subsystem, status: Status) {
        *self.state.status_slot(which) = status;
        debug!(subsystem = %which, status = %status, "subsystem resolved");
        self.recompute_overall();
    }

    /// Apply a producer's report.
    ///
    /// Returns false when the report belongs to a superseded cycle and the
    /// policy is [`StaleReportPolicy::Discard`].
    pub fn apply_report(&mut self, report: SubsystemReport) -> bool {
        if !self.accepts(report.generation) {
            debug!(
                subsystem = %report.subsystem,
                generation = report.generation,
                current = self.generation,
                "discarding stale report"
            );
            return false;
        }
        self.resolve_subsystem(report.subsystem, report.status);
        true
    }

    /// Whether a report from `generation` would be applied
    #[must_use]
    pub fn accepts(&self, generation: u64) -> bool {
        generation == self.generation || self.policy == StaleReportPolicy::Apply
    }

    /// Recompute the overall score from the subsystem statuses.
    ///
    /// Only updates the score when no subsystem is `Scanning`; otherwise the
    /// previous score is left in place. Returns the updated score, if any.
    pub fn recompute_overall(&mut self) -> Option<u8> {
        let points = self
            .state
            .statuses()
            .map(status_to_score)
            .into_iter()
            .collect::<Option<Vec<u8>>>()?;

        let total: u32 = points.iter().map(|p| u32::from(*p)).sum();
        #[allow(clippy::cast_possible_truncation)]
        let count = points.len() as u32;
        // Rounded mean, halves rounding up
        let mean = (2 * total + count) / (2 * count);
        #[allow(clippy::cast_possible_truncation)]
        let score = mean.min(100) as u8;

        self.state.overall_score = score;
        Some(score)
    }

    /// Start a new cycle: every subsystem back to `Scanning`.
    ///
    /// The overall score keeps its previous value until all three subsystems
    /// resolve again.
    pub fn begin_scan(&mut self) -> ScanTicket {
        self.generation += 1;
        self.state.is_scanning = true;
        for subsystem in Subsystem::ALL {
            *self.state.status_slot(subsystem) = Status::Scanning;
        }
        self.current_ticket()
    }

    /// Put a single subsystem back to `Scanning` within the current cycle.
    pub fn begin_rescan(&mut self, which: Subsystem) -> ScanTicket {
        *self.state.status_slot(which) = Status::Scanning;
        self.current_ticket()
    }

    /// Close the cycle now.
    pub fn end_scan(&mut self) {
        self.end_scan_at(Utc::now());
    }

    /// Close the cycle with an explicit timestamp.
    pub fn end_scan_at(&mut self, at: DateTime<Utc>) {
        self.state.is_scanning = false;
        self.state.last_scan_at = Some(at);
    }

    /// Close the cycle identified by `ticket`, if the stale-report policy
    /// allows it. Returns whether the cycle was closed.
    pub fn finish_cycle(&mut self, ticket: ScanTicket) -> bool {
        if !self.accepts(ticket.generation) {
            debug!(
                generation = ticket.generation,
                current = self.generation,
                "ignoring timer of superseded cycle"
            );
            return false;
        }
        self.end_scan();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn resolved(network: Status, credential: Status, system: Status) -> PostureAggregator {
        let mut agg = PostureAggregator::new();
        agg.resolve_subsystem(Subsystem::Network, network);
        agg.resolve_subsystem(Subsystem::Credential, credential);
        agg.resolve_subsystem(Subsystem::System, system);
        agg
    }

    fn report(generation: u64, subsystem: Subsystem, status: Status) -> SubsystemReport {
        SubsystemReport {
            generation,
            subsystem,
            status,
        }
    }

    #[test]
    fn overall_is_rounded_mean() {
        let agg = resolved(Status::Secure, Status::Warning, Status::Critical);
        assert_eq!(agg.overall_score(), 50);

        let agg = resolved(Status::Secure, Status::Secure, Status::Warning);
        // 250 / 3 = 83.33
        assert_eq!(agg.overall_score(), 83);

        let agg = resolved(Status::Secure, Status::Warning, Status::Warning);
        // 200 / 3 = 66.67
        assert_eq!(agg.overall_score(), 67);
    }

    #[test]
    fn score_waits_for_every_subsystem() {
        let mut agg = resolved(Status::Secure, Status::Secure, Status::Secure);
        assert_eq!(agg.overall_score(), 100);

        agg.begin_scan();
        agg.resolve_subsystem(Subsystem::Network, Status::Critical);
        agg.resolve_subsystem(Subsystem::Credential, Status::Critical);
        assert_eq!(agg.overall_score(), 100, "stale until system resolves");
        assert!(agg.is_scanning());

        agg.resolve_subsystem(Subsystem::System, Status::Critical);
        assert_eq!(agg.overall_score(), 0);
    }

    #[test]
    fn recompute_is_idempotent() {
        let mut agg = resolved(Status::Warning, Status::Critical, Status::Secure);
        let first = agg.recompute_overall();
        let second = agg.recompute_overall();
        assert_eq!(first, Some(50));
        assert_eq!(first, second);
        assert_eq!(agg.overall_score(), 50);
    }

    #[test]
    fn recompute_leaves_score_alone_mid_scan() {
        let mut agg = PostureAggregator::new();
        assert_eq!(agg.recompute_overall(), None);
        assert_eq!(agg.overall_score(), 0);
    }

    #[test]
    fn begin_scan_resets_statuses_and_bumps_generation() {
        let mut agg = resolved(Status::Secure, Status::Warning, Status::Critical);
        let first = agg.begin_scan();
        let second = agg.begin_scan();

        assert_eq!(first.generation, 1);
        assert_eq!(second.generation, 2);
        assert!(agg.state().statuses().iter().all(|s| *s == Status::Scanning));
        assert!(agg.is_scanning());
        assert_eq!(agg.overall_score(), 50);
    }

    #[test]
    fn end_scan_records_time() {
        let mut agg = PostureAggregator::new();
        agg.begin_scan();
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        agg.end_scan_at(at);

        assert!(!agg.is_scanning());
        assert_eq!(agg.last_scan_at(), Some(at));
    }

    #[test]
    fn stale_reports_are_discarded_by_default() {
        let mut agg = PostureAggregator::new();
        let old = agg.begin_scan();
        let new = agg.begin_scan();

        assert!(!agg.apply_report(report(old.generation, Subsystem::Network, Status::Critical)));
        assert_eq!(agg.status(Subsystem::Network), Status::Scanning);

        assert!(agg.apply_report(report(new.generation, Subsystem::Network, Status::Secure)));
        assert_eq!(agg.status(Subsystem::Network), Status::Secure);

        assert!(!agg.finish_cycle(old));
        assert!(agg.is_scanning());
        assert!(agg.finish_cycle(new));
        assert!(!agg.is_scanning());
    }

    #[test]
    fn apply_policy_lets_late_reports_overwrite() {
        let mut agg = PostureAggregator::with_policy(StaleReportPolicy::Apply);
        let old = agg.begin_scan();
        agg.begin_scan();

        assert!(agg.apply_report(report(old.generation, Subsystem::System, Status::Warning)));
        assert_eq!(agg.status(Subsystem::System), Status::Warning);
        assert!(agg.finish_cycle(old));
        assert!(!agg.is_scanning());
    }

    #[test]
    fn rescan_keeps_generation() {
        let mut agg = resolved(Status::Secure, Status::Secure, Status::Secure);
        let ticket = agg.begin_scan();
        let rescan = agg.begin_rescan(Subsystem::Network);

        assert_eq!(ticket, rescan);
        assert_eq!(agg.status(Subsystem::Network), Status::Scanning);
    }
}
