//! Summary orchestration over the selected-source set.
//!
//! Keeps one [`StructuredSummary`] (or none) in sync with the sources
//! currently selected for context. Triggering is split from completion so
//! the backend call runs outside any borrow of the orchestrator: `observe`
//! decides whether a new request is due and hands out a generation ticket,
//! `complete` applies a finished request only if its ticket is still the
//! newest one. Under any interleaving of overlapping requests, only the
//! latest generation's result can land.

use tracing::{debug, warn};

use fablab_core::{LanguageTag, Result, StructuredSummary};

/// Where the orchestrator currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SummaryPhase {
    /// No summary and no request in flight.
    #[default]
    Idle,
    /// A summarization request is in flight.
    Loading,
    /// A summary for the current selection is present.
    Ready,
}

/// Proof of a triggered request, tied to one generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryTicket {
    generation: u64,
}

impl SummaryTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Outcome of observing the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    /// Selection unchanged; nothing to do.
    Unchanged,
    /// Selection emptied; the summary was discarded.
    Cleared,
    /// A new summarization request is due; carry this ticket through it.
    Trigger(SummaryTicket),
}

/// Single-summary state machine driven by selection changes.
#[derive(Debug, Default)]
pub struct SummaryOrchestrator {
    phase: SummaryPhase,
    summary: Option<StructuredSummary>,
    generation: u64,
    observed: Option<(usize, LanguageTag)>,
}

impl SummaryOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SummaryPhase {
        self.phase
    }

    pub fn summary(&self) -> Option<&StructuredSummary> {
        self.summary.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Observe the current selected count and display language.
    ///
    /// A request is due when either changed since the last observation and
    /// the count is positive. A zero count clears the summary immediately,
    /// regardless of requests in flight: the generation bump makes any
    /// outstanding ticket stale.
    pub fn observe(&mut self, selected_count: usize, language: &LanguageTag) -> Observation {
        let changed = match &self.observed {
            Some((count, lang)) => *count != selected_count || lang != language,
            None => selected_count > 0,
        };
        self.observed = Some((selected_count, language.clone()));

        if selected_count == 0 {
            if !changed && self.summary.is_none() && self.phase == SummaryPhase::Idle {
                return Observation::Unchanged;
            }
            self.generation += 1;
            self.summary = None;
            self.phase = SummaryPhase::Idle;
            debug!(
                subsystem = "session",
                component = "summary",
                generation = self.generation,
                "Selection emptied; summary cleared"
            );
            return Observation::Cleared;
        }

        if !changed {
            return Observation::Unchanged;
        }

        self.generation += 1;
        self.phase = SummaryPhase::Loading;
        debug!(
            subsystem = "session",
            component = "summary",
            generation = self.generation,
            selected_count,
            language = %language,
            "Summarization triggered"
        );
        Observation::Trigger(SummaryTicket {
            generation: self.generation,
        })
    }

    /// Apply a finished request. Returns whether the result was applied.
    ///
    /// A ticket from an older generation is discarded unconditionally; a
    /// newer selection has already produced (or started producing) its own
    /// result. A current-generation failure clears the summary rather than
    /// leaving it partially populated; there is no automatic retry, the
    /// next selection change re-triggers naturally.
    pub fn complete(
        &mut self,
        ticket: SummaryTicket,
        outcome: Result<StructuredSummary>,
    ) -> bool {
        if ticket.generation != self.generation {
            debug!(
                subsystem = "session",
                component = "summary",
                generation = ticket.generation,
                current = self.generation,
                "Discarding stale summary result"
            );
            return false;
        }

        match outcome {
            Ok(summary) => {
                self.summary = Some(summary);
                self.phase = SummaryPhase::Ready;
                true
            }
            Err(e) => {
                warn!(
                    subsystem = "session",
                    component = "summary",
                    generation = ticket.generation,
                    error = %e,
                    "Summarization failed; summary cleared"
                );
                self.summary = None;
                self.phase = SummaryPhase::Idle;
                false
            }
        }
    }

    /// Invalidate everything: bump the generation so in-flight results are
    /// never applied, and drop the summary. Used when the session closes or
    /// the view navigates away.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.summary = None;
        self.phase = SummaryPhase::Idle;
        self.observed = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fablab_core::{Error, SourceAnalysis, SourceKind};

    fn summary_of(count: usize) -> StructuredSummary {
        StructuredSummary {
            global_overview: format!("{count} sources"),
            sources_analysis: (0..count)
                .map(|i| SourceAnalysis {
                    title: format!("Source {i}"),
                    kind: SourceKind::Text,
                    summary: "...".to_string(),
                    key_topics: vec![],
                    suggested_questions: vec![],
                })
                .collect(),
        }
    }

    fn en() -> LanguageTag {
        LanguageTag::default()
    }

    #[test]
    fn test_initial_state_is_idle() {
        let orchestrator = SummaryOrchestrator::new();
        assert_eq!(orchestrator.phase(), SummaryPhase::Idle);
        assert!(orchestrator.summary().is_none());
    }

    #[test]
    fn test_first_observation_with_selection_triggers() {
        let mut orchestrator = SummaryOrchestrator::new();
        match orchestrator.observe(2, &en()) {
            Observation::Trigger(_) => {}
            other => panic!("Expected Trigger, got {other:?}"),
        }
        assert_eq!(orchestrator.phase(), SummaryPhase::Loading);
    }

    #[test]
    fn test_first_observation_with_empty_selection_is_unchanged() {
        let mut orchestrator = SummaryOrchestrator::new();
        assert_eq!(orchestrator.observe(0, &en()), Observation::Unchanged);
        assert_eq!(orchestrator.phase(), SummaryPhase::Idle);
    }

    #[test]
    fn test_same_count_does_not_retrigger() {
        let mut orchestrator = SummaryOrchestrator::new();
        let ticket = match orchestrator.observe(2, &en()) {
            Observation::Trigger(t) => t,
            other => panic!("Expected Trigger, got {other:?}"),
        };
        assert!(orchestrator.complete(ticket, Ok(summary_of(2))));
        assert_eq!(orchestrator.phase(), SummaryPhase::Ready);

        assert_eq!(orchestrator.observe(2, &en()), Observation::Unchanged);
        assert_eq!(orchestrator.phase(), SummaryPhase::Ready);
    }

    #[test]
    fn test_language_change_retriggers() {
        let mut orchestrator = SummaryOrchestrator::new();
        let ticket = match orchestrator.observe(2, &en()) {
            Observation::Trigger(t) => t,
            other => panic!("Expected Trigger, got {other:?}"),
        };
        orchestrator.complete(ticket, Ok(summary_of(2)));

        let french: LanguageTag = "fr".parse().unwrap();
        assert!(matches!(
            orchestrator.observe(2, &french),
            Observation::Trigger(_)
        ));
    }

    #[test]
    fn test_count_to_zero_clears_summary() {
        let mut orchestrator = SummaryOrchestrator::new();
        let ticket = match orchestrator.observe(1, &en()) {
            Observation::Trigger(t) => t,
            other => panic!("Expected Trigger, got {other:?}"),
        };
        orchestrator.complete(ticket, Ok(summary_of(1)));
        assert!(orchestrator.summary().is_some());

        assert_eq!(orchestrator.observe(0, &en()), Observation::Cleared);
        assert!(orchestrator.summary().is_none());
        assert_eq!(orchestrator.phase(), SummaryPhase::Idle);
    }

    #[test]
    fn test_count_to_zero_invalidates_in_flight_request() {
        let mut orchestrator = SummaryOrchestrator::new();
        let ticket = match orchestrator.observe(2, &en()) {
            Observation::Trigger(t) => t,
            other => panic!("Expected Trigger, got {other:?}"),
        };

        // Deselect everything while the request is still in flight.
        assert_eq!(orchestrator.observe(0, &en()), Observation::Cleared);

        // The old request resolves late; it must not resurrect a summary.
        assert!(!orchestrator.complete(ticket, Ok(summary_of(2))));
        assert!(orchestrator.summary().is_none());
        assert_eq!(orchestrator.phase(), SummaryPhase::Idle);
    }

    #[test]
    fn test_stale_result_never_overwrites_newer_selection() {
        let mut orchestrator = SummaryOrchestrator::new();

        // Two sources selected: request generation 1 goes out.
        let stale = match orchestrator.observe(2, &en()) {
            Observation::Trigger(t) => t,
            other => panic!("Expected Trigger, got {other:?}"),
        };

        // One source deselected before generation 1 resolves: generation 2
        // goes out.
        let current = match orchestrator.observe(1, &en()) {
            Observation::Trigger(t) => t,
            other => panic!("Expected Trigger, got {other:?}"),
        };

        // Completions arrive out of order: newest first, then the stale one.
        assert!(orchestrator.complete(current, Ok(summary_of(1))));
        assert!(!orchestrator.complete(stale, Ok(summary_of(2))));

        // The stored analysis length matches the latest selection, not the
        // stale in-flight result.
        assert_eq!(orchestrator.summary().unwrap().sources_analysis.len(), 1);
        assert_eq!(orchestrator.phase(), SummaryPhase::Ready);
    }

    #[test]
    fn test_stale_result_arriving_before_current_is_also_discarded() {
        let mut orchestrator = SummaryOrchestrator::new();
        let stale = match orchestrator.observe(2, &en()) {
            Observation::Trigger(t) => t,
            other => panic!("Expected Trigger, got {other:?}"),
        };
        let current = match orchestrator.observe(1, &en()) {
            Observation::Trigger(t) => t,
            other => panic!("Expected Trigger, got {other:?}"),
        };

        assert!(!orchestrator.complete(stale, Ok(summary_of(2))));
        assert_eq!(orchestrator.phase(), SummaryPhase::Loading);

        assert!(orchestrator.complete(current, Ok(summary_of(1))));
        assert_eq!(orchestrator.summary().unwrap().sources_analysis.len(), 1);
    }

    #[test]
    fn test_error_clears_summary_and_does_not_retry() {
        let mut orchestrator = SummaryOrchestrator::new();
        let first = match orchestrator.observe(1, &en()) {
            Observation::Trigger(t) => t,
            other => panic!("Expected Trigger, got {other:?}"),
        };
        orchestrator.complete(first, Ok(summary_of(1)));

        let second = match orchestrator.observe(2, &en()) {
            Observation::Trigger(t) => t,
            other => panic!("Expected Trigger, got {other:?}"),
        };
        assert!(!orchestrator.complete(
            second,
            Err(Error::Backend {
                status: 502,
                message: "proxy unavailable".to_string(),
            })
        ));

        // Cleared, not left showing the previous selection's summary.
        assert!(orchestrator.summary().is_none());
        assert_eq!(orchestrator.phase(), SummaryPhase::Idle);

        // Unchanged selection does not re-trigger; a change does.
        assert_eq!(orchestrator.observe(2, &en()), Observation::Unchanged);
        assert!(matches!(orchestrator.observe(3, &en()), Observation::Trigger(_)));
    }

    #[test]
    fn test_reset_invalidates_outstanding_tickets() {
        let mut orchestrator = SummaryOrchestrator::new();
        let ticket = match orchestrator.observe(1, &en()) {
            Observation::Trigger(t) => t,
            other => panic!("Expected Trigger, got {other:?}"),
        };

        orchestrator.reset();
        assert!(!orchestrator.complete(ticket, Ok(summary_of(1))));
        assert!(orchestrator.summary().is_none());
    }
}
