//! Operation counters.
//!
//! Thread-local accounting of adapter operations for endpoint/test
//! plumbing. Counters are per-thread by design: the core is synchronous
//! tree recursion, so a caller observes its own work without any shared
//! mutable state.

use std::cell::RefCell;

thread_local! {
    static STATE: RefCell<CoreCounters> = RefCell::new(CoreCounters::default());
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug)]
pub enum MetricsEvent {
    /// One `build_mapping` call on a composite adapter.
    MappingBuilt,
    /// One `build_query` call on a composite adapter.
    QueryBuilt,
    /// One `extract_index_data` call on a composite adapter.
    ExtractRun { items: u64 },
}

///
/// CoreCounters
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CoreCounters {
    pub mappings_built: u64,
    pub queries_built: u64,
    pub extract_runs: u64,
    pub extract_items: u64,
}

pub(crate) fn record(event: MetricsEvent) {
    STATE.with_borrow_mut(|counters| match event {
        MetricsEvent::MappingBuilt => {
            counters.mappings_built = counters.mappings_built.saturating_add(1);
        }
        MetricsEvent::QueryBuilt => {
            counters.queries_built = counters.queries_built.saturating_add(1);
        }
        MetricsEvent::ExtractRun { items } => {
            counters.extract_runs = counters.extract_runs.saturating_add(1);
            counters.extract_items = counters.extract_items.saturating_add(items);
        }
    });
}

/// Snapshot the current thread's counters.
#[must_use]
pub fn report() -> CoreCounters {
    STATE.with_borrow(|counters| *counters)
}

/// Reset the current thread's counters.
pub fn reset() {
    STATE.with_borrow_mut(|counters| *counters = CoreCounters::default());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_accumulate_and_reset() {
        reset();
        record(MetricsEvent::MappingBuilt);
        record(MetricsEvent::ExtractRun { items: 3 });
        record(MetricsEvent::ExtractRun { items: 2 });

        let counters = report();
        assert_eq!(counters.mappings_built, 1);
        assert_eq!(counters.extract_runs, 2);
        assert_eq!(counters.extract_items, 5);

        reset();
        assert_eq!(report(), CoreCounters::default());
    }
}
