//! User search controller
//!
//! Every change to a non-empty query clears the results, raises the loading
//! state and produces a ticket for one directory request. Responses are
//! applied only if their ticket is still the latest; an earlier, slower
//! response can no longer overwrite newer results.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::result::Result;
use crate::domain::{Candidate, LogEvent, Route};
use crate::ports::{DiagnosticSink, PaymentsApi};

/// Search results area state
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "results", rename_all = "lowercase")]
pub enum SearchState {
    /// Empty query, nothing shown
    Idle,
    Loading,
    Loaded(Vec<Candidate>),
    /// Request failed; the list stays empty
    Failed,
}

/// One directory request to issue, tagged with the query generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    generation: u64,
    query: String,
}

impl SearchTicket {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// A finished directory request, ready to hand back to the controller
#[derive(Debug)]
pub struct SearchResponse {
    pub ticket: SearchTicket,
    pub outcome: Result<Vec<Candidate>>,
}

/// Issue the directory request for a ticket
///
/// Holds no borrow on the controller, so several can be in flight at once.
pub async fn run_search(api: &dyn PaymentsApi, ticket: SearchTicket) -> SearchResponse {
    let outcome = api.search_users(ticket.query()).await;
    SearchResponse { ticket, outcome }
}

pub struct SearchController {
    query: String,
    state: SearchState,
    generation: u64,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl SearchController {
    pub fn new(diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            query: String::new(),
            state: SearchState::Idle,
            generation: 0,
            diagnostics,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, SearchState::Loading)
    }

    /// Current candidates; empty unless a response has been applied
    pub fn results(&self) -> &[Candidate] {
        match &self.state {
            SearchState::Loaded(candidates) => candidates.as_slice(),
            _ => &[],
        }
    }

    /// Update the query text
    ///
    /// Returns the request to issue, or `None` when the text is unchanged
    /// or empty. Any change supersedes requests already in flight.
    pub fn set_query(&mut self, text: impl Into<String>) -> Option<SearchTicket> {
        let text = text.into();
        if text == self.query && self.state != SearchState::Idle {
            return None;
        }

        self.query = text;
        self.generation += 1;

        if self.query.is_empty() {
            self.state = SearchState::Idle;
            return None;
        }

        self.state = SearchState::Loading;
        Some(SearchTicket {
            generation: self.generation,
            query: self.query.clone(),
        })
    }

    /// Apply a finished request; returns false if it was superseded
    pub fn complete(&mut self, response: SearchResponse) -> bool {
        if response.ticket.generation != self.generation {
            return false;
        }

        match response.outcome {
            Ok(candidates) => self.state = SearchState::Loaded(candidates),
            Err(e) => {
                self.diagnostics.record(
                    LogEvent::new("search_failed")
                        .with_page(Route::Dashboard.page_name())
                        .with_error(e.to_string()),
                );
                self.state = SearchState::Failed;
            }
        }
        true
    }

    /// Candidate with the given id from the current results
    pub fn select(&self, id: &str) -> Option<Candidate> {
        self.results().iter().find(|c| c.id == id).cloned()
    }

    /// Back to the empty search view; in-flight requests are discarded
    pub fn clear(&mut self) {
        self.query.clear();
        self.generation += 1;
        self.state = SearchState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::diagnostics::MemorySink;
    use crate::domain::result::Error;

    fn grace() -> Candidate {
        Candidate::new("u2", "Grace", "Hopper", "grace@example.com")
    }

    fn ok(ticket: SearchTicket, candidates: Vec<Candidate>) -> SearchResponse {
        SearchResponse {
            ticket,
            outcome: Ok(candidates),
        }
    }

    #[test]
    fn test_empty_query_issues_nothing() {
        let mut search = SearchController::new(Arc::new(MemorySink::new()));
        assert!(search.set_query("").is_none());
        assert_eq!(search.state(), &SearchState::Idle);
    }

    #[test]
    fn test_query_clears_results_and_loads() {
        let mut search = SearchController::new(Arc::new(MemorySink::new()));
        let ticket = search.set_query("gr").unwrap();
        assert!(search.complete(ok(ticket, vec![grace()])));
        assert_eq!(search.results().len(), 1);

        let ticket = search.set_query("gra").unwrap();
        assert_eq!(ticket.query(), "gra");
        assert!(search.is_loading());
        assert!(search.results().is_empty());
    }

    #[test]
    fn test_clearing_query_empties_results_without_request() {
        let mut search = SearchController::new(Arc::new(MemorySink::new()));
        let ticket = search.set_query("gra").unwrap();
        search.complete(ok(ticket, vec![grace()]));

        assert!(search.set_query("").is_none());
        assert!(search.results().is_empty());
        assert_eq!(search.state(), &SearchState::Idle);
    }

    #[test]
    fn test_unchanged_query_does_not_refetch() {
        let mut search = SearchController::new(Arc::new(MemorySink::new()));
        let ticket = search.set_query("gra").unwrap();
        search.complete(ok(ticket, vec![grace()]));

        assert!(search.set_query("gra").is_none());
        assert_eq!(search.results().len(), 1);
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut search = SearchController::new(Arc::new(MemorySink::new()));
        let first = search.set_query("g").unwrap();
        let second = search.set_query("gr").unwrap();

        // Newer response lands first, then the slow older one
        assert!(search.complete(ok(second, vec![grace()])));
        assert!(!search.complete(ok(
            first,
            vec![grace(), Candidate::new("u9", "Gus", "G", "gus@example.com")]
        )));

        assert_eq!(search.results(), &[grace()]);
    }

    #[test]
    fn test_response_after_clear_is_discarded() {
        let mut search = SearchController::new(Arc::new(MemorySink::new()));
        let ticket = search.set_query("gra").unwrap();
        search.clear();

        assert!(!search.complete(ok(ticket, vec![grace()])));
        assert_eq!(search.state(), &SearchState::Idle);
        assert_eq!(search.query(), "");
    }

    #[test]
    fn test_failure_leaves_list_empty_and_is_recorded() {
        let sink = Arc::new(MemorySink::new());
        let mut search = SearchController::new(sink.clone());
        let ticket = search.set_query("gra").unwrap();

        search.complete(SearchResponse {
            ticket,
            outcome: Err(Error::Status(500)),
        });

        assert_eq!(search.state(), &SearchState::Failed);
        assert!(search.results().is_empty());
        assert!(!search.is_loading());
        assert_eq!(sink.event_names(), vec!["search_failed"]);
    }

    #[test]
    fn test_select_by_id() {
        let mut search = SearchController::new(Arc::new(MemorySink::new()));
        let ticket = search.set_query("gra").unwrap();
        search.complete(ok(ticket, vec![grace()]));

        assert_eq!(search.select("u2"), Some(grace()));
        assert_eq!(search.select("u1"), None);
    }
}
