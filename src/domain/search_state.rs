//! Search-as-you-type state shared by the global and per-conversation search.
//!
//! Every change of term bumps a generation counter. Requests carry the
//! generation they were issued under as a [`SearchTicket`], and only the
//! ticket of the latest term may mutate the state. Responses for superseded
//! terms are reported as [`SearchApply::Stale`] and dropped.

use super::message::Message;

/// Superseding token handed out for each issued search request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket {
    generation: u64,
}

impl SearchTicket {
    pub fn generation(self) -> u64 {
        self.generation
    }
}

/// What the caller has to do after the term changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchBegin {
    /// Term is empty or whitespace-only. State was reset, no request needed.
    Cleared,
    /// A request for `term` must be issued with `ticket`.
    Query { ticket: SearchTicket, term: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchApply {
    Applied,
    Stale,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchState {
    term: String,
    results: Vec<Message>,
    no_results: bool,
    generation: u64,
    pending: bool,
}

impl SearchState {
    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn results(&self) -> &[Message] {
        &self.results
    }

    /// True only while the latest non-empty term resolved to zero matches.
    pub fn no_results(&self) -> bool {
        self.no_results
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Search results take over the viewport while there are any.
    pub fn is_showing_results(&self) -> bool {
        !self.results.is_empty()
    }

    /// A resolved non-empty term, with or without matches.
    pub fn is_active(&self) -> bool {
        self.is_showing_results() || self.no_results
    }

    pub fn begin(&mut self, term: impl Into<String>) -> SearchBegin {
        self.term = term.into();
        self.generation = self.generation.wrapping_add(1);
        self.no_results = false;

        if self.term.trim().is_empty() {
            self.results.clear();
            self.pending = false;
            return SearchBegin::Cleared;
        }

        self.pending = true;
        SearchBegin::Query {
            ticket: SearchTicket {
                generation: self.generation,
            },
            term: self.term.clone(),
        }
    }

    pub fn push_char(&mut self, ch: char) -> SearchBegin {
        let mut term = self.term.clone();
        term.push(ch);
        self.begin(term)
    }

    pub fn pop_char(&mut self) -> SearchBegin {
        let mut term = self.term.clone();
        term.pop();
        self.begin(term)
    }

    pub fn clear(&mut self) -> SearchBegin {
        self.begin(String::new())
    }

    pub fn is_current(&self, ticket: SearchTicket) -> bool {
        self.pending && ticket.generation == self.generation
    }

    pub fn resolve(&mut self, ticket: SearchTicket, results: Vec<Message>) -> SearchApply {
        if !self.is_current(ticket) {
            return SearchApply::Stale;
        }

        self.pending = false;
        self.no_results = results.is_empty();
        self.results = results;
        SearchApply::Applied
    }

    /// Marks the latest request as finished. Results from the previous term
    /// are dropped so they never show under the new one.
    pub fn fail(&mut self, ticket: SearchTicket) -> SearchApply {
        if !self.is_current(ticket) {
            return SearchApply::Stale;
        }

        self.pending = false;
        self.results.clear();
        SearchApply::Applied
    }
}
