//! Per-user conversation: collects a query field by field, offers to save it
//! and hands it over for searching.

pub mod dispatch;
pub mod messages;

use crate::error::CheckError;
use crate::model::interaction::{Button, Interaction, Reply};
use crate::model::query::{Field, Query, QueryDraft};
use crate::services::search::SearchOutcome;

use messages::SearchStart;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Awaiting(Field),
    AwaitingSaveChoice,
    /// A search is in flight; left through [`Session::complete_search`].
    Searching,
}

/// What the caller must do after feeding an interaction to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Reply(Reply),
    /// Show `notice`, run the search, then call [`Session::complete_search`].
    Search { notice: Reply, query: Query },
}

#[derive(Debug, Clone)]
pub struct Session {
    state: SessionState,
    draft: QueryDraft,
    saved: Option<Query>,
    in_flight: Option<Query>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            draft: QueryDraft::default(),
            saved: None,
            in_flight: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn saved(&self) -> Option<&Query> {
        self.saved.as_ref()
    }

    pub fn handle(&mut self, input: Interaction) -> Step {
        if self.state == SessionState::Searching {
            return Step::Reply(messages::search_in_progress());
        }

        match input {
            Interaction::Press(button) => self.on_button(button),
            Interaction::Text(text) => self.on_text(text),
        }
    }

    fn on_button(&mut self, button: Button) -> Step {
        match (self.state, button) {
            (_, Button::ReturnToMenu) => {
                self.reset();
                Step::Reply(messages::menu(self.saved()))
            }

            (_, Button::BeginNewQuery) => {
                self.draft = QueryDraft::default();
                self.state = SessionState::Awaiting(Field::FirstName);
                Step::Reply(messages::prompt(Field::FirstName, &self.draft))
            }

            (SessionState::Idle, Button::ReuseSaved) => match self.saved.clone() {
                Some(query) => {
                    let notice = messages::search_started(&query, SearchStart::Reused);
                    self.start_search(query, notice)
                }
                None => Step::Reply(messages::failure(&CheckError::NoSavedParameters, None)),
            },

            (SessionState::Idle, Button::Cancel) => {
                Step::Reply(messages::nothing_to_cancel(self.saved()))
            }

            // Stale save/don't-save buttons from an earlier conversation.
            (SessionState::Idle, Button::Save | Button::DontSave) => {
                Step::Reply(messages::menu(self.saved()))
            }

            (_, Button::Cancel) => {
                self.reset();
                Step::Reply(messages::cancelled(self.saved()))
            }

            (SessionState::AwaitingSaveChoice, Button::Save | Button::DontSave) => {
                let Some(query) = self.draft.complete() else {
                    self.reset();
                    return Step::Reply(messages::menu(self.saved()));
                };
                let how = if button == Button::Save {
                    self.saved = Some(query.clone());
                    SearchStart::Saved
                } else {
                    SearchStart::NotSaved
                };
                let notice = messages::search_started(&query, how);
                self.start_search(query, notice)
            }

            (SessionState::Awaiting(field), Button::Save | Button::DontSave) => {
                Step::Reply(messages::prompt(field, &self.draft))
            }

            (_, Button::ReuseSaved) => Step::Reply(messages::finish_or_cancel()),

            (SessionState::Searching, _) => Step::Reply(messages::search_in_progress()),
        }
    }

    fn on_text(&mut self, text: String) -> Step {
        match self.state {
            SessionState::Awaiting(field) => {
                let value = text.trim();
                if value.is_empty() {
                    return Step::Reply(messages::prompt(field, &self.draft));
                }
                self.draft.set(field, value.to_string());

                match field.next() {
                    Some(next) => {
                        self.state = SessionState::Awaiting(next);
                        Step::Reply(messages::prompt(next, &self.draft))
                    }
                    None => match self.draft.complete() {
                        Some(query) => {
                            self.state = SessionState::AwaitingSaveChoice;
                            Step::Reply(messages::save_question(&query))
                        }
                        None => {
                            self.reset();
                            Step::Reply(messages::menu(self.saved()))
                        }
                    },
                }
            }
            SessionState::AwaitingSaveChoice => match self.draft.complete() {
                Some(query) => Step::Reply(messages::save_question(&query)),
                None => {
                    self.reset();
                    Step::Reply(messages::menu(self.saved()))
                }
            },
            SessionState::Idle => Step::Reply(messages::menu(self.saved())),
            SessionState::Searching => Step::Reply(messages::search_in_progress()),
        }
    }

    fn start_search(&mut self, query: Query, notice: Reply) -> Step {
        self.draft = QueryDraft::default();
        self.state = SessionState::Searching;
        self.in_flight = Some(query.clone());
        Step::Search { notice, query }
    }

    /// Reports the search result and returns to idle, whatever the outcome.
    pub fn complete_search(&mut self, outcome: Result<SearchOutcome, CheckError>) -> Reply {
        let query = self.in_flight.take();
        self.reset();

        match (outcome, query) {
            (Ok(SearchOutcome::Found(record)), _) => messages::found(&record, self.saved()),
            (Ok(SearchOutcome::NotFound), Some(q)) => messages::not_found(&q, self.saved()),
            (Ok(SearchOutcome::NotFound), None) => messages::menu(self.saved()),
            (Err(e), _) => messages::failure(&e, self.saved()),
        }
    }

    fn reset(&mut self) {
        self.state = SessionState::Idle;
        self.draft = QueryDraft::default();
        self.in_flight = None;
    }
}
