//! Routes interactions to per-user session workers.
//!
//! Every user gets one task that owns their [`Session`] and drains a bounded
//! queue, so a user's events are handled one at a time and in order, while a
//! slow search for one user never holds up anyone else.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use crate::model::interaction::{Interaction, Reply};
use crate::services::dataset::DatasetFetcher;
use crate::services::search;

use super::{messages, Session, Step};

pub type UserId = i64;

/// An interaction addressed to one user's session.
#[derive(Debug, Clone)]
pub struct Event {
    pub user_id: UserId,
    /// Opaque transport correlation id, echoed on every reply.
    pub request_id: Value,
    pub interaction: Interaction,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Outbound {
    pub user_id: UserId,
    pub request_id: Value,
    pub reply: Reply,
}

type Inbox = mpsc::Sender<(Value, Interaction)>;

pub struct Dispatcher {
    sessions: HashMap<UserId, Inbox>,
    fetcher: Arc<dyn DatasetFetcher>,
    outbound: mpsc::Sender<Outbound>,
    queue: usize,
}

impl Dispatcher {
    pub fn new(
        fetcher: Arc<dyn DatasetFetcher>,
        outbound: mpsc::Sender<Outbound>,
        queue: usize,
    ) -> Self {
        Self {
            sessions: HashMap::new(),
            fetcher,
            outbound,
            queue: queue.max(1),
        }
    }

    pub fn active_sessions(&self) -> usize {
        self.sessions.len()
    }

    /// Queues the event on its user's session without waiting for it to run.
    pub async fn dispatch(&mut self, event: Event) {
        let Event {
            user_id,
            request_id,
            interaction,
        } = event;

        let inbox = self
            .sessions
            .entry(user_id)
            .or_insert_with(|| {
                spawn_session(
                    user_id,
                    Arc::clone(&self.fetcher),
                    self.outbound.clone(),
                    self.queue,
                )
            })
            .clone();

        match inbox.try_send((request_id, interaction)) {
            Ok(()) => {}
            Err(TrySendError::Full((request_id, _))) => {
                tracing::warn!(user_id, "session queue full, dropping interaction");
                let busy = Outbound {
                    user_id,
                    request_id,
                    reply: messages::busy(),
                };
                if self.outbound.try_send(busy).is_err() {
                    tracing::warn!(user_id, "reply channel unavailable, busy notice dropped");
                }
            }
            Err(TrySendError::Closed(pending)) => {
                // The worker died (panic); the user starts over with a clean session.
                tracing::error!(user_id, "session worker stopped, starting a new session");
                let inbox = spawn_session(
                    user_id,
                    Arc::clone(&self.fetcher),
                    self.outbound.clone(),
                    self.queue,
                );
                if inbox.try_send(pending).is_err() {
                    tracing::error!(user_id, "fresh session rejected interaction");
                }
                self.sessions.insert(user_id, inbox);
            }
        }
    }
}

fn spawn_session(
    user_id: UserId,
    fetcher: Arc<dyn DatasetFetcher>,
    outbound: mpsc::Sender<Outbound>,
    queue: usize,
) -> Inbox {
    let (tx, rx) = mpsc::channel(queue);
    tracing::debug!(user_id, "session created");
    tokio::spawn(run_session(user_id, rx, fetcher, outbound));
    tx
}

async fn run_session(
    user_id: UserId,
    mut inbox: mpsc::Receiver<(Value, Interaction)>,
    fetcher: Arc<dyn DatasetFetcher>,
    outbound: mpsc::Sender<Outbound>,
) {
    let mut session = Session::new();

    while let Some((request_id, interaction)) = inbox.recv().await {
        let from = session.state();
        let step = session.handle(interaction);
        tracing::debug!(user_id, ?from, to = ?session.state(), "session transition");

        let delivered = match step {
            Step::Reply(reply) => deliver(&outbound, user_id, &request_id, reply).await,
            Step::Search { notice, query } => {
                if !deliver(&outbound, user_id, &request_id, notice).await {
                    break;
                }
                let outcome = search::run(fetcher.as_ref(), &query).await;
                let reply = session.complete_search(outcome);
                deliver(&outbound, user_id, &request_id, reply).await
            }
        };

        if !delivered {
            tracing::debug!(user_id, "transport gone, closing session");
            break;
        }
    }
}

async fn deliver(
    outbound: &mpsc::Sender<Outbound>,
    user_id: UserId,
    request_id: &Value,
    reply: Reply,
) -> bool {
    outbound
        .send(Outbound {
            user_id,
            request_id: request_id.clone(),
            reply,
        })
        .await
        .is_ok()
}
