//! Runs fetch effects as independent tasks and reports their outcomes.

use std::sync::Arc;

use tokio::{sync::mpsc, task::JoinHandle};
use tracing::debug;

use crate::{
    api::RoomsApi,
    controller::{FetchEffect, FetchOutcome},
};

pub async fn perform(api: &dyn RoomsApi, effect: FetchEffect) -> FetchOutcome {
    match effect {
        FetchEffect::Rooms => FetchOutcome::Rooms(api.fetch_rooms().await),
        FetchEffect::Messages(room) => {
            let result = api.fetch_messages(&room).await;
            FetchOutcome::Messages { room, result }
        }
    }
}

/// Spawns one task per effect. Nothing is cancelled or sequenced, so two
/// fetches for the same room resolve in whatever order they complete.
#[derive(Clone)]
pub struct FetchRuntime {
    api: Arc<dyn RoomsApi>,
    outcomes: mpsc::UnboundedSender<FetchOutcome>,
}

impl FetchRuntime {
    pub fn new(api: Arc<dyn RoomsApi>) -> (Self, mpsc::UnboundedReceiver<FetchOutcome>) {
        let (outcomes, rx) = mpsc::unbounded_channel();
        (Self { api, outcomes }, rx)
    }

    pub fn dispatch(&self, effect: FetchEffect) -> JoinHandle<()> {
        debug!(effect = effect.name(), "queued fetch");
        let api = Arc::clone(&self.api);
        let outcomes = self.outcomes.clone();
        tokio::spawn(async move {
            let outcome = perform(api.as_ref(), effect).await;
            if outcomes.send(outcome).is_err() {
                debug!("fetch finished after the view closed");
            }
        })
    }
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
