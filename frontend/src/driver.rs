//! Runs the effects a `StudentsView` asks for until it has nothing left to do.

use crate::client::StudentsClient;
use crate::view::{Effect, StudentsView};

/// Execute `effect` and every follow-up effect, one API call at a time.
pub async fn drive(view: &mut StudentsView, client: &StudentsClient, effect: Option<Effect>) {
    let mut next = effect;
    while let Some(effect) = next.take() {
        tracing::debug!(?effect, "executing");
        next = match effect {
            Effect::Fetch => view.fetch_resolved(client.list().await.map_err(|e| e.to_string())),
            Effect::Create(payload) => view.submit_resolved(
                client.create(&payload).await.map(drop).map_err(|e| e.to_string()),
            ),
            Effect::Update(id, payload) => view.submit_resolved(
                client.update(id, &payload).await.map(drop).map_err(|e| e.to_string()),
            ),
            Effect::Delete(id) => view.delete_resolved(client.delete(id).await.map_err(|e| e.to_string())),
        };
    }
}
