//! Debounced autocomplete.
//!
//! Keystrokes arrive as full input snapshots on a channel. At most one
//! suggestion lookup is issued per quiet period, always for the latest input.

use std::time::Duration;
use tokio::sync::mpsc;
use tracing::debug;

use crate::{client::GeocodingClient, model::PlaceCandidate, pipeline::suggestions};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

const CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy)]
pub struct Debouncer {
    delay: Duration,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Wait for input, then keep replacing it until `delay` passes without a
    /// newer value. A closed channel flushes whatever is pending.
    pub async fn next<T>(&self, rx: &mut mpsc::Receiver<T>) -> Option<T> {
        let mut latest = rx.recv().await?;
        loop {
            tokio::select! {
                msg = rx.recv() => match msg {
                    Some(value) => latest = value,
                    None => return Some(latest),
                },
                _ = tokio::time::sleep(self.delay) => return Some(latest),
            }
        }
    }
}

/// Input side and output side of a running suggestion feed.
#[derive(Debug)]
pub struct SuggestionFeed {
    pub input: mpsc::Sender<String>,
    pub suggestions: mpsc::Receiver<Vec<PlaceCandidate>>,
}

/// Spawn a task that turns debounced input into suggestion lists.
///
/// Each settled input produces exactly one list; an empty list means the
/// suggestion dropdown should be hidden. The task ends when `input` is dropped.
pub fn spawn_suggestion_feed(geocoding: GeocodingClient, delay: Duration) -> SuggestionFeed {
    let (input_tx, mut input_rx) = mpsc::channel::<String>(CHANNEL_CAPACITY);
    let (out_tx, out_rx) = mpsc::channel(CHANNEL_CAPACITY);
    let debouncer = Debouncer::new(delay);

    tokio::spawn(async move {
        while let Some(text) = debouncer.next(&mut input_rx).await {
            debug!(input = %text, "input settled");
            let places = suggestions(&geocoding, &text).await;
            if out_tx.send(places).await.is_err() {
                break;
            }
        }
    });

    SuggestionFeed {
        input: input_tx,
        suggestions: out_rx,
    }
}
