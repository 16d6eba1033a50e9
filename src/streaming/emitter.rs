//! Chunked delivery of a generated campaign document.
//!
//! The document is serialized once, up front; a dedicated task per connection
//! then emits fixed-size character chunks at a fixed cadence, followed by a
//! single terminal frame carrying the complete document. The cadence is a
//! cosmetic "typing" effect, not a backpressure mechanism - payloads are
//! small and bounded.
//!
//! Cancellation: the SSE body stream holds a drop guard for the task's
//! cancellation token. When the client disconnects, axum drops the body
//! stream, the guard cancels the token, and the task stops before its next
//! tick without emitting a terminal frame.

use std::convert::Infallible;
use std::time::Duration;

use axum::response::sse::Event;
use futures_util::stream::Stream;
use serde_json::Value;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::models::CampaignFrame;

/// Cadence and chunk sizing for one stream.
#[derive(Debug, Clone, Copy)]
pub struct ChunkSettings {
    /// Characters per chunk; the last chunk may be shorter.
    pub chunk_size: usize,
    /// Delay between chunk emissions.
    pub tick: Duration,
}

impl Default for ChunkSettings {
    fn default() -> Self {
        Self {
            chunk_size: 50,
            tick: Duration::from_millis(50),
        }
    }
}

/// Spawn the emitter task for one connection.
///
/// Frames arrive on the returned receiver in strict emission order. The task
/// ends in exactly one of two ways: it sends the terminal frame, or the token
/// is cancelled (or the receiver dropped) first and no further frame is sent.
pub fn spawn_chunk_task(
    document: Value,
    serialized: String,
    settings: ChunkSettings,
    token: CancellationToken,
) -> (mpsc::Receiver<CampaignFrame>, JoinHandle<()>) {
    let (tx, rx) = mpsc::channel(16);

    let handle = tokio::spawn(async move {
        let chunk_size = settings.chunk_size.max(1);
        let mut interval = tokio::time::interval(settings.tick);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut cursor = 0usize;

        while cursor < serialized.len() {
            tokio::select! {
                _ = token.cancelled() => {
                    debug!(cursor, total = serialized.len(), "push channel cancelled, releasing stream");
                    return;
                }
                _ = interval.tick() => {}
            }

            let end = next_chunk_boundary(&serialized, cursor, chunk_size);
            let frame = CampaignFrame {
                chunk: serialized[cursor..end].to_string(),
                done: false,
                complete: None,
            };
            if tx.send(frame).await.is_err() {
                debug!(cursor, "push channel receiver dropped, releasing stream");
                return;
            }
            cursor = end;
        }

        tokio::select! {
            _ = token.cancelled() => {
                debug!("push channel cancelled before terminal frame");
                return;
            }
            _ = interval.tick() => {}
        }

        let terminal = CampaignFrame {
            chunk: String::new(),
            done: true,
            complete: Some(document),
        };
        if tx.send(terminal).await.is_ok() {
            debug!(total = serialized.len(), "campaign stream complete");
        }
    });

    (rx, handle)
}

/// Byte offset after `chunk_size` characters, clamped to the end of the
/// string. Keeps chunk boundaries on UTF-8 character boundaries.
fn next_chunk_boundary(s: &str, start: usize, chunk_size: usize) -> usize {
    s[start..]
        .char_indices()
        .nth(chunk_size)
        .map_or(s.len(), |(offset, _)| start + offset)
}

/// Adapt the emitter task to an SSE body stream.
///
/// Each frame becomes one `data:` event carrying the frame as JSON. Dropping
/// the returned stream cancels the emitter task via the held drop guard.
pub fn campaign_stream(
    document: Value,
    serialized: String,
    settings: ChunkSettings,
) -> impl Stream<Item = Result<Event, Infallible>> {
    let token = CancellationToken::new();
    let guard = token.clone().drop_guard();
    let (mut rx, _handle) = spawn_chunk_task(document, serialized, settings, token);

    async_stream::stream! {
        let _cancel_on_drop = guard;
        while let Some(frame) = rx.recv().await {
            match serde_json::to_string(&frame) {
                Ok(json) => yield Ok::<_, Infallible>(Event::default().data(json)),
                Err(e) => warn!("failed to serialize stream frame: {e}"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fast() -> ChunkSettings {
        ChunkSettings {
            chunk_size: 7,
            tick: Duration::from_millis(1),
        }
    }

    async fn collect_frames(mut rx: mpsc::Receiver<CampaignFrame>) -> Vec<CampaignFrame> {
        let mut frames = Vec::new();
        while let Some(frame) = rx.recv().await {
            frames.push(frame);
        }
        frames
    }

    #[tokio::test]
    async fn chunks_concatenate_to_the_serialized_document() {
        let doc = json!({
            "campaign": {"type": "flash-sale", "title": "48-Hour Flash Sale"},
            "channel": {"primary": "sms"},
        });
        let serialized = serde_json::to_string_pretty(&doc).unwrap();

        let (rx, handle) =
            spawn_chunk_task(doc.clone(), serialized.clone(), fast(), CancellationToken::new());
        let frames = collect_frames(rx).await;
        handle.await.unwrap();

        let (terminal, chunks) = frames.split_last().unwrap();
        assert!(chunks.iter().all(|f| !f.done && f.complete.is_none()));
        let reassembled: String = chunks.iter().map(|f| f.chunk.as_str()).collect();
        assert_eq!(reassembled, serialized);

        assert!(terminal.done);
        assert_eq!(terminal.chunk, "");
        assert_eq!(terminal.complete.as_ref().unwrap(), &doc);
    }

    #[tokio::test]
    async fn chunking_respects_utf8_boundaries() {
        let doc = json!({"headline": "Héllo — fresh picks 🚀 für dich"});
        let serialized = serde_json::to_string_pretty(&doc).unwrap();
        let settings = ChunkSettings {
            chunk_size: 5,
            tick: Duration::from_millis(1),
        };

        let (rx, handle) =
            spawn_chunk_task(doc, serialized.clone(), settings, CancellationToken::new());
        let frames = collect_frames(rx).await;
        handle.await.unwrap();

        let reassembled: String = frames
            .iter()
            .filter(|f| !f.done)
            .map(|f| f.chunk.as_str())
            .collect();
        assert_eq!(reassembled, serialized);
        for frame in frames.iter().filter(|f| !f.done) {
            assert!(frame.chunk.chars().count() <= 5);
        }
    }

    #[tokio::test]
    async fn last_chunk_may_be_short() {
        let doc = json!("x");
        let serialized = "abcdefgh".to_string(); // 8 chars, chunk size 7
        let (rx, handle) =
            spawn_chunk_task(doc, serialized, fast(), CancellationToken::new());
        let frames = collect_frames(rx).await;
        handle.await.unwrap();

        assert_eq!(frames.len(), 3);
        assert_eq!(frames[0].chunk, "abcdefg");
        assert_eq!(frames[1].chunk, "h");
        assert!(frames[2].done);
    }

    #[tokio::test]
    async fn empty_serialized_form_yields_only_the_terminal_frame() {
        let doc = json!({});
        let (rx, handle) =
            spawn_chunk_task(doc.clone(), String::new(), fast(), CancellationToken::new());
        let frames = collect_frames(rx).await;
        handle.await.unwrap();

        assert_eq!(frames.len(), 1);
        assert!(frames[0].done);
        assert_eq!(frames[0].complete.as_ref().unwrap(), &doc);
    }

    #[tokio::test]
    async fn cancellation_stops_emission_without_a_terminal_frame() {
        let doc = json!("x");
        let serialized = "a".repeat(500);
        let settings = ChunkSettings {
            chunk_size: 1,
            tick: Duration::from_millis(5),
        };
        let token = CancellationToken::new();

        let (mut rx, handle) = spawn_chunk_task(doc, serialized, settings, token.clone());
        for _ in 0..3 {
            let frame = rx.recv().await.unwrap();
            assert!(!frame.done);
        }
        token.cancel();
        handle.await.unwrap();

        // Anything still buffered was emitted before the cancel won the
        // select; none of it may be the terminal frame.
        while let Some(frame) = rx.recv().await {
            assert!(!frame.done);
        }
    }

    #[tokio::test]
    async fn dropping_the_receiver_stops_the_task() {
        let doc = json!("x");
        let serialized = "a".repeat(500);
        let settings = ChunkSettings {
            chunk_size: 1,
            tick: Duration::from_millis(1),
        };

        let (rx, handle) =
            spawn_chunk_task(doc, serialized, settings, CancellationToken::new());
        drop(rx);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn dropping_the_sse_stream_cancels_the_emitter() {
        use futures_util::StreamExt;

        let doc = json!({"k": "v".repeat(400)});
        let serialized = serde_json::to_string_pretty(&doc).unwrap();
        let settings = ChunkSettings {
            chunk_size: 10,
            tick: Duration::from_millis(1),
        };

        let mut stream = Box::pin(campaign_stream(doc, serialized, settings));
        let first = stream.next().await;
        assert!(first.is_some());
        drop(stream);
        // The drop guard cancels the token; give the task a beat to observe
        // it, then make sure the runtime has no stuck emitter by completing.
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
}
