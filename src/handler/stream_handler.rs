use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::{self, Stream};
use std::convert::Infallible;
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

use crate::util::events::{CourseEvents, COURSE_ADDED_EVENT};

/// Server-sent events: one `course_added` event per created course.
pub async fn course_stream_handler(
    State(events): State<CourseEvents>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    info!("Push subscriber connected");
    let rx = events.subscribe();

    let stream = stream::unfold(rx, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(course) => match Event::default().event(COURSE_ADDED_EVENT).json_data(&course) {
                    Ok(event) => return Some((Ok(event), rx)),
                    Err(e) => warn!("Failed to encode course_added event: {}", e),
                },
                Err(RecvError::Lagged(n)) => {
                    warn!("Push subscriber lagged by {} events", n);
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
