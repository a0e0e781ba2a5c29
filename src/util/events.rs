use tokio::sync::broadcast;
use tracing::debug;

use crate::dto::course_dto::CourseResponse;

const CHANNEL_CAPACITY: usize = 64;

/// SSE event name carried on `/api/stream`.
pub const COURSE_ADDED_EVENT: &str = "course_added";

/// Fan-out of newly created courses to push-stream subscribers.
#[derive(Clone)]
pub struct CourseEvents {
    sender: broadcast::Sender<CourseResponse>,
}

impl CourseEvents {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        CourseEvents { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CourseResponse> {
        self.sender.subscribe()
    }

    /// No-op when nobody is listening.
    pub fn publish(&self, course: CourseResponse) {
        match self.sender.send(course) {
            Ok(receivers) => debug!(receivers, "Published course_added"),
            Err(_) => debug!("No push subscribers for course_added"),
        }
    }
}

impl Default for CourseEvents {
    fn default() -> Self {
        Self::new()
    }
}
