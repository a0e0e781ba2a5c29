use futures::StreamExt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::client::api::CatalogApi;
use crate::client::catalog::{Filter, Rendered};
use crate::client::demo::demo_courses;
use crate::client::view::CatalogView;
use crate::dto::course_dto::CourseResponse;

#[derive(Debug, Default)]
struct CatalogState {
    courses: Vec<CourseResponse>,
    filter: Filter,
}

impl CatalogState {
    fn rendered(&self) -> Rendered {
        self.filter.render(&self.courses)
    }
}

/// Working copy of the catalog shared by the poll and push tasks.
/// Whichever update lands last wins.
#[derive(Clone)]
pub struct CatalogSync {
    api: Arc<dyn CatalogApi>,
    view: Arc<dyn CatalogView>,
    state: Arc<Mutex<CatalogState>>,
}

impl CatalogSync {
    pub fn new(api: Arc<dyn CatalogApi>, view: Arc<dyn CatalogView>) -> Self {
        Self {
            api,
            view,
            state: Arc::new(Mutex::new(CatalogState::default())),
        }
    }

    /// Shows the demo catalog until live data arrives.
    pub async fn initial_render(&self) {
        let rendered = {
            let mut state = self.state.lock().await;
            state.courses = demo_courses();
            state.rendered()
        };
        self.view.render(&rendered);
    }

    /// Fetches the live list once. Returns true when the working list was
    /// replaced; errors and empty results keep the previous list.
    pub async fn sync_with_server(&self) -> bool {
        let courses = match self.api.fetch_courses().await {
            Ok(courses) => courses,
            Err(e) => {
                warn!("Course sync failed, keeping current list: {}", e);
                return false;
            }
        };
        if courses.is_empty() {
            debug!("Server returned no courses, keeping current list");
            return false;
        }

        let rendered = {
            let mut state = self.state.lock().await;
            state.courses = courses;
            state.rendered()
        };
        info!("Synced course list");
        self.view.render(&rendered);
        true
    }

    /// Syncs immediately and then on every tick, until the task is aborted.
    /// Each sync runs in its own task so a hung fetch never holds up the timer.
    pub async fn poll_loop(&self, every: Duration) {
        let mut ticker = interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let sync = self.clone();
            tokio::spawn(async move {
                sync.sync_with_server().await;
            });
        }
    }

    /// Prepends pushed courses until the stream ends. Failures are logged;
    /// polling keeps the list fresh without it.
    pub async fn push_channel(&self) {
        let mut stream = match self.api.subscribe().await {
            Ok(stream) => stream,
            Err(e) => {
                warn!("Push channel unavailable, relying on polling: {}", e);
                return;
            }
        };
        while let Some(item) = stream.next().await {
            match item {
                Ok(course) => self.prepend(course).await,
                Err(e) => {
                    warn!("Push channel error, relying on polling: {}", e);
                    return;
                }
            }
        }
        debug!("Push channel closed");
    }

    async fn prepend(&self, course: CourseResponse) {
        self.state.lock().await.courses.insert(0, course.clone());
        info!(title = %course.title, "Course pushed");
        self.view.prepend(&course);
    }

    /// Changes the active tag/search and re-renders the working list.
    pub async fn set_filter(&self, filter: Filter) -> Rendered {
        let rendered = {
            let mut state = self.state.lock().await;
            state.filter = filter;
            state.rendered()
        };
        self.view.render(&rendered);
        rendered
    }

    pub async fn courses(&self) -> Vec<CourseResponse> {
        self.state.lock().await.courses.clone()
    }
}
