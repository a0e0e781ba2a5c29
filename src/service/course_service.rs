use tracing::{info, error, instrument};
use crate::dto::course_dto::CourseResponse;
use crate::model::course::{Course, CourseChanges};
use crate::repository::course_repo::CourseRepository;
use crate::util::error::ServiceError;
use crate::util::events::CourseEvents;
use async_trait::async_trait;
use bson::oid::ObjectId;
use std::sync::Arc;

#[async_trait]
pub trait CourseService: Send + Sync {
    async fn list_courses(&self) -> Result<Vec<Course>, ServiceError>;
    async fn create_course(&self, course: Course) -> Result<Course, ServiceError>;
    async fn update_course(&self, id: ObjectId, changes: CourseChanges) -> Result<Course, ServiceError>;
    /// Succeeds whether or not the course existed.
    async fn delete_course(&self, id: ObjectId) -> Result<(), ServiceError>;
    async fn count_courses(&self) -> Result<u64, ServiceError>;
}

pub struct CourseServiceImpl {
    pub course_repo: Arc<dyn CourseRepository>,
    pub events: CourseEvents,
}

impl CourseServiceImpl {
    pub fn new(course_repo: Arc<dyn CourseRepository>, events: CourseEvents) -> Self {
        Self { course_repo, events }
    }
}

#[async_trait]
impl CourseService for CourseServiceImpl {
    #[instrument(skip(self))]
    async fn list_courses(&self) -> Result<Vec<Course>, ServiceError> {
        let res = self.course_repo.list().await;
        match &res {
            Ok(courses) => info!("Fetched {} courses", courses.len()),
            Err(e) => error!("Failed to list courses: {e}"),
        }
        res.map_err(ServiceError::from)
    }

    #[instrument(skip(self, course), fields(title = %course.title))]
    async fn create_course(&self, course: Course) -> Result<Course, ServiceError> {
        info!("Creating course");
        let created = self.course_repo.create(course).await.map_err(|e| {
            error!("Failed to create course: {e}");
            ServiceError::from(e)
        })?;
        self.events.publish(CourseResponse::from(created.clone()));
        Ok(created)
    }

    #[instrument(skip(self, changes), fields(id = %id))]
    async fn update_course(&self, id: ObjectId, changes: CourseChanges) -> Result<Course, ServiceError> {
        info!("Updating course");
        match self.course_repo.update(id, changes).await {
            Ok(Some(course)) => Ok(course),
            Ok(None) => Err(ServiceError::NotFound(format!("Course not found: {}", id))),
            Err(e) => {
                error!("Failed to update course: {e}");
                Err(e.into())
            }
        }
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete_course(&self, id: ObjectId) -> Result<(), ServiceError> {
        let removed = self.course_repo.delete(id).await.map_err(|e| {
            error!("Failed to delete course: {e}");
            ServiceError::from(e)
        })?;
        info!(removed, "Course delete handled");
        Ok(())
    }

    async fn count_courses(&self) -> Result<u64, ServiceError> {
        self.course_repo.count().await.map_err(ServiceError::from)
    }
}
