use crate::model::course::{Course, CourseChanges};
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use chrono::{SecondsFormat, Utc};
use futures::stream::TryStreamExt;
use mongodb::options::{FindOneAndUpdateOptions, FindOptions, ReturnDocument};
use mongodb::{Collection, Database};
use tokio::sync::RwLock;
use tracing::{error, info, instrument};

#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn create(&self, course: Course) -> RepositoryResult<Course>;
    /// All courses, newest first.
    async fn list(&self) -> RepositoryResult<Vec<Course>>;
    async fn find_by_id(&self, id: ObjectId) -> RepositoryResult<Option<Course>>;
    /// `None` when no course has this id.
    async fn update(&self, id: ObjectId, changes: CourseChanges) -> RepositoryResult<Option<Course>>;
    /// Whether a document was removed.
    async fn delete(&self, id: ObjectId) -> RepositoryResult<bool>;
    async fn count(&self) -> RepositoryResult<u64>;
}

/// Fixed-width UTC timestamps so lexical order equals chronological order.
fn creation_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub struct MongoCourseRepository {
    collection: Collection<Course>,
}

impl MongoCourseRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        MongoCourseRepository {
            collection: db.collection::<Course>(collection_name),
        }
    }
}

#[async_trait]
impl CourseRepository for MongoCourseRepository {
    #[instrument(skip(self), fields(title = %course.title))]
    async fn create(&self, mut course: Course) -> RepositoryResult<Course> {
        course.id = Some(ObjectId::new());
        course.created_at = Some(creation_timestamp());
        match self.collection.insert_one(&course, None).await {
            Ok(_) => {
                info!("Course created successfully");
                Ok(course)
            }
            Err(e) => {
                error!("Failed to create course: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RepositoryResult<Vec<Course>> {
        // ObjectIds grow per insertion, so they break createdAt ties.
        let options = FindOptions::builder()
            .sort(doc! { "createdAt": -1, "_id": -1 })
            .build();
        let cursor = self.collection.find(None, options).await.map_err(|e| {
            error!("Failed to list courses: {}", e);
            RepositoryError::database(format!("Failed to list courses: {}", e))
        })?;
        let courses: Vec<Course> = cursor.try_collect().await.map_err(|e| {
            error!("Failed to deserialize course: {}", e);
            RepositoryError::serialization(format!("Failed to deserialize course: {}", e))
        })?;
        info!("Fetched {} courses", courses.len());
        Ok(courses)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn find_by_id(&self, id: ObjectId) -> RepositoryResult<Option<Course>> {
        self.collection
            .find_one(doc! { "_id": id }, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to fetch course by ID: {}", e)))
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn update(&self, id: ObjectId, changes: CourseChanges) -> RepositoryResult<Option<Course>> {
        if changes.is_empty() {
            return self.find_by_id(id).await;
        }
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();
        let update = doc! { "$set": changes.to_document() };
        match self.collection.find_one_and_update(doc! { "_id": id }, update, options).await {
            Ok(Some(course)) => {
                info!("Course updated successfully for ID: {}", id);
                Ok(Some(course))
            }
            Ok(None) => {
                info!("No course found to update for ID: {}", id);
                Ok(None)
            }
            Err(e) => {
                error!("Failed to update course: {}", e);
                Err(RepositoryError::database(format!("Failed to update course: {}", e)))
            }
        }
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: ObjectId) -> RepositoryResult<bool> {
        match self.collection.delete_one(doc! { "_id": id }, None).await {
            Ok(result) => {
                info!(deleted = result.deleted_count, "Course delete finished");
                Ok(result.deleted_count > 0)
            }
            Err(e) => {
                error!("Failed to delete course: {}", e);
                Err(RepositoryError::database(format!("Failed to delete course: {}", e)))
            }
        }
    }

    #[instrument(skip(self))]
    async fn count(&self) -> RepositoryResult<u64> {
        self.collection
            .count_documents(None, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to count courses: {}", e)))
    }
}

/// Courses kept in insertion order.
#[derive(Default)]
pub struct InMemoryCourseRepository {
    courses: RwLock<Vec<Course>>,
}

impl InMemoryCourseRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CourseRepository for InMemoryCourseRepository {
    async fn create(&self, mut course: Course) -> RepositoryResult<Course> {
        course.id = Some(ObjectId::new());
        course.created_at = Some(creation_timestamp());
        self.courses.write().await.push(course.clone());
        Ok(course)
    }

    async fn list(&self) -> RepositoryResult<Vec<Course>> {
        let courses = self.courses.read().await;
        let mut newest_first: Vec<Course> = courses.iter().rev().cloned().collect();
        // Stable sort keeps later insertions ahead on equal timestamps.
        newest_first.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(newest_first)
    }

    async fn find_by_id(&self, id: ObjectId) -> RepositoryResult<Option<Course>> {
        let courses = self.courses.read().await;
        Ok(courses.iter().find(|c| c.id == Some(id)).cloned())
    }

    async fn update(&self, id: ObjectId, changes: CourseChanges) -> RepositoryResult<Option<Course>> {
        let mut courses = self.courses.write().await;
        Ok(courses.iter_mut().find(|c| c.id == Some(id)).map(|course| {
            changes.apply(course);
            course.clone()
        }))
    }

    async fn delete(&self, id: ObjectId) -> RepositoryResult<bool> {
        let mut courses = self.courses.write().await;
        let before = courses.len();
        courses.retain(|c| c.id != Some(id));
        Ok(courses.len() < before)
    }

    async fn count(&self) -> RepositoryResult<u64> {
        Ok(self.courses.read().await.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(title: &str) -> Course {
        Course {
            title: title.to_string(),
            tag: "jee".to_string(),
            ..Course::default()
        }
    }

    #[tokio::test]
    async fn test_in_memory_list_is_newest_first() {
        let repo = InMemoryCourseRepository::new();
        for title in ["first", "second", "third"] {
            repo.create(course(title)).await.unwrap();
        }
        let titles: Vec<String> = repo.list().await.unwrap().into_iter().map(|c| c.title).collect();
        assert_eq!(titles, vec!["third", "second", "first"]);
    }

    #[tokio::test]
    async fn test_in_memory_update_and_delete() {
        let repo = InMemoryCourseRepository::new();
        let created = repo.create(course("Electrostatics Mastery")).await.unwrap();
        let id = created.id.unwrap();

        let changes = CourseChanges {
            tutor: Some("Dr. Aryan".to_string()),
            ..CourseChanges::default()
        };
        let updated = repo.update(id, changes.clone()).await.unwrap().unwrap();
        assert_eq!(updated.tutor, "Dr. Aryan");
        assert_eq!(updated.title, "Electrostatics Mastery");

        assert!(repo.update(ObjectId::new(), changes).await.unwrap().is_none());

        assert!(repo.delete(id).await.unwrap());
        assert!(!repo.delete(id).await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 0);
    }
}
