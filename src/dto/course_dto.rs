use crate::model::course::{Course, CourseChanges};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateCourseRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub tutor: String,
    #[serde(default)]
    pub desc: String,
}

impl From<CreateCourseRequest> for Course {
    fn from(req: CreateCourseRequest) -> Self {
        Course {
            id: None,
            title: req.title,
            tag: req.tag,
            duration: req.duration,
            price: req.price,
            tutor: req.tutor,
            desc: req.desc,
            created_at: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCourseRequest {
    pub title: Option<String>,
    pub tag: Option<String>,
    pub duration: Option<String>,
    pub price: Option<String>,
    pub tutor: Option<String>,
    pub desc: Option<String>,
}

impl From<UpdateCourseRequest> for CourseChanges {
    fn from(req: UpdateCourseRequest) -> Self {
        CourseChanges {
            title: req.title,
            tag: req.tag,
            duration: req.duration,
            price: req.price,
            tutor: req.tutor,
            desc: req.desc,
        }
    }
}

/// Course as it travels over HTTP and the push stream; shared by the catalog client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseResponse {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub tutor: String,
    #[serde(default)]
    pub desc: String,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,
}

impl From<Course> for CourseResponse {
    fn from(course: Course) -> Self {
        CourseResponse {
            id: course.id.map(|id| id.to_hex()).unwrap_or_default(),
            title: course.title,
            tag: course.tag,
            duration: course.duration,
            price: course.price,
            tutor: course.tutor,
            desc: course.desc,
            created_at: course.created_at,
        }
    }
}
