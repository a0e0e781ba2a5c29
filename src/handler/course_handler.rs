use axum::{extract::{State, Path, Json}, http::StatusCode, response::IntoResponse};
use bson::oid::ObjectId;
use crate::dto::MessageResponse;
use crate::dto::course_dto::{CourseResponse, CreateCourseRequest, UpdateCourseRequest};
use crate::service::course_service::CourseService;
use crate::util::error::HandlerError;
use std::sync::Arc;

pub type CourseServiceState = Arc<dyn CourseService>;

fn parse_course_id(id: &str) -> Result<ObjectId, HandlerError> {
    ObjectId::parse_str(id).map_err(|_| HandlerError::bad_request("Invalid course id"))
}

pub async fn list_courses_handler(
    State(service): State<CourseServiceState>,
) -> Result<impl IntoResponse, HandlerError> {
    let courses = service.list_courses().await?;
    let body: Vec<CourseResponse> = courses.into_iter().map(CourseResponse::from).collect();
    Ok(Json(body))
}

// Admin only
pub async fn create_course_handler(
    State(service): State<CourseServiceState>,
    Json(payload): Json<CreateCourseRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let created = service.create_course(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(CourseResponse::from(created))))
}

// Admin only
pub async fn update_course_handler(
    State(service): State<CourseServiceState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateCourseRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_course_id(&id)?;
    let updated = service.update_course(id, payload.into()).await?;
    Ok(Json(CourseResponse::from(updated)))
}

// Admin only
pub async fn delete_course_handler(
    State(service): State<CourseServiceState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_course_id(&id)?;
    service.delete_course(id).await?;
    Ok(Json(MessageResponse::new("Deleted")))
}
