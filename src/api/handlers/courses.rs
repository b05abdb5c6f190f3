//! Course CRUD request handlers.
//!
//! Reads are public. Creating, updating and deleting require Basic
//! credentials; any authenticated user may modify any course.

use axum::{
    Extension, Json,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::api::doc::COURSE_TAG;
use crate::api::dto::{CourseResponse, CreateCourseRequest, ErrorResponse, UpdateCourseRequest};
use crate::api::middleware::AuthUser;
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::{PathParam, ValidatedJson};

/// GET /api/courses - List courses
///
/// Every course with its owner, ordered by id.
#[utoipa::path(
    get,
    path = "/api/courses",
    tag = COURSE_TAG,
    responses(
        (status = 200, description = "All courses", body = Vec<CourseResponse>)
    )
)]
pub async fn list_courses(State(state): State<AppState>) -> AppResult<Json<Vec<CourseResponse>>> {
    let courses = state.services.courses.list_courses().await?;
    Ok(Json(courses.into_iter().map(CourseResponse::from).collect()))
}

/// GET /api/courses/{id} - Get course by ID
#[utoipa::path(
    get,
    path = "/api/courses/{id}",
    tag = COURSE_TAG,
    params(("id" = i32, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course found", body = CourseResponse),
        (status = 400, description = "Malformed course id", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    )
)]
pub async fn get_course(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> AppResult<Json<CourseResponse>> {
    let course = state.services.courses.get_course(id).await?;
    Ok(Json(CourseResponse::from(course)))
}

/// POST /api/courses - Create course
///
/// The course belongs to the authenticated user unless `userId` is given.
/// Responds 201 with the new resource URI in `Location`.
#[utoipa::path(
    post,
    path = "/api/courses",
    tag = COURSE_TAG,
    request_body = CreateCourseRequest,
    responses(
        (status = 201, description = "Course created", headers(("Location" = String))),
        (status = 400, description = "Validation failed or unknown owner", body = ErrorResponse),
        (status = 401, description = "Missing or invalid credentials", body = ErrorResponse)
    ),
    security(("basicAuth" = []))
)]
pub async fn create_course(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ValidatedJson(payload): ValidatedJson<CreateCourseRequest>,
) -> AppResult<impl IntoResponse> {
    let course = state
        .services
        .courses
        .create_course(payload.into_new_course(auth_user.user_id))
        .await?;
    let location = format!("/api/courses/{}", course.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)]))
}

/// PUT /api/courses/{id} - Update course
///
/// Only the fields present in the body change.
#[utoipa::path(
    put,
    path = "/api/courses/{id}",
    tag = COURSE_TAG,
    params(("id" = i32, Path, description = "Course ID")),
    request_body = UpdateCourseRequest,
    responses(
        (status = 204, description = "Course updated"),
        (status = 400, description = "Empty or invalid update", body = ErrorResponse),
        (status = 401, description = "Missing or invalid credentials", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    security(("basicAuth" = []))
)]
pub async fn update_course(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateCourseRequest>,
) -> AppResult<StatusCode> {
    state
        .services
        .courses
        .update_course(id, payload.into())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/courses/{id} - Delete course
#[utoipa::path(
    delete,
    path = "/api/courses/{id}",
    tag = COURSE_TAG,
    params(("id" = i32, Path, description = "Course ID")),
    responses(
        (status = 204, description = "Course deleted"),
        (status = 400, description = "Malformed course id", body = ErrorResponse),
        (status = 401, description = "Missing or invalid credentials", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    security(("basicAuth" = []))
)]
pub async fn delete_course(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> AppResult<StatusCode> {
    state.services.courses.delete_course(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
