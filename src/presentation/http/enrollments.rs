use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::ports::enrollment_repository::{EnrollmentFilter, NewEnrollment};
use crate::application::use_cases::enrollments::create_enrollment::{
    CreateEnrollment, CreateEnrollmentError,
};
use crate::application::use_cases::enrollments::delete_enrollment::DeleteEnrollment;
use crate::application::use_cases::enrollments::get_enrollment::GetEnrollment;
use crate::application::use_cases::enrollments::list_enrollments::ListEnrollments;
use crate::application::use_cases::enrollments::update_enrollment::{
    EnrollmentPatch, UpdateEnrollment, UpdateEnrollmentError,
};
use crate::bootstrap::app_context::AppContext;
use crate::domain::enrollment as domain;
use crate::presentation::http::error::ApiError;
use crate::presentation::http::{DoubleOption, deserialize_double_option};

#[derive(Debug, Serialize, ToSchema)]
pub struct Enrollment {
    pub id: Uuid,
    pub client: Uuid,
    pub program: Uuid,
    /// Resolved from the program at read time; never accepted on write.
    pub program_name: String,
    pub enrollment_date: NaiveDate,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<domain::Enrollment> for Enrollment {
    fn from(e: domain::Enrollment) -> Self {
        Enrollment {
            id: e.id,
            client: e.client_id,
            program: e.program_id,
            program_name: e.program_name,
            enrollment_date: e.enrollment_date,
            status: e.status,
            notes: e.notes,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateEnrollmentRequest {
    pub client: Uuid,
    pub program: Uuid,
    /// Defaults to the current date.
    pub enrollment_date: Option<NaiveDate>,
    /// Defaults to "Active". Free-form, no enforced vocabulary.
    pub status: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateEnrollmentRequest {
    pub client: Option<Uuid>,
    pub program: Option<Uuid>,
    pub enrollment_date: Option<NaiveDate>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<String>)]
    pub notes: DoubleOption<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListEnrollmentsQuery {
    pub client: Option<Uuid>,
    pub program: Option<Uuid>,
    pub status: Option<String>,
}

fn map_create_err(e: CreateEnrollmentError) -> ApiError {
    match e {
        CreateEnrollmentError::ClientNotFound => ApiError::NotFound("Client not found".into()),
        CreateEnrollmentError::ProgramNotFound => ApiError::NotFound("Program not found".into()),
        CreateEnrollmentError::AlreadyEnrolled => {
            ApiError::Conflict("Client is already enrolled in this program".into())
        }
        CreateEnrollmentError::Other(e) => ApiError::Internal(e),
    }
}

#[utoipa::path(get, path = "/api/enrollments", tag = "Enrollments",
    params(
        ("client" = Option<Uuid>, Query, description = "Exact client filter"),
        ("program" = Option<Uuid>, Query, description = "Exact program filter"),
        ("status" = Option<String>, Query, description = "Exact status filter")
    ),
    responses((status = 200, body = [Enrollment])))]
pub async fn list_enrollments(
    State(ctx): State<AppContext>,
    Query(q): Query<ListEnrollmentsQuery>,
) -> Result<Json<Vec<Enrollment>>, ApiError> {
    let repo = ctx.enrollment_repo();
    let uc = ListEnrollments { repo: repo.as_ref() };
    let items = uc
        .execute(EnrollmentFilter {
            client: q.client,
            program: q.program,
            status: q.status,
        })
        .await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

#[utoipa::path(post, path = "/api/enrollments", tag = "Enrollments",
    request_body = CreateEnrollmentRequest,
    responses((status = 201, body = Enrollment), (status = 400), (status = 404)))]
pub async fn create_enrollment(
    State(ctx): State<AppContext>,
    Json(body): Json<CreateEnrollmentRequest>,
) -> Result<(StatusCode, Json<Enrollment>), ApiError> {
    let clients = ctx.client_repo();
    let programs = ctx.program_repo();
    let enrollments = ctx.enrollment_repo();
    let uc = CreateEnrollment {
        clients: clients.as_ref(),
        programs: programs.as_ref(),
        enrollments: enrollments.as_ref(),
    };
    let created = uc
        .execute(NewEnrollment {
            client_id: body.client,
            program_id: body.program,
            enrollment_date: body.enrollment_date,
            status: body.status,
            notes: body.notes,
        })
        .await
        .map_err(map_create_err)?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(get, path = "/api/enrollments/{id}", tag = "Enrollments",
    params(("id" = Uuid, Path, description = "Enrollment id")),
    responses((status = 200, body = Enrollment), (status = 404)))]
pub async fn get_enrollment(
    State(ctx): State<AppContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<Enrollment>, ApiError> {
    let repo = ctx.enrollment_repo();
    let uc = GetEnrollment { repo: repo.as_ref() };
    let found = uc
        .execute(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Enrollment not found".into()))?;
    Ok(Json(found.into()))
}

#[utoipa::path(put, path = "/api/enrollments/{id}", tag = "Enrollments",
    request_body = UpdateEnrollmentRequest,
    responses((status = 200, body = Enrollment), (status = 400), (status = 404)))]
pub async fn update_enrollment(
    State(ctx): State<AppContext>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateEnrollmentRequest>,
) -> Result<Json<Enrollment>, ApiError> {
    let mut missing = Vec::new();
    if body.client.is_none() {
        missing.push("client".to_string());
    }
    if body.program.is_none() {
        missing.push("program".to_string());
    }
    if body.enrollment_date.is_none() {
        missing.push("enrollment_date".to_string());
    }
    if body.status.is_none() {
        missing.push("status".to_string());
    }
    if !missing.is_empty() {
        return Err(ApiError::Validation(missing));
    }
    // Full replace: an absent notes field clears the stored value.
    let notes = match body.notes {
        DoubleOption::Some(v) => Some(Some(v)),
        _ => Some(None),
    };
    apply_update(
        &ctx,
        id,
        EnrollmentPatch {
            client_id: body.client,
            program_id: body.program,
            enrollment_date: body.enrollment_date,
            status: body.status,
            notes,
        },
    )
    .await
}

#[utoipa::path(patch, path = "/api/enrollments/{id}", tag = "Enrollments",
    request_body = UpdateEnrollmentRequest,
    responses((status = 200, body = Enrollment), (status = 400), (status = 404)))]
pub async fn patch_enrollment(
    State(ctx): State<AppContext>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateEnrollmentRequest>,
) -> Result<Json<Enrollment>, ApiError> {
    apply_update(
        &ctx,
        id,
        EnrollmentPatch {
            client_id: body.client,
            program_id: body.program,
            enrollment_date: body.enrollment_date,
            status: body.status,
            notes: body.notes.into_patch(),
        },
    )
    .await
}

async fn apply_update(
    ctx: &AppContext,
    id: Uuid,
    patch: EnrollmentPatch,
) -> Result<Json<Enrollment>, ApiError> {
    let repo = ctx.enrollment_repo();
    let uc = UpdateEnrollment { repo: repo.as_ref() };
    let updated = uc
        .execute(id, patch)
        .await
        .map_err(|e| match e {
            UpdateEnrollmentError::AlreadyEnrolled => {
                ApiError::Conflict("Client is already enrolled in this program".into())
            }
            UpdateEnrollmentError::Other(e) => ApiError::Internal(e),
        })?
        .ok_or_else(|| ApiError::NotFound("Enrollment not found".into()))?;
    Ok(Json(updated.into()))
}

#[utoipa::path(delete, path = "/api/enrollments/{id}", tag = "Enrollments",
    responses((status = 204), (status = 404)))]
pub async fn delete_enrollment(
    State(ctx): State<AppContext>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = ctx.enrollment_repo();
    let uc = DeleteEnrollment { repo: repo.as_ref() };
    if uc.execute(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Enrollment not found".into()))
    }
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/enrollments", get(list_enrollments).post(create_enrollment))
        .route(
            "/enrollments/:id",
            get(get_enrollment)
                .put(update_enrollment)
                .patch(patch_enrollment)
                .delete(delete_enrollment),
        )
        .with_state(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn representation_carries_program_name_and_refs() {
        let e = domain::Enrollment {
            id: Uuid::new_v4(),
            client_id: Uuid::new_v4(),
            program_id: Uuid::new_v4(),
            program_name: "TB Care".into(),
            enrollment_date: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            status: "Active".into(),
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let dto: Enrollment = e.clone().into();
        assert_eq!(dto.client, e.client_id);
        assert_eq!(dto.program, e.program_id);
        assert_eq!(dto.program_name, "TB Care");
    }

    #[test]
    fn program_name_is_not_writable() {
        // Unknown fields are ignored on write; program_name only exists on
        // the response shape.
        let body: CreateEnrollmentRequest = serde_json::from_value(serde_json::json!({
            "client": Uuid::new_v4(),
            "program": Uuid::new_v4(),
            "program_name": "spoofed"
        }))
        .unwrap();
        assert!(body.enrollment_date.is_none());
        assert!(body.status.is_none());
    }

    #[test]
    fn patch_notes_null_clears_and_absent_keeps() {
        let body: UpdateEnrollmentRequest =
            serde_json::from_value(serde_json::json!({ "notes": null })).unwrap();
        assert_eq!(body.notes.into_patch(), Some(None));

        let body: UpdateEnrollmentRequest =
            serde_json::from_value(serde_json::json!({ "status": "Completed" })).unwrap();
        assert_eq!(body.notes.into_patch(), None);
        assert_eq!(body.status.as_deref(), Some("Completed"));
    }
}
