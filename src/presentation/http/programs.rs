use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::use_cases::programs::create_program::CreateProgram;
use crate::application::use_cases::programs::delete_program::DeleteProgram;
use crate::application::use_cases::programs::get_program::GetProgram;
use crate::application::use_cases::programs::list_programs::ListPrograms;
use crate::application::use_cases::programs::update_program::UpdateProgram;
use crate::bootstrap::app_context::AppContext;
use crate::domain::program::HealthProgram;
use crate::presentation::http::error::ApiError;

#[derive(Debug, Serialize, ToSchema)]
pub struct Program {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<HealthProgram> for Program {
    fn from(p: HealthProgram) -> Self {
        Program {
            id: p.id,
            name: p.name,
            description: p.description,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProgramRequest {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateProgramRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListProgramsQuery {
    pub search: Option<String>,
}

fn validate(name: Option<&str>, description: Option<&str>, require_all: bool) -> Result<(), ApiError> {
    let mut fields = Vec::new();
    match name {
        Some(n) if n.trim().is_empty() => fields.push("name".to_string()),
        None if require_all => fields.push("name".to_string()),
        _ => {}
    }
    match description {
        Some(d) if d.trim().is_empty() => fields.push("description".to_string()),
        None if require_all => fields.push("description".to_string()),
        _ => {}
    }
    if fields.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation(fields))
    }
}

#[utoipa::path(get, path = "/api/programs", tag = "Programs",
    params(("search" = Option<String>, Query, description = "Match name or description")),
    responses((status = 200, body = [Program])))]
pub async fn list_programs(
    State(ctx): State<AppContext>,
    Query(q): Query<ListProgramsQuery>,
) -> Result<Json<Vec<Program>>, ApiError> {
    let repo = ctx.program_repo();
    let uc = ListPrograms { repo: repo.as_ref() };
    let items = uc.execute(q.search).await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

#[utoipa::path(post, path = "/api/programs", tag = "Programs",
    request_body = CreateProgramRequest,
    responses((status = 201, body = Program)))]
pub async fn create_program(
    State(ctx): State<AppContext>,
    Json(body): Json<CreateProgramRequest>,
) -> Result<(StatusCode, Json<Program>), ApiError> {
    validate(Some(&body.name), Some(&body.description), true)?;
    let repo = ctx.program_repo();
    let uc = CreateProgram { repo: repo.as_ref() };
    let created = uc.execute(&body.name, &body.description).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(get, path = "/api/programs/{id}", tag = "Programs",
    params(("id" = Uuid, Path, description = "Program id")),
    responses((status = 200, body = Program), (status = 404)))]
pub async fn get_program(
    State(ctx): State<AppContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<Program>, ApiError> {
    let repo = ctx.program_repo();
    let uc = GetProgram { repo: repo.as_ref() };
    let program = uc
        .execute(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Program not found".into()))?;
    Ok(Json(program.into()))
}

#[utoipa::path(put, path = "/api/programs/{id}", tag = "Programs",
    request_body = UpdateProgramRequest,
    responses((status = 200, body = Program), (status = 404)))]
pub async fn update_program(
    State(ctx): State<AppContext>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateProgramRequest>,
) -> Result<Json<Program>, ApiError> {
    validate(body.name.as_deref(), body.description.as_deref(), true)?;
    apply_update(&ctx, id, body).await
}

#[utoipa::path(patch, path = "/api/programs/{id}", tag = "Programs",
    request_body = UpdateProgramRequest,
    responses((status = 200, body = Program), (status = 404)))]
pub async fn patch_program(
    State(ctx): State<AppContext>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateProgramRequest>,
) -> Result<Json<Program>, ApiError> {
    validate(body.name.as_deref(), body.description.as_deref(), false)?;
    apply_update(&ctx, id, body).await
}

async fn apply_update(
    ctx: &AppContext,
    id: Uuid,
    body: UpdateProgramRequest,
) -> Result<Json<Program>, ApiError> {
    let repo = ctx.program_repo();
    let uc = UpdateProgram { repo: repo.as_ref() };
    let updated = uc
        .execute(id, body.name, body.description)
        .await?
        .ok_or_else(|| ApiError::NotFound("Program not found".into()))?;
    Ok(Json(updated.into()))
}

#[utoipa::path(delete, path = "/api/programs/{id}", tag = "Programs",
    responses((status = 204), (status = 404)))]
pub async fn delete_program(
    State(ctx): State<AppContext>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = ctx.program_repo();
    let uc = DeleteProgram { repo: repo.as_ref() };
    if uc.execute(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Program not found".into()))
    }
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/programs", get(list_programs).post(create_program))
        .route(
            "/programs/:id",
            get(get_program)
                .put(update_program)
                .patch(patch_program)
                .delete(delete_program),
        )
        .with_state(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_rejects_blank_fields() {
        let err = validate(Some("  "), Some("desc"), true).unwrap_err();
        match err {
            ApiError::Validation(fields) => assert_eq!(fields, vec!["name"]),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn put_requires_all_fields() {
        let err = validate(Some("Malaria Control"), None, true).unwrap_err();
        match err {
            ApiError::Validation(fields) => assert_eq!(fields, vec!["description"]),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn patch_accepts_partial() {
        assert!(validate(Some("Malaria Control"), None, false).is_ok());
        assert!(validate(None, None, false).is_ok());
    }
}
