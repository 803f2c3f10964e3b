use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::ports::client_repository::ClientFields;
use crate::application::use_cases::clients::create_client::CreateClient;
use crate::application::use_cases::clients::delete_client::DeleteClient;
use crate::application::use_cases::clients::enroll_client::{EnrollClient, EnrollClientError};
use crate::application::use_cases::clients::get_client::GetClient;
use crate::application::use_cases::clients::list_client_enrollments::ListClientEnrollments;
use crate::application::use_cases::clients::list_clients::ListClients;
use crate::application::use_cases::clients::update_client::{ClientPatch, UpdateClient};
use crate::bootstrap::app_context::AppContext;
use crate::domain::client as domain;
use crate::domain::client::Gender;
use crate::presentation::http::enrollments::Enrollment;
use crate::presentation::http::error::ApiError;
use crate::presentation::http::{DoubleOption, deserialize_double_option};

#[derive(Debug, Serialize, ToSchema)]
pub struct Client {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub contact_number: String,
    pub email: Option<String>,
    pub address: String,
    pub medical_history: Option<String>,
    /// Whole years as of the request date.
    pub age: i32,
    pub full_name: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<domain::Client> for Client {
    fn from(c: domain::Client) -> Self {
        let today = chrono::Utc::now().date_naive();
        Client {
            id: c.id,
            age: c.age(today),
            full_name: c.full_name(),
            first_name: c.first_name,
            last_name: c.last_name,
            date_of_birth: c.date_of_birth,
            gender: c.gender,
            contact_number: c.contact_number,
            email: c.email,
            address: c.address,
            medical_history: c.medical_history,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// Detail shape: the basic representation plus the client's enrollments,
/// eager-loaded one level deep at request time.
#[derive(Debug, Serialize, ToSchema)]
pub struct ClientDetail {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub contact_number: String,
    pub email: Option<String>,
    pub address: String,
    pub medical_history: Option<String>,
    pub age: i32,
    pub full_name: String,
    pub enrollments: Vec<Enrollment>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl ClientDetail {
    fn new(client: Client, enrollments: Vec<Enrollment>) -> Self {
        ClientDetail {
            id: client.id,
            first_name: client.first_name,
            last_name: client.last_name,
            date_of_birth: client.date_of_birth,
            gender: client.gender,
            contact_number: client.contact_number,
            email: client.email,
            address: client.address,
            medical_history: client.medical_history,
            age: client.age,
            full_name: client.full_name,
            enrollments,
            created_at: client.created_at,
            updated_at: client.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateClientRequest {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    /// One of M, F, O.
    pub gender: String,
    pub contact_number: String,
    pub email: Option<String>,
    pub address: String,
    pub medical_history: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateClientRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub contact_number: Option<String>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<String>)]
    pub email: DoubleOption<String>,
    pub address: Option<String>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<String>)]
    pub medical_history: DoubleOption<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct EnrollRequest {
    pub program_id: Uuid,
    pub enrollment_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListClientsQuery {
    pub search: Option<String>,
    pub gender: Option<String>,
}

fn validate_create(body: &CreateClientRequest) -> Result<ClientFields, ApiError> {
    let mut bad = Vec::new();
    if body.first_name.trim().is_empty() {
        bad.push("first_name".to_string());
    }
    if body.last_name.trim().is_empty() {
        bad.push("last_name".to_string());
    }
    let gender = Gender::from_code(&body.gender);
    if gender.is_none() {
        bad.push("gender".to_string());
    }
    if body.contact_number.trim().is_empty() {
        bad.push("contact_number".to_string());
    }
    if let Some(email) = body.email.as_deref() {
        if !email.contains('@') {
            bad.push("email".to_string());
        }
    }
    if body.address.trim().is_empty() {
        bad.push("address".to_string());
    }
    if !bad.is_empty() {
        return Err(ApiError::Validation(bad));
    }
    Ok(ClientFields {
        first_name: body.first_name.clone(),
        last_name: body.last_name.clone(),
        date_of_birth: body.date_of_birth,
        gender: gender.unwrap_or(Gender::Other),
        contact_number: body.contact_number.clone(),
        email: body.email.clone(),
        address: body.address.clone(),
        medical_history: body.medical_history.clone(),
    })
}

fn validate_patch(body: UpdateClientRequest) -> Result<ClientPatch, ApiError> {
    let mut bad = Vec::new();
    for (name, value) in [
        ("first_name", &body.first_name),
        ("last_name", &body.last_name),
        ("contact_number", &body.contact_number),
        ("address", &body.address),
    ] {
        if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
            bad.push(name.to_string());
        }
    }
    let gender = match body.gender.as_deref() {
        Some(code) => match Gender::from_code(code) {
            Some(g) => Some(g),
            None => {
                bad.push("gender".to_string());
                None
            }
        },
        None => None,
    };
    if let DoubleOption::Some(email) = &body.email {
        if !email.contains('@') {
            bad.push("email".to_string());
        }
    }
    if !bad.is_empty() {
        return Err(ApiError::Validation(bad));
    }
    Ok(ClientPatch {
        first_name: body.first_name,
        last_name: body.last_name,
        date_of_birth: body.date_of_birth,
        gender,
        contact_number: body.contact_number,
        email: body.email.into_patch(),
        address: body.address,
        medical_history: body.medical_history.into_patch(),
    })
}

#[utoipa::path(get, path = "/api/clients", tag = "Clients",
    params(
        ("search" = Option<String>, Query, description = "Match name, email or contact number"),
        ("gender" = Option<String>, Query, description = "Exact gender code (M, F, O)")
    ),
    responses((status = 200, body = [Client])))]
pub async fn list_clients(
    State(ctx): State<AppContext>,
    Query(q): Query<ListClientsQuery>,
) -> Result<Json<Vec<Client>>, ApiError> {
    let gender = match q.gender.as_deref() {
        Some(code) => Some(
            Gender::from_code(code)
                .ok_or_else(|| ApiError::Validation(vec!["gender".to_string()]))?,
        ),
        None => None,
    };
    let repo = ctx.client_repo();
    let uc = ListClients { repo: repo.as_ref() };
    let items = uc.execute(q.search, gender).await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

#[utoipa::path(post, path = "/api/clients", tag = "Clients",
    request_body = CreateClientRequest,
    responses((status = 201, body = Client), (status = 400)))]
pub async fn create_client(
    State(ctx): State<AppContext>,
    Json(body): Json<CreateClientRequest>,
) -> Result<(StatusCode, Json<Client>), ApiError> {
    let fields = validate_create(&body)?;
    let repo = ctx.client_repo();
    let uc = CreateClient { repo: repo.as_ref() };
    let created = uc.execute(fields).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(get, path = "/api/clients/{id}", tag = "Clients",
    params(("id" = Uuid, Path, description = "Client id")),
    responses((status = 200, body = ClientDetail), (status = 404)))]
pub async fn get_client(
    State(ctx): State<AppContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<ClientDetail>, ApiError> {
    let clients = ctx.client_repo();
    let uc = GetClient {
        repo: clients.as_ref(),
    };
    let client = uc
        .execute(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Client not found".into()))?;

    let enrollments_repo = ctx.enrollment_repo();
    let enrollments = ListClientEnrollments {
        repo: enrollments_repo.as_ref(),
    }
    .execute(id)
    .await?;

    Ok(Json(ClientDetail::new(
        client.into(),
        enrollments.into_iter().map(Into::into).collect(),
    )))
}

#[utoipa::path(put, path = "/api/clients/{id}", tag = "Clients",
    request_body = CreateClientRequest,
    responses((status = 200, body = Client), (status = 404)))]
pub async fn update_client(
    State(ctx): State<AppContext>,
    Path(id): Path<Uuid>,
    Json(body): Json<CreateClientRequest>,
) -> Result<Json<Client>, ApiError> {
    // Full replace: the create payload shape, applied to an existing row.
    let fields = validate_create(&body)?;
    let repo = ctx.client_repo();
    let uc = UpdateClient { repo: repo.as_ref() };
    let patch = ClientPatch {
        first_name: Some(fields.first_name),
        last_name: Some(fields.last_name),
        date_of_birth: Some(fields.date_of_birth),
        gender: Some(fields.gender),
        contact_number: Some(fields.contact_number),
        email: Some(fields.email),
        address: Some(fields.address),
        medical_history: Some(fields.medical_history),
    };
    let updated = uc
        .execute(id, patch)
        .await?
        .ok_or_else(|| ApiError::NotFound("Client not found".into()))?;
    Ok(Json(updated.into()))
}

#[utoipa::path(patch, path = "/api/clients/{id}", tag = "Clients",
    request_body = UpdateClientRequest,
    responses((status = 200, body = Client), (status = 404)))]
pub async fn patch_client(
    State(ctx): State<AppContext>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateClientRequest>,
) -> Result<Json<Client>, ApiError> {
    let patch = validate_patch(body)?;
    let repo = ctx.client_repo();
    let uc = UpdateClient { repo: repo.as_ref() };
    let updated = uc
        .execute(id, patch)
        .await?
        .ok_or_else(|| ApiError::NotFound("Client not found".into()))?;
    Ok(Json(updated.into()))
}

#[utoipa::path(delete, path = "/api/clients/{id}", tag = "Clients",
    responses((status = 204), (status = 404)))]
pub async fn delete_client(
    State(ctx): State<AppContext>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = ctx.client_repo();
    let uc = DeleteClient { repo: repo.as_ref() };
    if uc.execute(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Client not found".into()))
    }
}

#[utoipa::path(post, path = "/api/clients/{id}/enroll", tag = "Clients",
    request_body = EnrollRequest,
    responses(
        (status = 201, body = Enrollment),
        (status = 400, description = "Already enrolled"),
        (status = 404, description = "Client or program missing")
    ))]
pub async fn enroll_client(
    State(ctx): State<AppContext>,
    Path(id): Path<Uuid>,
    Json(body): Json<EnrollRequest>,
) -> Result<(StatusCode, Json<Enrollment>), ApiError> {
    let clients = ctx.client_repo();
    let programs = ctx.program_repo();
    let enrollments = ctx.enrollment_repo();
    let uc = EnrollClient {
        clients: clients.as_ref(),
        programs: programs.as_ref(),
        enrollments: enrollments.as_ref(),
    };
    let created = uc
        .execute(id, body.program_id, body.enrollment_date, body.notes)
        .await
        .map_err(|e| match e {
            EnrollClientError::ClientNotFound => ApiError::NotFound("Client not found".into()),
            EnrollClientError::ProgramNotFound => ApiError::NotFound("Program not found".into()),
            EnrollClientError::AlreadyEnrolled => {
                ApiError::Conflict("Client is already enrolled in this program".into())
            }
            EnrollClientError::Other(e) => ApiError::Internal(e),
        })?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(get, path = "/api/clients/{id}/enrollments", tag = "Clients",
    responses((status = 200, body = [Enrollment]), (status = 404)))]
pub async fn list_enrollments_for_client(
    State(ctx): State<AppContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Enrollment>>, ApiError> {
    let clients = ctx.client_repo();
    let get = GetClient {
        repo: clients.as_ref(),
    };
    if get.execute(id).await?.is_none() {
        return Err(ApiError::NotFound("Client not found".into()));
    }
    let repo = ctx.enrollment_repo();
    let uc = ListClientEnrollments { repo: repo.as_ref() };
    let items = uc.execute(id).await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/clients", get(list_clients).post(create_client))
        .route(
            "/clients/:id",
            get(get_client)
                .put(update_client)
                .patch(patch_client)
                .delete(delete_client),
        )
        .route("/clients/:id/enroll", post(enroll_client))
        .route("/clients/:id/enrollments", get(list_enrollments_for_client))
        .with_state(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_request() -> CreateClientRequest {
        CreateClientRequest {
            first_name: "Amina".into(),
            last_name: "Okafor".into(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            gender: "F".into(),
            contact_number: "0244000000".into(),
            email: Some("amina@example.com".into()),
            address: "12 Ridge Rd".into(),
            medical_history: None,
        }
    }

    #[test]
    fn create_accepts_valid_payload() {
        let fields = validate_create(&base_request()).unwrap();
        assert_eq!(fields.gender, Gender::Female);
    }

    #[test]
    fn create_enumerates_all_bad_fields() {
        let mut body = base_request();
        body.first_name = " ".into();
        body.gender = "X".into();
        body.email = Some("not-an-email".into());
        match validate_create(&body).unwrap_err() {
            ApiError::Validation(fields) => {
                assert_eq!(fields, vec!["first_name", "gender", "email"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn patch_null_clears_email_but_absent_keeps_it() {
        let patch = validate_patch(UpdateClientRequest {
            email: DoubleOption::Null,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(patch.email, Some(None));

        let patch = validate_patch(UpdateClientRequest::default()).unwrap();
        assert_eq!(patch.email, None);
        assert!(patch.first_name.is_none());
    }

    #[test]
    fn patch_rejects_bad_gender_code() {
        let body = UpdateClientRequest {
            gender: Some("Q".into()),
            ..Default::default()
        };
        match validate_patch(body).unwrap_err() {
            ApiError::Validation(fields) => assert_eq!(fields, vec!["gender"]),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
