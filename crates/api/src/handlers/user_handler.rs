//! User handlers.

use std::borrow::Cow;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use common::{AppResult, ErrorResponse};
use domain::{NewUser, UserPatch, UserResponse};

use crate::extractors::{AppJson, IdPath, ValidatedJson};
use crate::state::AppState;

const MSG_NAME_REQUIRED: &str = "O nome é obrigatório.";

/// User creation request with validation.
///
/// Absent fields deserialize as empty strings so they are reported by the
/// validator alongside every other violation.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct CreateUserRequest {
    /// User display name
    #[validate(custom(function = "not_blank"))]
    #[schema(example = "Test")]
    pub name: String,
    /// User email address
    #[validate(email(message = "O e-mail informado é inválido."))]
    #[schema(example = "test@gmail.com")]
    pub email: String,
    /// User password (minimum 8 characters)
    #[validate(length(min = 8, message = "A senha deve ter pelo menos 8 caracteres."))]
    #[schema(example = "12345678", min_length = 8)]
    pub password: String,
}

/// Partial user update. At least one field must be non-empty.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    /// New display name
    #[schema(example = "Jane Doe")]
    pub name: Option<String>,
    /// New email address
    #[schema(example = "jane@gmail.com")]
    pub email: Option<String>,
}

/// Whitespace-only names count as missing.
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some(Cow::Borrowed(MSG_NAME_REQUIRED));
        return Err(error);
    }
    Ok(())
}

impl From<CreateUserRequest> for NewUser {
    fn from(request: CreateUserRequest) -> Self {
        NewUser::new(request.name, request.email, request.password)
    }
}

impl From<UpdateUserRequest> for UserPatch {
    fn from(request: UpdateUserRequest) -> Self {
        UserPatch::new(request.name, request.email)
    }
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).patch(update_user).delete(delete_user))
}

/// List all users
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "Users found", body = Vec<UserResponse>),
        (status = 204, description = "No users stored")
    )
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Response> {
    let users = state.user_service.list_users().await?;

    if users.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    let body: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
    Ok(Json(body).into_response())
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = uuid::Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 400, description = "Invalid path parameter", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<UserResponse>> {
    let user = state.user_service.get_user(id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Invalid request body", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let user = state.user_service.create_user(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Update a user's name and/or email
#[utoipa::path(
    patch,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = uuid::Uuid, Path, description = "User ID")
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Invalid request body or no field supplied", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    AppJson(payload): AppJson<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    let user = state.user_service.update_user(id, payload.into()).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = uuid::Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Invalid path parameter", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<StatusCode> {
    state.user_service.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
