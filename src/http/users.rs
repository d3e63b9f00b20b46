use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::{info, instrument};

use super::{ApiError, ApiResult, AppState};
use crate::domain::{User, UserCreate, UserPatch};
use crate::user_actor::UserError;

/// Request body for create and replace. Any `id` sent by the caller is ignored.
#[derive(Debug, Default, Deserialize)]
pub struct UserBody {
    pub name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
}

impl UserBody {
    fn into_fields(self) -> ApiResult<(String, String, String)> {
        let name = self
            .name
            .ok_or_else(|| ApiError::bad_request("Missing required field: name"))?;
        let email = self
            .email
            .ok_or_else(|| ApiError::bad_request("Missing required field: email"))?;
        Ok((name, email, self.department.unwrap_or_default()))
    }
}

impl TryFrom<UserBody> for UserCreate {
    type Error = ApiError;

    fn try_from(body: UserBody) -> ApiResult<Self> {
        let (name, email, department) = body.into_fields()?;
        Ok(UserCreate::new(name, email, department))
    }
}

impl TryFrom<UserBody> for UserPatch {
    type Error = ApiError;

    fn try_from(body: UserBody) -> ApiResult<Self> {
        let (name, email, department) = body.into_fields()?;
        Ok(UserPatch::new(name, email, department))
    }
}

pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    let users = state.users.list_users().await?;
    Ok(Json(users))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
) -> ApiResult<Json<User>> {
    let Path(id) = id?;
    let user = state
        .users
        .get_user(id)
        .await?
        .ok_or(UserError::NotFound(id))?;
    Ok(Json(user))
}

#[instrument(skip(state, body))]
pub async fn create_user(
    State(state): State<AppState>,
    body: Result<Json<UserBody>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let Json(body) = body?;
    let user = state.users.create_user(body.try_into()?).await?;
    info!(user_id = user.id, "User created");
    Ok((StatusCode::CREATED, Json(user)))
}

#[instrument(skip(state, body))]
pub async fn update_user(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
    body: Result<Json<UserBody>, JsonRejection>,
) -> ApiResult<Json<User>> {
    let Path(id) = id?;
    let Json(body) = body?;
    let user = state
        .users
        .update_user(id, body.try_into()?)
        .await?
        .ok_or(UserError::NotFound(id))?;
    Ok(Json(user))
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = id?;
    if state.users.delete_user(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(UserError::NotFound(id).into())
    }
}
