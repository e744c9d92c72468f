use axum::{
    Router,
    extract::{Json as ExtractJson, Path, Query, rejection::JsonRejection},
    http::{
        StatusCode,
        header::{CONTENT_TYPE, LOCATION},
    },
    response::{Json, Response},
    routing::get,
};

use mono_users::{
    MONO_USERS_ROUTE_PREFIX, UserData, UserFilter, UserView, create_user, delete_user, get_user,
    get_user_by_user_id, list_users, update_user,
};

use crate::error::IntoResponseError;

pub(super) fn router() -> Router {
    Router::new()
        .route("/", get(list_users_handler).post(create_user_handler))
        .route(
            "/{id}",
            get(get_user_handler)
                .put(update_user_handler)
                .delete(delete_user_handler),
        )
        .route("/by-userid/{user_id}", get(get_user_by_user_id_handler))
}

/// Malformed bodies are a client error whatever the rejection kind
fn body_or_bad_request(
    payload: Result<ExtractJson<UserData>, JsonRejection>,
) -> Result<UserData, (StatusCode, String)> {
    match payload {
        Ok(ExtractJson(data)) => Ok(data),
        Err(rejection) => {
            tracing::warn!("Rejected request body: {}", rejection.body_text());
            Err((StatusCode::BAD_REQUEST, rejection.body_text()))
        }
    }
}

async fn list_users_handler(
    Query(filter): Query<UserFilter>,
) -> Result<Json<Vec<UserView>>, (StatusCode, String)> {
    let users = list_users(filter).await.into_response_error()?;
    Ok(Json(users))
}

/// Create a user; responds 201 with a `Location` header pointing at the new record
async fn create_user_handler(
    payload: Result<ExtractJson<UserData>, JsonRejection>,
) -> Result<Response, (StatusCode, String)> {
    let data = body_or_bad_request(payload)?;

    let (view, id) = create_user(data).await.into_response_error()?;

    let location = format!("{}/{}", MONO_USERS_ROUTE_PREFIX.as_str(), id);
    let body = serde_json::to_string(&view)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Response::builder()
        .status(StatusCode::CREATED)
        .header(LOCATION, location)
        .header(CONTENT_TYPE, "application/json")
        .body(body.into())
        .into_response_error()
}

async fn get_user_handler(
    Path(id): Path<i64>,
) -> Result<Json<UserView>, (StatusCode, String)> {
    let user = get_user(id).await.into_response_error()?;
    Ok(Json(user))
}

async fn get_user_by_user_id_handler(
    Path(user_id): Path<String>,
) -> Result<Json<UserView>, (StatusCode, String)> {
    let user = get_user_by_user_id(&user_id).await.into_response_error()?;
    Ok(Json(user))
}

/// Apply the fields present in the body; absent fields are left unchanged
async fn update_user_handler(
    Path(id): Path<i64>,
    payload: Result<ExtractJson<UserData>, JsonRejection>,
) -> Result<Json<UserView>, (StatusCode, String)> {
    let data = body_or_bad_request(payload)?;
    let user = update_user(id, data).await.into_response_error()?;
    Ok(Json(user))
}

async fn delete_user_handler(Path(id): Path<i64>) -> Result<StatusCode, (StatusCode, String)> {
    delete_user(id).await.into_response_error()?;
    Ok(StatusCode::NO_CONTENT)
}
