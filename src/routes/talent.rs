use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::Value;

use crate::{
    dto::talent_dto::{
        AckResponse, ApiEnvelope, BatchDeletePayload, BatchStatusPayload, ClientSearchParams,
        CreateTalentPayload, CreatedTalentResponse, ServerQueryParams, UpdateTalentPayload, WireId,
    },
    error::Result,
    models::talent::TalentId,
    services::schema_adapter::{self, AnyRecord},
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/talents",
    params(
        ("keyword" = Option<String>, Query, description = "Matches name, phone or position"),
        ("status" = Option<String>, Query, description = "Status label"),
        ("recruitmentChannel" = Option<String>, Query, description = "Channel label"),
        ("startTime" = Option<String>, Query, description = "Entry time range start (YYYY-MM-DD)"),
        ("endTime" = Option<String>, Query, description = "Entry time range end (YYYY-MM-DD)"),
        ("current" = Option<i64>, Query, description = "Page number"),
        ("pageSize" = Option<i64>, Query, description = "Items per page")
    ),
    responses(
        (status = 200, description = "Page of talents", body = Json<ClientListResponse>),
        (status = 400, description = "Invalid filter")
    )
)]
#[axum::debug_handler]
pub async fn list_talents(
    State(state): State<AppState>,
    Query(params): Query<ClientSearchParams>,
) -> Result<impl IntoResponse> {
    let response = state.talent_service.list_client(&params).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/talents",
    request_body = CreateTalentPayload,
    responses(
        (status = 201, description = "Talent created", body = Json<CreatedTalentResponse>),
        (status = 400, description = "Invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn create_talent(
    State(state): State<AppState>,
    Json(payload): Json<CreateTalentPayload>,
) -> Result<impl IntoResponse> {
    let id = state.talent_service.create(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedTalentResponse {
            success: true,
            id: id.to_string(),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/talents/{id}",
    params(
        ("id" = String, Path, description = "Talent ID")
    ),
    responses(
        (status = 200, description = "Talent found", body = Json<ClientRecord>),
        (status = 404, description = "Talent not found")
    )
)]
#[axum::debug_handler]
pub async fn get_talent(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let record = state.talent_service.get(&TalentId::new(id)).await?;
    Ok(Json(schema_adapter::to_client(&record)))
}

#[utoipa::path(
    patch,
    path = "/api/talents/{id}",
    params(
        ("id" = String, Path, description = "Talent ID")
    ),
    request_body = UpdateTalentPayload,
    responses(
        (status = 200, description = "Talent updated", body = Json<AckResponse>),
        (status = 400, description = "Invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn update_talent(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(mut payload): Json<UpdateTalentPayload>,
) -> Result<impl IntoResponse> {
    payload.id = Some(WireId::Text(id));
    state.talent_service.update(payload).await?;
    Ok(Json(AckResponse { success: true }))
}

#[utoipa::path(
    delete,
    path = "/api/talents/{id}",
    params(
        ("id" = String, Path, description = "Talent ID")
    ),
    responses(
        (status = 200, description = "Talent deleted", body = Json<AckResponse>)
    )
)]
#[axum::debug_handler]
pub async fn delete_talent(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    state.talent_service.delete(&TalentId::new(id)).await?;
    Ok(Json(AckResponse { success: true }))
}

#[utoipa::path(
    post,
    path = "/api/talents/batch-status",
    request_body = BatchStatusPayload,
    responses(
        (status = 200, description = "Statuses updated", body = Json<AckResponse>),
        (status = 400, description = "Missing ids or status")
    )
)]
#[axum::debug_handler]
pub async fn batch_update_status(
    State(state): State<AppState>,
    Json(payload): Json<BatchStatusPayload>,
) -> Result<impl IntoResponse> {
    state.talent_service.batch_update_status(payload).await?;
    Ok(Json(AckResponse { success: true }))
}

#[utoipa::path(
    post,
    path = "/api/talents/batch-delete",
    request_body = BatchDeletePayload,
    responses(
        (status = 200, description = "Talents deleted", body = Json<AckResponse>),
        (status = 400, description = "Missing ids")
    )
)]
#[axum::debug_handler]
pub async fn batch_delete(
    State(state): State<AppState>,
    Json(payload): Json<BatchDeletePayload>,
) -> Result<impl IntoResponse> {
    state.talent_service.batch_delete(payload).await?;
    Ok(Json(AckResponse { success: true }))
}

#[utoipa::path(
    get,
    path = "/api/talents/stats",
    responses(
        (status = 200, description = "Number of talents per status", body = [StatusCount])
    )
)]
#[axum::debug_handler]
pub async fn talent_stats(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let counts = state.talent_service.status_counts().await?;
    Ok(Json(counts))
}

// Backend-compatible handler. Same contract as the real talent-pool backend,
// so the mock can stand in for it.

#[utoipa::path(
    get,
    path = "/api/v2/talentpool/handler",
    params(
        ("id" = Option<String>, Query, description = "Talent ID"),
        ("keyword" = Option<String>, Query, description = "Matches name, phone or position"),
        ("statue" = Option<String>, Query, description = "Status label"),
        ("channel" = Option<String>, Query, description = "Channel label"),
        ("page" = Option<i64>, Query, description = "Page number"),
        ("per_page" = Option<i64>, Query, description = "Items per page"),
        ("start_date" = Option<String>, Query, description = "Entry time range start"),
        ("end_date" = Option<String>, Query, description = "Entry time range end")
    ),
    responses(
        (status = 200, description = "Page of talents, enveloped", body = Json<ServerListResponse>)
    )
)]
#[axum::debug_handler]
pub async fn handler_query(
    State(state): State<AppState>,
    Query(params): Query<ServerQueryParams>,
) -> Result<impl IntoResponse> {
    let response = state.talent_service.list_server(&params).await?;
    Ok(Json(ApiEnvelope::ok(response)))
}

#[utoipa::path(
    post,
    path = "/api/v2/talentpool/handler",
    request_body = ServerRecord,
    responses(
        (status = 200, description = "Talent created", body = Json<ServerRecord>),
        (status = 400, description = "Invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn handler_create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse> {
    let record = state
        .talent_service
        .create_record(AnyRecord::from_json(body)?)
        .await?;
    Ok(Json(ApiEnvelope::ok(schema_adapter::to_server(&record))))
}

#[utoipa::path(
    put,
    path = "/api/v2/talentpool/handler",
    request_body = ServerRecord,
    responses(
        (status = 200, description = "Talent updated", body = Json<AckResponse>),
        (status = 400, description = "Missing id or invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn handler_update(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse> {
    state
        .talent_service
        .update_record(AnyRecord::from_json(body)?)
        .await?;
    Ok(Json(ApiEnvelope::ok(AckResponse { success: true })))
}

#[utoipa::path(
    patch,
    path = "/api/v2/talentpool/handler",
    request_body = BatchStatusPayload,
    responses(
        (status = 200, description = "Statuses updated", body = Json<AckResponse>),
        (status = 400, description = "Missing ids or status")
    )
)]
#[axum::debug_handler]
pub async fn handler_update_status(
    State(state): State<AppState>,
    Json(payload): Json<BatchStatusPayload>,
) -> Result<impl IntoResponse> {
    state.talent_service.batch_update_status(payload).await?;
    Ok(Json(ApiEnvelope::ok(AckResponse { success: true })))
}

#[utoipa::path(
    delete,
    path = "/api/v2/talentpool/handler",
    request_body = BatchDeletePayload,
    responses(
        (status = 200, description = "Talents deleted", body = Json<AckResponse>),
        (status = 400, description = "Missing ids")
    )
)]
#[axum::debug_handler]
pub async fn handler_delete(
    State(state): State<AppState>,
    Json(payload): Json<BatchDeletePayload>,
) -> Result<impl IntoResponse> {
    state.talent_service.batch_delete(payload).await?;
    Ok(Json(ApiEnvelope::ok(AckResponse { success: true })))
}
