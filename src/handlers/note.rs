//! 笔记 CRUD 的 HTTP 处理器

use crate::{
    auth::middleware::AuthContext,
    auth::ownership::authorize_owner,
    error::AppError,
    middleware::AppState,
    models::note::{CreateNoteRequest, UpdateNoteRequest},
    repository::NoteRepository,
};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// 列出当前用户的全部笔记
pub async fn list_notes(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
) -> Result<impl IntoResponse, AppError> {
    let repo = NoteRepository::new(state.db.clone());
    let notes = repo.list_by_owner(auth_context.user_id).await?;

    Ok(Json(notes))
}

/// 创建笔记，归属当前用户
pub async fn create_note(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Json(req): Json<CreateNoteRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let repo = NoteRepository::new(state.db.clone());
    let note = repo.create(&req, auth_context.user_id).await?;

    tracing::info!(note_id = %note.id, owner_id = %note.owner_id, "Note created");

    Ok(Json(note))
}

/// 部分更新笔记
/// 先取记录，所有权校验通过后才执行写入
pub async fn update_note(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateNoteRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let repo = NoteRepository::new(state.db.clone());
    let note = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("note not found"))?;

    authorize_owner(note.owner_id, auth_context.user_id)?;

    let note = repo
        .update(id, &req)
        .await?
        .ok_or_else(|| AppError::not_found("note not found"))?;

    Ok(Json(json!({ "note": note })))
}

/// 删除笔记
/// 先取记录，所有权校验通过后才执行删除
pub async fn delete_note(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let repo = NoteRepository::new(state.db.clone());
    let note = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("note not found"))?;

    authorize_owner(note.owner_id, auth_context.user_id)?;

    repo.delete(id).await?;

    tracing::info!(note_id = %id, owner_id = %note.owner_id, "Note deleted");

    Ok(Json(json!({
        "success": true,
        "note": note
    })))
}
