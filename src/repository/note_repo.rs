//! Note repository (数据库访问层)

use crate::{
    error::AppError,
    models::note::{CreateNoteRequest, Note, UpdateNoteRequest},
};
use sqlx::PgPool;
use uuid::Uuid;

pub struct NoteRepository {
    db: PgPool,
}

impl NoteRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// 列出某个用户的全部笔记
    pub async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Note>, AppError> {
        let notes = sqlx::query_as::<_, Note>(
            "SELECT * FROM notes WHERE owner_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.db)
        .await?;

        Ok(notes)
    }

    /// 根据 ID 查找笔记
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Note>, AppError> {
        let note = sqlx::query_as::<_, Note>("SELECT * FROM notes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(note)
    }

    /// 创建笔记，owner_id 在此一次性写入
    pub async fn create(
        &self,
        req: &CreateNoteRequest,
        owner_id: Uuid,
    ) -> Result<Note, AppError> {
        let note = sqlx::query_as::<_, Note>(
            r#"
            INSERT INTO notes (title, description, tag, owner_id)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&req.title)
        .bind(&req.description)
        .bind(&req.tag)
        .bind(owner_id)
        .fetch_one(&self.db)
        .await?;

        Ok(note)
    }

    /// 部分更新笔记
    /// SET 列表不包含 owner_id，所有权在存储层面不可变
    pub async fn update(
        &self,
        id: Uuid,
        req: &UpdateNoteRequest,
    ) -> Result<Option<Note>, AppError> {
        let note = sqlx::query_as::<_, Note>(
            r#"
            UPDATE notes
            SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                tag = COALESCE($4, tag),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&req.title)
        .bind(&req.description)
        .bind(&req.tag)
        .fetch_optional(&self.db)
        .await?;

        Ok(note)
    }

    /// 删除笔记
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
