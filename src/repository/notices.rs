//! Notices repository for database operations

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::notice::{CreateNotice, Notice, NoticeQuery, UpdateNotice},
};

#[derive(Clone)]
pub struct NoticesRepository {
    pool: Pool<Postgres>,
}

impl NoticesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get notice by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Notice> {
        sqlx::query_as::<_, Notice>("SELECT * FROM notices WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Notice with id {} not found", id)))
    }

    /// List notices, pinned first then newest
    pub async fn list(&self, query: &NoticeQuery) -> AppResult<Vec<Notice>> {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(20).clamp(1, 100);

        let notices = if let Some(ref category) = query.category {
            sqlx::query_as::<_, Notice>(
                r#"
                SELECT * FROM notices WHERE category = $1
                ORDER BY is_pinned DESC, crea_date DESC
                LIMIT $2 OFFSET $3
                "#,
            )
            .bind(category)
            .bind(per_page)
            .bind((page - 1) * per_page)
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query_as::<_, Notice>(
                r#"
                SELECT * FROM notices
                ORDER BY is_pinned DESC, crea_date DESC
                LIMIT $1 OFFSET $2
                "#,
            )
            .bind(per_page)
            .bind((page - 1) * per_page)
            .fetch_all(&self.pool)
            .await?
        };
        Ok(notices)
    }

    /// Create a notice
    pub async fn create(&self, data: &CreateNotice, author_id: i32) -> AppResult<Notice> {
        let notice = sqlx::query_as::<_, Notice>(
            r#"
            INSERT INTO notices (title, body, category, is_pinned, author_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&data.title)
        .bind(&data.body)
        .bind(data.category.as_deref().unwrap_or("general"))
        .bind(data.is_pinned.unwrap_or(false))
        .bind(author_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(notice)
    }

    /// Update a notice
    pub async fn update(&self, id: i32, data: &UpdateNotice) -> AppResult<Notice> {
        sqlx::query_as::<_, Notice>(
            r#"
            UPDATE notices
            SET title = COALESCE($2, title),
                body = COALESCE($3, body),
                category = COALESCE($4, category),
                is_pinned = COALESCE($5, is_pinned),
                modif_date = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&data.title)
        .bind(&data.body)
        .bind(&data.category)
        .bind(data.is_pinned)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Notice with id {} not found", id)))
    }

    /// Delete a notice
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM notices WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Notice with id {} not found", id)));
        }
        Ok(())
    }
}
