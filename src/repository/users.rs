//! Users repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::user::{User, UserQuery},
};

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<User> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))
    }

    /// List users (directory view) with optional filters
    pub async fn list(&self, query: &UserQuery) -> AppResult<Vec<User>> {
        let mut conditions = Vec::new();
        let mut idx = 1;

        if query.role.is_some() {
            conditions.push(format!("role = ${}", idx));
            idx += 1;
        }
        if query.department.is_some() {
            conditions.push(format!("department = ${}", idx));
            idx += 1;
        }
        if query.search.is_some() {
            conditions.push(format!(
                "(firstname ILIKE ${} OR lastname ILIKE ${})",
                idx, idx
            ));
            idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(50).clamp(1, 200);

        let sql = format!(
            "SELECT * FROM users {} ORDER BY lastname, firstname LIMIT ${} OFFSET ${}",
            where_clause,
            idx,
            idx + 1
        );

        let mut builder = sqlx::query_as::<_, User>(&sql);
        if let Some(role) = query.role {
            builder = builder.bind(role);
        }
        if let Some(ref department) = query.department {
            builder = builder.bind(department);
        }
        if let Some(ref search) = query.search {
            builder = builder.bind(format!("%{}%", search));
        }
        builder = builder.bind(per_page).bind((page - 1) * per_page);

        let users = builder.fetch_all(&self.pool).await?;
        Ok(users)
    }
}
