//! Equipment repository for database operations (catalog + lending)

use chrono::{Duration, Utc};
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        equipment::{CreateEquipment, CreateEquipmentLoan, Equipment, EquipmentLoan, UpdateEquipment},
        EquipmentStatus,
    },
};

#[derive(Clone)]
pub struct EquipmentRepository {
    pool: Pool<Postgres>,
}

impl EquipmentRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all equipment
    pub async fn list(&self) -> AppResult<Vec<Equipment>> {
        let rows = sqlx::query_as::<_, Equipment>("SELECT * FROM equipment ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get equipment by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>("SELECT * FROM equipment WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Create equipment
    pub async fn create(&self, data: &CreateEquipment) -> AppResult<Equipment> {
        let row = sqlx::query_as::<_, Equipment>(
            r#"
            INSERT INTO equipment (name, category, quantity, notes)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(data.category.as_deref().unwrap_or("other"))
        .bind(data.quantity.unwrap_or(1))
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update equipment
    pub async fn update(&self, id: i32, data: &UpdateEquipment) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>(
            r#"
            UPDATE equipment
            SET name = COALESCE($2, name),
                category = COALESCE($3, category),
                quantity = COALESCE($4, quantity),
                status = COALESCE($5, status),
                notes = COALESCE($6, notes),
                modif_date = $7
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.category)
        .bind(data.quantity)
        .bind(data.status)
        .bind(&data.notes)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Delete equipment; refused while units are out on loan
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let on_loan: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM equipment_loans WHERE equipment_id = $1 AND returned_date IS NULL)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        if on_loan {
            return Err(AppError::Conflict(
                "equipment has units out on loan and cannot be deleted".to_string(),
            ));
        }

        let result = sqlx::query("DELETE FROM equipment WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Equipment {} not found", id)));
        }
        Ok(())
    }

    /// Borrow a unit of equipment
    pub async fn create_loan(&self, equipment_id: i32, loan: &CreateEquipmentLoan) -> AppResult<EquipmentLoan> {
        let equipment = self.get_by_id(equipment_id).await?;

        if equipment.status != EquipmentStatus::Active {
            return Err(AppError::InvalidState(format!(
                "equipment is {}, not lendable",
                equipment.status
            )));
        }

        let active_loans: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM equipment_loans WHERE equipment_id = $1 AND returned_date IS NULL",
        )
        .bind(equipment_id)
        .fetch_one(&self.pool)
        .await?;

        if active_loans >= equipment.quantity as i64 {
            return Err(AppError::Conflict(format!(
                "all {} units are currently out on loan",
                equipment.quantity
            )));
        }

        let now = Utc::now();
        let due_date = now + Duration::days(loan.duration_days.unwrap_or(7));

        let created = sqlx::query_as::<_, EquipmentLoan>(
            r#"
            INSERT INTO equipment_loans (equipment_id, user_id, borrowed_date, due_date, notes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(equipment_id)
        .bind(loan.user_id)
        .bind(now)
        .bind(due_date)
        .bind(&loan.notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    /// Return a borrowed unit
    pub async fn return_loan(&self, loan_id: i32) -> AppResult<EquipmentLoan> {
        let loan = sqlx::query_as::<_, EquipmentLoan>("SELECT * FROM equipment_loans WHERE id = $1")
            .bind(loan_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment loan {} not found", loan_id)))?;

        if loan.returned_date.is_some() {
            return Err(AppError::InvalidState("loan already returned".to_string()));
        }

        let updated = sqlx::query_as::<_, EquipmentLoan>(
            r#"
            UPDATE equipment_loans SET returned_date = $2
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(loan_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(updated)
    }

    /// Active loans for a user
    pub async fn list_user_loans(&self, user_id: i32) -> AppResult<Vec<EquipmentLoan>> {
        let loans = sqlx::query_as::<_, EquipmentLoan>(
            r#"
            SELECT * FROM equipment_loans
            WHERE user_id = $1 AND returned_date IS NULL
            ORDER BY borrowed_date
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(loans)
    }
}
