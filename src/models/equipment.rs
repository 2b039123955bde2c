//! Equipment catalog and lending models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::enums::EquipmentStatus;

/// Equipment record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Equipment {
    pub id: i32,
    /// Equipment name / description
    pub name: String,
    /// Category slug (e.g. "projector", "laptop", "lab", "other")
    pub category: String,
    /// Number of units owned by the department
    pub quantity: i32,
    pub status: EquipmentStatus,
    pub notes: Option<String>,
    pub crea_date: Option<DateTime<Utc>>,
    pub modif_date: Option<DateTime<Utc>>,
}

/// Create equipment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEquipment {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub category: Option<String>,
    #[validate(range(min = 0, message = "quantity cannot be negative"))]
    pub quantity: Option<i32>,
    pub notes: Option<String>,
}

/// Update equipment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateEquipment {
    pub name: Option<String>,
    pub category: Option<String>,
    #[validate(range(min = 0, message = "quantity cannot be negative"))]
    pub quantity: Option<i32>,
    pub status: Option<EquipmentStatus>,
    pub notes: Option<String>,
}

/// An equipment lending record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EquipmentLoan {
    pub id: i32,
    pub equipment_id: i32,
    pub user_id: i32,
    pub borrowed_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub returned_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

/// Borrow equipment request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateEquipmentLoan {
    pub user_id: i32,
    /// Loan length in days (defaults to 7)
    pub duration_days: Option<i64>,
    pub notes: Option<String>,
}
