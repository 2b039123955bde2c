//! Equipment catalog and lending service

use crate::{
    error::AppResult,
    models::equipment::{
        CreateEquipment, CreateEquipmentLoan, Equipment, EquipmentLoan, UpdateEquipment,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct EquipmentService {
    repository: Repository,
}

impl EquipmentService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Equipment>> {
        self.repository.equipment.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Equipment> {
        self.repository.equipment.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateEquipment) -> AppResult<Equipment> {
        self.repository.equipment.create(data).await
    }

    pub async fn update(&self, id: i32, data: &UpdateEquipment) -> AppResult<Equipment> {
        self.repository.equipment.update(id, data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.equipment.delete(id).await
    }

    /// Lend a unit to a user
    pub async fn borrow(&self, equipment_id: i32, loan: &CreateEquipmentLoan) -> AppResult<EquipmentLoan> {
        // Verify user exists
        self.repository.users.get_by_id(loan.user_id).await?;
        self.repository.equipment.create_loan(equipment_id, loan).await
    }

    /// Return a borrowed unit
    pub async fn return_loan(&self, loan_id: i32) -> AppResult<EquipmentLoan> {
        self.repository.equipment.return_loan(loan_id).await
    }

    /// Active loans for a user
    pub async fn user_loans(&self, user_id: i32) -> AppResult<Vec<EquipmentLoan>> {
        self.repository.users.get_by_id(user_id).await?;
        self.repository.equipment.list_user_loans(user_id).await
    }
}
