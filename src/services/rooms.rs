//! Room administration service

use crate::{
    error::AppResult,
    models::room::{CreateRoom, Room, RoomQuery, UpdateRoom},
    repository::Repository,
};

#[derive(Clone)]
pub struct RoomsService {
    repository: Repository,
}

impl RoomsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &RoomQuery) -> AppResult<Vec<Room>> {
        self.repository.rooms.list(query).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Room> {
        self.repository.rooms.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateRoom) -> AppResult<Room> {
        self.repository.rooms.create(data).await
    }

    pub async fn update(&self, id: i32, data: &UpdateRoom) -> AppResult<Room> {
        self.repository.rooms.update(id, data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.rooms.delete(id).await
    }
}
