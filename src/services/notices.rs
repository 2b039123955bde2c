//! Notice management service

use crate::{
    error::AppResult,
    models::notice::{CreateNotice, Notice, NoticeQuery, UpdateNotice},
    repository::Repository,
};

#[derive(Clone)]
pub struct NoticesService {
    repository: Repository,
}

impl NoticesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &NoticeQuery) -> AppResult<Vec<Notice>> {
        self.repository.notices.list(query).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Notice> {
        self.repository.notices.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateNotice, author_id: i32) -> AppResult<Notice> {
        self.repository.notices.create(data, author_id).await
    }

    pub async fn update(&self, id: i32, data: &UpdateNotice) -> AppResult<Notice> {
        self.repository.notices.update(id, data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.notices.delete(id).await
    }
}
