//! In-memory implementation of link repository.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Link repository keeping records in process memory.
#[derive(Default)]
pub struct MemoryLinkRepository {
    links: DashMap<String, Link>,
}

impl MemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        match self.links.entry(new_link.id.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict(
                "Unique constraint violation: links_pkey",
            )),
            Entry::Vacant(slot) => {
                let link = new_link.into_link();
                slot.insert(link.clone());
                Ok(link)
            }
        }
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Link>, AppError> {
        Ok(self.links.get(id).map(|link| link.clone()))
    }

    async fn increment_clicks(&self, id: &str) -> Result<Option<Link>, AppError> {
        Ok(self.links.get_mut(id).map(|mut link| {
            link.clicks += 1;
            link.clone()
        }))
    }

    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Link>, AppError> {
        let mut links: Vec<Link> = self
            .links
            .iter()
            .filter(|e| e.owner_id == owner_id)
            .map(|e| e.value().clone())
            .collect();

        links.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(links)
    }

    async fn update(
        &self,
        id: &str,
        original_url: &str,
        title: &str,
    ) -> Result<Option<Link>, AppError> {
        Ok(self.links.get_mut(id).map(|mut link| {
            link.original_url = original_url.to_string();
            link.title = title.to_string();
            link.clone()
        }))
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        Ok(self.links.remove(id).is_some())
    }

    async fn totals(&self) -> Result<(i64, i64), AppError> {
        let count = self.links.len() as i64;
        let clicks = self.links.iter().map(|e| e.clicks).sum::<i64>();
        Ok((count, clicks))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
