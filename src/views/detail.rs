//! Single-title detail state

use crate::anilist::{AniListClient, MediaDetail};

#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loading,
    Loaded(Box<MediaDetail>),
    NotFound,
    Failed,
}

#[derive(Debug)]
pub struct DetailView {
    id: u32,
    state: DetailState,
}

impl DetailView {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            state: DetailState::Loading,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn media(&self) -> Option<&MediaDetail> {
        match &self.state {
            DetailState::Loaded(media) => Some(media.as_ref()),
            _ => None,
        }
    }

    /// Apply a response for `id`; responses for another title are ignored
    pub fn apply(&mut self, id: u32, result: Result<Option<MediaDetail>, String>) {
        if id != self.id {
            tracing::debug!(id, showing = self.id, "Dropping detail response for another title");
            return;
        }
        self.state = match result {
            Ok(Some(media)) => DetailState::Loaded(Box::new(media)),
            Ok(None) => DetailState::NotFound,
            Err(e) => {
                tracing::error!("Detail fetch for {} failed: {}", id, e);
                DetailState::Failed
            }
        };
    }
}

pub async fn fetch_detail(
    client: AniListClient,
    id: u32,
) -> (u32, Result<Option<MediaDetail>, String>) {
    (id, client.media(id).await.map_err(|e| e.to_string()))
}
