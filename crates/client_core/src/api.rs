//! The remote rooms service, as seen by the controller.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use shared::{
    domain::{ChatMessage, RoomName},
    protocol::{MessagesResponse, RoomsResponse},
};
use tracing::debug;
use url::Url;

use crate::error::{BaseUrlError, FetchError};

#[async_trait]
pub trait RoomsApi: Send + Sync {
    async fn fetch_rooms(&self) -> Result<Vec<RoomName>, FetchError>;
    async fn fetch_messages(&self, room: &RoomName) -> Result<Vec<ChatMessage>, FetchError>;
}

/// `RoomsApi` over plain HTTP GETs.
///
/// The HTTP status is not consulted: the body's `success` flag is the only
/// signal, so an error page that is not JSON surfaces as
/// [`FetchError::Malformed`].
pub struct HttpRoomsApi {
    http: Client,
    base_url: Url,
}

impl HttpRoomsApi {
    pub fn new(base_url: &str) -> Result<Self, BaseUrlError> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: &str) -> Result<Self, BaseUrlError> {
        let base_url = Url::parse(base_url.trim())?;
        if base_url.cannot_be_a_base() {
            return Err(BaseUrlError::NotHierarchical(base_url.to_string()));
        }
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn rooms_url(&self) -> Url {
        self.endpoint(&["rooms"])
    }

    /// The room name is encoded as a single path segment.
    pub fn messages_url(&self, room: &RoomName) -> Url {
        self.endpoint(&["messages", room.as_str()])
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // `with_client` rejects cannot-be-a-base urls, so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        debug!(%url, "GET");
        let body = self.http.get(url).send().await?.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl RoomsApi for HttpRoomsApi {
    async fn fetch_rooms(&self) -> Result<Vec<RoomName>, FetchError> {
        let body: RoomsResponse = self.get_json(self.rooms_url()).await?;
        Ok(body.into_rooms()?)
    }

    async fn fetch_messages(&self, room: &RoomName) -> Result<Vec<ChatMessage>, FetchError> {
        let body: MessagesResponse = self.get_json(self.messages_url(room)).await?;
        Ok(body.into_messages()?)
    }
}

#[cfg(test)]
#[path = "tests/api_tests.rs"]
mod tests;
