use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::sync::OnceCell;

use crate::model::{Album, Artist, DashItem, Detail, Genre, Paged, Playlist, Track};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("malformed response from {url}: {source}")]
    Decode { url: String, source: reqwest::Error },
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Data access contract the store consumes. Pure request/response, no state
/// beyond the dashboard request cache.
#[async_trait]
pub trait MusicApi: Send + Sync {
    async fn get_dashboard(&self) -> ApiResult<Vec<DashItem>>;
    async fn get_library(&self, page: u32) -> ApiResult<Paged<Track>>;
    async fn get_artist_detail(&self, id: u64) -> ApiResult<Detail<Artist>>;
    async fn get_album_detail(&self, id: u64) -> ApiResult<Detail<Album>>;
    /// `key` arrives with literal `/` already substituted by `*` (server
    /// path-segment escaping convention).
    async fn get_genre_detail(&self, key: &str, page: u32) -> ApiResult<Detail<Genre>>;
    async fn get_artist_grid(&self, page: u32) -> ApiResult<Paged<Artist>>;
    async fn get_album_grid(&self, page: u32) -> ApiResult<Paged<Album>>;
    async fn get_genre_grid(&self, page: u32) -> ApiResult<Paged<Genre>>;
    async fn get_playlist_grid(&self) -> ApiResult<Paged<Playlist>>;
    async fn get_playlist_detail(&self, key: &str) -> ApiResult<Detail<Playlist>>;
    async fn search_tracks(&self, term: &str) -> ApiResult<Paged<Track>>;
    async fn search_artists(&self, term: &str) -> ApiResult<Paged<Artist>>;
    async fn search_albums(&self, term: &str) -> ApiResult<Paged<Album>>;
    /// Idempotent upsert by playlist key.
    async fn save_playlist(&self, playlist: &Playlist) -> ApiResult<()>;
    async fn stream_url(&self, file_key: &str) -> ApiResult<String>;
}

#[derive(Debug, Deserialize)]
struct StreamInfo {
    url: String,
}

/// REST implementation over reqwest.
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
    /// In-flight and completed dashboard requests share one fetch.
    dashboard: OnceCell<Vec<DashItem>>,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            dashboard: OnceCell::new(),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = format!("{}/{}", self.base_url, path);
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url,
            });
        }
        response
            .json()
            .await
            .map_err(|source| ApiError::Decode { url, source })
    }
}

#[async_trait]
impl MusicApi for HttpApi {
    async fn get_dashboard(&self) -> ApiResult<Vec<DashItem>> {
        self.dashboard
            .get_or_try_init(|| self.get_json("dashboard"))
            .await
            .cloned()
    }

    async fn get_library(&self, page: u32) -> ApiResult<Paged<Track>> {
        self.get_json(&format!("library?page={page}")).await
    }

    async fn get_artist_detail(&self, id: u64) -> ApiResult<Detail<Artist>> {
        self.get_json(&format!("artists/{id}")).await
    }

    async fn get_album_detail(&self, id: u64) -> ApiResult<Detail<Album>> {
        self.get_json(&format!("albums/{id}")).await
    }

    async fn get_genre_detail(&self, key: &str, page: u32) -> ApiResult<Detail<Genre>> {
        self.get_json(&format!("genres/{key}?page={page}")).await
    }

    async fn get_artist_grid(&self, page: u32) -> ApiResult<Paged<Artist>> {
        self.get_json(&format!("artists?page={page}")).await
    }

    async fn get_album_grid(&self, page: u32) -> ApiResult<Paged<Album>> {
        self.get_json(&format!("albums?page={page}")).await
    }

    async fn get_genre_grid(&self, page: u32) -> ApiResult<Paged<Genre>> {
        self.get_json(&format!("genres?page={page}")).await
    }

    async fn get_playlist_grid(&self) -> ApiResult<Paged<Playlist>> {
        self.get_json("playlists").await
    }

    async fn get_playlist_detail(&self, key: &str) -> ApiResult<Detail<Playlist>> {
        self.get_json(&format!("playlists/{key}")).await
    }

    async fn search_tracks(&self, term: &str) -> ApiResult<Paged<Track>> {
        self.get_json(&format!("search/music?term={term}")).await
    }

    async fn search_artists(&self, term: &str) -> ApiResult<Paged<Artist>> {
        self.get_json(&format!("search/artist?term={term}")).await
    }

    async fn search_albums(&self, term: &str) -> ApiResult<Paged<Album>> {
        self.get_json(&format!("search/album?term={term}")).await
    }

    async fn save_playlist(&self, playlist: &Playlist) -> ApiResult<()> {
        let url = format!("{}/playlists/{}", self.base_url, playlist.key);
        let response = self.client.put(&url).json(playlist).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url,
            });
        }
        Ok(())
    }

    async fn stream_url(&self, file_key: &str) -> ApiResult<String> {
        let info: StreamInfo = self.get_json(&format!("stream/{file_key}")).await?;
        Ok(info.url)
    }
}
