#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chorale::http::{ApiError, ApiResult, MusicApi};
use chorale::model::{Album, Artist, DashItem, Detail, Genre, Paged, Playlist, Track};

pub fn track(id: u64, file_key: &str) -> Track {
    Track {
        id,
        file_key: file_key.to_string(),
        title: format!("Track {file_key}"),
        artist: String::new(),
        artist_id: None,
        album: String::new(),
        album_id: None,
        genre: String::new(),
        duration_ms: 180_000,
        disc_number: 1,
        track_number: id as u32,
        artwork: String::new(),
        favorite: false,
        queued: false,
    }
}

pub fn track_with_artist(id: u64, file_key: &str, artist_id: u64) -> Track {
    let mut t = track(id, file_key);
    t.artist_id = Some(artist_id);
    t
}

pub fn artist(id: u64, name: &str) -> Artist {
    Artist {
        id,
        name: name.to_string(),
        image: format!("{name}.jpg"),
        caption: String::new(),
    }
}

pub fn album(id: u64, name: &str) -> Album {
    Album {
        id,
        name: name.to_string(),
        artist: String::new(),
        artist_id: None,
        artwork: String::new(),
        year: None,
    }
}

pub fn playlist(key: &str, related: &[&str]) -> Playlist {
    Playlist {
        key: key.to_string(),
        title: format!("Playlist {key}"),
        artwork: String::new(),
        related: related.iter().map(|k| k.to_string()).collect(),
    }
}

pub fn paged<T>(records: Vec<T>) -> Paged<T> {
    Paged {
        count: records.len() as u32,
        records,
    }
}

pub fn empty<T>() -> Paged<T> {
    Paged {
        count: 0,
        records: Vec::new(),
    }
}

pub fn detail<T>(row: Vec<T>, tracks: Vec<Track>) -> Detail<T> {
    Detail {
        row,
        related: paged(tracks),
    }
}

fn missing(what: &str) -> ApiError {
    ApiError::Status {
        status: 404,
        url: format!("mock://{what}"),
    }
}

fn unavailable(what: &str) -> ApiError {
    ApiError::Status {
        status: 500,
        url: format!("mock://{what}"),
    }
}

/// Canned data access layer. Lookups come from the keyed maps; anything not
/// seeded answers 404. Failure switches flip whole endpoints to 500.
#[derive(Default)]
pub struct MockApi {
    pub dashboard: Vec<DashItem>,
    pub dashboard_calls: AtomicUsize,
    pub library: Mutex<HashMap<u32, Paged<Track>>>,
    pub albums: Mutex<HashMap<u64, Detail<Album>>>,
    pub artists: Mutex<HashMap<u64, Detail<Artist>>>,
    pub genres: Mutex<HashMap<String, Detail<Genre>>>,
    pub genre_keys_seen: Mutex<Vec<String>>,
    pub artist_grid: Mutex<Vec<Artist>>,
    pub album_grid: Mutex<Vec<Album>>,
    pub genre_grid: Mutex<Vec<Genre>>,
    pub playlist_grid: Mutex<Vec<Playlist>>,
    pub playlist_details: Mutex<HashMap<String, Detail<Playlist>>>,
    pub saved: Mutex<Vec<Playlist>>,
    pub found_tracks: Mutex<Vec<Track>>,
    pub found_artists: Mutex<Vec<Artist>>,
    pub found_albums: Mutex<Vec<Album>>,
    pub fail_artist_search: AtomicBool,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_album(&self, id: u64, detail: Detail<Album>) {
        self.albums.lock().unwrap().insert(id, detail);
    }

    pub fn seed_artist(&self, id: u64, detail: Detail<Artist>) {
        self.artists.lock().unwrap().insert(id, detail);
    }

    pub fn seed_genre(&self, key: &str, detail: Detail<Genre>) {
        self.genres.lock().unwrap().insert(key.to_string(), detail);
    }

    pub fn seed_playlist(&self, playlist: Playlist, tracks: Vec<Track>) {
        self.playlist_details.lock().unwrap().insert(
            playlist.key.clone(),
            detail(vec![playlist.clone()], tracks),
        );
        self.playlist_grid.lock().unwrap().push(playlist);
    }

    pub fn seed_library(&self, page: u32, tracks: Paged<Track>) {
        self.library.lock().unwrap().insert(page, tracks);
    }
}

#[async_trait]
impl MusicApi for MockApi {
    async fn get_dashboard(&self) -> ApiResult<Vec<DashItem>> {
        self.dashboard_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.dashboard.clone())
    }

    async fn get_library(&self, page: u32) -> ApiResult<Paged<Track>> {
        self.library
            .lock()
            .unwrap()
            .get(&page)
            .cloned()
            .ok_or_else(|| missing("library"))
    }

    async fn get_artist_detail(&self, id: u64) -> ApiResult<Detail<Artist>> {
        self.artists
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or_else(|| missing("artist"))
    }

    async fn get_album_detail(&self, id: u64) -> ApiResult<Detail<Album>> {
        self.albums
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or_else(|| missing("album"))
    }

    async fn get_genre_detail(&self, key: &str, _page: u32) -> ApiResult<Detail<Genre>> {
        self.genre_keys_seen.lock().unwrap().push(key.to_string());
        self.genres
            .lock()
            .unwrap()
            .get(key)
            .cloned()
            .ok_or_else(|| missing("genre"))
    }

    async fn get_artist_grid(&self, _page: u32) -> ApiResult<Paged<Artist>> {
        Ok(paged(self.artist_grid.lock().unwrap().clone()))
    }

    async fn get_album_grid(&self, _page: u32) -> ApiResult<Paged<Album>> {
        Ok(paged(self.album_grid.lock().unwrap().clone()))
    }

    async fn get_genre_grid(&self, _page: u32) -> ApiResult<Paged<Genre>> {
        Ok(paged(self.genre_grid.lock().unwrap().clone()))
    }

    async fn get_playlist_grid(&self) -> ApiResult<Paged<Playlist>> {
        Ok(paged(self.playlist_grid.lock().unwrap().clone()))
    }

    async fn get_playlist_detail(&self, key: &str) -> ApiResult<Detail<Playlist>> {
        self.playlist_details
            .lock()
            .unwrap()
            .get(key)
            .cloned()
            .ok_or_else(|| missing("playlist"))
    }

    async fn search_tracks(&self, _term: &str) -> ApiResult<Paged<Track>> {
        Ok(paged(self.found_tracks.lock().unwrap().clone()))
    }

    async fn search_artists(&self, _term: &str) -> ApiResult<Paged<Artist>> {
        if self.fail_artist_search.load(Ordering::SeqCst) {
            return Err(unavailable("search/artist"));
        }
        Ok(paged(self.found_artists.lock().unwrap().clone()))
    }

    async fn search_albums(&self, _term: &str) -> ApiResult<Paged<Album>> {
        Ok(paged(self.found_albums.lock().unwrap().clone()))
    }

    async fn save_playlist(&self, playlist: &Playlist) -> ApiResult<()> {
        self.saved.lock().unwrap().push(playlist.clone());
        let mut grid = self.playlist_grid.lock().unwrap();
        match grid.iter_mut().find(|p| p.key == playlist.key) {
            Some(existing) => *existing = playlist.clone(),
            None => grid.push(playlist.clone()),
        }
        Ok(())
    }

    async fn stream_url(&self, file_key: &str) -> ApiResult<String> {
        Ok(format!("https://cdn.test/{file_key}"))
    }
}
