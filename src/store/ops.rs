use color_eyre::Result;
use futures::try_join;
use im::Vector;
use tracing::warn;

use crate::model::{Banner, GridItem, GridKind, Playlist, SearchResults, Track};
use crate::store::Store;
use crate::store::patch::StatePatch;
use crate::store::queue;
use crate::store::state::View;

/// Copy of `track` with `favorite` derived from playlist membership. Never
/// mutates its input.
pub fn match_track(track: &Track, related_playlists: &Vector<String>) -> Track {
    let mut matched = track.clone();
    matched.favorite = related_playlists.iter().any(|key| *key == matched.file_key);
    matched
}

/// Union of every playlist's member file keys. Duplicates are kept; only
/// membership matters downstream.
pub fn extract_related(playlists: &Vector<Playlist>) -> Vector<String> {
    playlists
        .iter()
        .flat_map(|p| p.related.iter().cloned())
        .collect()
}

impl Store {
    /// `match_track` against the store's current playlist membership.
    pub fn match_track(&self, track: &Track) -> Track {
        match_track(track, &self.get_state().related_playlists)
    }

    fn annotate_all(&self, tracks: &[Track]) -> Vector<Track> {
        let related = self.get_state().related_playlists.clone();
        tracks.iter().map(|t| match_track(t, &related)).collect()
    }

    pub async fn load_dash(&self) -> Result<()> {
        let items = self.api.get_dashboard().await?;
        let grid: Vector<GridItem> = items.iter().map(GridItem::from).collect();
        self.set_state(
            StatePatch::new()
                .view(View::Dash)
                .grid_kind(None)
                .detail_id(None)
                .displayed_grid(grid)
                .page(0)
                .count(0),
        );
        Ok(())
    }

    pub async fn load_library(&self, page: u32) -> Result<()> {
        let payload = self.api.get_library(page).await?;
        let tracks = self.annotate_all(&payload.records);
        self.set_state(
            StatePatch::new()
                .view(View::Library)
                .grid_kind(None)
                .detail_id(None)
                .displayed_tracks(tracks)
                .page(page)
                .count(payload.count),
        );
        Ok(())
    }

    pub async fn load_artists(&self, page: u32) -> Result<()> {
        let payload = self.api.get_artist_grid(page).await?;
        let grid: Vector<GridItem> = payload.records.iter().map(GridItem::from).collect();
        self.set_state(
            StatePatch::new()
                .view(View::Artists)
                .grid_kind(Some(GridKind::Artist))
                .detail_id(None)
                .displayed_grid(grid)
                .page(page)
                .count(payload.count),
        );
        Ok(())
    }

    pub async fn load_albums(&self, page: u32) -> Result<()> {
        let payload = self.api.get_album_grid(page).await?;
        let grid: Vector<GridItem> = payload.records.iter().map(GridItem::from).collect();
        self.set_state(
            StatePatch::new()
                .view(View::Albums)
                .grid_kind(Some(GridKind::Album))
                .detail_id(None)
                .displayed_grid(grid)
                .page(page)
                .count(payload.count),
        );
        Ok(())
    }

    pub async fn load_genres(&self, page: u32) -> Result<()> {
        let payload = self.api.get_genre_grid(page).await?;
        let grid: Vector<GridItem> = payload.records.iter().map(GridItem::from).collect();
        self.set_state(
            StatePatch::new()
                .view(View::Genres)
                .grid_kind(Some(GridKind::Genre))
                .detail_id(None)
                .displayed_grid(grid)
                .page(page)
                .count(payload.count),
        );
        Ok(())
    }

    pub async fn load_playlists(&self) -> Result<()> {
        let payload = self.api.get_playlist_grid().await?;
        let grid: Vector<GridItem> = payload.records.iter().map(GridItem::from).collect();
        self.set_state(
            StatePatch::new()
                .view(View::Playlists)
                .grid_kind(Some(GridKind::Playlist))
                .detail_id(None)
                .displayed_grid(grid)
                .page(1)
                .count(payload.count),
        );
        Ok(())
    }

    pub async fn load_album(&self, id: u64) -> Result<()> {
        let detail = self.api.get_album_detail(id).await?;
        let tracks = self.annotate_all(&detail.related.records);
        self.set_state(
            StatePatch::new()
                .view(View::Album)
                .grid_kind(None)
                .detail_id(Some(id.to_string()))
                .displayed_tracks(tracks.clone())
                .page(0)
                .count(0),
        );
        self.load_banner(&tracks).await
    }

    pub async fn load_artist(&self, id: u64) -> Result<()> {
        let detail = self.api.get_artist_detail(id).await?;
        let tracks = self.annotate_all(&detail.related.records);
        self.set_state(
            StatePatch::new()
                .view(View::Artist)
                .grid_kind(None)
                .detail_id(Some(id.to_string()))
                .displayed_tracks(tracks.clone())
                .page(0)
                .count(0),
        );
        self.load_banner(&tracks).await
    }

    /// Literal `/` in the genre key is substituted with `*` before the call;
    /// already-escaped sequences pass through untouched. The original key is
    /// kept as the detail id so the URL round-trips.
    pub async fn load_genre(&self, key: &str, page: u32) -> Result<()> {
        let escaped = key.replace('/', "*");
        let detail = self.api.get_genre_detail(&escaped, page).await?;
        let tracks = self.annotate_all(&detail.related.records);
        self.set_state(
            StatePatch::new()
                .view(View::Genre)
                .grid_kind(None)
                .detail_id(Some(key.to_string()))
                .displayed_tracks(tracks.clone())
                .page(page)
                .count(detail.related.count),
        );
        self.load_banner(&tracks).await
    }

    pub async fn load_playlist(&self, key: &str) -> Result<()> {
        let detail = self.api.get_playlist_detail(key).await?;
        let tracks = self.annotate_all(&detail.related.records);
        self.set_state(
            StatePatch::new()
                .view(View::Playlist)
                .grid_kind(None)
                .detail_id(Some(key.to_string()))
                .displayed_tracks(tracks.clone())
                .page(0)
                .count(0),
        );
        self.load_banner(&tracks).await
    }

    /// Banner step shared by the detail loads: the first track carrying an
    /// artist foreign key names the representative artist. No such track is
    /// a recognized empty case, not an error.
    async fn load_banner(&self, tracks: &Vector<Track>) -> Result<()> {
        let Some(artist_id) = tracks.iter().find_map(|t| t.artist_id) else {
            self.set_state(StatePatch::new().banner(None));
            return Ok(());
        };
        let detail = self.api.get_artist_detail(artist_id).await?;
        let banner = detail.row.first().map(|artist| Banner {
            title: artist.name.clone(),
            image: artist.image.clone(),
            caption: artist.caption.clone(),
            track_count: detail.related.count,
        });
        self.set_state(StatePatch::new().banner(banner));
        Ok(())
    }

    /// Three concurrent searches; the combined result is committed atomically
    /// or not at all.
    pub async fn search_by_param(&self, term: &str) -> Result<()> {
        let (tracks, artists, albums) = try_join!(
            self.api.search_tracks(term),
            self.api.search_artists(term),
            self.api.search_albums(term),
        )?;
        let results = SearchResults {
            tracks: self.annotate_all(&tracks.records),
            artists: artists.records.into_iter().collect(),
            albums: albums.records.into_iter().collect(),
        };
        self.set_state(
            StatePatch::new()
                .view(View::Search)
                .search_results(Some(results))
                .search_param(Some(term.to_string())),
        );
        Ok(())
    }

    /// Sole entry point for "play this list starting at this track".
    pub fn set_song_list(&self, tracks: Vector<Track>, track: Option<Track>) {
        let patch = match track {
            Some(track) => StatePatch::new()
                .song_list(tracks)
                .current_song_id(Some(track.file_key.clone()))
                .current_song(Some(track)),
            None => StatePatch::new()
                .song_list(tracks)
                .current_song_id(None)
                .current_song(None),
        };
        self.set_state(patch);
    }

    /// Moves the current track by `delta` within the queue. Out of bounds is
    /// a no-op; there is no wraparound.
    pub fn advance_track(&self, delta: isize) {
        self.update(|state| {
            let current_id = state.current_song_id.as_deref()?;
            let target = queue::advance_index(&state.song_list, current_id, delta)?;
            let track = state.song_list[target].clone();
            Some(
                StatePatch::new()
                    .current_song_id(Some(track.file_key.clone()))
                    .current_song(Some(track)),
            )
        });
    }

    /// Inserts a copy of `track` after the queued run that follows the
    /// current track, flagged `queued`.
    pub fn add_to_queue(&self, track: &Track) {
        self.update(|state| {
            let index = queue::insertion_index(&state.song_list, state.current_song_id.as_deref());
            let mut list = state.song_list.clone();
            let mut entry = track.clone();
            entry.queued = true;
            list.insert(index, entry);
            Some(StatePatch::new().song_list(list))
        });
    }

    /// Toggles the menu track's membership in `playlist`, persists it, closes
    /// the picker, and rematches favorites.
    pub async fn update_list(&self, playlist: &Playlist) -> Result<()> {
        let Some(menu_track) = self.get_state().menu_track.clone() else {
            warn!("update_list invoked with no menu track");
            return Ok(());
        };
        let mut updated = playlist.clone();
        match updated
            .related
            .iter()
            .position(|key| *key == menu_track.file_key)
        {
            Some(pos) => {
                updated.related.remove(pos);
            }
            None => updated.related.push(menu_track.file_key.clone()),
        }
        self.api.save_playlist(&updated).await?;
        self.set_state(StatePatch::new().list_open(false));
        self.rematch().await
    }

    /// Re-fetches the playlist library, recomputes membership, and
    /// re-annotates the displayed tracks.
    pub async fn rematch(&self) -> Result<()> {
        let payload = self.api.get_playlist_grid().await?;
        let lib: Vector<Playlist> = payload.records.into_iter().collect();
        let related = extract_related(&lib);
        let tracks: Vector<Track> = self
            .get_state()
            .displayed_tracks
            .iter()
            .map(|t| match_track(t, &related))
            .collect();
        self.set_state(
            StatePatch::new()
                .playlist_lib(lib)
                .related_playlists(related)
                .displayed_tracks(tracks),
        );
        Ok(())
    }

    pub fn update_settings(&self, provider: &str, name: &str, zip: &str, enabled: bool) {
        self.set_state(
            StatePatch::new()
                .announcer_provider(provider.to_string())
                .announcer_name(name.to_string())
                .announcer_zip(zip.to_string())
                .announcer_enabled(enabled),
        );
    }
}
