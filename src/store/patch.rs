use im::Vector;

use crate::model::{Banner, GridItem, GridKind, Playlist, SearchResults, Track};
use crate::store::state::{AppState, View};

/// Partial state update. Unset fields are left untouched; `previous` is
/// never patched directly, the store recomputes it on every accepted merge.
///
/// Change detection is by value: a patch whose every set field equals the
/// current state is a no-op and produces no notification.
#[derive(Debug, Clone, Default)]
pub struct StatePatch {
    view: Option<View>,
    grid_kind: Option<Option<GridKind>>,
    detail_id: Option<Option<String>>,
    page: Option<u32>,
    count: Option<u32>,
    displayed_tracks: Option<Vector<Track>>,
    displayed_grid: Option<Vector<GridItem>>,
    song_list: Option<Vector<Track>>,
    current_song_id: Option<Option<String>>,
    current_song: Option<Option<Track>>,
    related_playlists: Option<Vector<String>>,
    playlist_lib: Option<Vector<Playlist>>,
    search_results: Option<Option<SearchResults>>,
    search_param: Option<Option<String>>,
    banner: Option<Option<Banner>>,
    drawer_open: Option<bool>,
    list_open: Option<bool>,
    song_list_open: Option<bool>,
    menu_track: Option<Option<Track>>,
    announcer_provider: Option<String>,
    announcer_name: Option<String>,
    announcer_zip: Option<String>,
    announcer_enabled: Option<bool>,
}

macro_rules! setters {
    ($($name:ident: $ty:ty),* $(,)?) => {
        $(
            pub fn $name(mut self, value: $ty) -> Self {
                self.$name = Some(value);
                self
            }
        )*
    };
}

impl StatePatch {
    pub fn new() -> Self {
        Self::default()
    }

    setters! {
        view: View,
        grid_kind: Option<GridKind>,
        detail_id: Option<String>,
        page: u32,
        count: u32,
        displayed_tracks: Vector<Track>,
        displayed_grid: Vector<GridItem>,
        song_list: Vector<Track>,
        current_song_id: Option<String>,
        current_song: Option<Track>,
        related_playlists: Vector<String>,
        playlist_lib: Vector<Playlist>,
        search_results: Option<SearchResults>,
        search_param: Option<String>,
        banner: Option<Banner>,
        drawer_open: bool,
        list_open: bool,
        song_list_open: bool,
        menu_track: Option<Track>,
        announcer_provider: String,
        announcer_name: String,
        announcer_zip: String,
        announcer_enabled: bool,
    }

    /// True when at least one set field differs by value from `state`.
    pub fn changes(&self, state: &AppState) -> bool {
        macro_rules! differs {
            ($($name:ident),* $(,)?) => {
                $(
                    if let Some(value) = &self.$name {
                        if *value != state.$name {
                            return true;
                        }
                    }
                )*
            };
        }
        differs! {
            view, grid_kind, detail_id, page, count, displayed_tracks,
            displayed_grid, song_list, current_song_id, current_song,
            related_playlists, playlist_lib, search_results, search_param,
            banner, drawer_open, list_open, song_list_open, menu_track,
            announcer_provider, announcer_name, announcer_zip,
            announcer_enabled,
        }
        false
    }

    /// Merge every set field into `state`. Does not touch `previous`.
    pub fn apply(&self, state: &mut AppState) {
        macro_rules! merge {
            ($($name:ident),* $(,)?) => {
                $(
                    if let Some(value) = &self.$name {
                        state.$name = value.clone();
                    }
                )*
            };
        }
        merge! {
            view, grid_kind, detail_id, page, count, displayed_tracks,
            displayed_grid, song_list, current_song_id, current_song,
            related_playlists, playlist_lib, search_results, search_param,
            banner, drawer_open, list_open, song_list_open, menu_track,
            announcer_provider, announcer_name, announcer_zip,
            announcer_enabled,
        }
    }
}
