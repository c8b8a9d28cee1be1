use im::Vector;

use crate::model::{Banner, GridItem, GridKind, Playlist, SearchResults, Track};

/// Screen identifier. The string forms double as the first URL hash segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Dash,
    Library,
    Artists,
    Albums,
    Genres,
    Playlists,
    Album,
    Artist,
    Genre,
    Playlist,
    Search,
    Settings,
}

impl View {
    pub fn as_str(&self) -> &'static str {
        match self {
            View::Dash => "dash",
            View::Library => "library",
            View::Artists => "artists",
            View::Albums => "albums",
            View::Genres => "genres",
            View::Playlists => "playlists",
            View::Album => "album",
            View::Artist => "artist",
            View::Genre => "genre",
            View::Playlist => "playlist",
            View::Search => "search",
            View::Settings => "settings",
        }
    }

    pub fn parse(token: &str) -> Option<View> {
        match token {
            "dash" => Some(View::Dash),
            "library" => Some(View::Library),
            "artists" => Some(View::Artists),
            "albums" => Some(View::Albums),
            "genres" => Some(View::Genres),
            "playlists" => Some(View::Playlists),
            "album" => Some(View::Album),
            "artist" => Some(View::Artist),
            "genre" => Some(View::Genre),
            "playlist" => Some(View::Playlist),
            "search" => Some(View::Search),
            "settings" => Some(View::Settings),
            _ => None,
        }
    }
}

/// The view/detail pair in effect before the last accepted state change.
/// Recomputed on every accepted `set_state`, so rapid settings round trips
/// return to the state two steps back, not one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Previous {
    pub view: View,
    pub id: Option<String>,
}

/// The single mutable application state. Owned exclusively by the store;
/// every field change goes through `Store::set_state`.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub view: View,
    pub grid_kind: Option<GridKind>,
    pub detail_id: Option<String>,
    /// 1-based for paginated views; 0 marks a non-paginated detail view.
    pub page: u32,
    pub count: u32,
    pub displayed_tracks: Vector<Track>,
    pub displayed_grid: Vector<GridItem>,
    /// The active playback queue. Insertion order is playback order.
    pub song_list: Vector<Track>,
    /// File key of the track loaded for playback; joins `song_list` to the
    /// playback position. If set, it names an element of `song_list`.
    pub current_song_id: Option<String>,
    pub current_song: Option<Track>,
    /// Union of every playlist's member file keys. Duplicates harmless,
    /// membership is what matters.
    pub related_playlists: Vector<String>,
    pub playlist_lib: Vector<Playlist>,
    pub search_results: Option<SearchResults>,
    pub search_param: Option<String>,
    pub banner: Option<Banner>,
    pub drawer_open: bool,
    pub list_open: bool,
    pub song_list_open: bool,
    /// Track the playlist picker is acting on.
    pub menu_track: Option<Track>,
    pub announcer_provider: String,
    pub announcer_name: String,
    pub announcer_zip: String,
    pub announcer_enabled: bool,
    pub previous: Previous,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            view: View::Dash,
            grid_kind: None,
            detail_id: None,
            page: 1,
            count: 0,
            displayed_tracks: Vector::new(),
            displayed_grid: Vector::new(),
            song_list: Vector::new(),
            current_song_id: None,
            current_song: None,
            related_playlists: Vector::new(),
            playlist_lib: Vector::new(),
            search_results: None,
            search_param: None,
            banner: None,
            drawer_open: false,
            list_open: false,
            song_list_open: false,
            menu_track: None,
            announcer_provider: String::new(),
            announcer_name: String::new(),
            announcer_zip: String::new(),
            announcer_enabled: false,
            previous: Previous::default(),
        }
    }
}
