use im::Vector;
use serde::{Deserialize, Serialize};

/// A single playable track. UI identity is the numeric `id`; queue and
/// now-playing identity is the `file_key` (two list rows are never equal,
/// queue membership is by file key).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: u64,
    pub file_key: String,
    pub title: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub artist_id: Option<u64>,
    #[serde(default)]
    pub album: String,
    #[serde(default)]
    pub album_id: Option<u64>,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default)]
    pub disc_number: u32,
    #[serde(default)]
    pub track_number: u32,
    #[serde(default)]
    pub artwork: String,
    /// Derived: file key appears in at least one playlist. Never sent by the
    /// server, recomputed by the store on every playlist change.
    #[serde(default)]
    pub favorite: bool,
    /// Set only on copies inserted into the queue out of list order.
    #[serde(default)]
    pub queued: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    pub key: String,
    pub title: String,
    #[serde(default)]
    pub artwork: String,
    /// File keys of member tracks.
    #[serde(default)]
    pub related: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub caption: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub artist_id: Option<u64>,
    #[serde(default)]
    pub artwork: String,
    #[serde(default)]
    pub year: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Genre {
    pub key: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashKind {
    Artist,
    Album,
}

/// One dashboard entry, mixed artists and albums.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashItem {
    #[serde(rename = "type")]
    pub kind: DashKind,
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub image_lg: String,
}

/// Paginated wire envelope.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Paged<T> {
    pub count: u32,
    pub records: Vec<T>,
}

/// Detail wire envelope: the entity row plus its related tracks.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Detail<T> {
    pub row: Vec<T>,
    pub related: Paged<Track>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridKind {
    Artist,
    Album,
    Genre,
    Playlist,
}

/// One tile in a grid view, regardless of which entity backs it.
#[derive(Debug, Clone, PartialEq)]
pub struct GridItem {
    pub kind: GridKind,
    pub id: String,
    pub name: String,
    pub caption: String,
    pub thumbnail: String,
    pub image_lg: String,
}

impl From<&Artist> for GridItem {
    fn from(artist: &Artist) -> Self {
        Self {
            kind: GridKind::Artist,
            id: artist.id.to_string(),
            name: artist.name.clone(),
            caption: artist.caption.clone(),
            thumbnail: artist.image.clone(),
            image_lg: artist.image.clone(),
        }
    }
}

impl From<&Album> for GridItem {
    fn from(album: &Album) -> Self {
        Self {
            kind: GridKind::Album,
            id: album.id.to_string(),
            name: album.name.clone(),
            caption: album.artist.clone(),
            thumbnail: album.artwork.clone(),
            image_lg: album.artwork.clone(),
        }
    }
}

impl From<&Genre> for GridItem {
    fn from(genre: &Genre) -> Self {
        Self {
            kind: GridKind::Genre,
            id: genre.key.clone(),
            name: genre.name.clone(),
            caption: String::new(),
            thumbnail: String::new(),
            image_lg: String::new(),
        }
    }
}

impl From<&Playlist> for GridItem {
    fn from(playlist: &Playlist) -> Self {
        Self {
            kind: GridKind::Playlist,
            id: playlist.key.clone(),
            name: playlist.title.clone(),
            caption: format!("{} tracks", playlist.related.len()),
            thumbnail: playlist.artwork.clone(),
            image_lg: playlist.artwork.clone(),
        }
    }
}

impl From<&DashItem> for GridItem {
    fn from(item: &DashItem) -> Self {
        Self {
            kind: match item.kind {
                DashKind::Artist => GridKind::Artist,
                DashKind::Album => GridKind::Album,
            },
            id: item.id.to_string(),
            name: item.name.clone(),
            caption: item.caption.clone(),
            thumbnail: item.thumbnail.clone(),
            image_lg: item.image_lg.clone(),
        }
    }
}

/// Summary strip shown atop detail views.
#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    pub title: String,
    pub image: String,
    pub caption: String,
    pub track_count: u32,
}

/// Combined result of the three-way search. Committed atomically or not at
/// all.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchResults {
    pub tracks: Vector<Track>,
    pub artists: Vector<Artist>,
    pub albums: Vector<Album>,
}
