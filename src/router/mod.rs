use std::sync::Arc;

use color_eyre::Result;
use tracing::warn;

use crate::store::Store;
use crate::store::patch::StatePatch;
use crate::store::state::{AppState, View};

pub mod guard;
pub mod location;

use guard::{SyncGuard, SyncSource};
use location::Location;

/// Parsed form of the hash: `#<view>[/<detailId>][/<page>]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub view: View,
    pub detail_id: Option<String>,
    pub page: Option<u32>,
}

/// Splits the hash on `/`. An unrecognized view falls back to the dashboard;
/// an empty detail segment counts as absent.
pub fn parse_hash(hash: &str) -> Route {
    let trimmed = hash.trim_start_matches('#');
    let mut parts = trimmed.split('/');
    let view = parts.next().and_then(View::parse).unwrap_or(View::Dash);
    let detail_id = parts
        .next()
        .filter(|segment| !segment.is_empty())
        .map(str::to_string);
    let page = parts.next().and_then(|segment| segment.parse().ok());
    Route {
        view,
        detail_id,
        page,
    }
}

/// Canonical hash for a state: view, then detail id when present, then the
/// page when it says more than the default (pages ≤ 1 keep the URL clean).
pub fn format_hash(state: &AppState) -> String {
    let mut hash = format!("#{}", state.view.as_str());
    if let Some(id) = &state.detail_id {
        hash.push('/');
        hash.push_str(id);
    }
    if state.page > 1 {
        hash.push('/');
        hash.push_str(&state.page.to_string());
    }
    hash
}

/// Keeps the hash bar and the `{view, detail_id, page}` slice of state
/// mutually consistent without feedback: each direction claims the sync
/// guard before writing and backs off when the other direction holds it.
pub struct UrlSync {
    store: Arc<Store>,
    location: Arc<Location>,
    guard: Arc<SyncGuard>,
}

impl UrlSync {
    pub fn new(store: Arc<Store>, location: Arc<Location>) -> Arc<Self> {
        Arc::new(Self {
            store,
            location,
            guard: Arc::new(SyncGuard::new()),
        })
    }

    /// Subscribes the state→URL direction and resolves a deep link: a
    /// non-default initial hash is dispatched as if it had just changed.
    pub async fn init(self: &Arc<Self>) -> Result<()> {
        let controller = self.clone();
        self.store
            .subscribe(move |state| controller.update_url(state));

        let initial = self.parse_url();
        if initial.view != View::Dash || initial.detail_id.is_some() {
            self.handle_url_change().await?;
        }
        Ok(())
    }

    pub fn parse_url(&self) -> Route {
        parse_hash(&self.location.get_hash())
    }

    /// URL→state direction, triggered on hash-change events. A no-op while a
    /// state-driven update is in flight.
    pub async fn handle_url_change(&self) -> Result<()> {
        if !self.guard.begin(SyncSource::FromUrl) {
            return Ok(());
        }
        let result = self.dispatch().await;
        self.guard.release_deferred();
        result
    }

    async fn dispatch(&self) -> Result<()> {
        let route = self.parse_url();
        let state = self.store.get_state();
        if route.view == state.view && route.detail_id == state.detail_id {
            return Ok(());
        }
        match route.detail_id {
            Some(id) => {
                self.handle_detail_change(route.view, &id, route.page.unwrap_or(1))
                    .await
            }
            None => {
                self.handle_view_change(route.view, route.page.unwrap_or(1))
                    .await
            }
        }
    }

    /// Dispatches a detail load. Album and artist ids are numeric; genre and
    /// playlist keys are opaque. A second segment under a list view is its
    /// page number.
    pub async fn handle_detail_change(&self, view: View, id: &str, page: u32) -> Result<()> {
        match view {
            View::Album => match id.parse() {
                Ok(album_id) => self.store.load_album(album_id).await,
                Err(_) => {
                    warn!(id, "non-numeric album id in URL, falling back to dashboard");
                    self.store.load_dash().await
                }
            },
            View::Artist => match id.parse() {
                Ok(artist_id) => self.store.load_artist(artist_id).await,
                Err(_) => {
                    warn!(id, "non-numeric artist id in URL, falling back to dashboard");
                    self.store.load_dash().await
                }
            },
            View::Genre => self.store.load_genre(id, page).await,
            View::Playlist => self.store.load_playlist(id).await,
            _ => {
                let page = id.parse().unwrap_or(page);
                self.handle_view_change(view, page).await
            }
        }
    }

    /// Dispatches a list load. Views without backing data just switch the
    /// view directly.
    pub async fn handle_view_change(&self, view: View, page: u32) -> Result<()> {
        match view {
            View::Library => self.store.load_library(page).await,
            View::Artists => self.store.load_artists(page).await,
            View::Albums => self.store.load_albums(page).await,
            View::Genres => self.store.load_genres(page).await,
            View::Playlists => self.store.load_playlists().await,
            _ => {
                self.store.set_state(StatePatch::new().view(view));
                Ok(())
            }
        }
    }

    /// State→URL direction, run as a store subscriber. A no-op while a
    /// URL-driven update is in flight; writes only when the canonical hash
    /// differs from the bar.
    pub fn update_url(&self, state: &AppState) {
        if !self.guard.begin(SyncSource::FromState) {
            return;
        }
        let hash = format_hash(state);
        if hash != self.location.get_hash() {
            self.location.set_hash(&hash);
        }
        self.guard.release_deferred();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_view_only() {
        let route = parse_hash("#library");
        assert_eq!(route.view, View::Library);
        assert_eq!(route.detail_id, None);
        assert_eq!(route.page, None);
    }

    #[test]
    fn parse_detail_and_page() {
        let route = parse_hash("#album/42/3");
        assert_eq!(route.view, View::Album);
        assert_eq!(route.detail_id.as_deref(), Some("42"));
        assert_eq!(route.page, Some(3));
    }

    #[test]
    fn unknown_view_falls_back_to_dashboard() {
        let route = parse_hash("#bogus/5");
        assert_eq!(route.view, View::Dash);
    }

    #[test]
    fn empty_detail_segment_is_absent() {
        let route = parse_hash("#album//3");
        assert_eq!(route.detail_id, None);
        assert_eq!(route.page, Some(3));
    }

    #[test]
    fn escaped_genre_key_stays_opaque() {
        let route = parse_hash("#genre/rock%2Ffusion/2");
        assert_eq!(route.view, View::Genre);
        assert_eq!(route.detail_id.as_deref(), Some("rock%2Ffusion"));
        assert_eq!(route.page, Some(2));
    }

    #[test]
    fn format_omits_default_page() {
        let mut state = AppState::default();
        state.view = View::Album;
        state.detail_id = Some("42".to_string());
        state.page = 0;
        assert_eq!(format_hash(&state), "#album/42");

        state.page = 3;
        assert_eq!(format_hash(&state), "#album/42/3");
    }

    #[test]
    fn format_then_parse_round_trips() {
        let mut state = AppState::default();
        state.view = View::Album;
        state.detail_id = Some("42".to_string());
        state.page = 3;
        let route = parse_hash(&format_hash(&state));
        assert_eq!(route.view, View::Album);
        assert_eq!(route.detail_id.as_deref(), Some("42"));
        assert_eq!(route.page, Some(3));

        state.page = 1;
        let route = parse_hash(&format_hash(&state));
        assert_eq!(route.page, None);
    }
}
