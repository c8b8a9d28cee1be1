use std::sync::Arc;

use color_eyre::Result;
use flume::{Receiver, Sender};
use tracing::error;

use crate::audio::announcer::{Announcer, LogAnnouncer};
use crate::audio::controller::PlaybackController;
use crate::audio::output::{AudioOutput, NullOutput};
use crate::event::events::Event;
use crate::http::MusicApi;
use crate::model::Track;
use crate::router::UrlSync;
use crate::router::location::Location;
use crate::settings::{Settings, SettingsStore};
use crate::store::Store;
use crate::store::patch::StatePatch;
use crate::store::state::View;
use crate::ui::carousel::CarouselController;
use crate::ui::toast::ToastController;

/// Wires the store, controllers, and the hash bar together and drains the
/// event bus. User actions enter through the command helpers; every state
/// change flows back out through store subscriptions.
pub struct App {
    pub store: Arc<Store>,
    pub router: Arc<UrlSync>,
    pub location: Arc<Location>,
    pub playback: PlaybackController,
    pub carousel: CarouselController,
    pub toasts: ToastController,
    settings: SettingsStore,
    pub event_tx: Sender<Event>,
    event_rx: Receiver<Event>,
    should_quit: bool,
}

impl App {
    pub fn new(api: Arc<dyn MusicApi>) -> Result<Self> {
        Self::with_audio(api, Arc::new(NullOutput), Arc::new(LogAnnouncer))
    }

    pub fn with_audio(
        api: Arc<dyn MusicApi>,
        output: Arc<dyn AudioOutput>,
        announcer: Arc<dyn Announcer>,
    ) -> Result<Self> {
        let (event_tx, event_rx) = flume::unbounded();
        let store = Arc::new(Store::new(api.clone()));
        let location = Arc::new(Location::new(event_tx.clone()));
        let router = UrlSync::new(store.clone(), location.clone());
        let playback =
            PlaybackController::new(store.clone(), api, output, announcer, event_tx.clone());
        let carousel = CarouselController::new(store.clone());
        let settings = SettingsStore::new()?;

        Ok(Self {
            store,
            router,
            location,
            playback,
            carousel,
            toasts: ToastController::new(),
            settings,
            event_tx,
            event_rx,
            should_quit: false,
        })
    }

    /// Startup order matters: the settings and playlist membership load
    /// before the first view so the first render already carries favorites,
    /// then the router resolves any deep link, and only a default route gets
    /// the dashboard.
    pub async fn init(&self) -> Result<()> {
        let settings = self.settings.load()?;
        let enabled = !settings.provider.is_empty();
        self.store
            .update_settings(&settings.provider, &settings.name, &settings.zip, enabled);

        self.store.rematch().await?;
        self.router.init().await?;

        let route = self.router.parse_url();
        if route.view == View::Dash && route.detail_id.is_none() {
            self.store.load_dash().await?;
        }
        Ok(())
    }

    pub async fn run(&mut self) -> Result<()> {
        self.init().await?;
        while !self.should_quit {
            match self.event_rx.recv_async().await {
                Ok(event) => self.handle_event(event).await,
                Err(_) => break,
            }
        }
        Ok(())
    }

    async fn handle_event(&mut self, event: Event) {
        match event {
            Event::HashChanged => {
                if let Err(error) = self.router.handle_url_change().await {
                    error!(%error, "navigation failed");
                    self.toasts.push("Unable to load that view");
                }
            }
            Event::TrackEnded => self.store.advance_track(1),
            Event::PlaybackProgress(_) => {}
            Event::PlaybackFailed(message) => self.toasts.push(&message),
            Event::Toast(message) => self.toasts.push(&message),
            Event::Quit => self.should_quit = true,
        }
    }

    /// User navigation: writing the hash enqueues the change event the run
    /// loop routes back through the URL sync controller.
    pub fn navigate(&self, hash: &str) {
        self.location.set_hash(hash);
    }

    pub fn quit(&self) {
        let _ = self.event_tx.send(Event::Quit);
    }

    pub fn open_playlist_picker(&self, track: &Track) {
        self.store.set_state(
            StatePatch::new()
                .menu_track(Some(track.clone()))
                .list_open(true),
        );
    }

    pub fn toggle_drawer(&self) {
        let open = !self.store.get_state().drawer_open;
        self.store.set_state(StatePatch::new().drawer_open(open));
    }

    pub fn toggle_queue_panel(&self) {
        let open = !self.store.get_state().song_list_open;
        self.store.set_state(StatePatch::new().song_list_open(open));
    }

    pub fn queue_track(&self, track: &Track) {
        self.store.add_to_queue(track);
        let _ = self
            .event_tx
            .send(Event::Toast(format!("Added \"{}\" to the queue", track.title)));
    }

    pub fn save_settings(&self, settings: &Settings) -> Result<()> {
        self.settings.save(settings)?;
        let enabled = !settings.provider.is_empty();
        self.store
            .update_settings(&settings.provider, &settings.name, &settings.zip, enabled);
        Ok(())
    }

    /// Leaves the settings screen back to wherever the user came from, via
    /// the URL so the matching load re-runs.
    pub fn return_to_previous(&self) {
        let state = self.store.get_state();
        let mut hash = format!("#{}", state.previous.view.as_str());
        if let Some(id) = &state.previous.id {
            hash.push('/');
            hash.push_str(id);
        }
        self.location.set_hash(&hash);
    }
}
