use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use flume::{Receiver, Sender};
use tracing::{debug, warn};

use crate::audio::announcer::Announcer;
use crate::audio::commands::PlayerCommand;
use crate::audio::output::AudioOutput;
use crate::audio::progress::TrackProgress;
use crate::audio::state::PlaybackState;
use crate::event::events::Event;
use crate::http::MusicApi;
use crate::model::Track;
use crate::store::{Store, SubscriptionId};

/// Store consumer owning the audio resource. Watches `current_song_id` and
/// performs exactly one playback transition per observed change; commands
/// are consumed by a single loop, so transitions never overlap even when
/// several notifications land before the first one finishes.
pub struct PlaybackController {
    store: Arc<Store>,
    command_tx: Sender<PlayerCommand>,
    pub track_progress: Arc<TrackProgress>,
    state: Arc<RwLock<PlaybackState>>,
    subscription: SubscriptionId,
}

impl PlaybackController {
    pub fn new(
        store: Arc<Store>,
        api: Arc<dyn MusicApi>,
        output: Arc<dyn AudioOutput>,
        announcer: Arc<dyn Announcer>,
        event_tx: Sender<Event>,
    ) -> Self {
        let (command_tx, command_rx) = flume::unbounded();
        let track_progress = Arc::new(TrackProgress::new());
        let state = Arc::new(RwLock::new(PlaybackState::Stopped));

        tokio::spawn(run_loop(
            store.clone(),
            api,
            output.clone(),
            announcer,
            event_tx.clone(),
            command_rx,
            track_progress.clone(),
            state.clone(),
        ));
        start_monitor(
            output,
            event_tx,
            track_progress.clone(),
            state.clone(),
        );

        // Track-changed edge detection: compare against the last observed id,
        // not the last command sent, so unrelated state changes stay silent.
        let last_id = Arc::new(Mutex::new(store.get_state().current_song_id.clone()));
        let tx = command_tx.clone();
        let subscription = store.subscribe(move |app_state| {
            let mut last = last_id.lock().unwrap();
            if *last == app_state.current_song_id {
                return;
            }
            *last = app_state.current_song_id.clone();
            match app_state.current_song.clone() {
                Some(track) => {
                    let _ = tx.send(PlayerCommand::Transition(track));
                }
                None => {
                    let _ = tx.send(PlayerCommand::Stop);
                }
            }
        });

        Self {
            store,
            command_tx,
            track_progress,
            state,
            subscription,
        }
    }

    pub fn play(&self) {
        let _ = self.command_tx.send(PlayerCommand::Play);
    }

    pub fn pause(&self) {
        let _ = self.command_tx.send(PlayerCommand::Pause);
    }

    pub fn stop(&self) {
        let _ = self.command_tx.send(PlayerCommand::Stop);
    }

    pub fn seek(&self, position: Duration) {
        let _ = self.command_tx.send(PlayerCommand::Seek(position));
    }

    pub fn is_playing(&self) -> bool {
        matches!(*self.state.read().unwrap(), PlaybackState::Playing(_))
    }

    pub fn current_track(&self) -> Option<Track> {
        match &*self.state.read().unwrap() {
            PlaybackState::Playing(track)
            | PlaybackState::Paused(track)
            | PlaybackState::Buffering(track) => Some(track.clone()),
            PlaybackState::Stopped | PlaybackState::Error(_) => None,
        }
    }

    pub fn playback_state(&self) -> PlaybackState {
        self.state.read().unwrap().clone()
    }
}

impl Drop for PlaybackController {
    fn drop(&mut self) {
        self.store.unsubscribe(self.subscription);
    }
}

#[allow(clippy::too_many_arguments)]
async fn run_loop(
    store: Arc<Store>,
    api: Arc<dyn MusicApi>,
    output: Arc<dyn AudioOutput>,
    announcer: Arc<dyn Announcer>,
    event_tx: Sender<Event>,
    command_rx: Receiver<PlayerCommand>,
    progress: Arc<TrackProgress>,
    state: Arc<RwLock<PlaybackState>>,
) {
    while let Ok(command) = command_rx.recv_async().await {
        match command {
            PlayerCommand::Transition(track) => {
                transition(
                    &store, &api, &output, &announcer, &event_tx, &progress, &state, track,
                )
                .await;
            }
            PlayerCommand::Play => {
                let mut held = state.write().unwrap();
                if let PlaybackState::Paused(track) = held.clone() {
                    output.play();
                    *held = PlaybackState::Playing(track);
                }
            }
            PlayerCommand::Pause => {
                let mut held = state.write().unwrap();
                if let PlaybackState::Playing(track) = held.clone() {
                    output.pause();
                    *held = PlaybackState::Paused(track);
                }
            }
            PlayerCommand::Stop => {
                output.stop();
                progress.reset();
                *state.write().unwrap() = PlaybackState::Stopped;
            }
            PlayerCommand::Seek(position) => {
                output.seek(position);
                progress.set_current_position(position);
            }
        }
    }
}

/// One playback transition: stop, announce (best effort), resolve the
/// stream, load, start. Any audio failure resets to not-playing and is
/// reported on the bus; nothing here propagates.
#[allow(clippy::too_many_arguments)]
async fn transition(
    store: &Store,
    api: &Arc<dyn MusicApi>,
    output: &Arc<dyn AudioOutput>,
    announcer: &Arc<dyn Announcer>,
    event_tx: &Sender<Event>,
    progress: &TrackProgress,
    state: &RwLock<PlaybackState>,
    track: Track,
) {
    output.stop();
    progress.reset();
    *state.write().unwrap() = PlaybackState::Buffering(track.clone());

    let app_state = store.get_state();
    if app_state.announcer_enabled {
        if let Err(error) = announcer.announce(&track, &app_state.announcer_name).await {
            warn!(%error, "announcer failed, continuing playback");
        }
    }

    let source = match api.stream_url(&track.file_key).await {
        Ok(url) => url,
        Err(error) => {
            warn!(%error, file_key = %track.file_key, "stream lookup failed");
            *state.write().unwrap() = PlaybackState::Error(error.to_string());
            let _ = event_tx.send(Event::PlaybackFailed(error.to_string()));
            return;
        }
    };

    match output.load(&source).await {
        Ok(duration) => {
            let total = if duration.is_zero() {
                Duration::from_millis(track.duration_ms)
            } else {
                duration
            };
            progress.set_total_duration(total);
            output.play();
            debug!(file_key = %track.file_key, "playback transition complete");
            *state.write().unwrap() = PlaybackState::Playing(track);
        }
        Err(error) => {
            warn!(%error, file_key = %track.file_key, "audio load failed");
            *state.write().unwrap() = PlaybackState::Error(error.to_string());
            let _ = event_tx.send(Event::PlaybackFailed(error.to_string()));
        }
    }
}

fn start_monitor(
    output: Arc<dyn AudioOutput>,
    event_tx: Sender<Event>,
    progress: Arc<TrackProgress>,
    state: Arc<RwLock<PlaybackState>>,
) {
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_millis(100)).await;

            let is_playing = {
                let held = state.read().unwrap();
                matches!(*held, PlaybackState::Playing(_))
            };
            if !is_playing {
                continue;
            }

            let position = output.position();
            progress.set_current_position(position);
            let _ = event_tx.send(Event::PlaybackProgress(position.as_millis() as u64));

            if output.finished() {
                *state.write().unwrap() = PlaybackState::Stopped;
                let _ = event_tx.send(Event::TrackEnded);
            }
        }
    });
}
