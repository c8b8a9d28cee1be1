mod common;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chorale::audio::announcer::Announcer;
use chorale::audio::controller::PlaybackController;
use chorale::audio::error::AudioError;
use chorale::audio::output::AudioOutput;
use chorale::audio::state::PlaybackState;
use chorale::event::events::Event;
use chorale::model::Track;
use chorale::store::Store;
use chorale::store::patch::StatePatch;
use im::vector;

use common::*;

#[derive(Default)]
struct RecordingOutput {
    log: Mutex<Vec<String>>,
    fail_load: bool,
}

impl RecordingOutput {
    fn taken(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }
}

#[async_trait]
impl AudioOutput for RecordingOutput {
    async fn load(&self, url: &str) -> Result<Duration, AudioError> {
        if self.fail_load {
            return Err(AudioError::Decode(url.to_string()));
        }
        self.log.lock().unwrap().push(format!("load {url}"));
        Ok(Duration::from_secs(3))
    }

    fn play(&self) {
        self.log.lock().unwrap().push("play".to_string());
    }

    fn pause(&self) {
        self.log.lock().unwrap().push("pause".to_string());
    }

    fn stop(&self) {
        self.log.lock().unwrap().push("stop".to_string());
    }

    fn seek(&self, _position: Duration) {}

    fn position(&self) -> Duration {
        Duration::ZERO
    }

    fn finished(&self) -> bool {
        false
    }
}

struct FailingAnnouncer;

#[async_trait]
impl Announcer for FailingAnnouncer {
    async fn announce(&self, _track: &Track, _listener_name: &str) -> color_eyre::Result<()> {
        Err(color_eyre::eyre::eyre!("speech backend offline"))
    }
}

struct SilentAnnouncer;

#[async_trait]
impl Announcer for SilentAnnouncer {
    async fn announce(&self, _track: &Track, _listener_name: &str) -> color_eyre::Result<()> {
        Ok(())
    }
}

struct Fixture {
    store: Arc<Store>,
    output: Arc<RecordingOutput>,
    controller: PlaybackController,
    event_rx: flume::Receiver<Event>,
}

fn fixture_with(output: RecordingOutput, announcer: Arc<dyn Announcer>) -> Fixture {
    let (event_tx, event_rx) = flume::unbounded();
    let api = Arc::new(MockApi::new());
    let store = Arc::new(Store::new(api.clone()));
    let output = Arc::new(output);
    let controller = PlaybackController::new(
        store.clone(),
        api,
        output.clone(),
        announcer,
        event_tx,
    );
    Fixture {
        store,
        output,
        controller,
        event_rx,
    }
}

fn fixture() -> Fixture {
    fixture_with(RecordingOutput::default(), Arc::new(SilentAnnouncer))
}

async fn settle() {
    tokio::time::sleep(Duration::from_millis(50)).await;
}

#[tokio::test]
async fn a_track_change_runs_exactly_one_transition() {
    let f = fixture();
    let a = track(1, "a");
    f.store.set_song_list(vector![a.clone(), track(2, "b")], Some(a));
    settle().await;

    assert_eq!(
        f.output.taken(),
        vec!["stop", "load https://cdn.test/a", "play"]
    );
    assert!(f.controller.is_playing());
}

#[tokio::test]
async fn unrelated_state_changes_do_not_touch_playback() {
    let f = fixture();
    let a = track(1, "a");
    f.store.set_song_list(vector![a.clone()], Some(a));
    settle().await;
    let after_start = f.output.taken().len();

    f.store.set_state(StatePatch::new().drawer_open(true));
    f.store.set_state(StatePatch::new().page(5));
    settle().await;

    assert_eq!(f.output.taken().len(), after_start);
}

#[tokio::test]
async fn rapid_track_changes_transition_serially() {
    let f = fixture();
    let a = track(1, "a");
    let b = track(2, "b");
    f.store
        .set_song_list(vector![a.clone(), b.clone()], Some(a));
    f.store.advance_track(1);
    settle().await;

    assert_eq!(
        f.output.taken(),
        vec![
            "stop",
            "load https://cdn.test/a",
            "play",
            "stop",
            "load https://cdn.test/b",
            "play",
        ]
    );
    assert_eq!(
        f.controller.current_track().map(|t| t.file_key),
        Some("b".to_string())
    );
}

#[tokio::test]
async fn clearing_the_current_track_stops_playback() {
    let f = fixture();
    let a = track(1, "a");
    f.store.set_song_list(vector![a.clone()], Some(a));
    settle().await;

    f.store.set_song_list(vector![], None);
    settle().await;

    assert_eq!(f.controller.playback_state(), PlaybackState::Stopped);
    assert_eq!(f.output.taken().last().map(String::as_str), Some("stop"));
}

#[tokio::test]
async fn an_audio_failure_resets_to_not_playing() {
    let f = fixture_with(
        RecordingOutput {
            fail_load: true,
            ..RecordingOutput::default()
        },
        Arc::new(SilentAnnouncer),
    );
    let a = track(1, "a");
    f.store.set_song_list(vector![a.clone()], Some(a));
    settle().await;

    assert!(!f.controller.is_playing());
    assert!(matches!(
        f.controller.playback_state(),
        PlaybackState::Error(_)
    ));
    let failed = f
        .event_rx
        .try_iter()
        .any(|event| matches!(event, Event::PlaybackFailed(_)));
    assert!(failed);
}

#[tokio::test]
async fn an_announcer_failure_never_blocks_playback() {
    let f = fixture_with(RecordingOutput::default(), Arc::new(FailingAnnouncer));
    f.store.update_settings("polly", "Sam", "90210", true);
    let a = track(1, "a");
    f.store.set_song_list(vector![a.clone()], Some(a));
    settle().await;

    assert!(f.controller.is_playing());
    assert_eq!(
        f.output.taken(),
        vec!["stop", "load https://cdn.test/a", "play"]
    );
}
