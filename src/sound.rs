//! Sound player: one active audio source built from the current settings.
//!
//! Every change to volume, preset or custom source releases the old source
//! before the replacement is opened, so two sources are never playable at
//! the same time and no play call ever sees a stale volume.
//!
//! Playback failures are logged and swallowed here; the clock never sees
//! them.

use crate::config::{DEFAULT_INTERVAL_SECONDS, DEFAULT_VOLUME, MAX_INTERVAL_SECONDS, SOUND_PRESETS};
use log::{debug, info, warn};
use std::fmt;
use std::num::NonZeroU32;

/// Failure to load or start an audio source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    /// No source is currently loaded.
    NotLoaded,
    /// The source could not be constructed.
    Load(String),
    /// The host refused or failed to start playback.
    Play(String),
}

impl fmt::Display for PlaybackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackError::NotLoaded => write!(f, "No audio source loaded"),
            PlaybackError::Load(reason) => write!(f, "Audio source failed to load: {}", reason),
            PlaybackError::Play(reason) => write!(f, "Audio play failed: {}", reason),
        }
    }
}

impl std::error::Error for PlaybackError {}

/// A playable audio resource owned by the [`SoundPlayer`].
pub trait AudioSource: Sized {
    fn open(uri: &str, volume: f64) -> Result<Self, PlaybackError>;

    /// Rewind to the beginning and start playing.
    fn play_from_start(&self) -> Result<(), PlaybackError>;

    /// Stop playback and drop the underlying resource. Must be idempotent.
    fn release(&mut self);
}

#[derive(Debug, Clone, PartialEq)]
pub struct SoundConfig {
    pub enabled: bool,
    /// Always within `[0, 1]`.
    pub volume: f64,
    pub interval_seconds: NonZeroU32,
    pub selected_sound: usize,
    /// Overrides the preset when present.
    pub custom_source: Option<String>,
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            volume: DEFAULT_VOLUME,
            interval_seconds: NonZeroU32::new(DEFAULT_INTERVAL_SECONDS).unwrap_or(NonZeroU32::MIN),
            selected_sound: 0,
            custom_source: None,
        }
    }
}

impl SoundConfig {
    /// URI of the source that should be playing: the custom one if set,
    /// else the selected preset. An unknown preset index plays the first
    /// preset.
    pub fn active_uri(&self) -> &str {
        match &self.custom_source {
            Some(uri) => uri,
            None => SOUND_PRESETS
                .get(self.selected_sound)
                .unwrap_or(&SOUND_PRESETS[0])
                .url,
        }
    }
}

pub struct SoundPlayer<S: AudioSource> {
    config: SoundConfig,
    active: Option<S>,
}

impl<S: AudioSource> SoundPlayer<S> {
    pub fn new(mut config: SoundConfig) -> Self {
        if config.selected_sound >= SOUND_PRESETS.len() {
            warn!(
                "Sound preset {} does not exist, using {}",
                config.selected_sound, SOUND_PRESETS[0].name
            );
            config.selected_sound = 0;
        }
        if !(0.0..=1.0).contains(&config.volume) {
            warn!("Volume {} out of range, clamping", config.volume);
            config.volume = if config.volume.is_nan() {
                DEFAULT_VOLUME
            } else {
                config.volume.clamp(0.0, 1.0)
            };
        }
        let mut player = Self {
            config,
            active: None,
        };
        player.reload();
        player
    }

    pub fn config(&self) -> &SoundConfig {
        &self.config
    }

    pub fn active_uri(&self) -> &str {
        self.config.active_uri()
    }

    pub fn is_loaded(&self) -> bool {
        self.active.is_some()
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.config.enabled = enabled;
        debug!("Sound {}", if enabled { "enabled" } else { "disabled" });
    }

    pub fn toggle_enabled(&mut self) -> bool {
        self.set_enabled(!self.config.enabled);
        self.config.enabled
    }

    /// Returns `false` for zero or anything above [`MAX_INTERVAL_SECONDS`].
    pub fn set_interval_seconds(&mut self, seconds: u32) -> bool {
        match NonZeroU32::new(seconds) {
            Some(interval) if seconds <= MAX_INTERVAL_SECONDS => {
                self.config.interval_seconds = interval;
                debug!("Sound interval set to {}s", seconds);
                true
            }
            _ => {
                debug!("Ignoring sound interval {}s", seconds);
                false
            }
        }
    }

    pub fn set_volume(&mut self, volume: f64) {
        if volume.is_nan() {
            return;
        }
        let volume = volume.clamp(0.0, 1.0);
        if volume == self.config.volume {
            return;
        }
        self.config.volume = volume;
        self.reload();
    }

    pub fn select_sound(&mut self, index: usize) -> bool {
        if index >= SOUND_PRESETS.len() {
            debug!("Ignoring out-of-range sound preset {}", index);
            return false;
        }
        self.config.selected_sound = index;
        self.reload();
        true
    }

    /// Replace or clear the custom source. Returns the replaced URI so the
    /// host can release whatever backs it.
    pub fn set_custom_source(&mut self, uri: Option<String>) -> Option<String> {
        let previous = std::mem::replace(&mut self.config.custom_source, uri);
        self.reload();
        previous
    }

    /// Release the active source for good. Returns the custom URI, if any.
    pub fn shutdown(&mut self) -> Option<String> {
        self.release_active();
        self.config.custom_source.take()
    }

    /// Periodic sound; honours the enabled flag.
    pub fn play_tick(&self) -> bool {
        if !self.config.enabled {
            return false;
        }
        self.play("tick")
    }

    /// Completion sound; always attempted, whatever the enabled flag says.
    pub fn play_completion(&self) -> bool {
        self.play("completion")
    }

    /// Audition the configured sound from the settings panel.
    pub fn preview(&self) -> bool {
        self.play("preview")
    }

    fn play(&self, purpose: &str) -> bool {
        let result = match &self.active {
            Some(source) => source.play_from_start(),
            None => Err(PlaybackError::NotLoaded),
        };
        match result {
            Ok(()) => true,
            Err(e) => {
                warn!("{} sound: {}", purpose, e);
                false
            }
        }
    }

    fn release_active(&mut self) {
        if let Some(mut source) = self.active.take() {
            source.release();
        }
    }

    fn reload(&mut self) {
        self.release_active();
        let uri = self.config.active_uri().to_owned();
        match S::open(&uri, self.config.volume) {
            Ok(source) => {
                info!("Loaded sound {} at volume {:.1}", uri, self.config.volume);
                self.active = Some(source);
            }
            Err(e) => warn!("{}", e),
        }
    }
}

impl<S: AudioSource> Drop for SoundPlayer<S> {
    fn drop(&mut self) {
        self.release_active();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Open(String, f64),
        Play(String),
        Release(String),
    }

    thread_local! {
        static EVENTS: RefCell<Vec<Event>> = const { RefCell::new(Vec::new()) };
        static FAIL_PLAY: RefCell<bool> = const { RefCell::new(false) };
    }

    fn take_events() -> Vec<Event> {
        EVENTS.with(|e| std::mem::take(&mut *e.borrow_mut()))
    }

    fn record(event: Event) {
        EVENTS.with(|e| e.borrow_mut().push(event));
    }

    struct FakeSource {
        uri: String,
        released: bool,
    }

    impl AudioSource for FakeSource {
        fn open(uri: &str, volume: f64) -> Result<Self, PlaybackError> {
            if uri.starts_with("broken:") {
                return Err(PlaybackError::Load(uri.to_owned()));
            }
            record(Event::Open(uri.to_owned(), volume));
            Ok(Self {
                uri: uri.to_owned(),
                released: false,
            })
        }

        fn play_from_start(&self) -> Result<(), PlaybackError> {
            assert!(!self.released, "played a released source");
            if FAIL_PLAY.with(|f| *f.borrow()) {
                return Err(PlaybackError::Play("autoplay blocked".into()));
            }
            record(Event::Play(self.uri.clone()));
            Ok(())
        }

        fn release(&mut self) {
            if !self.released {
                self.released = true;
                record(Event::Release(self.uri.clone()));
            }
        }
    }

    fn player() -> SoundPlayer<FakeSource> {
        let player = SoundPlayer::new(SoundConfig::default());
        take_events();
        player
    }

    #[test]
    fn loads_first_preset_at_default_volume() {
        let _player = SoundPlayer::<FakeSource>::new(SoundConfig::default());
        assert_eq!(
            take_events(),
            vec![Event::Open(SOUND_PRESETS[0].url.to_owned(), DEFAULT_VOLUME)]
        );
    }

    #[test]
    fn volume_change_releases_before_reopening() {
        let mut player = player();
        player.set_volume(0.8);
        let url = SOUND_PRESETS[0].url.to_owned();
        assert_eq!(
            take_events(),
            vec![Event::Release(url.clone()), Event::Open(url, 0.8)]
        );
    }

    #[test]
    fn volume_is_clamped_and_unchanged_volume_keeps_source() {
        let mut player = player();
        player.set_volume(DEFAULT_VOLUME);
        player.set_volume(f64::NAN);
        assert!(take_events().is_empty());

        player.set_volume(3.0);
        assert_eq!(player.config().volume, 1.0);
        player.set_volume(-1.0);
        assert_eq!(player.config().volume, 0.0);
    }

    #[test]
    fn custom_source_overrides_preset() {
        let mut player = player();
        assert_eq!(player.set_custom_source(Some("blob:one".into())), None);
        assert_eq!(player.active_uri(), "blob:one");

        assert_eq!(
            player.set_custom_source(Some("blob:two".into())),
            Some("blob:one".into())
        );
        player.select_sound(2);
        assert_eq!(player.active_uri(), "blob:two");

        player.set_custom_source(None);
        assert_eq!(player.active_uri(), SOUND_PRESETS[2].url);
    }

    #[test]
    fn out_of_range_sound_is_ignored() {
        let mut player = player();
        assert!(!player.select_sound(SOUND_PRESETS.len()));
        assert_eq!(player.config().selected_sound, 0);
        assert!(take_events().is_empty());
    }

    #[test]
    fn unknown_initial_sound_falls_back_to_first_preset() {
        let player = SoundPlayer::<FakeSource>::new(SoundConfig {
            selected_sound: 7,
            volume: 4.0,
            ..SoundConfig::default()
        });
        assert_eq!(player.config().selected_sound, 0);
        assert_eq!(player.config().volume, 1.0);
        assert_eq!(
            take_events(),
            vec![Event::Open(SOUND_PRESETS[0].url.to_owned(), 1.0)]
        );

        let config = SoundConfig {
            selected_sound: usize::MAX,
            ..SoundConfig::default()
        };
        assert_eq!(config.active_uri(), SOUND_PRESETS[0].url);
    }

    #[test]
    fn tick_honours_enabled_but_completion_and_preview_do_not() {
        let mut player = player();
        player.set_enabled(false);
        assert!(!player.play_tick());
        assert!(player.play_completion());
        assert!(player.preview());
        assert_eq!(take_events().len(), 2);

        assert!(player.toggle_enabled());
        assert!(player.play_tick());
    }

    #[test]
    fn play_failures_are_swallowed() {
        let player = player();
        FAIL_PLAY.with(|f| *f.borrow_mut() = true);
        assert!(!player.play_tick());
        assert!(!player.play_completion());
        FAIL_PLAY.with(|f| *f.borrow_mut() = false);
        assert!(player.play_tick());
    }

    #[test]
    fn failed_load_leaves_player_unloaded() {
        let mut player = player();
        player.set_custom_source(Some("broken:file".into()));
        assert!(!player.is_loaded());
        assert!(!player.preview());

        player.set_custom_source(None);
        assert!(player.is_loaded());
    }

    #[test]
    fn interval_bounds() {
        let mut player = player();
        assert!(!player.set_interval_seconds(0));
        assert!(!player.set_interval_seconds(MAX_INTERVAL_SECONDS + 1));
        assert!(player.set_interval_seconds(5));
        assert_eq!(player.config().interval_seconds.get(), 5);
    }

    #[test]
    fn shutdown_and_drop_release_once() {
        let mut player = player();
        player.set_custom_source(Some("blob:mine".into()));
        take_events();

        assert_eq!(player.shutdown(), Some("blob:mine".into()));
        drop(player);
        assert_eq!(take_events(), vec![Event::Release("blob:mine".into())]);
    }
}
