//! Music controls state.

use std::path::{Path, PathBuf};

use crate::config::AudioConfig;
use crate::error::FocusError;

use super::backend::AudioBackend;
use super::noise::render_white_noise;

/// File extensions accepted as custom audio.
pub const AUDIO_EXTENSIONS: [&str; 8] = ["mp3", "wav", "ogg", "oga", "flac", "m4a", "aac", "opus"];

/// Display name used for a user-supplied file.
pub const CUSTOM_TRACK_NAME: &str = "Custom Track";

/// Sounds generated on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinSound {
    /// Soft white noise.
    WhiteNoise,
}

impl BuiltinSound {
    /// Cache file name.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::WhiteNoise => "white-noise.wav",
        }
    }

    /// Path of the rendered sound, creating it if missing.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub fn ensure_rendered(self, cache_dir: &Path) -> Result<PathBuf, FocusError> {
        let path = cache_dir.join(self.file_name());
        if !path.exists() {
            match self {
                Self::WhiteNoise => render_white_noise(&path)?,
            }
        }
        Ok(path)
    }
}

/// A built-in ambient track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Track {
    /// Display name.
    pub name: &'static str,
    /// What to play.
    pub sound: BuiltinSound,
}

/// Built-in tracks.
pub const AMBIENT_TRACKS: [Track; 1] = [Track {
    name: "White Noise",
    sound: BuiltinSound::WhiteNoise,
}];

/// Whether the path looks like an audio file we can hand to a player.
#[must_use]
pub fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| AUDIO_EXTENSIONS.contains(&ext.as_str()))
}

/// Play/pause, track selection, custom file, volume and mute.
pub struct MusicControls {
    backend: Box<dyn AudioBackend>,
    cache_dir: PathBuf,
    current_track: usize,
    custom_file: Option<PathBuf>,
    volume: f32,
    muted: bool,
    playing: bool,
}

impl std::fmt::Debug for MusicControls {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MusicControls")
            .field("current_track", &self.current_track)
            .field("custom_file", &self.custom_file)
            .field("volume", &self.volume)
            .field("muted", &self.muted)
            .field("playing", &self.playing)
            .finish_non_exhaustive()
    }
}

impl MusicControls {
    /// Create controls with volume and mute taken from the config.
    #[must_use]
    pub fn new(backend: Box<dyn AudioBackend>, cache_dir: PathBuf, config: &AudioConfig) -> Self {
        Self {
            backend,
            cache_dir,
            current_track: 0,
            custom_file: None,
            volume: config.volume.clamp(0.0, 1.0),
            muted: config.muted,
            playing: false,
        }
    }

    #[must_use]
    pub const fn is_playing(&self) -> bool {
        self.playing
    }

    #[must_use]
    pub const fn volume(&self) -> f32 {
        self.volume
    }

    #[must_use]
    pub const fn is_muted(&self) -> bool {
        self.muted
    }

    /// Volume handed to the player: zero while muted.
    #[must_use]
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.volume
        }
    }

    #[must_use]
    pub const fn current_track(&self) -> usize {
        self.current_track
    }

    #[must_use]
    pub fn custom_file(&self) -> Option<&Path> {
        self.custom_file.as_deref()
    }

    /// Name of what would play.
    #[must_use]
    pub fn current_track_name(&self) -> &'static str {
        if self.custom_file.is_some() {
            CUSTOM_TRACK_NAME
        } else {
            AMBIENT_TRACKS
                .get(self.current_track)
                .map_or(AMBIENT_TRACKS[0].name, |t| t.name)
        }
    }

    /// Flip between playing and paused.
    pub fn toggle_play(&mut self) {
        self.set_playing(!self.playing);
    }

    /// Start or stop playback.
    pub fn set_playing(&mut self, playing: bool) {
        if playing {
            self.start();
        } else {
            self.backend.stop();
            self.playing = false;
            tracing::debug!("music paused");
        }
    }

    /// Select the next track.
    ///
    /// With a custom file loaded this clears it and returns to the first
    /// built-in track.
    pub fn next_track(&mut self) {
        if self.custom_file.take().is_some() {
            self.current_track = 0;
        } else {
            self.current_track = (self.current_track + 1) % AMBIENT_TRACKS.len();
        }
        self.restart_if_playing();
    }

    /// Select the previous track.
    ///
    /// With a custom file loaded this clears it and goes to the last
    /// built-in track.
    pub fn previous_track(&mut self) {
        if self.custom_file.take().is_some() {
            self.current_track = AMBIENT_TRACKS.len() - 1;
        } else if self.current_track == 0 {
            self.current_track = AMBIENT_TRACKS.len() - 1;
        } else {
            self.current_track -= 1;
        }
        self.restart_if_playing();
    }

    /// Use a file from disk as the track.
    ///
    /// # Errors
    ///
    /// Returns `FocusError::InvalidInput` if the file is missing or is not an
    /// audio file. The current selection is left alone in that case.
    pub fn load_custom_file(&mut self, path: &Path) -> Result<(), FocusError> {
        if !path.is_file() {
            return Err(FocusError::InvalidInput(format!(
                "no such file: {}",
                path.display()
            )));
        }
        if !is_audio_file(path) {
            return Err(FocusError::InvalidInput(format!(
                "not an audio file: {} (expected one of {})",
                path.display(),
                AUDIO_EXTENSIONS.join(", ")
            )));
        }

        tracing::info!(path = %path.display(), "custom track loaded");
        self.custom_file = Some(path.to_path_buf());
        self.restart_if_playing();
        Ok(())
    }

    /// Flip the mute flag.
    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
        self.restart_if_playing();
    }

    /// Set the volume, clamped to 0.0..=1.0.
    pub fn set_volume(&mut self, volume: f32) {
        let volume = volume.clamp(0.0, 1.0);
        if (volume - self.volume).abs() < f32::EPSILON {
            return;
        }
        self.volume = volume;
        self.restart_if_playing();
    }

    /// Nudge the volume up or down.
    pub fn adjust_volume(&mut self, delta: f32) {
        self.set_volume(self.volume + delta);
    }

    /// Keep the loop alive; a dead player turns playback off.
    pub fn poll(&mut self) {
        if !self.playing {
            return;
        }
        if let Err(e) = self.backend.poll() {
            tracing::warn!(error = %e, "playback stopped");
            self.playing = false;
        }
    }

    /// Stop playback for good.
    pub fn shutdown(&mut self) {
        self.backend.stop();
        self.playing = false;
    }

    fn source(&self) -> Result<PathBuf, FocusError> {
        if let Some(path) = &self.custom_file {
            return Ok(path.clone());
        }
        let track = AMBIENT_TRACKS
            .get(self.current_track)
            .copied()
            .unwrap_or(AMBIENT_TRACKS[0]);
        track.sound.ensure_rendered(&self.cache_dir)
    }

    fn start(&mut self) {
        let volume = self.effective_volume();
        let result = self
            .source()
            .and_then(|source| self.backend.play(&source, volume));

        match result {
            Ok(()) => {
                self.playing = true;
                tracing::debug!(track = self.current_track_name(), volume, "music playing");
            }
            Err(e) => {
                tracing::warn!(error = %e, "playback failed");
                self.playing = false;
            }
        }
    }

    fn restart_if_playing(&mut self) {
        if self.playing {
            self.start();
        }
    }
}

impl Drop for MusicControls {
    fn drop(&mut self) {
        self.backend.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::audio::MockAudioBackend;
    use mockall::predicate::*;
    use tempfile::TempDir;

    fn controls(backend: MockAudioBackend, dir: &TempDir) -> MusicControls {
        MusicControls::new(
            Box::new(backend),
            dir.path().to_path_buf(),
            &AudioConfig::default(),
        )
    }

    fn quiet_backend() -> MockAudioBackend {
        let mut backend = MockAudioBackend::new();
        backend.expect_stop().return_const(());
        backend
    }

    #[test]
    fn test_defaults() {
        let dir = TempDir::new().unwrap();
        let controls = controls(quiet_backend(), &dir);

        assert!(!controls.is_playing());
        assert!((controls.volume() - 0.5).abs() < f32::EPSILON);
        assert!(!controls.is_muted());
        assert_eq!(controls.current_track_name(), "White Noise");
    }

    #[test]
    fn test_play_renders_white_noise() {
        let dir = TempDir::new().unwrap();
        let mut backend = quiet_backend();
        backend
            .expect_play()
            .withf(|path, volume| {
                path.ends_with("white-noise.wav") && (*volume - 0.5).abs() < f32::EPSILON
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let mut controls = controls(backend, &dir);
        controls.toggle_play();

        assert!(controls.is_playing());
        assert!(dir.path().join("white-noise.wav").exists());
    }

    #[test]
    fn test_backend_failure_turns_playback_off() {
        let dir = TempDir::new().unwrap();
        let mut backend = quiet_backend();
        backend
            .expect_play()
            .returning(|_, _| Err(FocusError::Audio("no player".to_string())));

        let mut controls = controls(backend, &dir);
        controls.toggle_play();

        assert!(!controls.is_playing());
    }

    #[test]
    fn test_poll_failure_turns_playback_off() {
        let dir = TempDir::new().unwrap();
        let mut backend = quiet_backend();
        backend.expect_play().returning(|_, _| Ok(()));
        backend
            .expect_poll()
            .times(1)
            .returning(|| Err(FocusError::Audio("exit status 1".to_string())));

        let mut controls = controls(backend, &dir);
        controls.toggle_play();
        controls.poll();

        assert!(!controls.is_playing());
    }

    #[test]
    fn test_poll_skipped_when_paused() {
        let dir = TempDir::new().unwrap();
        let mut backend = quiet_backend();
        backend.expect_poll().never();

        let mut controls = controls(backend, &dir);
        controls.poll();
    }

    #[test]
    fn test_mute_plays_silently() {
        let dir = TempDir::new().unwrap();
        let mut backend = quiet_backend();
        backend
            .expect_play()
            .with(always(), eq(0.5f32))
            .times(1)
            .returning(|_, _| Ok(()));
        backend
            .expect_play()
            .with(always(), eq(0.0f32))
            .times(1)
            .returning(|_, _| Ok(()));

        let mut controls = controls(backend, &dir);
        controls.toggle_play();
        controls.toggle_mute();

        assert!(controls.is_muted());
        assert!(controls.effective_volume().abs() < f32::EPSILON);
        assert!((controls.volume() - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_volume_clamped() {
        let dir = TempDir::new().unwrap();
        let mut controls = controls(quiet_backend(), &dir);

        controls.set_volume(1.7);
        assert!((controls.volume() - 1.0).abs() < f32::EPSILON);

        controls.adjust_volume(-2.0);
        assert!(controls.volume().abs() < f32::EPSILON);
    }

    #[test]
    fn test_custom_file_and_track_navigation() {
        let dir = TempDir::new().unwrap();
        let song = dir.path().join("rain.mp3");
        std::fs::write(&song, b"ID3").unwrap();

        let mut controls = controls(quiet_backend(), &dir);
        controls.load_custom_file(&song).unwrap();
        assert_eq!(controls.current_track_name(), "Custom Track");
        assert_eq!(controls.custom_file(), Some(song.as_path()));

        controls.next_track();
        assert!(controls.custom_file().is_none());
        assert_eq!(controls.current_track(), 0);

        controls.load_custom_file(&song).unwrap();
        controls.previous_track();
        assert!(controls.custom_file().is_none());
        assert_eq!(controls.current_track(), AMBIENT_TRACKS.len() - 1);
    }

    #[test]
    fn test_next_wraps_builtin_tracks() {
        let dir = TempDir::new().unwrap();
        let mut controls = controls(quiet_backend(), &dir);

        controls.next_track();
        assert_eq!(controls.current_track(), 1 % AMBIENT_TRACKS.len());
        controls.previous_track();
        assert_eq!(controls.current_track(), 0);
    }

    #[test]
    fn test_rejects_non_audio_files() {
        let dir = TempDir::new().unwrap();
        let notes = dir.path().join("notes.txt");
        std::fs::write(&notes, "hello").unwrap();

        let mut controls = controls(quiet_backend(), &dir);
        assert!(matches!(
            controls.load_custom_file(&notes),
            Err(FocusError::InvalidInput(_))
        ));
        assert!(matches!(
            controls.load_custom_file(&dir.path().join("missing.mp3")),
            Err(FocusError::InvalidInput(_))
        ));
        assert!(controls.custom_file().is_none());
    }

    #[test]
    fn test_is_audio_file() {
        assert!(is_audio_file(Path::new("a.MP3")));
        assert!(is_audio_file(Path::new("/x/y.flac")));
        assert!(!is_audio_file(Path::new("a.txt")));
        assert!(!is_audio_file(Path::new("noext")));
    }
}
