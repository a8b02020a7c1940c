//! Audio backends.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use crate::core::find_program;
use crate::error::FocusError;

/// Something that can loop an audio file.
#[cfg_attr(test, mockall::automock)]
pub trait AudioBackend {
    /// Start looping `source`, replacing whatever was playing.
    ///
    /// # Errors
    ///
    /// Returns `FocusError::Audio` if playback cannot start.
    fn play(&mut self, source: &Path, volume: f32) -> Result<(), FocusError>;

    /// Stop playback. Safe to call when nothing is playing.
    fn stop(&mut self);

    /// Keep the loop alive. Called from the event loop.
    ///
    /// # Errors
    ///
    /// Returns `FocusError::Audio` if the player died and cannot continue.
    fn poll(&mut self) -> Result<(), FocusError>;

    /// Whether something is playing.
    fn is_playing(&self) -> bool;
}

/// Supported player programs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerKind {
    /// mpv
    Mpv,
    /// ffplay from ffmpeg
    Ffplay,
    /// macOS afplay
    Afplay,
    /// PulseAudio paplay
    Paplay,
    /// Any other program, invoked as `program <file>`
    Generic,
}

impl PlayerKind {
    /// Detection order.
    pub const SEARCH_ORDER: [Self; 4] = [Self::Mpv, Self::Ffplay, Self::Afplay, Self::Paplay];

    /// Executable name.
    #[must_use]
    pub const fn program_name(self) -> &'static str {
        match self {
            Self::Mpv => "mpv",
            Self::Ffplay => "ffplay",
            Self::Afplay => "afplay",
            Self::Paplay => "paplay",
            Self::Generic => "",
        }
    }

    /// Infer the kind from an executable path.
    #[must_use]
    pub fn from_program(path: &Path) -> Self {
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        Self::SEARCH_ORDER
            .into_iter()
            .find(|kind| kind.program_name() == name)
            .unwrap_or(Self::Generic)
    }

    /// Whether the player loops by itself; the others are respawned on exit.
    #[must_use]
    pub const fn loops_natively(self) -> bool {
        matches!(self, Self::Mpv | Self::Ffplay)
    }

    /// Command-line arguments to play `source` at `volume` (0.0 to 1.0).
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn args(self, source: &Path, volume: f32) -> Vec<OsString> {
        let volume = volume.clamp(0.0, 1.0);
        let percent = (volume * 100.0).round() as u32;

        let mut args: Vec<OsString> = match self {
            Self::Mpv => vec![
                "--no-video".into(),
                "--really-quiet".into(),
                "--loop-file=inf".into(),
                format!("--volume={percent}").into(),
            ],
            Self::Ffplay => vec![
                "-nodisp".into(),
                "-loglevel".into(),
                "quiet".into(),
                "-loop".into(),
                "0".into(),
                "-volume".into(),
                percent.to_string().into(),
            ],
            Self::Afplay => vec!["-v".into(), format!("{volume:.2}").into()],
            Self::Paplay => vec![format!("--volume={}", (volume * 65536.0).round() as u32).into()],
            Self::Generic => Vec::new(),
        };
        args.push(source.as_os_str().to_os_string());
        args
    }
}

/// A located player executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerProgram {
    /// What kind of player it is.
    pub kind: PlayerKind,
    /// Full path to the executable.
    pub path: PathBuf,
}

impl PlayerProgram {
    /// Find a player, honoring an explicit choice from the config file.
    #[must_use]
    pub fn detect(preferred: Option<&str>) -> Option<Self> {
        if let Some(name) = preferred {
            return find_program(name).map(|path| Self {
                kind: PlayerKind::from_program(&path),
                path,
            });
        }

        PlayerKind::SEARCH_ORDER.into_iter().find_map(|kind| {
            find_program(kind.program_name()).map(|path| Self { kind, path })
        })
    }
}

/// Plays audio by running a player program as a child process.
#[derive(Debug)]
pub struct ProcessBackend {
    program: Option<PlayerProgram>,
    child: Option<Child>,
    current: Option<(PathBuf, f32)>,
}

impl ProcessBackend {
    /// Create a backend around a player, or none if nothing was found.
    #[must_use]
    pub const fn new(program: Option<PlayerProgram>) -> Self {
        Self {
            program,
            child: None,
            current: None,
        }
    }

    /// Create a backend using auto-detection.
    #[must_use]
    pub fn detect(preferred: Option<&str>) -> Self {
        let program = PlayerProgram::detect(preferred);
        tracing::debug!(?program, "audio player detection");
        Self::new(program)
    }

    /// The player in use.
    #[must_use]
    pub const fn program(&self) -> Option<&PlayerProgram> {
        self.program.as_ref()
    }

    fn spawn(&mut self, source: &Path, volume: f32) -> Result<(), FocusError> {
        let program = self.program.as_ref().ok_or_else(|| {
            FocusError::Audio("no audio player found (install mpv or ffplay)".to_string())
        })?;

        let child = Command::new(&program.path)
            .args(program.kind.args(source, volume))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                FocusError::Audio(format!("failed to start {}: {e}", program.path.display()))
            })?;

        tracing::debug!(pid = child.id(), source = %source.display(), volume, "player started");
        self.child = Some(child);
        Ok(())
    }

    fn kill_child(&mut self) {
        if let Some(mut child) = self.child.take() {
            if let Err(e) = child.kill() {
                tracing::debug!(error = %e, "player already exited");
            }
            child.wait().ok();
        }
    }
}

impl AudioBackend for ProcessBackend {
    fn play(&mut self, source: &Path, volume: f32) -> Result<(), FocusError> {
        self.stop();
        self.spawn(source, volume)?;
        self.current = Some((source.to_path_buf(), volume));
        Ok(())
    }

    fn stop(&mut self) {
        self.kill_child();
        self.current = None;
    }

    fn poll(&mut self) -> Result<(), FocusError> {
        let Some((source, volume)) = self.current.clone() else {
            return Ok(());
        };
        let Some(child) = self.child.as_mut() else {
            return Ok(());
        };

        let status = child
            .try_wait()
            .map_err(|e| FocusError::Audio(format!("failed to check player: {e}")))?;

        match status {
            None => Ok(()),
            Some(status) if status.success() => {
                // Finished one pass of a non-looping player: go again.
                self.child = None;
                self.spawn(&source, volume)
            }
            Some(status) => {
                self.child = None;
                self.current = None;
                Err(FocusError::Audio(format!("player exited with {status}")))
            }
        }
    }

    fn is_playing(&self) -> bool {
        self.current.is_some()
    }
}

impl Drop for ProcessBackend {
    fn drop(&mut self) {
        self.kill_child();
    }
}
