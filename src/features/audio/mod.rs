//! Ambient audio.
//!
//! A small play/pause/mute/volume surface over an external player process.
//! Playback loops while the playing flag is set; failures are logged and
//! turn playback off instead of propagating.

mod backend;
mod controls;
mod noise;

pub use backend::{AudioBackend, PlayerKind, PlayerProgram, ProcessBackend};
pub use controls::{
    is_audio_file, BuiltinSound, MusicControls, Track, AMBIENT_TRACKS, AUDIO_EXTENSIONS,
    CUSTOM_TRACK_NAME,
};
pub use noise::{render_white_noise, WHITE_NOISE_SAMPLE_RATE};

#[cfg(test)]
pub use backend::MockAudioBackend;
