//! Waveform preview core: amplitude-map rendering, sample markers, and
//! playhead crossing detection for audio preview hosts.
/// Interleaved sample storage.
pub mod buffer;
/// Playhead crossing detection.
pub mod crossing;
/// Logging setup helpers.
pub mod logging;
/// Marker bookkeeping per source.
pub mod markers;
/// Transport orchestration and the built-in preview engine.
pub mod playback;
/// Amplitude-map rendering.
pub mod render;
/// Presentation settings values.
pub mod settings;
/// Pixel projection helpers for UI hosts.
pub mod view;
