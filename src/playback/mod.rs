//! Transport orchestration around an external playback engine.

mod preview;

pub use preview::PreviewEngine;

use thiserror::Error;
use tracing::info;

use crate::crossing::CrossingDetector;
use crate::markers::{Marker, MarkerStore, SourceId};

/// Errors surfaced when driving a playback engine.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The output device could not be opened.
    #[error("Audio device init failed: {source}")]
    DeviceInit { source: rodio::StreamError },
    /// A sink could not be created on the open device.
    #[error("Audio output failed: {source}")]
    Output { source: rodio::PlayError },
    /// Playback was requested for a source the engine has no clip for.
    #[error("No clip loaded for source {0}")]
    ClipNotLoaded(u64),
}

/// Minimal contract for the host's preview playback engine.
///
/// The coordinator only polls this interface; it never pushes samples and
/// never inspects decode internals.
pub trait PlaybackEngine {
    /// Begin playback of the source at the given sample offset.
    fn play(&mut self, source: SourceId, start_sample: u64, looped: bool)
    -> Result<(), PlaybackError>;
    /// Halt playback immediately; must be idempotent.
    fn stop(&mut self);
    /// True while audio is still audible.
    fn is_playing(&self) -> bool;
    /// Current playhead position in samples.
    fn position(&self) -> u64;
}

/// Transport state driven by the coordinator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transport {
    Idle,
    Playing { source: SourceId },
}

/// Result of one polling tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tick {
    /// Markers crossed since the previous poll, ascending by sample.
    pub crossed: Vec<Marker>,
    /// True when the engine reported the clip finished during this tick.
    pub finished: bool,
}

/// Polls the engine once per tick and drives crossing detection and the
/// idle/playing transitions.
///
/// Single-voice: starting a new clip stops the current one first. Stopping is
/// synchronous; once the transport is idle, further ticks are no-ops, so no
/// stale tick can revive a stopped state.
pub struct PlaybackCoordinator<E> {
    engine: E,
    detector: CrossingDetector,
    transport: Transport,
    cursor_sample: u64,
}

impl<E: PlaybackEngine> PlaybackCoordinator<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            detector: CrossingDetector::new(),
            transport: Transport::Idle,
            cursor_sample: 0,
        }
    }

    /// Start playing `source` at `at_sample`, stopping any current voice first.
    ///
    /// The crossing baseline is primed at the start offset: markers before it
    /// stay quiet, markers after it fire even when the first poll lands far
    /// ahead.
    pub fn start(
        &mut self,
        store: &MarkerStore,
        source: SourceId,
        at_sample: u64,
    ) -> Result<(), PlaybackError> {
        if matches!(self.transport, Transport::Playing { .. }) {
            self.engine.stop();
            self.transport = Transport::Idle;
        }
        self.detector.reset(source);
        // First update after a reset records the baseline and fires nothing.
        let _ = self.detector.update(store, source, at_sample);
        self.engine.play(source, at_sample, false)?;
        self.transport = Transport::Playing { source };
        self.cursor_sample = at_sample;
        info!(source = source.0, at_sample, "playback started");
        Ok(())
    }

    /// Poll the engine once; a no-op while idle.
    pub fn tick(&mut self, store: &MarkerStore) -> Tick {
        let Transport::Playing { source } = self.transport else {
            return Tick::default();
        };
        let position = self.engine.position();
        let crossed = self.detector.update(store, source, position);
        self.cursor_sample = position;
        let finished = !self.engine.is_playing();
        if finished {
            self.transport = Transport::Idle;
            info!(source = source.0, position, "playback finished");
        }
        Tick { crossed, finished }
    }

    /// Halt the engine and return to idle; safe to call repeatedly.
    pub fn stop(&mut self) {
        self.engine.stop();
        if self.transport != Transport::Idle {
            self.transport = Transport::Idle;
            info!("playback stopped");
        }
    }

    /// Move the visual cursor without touching playback or firing crossings.
    pub fn seek_and_render_only(&mut self, at_sample: u64) {
        self.cursor_sample = at_sample;
    }

    /// Last observed playhead position in samples.
    pub fn cursor_sample(&self) -> u64 {
        self.cursor_sample
    }

    /// Current transport state.
    pub fn transport(&self) -> Transport {
        self.transport
    }

    /// True while a source is playing.
    pub fn is_playing(&self) -> bool {
        matches!(self.transport, Transport::Playing { .. })
    }

    /// Access the engine, e.g. to load clips into the built-in preview engine.
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    const SOURCE: SourceId = SourceId(3);

    #[derive(Default)]
    struct FakeEngine {
        playing: bool,
        position: Cell<u64>,
        play_calls: u32,
        stop_calls: u32,
    }

    impl PlaybackEngine for FakeEngine {
        fn play(
            &mut self,
            _source: SourceId,
            start_sample: u64,
            _looped: bool,
        ) -> Result<(), PlaybackError> {
            self.playing = true;
            self.position.set(start_sample);
            self.play_calls += 1;
            Ok(())
        }

        fn stop(&mut self) {
            self.playing = false;
            self.stop_calls += 1;
        }

        fn is_playing(&self) -> bool {
            self.playing
        }

        fn position(&self) -> u64 {
            self.position.get()
        }
    }

    fn store_with(samples: &[u64]) -> MarkerStore {
        let mut store = MarkerStore::new();
        for &sample in samples {
            store.add_marker(SOURCE, sample);
        }
        store
    }

    #[test]
    fn tick_is_a_noop_while_idle() {
        let store = store_with(&[10]);
        let mut coordinator = PlaybackCoordinator::new(FakeEngine::default());
        assert_eq!(coordinator.tick(&store), Tick::default());
        assert!(!coordinator.is_playing());
    }

    #[test]
    fn start_primes_the_baseline_at_the_start_sample() {
        let store = store_with(&[100, 500]);
        let mut coordinator = PlaybackCoordinator::new(FakeEngine::default());
        coordinator.start(&store, SOURCE, 200).unwrap();
        coordinator.engine_mut().position.set(600);
        let tick = coordinator.tick(&store);
        // The marker behind the start offset stays quiet.
        let crossed: Vec<u64> = tick.crossed.iter().map(|m| m.sample).collect();
        assert_eq!(crossed, vec![500]);
    }

    #[test]
    fn restarting_stops_the_current_voice_first() {
        let store = store_with(&[]);
        let mut coordinator = PlaybackCoordinator::new(FakeEngine::default());
        coordinator.start(&store, SOURCE, 0).unwrap();
        coordinator.start(&store, SOURCE, 1000).unwrap();
        assert_eq!(coordinator.engine_mut().stop_calls, 1);
        assert_eq!(coordinator.engine_mut().play_calls, 2);
        assert_eq!(coordinator.transport(), Transport::Playing { source: SOURCE });
    }

    #[test]
    fn tick_goes_idle_when_the_engine_reports_finished() {
        let store = store_with(&[50]);
        let mut coordinator = PlaybackCoordinator::new(FakeEngine::default());
        coordinator.start(&store, SOURCE, 0).unwrap();
        coordinator.engine_mut().position.set(80);
        coordinator.engine_mut().playing = false;
        let tick = coordinator.tick(&store);
        // Crossings from the final stretch still fire on the closing tick.
        assert_eq!(tick.crossed.len(), 1);
        assert!(tick.finished);
        assert_eq!(coordinator.transport(), Transport::Idle);
        assert_eq!(coordinator.tick(&store), Tick::default());
    }

    #[test]
    fn stop_is_synchronous_and_idempotent() {
        let store = store_with(&[]);
        let mut coordinator = PlaybackCoordinator::new(FakeEngine::default());
        coordinator.start(&store, SOURCE, 0).unwrap();
        coordinator.stop();
        coordinator.stop();
        assert_eq!(coordinator.transport(), Transport::Idle);
        assert_eq!(coordinator.engine_mut().stop_calls, 2);
        assert_eq!(coordinator.tick(&store), Tick::default());
    }

    #[test]
    fn seek_and_render_only_moves_the_cursor_without_events() {
        let store = store_with(&[10]);
        let mut coordinator = PlaybackCoordinator::new(FakeEngine::default());
        coordinator.seek_and_render_only(25);
        assert_eq!(coordinator.cursor_sample(), 25);
        assert!(!coordinator.is_playing());
        assert_eq!(coordinator.engine_mut().play_calls, 0);
        // Playing afterwards from the seek target does not fire the passed marker.
        coordinator.start(&store, SOURCE, 25).unwrap();
        coordinator.engine_mut().position.set(30);
        assert!(coordinator.tick(&store).crossed.is_empty());
    }
}
