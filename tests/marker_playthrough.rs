//! End-to-end preview scenario: render a clip, play it through scripted
//! polling ticks, and collect marker crossings along the way.

use std::cell::Cell;

use wavecue::buffer::SampleBuffer;
use wavecue::markers::{MarkerStore, SourceId};
use wavecue::playback::{PlaybackCoordinator, PlaybackEngine, PlaybackError, Transport};
use wavecue::render::WaveformRenderer;

const SOURCE: SourceId = SourceId(42);
const CLIP_FRAMES: usize = 44_100;

/// Engine that replays a fixed sequence of polled positions, then reports the
/// clip as finished.
struct ScriptedEngine {
    positions: Vec<u64>,
    cursor: Cell<usize>,
    playing: bool,
}

impl ScriptedEngine {
    fn new(positions: Vec<u64>) -> Self {
        Self {
            positions,
            cursor: Cell::new(0),
            playing: false,
        }
    }
}

impl PlaybackEngine for ScriptedEngine {
    fn play(
        &mut self,
        _source: SourceId,
        _start_sample: u64,
        _looped: bool,
    ) -> Result<(), PlaybackError> {
        self.playing = true;
        Ok(())
    }

    fn stop(&mut self) {
        self.playing = false;
    }

    fn is_playing(&self) -> bool {
        self.playing && self.cursor.get() < self.positions.len()
    }

    fn position(&self) -> u64 {
        let idx = self.cursor.get().min(self.positions.len() - 1);
        self.cursor.set(self.cursor.get() + 1);
        self.positions[idx]
    }
}

fn clip() -> SampleBuffer {
    let samples = (0..CLIP_FRAMES)
        .map(|i| ((i as f32) * 0.005).sin() * 0.6)
        .collect();
    SampleBuffer::new(samples, 1).expect("clip buffer")
}

#[test]
fn full_playthrough_fires_each_marker_once_in_order() {
    let mut store = MarkerStore::new();
    for sample in [5_000, 20_000, 40_000] {
        store.add_marker(SOURCE, sample);
    }

    let engine = ScriptedEngine::new(vec![0, 9_000, 21_000, 35_000, 44_099]);
    let mut coordinator = PlaybackCoordinator::new(engine);
    coordinator.start(&store, SOURCE, 0).expect("start");

    let mut fired = Vec::new();
    let mut finished = false;
    for _ in 0..5 {
        let tick = coordinator.tick(&store);
        fired.extend(tick.crossed.iter().map(|marker| marker.sample));
        finished = tick.finished;
    }

    assert_eq!(fired, vec![5_000, 20_000, 40_000]);
    assert!(finished);
    assert_eq!(coordinator.transport(), Transport::Idle);
    assert_eq!(coordinator.cursor_sample(), 44_099);
    // Once idle, further ticks stay silent.
    assert!(coordinator.tick(&store).crossed.is_empty());
}

#[test]
fn restart_mid_clip_skips_markers_behind_the_playhead() {
    let mut store = MarkerStore::new();
    store.add_marker(SOURCE, 5_000);
    store.add_marker(SOURCE, 40_000);

    let engine = ScriptedEngine::new(vec![30_000, 44_099]);
    let mut coordinator = PlaybackCoordinator::new(engine);
    coordinator.start(&store, SOURCE, 25_000).expect("start");

    let mut fired = Vec::new();
    for _ in 0..2 {
        fired.extend(
            coordinator
                .tick(&store)
                .crossed
                .iter()
                .map(|marker| marker.sample),
        );
    }
    assert_eq!(fired, vec![40_000]);
}

#[test]
fn rendering_the_played_clip_is_stable_across_calls() {
    let buffer = clip();
    let renderer = WaveformRenderer::new(200, 64).expect("renderer");
    let first = renderer.render(&buffer, 1.0).expect("render");
    let second = renderer.render(&buffer, 1.0).expect("render");
    assert_eq!(first, second);
    assert_eq!((first.width(), first.height()), (200, 64));
}
