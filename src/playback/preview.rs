use std::time::Instant;

use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, OutputStreamHandle, Sink, Source};
use tracing::debug;

use super::{PlaybackEngine, PlaybackError};
use crate::buffer::SampleBuffer;
use crate::markers::SourceId;

/// Single-voice rodio preview player over an in-memory clip.
///
/// The reported position is derived from wall-clock time since the voice
/// started; it is a polling estimate, not a DAC-accurate clock.
pub struct PreviewEngine {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    sink: Option<Sink>,
    clip: Option<LoadedClip>,
    voice: Option<Voice>,
}

struct LoadedClip {
    source: SourceId,
    samples: Vec<f32>,
    channel_count: u16,
    sample_count: u64,
    sample_rate: u32,
}

struct Voice {
    started_at: Instant,
    start_sample: u64,
    looped: bool,
}

impl PreviewEngine {
    /// Open the default output device.
    pub fn new() -> Result<Self, PlaybackError> {
        let (stream, handle) =
            OutputStream::try_default().map_err(|source| PlaybackError::DeviceInit { source })?;
        Ok(Self {
            _stream: stream,
            handle,
            sink: None,
            clip: None,
            voice: None,
        })
    }

    /// Load the clip played for `source`, replacing any previous clip.
    ///
    /// `sample_rate` is the playback rate the host decoded the buffer at.
    pub fn load_clip(&mut self, source: SourceId, buffer: &SampleBuffer, sample_rate: u32) {
        self.stop();
        self.clip = Some(LoadedClip {
            source,
            samples: buffer.samples().to_vec(),
            channel_count: buffer.channel_count().max(1) as u16,
            sample_count: buffer.sample_count() as u64,
            sample_rate: sample_rate.max(1),
        });
        debug!(
            source = source.0,
            frames = buffer.sample_count(),
            sample_rate,
            "preview clip loaded"
        );
    }
}

impl PlaybackEngine for PreviewEngine {
    fn play(
        &mut self,
        source: SourceId,
        start_sample: u64,
        looped: bool,
    ) -> Result<(), PlaybackError> {
        let Some(clip) = self.clip.as_ref().filter(|clip| clip.source == source) else {
            return Err(PlaybackError::ClipNotLoaded(source.0));
        };
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        let start = start_sample.min(clip.sample_count) as usize;
        let tail = clip.samples[start * clip.channel_count as usize..].to_vec();
        let sink =
            Sink::try_new(&self.handle).map_err(|source| PlaybackError::Output { source })?;
        let queued = SamplesBuffer::new(clip.channel_count, clip.sample_rate, tail);
        if looped {
            sink.append(queued.repeat_infinite());
        } else {
            sink.append(queued);
        }
        sink.play();
        self.sink = Some(sink);
        self.voice = Some(Voice {
            started_at: Instant::now(),
            start_sample: start as u64,
            looped,
        });
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.voice = None;
    }

    fn is_playing(&self) -> bool {
        self.sink.as_ref().map(|sink| !sink.empty()).unwrap_or(false) && self.voice.is_some()
    }

    fn position(&self) -> u64 {
        let (Some(clip), Some(voice)) = (self.clip.as_ref(), self.voice.as_ref()) else {
            return 0;
        };
        let advanced =
            (voice.started_at.elapsed().as_secs_f64() * clip.sample_rate as f64) as u64;
        position_from_elapsed(voice.start_sample, advanced, clip.sample_count, voice.looped)
    }
}

fn position_from_elapsed(start_sample: u64, advanced: u64, sample_count: u64, looped: bool) -> u64 {
    if sample_count == 0 {
        return 0;
    }
    let span = sample_count.saturating_sub(start_sample).max(1);
    if looped {
        start_sample + advanced % span
    } else {
        (start_sample + advanced).min(sample_count - 1)
    }
}
