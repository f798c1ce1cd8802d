//! Immutable interleaved sample storage shared between rendering and playback.

use std::sync::Arc;
use thiserror::Error;

/// Errors raised when constructing a [`SampleBuffer`].
#[derive(Debug, Error)]
pub enum BufferError {
    /// The sample slice does not divide evenly into the channel count.
    #[error("{len} samples do not divide into {channels} channels")]
    LengthMismatch { len: usize, channels: usize },
    /// A non-empty sample slice was paired with zero channels.
    #[error("{len} samples provided with zero channels")]
    NoChannels { len: usize },
}

/// Interleaved multichannel audio samples with fixed frame and channel counts.
///
/// The invariant `samples.len() == sample_count * channel_count` is enforced
/// at construction; the payload is immutable afterwards and cheap to clone.
#[derive(Clone, Debug)]
pub struct SampleBuffer {
    samples: Arc<[f32]>,
    sample_count: usize,
    channel_count: usize,
}

impl SampleBuffer {
    /// Wrap interleaved samples, deriving the frame count from the channel count.
    pub fn new(samples: Vec<f32>, channel_count: usize) -> Result<Self, BufferError> {
        if channel_count == 0 {
            if samples.is_empty() {
                return Ok(Self {
                    samples: Arc::from(samples),
                    sample_count: 0,
                    channel_count: 0,
                });
            }
            return Err(BufferError::NoChannels { len: samples.len() });
        }
        if !samples.len().is_multiple_of(channel_count) {
            return Err(BufferError::LengthMismatch {
                len: samples.len(),
                channels: channel_count,
            });
        }
        let sample_count = samples.len() / channel_count;
        Ok(Self {
            samples: Arc::from(samples),
            sample_count,
            channel_count,
        })
    }

    /// Number of frames, counted per channel.
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Number of interleaved channels.
    pub fn channel_count(&self) -> usize {
        self.channel_count
    }

    /// The raw interleaved payload.
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Largest absolute sample value, 0.0 for an empty buffer.
    pub fn peak(&self) -> f32 {
        self.samples
            .iter()
            .fold(0.0_f32, |acc, sample| acc.max(sample.abs()))
    }
}
