//! Pixel projection helpers for the UI host.
//!
//! The host owns all drawing; these map between sample offsets and pixel
//! columns and lay out the time ruler above the waveform.

/// Pixel column for a marker glyph, clamped inside the view.
pub fn marker_pixel_x(sample: u64, sample_count: u64, width: u32) -> u32 {
    if sample_count == 0 || width == 0 {
        return 0;
    }
    let normalized = sample as f64 / sample_count as f64;
    ((normalized * width as f64).round() as u64).min(width as u64 - 1) as u32
}

/// Playhead column, clamped so a `playhead_width`-wide glyph stays inside.
pub fn playhead_pixel_x(sample: u64, sample_count: u64, width: u32, playhead_width: u32) -> u32 {
    if width == 0 || sample_count <= 1 {
        return 0;
    }
    let max_x = width.saturating_sub(playhead_width.max(1)) as u64;
    let normalized = sample as f64 / sample_count as f64;
    ((normalized * width as f64).round() as u64).min(max_x) as u32
}

/// Sample offset for a clicked pixel column.
pub fn sample_at_pixel(x: f32, width: u32, sample_count: u64) -> u64 {
    if width == 0 || sample_count == 0 {
        return 0;
    }
    let normalized = (x / width as f32).clamp(0.0, 1.0) as f64;
    (normalized * (sample_count - 1) as f64).round() as u64
}

/// One tick on the time ruler.
#[derive(Clone, Debug, PartialEq)]
pub struct RulerTick {
    pub x: u32,
    /// Full-height tick at whole seconds, short tick at tenths.
    pub major: bool,
    /// Whole-second label, present on major ticks only.
    pub label: Option<String>,
}

/// Lay out ruler ticks: one per tenth of a second, labeled at whole seconds.
pub fn ruler_ticks(duration_seconds: f32, width: u32) -> Vec<RulerTick> {
    if !(duration_seconds > 0.0) || width == 0 {
        return Vec::new();
    }
    let tenths = (duration_seconds * 10.0).ceil() as u32;
    let pixels_per_tenth = width as f32 / (duration_seconds * 10.0);
    (0..=tenths)
        .map(|t| {
            let major = t.is_multiple_of(10);
            RulerTick {
                x: (t as f32 * pixels_per_tenth).round() as u32,
                major,
                label: major.then(|| (t / 10).to_string()),
            }
        })
        .collect()
}
