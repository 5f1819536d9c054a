use crate::platform::{Clock, Platform};
use crate::state::{AppState, KernelError};
use quadview_common::TimingConfig;
use quadview_render::Scene;

/// Rolling FPS estimate over a fixed window of frame timestamps.
///
/// Timestamps go into a circular buffer. Each time the buffer wraps, the
/// `capacity - 1` intervals it holds are averaged into one estimate.
#[derive(Debug)]
pub struct FpsCounter {
    samples: Vec<f64>,
    index: usize,
    last_fps: Option<f64>,
}

impl FpsCounter {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: vec![0.0; capacity.max(2)],
            index: 0,
            last_fps: None,
        }
    }

    /// Record a timestamp; yields an estimate every `capacity` samples.
    ///
    /// The estimate is `(capacity - 1)` intervals over their summed length,
    /// the reciprocal of the mean frame time. Dividing the sample count by
    /// that span instead would overstate the rate by `capacity / (capacity - 1)`
    /// (30.51 rather than 30 for 60 samples at 30 Hz).
    pub fn record(&mut self, timestamp: f64) -> Option<f64> {
        self.samples[self.index] = timestamp;
        self.index = (self.index + 1) % self.samples.len();
        if self.index != 0 {
            return None;
        }

        let elapsed: f64 = self.samples.windows(2).map(|w| w[1] - w[0]).sum();
        if elapsed <= 0.0 {
            tracing::warn!(elapsed, "non-increasing frame timestamps, skipping FPS update");
            return None;
        }
        let fps = (self.samples.len() - 1) as f64 / elapsed;
        self.last_fps = Some(fps);
        Some(fps)
    }

    pub fn capacity(&self) -> usize {
        self.samples.len()
    }

    pub fn last_fps(&self) -> Option<f64> {
        self.last_fps
    }
}

/// Format like printf `%g` with `digits` precision: `digits` significant
/// digits, trailing zeros dropped, exponent form for very large or small values.
pub fn format_significant(value: f64, digits: usize) -> String {
    let digits = digits.max(1);
    if value == 0.0 || !value.is_finite() {
        return format!("{value}");
    }

    let scientific = format!("{:.*e}", digits - 1, value);
    let (mantissa, exponent) = scientific
        .split_once('e')
        .map(|(m, e)| (m.to_string(), e.parse::<i32>().unwrap_or(0)))
        .unwrap_or((scientific.clone(), 0));

    if exponent < -4 || exponent >= digits as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!(
            "{}e{}{:02}",
            trim_fraction(&mantissa),
            sign,
            exponent.abs()
        );
    }

    let decimals = (digits as i32 - 1 - exponent).max(0) as usize;
    trim_fraction(&format!("{value:.decimals$}")).to_string()
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// Window title with the FPS readout appended.
pub fn format_title(base: &str, fps: f64) -> String {
    format!("{base} [FPS: {}]", format_significant(fps, 4))
}

/// Outcome of one loop iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    pub frame_index: u64,
    /// Seconds since the previous iteration, never negative.
    pub delta: f64,
    /// Set on iterations that refreshed the FPS readout.
    pub fps: Option<f64>,
    /// `false` once a close was requested; the caller stops iterating.
    pub running: bool,
}

/// Drives the per-frame sequence: input → continuous actions → update →
/// draw → present → FPS accounting.
#[derive(Debug)]
pub struct FrameLoop {
    title: String,
    last_frame: f64,
    max_delta: Option<f64>,
    fps: FpsCounter,
    frame_index: u64,
}

impl FrameLoop {
    /// `start` is the clock reading the first frame's delta is measured from.
    pub fn new(title: impl Into<String>, timing: &TimingConfig, start: f64) -> Self {
        Self {
            title: title.into(),
            last_frame: start,
            max_delta: timing.max_frame_delta,
            fps: FpsCounter::new(timing.fps_samples),
            frame_index: 0,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn frames(&self) -> u64 {
        self.frame_index
    }

    pub fn last_fps(&self) -> Option<f64> {
        self.fps.last_fps()
    }

    pub fn run_frame<S, P, C>(
        &mut self,
        state: &mut AppState<S>,
        platform: &mut P,
        clock: &C,
    ) -> Result<FrameReport, KernelError>
    where
        S: Scene,
        P: Platform,
        C: Clock,
    {
        let _span = tracing::trace_span!("frame", index = self.frame_index).entered();

        let now = clock.now();
        let mut delta = (now - self.last_frame).max(0.0);
        if let Some(max) = self.max_delta {
            delta = delta.min(max);
        }
        self.last_frame = now;

        let events = state.drain_input(platform);
        state.resolve_continuous(delta as f32, platform);

        state.scene.update(now as f32);
        state.scene.draw(&state.camera)?;
        state.scene.present()?;

        let fps = self.fps.record(clock.now());
        if let Some(fps) = fps {
            let title = format_title(&self.title, fps);
            tracing::debug!(fps, "fps updated");
            platform.set_title(&title);
        }

        tracing::trace!(delta, events, "frame complete");

        let report = FrameReport {
            frame_index: self.frame_index,
            delta,
            fps,
            running: !state.is_close_requested(),
        };
        self.frame_index += 1;
        Ok(report)
    }
}
