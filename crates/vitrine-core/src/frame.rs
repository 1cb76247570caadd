//! Render loop bookkeeping: elapsed time, frame counter and FPS sampling.
//!
//! The host owns the actual scheduling (`requestAnimationFrame` in the
//! browser). It calls [`RenderLoop::frame`] once per callback with its clock
//! and requests the next callback only after that frame's work is done.

use serde::{Deserialize, Serialize};

/// Loop lifecycle. There is no stop state: once running, the loop runs for the
/// lifetime of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LoopState {
    /// Not started
    #[default]
    Idle,
    /// Producing frames
    Running,
}

/// Timing for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    /// Seconds since [`RenderLoop::start`]
    pub elapsed: f64,
    /// Seconds since the previous frame (0 on the first)
    pub delta: f64,
    /// 1-based frame counter
    pub frame: u64,
    /// Freshly sampled FPS, present every `sample_frames` frames
    pub fps: Option<f64>,
}

/// Frame counter with periodic FPS measurement.
#[derive(Debug, Clone)]
pub struct RenderLoop {
    state: LoopState,
    sample_frames: u64,
    start_ms: f64,
    last_frame_ms: f64,
    last_sample_ms: f64,
    frame: u64,
    frames_since_sample: u64,
    fps: Option<f64>,
}

impl Default for RenderLoop {
    fn default() -> Self {
        Self::new(60)
    }
}

impl RenderLoop {
    /// Create an idle loop that samples FPS every `sample_frames` frames.
    #[must_use]
    pub fn new(sample_frames: u64) -> Self {
        Self {
            state: LoopState::Idle,
            sample_frames: sample_frames.max(1),
            start_ms: 0.0,
            last_frame_ms: 0.0,
            last_sample_ms: 0.0,
            frame: 0,
            frames_since_sample: 0,
            fps: None,
        }
    }

    /// Enter `Running` with `now_ms` as time zero. Restarting resets counters.
    pub fn start(&mut self, now_ms: f64) {
        self.state = LoopState::Running;
        self.start_ms = now_ms;
        self.last_frame_ms = now_ms;
        self.last_sample_ms = now_ms;
        self.frame = 0;
        self.frames_since_sample = 0;
        self.fps = None;
        log::info!("render loop started");
    }

    /// Record one frame at `now_ms`. `None` while idle.
    pub fn frame(&mut self, now_ms: f64) -> Option<FrameInfo> {
        if self.state != LoopState::Running {
            return None;
        }
        self.frame += 1;
        self.frames_since_sample += 1;
        let delta = ((now_ms - self.last_frame_ms) / 1000.0).max(0.0);
        self.last_frame_ms = now_ms;

        let mut sampled = None;
        if self.frames_since_sample >= self.sample_frames {
            let seconds = (now_ms - self.last_sample_ms) / 1000.0;
            if seconds > 0.0 {
                let fps = self.frames_since_sample as f64 / seconds;
                self.fps = Some(fps);
                sampled = Some(fps);
                log::trace!("fps {fps:.1}");
            }
            self.frames_since_sample = 0;
            self.last_sample_ms = now_ms;
        }

        Some(FrameInfo {
            elapsed: (now_ms - self.start_ms) / 1000.0,
            delta,
            frame: self.frame,
            fps: sampled,
        })
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Frames produced since start.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Most recent FPS reading.
    #[must_use]
    pub fn fps(&self) -> Option<f64> {
        self.fps
    }
}
