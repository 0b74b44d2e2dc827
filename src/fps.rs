use std::collections::VecDeque;

use egui::Color32;

/// Samples kept for the rolling chart
pub const HISTORY_SIZE: usize = 100;
/// Above this the frame rate is considered good
pub const GOOD_FPS: u32 = 55;
/// At or below this the frame rate is critical
pub const WARNING_FPS: u32 = 30;

/// Counts frames and reports the count once per elapsed second
#[derive(Debug, Default)]
pub struct FpsMeter {
    frames: u32,
    window_start: Option<f64>,
    current: u32,
}

impl FpsMeter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a frame at `now` (seconds). Returns `Some(fps)` when a one second
    /// window closed with this frame.
    pub fn measure(&mut self, now: f64) -> Option<u32> {
        self.frames += 1;
        let start = *self.window_start.get_or_insert(now);
        if now >= start + 1.0 {
            self.current = self.frames;
            self.frames = 0;
            self.window_start = Some(now);
            return Some(self.current);
        }
        None
    }

    /// Frames counted in the last complete second
    pub fn current(&self) -> u32 {
        self.current
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FpsLevel {
    Good,
    Warning,
    Critical,
}

impl FpsLevel {
    pub fn of(fps: u32) -> Self {
        if fps <= WARNING_FPS {
            FpsLevel::Critical
        } else if fps <= GOOD_FPS {
            FpsLevel::Warning
        } else {
            FpsLevel::Good
        }
    }

    pub fn color(&self) -> Color32 {
        match self {
            FpsLevel::Good => Color32::from_rgb(0x00, 0xff, 0x00),
            FpsLevel::Warning => Color32::from_rgb(0xff, 0xff, 0x00),
            FpsLevel::Critical => Color32::from_rgb(0xff, 0x00, 0x00),
        }
    }
}

/// Rolling per-second samples for the tools panel chart
#[derive(Debug, Default)]
pub struct FpsHistory {
    samples: VecDeque<u32>,
}

impl FpsHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, fps: u32) {
        self.samples.push_back(fps);
        while self.samples.len() > HISTORY_SIZE {
            self.samples.pop_front();
        }
    }

    pub fn samples(&self) -> impl Iterator<Item = u32> + '_ {
        self.samples.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn latest(&self) -> Option<u32> {
        self.samples.back().copied()
    }

    /// Rounded mean of the kept samples
    pub fn average(&self) -> Option<u32> {
        if self.samples.is_empty() {
            return None;
        }
        let sum: u64 = self.samples.iter().map(|fps| u64::from(*fps)).sum();
        Some((sum as f64 / self.samples.len() as f64).round() as u32)
    }

    pub fn min_max(&self) -> Option<(u32, u32)> {
        let min = self.samples.iter().min()?;
        let max = self.samples.iter().max()?;
        Some((*min, *max))
    }

    /// Chart color, taken from the newest sample
    pub fn level(&self) -> Option<FpsLevel> {
        self.latest().map(FpsLevel::of)
    }
}
