//! Fixed-cadence host frame loop that resumes a generation run once per frame.
//!
//! The loop plays the role of an engine's per-frame update: each frame it
//! resumes the run at most once, and it skips frames while the run has asked
//! for a timed pause.

use std::time::{Duration, Instant};

use canyon_terrain::{PipelineRun, Resume, RunOutcome, Step, TerrainSink};
use tracing::warn;

/// Host frame period: 60 Hz.
pub const FRAME_TIME: Duration = Duration::from_nanos(16_666_667);

/// A frame later than this is reported, and the cadence restarts from now
/// instead of trying to catch up.
pub const MAX_FRAME_OVERRUN: Duration = Duration::from_millis(250);

/// Time source for the frame loop.
pub trait Clock {
    /// Time since the clock was created.
    fn elapsed(&self) -> Duration;
    /// Block for `duration`.
    fn sleep(&mut self, duration: Duration);
}

/// Wall-clock time.
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Frame pacing state.
pub struct FrameLoop<C = SystemClock> {
    clock: C,
    frame_time: Duration,
    next_frame: Duration,
    frame_count: u64,
    step_count: u64,
}

impl FrameLoop<SystemClock> {
    /// A 60 Hz loop on the wall clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock::new(), FRAME_TIME)
    }
}

impl Default for FrameLoop<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> FrameLoop<C> {
    pub fn with_clock(clock: C, frame_time: Duration) -> Self {
        let next_frame = clock.elapsed();
        Self {
            clock,
            frame_time,
            next_frame,
            frame_count: 0,
            step_count: 0,
        }
    }

    /// Resume `run` once per frame until it finishes.
    ///
    /// `on_frame` is called at the end of every frame, including frames where
    /// the run was paused, so an overlay can keep showing the latest status.
    pub fn drive<S: TerrainSink>(
        &mut self,
        run: &mut PipelineRun<'_, S>,
        mut on_frame: impl FnMut(&PipelineRun<'_, S>),
    ) -> RunOutcome {
        let mut resume_at = Duration::ZERO;
        loop {
            self.wait_for_frame();

            if self.clock.elapsed() >= resume_at {
                self.step_count += 1;
                match run.step() {
                    Step::Suspended(Resume::NextFrame) => resume_at = Duration::ZERO,
                    Step::Suspended(Resume::After(pause)) => {
                        resume_at = self.clock.elapsed() + pause;
                    }
                    Step::Finished(outcome) => {
                        on_frame(run);
                        return outcome;
                    }
                }
            }

            on_frame(run);
        }
    }

    fn wait_for_frame(&mut self) {
        let now = self.clock.elapsed();
        if now < self.next_frame {
            self.clock.sleep(self.next_frame - now);
        } else if now - self.next_frame > MAX_FRAME_OVERRUN {
            warn!(
                "Frame started {:.1}ms late, resetting frame cadence",
                (now - self.next_frame).as_secs_f64() * 1000.0
            );
            self.next_frame = now;
        }

        self.next_frame += self.frame_time;
        self.frame_count += 1;
    }

    /// Frames elapsed across every `drive` call.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Times a run was resumed across every `drive` call.
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}
