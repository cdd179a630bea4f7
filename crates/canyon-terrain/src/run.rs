//! A single cooperative terrain generation run.
//!
//! [`PipelineRun`] is a resumable state machine: every call to
//! [`step`](PipelineRun::step) does one chunk of work and then hands control
//! back to the host, saying when it wants to be resumed. A host that stops
//! calling `step` leaves the terrain at its last commit, where every committed
//! row is fully processed.

use std::time::Duration;

use canyon_noise::{NoiseField, NoiseFieldGenerator};
use crossbeam_channel::Sender;
use rand::Rng;

use crate::buffer::HeightBuffer;
use crate::error::GenerationError;
use crate::pass::{ShapingPass, apply_row};
use crate::settings::{GenerationSettings, RUN_SEED_RANGE};
use crate::sink::TerrainSink;

/// Fixed status messages reported at run milestones.
pub mod status {
    pub const RESETTING: &str = "Resetting terrain";
    pub const GENERATING: &str = "Generating terrain";
    pub const COMPLETE: &str = "Terrain generated";
    pub const FAILED_PREFIX: &str = "Generate failed.";
}

/// When a suspended run wants to continue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resume {
    /// On the next host frame.
    NextFrame,
    /// Once the given time has elapsed.
    After(Duration),
}

/// How a run ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    Failed(GenerationError),
}

/// Result of advancing a run by one step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Suspended(Resume),
    Finished(RunOutcome),
}

struct PassState {
    index: usize,
    field: NoiseField,
    heights: HeightBuffer,
    row: usize,
    rows_until_commit: usize,
}

enum Stage {
    Resolve,
    Reset,
    Announce,
    BeginPass(usize),
    Pass(PassState),
    Finish,
    Closing,
    Done(RunOutcome),
}

/// State for one full generation against a terrain sink.
///
/// The run holds the sink mutably for its whole lifetime, so a second run
/// cannot target the same terrain until this one is dropped.
pub struct PipelineRun<'a, S: TerrainSink> {
    sink: Option<&'a mut S>,
    settings: GenerationSettings,
    seed: Option<i32>,
    noise: NoiseFieldGenerator,
    stage: Stage,
    status: String,
    feed: Option<Sender<String>>,
}

impl<'a, S: TerrainSink> PipelineRun<'a, S> {
    /// Prepare a run with a pinned seed. Nothing touches the sink until the
    /// first [`step`](Self::step).
    pub fn new(sink: Option<&'a mut S>, settings: GenerationSettings, seed: i32) -> Self {
        Self::with_seed(sink, settings, Some(seed))
    }

    /// Prepare a run that draws a fresh seed from [`RUN_SEED_RANGE`] once the
    /// terrain has been reset, just before the first pass.
    pub fn reseeding(sink: Option<&'a mut S>, settings: GenerationSettings) -> Self {
        Self::with_seed(sink, settings, None)
    }

    fn with_seed(sink: Option<&'a mut S>, settings: GenerationSettings, seed: Option<i32>) -> Self {
        Self {
            sink,
            settings,
            seed,
            noise: NoiseFieldGenerator::perlin(),
            stage: Stage::Resolve,
            status: String::new(),
            feed: None,
        }
    }

    /// Also send every status update to `feed`.
    pub fn with_status_feed(mut self, feed: Sender<String>) -> Self {
        self.feed = Some(feed);
        self
    }

    /// The seed this run derives every pass seed from, once it is known.
    pub fn seed(&self) -> Option<i32> {
        self.seed
    }

    /// The latest status message.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// The pass currently being applied, if any.
    pub fn current_pass(&self) -> Option<ShapingPass> {
        match &self.stage {
            Stage::BeginPass(index) => ShapingPass::ALL.get(*index).copied(),
            Stage::Pass(state) => Some(ShapingPass::ALL[state.index]),
            _ => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.stage, Stage::Done(_))
    }

    /// Advance the run to its next checkpoint.
    ///
    /// Once finished, every further call returns the same outcome without
    /// touching the sink.
    pub fn step(&mut self) -> Step {
        match &self.stage {
            Stage::Done(outcome) => return Step::Finished(outcome.clone()),
            Stage::Resolve => return self.resolve(),
            _ => {}
        }

        let sink = match self.sink.as_deref_mut() {
            Some(sink) => sink,
            None => return self.fail(GenerationError::MissingTerrain),
        };
        let rows_per_yield = self.settings.rows_per_yield.max(1);

        loop {
            match &mut self.stage {
                Stage::Reset => {
                    let (width, height) = sink.resolution();
                    sink.set_heights(&HeightBuffer::zeroed(width, height));
                    sink.reset_ancillary_layers();
                    sink.flush();
                    self.stage = Stage::Announce;
                    return Step::Suspended(Resume::NextFrame);
                }
                Stage::Announce => {
                    publish(&mut self.status, self.feed.as_ref(), status::GENERATING.to_string());
                    self.stage = Stage::BeginPass(0);
                    return Step::Suspended(Resume::After(self.settings.phase_pause));
                }
                Stage::BeginPass(index) => {
                    let index = *index;
                    let Some(&pass) = ShapingPass::ALL.get(index) else {
                        self.stage = Stage::Finish;
                        continue;
                    };

                    let seed = *self.seed.get_or_insert_with(|| {
                        let seed = rand::rng().random_range(RUN_SEED_RANGE);
                        tracing::info!(seed, "drew run seed");
                        seed
                    });
                    let (width, height) = sink.resolution();
                    let base = self.settings.noise.clone().with_size(width, height);
                    let params = pass.noise_params(&base, seed);
                    tracing::info!(
                        pass = pass.label(),
                        phase = pass.phase(),
                        seed = params.seed,
                        "starting shaping pass"
                    );

                    self.stage = Stage::Pass(PassState {
                        index,
                        field: self.noise.generate(&params),
                        heights: sink.heights(),
                        row: 0,
                        rows_until_commit: rows_per_yield,
                    });
                }
                Stage::Pass(state) => {
                    let pass = ShapingPass::ALL[state.index];
                    let total = state.heights.height();

                    while state.row < total {
                        apply_row(&mut state.heights, &state.field, pass, state.row);
                        state.row += 1;
                        state.rows_until_commit -= 1;

                        if state.rows_until_commit == 0 {
                            state.rows_until_commit = rows_per_yield;
                            sink.set_heights(&state.heights);
                            tracing::debug!(pass = pass.label(), row = state.row, total, "committed rows");
                            publish(
                                &mut self.status,
                                self.feed.as_ref(),
                                format!("{} {}/{}", pass.label(), state.row, total),
                            );
                            return Step::Suspended(Resume::NextFrame);
                        }
                    }

                    sink.set_heights(&state.heights);
                    sink.flush();
                    tracing::info!(pass = pass.label(), "shaping pass complete");
                    let next = state.index + 1;
                    self.stage = Stage::BeginPass(next);
                    return Step::Suspended(Resume::NextFrame);
                }
                Stage::Finish => {
                    tracing::info!(seed = self.seed.unwrap_or_default(), "terrain generation complete");
                    publish(&mut self.status, self.feed.as_ref(), status::COMPLETE.to_string());
                    self.stage = Stage::Closing;
                    return Step::Suspended(Resume::After(self.settings.phase_pause));
                }
                Stage::Closing => {
                    self.stage = Stage::Done(RunOutcome::Completed);
                    return Step::Finished(RunOutcome::Completed);
                }
                Stage::Resolve | Stage::Done(_) => unreachable!("handled before the loop"),
            }
        }
    }

    /// Step until the run finishes, ignoring every requested pause.
    pub fn run_to_completion(&mut self) -> RunOutcome {
        loop {
            if let Step::Finished(outcome) = self.step() {
                return outcome;
            }
        }
    }

    fn resolve(&mut self) -> Step {
        let Some(sink) = self.sink.as_deref_mut() else {
            return self.fail(GenerationError::MissingTerrain);
        };

        let (width, height) = sink.resolution();
        if width == 0 || height == 0 {
            return self.fail(GenerationError::InvalidResolution { width, height });
        }

        sink.set_physical_size(self.settings.terrain_size);
        publish(&mut self.status, self.feed.as_ref(), status::RESETTING.to_string());
        self.stage = Stage::Reset;
        Step::Suspended(Resume::NextFrame)
    }

    fn fail(&mut self, error: GenerationError) -> Step {
        let message = format!("{} {}", status::FAILED_PREFIX, capitalize(&error.to_string()));
        tracing::warn!(%error, "terrain generation aborted");
        publish(&mut self.status, self.feed.as_ref(), message);

        let outcome = RunOutcome::Failed(error);
        self.stage = Stage::Done(outcome.clone());
        Step::Finished(outcome)
    }
}

fn publish(status: &mut String, feed: Option<&Sender<String>>, message: String) {
    tracing::debug!(status = %message);
    if let Some(feed) = feed {
        let _ = feed.send(message.clone());
    }
    *status = message;
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>() + ".",
        None => String::new(),
    }
}
