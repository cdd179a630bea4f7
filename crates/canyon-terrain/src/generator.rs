//! Long-lived terrain generator component that starts runs and collects status.

use crossbeam_channel::{Receiver, Sender, unbounded};

use crate::run::PipelineRun;
use crate::settings::GenerationSettings;
use crate::sink::TerrainSink;

/// Starts [`PipelineRun`]s with shared settings and collects their status updates.
pub struct TerrainGenerator {
    settings: GenerationSettings,
    status_sender: Sender<String>,
    status_receiver: Receiver<String>,
    last_status: String,
}

impl TerrainGenerator {
    pub fn new(settings: GenerationSettings) -> Self {
        let (status_sender, status_receiver) = unbounded();
        Self {
            settings,
            status_sender,
            status_receiver,
            last_status: String::new(),
        }
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    /// Replace the settings used by runs started from now on.
    pub fn set_settings(&mut self, settings: GenerationSettings) {
        self.settings = settings;
    }

    /// Start a run against `sink`.
    ///
    /// Unless seed randomization is disabled, the run draws a fresh seed once
    /// the terrain is reset and the configured noise seed is ignored, so every
    /// run produces new terrain. A `None` sink yields a run that fails on its
    /// first step.
    ///
    /// Status left undrained from earlier runs is folded into
    /// [`last_status`](Self::last_status) and discarded, so the feed never
    /// holds more than one run's updates.
    pub fn start<'a, S: TerrainSink>(&mut self, sink: Option<&'a mut S>) -> PipelineRun<'a, S> {
        if !self.settings.randomize_seed {
            return self.start_with_seed(sink, self.settings.noise.seed);
        }
        self.discard_backlog();
        tracing::info!("starting terrain generation run with a fresh seed");
        PipelineRun::reseeding(sink, self.settings.clone()).with_status_feed(self.status_sender.clone())
    }

    /// Start a run with a pinned seed.
    pub fn start_with_seed<'a, S: TerrainSink>(
        &mut self,
        sink: Option<&'a mut S>,
        seed: i32,
    ) -> PipelineRun<'a, S> {
        self.discard_backlog();
        tracing::info!(seed, "starting terrain generation run");
        PipelineRun::new(sink, self.settings.clone(), seed).with_status_feed(self.status_sender.clone())
    }

    fn discard_backlog(&mut self) {
        let stale = self.drain_status().len();
        if stale > 0 {
            tracing::debug!(stale, "discarded undrained status updates");
        }
    }

    /// All status messages published since the last call, oldest first.
    ///
    /// Call this once per frame from the host's update loop.
    pub fn drain_status(&mut self) -> Vec<String> {
        let messages: Vec<String> = self.status_receiver.try_iter().collect();
        if let Some(last) = messages.last() {
            self.last_status.clone_from(last);
        }
        messages
    }

    /// The most recent status seen by [`drain_status`](Self::drain_status).
    pub fn last_status(&self) -> &str {
        &self.last_status
    }
}

impl Default for TerrainGenerator {
    fn default() -> Self {
        Self::new(GenerationSettings::default())
    }
}
