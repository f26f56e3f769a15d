//! The session controller: adaptive probe state machine plus sequencer.
//!
//! One instance per session. Every listener/operator event is one method
//! call; there is no other way state changes. Between `confirm` issuing
//! its persistence call and the response arriving, the trial is already
//! deactivated, so a second confirmation cannot race the first.

use std::collections::VecDeque;

use tracing::{debug, info, warn};

use equiloud_core::{ComponentParams, SignalSpecification, build_specification};

use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::ports::{AudioOutput, DataPointSink, StimulusRenderer};
use crate::trial::{
    DataPoint, PROBE_LEVEL_MAX_DB_SPL, PROBE_LEVEL_MIN_DB_SPL, PROBE_LEVEL_STEP_DB, PendingTrial,
    TrialState,
};

/// What is currently audible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Playing {
    Nothing,
    Probe,
    Combined,
    Calibration,
}

/// Controller status after a confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// No active trial; the command was ignored.
    Idle,
    /// A trial is in progress (the next one, after a confirmation).
    TrialInProgress,
    /// The queue is exhausted; a fresh `start` is required to continue.
    SessionComplete,
}

/// The one stateful experiment object.
///
/// Owns the pending trial queue, the in-flight [`TrialState`], and the
/// result log; drives the rendering, playback, and persistence
/// collaborators through their port traits.
#[derive(Debug)]
pub struct SessionController<R, O, S> {
    renderer: R,
    output: O,
    sink: S,
    config: Option<SessionConfig>,
    queue: VecDeque<PendingTrial>,
    results: Vec<DataPoint>,
    trial: Option<TrialState>,
    playing: Playing,
    eval_counter: u64,
}

impl<R, O, S> SessionController<R, O, S>
where
    R: StimulusRenderer,
    O: AudioOutput,
    S: DataPointSink,
{
    /// Create an idle controller over its three collaborators.
    pub fn new(renderer: R, output: O, sink: S) -> Self {
        Self {
            renderer,
            output,
            sink,
            config: None,
            queue: VecDeque::new(),
            results: Vec::new(),
            trial: None,
            playing: Playing::Nothing,
            eval_counter: 0,
        }
    }

    /// Start a session: validate, build the trial queue from the
    /// frequency grid, reset all per-session state, begin the first trial.
    ///
    /// # Errors
    ///
    /// [`SessionError::InvalidConfiguration`] before anything is touched
    /// if the masker lists mismatch or the grid cannot be built.
    pub fn start(&mut self, config: SessionConfig) -> Result<(), SessionError> {
        config.validate()?;
        let grid = config.grid()?;

        self.silence();
        self.queue = grid
            .iter()
            .map(|probe_frequency_hz| PendingTrial { probe_frequency_hz })
            .collect();
        self.results.clear();
        self.trial = None;
        self.eval_counter = 0;
        self.config = Some(config);

        info!(trials = self.queue.len(), "session started");
        let first = self.queue.pop_front().expect("grid is never empty");
        self.begin_trial(first)
    }

    /// Raise the probe level one step.
    pub fn raise(&mut self) {
        self.adjust(PROBE_LEVEL_STEP_DB);
    }

    /// Lower the probe level one step.
    pub fn lower(&mut self) {
        self.adjust(-PROBE_LEVEL_STEP_DB);
    }

    /// Toggle the standalone probe. Starting it stops anything else.
    pub fn toggle_probe(&mut self) {
        let Some(trial) = &self.trial else { return };
        if !trial.active {
            return;
        }
        if self.playing == Playing::Probe {
            self.silence();
        } else {
            let asset = trial.probe_asset.clone();
            self.silence();
            let gain_db = self.probe_gain_db();
            self.output.play(&asset, gain_db);
            self.playing = Playing::Probe;
        }
    }

    /// Toggle the combined (probe + maskers) rendering. Starting it stops
    /// anything else.
    pub fn toggle_combined(&mut self) {
        let Some(trial) = &self.trial else { return };
        if !trial.active {
            return;
        }
        if self.playing == Playing::Combined {
            self.silence();
        } else {
            let asset = trial.combined_asset.clone();
            self.silence();
            self.output.play(&asset, 0.0);
            self.playing = Playing::Combined;
        }
    }

    /// Confirm "equally loud": finalize the trial into a [`DataPoint`],
    /// hand it to the sink, and advance the sequencer.
    ///
    /// Ignored (returns [`SessionStatus::Idle`]) unless a trial is active.
    ///
    /// # Errors
    ///
    /// [`SessionError::Persistence`] if the sink rejects the point; the
    /// trial is then re-activated and remains current for a retry.
    pub fn confirm(&mut self) -> Result<SessionStatus, SessionError> {
        let Some(trial) = &mut self.trial else {
            return Ok(SessionStatus::Idle);
        };
        if !trial.active {
            return Ok(SessionStatus::Idle);
        }

        // Deactivate before the suspension point so no second
        // confirmation can slip in while the sink call is pending.
        trial.active = false;
        let point = {
            let config = self.config.as_ref().expect("active trial implies config");
            DataPoint {
                evaluation_id: trial.evaluation_id.clone(),
                probe_frequency_hz: trial.probe_frequency_hz,
                matched_level_db_spl: trial.probe_level_db_spl,
                signal_family: config.signal_family,
                erb_width: config.erb_width,
                mask_frequencies: config.mask_frequencies.clone(),
                mask_levels: config.mask_levels.clone(),
                probe_level_setting_db_spl: config.probe_level_db_spl,
                erb_apart: config.erb_apart,
                calibration_level_db_spl: config.calibration_level_db_spl,
            }
        };
        self.silence();

        if let Err(e) = self.sink.record(&point) {
            warn!(evaluation = %point.evaluation_id, error = %e, "persistence failed; trial retained");
            if let Some(trial) = &mut self.trial {
                trial.active = true;
            }
            return Err(e.into());
        }

        info!(
            evaluation = %point.evaluation_id,
            frequency_hz = point.probe_frequency_hz,
            matched_db = point.matched_level_db_spl,
            "trial recorded"
        );
        self.results.push(point);
        self.trial = None;

        match self.queue.pop_front() {
            Some(next) => {
                self.begin_trial(next)?;
                Ok(SessionStatus::TrialInProgress)
            }
            None => {
                info!("session complete");
                Ok(SessionStatus::SessionComplete)
            }
        }
    }

    /// Play the calibration tone: 1 kHz at the configured reference level.
    ///
    /// Available whenever a session configuration is loaded; replaces any
    /// other playback. The resource carries a `#calibration` qualifier so
    /// it never aliases a trial asset.
    pub fn play_calibration(&mut self) -> Result<(), SessionError> {
        let spec = {
            let Some(config) = &self.config else { return Ok(()) };
            build_specification(
                config.signal_family,
                config.erb_width,
                &[ComponentParams {
                    id: "calibration".to_string(),
                    delay_secs: 0.0,
                    frequency_hz: 1000.0,
                    level_db_spl: config.calibration_level_db_spl,
                }],
            )
        };
        let resource = format!("{}#calibration", spec.canonical_text()?);
        let asset = self.renderer.prepare(&resource, &spec);
        self.silence();
        self.output.play(&asset, 0.0);
        self.playing = Playing::Calibration;
        Ok(())
    }

    /// Confirmed measurements so far, in sweep order.
    pub fn results(&self) -> &[DataPoint] {
        &self.results
    }

    /// The in-flight trial, if any.
    pub fn current_trial(&self) -> Option<&TrialState> {
        self.trial.as_ref()
    }

    /// Trials still queued after the current one.
    pub fn pending_trials(&self) -> usize {
        self.queue.len()
    }

    /// True while listener controls are live.
    pub fn is_active(&self) -> bool {
        self.trial.as_ref().is_some_and(|t| t.active)
    }

    /// The rendering collaborator.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// The persistence collaborator.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    fn adjust(&mut self, delta_db: f32) {
        let Some(trial) = &mut self.trial else { return };
        if !trial.active {
            return;
        }
        trial.probe_level_db_spl = (trial.probe_level_db_spl + delta_db)
            .clamp(PROBE_LEVEL_MIN_DB_SPL, PROBE_LEVEL_MAX_DB_SPL);
        if self.playing == Playing::Probe {
            let gain_db = self.probe_gain_db();
            self.output.set_gain(gain_db);
        }
    }

    /// Gain of the standalone probe relative to its rendered level.
    fn probe_gain_db(&self) -> f32 {
        let trial = self.trial.as_ref().expect("caller checked");
        let setting = self
            .config
            .as_ref()
            .map_or(trial.probe_level_db_spl, |c| c.probe_level_db_spl);
        trial.probe_level_db_spl - setting
    }

    fn silence(&mut self) {
        if self.playing != Playing::Nothing {
            self.output.stop();
            self.playing = Playing::Nothing;
        }
    }

    fn begin_trial(&mut self, pending: PendingTrial) -> Result<(), SessionError> {
        self.eval_counter += 1;
        let evaluation_id = format!("eval-{}", self.eval_counter);

        let (probe_spec, combined_spec, probe_level_db_spl) = {
            let config = self.config.as_ref().expect("start sets config");
            let probe_entry = ComponentParams {
                id: "probe".to_string(),
                delay_secs: 0.0,
                frequency_hz: pending.probe_frequency_hz,
                level_db_spl: config.probe_level_db_spl,
            };
            let probe_spec =
                build_specification(config.signal_family, config.erb_width, &[probe_entry]);

            let mut combined_entries: Vec<ComponentParams> = config
                .mask_frequencies
                .iter()
                .zip(&config.mask_levels)
                .enumerate()
                .map(|(i, (&frequency_hz, &level_db_spl))| ComponentParams {
                    id: format!("masker-{i}"),
                    delay_secs: 0.0,
                    frequency_hz,
                    level_db_spl,
                })
                .collect();
            combined_entries.push(ComponentParams {
                id: "probe".to_string(),
                delay_secs: config.probe_delay_secs,
                frequency_hz: pending.probe_frequency_hz,
                level_db_spl: config.probe_level_db_spl,
            });
            let combined_spec =
                build_specification(config.signal_family, config.erb_width, &combined_entries);

            (probe_spec, combined_spec, config.probe_level_db_spl)
        };

        let (probe_asset, combined_asset) =
            self.prepare_assets(&evaluation_id, &probe_spec, &combined_spec)?;

        debug!(
            evaluation = %evaluation_id,
            frequency_hz = pending.probe_frequency_hz,
            "trial begun"
        );
        self.trial = Some(TrialState {
            probe_frequency_hz: pending.probe_frequency_hz,
            probe_level_db_spl,
            evaluation_id,
            probe_asset,
            combined_asset,
            active: true,
        });
        Ok(())
    }

    fn prepare_assets(
        &mut self,
        evaluation_id: &str,
        probe_spec: &SignalSpecification,
        combined_spec: &SignalSpecification,
    ) -> Result<(String, String), SessionError> {
        let probe_resource = format!("{}#eval={evaluation_id}", probe_spec.canonical_text()?);
        let combined_resource =
            format!("{}#eval={evaluation_id}", combined_spec.canonical_text()?);
        let probe_asset = self.renderer.prepare(&probe_resource, probe_spec);
        let combined_asset = self.renderer.prepare(&combined_resource, combined_spec);
        Ok((probe_asset, combined_asset))
    }
}
