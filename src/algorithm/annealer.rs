//! Generic simulated annealing over reversible, in-place moves
//!
//! Unlike neighbor-cloning formulations, the state here is mutated in place
//! and a rejected move is rolled back through its undo token. That keeps a
//! step proportional to the size of the perturbation rather than the size of
//! the state; the only full copy happens when a new best is captured.

use crate::io::error::{Result, invalid_parameter};
use crate::math::schedule::{ExponentialSchedule, acceptance_probability};
use rand::Rng;

/// A state the annealer can perturb, score and roll back
pub trait AnnealState {
    /// Information needed to revert one move
    type Undo;

    /// Cost of the current state; lower is better and 0 is optimal
    fn energy(&self) -> f64;

    /// Apply one random perturbation in place
    ///
    /// Returns `None` when there is nothing worth perturbing, in which case
    /// the state is left untouched.
    fn do_move<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Self::Undo>;

    /// Revert the move that produced `undo`
    ///
    /// Must restore the exact state and energy from before the paired
    /// `do_move`.
    fn undo_move(&mut self, undo: Self::Undo);

    /// Independent copy sharing no mutable data with `self`
    #[must_use]
    fn deep_copy(&self) -> Self;
}

/// Schedule bounds and step budget
#[derive(Debug, Clone, Copy)]
pub struct AnnealConfig {
    /// Temperature on step 0
    pub max_temperature: f64,
    /// Temperature approached on the final step
    pub min_temperature: f64,
    /// Maximum number of steps
    pub steps: usize,
}

impl Default for AnnealConfig {
    fn default() -> Self {
        use crate::io::configuration::{
            DEFAULT_MAX_TEMPERATURE, DEFAULT_MIN_TEMPERATURE, DEFAULT_STEPS,
        };
        Self {
            max_temperature: DEFAULT_MAX_TEMPERATURE,
            min_temperature: DEFAULT_MIN_TEMPERATURE,
            steps: DEFAULT_STEPS,
        }
    }
}

impl AnnealConfig {
    /// Set the starting temperature
    #[must_use]
    pub const fn with_max_temperature(mut self, temperature: f64) -> Self {
        self.max_temperature = temperature;
        self
    }

    /// Set the final temperature
    #[must_use]
    pub const fn with_min_temperature(mut self, temperature: f64) -> Self {
        self.min_temperature = temperature;
        self
    }

    /// Set the step budget
    #[must_use]
    pub const fn with_steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    /// Check the schedule is well defined
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if a temperature is not a positive finite
    /// number or the minimum exceeds the maximum
    pub fn validate(&self) -> Result<()> {
        for (parameter, value) in [
            ("max_temperature", self.max_temperature),
            ("min_temperature", self.min_temperature),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &"must be a positive finite number",
                ));
            }
        }
        if self.min_temperature > self.max_temperature {
            return Err(invalid_parameter(
                "min_temperature",
                &self.min_temperature,
                &format!("must not exceed max_temperature ({})", self.max_temperature),
            ));
        }
        Ok(())
    }
}

/// Snapshot handed to the observer after every step
#[derive(Debug, Clone, Copy)]
pub struct StepReport {
    /// Zero-based step index
    pub step: usize,
    /// Step budget of the run
    pub steps: usize,
    /// Temperature used on this step
    pub temperature: f64,
    /// Energy of the live state after the accept/reject decision
    pub current_energy: f64,
    /// Lowest energy seen so far
    pub best_energy: f64,
    /// Whether this step's move was kept
    pub accepted: bool,
}

/// Result of an annealing run
#[derive(Debug, Clone)]
pub struct AnnealOutcome<S> {
    /// Lowest-energy state seen
    pub best: S,
    /// Energy of `best` at the time it was captured
    pub best_energy: f64,
    /// Steps executed (moves attempted)
    pub steps_run: usize,
    /// Moves kept, including improving ones
    pub accepted_moves: usize,
    /// Moves that set a new best
    pub improving_moves: usize,
    /// Whether the run stopped before exhausting its budget
    pub terminated_early: bool,
}

/// Drives an `AnnealState` down an exponential temperature schedule
#[derive(Debug, Clone, Copy)]
pub struct Annealer {
    config: AnnealConfig,
}

impl Annealer {
    /// Create an annealer after validating its configuration
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the configuration is invalid
    pub fn new(config: AnnealConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The run configuration
    pub const fn config(&self) -> &AnnealConfig {
        &self.config
    }

    /// Anneal `state` and return the best state seen
    pub fn run<S, R>(&self, state: S, rng: &mut R) -> AnnealOutcome<S>
    where
        S: AnnealState,
        R: Rng + ?Sized,
    {
        self.run_with_observer(state, rng, |_| {})
    }

    /// Anneal `state`, reporting every completed step to `observer`
    ///
    /// Stops as soon as the best energy reaches zero; a state that starts at
    /// zero energy is returned without a single move.
    pub fn run_with_observer<S, R, F>(
        &self,
        mut state: S,
        rng: &mut R,
        mut observer: F,
    ) -> AnnealOutcome<S>
    where
        S: AnnealState,
        R: Rng + ?Sized,
        F: FnMut(&StepReport),
    {
        let steps = self.config.steps;
        let schedule = ExponentialSchedule::new(
            self.config.max_temperature,
            self.config.min_temperature,
            steps,
        );

        let mut current_energy = state.energy();
        let mut outcome = AnnealOutcome {
            best: state.deep_copy(),
            best_energy: current_energy,
            steps_run: 0,
            accepted_moves: 0,
            improving_moves: 0,
            terminated_early: false,
        };

        if outcome.best_energy <= 0.0 {
            outcome.terminated_early = steps > 0;
            return outcome;
        }

        for step in 0..steps {
            let temperature = schedule.temperature(step);
            let Some(undo) = state.do_move(rng) else {
                outcome.terminated_early = true;
                break;
            };
            outcome.steps_run += 1;

            let energy = state.energy();
            let delta = energy - current_energy;

            // Only uphill moves consume a random draw
            let accepted = delta <= 0.0
                || rng.random::<f64>() <= acceptance_probability(delta, temperature);

            if accepted {
                current_energy = energy;
                outcome.accepted_moves += 1;
                if energy < outcome.best_energy {
                    outcome.best_energy = energy;
                    outcome.best = state.deep_copy();
                    outcome.improving_moves += 1;
                }
            } else {
                state.undo_move(undo);
            }

            observer(&StepReport {
                step,
                steps,
                temperature,
                current_energy,
                best_energy: outcome.best_energy,
                accepted,
            });

            if outcome.best_energy <= 0.0 {
                outcome.terminated_early = step + 1 < steps;
                break;
            }
        }

        outcome
    }
}
