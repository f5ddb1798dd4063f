//! General equilibrium: the outer fixed point on the interest rate.
//!
//! Each iteration derives the wage from the guessed rate, solves the
//! household problem, computes aggregate capital with the configured
//! distribution engine, and maps capital back to the implied rate
//! `MPK(K) - δ`. The guess moves against the residual with a [`Damping`]
//! rule until `|guess - implied| < tolerance`.
//!
//! Running out of iterations is not an error: the last evaluated state is
//! returned with `converged = false` and a warning is logged.

mod damping;
mod schedule;

pub use damping::Damping;
pub use schedule::{capital_schedule, default_rates, SchedulePoint};

use crate::distribution::{DistributionEngine, StationaryDistribution, StationaryOutcome};
use crate::economy::Economy;
use crate::error::SolveError;
use crate::household::{HouseholdSolver, Policy};
use aiyagari_models::Prices;
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Halvings of a step that would leave the stable rate region.
const MAX_BACKTRACKS: usize = 60;

/// One evaluation of the equilibrium map at a guessed rate.
#[derive(Debug, Clone)]
pub struct Evaluation {
    /// Prices at the guess
    pub prices: Prices,
    /// Household policy at those prices
    pub policy: Policy,
    /// Distribution engine output
    pub outcome: StationaryOutcome,
    /// Aggregate capital supplied by households
    pub capital: f64,
    /// `MPK(capital) - δ`
    pub implied_rate: f64,
    /// `guess - implied_rate`
    pub residual: f64,
}

/// Trace of one outer iteration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IterationRecord {
    /// 1-based iteration number
    pub iteration: usize,
    /// Guessed rate
    pub rate: f64,
    /// Aggregate capital at the guess
    pub capital: f64,
    /// Rate implied by that capital
    pub implied_rate: f64,
    /// `rate - implied_rate`
    pub residual: f64,
    /// Damping factor applied after this iteration (zero on the last one)
    pub damping: f64,
}

/// Complete-markets reference point and the precautionary savings measures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CompleteMarkets {
    /// `1/β - 1`
    pub rate: f64,
    /// Capital demanded at that rate
    pub capital: f64,
    /// `rate - r*`
    pub precautionary_savings_rate: f64,
    /// `(K* - capital) / capital`
    pub capital_excess: f64,
}

impl CompleteMarkets {
    /// Benchmark for an equilibrium at `rate` with aggregate `capital`.
    pub fn compare(economy: &Economy, rate: f64, capital: f64) -> Self {
        let cm_rate = economy.preferences().complete_markets_rate();
        let cm_capital = economy.technology().capital_demand(cm_rate);
        Self {
            rate: cm_rate,
            capital: cm_capital,
            precautionary_savings_rate: cm_rate - rate,
            capital_excess: (capital - cm_capital) / cm_capital,
        }
    }
}

/// Scalar results of an equilibrium run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquilibriumSummary {
    /// Distribution engine used
    pub method: String,
    /// Whether the residual fell below tolerance
    pub converged: bool,
    /// Outer iterations evaluated
    pub iterations: usize,
    /// Equilibrium interest rate
    pub rate: f64,
    /// Equilibrium wage
    pub wage: f64,
    /// Aggregate capital supplied
    pub capital: f64,
    /// Capital demanded at the rate
    pub capital_demand: f64,
    /// Final residual
    pub residual: f64,
    /// Complete-markets comparison
    pub benchmark: CompleteMarkets,
    /// Iteration trace
    pub history: Vec<IterationRecord>,
}

/// Equilibrium state with the policy and distribution that support it.
#[derive(Debug, Clone)]
pub struct Equilibrium {
    /// Scalar results
    pub summary: EquilibriumSummary,
    /// Household policy at the equilibrium prices
    pub policy: Policy,
    /// Stationary distribution at the equilibrium prices
    pub outcome: StationaryOutcome,
}

impl Equilibrium {
    /// Equilibrium interest rate.
    pub fn rate(&self) -> f64 {
        self.summary.rate
    }

    /// Equilibrium wage.
    pub fn wage(&self) -> f64 {
        self.summary.wage
    }

    /// Aggregate capital.
    pub fn capital(&self) -> f64 {
        self.summary.capital
    }

    /// Whether the outer loop converged.
    pub fn converged(&self) -> bool {
        self.summary.converged
    }
}

/// Damped fixed-point search on the interest rate.
///
/// # Examples
///
/// ```no_run
/// use aiyagari_solver::config::EconomyConfig;
/// use aiyagari_solver::economy::Economy;
/// use aiyagari_solver::equilibrium::EquilibriumSolver;
///
/// let economy = Economy::new(EconomyConfig::default()).unwrap();
/// let equilibrium = EquilibriumSolver::new(&economy).solve().unwrap();
/// assert!(equilibrium.rate() < 1.0 / 0.96 - 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct EquilibriumSolver<'a> {
    economy: &'a Economy,
    engine: DistributionEngine,
}

impl<'a> EquilibriumSolver<'a> {
    /// Solver with the engine named in the economy's configuration.
    pub fn new(economy: &'a Economy) -> Self {
        Self {
            economy,
            engine: DistributionEngine::from_config(economy.config()),
        }
    }

    /// Replace the distribution engine.
    pub fn with_engine(mut self, engine: DistributionEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Distribution engine in use.
    pub fn engine(&self) -> &DistributionEngine {
        &self.engine
    }

    /// Evaluate the equilibrium map at `rate`.
    ///
    /// # Errors
    ///
    /// - `SolveError::UnstableRate` if `(1 + r)β >= 1` or `r + δ <= 0`
    /// - household and distribution failures
    pub fn evaluate(&self, rate: f64) -> Result<Evaluation, SolveError> {
        if !self.is_stable(rate) {
            let patience = self.economy.preferences().gross_patience(rate);
            return Err(SolveError::UnstableRate { rate, patience });
        }

        let prices = self.economy.prices(rate);
        let policy = HouseholdSolver::new(self.economy).solve(prices)?;
        let outcome = self.engine.stationary(self.economy, &policy)?;
        let capital = outcome.aggregate_capital();
        let implied_rate = self.economy.technology().rate_from_capital(capital);

        Ok(Evaluation {
            prices,
            policy,
            outcome,
            capital,
            implied_rate,
            residual: rate - implied_rate,
        })
    }

    /// Whether `rate` satisfies `(1 + r)β < 1` and `r + δ > 0`.
    pub fn is_stable(&self, rate: f64) -> bool {
        self.economy.preferences().gross_patience(rate) < 1.0 && rate + self.economy.technology().delta() > 0.0
    }

    /// Iterate on the rate from the configured initial guess.
    ///
    /// A damped step that would leave the stable rate region is halved
    /// towards the current guess until it lands inside.
    pub fn solve(&self) -> Result<Equilibrium, SolveError> {
        let settings = &self.economy.config().equilibrium;
        let start = Instant::now();
        let mut damping = Damping::from_config(settings);
        let mut history = Vec::with_capacity(settings.max_iterations);
        let mut guess = settings.initial_rate;
        let mut last = None;

        for iteration in 1..=settings.max_iterations {
            let evaluation = self.evaluate(guess)?;
            let converged = evaluation.residual.abs() < settings.tolerance;

            let (mut next, mut factor) = if converged {
                (guess, 0.0)
            } else {
                damping.update(guess, evaluation.residual)
            };
            let mut halvings = 0;
            while !self.is_stable(next) && halvings < MAX_BACKTRACKS {
                next = guess + 0.5 * (next - guess);
                factor *= 0.5;
                halvings += 1;
            }
            if halvings > 0 {
                debug!(iteration, halvings, next, "rate step shortened to stay below 1/β - 1");
            }

            info!(
                iteration,
                rate = guess,
                capital = evaluation.capital,
                implied_rate = evaluation.implied_rate,
                residual = evaluation.residual,
                damping = factor,
                "equilibrium iteration"
            );
            history.push(IterationRecord {
                iteration,
                rate: guess,
                capital: evaluation.capital,
                implied_rate: evaluation.implied_rate,
                residual: evaluation.residual,
                damping: factor,
            });

            if converged {
                info!(
                    iterations = iteration,
                    rate = guess,
                    wage = evaluation.prices.wage,
                    capital = evaluation.capital,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "equilibrium found"
                );
                return Ok(self.finish(evaluation, true, history));
            }

            if !self.is_stable(next) {
                warn!(
                    iteration,
                    rate = guess,
                    next,
                    "no stable rate step found, reporting last evaluated state"
                );
                return Ok(self.finish(evaluation, false, history));
            }

            guess = next;
            last = Some(evaluation);
        }

        // max_iterations >= 1 after validation, so an evaluation exists
        let evaluation = match last {
            Some(evaluation) => evaluation,
            None => self.evaluate(guess)?,
        };
        warn!(
            iterations = settings.max_iterations,
            rate = evaluation.prices.rate,
            residual = evaluation.residual,
            "equilibrium iteration cap reached, reporting last evaluated state"
        );
        Ok(self.finish(evaluation, false, history))
    }

    fn finish(&self, evaluation: Evaluation, converged: bool, history: Vec<IterationRecord>) -> Equilibrium {
        let rate = evaluation.prices.rate;
        let summary = EquilibriumSummary {
            method: self.engine.method().to_string(),
            converged,
            iterations: history.len(),
            rate,
            wage: evaluation.prices.wage,
            capital: evaluation.capital,
            capital_demand: self.economy.technology().capital_demand(rate),
            residual: evaluation.residual,
            benchmark: CompleteMarkets::compare(self.economy, rate, evaluation.capital),
            history,
        };
        Equilibrium {
            summary,
            policy: evaluation.policy,
            outcome: evaluation.outcome,
        }
    }
}
