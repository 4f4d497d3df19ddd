//! Scenario runner for evaluating the offering at chosen amounts
//!
//! Pre-loads the scenario definitions once, then recomputes evaluations from
//! scratch on every call; no derived state is retained between runs.

use crate::evaluation::{evaluate, Evaluation};
use crate::schedule::{loader, LoadError, ScenarioKey, ScenarioSet};
use std::path::Path;

/// Which scenario(s) the caller is looking at. `All` is the comparison view:
/// all three scenarios on one shared axis, with Realistic as the focused
/// scenario for KPIs, the schedule table, and CSV export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioView {
    Conservative,
    Realistic,
    Optimistic,
    All,
}

impl ScenarioView {
    /// Scenario keys displayed under this view
    pub fn selected_keys(&self) -> &'static [ScenarioKey] {
        match self {
            ScenarioView::Conservative => &[ScenarioKey::Conservative],
            ScenarioView::Realistic => &[ScenarioKey::Realistic],
            ScenarioView::Optimistic => &[ScenarioKey::Optimistic],
            ScenarioView::All => &ScenarioKey::ALL,
        }
    }

    /// The key whose figures anchor the view
    pub fn anchor(&self) -> ScenarioKey {
        match self {
            ScenarioView::Conservative => ScenarioKey::Conservative,
            ScenarioView::Realistic | ScenarioView::All => ScenarioKey::Realistic,
            ScenarioView::Optimistic => ScenarioKey::Optimistic,
        }
    }
}

impl std::str::FromStr for ScenarioView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "conservative" => Ok(ScenarioView::Conservative),
            "realistic" => Ok(ScenarioView::Realistic),
            "optimistic" => Ok(ScenarioView::Optimistic),
            "all" | "compare" => Ok(ScenarioView::All),
            other => Err(format!("unknown scenario view: {}", other)),
        }
    }
}

/// Rejected target investment amount (must be strictly positive)
#[derive(Debug, Clone, Copy, thiserror::Error)]
#[error("target amount must be positive, got {0}")]
pub struct InvalidAmount(pub f64);

/// Pre-loaded runner over one scenario set
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    set: ScenarioSet,
}

impl ScenarioRunner {
    /// Create a runner over the built-in offering
    pub fn new() -> Self {
        Self {
            set: ScenarioSet::default_offering(),
        }
    }

    /// Create a runner by loading scenario definitions from a JSON file
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        Ok(Self {
            set: loader::load_scenarios(path)?,
        })
    }

    /// Create a runner from the default scenario definitions location
    pub fn from_default_json() -> Result<Self, LoadError> {
        Ok(Self {
            set: loader::load_default_scenarios()?,
        })
    }

    /// Create a runner with a pre-built scenario set
    pub fn with_set(set: ScenarioSet) -> Self {
        Self { set }
    }

    /// Evaluate the scenarios selected by `view` at the target amount.
    /// The target must be positive; schedules are defined at a positive
    /// reference ticket and a non-positive target has no meaning.
    pub fn run(
        &self,
        view: ScenarioView,
        target_amount: f64,
    ) -> Result<Vec<Evaluation>, InvalidAmount> {
        if !(target_amount > 0.0) {
            return Err(InvalidAmount(target_amount));
        }

        Ok(view
            .selected_keys()
            .iter()
            .map(|&key| evaluate(self.set.get(key), target_amount))
            .collect())
    }

    /// Evaluate one scenario at the target amount
    pub fn evaluate_scenario(
        &self,
        key: ScenarioKey,
        target_amount: f64,
    ) -> Result<Evaluation, InvalidAmount> {
        if !(target_amount > 0.0) {
            return Err(InvalidAmount(target_amount));
        }
        Ok(evaluate(self.set.get(key), target_amount))
    }

    /// Evaluate all three scenarios, in `ScenarioKey::ALL` order
    pub fn evaluate_all(&self, target_amount: f64) -> Result<Vec<Evaluation>, InvalidAmount> {
        self.run(ScenarioView::All, target_amount)
    }

    /// Get reference to the loaded scenario set
    pub fn scenarios(&self) -> &ScenarioSet {
        &self.set
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}
