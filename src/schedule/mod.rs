//! Cash-flow schedule model and scenario loading

mod data;
pub mod loader;

pub use data::{
    CashFlowEvent, ScaledEvent, ScaledSchedule, ScenarioKey, ScenarioSet, Schedule,
    REFERENCE_TICKET,
};
pub use loader::{load_default_scenarios, load_scenarios, LoadError, DEFAULT_SCENARIOS_PATH};
