//! Sweepgen: Parameter-Sweep Script Generation
//!
//! Enumerates combinations of experiment flags, drops invalid ones with keyed exclusion
//! rules, renders each survivor into a command line, and emits a shell script that runs
//! them one after another while tracking progress in a status file.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod script;
pub mod sweep;

pub use config::SweepConfig;
pub use error::SweepError;
pub use script::ScriptEmitter;
pub use sweep::SweepPlan;

/// Build the plan for `config` and emit the script text.
pub fn generate_script(config: &SweepConfig) -> Result<(SweepPlan, String), SweepError> {
    let plan = SweepPlan::build(config)?;
    let script = ScriptEmitter::new(config).emit(&plan);
    Ok((plan, script))
}
