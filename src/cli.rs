//! CLI domain: parse, route, help, output, and presentation only.
//! No sweep logic; a single route table dispatches to the planner and emitter.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::command_name;
pub use output::map_error;
pub use parse::{Cli, Commands, ConfigCommands};
pub use presentation::{
    format_config_valid, format_generate_summary, format_plan_json, format_plan_text,
    format_status_report_json, format_status_report_text,
};
pub use route::RunContext;
