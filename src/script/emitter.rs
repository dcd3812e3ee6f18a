//! Script emission.
//!
//! The script is assembled section by section; only the command array depends on the
//! plan. Line patterns the status file relies on (row format, `sed` substitutions) are
//! produced from [`Status`] and must stay byte-stable.

use crate::config::SweepConfig;
use crate::script::status::{Status, STATUS_HEADER};
use crate::sweep::plan::SweepPlan;

/// Builds the sweep script text for a plan.
pub struct ScriptEmitter<'a> {
    config: &'a SweepConfig,
}

impl<'a> ScriptEmitter<'a> {
    pub fn new(config: &'a SweepConfig) -> Self {
        Self { config }
    }

    pub fn emit(&self, plan: &SweepPlan) -> String {
        let mut script = String::new();
        self.header(&mut script);
        self.provenance(&mut script);
        self.output_files(&mut script);
        script.push_str("set -e\n\n");
        if let Some(hint) = &self.config.script.workdir_hint {
            script.push_str(&format!("# cd {}\n", hint));
        }
        command_array(&mut script, plan);
        status_init_loop(&mut script);
        self.run_loop(&mut script, plan.start_index);
        script.push_str("echo 'All combinations completed.'\n");
        script
    }

    fn header(&self, script: &mut String) {
        let job = &self.config.job;
        script.push_str("#!/bin/bash\n");
        script.push_str(&format!("#SBATCH --nodes={}\n", job.nodes));
        script.push_str(&format!("#SBATCH --gpus-per-node={}\n", job.gpus));
        script.push_str(&format!("#SBATCH --time={}\n", job.time));
        script.push_str(&format!("#SBATCH --partition={}\n", job.partition));
        script.push_str(&format!("#SBATCH --job-name={}\n", job.job_name));
    }

    fn provenance(&self, script: &mut String) {
        script.push_str(&format!(
            "# This script was generated by {}\n\n",
            self.config.script.generator
        ));
        let variants: Vec<String> = self.config.variants.iter().map(ToString::to_string).collect();
        script.push_str(&format!("# variants: {}\n\n", variants.join("; ")));
        script.push_str(&format!("# {}\n", self.config.invocation.models_flag()));
        script.push_str(&format!("# {}\n", self.config.invocation.datasets_flag()));
    }

    /// Probe for the first unused log and status file names, redirect output, write the header.
    fn output_files(&self, script: &mut String) {
        let log_prefix = &self.config.script.log_prefix;
        let status_prefix = &self.config.script.status_prefix;
        script.push_str(&format!(
            "\ni=0\n\
             while [[ -e {log_prefix}-$i.txt ]] ; do\n    let i++\ndone\n\
             filename=\"{log_prefix}-$i.txt\"\n\
             exec > $filename 2>&1\n\n"
        ));
        script.push_str(&format!(
            "j=0\n\
             while [[ -e {status_prefix}-$j.csv ]] ; do\n    let j++\ndone\n\
             csv_file=\"{status_prefix}-$j.csv\"\n\
             echo \"{STATUS_HEADER}\" > $csv_file\n"
        ));
    }

    fn run_loop(&self, script: &mut String, start_index: usize) {
        script.push_str("\nlen=${#commands[@]}\n");
        script.push_str(&format!("for ((idx={};idx<len;idx++)); do\n", start_index));
        script.push_str("    command=${commands[$idx]}\n");
        sed_line(script, Status::NotStarted, Status::Running);
        script.push_str("    echo \"Running command: $command\"\n");
        self.notify(script, "Sweep [$idx]: $command");
        script.push_str("    if ! eval \"$command\"; then\n");
        script.push_str("    ");
        sed_line(script, Status::Running, Status::Error);
        script.push_str("        echo \"Error occurred: Failed to execute command: $command\"\n");
        self.notify_nested(script, "Error occurred: Failed to execute command: $command");
        script.push_str("        break\n");
        script.push_str("    else\n");
        script.push_str("    ");
        sed_line(script, Status::Running, Status::Done);
        script.push_str("        echo \"Command completed successfully: $command\"\n");
        self.notify_nested(script, "Command completed successfully: $command");
        script.push_str("    fi\n");
        script.push_str("done\n");
    }

    fn notify(&self, script: &mut String, message: &str) {
        if let Some(endpoint) = &self.config.script.notify_endpoint {
            script.push_str(&format!("    curl -d \"{}\" {}\n", message, endpoint));
        }
    }

    fn notify_nested(&self, script: &mut String, message: &str) {
        if self.config.script.notify_endpoint.is_some() {
            script.push_str("    ");
        }
        self.notify(script, message);
    }
}

fn sed_line(script: &mut String, from: Status, to: Status) {
    script.push_str(&format!(
        "    sed -i \"{}\" $csv_file\n",
        Status::substitution(from, to)
    ));
}

/// `commands=( \` then one quoted entry per line, continued with ` \` except the last.
fn command_array(script: &mut String, plan: &SweepPlan) {
    let mut lines = vec!["commands=( ".to_string()];
    lines.extend(plan.commands().map(|c| format!("\"{}\" ", escape_double_quoted(c))));
    script.push_str(&lines.join("\\\n"));
    script.push_str("\n)\n\n");
}

/// One `NOT STARTED` row per array entry, in array order.
fn status_init_loop(script: &mut String) {
    script.push_str("\nidx=0\n");
    script.push_str("for command in \"${commands[@]}\"; do\n");
    script.push_str(&format!(
        "    echo \"$idx,{},$command\" >> $csv_file\n",
        Status::NotStarted
    ));
    script.push_str("    ((idx=idx+1))\n");
    script.push_str("done\n");
}

/// Escape the characters bash interprets inside double quotes.
pub fn escape_double_quoted(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '\\' | '"' | '$' | '`') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
