//! Command rendering: one combination in, one command line out.

use crate::config::{InvocationConfig, SweepConfig};
use crate::sweep::combination::Combination;
use crate::sweep::rules::RenderMask;

/// Renders `<program> <subcommand> --models .. --datasets .. [--binarize] <flag=value>.. --num_gpus N`.
pub struct CommandRenderer<'a> {
    invocation: &'a InvocationConfig,
    masks: &'a [RenderMask],
    gpus: u32,
}

impl<'a> CommandRenderer<'a> {
    pub fn new(invocation: &'a InvocationConfig, masks: &'a [RenderMask], gpus: u32) -> Self {
        Self {
            invocation,
            masks,
            gpus,
        }
    }

    pub fn from_config(config: &'a SweepConfig) -> Self {
        Self::new(&config.invocation, &config.masks, config.job.gpus)
    }

    fn prefix(&self) -> String {
        let mut command = format!("{} {} ", self.invocation.program, self.invocation.subcommand);
        command.push_str(&self.invocation.models_flag());
        command.push(' ');
        command.push_str(&self.invocation.datasets_flag());
        command.push(' ');
        if self.invocation.binarize {
            command.push_str("--binarize ");
        }
        command
    }

    pub fn render(&self, combo: &Combination) -> String {
        let mut command = self.prefix();
        for choice in combo.choices() {
            let value = match choice.value.as_str() {
                Some(value) => value,
                None => continue,
            };
            if self.masks.iter().any(|mask| mask.hides(&choice.key, combo)) {
                continue;
            }
            command.push_str(&format!("{}={} ", choice.flag, value));
        }
        command.push_str(&format!("--num_gpus {}", self.gpus));
        command
    }
}
