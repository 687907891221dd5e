//! Scripted runner shared by unit tests.

use std::cell::RefCell;

use super::{CommandResult, Invocation, Runner};
use crate::Result;

pub(crate) fn ok_result() -> CommandResult {
    CommandResult {
        stdout: String::new(),
        stderr: String::new(),
        exit_code: 0,
    }
}

pub(crate) fn result_with(stdout: &str, stderr: &str, exit_code: i32) -> CommandResult {
    CommandResult {
        stdout: stdout.to_string(),
        stderr: stderr.to_string(),
        exit_code,
    }
}

struct Rule {
    program: String,
    first_arg: Option<String>,
    result: CommandResult,
}

/// Records every invocation and replays canned results.
///
/// Rules match on program name and optionally the first argument; anything
/// unmatched succeeds with empty output, so tests only script the commands
/// they care about.
pub(crate) struct ScriptedRunner {
    rules: Vec<Rule>,
    invocations: RefCell<Vec<Invocation>>,
}

impl ScriptedRunner {
    pub(crate) fn new() -> Self {
        Self {
            rules: Vec::new(),
            invocations: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn respond(
        mut self,
        program: &str,
        first_arg: Option<&str>,
        result: CommandResult,
    ) -> Self {
        self.rules.push(Rule {
            program: program.to_string(),
            first_arg: first_arg.map(ToString::to_string),
            result,
        });
        self
    }

    /// Display strings of every invocation, in order.
    pub(crate) fn calls(&self) -> Vec<String> {
        self.invocations.borrow().iter().map(Invocation::display).collect()
    }

    pub(crate) fn invocations(&self) -> Vec<Invocation> {
        self.invocations.borrow().clone()
    }

    pub(crate) fn count_of(&self, program: &str, first_arg: &str) -> usize {
        self.invocations
            .borrow()
            .iter()
            .filter(|inv| {
                inv.program == program && inv.args.first().map(String::as_str) == Some(first_arg)
            })
            .count()
    }
}

impl Runner for ScriptedRunner {
    fn run(&self, invocation: &Invocation) -> Result<CommandResult> {
        self.invocations.borrow_mut().push(invocation.clone());
        for rule in &self.rules {
            let program_matches = rule.program == invocation.program;
            let arg_matches = rule
                .first_arg
                .as_ref()
                .is_none_or(|arg| invocation.args.first() == Some(arg));
            if program_matches && arg_matches {
                return Ok(rule.result.clone());
            }
        }
        Ok(ok_result())
    }
}
