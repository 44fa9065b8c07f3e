//! Live terminal console on top of dialoguer.

use dialoguer::{Confirm, Input};

use crate::error::{Error, Result};
use crate::systems::sdk::{self, NumberInput, Report, YesNo};

/// Human at a terminal. Stateless; construct as many as needed.
#[derive(Clone, Copy, Debug, Default)]
pub struct Terminal;

/// dialoguer renders its own `: ` and `[y/N]` decorations.
fn label(prompt: &str) -> &str {
    prompt
        .trim_end()
        .trim_end_matches("(y/N)?")
        .trim_end()
        .trim_end_matches(':')
        .trim_end()
}

impl Terminal {
    fn read_validated(
        &mut self,
        prompt: &str,
        check: impl Fn(f64) -> std::result::Result<(), String>,
    ) -> Result<f64> {
        let raw = Input::<String>::new()
            .with_prompt(label(prompt))
            .validate_with(|i: &String| -> std::result::Result<(), String> {
                match sdk::parse_number(i) {
                    Some(v) => check(v),
                    None => Err(sdk::NOT_A_NUMBER.to_owned()),
                }
            })
            .interact_text()
            .map_err(|e| {
                log::error!("terminal input failed: {e}");
                Error::InputExhausted(prompt.to_owned())
            })?;
        sdk::parse_number(&raw).ok_or_else(|| Error::InputExhausted(prompt.to_owned()))
    }
}

impl NumberInput for Terminal {
    fn read_float(&mut self, prompt: &str) -> Result<f64> {
        self.read_validated(prompt, |_| Ok(()))
    }

    fn reject(&mut self, reason: &str) {
        println!("{reason}\n");
    }

    fn read_float_in_range(&mut self, prompt: &str, lo: f64, hi: f64) -> Result<f64> {
        self.read_validated(prompt, |v| match v >= lo && v <= hi {
            true => Ok(()),
            false => Err(sdk::out_of_range(lo, hi)),
        })
    }
}

impl YesNo for Terminal {
    fn read_yes_no(&mut self, prompt: &str) -> Result<bool> {
        Confirm::new()
            .with_prompt(label(prompt))
            .default(false)
            .interact()
            .map_err(|e| {
                log::error!("terminal input failed: {e}");
                Error::InputExhausted(prompt.to_owned())
            })
    }
}

impl Report for Terminal {
    fn say(&mut self, line: &str) {
        println!("{line}");
    }
}
