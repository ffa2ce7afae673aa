use std::io::{BufRead, Write};

use serde::{Deserialize, Serialize};

pub const CAPACITY_PROMPT: &str = "Number of applicants that can be accepted: ";

/// Inclusive bounds for the per-department capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityLimits {
    pub min: usize,
    pub max: usize,
}

impl Default for CapacityLimits {
    fn default() -> Self {
        Self { min: 2, max: 10 }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CapacityInputError {
    #[error("Input should represent an integer. Try again.")]
    NotNumeric { input: String },
    #[error("Input is out of defined limits. Try again.")]
    OutOfRange { value: usize, limits: CapacityLimits },
    #[error("capacity input ended before a valid value was entered")]
    EndOfInput,
    #[error("failed to read capacity: {0}")]
    Io(#[from] std::io::Error),
}

impl CapacityLimits {
    /// Accepts a plain decimal integer within the limits.
    pub fn parse(&self, raw: &str) -> Result<usize, CapacityInputError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(CapacityInputError::NotNumeric {
                input: raw.to_string(),
            });
        }

        // All digits, so the only failure left is overflow, which is out of range anyway.
        let value = trimmed.parse::<usize>().unwrap_or(usize::MAX);
        if (self.min..=self.max).contains(&value) {
            Ok(value)
        } else {
            Err(CapacityInputError::OutOfRange {
                value,
                limits: *self,
            })
        }
    }
}

/// Interactive capacity provider that keeps asking until a valid value arrives.
pub struct CapacityPrompt<R, W> {
    input: R,
    output: W,
    limits: CapacityLimits,
}

impl<R: BufRead, W: Write> CapacityPrompt<R, W> {
    pub fn new(input: R, output: W, limits: CapacityLimits) -> Self {
        Self {
            input,
            output,
            limits,
        }
    }

    pub fn read_capacity(&mut self) -> Result<usize, CapacityInputError> {
        loop {
            write!(self.output, "\n{CAPACITY_PROMPT}")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(CapacityInputError::EndOfInput);
            }

            match self.limits.parse(&line) {
                Ok(capacity) => return Ok(capacity),
                Err(err @ CapacityInputError::NotNumeric { .. })
                | Err(err @ CapacityInputError::OutOfRange { .. }) => {
                    writeln!(self.output, "{err}")?;
                }
                Err(err) => return Err(err),
            }
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
