//! Line protocol spoken over the control socket.
//!
//! One command per line: `show`, `hide`, `toggle`, `expand`, `contract`,
//! `left [steps]`, `right [steps]`, `select <skill>`.

use crate::layout::WheelState;
use crate::skill::SkillId;
use crate::slots::RotationDirection;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const SOCKET_PATH: &str = "/tmp/skillwheel.sock";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Show,
    Hide,
    Toggle,
    SetState(WheelState),
    Rotate {
        direction: RotationDirection,
        steps: usize,
    },
    Select(SkillId),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command '{0}'")]
    Unknown(String),
    #[error("'{0}' expects a number, got '{1}'")]
    InvalidNumber(String, String),
    #[error("'{0}' is missing its argument")]
    MissingArgument(String),
    #[error("Unexpected trailing input '{0}'")]
    Trailing(String),
}

fn parse_number(verb: &str, arg: &str) -> Result<usize, CommandError> {
    arg.parse()
        .map_err(|_| CommandError::InvalidNumber(verb.to_string(), arg.to_string()))
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let verb = words.next().ok_or(CommandError::Empty)?.to_ascii_lowercase();
        let arg = words.next();

        if let Some(extra) = words.next() {
            return Err(CommandError::Trailing(extra.to_string()));
        }

        let command = match verb.as_str() {
            "show" => Self::Show,
            "hide" => Self::Hide,
            "toggle" => Self::Toggle,
            "left" | "right" => Self::Rotate {
                direction: verb
                    .parse()
                    .map_err(|_| CommandError::Unknown(verb.clone()))?,
                steps: arg.map(|a| parse_number(&verb, a)).transpose()?.unwrap_or(1),
            },
            "select" => {
                let arg = arg.ok_or_else(|| CommandError::MissingArgument(verb.clone()))?;
                Self::Select(SkillId::from(parse_number(&verb, arg)?))
            }
            other => match other.parse::<WheelState>() {
                Ok(state) => Self::SetState(state),
                Err(_) => return Err(CommandError::Unknown(other.to_string())),
            },
        };

        let takes_arg = matches!(command, Self::Rotate { .. } | Self::Select(_));
        match arg {
            Some(extra) if !takes_arg => Err(CommandError::Trailing(extra.to_string())),
            _ => Ok(command),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Show => write!(f, "show"),
            Self::Hide => write!(f, "hide"),
            Self::Toggle => write!(f, "toggle"),
            Self::SetState(WheelState::Expanded) => write!(f, "expand"),
            Self::SetState(WheelState::Contracted) => write!(f, "contract"),
            Self::Rotate { direction, steps } => match direction {
                RotationDirection::Left => write!(f, "left {}", steps),
                RotationDirection::Right => write!(f, "right {}", steps),
            },
            Self::Select(id) => write!(f, "select {}", id),
        }
    }
}
