use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::Error;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Signal {
    #[default]
    #[serde(rename = "U")]
    Unknown,
    #[serde(rename = "0")]
    Zero,
    #[serde(rename = "1")]
    One,
}

impl Signal {
    pub const ALL: [Signal; 3] = [Signal::Unknown, Signal::Zero, Signal::One];

    pub fn nand(a: Signal, b: Signal) -> Signal {
        use Signal::*;
        match (a, b) {
            (Zero, _) | (_, Zero) => One,
            (One, One) => Zero,
            _ => Unknown,
        }
    }

    pub fn is_known(self) -> bool {
        self != Signal::Unknown
    }

    pub fn to_bool(self) -> Option<bool> {
        match self {
            Signal::Zero => Some(false),
            Signal::One => Some(true),
            Signal::Unknown => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Signal::Unknown => 'U',
            Signal::Zero => '0',
            Signal::One => '1',
        }
    }
}

impl From<bool> for Signal {
    fn from(val: bool) -> Self {
        if val {
            Signal::One
        } else {
            Signal::Zero
        }
    }
}

impl TryFrom<char> for Signal {
    type Error = Error;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'U' | 'u' | 'X' | 'x' => Ok(Signal::Unknown),
            '0' => Ok(Signal::Zero),
            '1' => Ok(Signal::One),
            _ => Err(Error::InvalidSignal(c.to_string())),
        }
    }
}

impl FromStr for Signal {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Signal::try_from(c),
            _ => Err(Error::InvalidSignal(s.to_string())),
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

pub fn parse_signals(s: &str) -> Result<Vec<Signal>, Error> {
    if s.trim().is_empty() {
        return Ok(Vec::new());
    }
    s.split(',').map(str::parse).collect()
}

pub fn join_signals(signals: &[Signal]) -> String {
    signals
        .iter()
        .map(|s| s.symbol().to_string())
        .collect::<Vec<_>>()
        .join("-")
}
