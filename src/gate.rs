use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub const NAND: &str = "nand";
pub const INPUT: &str = "input";
pub const OUTPUT: &str = "output";

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GateKind {
    Nand,
    Composite(String),
    Input,
    Output,
}

impl GateKind {
    pub fn composite(name: impl Into<String>) -> Self {
        GateKind::from(name.into())
    }

    pub fn name(&self) -> &str {
        match self {
            GateKind::Nand => NAND,
            GateKind::Composite(name) => name,
            GateKind::Input => INPUT,
            GateKind::Output => OUTPUT,
        }
    }

    pub fn is_io(&self) -> bool {
        matches!(self, GateKind::Input | GateKind::Output)
    }
}

impl From<String> for GateKind {
    fn from(name: String) -> Self {
        match name.as_str() {
            NAND => GateKind::Nand,
            INPUT => GateKind::Input,
            OUTPUT => GateKind::Output,
            _ => GateKind::Composite(name),
        }
    }
}

impl From<&str> for GateKind {
    fn from(name: &str) -> Self {
        GateKind::from(name.to_string())
    }
}

impl From<GateKind> for String {
    fn from(kind: GateKind) -> Self {
        match kind {
            GateKind::Composite(name) => name,
            other => other.name().to_string(),
        }
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where an input slot reads its value from.
///
/// The signed form used by gate bodies and saved circuits maps `-(k + 1)` to
/// the k-th external input and `i >= 0` to the output of component `i`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Source {
    #[default]
    Unset,
    External(usize),
    Component(usize),
}

impl Source {
    pub fn from_signed(index: i64) -> Self {
        if index < 0 {
            Source::External((-(index + 1)) as usize)
        } else {
            Source::Component(index as usize)
        }
    }

    pub fn to_signed(self) -> Option<i64> {
        match self {
            Source::Unset => None,
            Source::External(k) => Some(-(k as i64) - 1),
            Source::Component(i) => Some(i as i64),
        }
    }
}

const UNSET: &str = "unset";

impl Serialize for Source {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.to_signed() {
            Some(index) => serializer.serialize_i64(index),
            None => serializer.serialize_str(UNSET),
        }
    }
}

impl<'de> Deserialize<'de> for Source {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Index(i64),
            Sentinel(String),
            Missing(()),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Index(index) => Ok(Source::from_signed(index)),
            Raw::Sentinel(s) if s == UNSET => Ok(Source::Unset),
            Raw::Sentinel(s) => Err(serde::de::Error::custom(format!(
                "expected an index or \"{UNSET}\", got \"{s}\""
            ))),
            Raw::Missing(()) => Ok(Source::Unset),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instance {
    pub kind: GateKind,
    pub inputs: Vec<Source>,
    pub output: bool,
}

impl Instance {
    pub fn new<I>(kind: impl Into<GateKind>, inputs: I) -> Self
    where
        I: IntoIterator<Item = i64>,
    {
        Instance {
            kind: kind.into(),
            inputs: inputs.into_iter().map(Source::from_signed).collect(),
            output: false,
        }
    }

    pub fn output(mut self) -> Self {
        self.output = true;
        self
    }
}

pub trait NetNode {
    fn kind(&self) -> &GateKind;
    fn sources(&self) -> &[Source];
}

impl NetNode for Instance {
    fn kind(&self) -> &GateKind {
        &self.kind
    }

    fn sources(&self) -> &[Source] {
        &self.inputs
    }
}
