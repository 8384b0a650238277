use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const TABLE_ARITY_CAP: usize = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub passes_per_component: usize,
    pub extra_passes: usize,
    pub max_table_arity: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            passes_per_component: 2,
            extra_passes: 2,
            max_table_arity: 12,
        }
    }
}

impl SolverConfig {
    pub fn max_passes(&self, components: usize) -> usize {
        self.passes_per_component
            .saturating_mul(components)
            .saturating_add(self.extra_passes)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str::<Self>(json)?.validate()
    }

    pub fn validate(self) -> Result<Self> {
        if self.max_table_arity > TABLE_ARITY_CAP {
            return Err(Error::TableTooLarge {
                arity: self.max_table_arity,
                limit: TABLE_ARITY_CAP,
            });
        }
        Ok(self)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }
}

#[cfg(test)]
mod test {
    use crate::error::Error;

    use super::{SolverConfig, TABLE_ARITY_CAP};

    #[test]
    fn partial_json_keeps_defaults() {
        let config = SolverConfig::from_json(r#"{ "extra_passes": 5 }"#).unwrap();
        assert_eq!(config.extra_passes, 5);
        assert_eq!(config.passes_per_component, 2);
        assert_eq!(config.max_passes(10), 25);
    }

    #[test]
    fn table_arity_is_capped() {
        let err = SolverConfig::from_json(r#"{ "max_table_arity": 64 }"#).unwrap_err();
        assert!(matches!(
            err,
            Error::TableTooLarge {
                arity: 64,
                limit: TABLE_ARITY_CAP
            }
        ));
        let config = SolverConfig::from_json(r#"{ "max_table_arity": 16 }"#).unwrap();
        assert_eq!(config.max_table_arity, TABLE_ARITY_CAP);
    }
}
