use std::collections::HashMap;

use crate::{
    error::{Error, Result},
    gate::{GateKind, Instance, Source, NAND},
};

pub const NAND_ARITY: usize = 2;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompositeGate {
    pub name: String,
    pub arity: usize,
    pub body: Vec<Instance>,
    pub output: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GateDef {
    Primitive,
    Composite(CompositeGate),
}

impl GateDef {
    pub fn arity(&self) -> usize {
        match self {
            GateDef::Primitive => NAND_ARITY,
            GateDef::Composite(gate) => gate.arity,
        }
    }
}

/// Registry of gate types, built bottom-up from NAND.
///
/// A type can only reference types registered before it and names are never
/// redefined, so the type graph is acyclic by construction.
#[derive(Clone, Debug, Default)]
pub struct Library {
    gates: HashMap<String, GateDef>,
    order: Vec<String>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn standard() -> Result<Self> {
        let mut library = Self::new();
        library.register_primitive();
        library.define_standard_gates()?;
        Ok(library)
    }

    fn define_standard_gates(&mut self) -> Result<()> {
        self.define_composite("not", vec![Instance::new(GateKind::Nand, [-1, -1]).output()])?;
        self.define_composite(
            "and",
            vec![
                Instance::new("not", [1]).output(),
                Instance::new(GateKind::Nand, [-1, -2]),
            ],
        )?;
        self.define_composite(
            "or",
            vec![
                Instance::new(GateKind::Nand, [1, 2]).output(),
                Instance::new("not", [-1]),
                Instance::new("not", [-2]),
            ],
        )?;
        self.define_composite(
            "xor",
            vec![
                Instance::new("and", [1, 2]).output(),
                Instance::new(GateKind::Nand, [-1, -2]),
                Instance::new("or", [-1, -2]),
            ],
        )?;
        self.define_composite(
            "nor",
            vec![
                Instance::new("not", [1]).output(),
                Instance::new("or", [-1, -2]),
            ],
        )?;
        self.define_composite(
            "xnor",
            vec![
                Instance::new("not", [1]).output(),
                Instance::new("xor", [-1, -2]),
            ],
        )?;
        Ok(())
    }

    pub fn register_primitive(&mut self) {
        if self.gates.insert(NAND.to_string(), GateDef::Primitive).is_none() {
            self.order.push(NAND.to_string());
        }
    }

    pub fn define_composite(
        &mut self,
        name: impl Into<String>,
        body: Vec<Instance>,
    ) -> Result<&GateDef> {
        let name = name.into();
        let reserved = !matches!(GateKind::from(name.as_str()), GateKind::Composite(_));
        if reserved || self.gates.contains_key(&name) {
            return Err(Error::DuplicateGateType(name));
        }

        for (index, instance) in body.iter().enumerate() {
            if instance.kind.is_io() {
                return Err(Error::InvalidBody {
                    gate: name,
                    reason: format!("instance {index} is an {} component", instance.kind),
                });
            }
            self.get(instance.kind.name())?;
            for source in &instance.inputs {
                if let Source::Component(i) = source {
                    if *i >= body.len() {
                        return Err(Error::InvalidBody {
                            gate: name,
                            reason: format!("instance {index} reads missing instance {i}"),
                        });
                    }
                }
            }
        }

        let outputs = body
            .iter()
            .enumerate()
            .filter(|(_, instance)| instance.output)
            .map(|(index, _)| index)
            .collect::<Vec<_>>();
        let output = match outputs.as_slice() {
            [output] => *output,
            _ => {
                return Err(Error::NoDesignatedOutput {
                    gate: name,
                    found: outputs.len(),
                })
            }
        };

        let arity = body
            .iter()
            .flat_map(|instance| instance.inputs.iter())
            .filter_map(|source| match source {
                Source::External(k) => Some(k + 1),
                _ => None,
            })
            .max()
            .unwrap_or(0);

        tracing::debug!(gate = %name, arity, instances = body.len(), "defined composite gate");
        self.order.push(name.clone());
        let def = GateDef::Composite(CompositeGate {
            name: name.clone(),
            arity,
            body,
            output,
        });
        Ok(self.gates.entry(name).or_insert(def))
    }

    pub fn get(&self, name: &str) -> Result<&GateDef> {
        self.gates
            .get(name)
            .ok_or_else(|| Error::UnknownGateType(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.gates.contains_key(name)
    }

    pub fn arity(&self, kind: &GateKind) -> Result<usize> {
        match kind {
            GateKind::Input => Ok(0),
            GateKind::Output => Ok(1),
            GateKind::Nand | GateKind::Composite(_) => Ok(self.get(kind.name())?.arity()),
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}
