use crate::{
    circuit::Circuit,
    config::{SolverConfig, TABLE_ARITY_CAP},
    error::{Error, Result},
    gate::{GateKind, Instance, NetNode, Source},
    library::{CompositeGate, GateDef, Library},
    memo::{MemoKey, MemoTable},
    signal::{join_signals, Signal},
    truth_table::{ternary_counter, TruthTable},
};

pub const CIRCUIT_SCOPE: &str = "circuit";

pub trait SolveHooks {
    fn initialized(&mut self, _values: &[Signal]) {}
    fn value_changed(&mut self, _component: usize, _values: &[Signal]) {}
    fn pass_finished(&mut self, _pass: usize, _values: &[Signal]) {}
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoHooks;
impl SolveHooks for NoHooks {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub changed: Option<usize>,
    pub values: Vec<Signal>,
}

#[derive(Clone, Debug, Default)]
pub struct Trace {
    pub frames: Vec<Frame>,
}

impl SolveHooks for Trace {
    fn initialized(&mut self, values: &[Signal]) {
        self.frames.push(Frame {
            changed: None,
            values: values.to_vec(),
        });
    }

    fn value_changed(&mut self, component: usize, values: &[Signal]) {
        self.frames.push(Frame {
            changed: Some(component),
            values: values.to_vec(),
        });
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Netlist {
    pub nodes: Vec<Instance>,
    pub inputs: Vec<usize>,
    pub outputs: Vec<usize>,
}

impl Netlist {
    pub fn prepare(circuit: &Circuit) -> Result<Self> {
        let mut slots = vec![None; circuit.components.len()];
        let mut inputs = Vec::new();
        let mut outputs = Vec::new();
        for (index, component) in circuit.components.iter().enumerate() {
            match component.kind {
                GateKind::Input => {
                    slots[index] = Some(inputs.len());
                    inputs.push(index);
                }
                GateKind::Output => outputs.push(index),
                _ => (),
            }
        }

        let nodes = circuit
            .components
            .iter()
            .enumerate()
            .map(|(index, component)| -> Result<Instance> {
                let sources = component
                    .inputs
                    .iter()
                    .map(|source| match *source {
                        Source::Component(i) => match slots.get(i) {
                            Some(Some(slot)) => Ok(Source::External(*slot)),
                            Some(None) => Ok(Source::Component(i)),
                            None => Err(Error::DanglingSource {
                                component: index,
                                source_index: i,
                            }),
                        },
                        other => Ok(other),
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(Instance {
                    kind: component.kind.clone(),
                    inputs: sources,
                    output: component.kind == GateKind::Output,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Netlist {
            nodes,
            inputs,
            outputs,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    pub values: Vec<Signal>,
    pub outputs: Vec<Signal>,
    pub passes: usize,
}

impl Solution {
    pub fn output(&self) -> Signal {
        self.outputs.first().copied().unwrap_or_default()
    }
}

fn resolve(source: Source, inputs: &[Signal], values: &[Signal]) -> Signal {
    match source {
        Source::External(k) => inputs.get(k).copied().unwrap_or_default(),
        Source::Component(i) => values.get(i).copied().unwrap_or_default(),
        Source::Unset => Signal::Unknown,
    }
}

pub struct Evaluator<'l> {
    library: &'l Library,
    memo: MemoTable,
    config: SolverConfig,
}

impl<'l> Evaluator<'l> {
    pub fn new(library: &'l Library) -> Self {
        Self::with_config(library, SolverConfig::default())
    }

    pub fn with_config(library: &'l Library, config: SolverConfig) -> Self {
        Evaluator {
            library,
            memo: MemoTable::new(),
            config,
        }
    }

    pub fn with_memo(mut self, memo: MemoTable) -> Self {
        self.memo = memo;
        self
    }

    pub fn memo(&self) -> &MemoTable {
        &self.memo
    }

    pub fn into_memo(self) -> MemoTable {
        self.memo
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn solve(&mut self, circuit: &Circuit, inputs: &[Signal]) -> Result<Solution> {
        self.solve_with_hooks(circuit, inputs, &mut NoHooks)
    }

    pub fn solve_with_hooks<H: SolveHooks>(
        &mut self,
        circuit: &Circuit,
        inputs: &[Signal],
        hooks: &mut H,
    ) -> Result<Solution> {
        let netlist = Netlist::prepare(circuit)?;
        self.solve_netlist(&netlist, inputs, hooks)
    }

    pub fn solve_netlist<H: SolveHooks>(
        &mut self,
        netlist: &Netlist,
        inputs: &[Signal],
        hooks: &mut H,
    ) -> Result<Solution> {
        if inputs.len() != netlist.inputs.len() {
            return Err(Error::InputCountMismatch {
                expected: netlist.inputs.len(),
                found: inputs.len(),
            });
        }

        let mut values = vec![Signal::Unknown; netlist.nodes.len()];
        for (slot, component) in netlist.inputs.iter().enumerate() {
            values[*component] = inputs[slot];
        }
        hooks.initialized(&values);

        let passes = self.settle(CIRCUIT_SCOPE, &netlist.nodes, inputs, &mut values, hooks)?;

        for component in netlist.outputs.iter().copied() {
            let source = netlist.nodes[component]
                .inputs
                .first()
                .copied()
                .unwrap_or_default();
            values[component] = resolve(source, inputs, &values);
        }
        let outputs = netlist
            .outputs
            .iter()
            .map(|component| values[*component])
            .collect();

        Ok(Solution {
            values,
            outputs,
            passes,
        })
    }

    pub fn solve_gate(&mut self, name: &str, inputs: &[Signal]) -> Result<Signal> {
        let library = self.library;
        let def = library
            .get(name)
            .map_err(|_| Error::UnknownCircuit(name.to_string()))?;
        if inputs.len() != def.arity() {
            return Err(Error::InputCountMismatch {
                expected: def.arity(),
                found: inputs.len(),
            });
        }
        self.evaluate(def, inputs.to_vec())
    }

    pub fn truth_table(&mut self, circuit: &Circuit) -> Result<TruthTable> {
        let netlist = Netlist::prepare(circuit)?;
        let arity = self.check_table_arity(netlist.inputs.len())?;
        let mut table = TruthTable::new(arity, netlist.outputs.len());
        for inputs in ternary_counter(arity) {
            let solution = self.solve_netlist(&netlist, &inputs, &mut NoHooks)?;
            table.push(inputs, solution.outputs);
        }
        Ok(table)
    }

    pub fn gate_truth_table(&mut self, name: &str) -> Result<TruthTable> {
        let library = self.library;
        let def = library
            .get(name)
            .map_err(|_| Error::UnknownCircuit(name.to_string()))?;
        let arity = self.check_table_arity(def.arity())?;
        let mut table = TruthTable::new(arity, 1);
        for inputs in ternary_counter(arity) {
            let output = self.evaluate(def, inputs.clone())?;
            table.push(inputs, vec![output]);
        }
        Ok(table)
    }

    pub fn prime(&mut self, name: &str) -> Result<()> {
        self.gate_truth_table(name).map(|_| ())
    }

    pub fn prime_all(&mut self) -> Result<()> {
        let library = self.library;
        for name in library.names() {
            let def = library.get(name)?;
            match def {
                GateDef::Primitive => continue,
                GateDef::Composite(gate) if self.check_table_arity(gate.arity).is_err() => {
                    tracing::debug!(gate = %name, arity = gate.arity, "skipping prime");
                }
                GateDef::Composite(_) => self.prime(name)?,
            }
        }
        Ok(())
    }

    fn check_table_arity(&self, arity: usize) -> Result<usize> {
        let limit = self.config.max_table_arity.min(TABLE_ARITY_CAP);
        let rows = u32::try_from(arity)
            .ok()
            .and_then(|exp| 3usize.checked_pow(exp));
        if arity > limit || rows.is_none() {
            return Err(Error::TableTooLarge { arity, limit });
        }
        Ok(arity)
    }

    fn evaluate(&mut self, def: &'l GateDef, inputs: Vec<Signal>) -> Result<Signal> {
        match def {
            GateDef::Primitive => Ok(Signal::nand(inputs[0], inputs[1])),
            GateDef::Composite(gate) => self.evaluate_composite(gate, inputs),
        }
    }

    fn evaluate_composite(&mut self, gate: &'l CompositeGate, inputs: Vec<Signal>) -> Result<Signal> {
        let key = MemoKey::new(gate.name.as_str(), inputs);
        if let Some(value) = self.memo.lookup(&key) {
            return Ok(value);
        }

        tracing::debug!(gate = %gate.name, inputs = %join_signals(&key.inputs), "expanding composite");
        let mut values = vec![Signal::Unknown; gate.body.len()];
        self.settle(&gate.name, &gate.body, &key.inputs, &mut values, &mut NoHooks)?;
        let value = values[gate.output];
        Ok(self.memo.insert(key, value))
    }

    /// Runs full passes in declaration order until one changes nothing.
    ///
    /// A node reads the current value array, so it may see values already
    /// updated earlier in the same pass. Input and output components are not
    /// evaluated here.
    fn settle<N: NetNode, H: SolveHooks>(
        &mut self,
        scope: &str,
        nodes: &[N],
        inputs: &[Signal],
        values: &mut [Signal],
        hooks: &mut H,
    ) -> Result<usize> {
        let library = self.library;
        let max_passes = self.config.max_passes(nodes.len());
        for pass in 1..=max_passes {
            let mut changed = false;
            for (index, node) in nodes.iter().enumerate() {
                let gate = match node.kind() {
                    GateKind::Input | GateKind::Output => continue,
                    kind => kind.name(),
                };
                let def = library.get(gate)?;
                let arity = def.arity();
                let mut args = node
                    .sources()
                    .iter()
                    .take(arity)
                    .map(|source| resolve(*source, inputs, values))
                    .collect::<Vec<_>>();
                args.resize(arity, Signal::Unknown);

                let next = self.evaluate(def, args)?;
                if values[index] != next {
                    values[index] = next;
                    changed = true;
                    hooks.value_changed(index, values);
                }
            }
            hooks.pass_finished(pass, values);
            tracing::trace!(scope, pass, changed, "finished pass");
            if !changed {
                return Ok(pass);
            }
        }

        tracing::warn!(scope, max_passes, "evaluation did not settle");
        Err(Error::DivergedEvaluation {
            gate: scope.to_string(),
            passes: max_passes,
        })
    }
}
