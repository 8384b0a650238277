use std::collections::HashMap;

use crate::{
    circuit::{Circuit, Position},
    error::Result,
    gate::GateKind,
    library::Library,
};

pub trait BuilderHooks: Default {
    fn place_hook(&mut self, _component: usize, _kind: &GateKind, _position: Position) {}
    fn connect_hook(&mut self, _from: usize, _to: usize, _slot: usize) {}

    type MarkArgs;
    fn mark(&mut self, _component: usize, _args: Self::MarkArgs) {}
}

#[derive(Default)]
pub struct NoHooks;
impl BuilderHooks for NoHooks {
    type MarkArgs = ();
}

pub type CircuitBuilder<'l> = CircuitBuilderWithHooks<'l, NoHooks>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputPin {
    pub component: usize,
    pub slot: usize,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OutputPin {
    pub component: usize,
    pub slot: usize,
}

pub struct CircuitBuilderWithHooks<'l, T: BuilderHooks> {
    library: &'l Library,
    circuit: Circuit,
    hooks: T,
    depth: Vec<i32>,
    next_row: HashMap<i32, i32>,
    inputs: usize,
    outputs: usize,
}

macro_rules! gate_fn_gen {
    ( $( $gate:ident ),+ ) => {
        $(
            pub fn $gate(&mut self, sources: &[usize]) -> Result<usize> {
                self.gate(stringify!($gate), sources)
            }
        )+
    };
}

impl<'l, T: BuilderHooks> CircuitBuilderWithHooks<'l, T> {
    pub fn new(library: &'l Library) -> Self {
        CircuitBuilderWithHooks {
            library,
            circuit: Circuit::new(),
            hooks: T::default(),
            depth: Vec::new(),
            next_row: HashMap::new(),
            inputs: 0,
            outputs: 0,
        }
    }

    fn place(&mut self, kind: GateKind, column: i32) -> Result<usize> {
        let row = self.next_row.entry(column).or_insert(0);
        let position = Position::new(column * 2, *row * 2);
        *row += 1;
        let component = self
            .circuit
            .add_component(self.library, kind.clone(), position)?;
        self.depth.push(column);
        self.hooks.place_hook(component, &kind, position);
        Ok(component)
    }

    fn connect(&mut self, from: usize, to: usize, slot: usize) -> Result<()> {
        self.circuit.connect(from, to, slot)?;
        self.hooks.connect_hook(from, to, slot);
        Ok(())
    }

    fn column_after(&self, sources: &[usize]) -> i32 {
        sources
            .iter()
            .filter_map(|source| self.depth.get(*source))
            .max()
            .map_or(1, |depth| depth + 1)
    }

    pub fn input(&mut self) -> Result<InputPin> {
        let component = self.place(GateKind::Input, 0)?;
        let slot = self.inputs;
        self.inputs += 1;
        Ok(InputPin { component, slot })
    }

    pub fn gate(&mut self, kind: impl Into<GateKind>, sources: &[usize]) -> Result<usize> {
        let column = self.column_after(sources);
        let component = self.place(kind.into(), column)?;
        for (slot, source) in sources.iter().enumerate() {
            self.connect(*source, component, slot)?;
        }
        Ok(component)
    }

    gate_fn_gen!(nand, not, and, or, xor, nor, xnor);

    pub fn output(&mut self, source: usize) -> Result<OutputPin> {
        let column = self.column_after(&[source]);
        let component = self.place(GateKind::Output, column)?;
        self.connect(source, component, 0)?;
        let slot = self.outputs;
        self.outputs += 1;
        Ok(OutputPin { component, slot })
    }

    pub fn mark(&mut self, component: usize, args: T::MarkArgs) -> &mut Self {
        self.hooks.mark(component, args);
        self
    }

    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    pub fn build(self) -> (Circuit, T) {
        (self.circuit, self.hooks)
    }
}
