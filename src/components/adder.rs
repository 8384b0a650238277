use crate::{
    circuit_builder::{BuilderHooks, CircuitBuilderWithHooks, InputPin, OutputPin},
    error::Result,
    evaluator::Solution,
    signal::Signal,
};

use super::bus;

struct Adder {
    sum: usize,
    cout: usize,
}

fn adder<T: BuilderHooks>(
    builder: &mut CircuitBuilderWithHooks<T>,
    a: usize,
    b: usize,
    cin: usize,
) -> Result<Adder> {
    let a_xor_b = builder.xor(&[a, b])?;
    let sum = builder.xor(&[a_xor_b, cin])?;
    let a_and_b = builder.and(&[a, b])?;
    let a_xor_b_and_cin = builder.and(&[a_xor_b, cin])?;
    let cout = builder.or(&[a_and_b, a_xor_b_and_cin])?;
    Ok(Adder { sum, cout })
}

pub struct RippleCarryAdder<const BITS: usize> {
    pub input_a: [InputPin; BITS],
    pub input_b: [InputPin; BITS],
    pub cin: InputPin,
    pub sum: [OutputPin; BITS],
    pub cout: OutputPin,
}

impl<const BITS: usize> RippleCarryAdder<BITS> {
    pub fn new<T: BuilderHooks>(builder: &mut CircuitBuilderWithHooks<T>) -> Result<Self> {
        assert!(BITS > 0 && BITS <= 64);

        let mut rca = Self {
            input_a: [InputPin::default(); BITS],
            input_b: [InputPin::default(); BITS],
            cin: builder.input()?,
            sum: [OutputPin::default(); BITS],
            cout: OutputPin::default(),
        };

        let mut carry = rca.cin.component;
        for i in 0..BITS {
            let a = builder.input()?;
            let b = builder.input()?;
            rca.input_a[i] = a;
            rca.input_b[i] = b;
            let Adder { sum, cout } = adder(builder, a.component, b.component, carry)?;
            rca.sum[i] = builder.output(sum)?;
            carry = cout;
        }
        rca.cout = builder.output(carry)?;
        Ok(rca)
    }

    pub fn inputs(&self, a: u64, b: u64, cin: bool) -> Vec<Signal> {
        let mut inputs = vec![Signal::Unknown; 2 * BITS + 1];
        inputs[self.cin.slot] = Signal::from(cin);
        let bits_a = bus::encode(a, BITS);
        let bits_b = bus::encode(b, BITS);
        for i in 0..BITS {
            inputs[self.input_a[i].slot] = bits_a[i];
            inputs[self.input_b[i].slot] = bits_b[i];
        }
        inputs
    }

    pub fn read(&self, solution: &Solution) -> Option<(u64, bool)> {
        let sum = self
            .sum
            .iter()
            .map(|pin| solution.outputs.get(pin.slot).copied())
            .collect::<Option<Vec<_>>>()?;
        Some((
            bus::decode(&sum)?,
            solution.outputs.get(self.cout.slot)?.to_bool()?,
        ))
    }
}
