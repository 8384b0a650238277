#[cfg(test)]
mod test {
    use std::{cell::RefCell, rc::Rc};

    use nandsim::{
        circuit::{Component, Position},
        circuit_builder::CircuitBuilder,
        components::{adder::RippleCarryAdder, mux},
        editor::{IoKind, Mode, ModeMachine},
        truth_table::ternary_counter,
        Circuit, Evaluator, GateKind, Library,
        Signal::{self, *},
        Source,
    };
    use rand::{RngCore, SeedableRng};

    fn two_input_circuit(library: &Library, gate: &str) -> Circuit {
        let mut builder = CircuitBuilder::new(library);
        let a = builder.input().unwrap();
        let b = builder.input().unwrap();
        let out = builder.gate(gate, &[a.component, b.component]).unwrap();
        builder.output(out).unwrap();
        builder.build().0
    }

    fn gate_test_gen(name: &str, expecteds: [bool; 4]) {
        let library = Library::standard().unwrap();
        let circuit = two_input_circuit(&library, name);
        let mut evaluator = Evaluator::new(&library);
        let expecteds = [(false, false), (false, true), (true, false), (true, true)]
            .into_iter()
            .zip(expecteds);
        for ((in_a, in_b), expected) in expecteds {
            let solution = evaluator
                .solve(&circuit, &[in_a.into(), in_b.into()])
                .unwrap();
            assert_eq!(
                solution.output(),
                Signal::from(expected),
                "{in_a} {name} {in_b} = {expected}"
            );
        }
    }

    #[test]
    fn gate_tests() {
        gate_test_gen("or", [false, true, true, true]);
        gate_test_gen("nor", [true, false, false, false]);
        gate_test_gen("and", [false, false, false, true]);
        gate_test_gen("nand", [true, true, true, false]);
        gate_test_gen("xor", [false, true, true, false]);
        gate_test_gen("xnor", [true, false, false, true]);
    }

    #[test]
    fn and_of_one_input() {
        let library = Library::standard().unwrap();
        let circuit = Circuit {
            components: vec![
                Component {
                    kind: GateKind::Input,
                    inputs: Vec::new(),
                    position: Position::new(0, 0),
                },
                Component {
                    kind: "and".into(),
                    inputs: vec![Source::Component(0), Source::Component(0)],
                    position: Position::new(1, 0),
                },
                Component {
                    kind: GateKind::Output,
                    inputs: vec![Source::Component(1)],
                    position: Position::new(2, 0),
                },
            ],
            wires: Vec::new(),
            grid: None,
        };
        let mut evaluator = Evaluator::new(&library);
        assert_eq!(evaluator.solve(&circuit, &[One]).unwrap().output(), One);
        assert_eq!(evaluator.solve(&circuit, &[Zero]).unwrap().output(), Zero);
        assert_eq!(evaluator.solve(&circuit, &[Unknown]).unwrap().output(), Unknown);
    }

    #[test]
    fn xor_sweep() {
        let library = Library::standard().unwrap();
        let circuit = two_input_circuit(&library, "xor");
        let table = Evaluator::new(&library).truth_table(&circuit).unwrap();
        assert_eq!(table.rows.len(), 9);
        for row in &table.rows {
            let expected = match (row.inputs[0].to_bool(), row.inputs[1].to_bool()) {
                (Some(a), Some(b)) => Signal::from(a ^ b),
                _ => Unknown,
            };
            assert_eq!(row.outputs, vec![expected], "xor {:?}", row.inputs);
        }
        let keyed = table.keyed();
        assert_eq!(keyed["1-0"], "1");
        assert_eq!(keyed["1-1"], "0");
        assert_eq!(keyed["U-1"], "U");
    }

    #[test]
    fn cold_and_warm_memo_agree() {
        let mut library = Library::standard().unwrap();
        mux::define_mux(&mut library).unwrap();
        let mut builder = CircuitBuilder::new(&library);
        let a = builder.input().unwrap();
        let b = builder.input().unwrap();
        let s = builder.input().unwrap();
        let xnor = builder.xnor(&[a.component, b.component]).unwrap();
        let out = builder
            .gate(mux::MUX, &[xnor, a.component, s.component])
            .unwrap();
        builder.output(out).unwrap();
        let (circuit, _) = builder.build();

        let mut warm = Evaluator::new(&library);
        warm.prime_all().unwrap();
        let primed = warm.memo().len();

        for inputs in ternary_counter(3) {
            let cold = Evaluator::new(&library).solve(&circuit, &inputs).unwrap();
            let hot = warm.solve(&circuit, &inputs).unwrap();
            assert_eq!(cold.values, hot.values, "{inputs:?}");
            assert_eq!(cold.passes, hot.passes, "{inputs:?}");
        }
        // priming already covered every tuple the circuit can reach
        assert_eq!(warm.memo().len(), primed);

        let memo = warm.into_memo();
        let reused = Evaluator::new(&library).with_memo(memo);
        assert_eq!(reused.memo().len(), primed);
    }

    #[test]
    fn acyclic_pass_bound() {
        let library = Library::standard().unwrap();
        // a chain of inverters declared against dependency order
        let length = 6;
        let mut components = vec![Component {
            kind: GateKind::Input,
            inputs: Vec::new(),
            position: Position::new(0, 0),
        }];
        for i in 1..=length {
            let source = if i == length { 0 } else { i + 1 };
            components.push(Component {
                kind: "not".into(),
                inputs: vec![Source::Component(source)],
                position: Position::new(i as i32, 0),
            });
        }
        components.push(Component {
            kind: GateKind::Output,
            inputs: vec![Source::Component(1)],
            position: Position::new(length as i32 + 1, 0),
        });
        let circuit = Circuit {
            components,
            wires: Vec::new(),
            grid: None,
        };

        let solution = Evaluator::new(&library).solve(&circuit, &[One]).unwrap();
        assert_eq!(solution.passes, length + 1);
        assert!(solution.passes <= circuit.components.len() + 1);
        assert_eq!(solution.output(), One);

        let forward = two_input_circuit(&library, "and");
        let solution = Evaluator::new(&library)
            .solve(&forward, &[One, One])
            .unwrap();
        assert_eq!(solution.passes, 2);
    }

    #[test]
    fn load_saved_circuit() {
        let library = Library::standard().unwrap();
        let json = r#"{
            "components": [
                { "type": "input", "x": 0, "y": 0 },
                { "type": "input", "x": 0, "y": 2 },
                { "type": "or", "inputs": [0, 1], "x": 2, "y": 1 },
                { "type": "not", "inputs": [2], "x": 4, "y": 1 },
                { "type": "output", "inputs": [3], "x": 6, "y": 1 },
                { "type": "output", "inputs": [2], "x": 6, "y": 3 }
            ],
            "wires": [
                { "from": 0, "to": 2, "slot": 0 },
                { "from": 1, "to": 2, "slot": 1 },
                { "from": 2, "to": 3, "slot": 0 },
                { "from": 3, "to": 4, "slot": 0 },
                { "from": 2, "to": 5, "slot": 0 }
            ]
        }"#;
        let circuit = Circuit::from_json(json).unwrap();
        let mut evaluator = Evaluator::new(&library);
        let solution = evaluator.solve(&circuit, &[Zero, Zero]).unwrap();
        assert_eq!(solution.outputs, vec![One, Zero]);
        let solution = evaluator.solve(&circuit, &[Unknown, One]).unwrap();
        assert_eq!(solution.outputs, vec![Zero, One]);
    }

    #[test]
    fn random_adds() {
        let library = Library::standard().unwrap();
        let mut builder = CircuitBuilder::new(&library);
        let rca = RippleCarryAdder::<8>::new(&mut builder).unwrap();
        let (circuit, _) = builder.build();
        let mut evaluator = Evaluator::new(&library);
        let mut rng = rand::rngs::StdRng::seed_from_u64(0x5eed);
        for _ in 0..200 {
            let a = (rng.next_u32() & 0xFF) as u64;
            let b = (rng.next_u32() & 0xFF) as u64;
            let cin = rng.next_u32() & 1 == 1;
            let solution = evaluator.solve(&circuit, &rca.inputs(a, b, cin)).unwrap();
            let expected = a + b + cin as u64;
            assert_eq!(
                rca.read(&solution),
                Some((expected & 0xFF, expected > 0xFF)),
                "{a} + {b} + {cin}"
            );
        }
    }

    #[test]
    fn editing_session() {
        let library = Library::standard().unwrap();
        let changes = Rc::new(RefCell::new(0));
        let mut modes = ModeMachine::new();
        let counter = changes.clone();
        modes.subscribe(move |_, _| *counter.borrow_mut() += 1);

        let mut circuit = Circuit::new();
        modes.transition(Mode::PlacingIo(IoKind::Input));
        let a = circuit
            .add_component(&library, IoKind::Input.into(), Position::new(0, 0))
            .unwrap();
        modes.transition(Mode::PlacingComponent("not".into()));
        let not = circuit
            .add_component(&library, "not".into(), Position::new(2, 0))
            .unwrap();
        modes.transition(Mode::PlacingIo(IoKind::Output));
        let out = circuit
            .add_component(&library, IoKind::Output.into(), Position::new(4, 0))
            .unwrap();
        modes.transition(Mode::AddingWire);
        circuit.connect(a, not, 0).unwrap();
        circuit.connect(not, out, 0).unwrap();

        modes.transition(Mode::Ticking);
        assert!(modes.mode().is_simulating());
        let mut evaluator = Evaluator::new(&library);
        assert_eq!(evaluator.solve(&circuit, &[One]).unwrap().output(), Zero);

        modes.transition(Mode::RemovingWire);
        circuit.disconnect(0).unwrap();
        assert_eq!(evaluator.solve(&circuit, &[One]).unwrap().output(), Unknown);

        modes.reset();
        assert_eq!(*changes.borrow(), 7);
    }
}
