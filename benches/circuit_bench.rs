use criterion::{criterion_group, criterion_main, Criterion};
use rand::{RngCore, SeedableRng};

use nandsim::{
    circuit_builder::CircuitBuilder,
    components::{adder::RippleCarryAdder, mux},
    Evaluator, Library, Signal,
};

pub fn adder_bench<const BITS: usize>(c: &mut Criterion) {
    if BITS > 32 {
        panic!("Too large an adder!")
    };
    let library = Library::standard().unwrap();
    let name = format!("{BITS}-bit adder");
    let mut builder = CircuitBuilder::new(&library);
    let rca = RippleCarryAdder::<BITS>::new(&mut builder).unwrap();
    let (circuit, _) = builder.build();
    let mut evaluator = Evaluator::new(&library);
    evaluator.prime_all().unwrap();
    let mask = (1u64 << BITS) - 1;
    c.bench_function(&name, |b| {
        let rca = &rca;
        let mut rng = rand::rngs::StdRng::from_entropy();
        b.iter_batched(
            move || rca.inputs(rng.next_u64() & mask, rng.next_u64() & mask, false),
            |inputs| evaluator.solve(&circuit, &inputs).unwrap(),
            criterion::BatchSize::SmallInput,
        )
    });
}

fn adder_benches(c: &mut Criterion) {
    adder_bench::<8>(c);
    adder_bench::<16>(c);
    adder_bench::<32>(c);
}

fn memo_benches(c: &mut Criterion) {
    let mut library = Library::standard().unwrap();
    mux::define_mux(&mut library).unwrap();
    let inputs = [Signal::One, Signal::Zero, Signal::Unknown];

    c.bench_function("mux cold memo", |b| {
        b.iter(|| Evaluator::new(&library).solve_gate(mux::MUX, &inputs).unwrap())
    });

    let mut warm = Evaluator::new(&library);
    warm.prime(mux::MUX).unwrap();
    c.bench_function("mux warm memo", |b| {
        b.iter(|| warm.solve_gate(mux::MUX, &inputs).unwrap())
    });
}

fn sweep_benches(c: &mut Criterion) {
    let library = Library::standard().unwrap();
    let mut builder = CircuitBuilder::new(&library);
    let rca = RippleCarryAdder::<2>::new(&mut builder).unwrap();
    let (circuit, _) = builder.build();
    println!("{} inputs", rca.input_a.len() * 2 + 1);

    c.bench_function("2-bit adder sweep", |b| {
        b.iter(|| Evaluator::new(&library).truth_table(&circuit).unwrap())
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default();
    targets = adder_benches, memo_benches, sweep_benches
}
criterion_main!(benches);
