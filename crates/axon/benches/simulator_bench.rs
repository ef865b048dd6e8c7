use axon::{BuildSimulator, Network, NeuronType, Population, ReferenceSimulator, Simulator};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn network(neuron_type: NeuronType) -> Network {
    let mut net = Network::new();
    net.add(Population::new("ens", neuron_type, 1000).with_input(0.5));
    net
}

fn bench_step(c: &mut Criterion) {
    for neuron_type in NeuronType::ALL {
        let mut sim = ReferenceSimulator::build(&network(neuron_type), 0).unwrap();
        c.bench_function(&format!("step_{}", neuron_type.name()), |b| {
            b.iter(|| {
                sim.step();
                black_box(sim.probe("ens"));
            })
        });
    }
}

fn bench_build(c: &mut Criterion) {
    let net = network(NeuronType::lif());
    c.bench_function("build_reference", |b| {
        b.iter(|| ReferenceSimulator::build(black_box(&net), black_box(42)).unwrap())
    });
}

criterion_group!(benches, bench_step, bench_build);
criterion_main!(benches);
