use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use huffpass::encoding::{MultiPassCompressor, PassLimit};
use rand::{Rng, SeedableRng};

const DATA_SIZE: usize = 1024 * 1024;

fn text_like(rng: &mut rand::rngs::SmallRng) -> Vec<u8> {
    const ALPHABET: &[u8] = b"eeeeeeeeeeeetttttttttaaaaaaaoooooooiiiiiinnnnnnsssssshhhhhrrrrddddllluuccmmwwffggyyppbbvk  \n";
    (0..DATA_SIZE)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())])
        .collect()
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut rng = rand::rngs::SmallRng::seed_from_u64(0xDEADBEEF);
    let mut random = vec![0u8; DATA_SIZE];
    rng.fill(random.as_mut_slice());
    let text = text_like(&mut rng);
    let runs = vec![b'a'; DATA_SIZE];

    let mut group = c.benchmark_group("multipass");
    group.throughput(Throughput::Bytes(DATA_SIZE as u64));
    for (name, data) in [("random", &random), ("text", &text), ("runs", &runs)] {
        let compressor = MultiPassCompressor::new(PassLimit::UntilNoGain);
        group.bench_function(format!("compress {name}"), |b| {
            b.iter(|| compressor.compress(black_box(data)).unwrap())
        });

        let compressed = huffpass::compress(data).unwrap();
        group.bench_function(format!("decompress {name}"), |b| {
            b.iter(|| huffpass::decompress(black_box(&compressed)).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
