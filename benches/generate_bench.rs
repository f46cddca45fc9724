use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use shop_seed::config::{parse_datetime, SeedConfig};
use shop_seed::generator::Generator;
use shop_seed::script::{write_script, ScriptOptions};
use shop_seed::writer::StatementWriter;
use std::io;

fn config(products: usize, orders: usize) -> SeedConfig {
    let mut config = SeedConfig::default();
    config.products.count = products;
    config.views.per_product = 20;
    config.orders.count = orders;
    config
}

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    let anchor = parse_datetime("2025-01-01 00:00:00").unwrap();

    for (products, orders) in [(100, 500), (1000, 5000)] {
        let cfg = config(products, orders);
        group.throughput(Throughput::Elements((products * 20 + orders * 6) as u64));
        group.bench_with_input(
            BenchmarkId::new("dataset", format!("{}p_{}o", products, orders)),
            &cfg,
            |b, cfg| {
                b.iter(|| Generator::new(cfg, 42, anchor).unwrap().generate());
            },
        );
    }

    group.finish();
}

fn bench_write_script(c: &mut Criterion) {
    let mut group = c.benchmark_group("write_script");
    let anchor = parse_datetime("2025-01-01 00:00:00").unwrap();

    for batch_size in [100, 1000] {
        let mut cfg = config(1000, 2000);
        cfg.views.batch_size = batch_size;
        let data = Generator::new(&cfg, 42, anchor).unwrap().generate();
        let opts = ScriptOptions {
            anchor,
            seed: 42,
            explicit_ids: true,
            batch_size,
        };

        group.bench_with_input(
            BenchmarkId::new("to_sink", format!("batch_{}", batch_size)),
            &data,
            |b, data| {
                b.iter(|| {
                    let mut out = StatementWriter::new(io::sink());
                    write_script(data, &opts, &mut out, None).unwrap();
                    out.finish().unwrap()
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_generate, bench_write_script);
criterion_main!(benches);
