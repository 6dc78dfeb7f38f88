use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use branchstock_allocation::{AllocationConfig, allocate, summarize};
use branchstock_inventory::ItemBranchStock;

/// Deterministic synthetic catalogue: `items` items spread over `branches`
/// branches with a sawtooth of quantities so every status shows up.
fn catalogue(items: usize, branches: usize) -> Vec<ItemBranchStock> {
    let mut stocks = Vec::with_capacity(items * branches);
    for item in 0..items {
        for branch in 0..branches {
            let quantity = ((item * 7 + branch * 13) % 25) as i64;
            stocks.push(ItemBranchStock::new(
                format!("{item:08}"),
                format!("Item {item}"),
                format!("Branch {branch:02}"),
                quantity,
            ));
        }
    }
    stocks
}

fn bench_allocate(c: &mut Criterion) {
    let config = AllocationConfig::new(4, 4, 2);
    let mut group = c.benchmark_group("allocate");

    for &(items, branches) in &[(100, 5), (1_000, 5), (1_000, 25), (10_000, 10)] {
        let stocks = catalogue(items, branches);
        group.throughput(Throughput::Elements(stocks.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{items}x{branches}")),
            &stocks,
            |b, stocks| b.iter(|| allocate(black_box(stocks), black_box(&config))),
        );
    }

    group.finish();
}

fn bench_summarize(c: &mut Criterion) {
    let config = AllocationConfig::new(4, 4, 2);
    let stocks = catalogue(1_000, 10);
    let suggestions = allocate(&stocks, &config).expect("synthetic catalogue is valid");

    c.bench_function("summarize/1000x10", |b| {
        b.iter(|| summarize(black_box(&stocks), black_box(&suggestions), &config))
    });
}

criterion_group!(benches, bench_allocate, bench_summarize);
criterion_main!(benches);
