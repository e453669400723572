//! # Cart Benchmarks
//!
//! Performance benchmarks for grocer-core cart operations.
//!
//! Run with: `cargo bench -p grocer-core`

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use grocer_core::{Cart, CartEngine, find_match};
use std::hint::black_box;

/// Create a cart with N distinct canonical keys.
fn create_cart(size: usize) -> Cart {
    let mut cart = Cart::new();
    for i in 0..size {
        cart.add(&format!("item{}s", i), 3).expect("add");
    }
    cart
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("add");

    for size in [10, 100, 1000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| {
                let mut cart = Cart::new();
                for i in 0..size {
                    let _ = CartEngine::add(&mut cart, &format!("Item{}", i), 1);
                }
                black_box(cart)
            });
        });
    }

    group.finish();
}

fn bench_exact_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("exact_lookup");

    for size in [10, 100, 1000].iter() {
        let cart = create_cart(*size);
        let last = format!("item{}s", size - 1);
        group.bench_with_input(BenchmarkId::from_parameter(size), &last, |b, last| {
            b.iter(|| black_box(find_match(cart.keys(), last)));
        });
    }

    group.finish();
}

fn bench_fuzzy_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("fuzzy_lookup");

    for size in [10, 100, 1000].iter() {
        let cart = create_cart(*size);
        // Singular, upper-case form of the last key: forces a full fallback scan.
        let spoken = format!("ITEM{}", size - 1);
        group.bench_with_input(BenchmarkId::from_parameter(size), &spoken, |b, spoken| {
            b.iter(|| black_box(find_match(cart.keys(), spoken)));
        });
    }

    group.finish();
}

fn bench_miss(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove_miss");

    for size in [10, 100, 1000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let mut cart = create_cart(size);
            b.iter(|| black_box(CartEngine::remove(&mut cart, "kiwi", 1)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_add,
    bench_exact_lookup,
    bench_fuzzy_lookup,
    bench_miss
);
criterion_main!(benches);
