//! Shape engine benchmarks.
//!
//! Run with: `cargo bench -p shapes --bench shape_ops_bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use shapes::operations::{combine, compress, cut_by_quadrants};
use shapes::{decode, encode, GeneratorParams, OperationCache, QuadrantSet, ShapeGenerator, SubShapeRegistry};

const KEYS: &[&str] = &[
    "CuCuCuCu",
    "2bR_Rb2_:Cb______:4w4w4w4w",
    "__2y__2y:6wW_6wW_:6_Wr6_Wg",
    "SbCu--Cu:--Cb--Cb:1u--Sr--:----1r--",
];

// ---------------------------------------------------------------------------
// Codec
// ---------------------------------------------------------------------------

fn bench_decode(c: &mut Criterion) {
    let registry = SubShapeRegistry::default();
    let mut group = c.benchmark_group("shape_decode");
    for key in KEYS {
        group.bench_with_input(BenchmarkId::from_parameter(key), key, |b, key| {
            b.iter(|| decode(black_box(key), &registry))
        });
    }
    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let registry = SubShapeRegistry::default();
    let mut group = c.benchmark_group("shape_encode");
    for key in KEYS {
        let Ok(def) = decode(key, &registry) else {
            continue;
        };
        group.bench_with_input(BenchmarkId::from_parameter(key), &def, |b, def| {
            b.iter(|| encode(black_box(def)))
        });
    }
    group.finish();
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

fn bench_operations(c: &mut Criterion) {
    let registry = SubShapeRegistry::default();
    let (Ok(a), Ok(b)) = (
        decode("RuRu----:CrCrCrCr", &registry),
        decode("----CuCu:SbSbSbSb", &registry),
    ) else {
        return;
    };

    c.bench_function("shape_combine", |bench| {
        bench.iter(|| combine(&registry, black_box(&a), black_box(&b)))
    });
    c.bench_function("shape_compress", |bench| bench.iter(|| compress(black_box(&a))));
    c.bench_function("shape_cut", |bench| {
        bench.iter(|| cut_by_quadrants(black_box(&a), QuadrantSet::from_indices([0, 1])))
    });
    c.bench_function("shape_combine_cached", |bench| {
        let mut cache = OperationCache::default();
        bench.iter(|| cache.combine(&registry, black_box(&a), black_box(&b)))
    });
}

// ---------------------------------------------------------------------------
// Generator
// ---------------------------------------------------------------------------

fn bench_generate(c: &mut Criterion) {
    let registry = SubShapeRegistry::default();
    let params = GeneratorParams::default();
    let generator = ShapeGenerator::new(&registry, &params);
    let mut group = c.benchmark_group("shape_generate");
    for level in [30u32, 200, 5000] {
        group.bench_with_input(BenchmarkId::from_parameter(level), &level, |b, &level| {
            b.iter(|| generator.generate_definition("bench", black_box(level)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_decode, bench_encode, bench_operations, bench_generate);
criterion_main!(benches);
