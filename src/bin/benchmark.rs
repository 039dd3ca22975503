//! Performance benchmark comparing the stepping strategies and the instance sync

use std::time::Instant;
use rand::{SeedableRng, rngs::StdRng};
use life_sculpture::domain::{Algorithm, LifeEngine, MAX_GENERATIONS, presets, random_soup};
use life_sculpture::rendering::{InstanceBufferCache, SyncOutcome};

fn seeded_engine(size: u32, cells: &[(i32, i32)], algorithm: Algorithm) -> Option<LifeEngine> {
    let mut engine = LifeEngine::new(size);
    engine.initialize_from_pattern(cells).ok()?;
    engine.set_algorithm(algorithm);
    Some(engine)
}

/// Time to fill the whole history, in ms per generation
fn benchmark_history(size: u32, cells: &[(i32, i32)], algorithm: Algorithm) -> Option<(f64, LifeEngine)> {
    let mut engine = seeded_engine(size, cells, algorithm)?;
    let start = Instant::now();
    let appended = engine.compute_generations(MAX_GENERATIONS - 1);
    let ms = start.elapsed().as_secs_f64() * 1000.0 / appended.max(1) as f64;
    Some((ms, engine))
}

/// Time for one full-window rebuild of the instance arena
fn benchmark_sync(engine: &LifeEngine, cache: &mut InstanceBufferCache) -> (f64, usize, usize) {
    cache.invalidate();
    let start = Instant::now();
    let outcome = cache.sync(engine.history(), 0, engine.history().len() as i64 - 1);
    let ms = start.elapsed().as_secs_f64() * 1000.0;
    match outcome {
        SyncOutcome::Rebuilt { instances, dropped } => (ms, instances, dropped),
        SyncOutcome::Unchanged => (ms, cache.len(), cache.dropped()),
    }
}

fn main() {
    env_logger::init();
    println!("=== Life Sculpture Performance Benchmark ===\n");

    let mut rng = StdRng::seed_from_u64(42);
    let seeds: Vec<(String, u32, Vec<(i32, i32)>)> = vec![
        ("R-pentomino".to_string(), 200, presets::r_pentomino().cells),
        ("Acorn".to_string(), 400, presets::acorn().cells),
        ("Glider gun".to_string(), 200, presets::glider_gun().cells),
        ("Soup 64 @35%".to_string(), 200, random_soup(64, 64, 0.35, &mut rng)),
        ("Soup 256 @35%".to_string(), 400, random_soup(256, 256, 0.35, &mut rng)),
    ];

    for algorithm in Algorithm::all() {
        println!("{:>12}: {}", algorithm.name(), algorithm.description());
    }
    for pattern in presets::all_patterns() {
        println!("{:>12}: {}", pattern.name, pattern.description);
    }
    println!();

    let mut cache = InstanceBufferCache::new();

    println!(
        "{:>15} {:>8} {:>12} {:>12} {:>10} {:>12} {:>12} {:>10}",
        "Seed", "Grid", "Sparse", "Sparse+Par", "Speedup", "Sync", "Instances", "Dropped"
    );
    println!("{:-<100}", "");

    for (name, size, cells) in &seeds {
        let Some((serial_ms, engine)) = benchmark_history(*size, cells, Algorithm::Sparse) else {
            println!("{:>15} {:>8} does not fit", name, format!("{}x{}", size, size));
            continue;
        };
        let parallel_ms = benchmark_history(*size, cells, Algorithm::SparseParallel)
            .map_or(0.0, |(ms, _)| ms);

        let speedup_str = if parallel_ms > 0.0 {
            format!("{:>9.1}x", serial_ms / parallel_ms)
        } else {
            format!("{:>10}", "-")
        };

        let (sync_ms, instances, dropped) = benchmark_sync(&engine, &mut cache);

        println!(
            "{:>15} {:>8} {:>12.3} {:>12.3} {} {:>12.2} {:>12} {:>10}",
            name,
            format!("{}x{}", size, size),
            serial_ms,
            parallel_ms,
            speedup_str,
            sync_ms,
            instances,
            dropped
        );
    }

    println!("\n=== Instance Arena ===\n");

    let bytes = cache.capacity() * std::mem::size_of::<life_sculpture::rendering::InstanceRecord>();
    println!("Capacity:   {:>10} instances", cache.capacity());
    println!("Memory:     {:>10} bytes ({:.1} MB)", bytes, bytes as f64 / 1_000_000.0);
}
