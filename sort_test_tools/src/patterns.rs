use std::env;
use std::sync::atomic::{AtomicBool, Ordering};

use once_cell::sync::OnceCell;
use rand::prelude::*;

/// Input generators for exercising the sort variants.
/// Values are i32, matching what the visualizer accepts.

// --- Public ---

pub fn random(len: usize) -> Vec<i32> {
    //     .
    // : . : :
    // :.:::.::

    random_vec(len)
}

pub fn random_uniform<R>(len: usize, range: R) -> Vec<i32>
where
    R: Into<rand::distributions::Uniform<i32>>,
{
    // :.:.:.::
    let mut rng = new_rng();
    let dist: rand::distributions::Uniform<i32> = range.into();

    (0..len).map(|_| dist.sample(&mut rng)).collect()
}

/// What the "random array" button produces: small non-negative values with plenty of
/// duplicates once `len` grows.
pub fn classroom(len: usize) -> Vec<i32> {
    random_uniform(len, 0..100)
}

pub fn all_equal(len: usize) -> Vec<i32> {
    // ......
    // ::::::

    vec![66; len]
}

pub fn ascending(len: usize) -> Vec<i32> {
    //     .:
    //   .:::
    // .:::::

    (0..len as i32).collect()
}

pub fn descending(len: usize) -> Vec<i32> {
    // :.
    // :::.
    // :::::.

    (0..len as i32).rev().collect()
}

pub fn saw_ascending(len: usize, saw_count: usize) -> Vec<i32> {
    //   .:  .:
    // .:::.:::

    if len == 0 {
        return Vec::new();
    }

    let mut vals = random_vec(len);
    let chunk_len = len / saw_count.max(1);

    for chunk in vals.chunks_mut(chunk_len.max(1)) {
        chunk.sort();
    }

    vals
}

pub fn saw_descending(len: usize, saw_count: usize) -> Vec<i32> {
    // :.  :.
    // :::.:::.

    if len == 0 {
        return Vec::new();
    }

    let mut vals = random_vec(len);
    let chunk_len = len / saw_count.max(1);

    for chunk in vals.chunks_mut(chunk_len.max(1)) {
        chunk.sort_by_key(|&e| std::cmp::Reverse(e));
    }

    vals
}

pub fn saw_mixed(len: usize, saw_count: usize) -> Vec<i32> {
    // :.  :.    .::.    .:
    // :::.:::..::::::..:::

    if len == 0 {
        return Vec::new();
    }

    let mut vals = random_vec(len);
    let chunk_len = (len / saw_count.max(1)).max(1);
    let mut rng = new_rng();

    for chunk in vals.chunks_mut(chunk_len) {
        if rng.gen::<bool>() {
            chunk.sort();
        } else {
            chunk.sort_by_key(|&e| std::cmp::Reverse(e));
        }
    }

    vals
}

pub fn pipe_organ(len: usize) -> Vec<i32> {
    //   .:.
    // .:::::.

    let mut vals = random_vec(len);
    let (first_half, second_half) = vals.split_at_mut(len / 2);

    first_half.sort();
    second_half.sort_by_key(|&e| std::cmp::Reverse(e));

    vals
}

/// Makes every call to a random pattern draw a fresh seed.
///
/// By default all patterns share one seed per process, so a failure can be replayed with
/// `OVERRIDE_SEED`. Benchmarks that want variation call this first.
pub fn use_random_seed_each_time() {
    if env_override_seed().is_some() {
        panic!("Using use_random_seed_each_time conflicts with the external seed override.");
    }

    RANDOM_EACH_TIME.store(true, Ordering::Release);
}

pub fn random_init_seed() -> u64 {
    if RANDOM_EACH_TIME.load(Ordering::Acquire) {
        return thread_rng().gen();
    }

    static SEED: OnceCell<u64> = OnceCell::new();
    *SEED.get_or_init(|| env_override_seed().unwrap_or_else(|| thread_rng().gen()))
}

// --- Private ---

static RANDOM_EACH_TIME: AtomicBool = AtomicBool::new(false);

fn env_override_seed() -> Option<u64> {
    let seed = env::var("OVERRIDE_SEED").ok()?;
    match seed.parse() {
        Ok(seed) => Some(seed),
        Err(_) => panic!("OVERRIDE_SEED must be a u64, got {seed:?}"),
    }
}

fn new_rng() -> StdRng {
    StdRng::seed_from_u64(random_init_seed())
}

fn random_vec(len: usize) -> Vec<i32> {
    let mut rng = new_rng();

    (0..len).map(|_| rng.gen::<i32>()).collect()
}
