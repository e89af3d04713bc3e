//! Simple profiling counters for understanding how much lazy work is done.

use std::sync::atomic::{AtomicU64, Ordering};

pub static FLUSH_COUNT: AtomicU64 = AtomicU64::new(0);
pub static PUSH_COUNT: AtomicU64 = AtomicU64::new(0);
pub static CASCADE_COUNT: AtomicU64 = AtomicU64::new(0);
pub static COMPOSE_COUNT: AtomicU64 = AtomicU64::new(0);

/// A pending delta was applied to its node and handed to the children.
#[inline]
pub fn flush() {
    FLUSH_COUNT.fetch_add(1, Ordering::Relaxed);
}

/// A delta was stored in a pending slot.
#[inline]
pub fn push() {
    PUSH_COUNT.fetch_add(1, Ordering::Relaxed);
}

/// A push found an older delta and had to send it one level further down.
#[inline]
pub fn cascade() {
    CASCADE_COUNT.fetch_add(1, Ordering::Relaxed);
}

/// A push folded two deltas into one.
#[inline]
pub fn compose() {
    COMPOSE_COUNT.fetch_add(1, Ordering::Relaxed);
}

pub fn reset() {
    FLUSH_COUNT.store(0, Ordering::Relaxed);
    PUSH_COUNT.store(0, Ordering::Relaxed);
    CASCADE_COUNT.store(0, Ordering::Relaxed);
    COMPOSE_COUNT.store(0, Ordering::Relaxed);
}

pub fn report() -> String {
    let flushes = FLUSH_COUNT.load(Ordering::Relaxed);
    let pushes = PUSH_COUNT.load(Ordering::Relaxed);
    let cascades = CASCADE_COUNT.load(Ordering::Relaxed);
    let composes = COMPOSE_COUNT.load(Ordering::Relaxed);
    let cascade_rate = if pushes > 0 { cascades as f64 / pushes as f64 * 100.0 } else { 0.0 };

    format!(
        "Flush: {}, Push: {} (cascade: {}, {:.1}%), Compose: {}",
        flushes, pushes, cascades, cascade_rate, composes
    )
}
