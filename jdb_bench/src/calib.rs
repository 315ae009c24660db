//! Cache-miss cost calibration
//! 缓存未命中开销校准

use std::hint::black_box;

use crate::clock::Clock;

pub const MISS_SIZE: usize = 512 << 20;
pub const MISS_DELTA: usize = 512;
pub const MISS_PASSES: usize = 8;

/// Estimated ns per cache-line miss: touch every `delta`-th byte of a `size`
/// buffer, keep the fastest of `passes` passes.
/// 估算每次缓存行未命中的纳秒数：访问 `size` 缓冲区中每隔 `delta` 的字节，取 `passes` 次中最快的一次。
#[must_use]
pub fn cache_miss(clock: &Clock, size: usize, delta: usize, passes: usize) -> u64 {
  let delta = delta.max(1);
  let size = size.max(delta);
  let mut data = vec![0u8; size];
  let mut best = u64::MAX;

  for _ in 0..passes.max(1) {
    let start = clock.now();
    for b in data.iter_mut().step_by(delta) {
      *b = b.wrapping_add(1);
    }
    black_box(&data);
    best = best.min(clock.now().saturating_sub(start));
  }

  best.saturating_mul(delta as u64) / size as u64
}
