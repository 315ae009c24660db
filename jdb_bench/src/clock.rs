//! Monotonic nanosecond clock
//! 单调纳秒时钟

use std::time::Instant;

/// Nanoseconds since creation. std aborts when the platform timer fails, so no
/// reading is ever a fabricated value.
/// 自创建以来的纳秒数。平台计时器失败时 std 会中止，因此不会返回伪造的读数。
#[derive(Debug, Clone, Copy)]
pub struct Clock {
  base: Instant,
}

impl Default for Clock {
  fn default() -> Self {
    Self::new()
  }
}

impl Clock {
  #[must_use]
  pub fn new() -> Self {
    Self {
      base: Instant::now(),
    }
  }

  #[inline(always)]
  #[must_use]
  pub fn now(&self) -> u64 {
    u64::try_from(self.base.elapsed().as_nanos()).unwrap_or(u64::MAX)
  }
}

/// `elapsed / n` saturated to u32
/// `elapsed / n`，饱和到 u32
#[inline]
#[must_use]
pub fn per_elem(elapsed: u64, n: usize) -> u32 {
  let n = (n as u64).max(1);
  u32::try_from(elapsed / n).unwrap_or(u32::MAX)
}
