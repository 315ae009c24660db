//! Reproducible pseudo-random stream
//! 可复现的伪随机序列

use crate::conf::SEED;

const MUL: u64 = 6_364_136_223_846_793_005;
const INC: u64 = 1_442_695_040_888_963_407;

/// 64-bit linear congruential generator (Knuth MMIX constants)
/// 64 位线性同余生成器（Knuth MMIX 常数）
#[derive(Debug, Clone)]
pub struct Lcg {
  seed: u64,
}

impl Default for Lcg {
  fn default() -> Self {
    Self::new(SEED)
  }
}

impl Lcg {
  #[must_use]
  pub const fn new(seed: u64) -> Self {
    Self { seed }
  }

  /// Uniform value in [0, max). `max` must be non-zero.
  /// [0, max) 内的均匀值。`max` 必须非零。
  ///
  /// The 64-bit space is cut into `max` buckets of `u64::MAX / max` values;
  /// the truncated tail maps to `max` and is drawn again.
  /// 64 位空间被切分为 `max` 个大小为 `u64::MAX / max` 的桶；截断的尾部映射到 `max`，需重新抽取。
  pub fn rnd(&mut self, max: u32) -> u32 {
    debug_assert!(max > 0);
    let divider = u64::MAX / u64::from(max);
    loop {
      self.seed = self.seed.wrapping_mul(MUL).wrapping_add(INC);
      let r = self.seed / divider;
      if r < u64::from(max) {
        return r as u32;
      }
    }
  }
}
