//! Cache perturbation
//! 缓存扰动

use std::hint::black_box;

use crate::conf::{CACHE_SIZE, CACHE_STRIDE};

/// Buffer larger than the last-level cache. Sweeping it evicts whatever the
/// previous dataset instance left behind.
/// 大于末级缓存的缓冲区。扫描它会驱逐上一个数据集实例留下的内容。
pub struct Scratch {
  buf: Box<[u8]>,
}

impl Default for Scratch {
  fn default() -> Self {
    Self::new(CACHE_SIZE)
  }
}

impl Scratch {
  #[must_use]
  pub fn new(size: usize) -> Self {
    Self {
      buf: vec![0; size].into_boxed_slice(),
    }
  }

  /// Increment every CACHE_STRIDE-th byte
  /// 每隔 CACHE_STRIDE 字节递增一次
  pub fn clear(&mut self) {
    for b in self.buf.iter_mut().step_by(CACHE_STRIDE) {
      *b = b.wrapping_add(1);
    }
    black_box(&self.buf);
  }

  #[must_use]
  pub fn as_slice(&self) -> &[u8] {
    &self.buf
  }
}
