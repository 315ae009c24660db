//! Key construction and key orders
//! 键构造与键顺序

use crate::{Key, op::Order, rnd::Lcg};

const DENSE_BASE: u32 = 0x8000_0000;

/// Key construction mode
/// 键构造模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyMode {
  /// Evenly spread over the whole 32-bit space
  /// 均匀分布于整个 32 位空间
  Sparse,
  /// Packed in the high half with step 2
  /// 以步长 2 紧凑分布于高半区
  #[default]
  Dense,
}

impl KeyMode {
  /// i-th key of a dataset of `n` keys
  /// `n` 个键的数据集中的第 i 个键
  #[inline]
  #[must_use]
  pub fn key(self, n: u32, i: u32) -> Key {
    match self {
      KeyMode::Sparse => (u32::MAX / n) * i,
      KeyMode::Dense => DENSE_BASE.wrapping_add(i.wrapping_mul(2)),
    }
  }

  /// True when `key + delta` never overflows nor lands on another key of the dataset
  /// 当 `key + delta` 既不溢出也不落在数据集其他键上时为真
  #[must_use]
  pub fn delta_is_safe(self, n: u32, delta: u32) -> bool {
    if n == 0 {
      return true;
    }
    let (n, delta) = (u64::from(n), u64::from(delta));
    let (first, step) = match self {
      KeyMode::Sparse => (0, u64::from(u32::MAX) / n),
      KeyMode::Dense => (u64::from(DENSE_BASE), 2),
    };
    let last = first + step * (n - 1);
    if last + delta > u64::from(u32::MAX) {
      return false;
    }
    delta == 0 || delta % step != 0 || delta / step >= n
  }
}

/// Key orders for one dataset size, generated once and shared by every backend
/// 单个数据集大小的键顺序，只生成一次并由所有后端共享
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Orders {
  pub forward: Vec<Key>,
  pub rand_a: Vec<Key>,
  pub rand_b: Vec<Key>,
}

impl Orders {
  pub fn new(n: u32, mode: KeyMode, rng: &mut Lcg) -> Self {
    let forward: Vec<Key> = (0..n).map(|i| mode.key(n, i)).collect();
    let mut rand_a = forward.clone();
    let mut rand_b = forward.clone();

    // Fisher-Yates, both permutations drawn from one stream
    // Fisher-Yates 洗牌，两个排列来自同一随机流
    for i in (1..n).rev() {
      let j = rng.rnd(i + 1) as usize;
      rand_a.swap(i as usize, j);
      let j = rng.rnd(i + 1) as usize;
      rand_b.swap(i as usize, j);
    }

    Self {
      forward,
      rand_a,
      rand_b,
    }
  }

  #[inline]
  #[must_use]
  pub fn len(&self) -> usize {
    self.forward.len()
  }

  #[inline]
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.forward.is_empty()
  }

  /// (insert keys, search keys) for a test order
  /// 测试顺序对应的（插入键，查找键）
  #[must_use]
  pub fn keys(&self, order: Order) -> (&[Key], &[Key]) {
    match order {
      Order::Forward => (&self.forward, &self.forward),
      Order::Random => (&self.rand_a, &self.rand_b),
    }
  }
}
