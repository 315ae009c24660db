//! Intrusive chaining hash table from `jdb_chain`
//! 来自 `jdb_chain` 的侵入式链式哈希表

use jdb_chain::{Chain, inthash_u32};

use super::Backend;
use crate::{Elem, Handle, Key};

pub struct ChainBackend {
  chain: Chain,
}

impl ChainBackend {
  #[must_use]
  pub fn new(chain: Chain) -> Self {
    Self { chain }
  }
}

/// Fixed table with 2n buckets
/// 2n 个桶的固定表
pub fn fixed(n: usize) -> Box<dyn Backend> {
  Box::new(ChainBackend::new(Chain::fixed(n.saturating_mul(2), n)))
}

/// Auto-resizing table
/// 自动扩缩表
pub fn dynamic(n: usize) -> Box<dyn Backend> {
  Box::new(ChainBackend::new(Chain::dynamic(n)))
}

impl Backend for ChainBackend {
  #[inline]
  fn insert(&mut self, _elems: &[Elem], handle: Handle, key: Key) {
    self.chain.insert(handle, inthash_u32(key));
  }

  #[inline]
  fn find(&self, elems: &[Elem], key: Key) -> Option<Handle> {
    self
      .chain
      .search(inthash_u32(key), |h| elems[h as usize].key == key)
  }

  #[inline]
  fn remove(&mut self, elems: &[Elem], key: Key) -> Option<Handle> {
    self
      .chain
      .remove(inthash_u32(key), |h| elems[h as usize].key == key)
  }

  fn mem(&self) -> usize {
    self.chain.mem_usage()
  }

  fn len(&self) -> usize {
    self.chain.len()
  }
}
