//! std `BTreeMap`
//! std `BTreeMap`

use std::{collections::BTreeMap, mem::size_of};

use super::Backend;
use crate::{Elem, Handle, Key};

/// Keys per node
/// 每节点键数
const CAPACITY: usize = 11;

/// Parent pointer, parent index and length
/// 父指针、父下标与长度
const NODE_HEADER: usize = size_of::<usize>() + 4;

const LEAF: usize = NODE_HEADER + CAPACITY * (size_of::<Key>() + size_of::<Handle>());
const INTERNAL: usize = LEAF + (CAPACITY + 1) * size_of::<usize>();

#[derive(Default)]
pub struct BTreeBackend {
  map: BTreeMap<Key, Handle>,
}

pub fn new(_n: usize) -> Box<dyn Backend> {
  Box::new(BTreeBackend::default())
}

/// Bytes of a B-tree holding `len` entries with nodes about 2/3 full
/// 节点约 2/3 满时容纳 `len` 个条目的 B 树字节数
#[must_use]
pub fn estimate(len: usize) -> usize {
  let fill = CAPACITY * 2 / 3;
  let leaves = len.div_ceil(fill);
  let mut internal = 0;
  let mut level = leaves;
  while level > 1 {
    level = level.div_ceil(fill + 1);
    internal += level;
  }
  leaves * LEAF + internal * INTERNAL
}

impl Backend for BTreeBackend {
  #[inline]
  fn insert(&mut self, _elems: &[Elem], handle: Handle, key: Key) {
    self.map.insert(key, handle);
  }

  #[inline]
  fn find(&self, _elems: &[Elem], key: Key) -> Option<Handle> {
    self.map.get(&key).copied()
  }

  #[inline]
  fn remove(&mut self, _elems: &[Elem], key: Key) -> Option<Handle> {
    self.map.remove(&key)
  }

  fn mem(&self) -> usize {
    estimate(self.map.len())
  }

  fn len(&self) -> usize {
    self.map.len()
  }
}
