//! Non-intrusive hash maps: std `HashMap` and `rapidhash`
//! 非侵入式哈希表：std `HashMap` 与 `rapidhash`

use std::{collections::HashMap, hash::BuildHasher, mem::size_of};

use super::Backend;
use crate::{Elem, Handle, Key};

/// Shrink once occupancy falls below 1/SHRINK_DIV of capacity
/// 占用率低于容量的 1/SHRINK_DIV 时收缩
const SHRINK_DIV: usize = 8;

/// SwissTable control group width
/// SwissTable 控制组宽度
const GROUP: usize = 16;

/// Key copy plus handle per element
/// 每个元素保存键副本与句柄
pub struct MapBackend<S> {
  map: HashMap<Key, Handle, S>,
}

impl<S: BuildHasher> MapBackend<S> {
  #[must_use]
  pub fn new(map: HashMap<Key, Handle, S>) -> Self {
    Self { map }
  }
}

#[cfg(feature = "std-hashmap")]
pub fn std_map(_n: usize) -> Box<dyn Backend> {
  Box::new(MapBackend::new(HashMap::new()))
}

#[cfg(feature = "rapidhash")]
pub fn rapid(_n: usize) -> Box<dyn Backend> {
  Box::new(MapBackend::new(rapidhash::RapidHashMap::default()))
}

/// Bytes of a SwissTable holding `cap` entries: slots, one control byte per
/// slot and a trailing group
/// 容纳 `cap` 个条目的 SwissTable 字节数：槽位、每槽一个控制字节及尾部控制组
#[must_use]
pub fn estimate(cap: usize) -> usize {
  if cap == 0 {
    return 0;
  }
  let buckets = if cap < 8 {
    if cap < 4 { 4 } else { 8 }
  } else {
    (cap * 8 / 7).next_power_of_two()
  };
  buckets * (size_of::<(Key, Handle)>() + 1) + GROUP
}

impl<S: BuildHasher + 'static> Backend for MapBackend<S> {
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
    let handle = self.map.remove(&key)?;
    let len = self.map.len();
    if len * SHRINK_DIV < self.map.capacity() {
      self.map.shrink_to(len * 2);
    }
    Some(handle)
  }

  fn mem(&self) -> usize {
    estimate(self.map.capacity())
  }

  fn len(&self) -> usize {
    self.map.len()
  }
}
