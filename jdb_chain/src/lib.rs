//! Intrusive chaining hash table over u32 handles
//! 基于 u32 句柄的侵入式链式哈希表
//!
//! The table never stores keys. Objects live in caller-owned storage and are
//! addressed by handle; lookups confirm a match through a caller-supplied
//! predicate that reads the object itself.
//! 表内不保存键。对象位于调用方持有的存储中，通过句柄访问；查找时由调用方提供的谓词读取对象本身来确认匹配。

use std::mem::size_of;

pub mod consts;
pub mod hash;

pub use self::{
  consts::{MIN_BUCKETS, NIL},
  hash::inthash_u32,
};
use consts::SHRINK_DIV;

/// Per-handle link node
/// 每个句柄的链接节点
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Node {
  pub next: u32,
  pub hash: u32,
}

impl Node {
  pub const EMPTY: Self = Self { next: NIL, hash: 0 };
}

/// Chaining hash table; fixed bucket array or auto-resizing
/// 链式哈希表；固定桶数组或自动扩缩
#[derive(Clone, Debug)]
pub struct Chain {
  bucket: Vec<u32>,
  node: Vec<Node>,
  mask: usize,
  len: usize,
  resize: bool,
}

impl Chain {
  /// Fixed table, bucket count rounded up to a power of two. Handles below
  /// `cap` need no reallocation.
  /// 固定表，桶数向上取整为 2 的幂。小于 `cap` 的句柄无需重新分配。
  #[must_use]
  pub fn fixed(buckets: usize, cap: usize) -> Self {
    Self::build(buckets, cap, false)
  }

  /// Table that doubles at load 1 and halves at load 1/8
  /// 负载为 1 时翻倍、负载为 1/8 时减半的表
  #[must_use]
  pub fn dynamic(cap: usize) -> Self {
    Self::build(MIN_BUCKETS, cap, true)
  }

  fn build(buckets: usize, cap: usize, resize: bool) -> Self {
    let n = buckets.max(MIN_BUCKETS).next_power_of_two();
    Self {
      bucket: vec![NIL; n],
      node: vec![Node::EMPTY; cap],
      mask: n - 1,
      len: 0,
      resize,
    }
  }

  #[inline]
  #[must_use]
  pub fn len(&self) -> usize {
    self.len
  }

  #[inline]
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.len == 0
  }

  #[inline]
  #[must_use]
  pub fn bucket_count(&self) -> usize {
    self.bucket.len()
  }

  /// Memory used by buckets and live nodes (Bytes)
  /// 桶与存活节点占用的内存（字节）
  #[inline]
  #[must_use]
  pub fn mem_usage(&self) -> usize {
    self.bucket.len() * size_of::<u32>() + self.len * size_of::<Node>()
  }

  /// Link `handle` under `hash`. The handle must not already be linked.
  /// 以 `hash` 链接 `handle`。该句柄不得已被链接。
  pub fn insert(&mut self, handle: u32, hash: u32) {
    let h = handle as usize;
    if h >= self.node.len() {
      self.node.resize(h + 1, Node::EMPTY);
    }
    let pos = hash as usize & self.mask;
    self.node[h] = Node {
      next: self.bucket[pos],
      hash,
    };
    self.bucket[pos] = handle;
    self.len += 1;

    if self.resize && self.len >= self.bucket.len() {
      self.rehash(self.bucket.len() * 2);
    }
  }

  /// First handle under `hash` accepted by `eq`
  /// `hash` 下第一个被 `eq` 接受的句柄
  #[inline]
  pub fn search(&self, hash: u32, mut eq: impl FnMut(u32) -> bool) -> Option<u32> {
    let mut h = self.bucket[hash as usize & self.mask];
    while h != NIL {
      let node = self.node[h as usize];
      if node.hash == hash && eq(h) {
        return Some(h);
      }
      h = node.next;
    }
    None
  }

  /// Unlink and return the first handle under `hash` accepted by `eq`
  /// 解除并返回 `hash` 下第一个被 `eq` 接受的句柄
  pub fn remove(&mut self, hash: u32, mut eq: impl FnMut(u32) -> bool) -> Option<u32> {
    let pos = hash as usize & self.mask;
    let mut prev = NIL;
    let mut h = self.bucket[pos];
    while h != NIL {
      let node = self.node[h as usize];
      if node.hash == hash && eq(h) {
        if prev == NIL {
          self.bucket[pos] = node.next;
        } else {
          self.node[prev as usize].next = node.next;
        }
        self.node[h as usize] = Node::EMPTY;
        self.len -= 1;

        if self.resize
          && self.bucket.len() > MIN_BUCKETS
          && self.len <= self.bucket.len() / SHRINK_DIV
        {
          self.rehash(self.bucket.len() / 2);
        }
        return Some(h);
      }
      prev = h;
      h = node.next;
    }
    None
  }

  /// Move every chain into a bucket array of `n` slots
  /// 将所有链迁移到 `n` 个槽的桶数组
  fn rehash(&mut self, n: usize) {
    let mask = n - 1;
    let mut bucket = vec![NIL; n];
    for &head in &self.bucket {
      let mut h = head;
      while h != NIL {
        let node = &mut self.node[h as usize];
        let next = node.next;
        let pos = node.hash as usize & mask;
        node.next = bucket[pos];
        bucket[pos] = h;
        h = next;
      }
    }
    self.bucket = bucket;
    self.mask = mask;
  }
}
