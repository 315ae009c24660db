//! Backend adapter contract and compile-time registry
//! 后端适配契约与编译期注册表

#[cfg(feature = "btreemap")]
pub mod btree;
#[cfg(feature = "jdb-chain")]
pub mod chain;
#[cfg(any(feature = "std-hashmap", feature = "rapidhash"))]
pub mod map;

use crate::{Elem, Error, Handle, Key, Result};

/// Associative container under test
/// 被测关联容器
///
/// Elements are owned by the engine; a backend stores handles only and borrows
/// the element slab on each call. Intrusive backends read keys through it,
/// others may keep their own key copy.
/// 元素由引擎持有；后端只保存句柄，并在每次调用时借用元素数组。侵入式后端通过它读取键，其他后端可保存自己的键副本。
pub trait Backend {
  /// Link element `handle`, whose key is `key`
  /// 链接键为 `key` 的元素 `handle`
  fn insert(&mut self, elems: &[Elem], handle: Handle, key: Key);

  /// Handle of `key`, if present
  /// `key` 的句柄（若存在）
  fn find(&self, elems: &[Elem], key: Key) -> Option<Handle>;

  /// Unlink and return the handle of `key`
  /// 解除并返回 `key` 的句柄
  fn remove(&mut self, elems: &[Elem], key: Key) -> Option<Handle>;

  /// Rekey the element at `old` to `new`. Afterwards `new` is findable and `old` is not.
  /// 将 `old` 处的元素改键为 `new`。之后可找到 `new`，找不到 `old`。
  fn change(&mut self, elems: &mut [Elem], old: Key, new: Key) -> Option<Handle> {
    let handle = self.remove(elems, old)?;
    // out-of-range handles go back unlinked for the caller to reject
    // 越界句柄不再链接，原样返回由调用方拒绝
    if let Some(e) = elems.get_mut(handle as usize) {
      e.key = new;
      self.insert(elems, handle, new);
    }
    Some(handle)
  }

  /// Best-effort bytes held by internal structures
  /// 内部结构占用字节数（尽力估算）
  fn mem(&self) -> usize;

  /// Live element count
  /// 存活元素数量
  fn len(&self) -> usize;

  fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

/// Builds an empty backend sized for `n` elements
/// 构建可容纳 `n` 个元素的空后端
pub type New = fn(usize) -> Box<dyn Backend>;

/// Registered backend
/// 已注册后端
#[derive(Clone, Copy)]
pub struct Entry {
  pub name: &'static str,
  pub new: New,
}

impl std::fmt::Debug for Entry {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Entry").field("name", &self.name).finish()
  }
}

/// Every backend compiled in, in result-column order
/// 所有已编译的后端，按结果列顺序排列
pub const ENTRIES: &[Entry] = &[
  #[cfg(feature = "jdb-chain")]
  Entry {
    name: "jdb-chain",
    new: chain::fixed,
  },
  #[cfg(feature = "jdb-chain")]
  Entry {
    name: "jdb-chain-dyn",
    new: chain::dynamic,
  },
  #[cfg(feature = "std-hashmap")]
  Entry {
    name: "std-hashmap",
    new: map::std_map,
  },
  #[cfg(feature = "rapidhash")]
  Entry {
    name: "rapidhash",
    new: map::rapid,
  },
  #[cfg(feature = "btreemap")]
  Entry {
    name: "btreemap",
    new: btree::new,
  },
];

/// Position of `name` in `entries`
/// `name` 在 `entries` 中的位置
pub fn position(entries: &[Entry], name: &str) -> Result<usize> {
  entries
    .iter()
    .position(|e| e.name == name)
    .ok_or_else(|| Error::UnknownBackend(name.to_owned()))
}
