//! Operation driver: runs the timed operation sequence on one backend instance
//! 操作驱动：在单个后端实例上执行计时操作序列

use log::{Level, log};

use crate::{
  Backend, Elem, Error, Handle, Key, Result,
  cache::Scratch,
  clock::{Clock, per_elem},
  conf::DELTA,
  op::{Op, Order},
};

/// One value per operation, indexed by `Op::idx`
/// 每个操作一个值，按 `Op::idx` 索引
pub type Cells = [u32; Op::COUNT];

pub struct Driver<'a> {
  clock: &'a Clock,
  name: &'static str,
  backend: &'a mut dyn Backend,
  elems: &'a mut [Elem],
  level: Level,
}

impl<'a> Driver<'a> {
  /// `elems` must hold at least one slot per key
  /// `elems` 至少要为每个键提供一个槽位
  pub fn new(
    clock: &'a Clock,
    name: &'static str,
    backend: &'a mut dyn Backend,
    elems: &'a mut [Elem],
  ) -> Self {
    Self {
      clock,
      name,
      backend,
      elems,
      level: Level::Debug,
    }
  }

  /// Level of the per-measurement lines
  /// 单次测量日志的级别
  #[must_use]
  pub fn level(mut self, level: Level) -> Self {
    self.level = level;
    self
  }

  /// Whole sequence on an empty backend. Scratch is swept before insert.
  /// 在空后端上执行完整序列。插入前先清扫缓存。
  pub fn run(
    &mut self,
    scratch: &mut Scratch,
    order: Order,
    insert: &[Key],
    search: &[Key],
  ) -> Result<Cells> {
    let mut cells = [0; Op::COUNT];
    scratch.clear();
    for op in Op::SEQ {
      let v = match op {
        Op::Insert => self.insert(insert)?,
        Op::Hit => self.hit(search)?,
        Op::Miss => self.miss(search)?,
        Op::Change => self.change(search, insert)?,
        Op::Size => self.size(),
        Op::Remove => self.remove(search)?,
      };
      log!(
        self.level,
        "{order:>10}, {op:>10}, {:>14}, {v:4} [{}]",
        self.name,
        op.unit()
      );
      cells[op.idx()] = v;
    }
    Ok(cells)
  }

  /// Element i takes key `keys[i]` and is linked
  /// 第 i 个元素取键 `keys[i]` 并被链接
  pub fn insert(&mut self, keys: &[Key]) -> Result<u32> {
    let start = self.clock.now();
    for (i, &key) in keys.iter().enumerate() {
      self.elems[i].key = key;
      self.backend.insert(self.elems, i as Handle, key);
    }
    Ok(per_elem(self.clock.now() - start, keys.len()))
  }

  pub fn hit(&mut self, keys: &[Key]) -> Result<u32> {
    let start = self.clock.now();
    for &key in keys {
      self.find_hit(Op::Hit, key)?;
    }
    Ok(per_elem(self.clock.now() - start, keys.len()))
  }

  /// Looks up `key + DELTA`, never present
  /// 查找 `key + DELTA`，其必不存在
  pub fn miss(&mut self, keys: &[Key]) -> Result<u32> {
    let start = self.clock.now();
    for &key in keys {
      self.find_miss(key.wrapping_add(DELTA))?;
    }
    Ok(per_elem(self.clock.now() - start, keys.len()))
  }

  /// Rekeys `remove[i]` to `insert[i] + DELTA`
  /// 将 `remove[i]` 改键为 `insert[i] + DELTA`
  pub fn change(&mut self, remove: &[Key], insert: &[Key]) -> Result<u32> {
    let start = self.clock.now();
    for (&old, &new) in remove.iter().zip(insert) {
      let new = new.wrapping_add(DELTA);
      let Some(handle) = self.backend.change(self.elems, old, new) else {
        return Err(self.not_found(Op::Change, old));
      };
      self.check(Op::Change, handle, new)?;
    }
    Ok(per_elem(self.clock.now() - start, remove.len()))
  }

  /// Bytes per element, no clock sample
  /// 每元素字节数，不采样时钟
  pub fn size(&self) -> u32 {
    per_elem(self.backend.mem() as u64, self.backend.len())
  }

  /// Removes `key + DELTA`, i.e. every key set by change
  /// 删除 `key + DELTA`，即 change 写入的全部键
  pub fn remove(&mut self, keys: &[Key]) -> Result<u32> {
    let start = self.clock.now();
    for &key in keys {
      let key = key.wrapping_add(DELTA);
      let Some(handle) = self.backend.remove(self.elems, key) else {
        return Err(self.not_found(Op::Remove, key));
      };
      self.check(Op::Remove, handle, key)?;
    }
    Ok(per_elem(self.clock.now() - start, keys.len()))
  }

  #[inline]
  fn find_hit(&self, op: Op, key: Key) -> Result<Handle> {
    let Some(handle) = self.backend.find(self.elems, key) else {
      return Err(self.not_found(op, key));
    };
    self.check(op, handle, key)?;
    Ok(handle)
  }

  #[inline]
  fn find_miss(&self, key: Key) -> Result<()> {
    if self.backend.find(self.elems, key).is_some() {
      return Err(Error::UnexpectedHit {
        backend: self.name,
        op: Op::Miss,
        key,
      });
    }
    Ok(())
  }

  /// The located element must carry `key`
  /// 找到的元素必须携带 `key`
  #[inline]
  fn check(&self, op: Op, handle: Handle, key: Key) -> Result<()> {
    let found = match self.elems.get(handle as usize) {
      Some(e) => e.key,
      None => {
        return Err(Error::BadHandle {
          backend: self.name,
          op,
          handle,
        });
      }
    };
    if found != key {
      return Err(Error::KeyMismatch {
        backend: self.name,
        op,
        expected: key,
        found,
      });
    }
    Ok(())
  }

  #[cold]
  fn not_found(&self, op: Op, key: Key) -> Error {
    Error::NotFound {
      backend: self.name,
      op,
      key,
    }
  }
}

/// Fails when the backend still holds elements, then drops it
/// 后端仍持有元素时失败，随后释放
pub fn teardown(name: &'static str, backend: Box<dyn Backend>) -> Result<()> {
  let len = backend.len();
  if len != 0 {
    return Err(Error::NotEmpty { backend: name, len });
  }
  drop(backend);
  Ok(())
}
