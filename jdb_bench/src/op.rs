//! Operations and test orders
//! 操作与测试顺序

use std::fmt;

/// Measured operation
/// 被测量的操作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Op {
  Insert = 0,
  Hit = 1,
  Miss = 2,
  Size = 3,
  Change = 4,
  Remove = 5,
}

impl Op {
  pub const COUNT: usize = 6;

  /// Result file order
  /// 结果文件顺序
  pub const ALL: [Op; Op::COUNT] = [
    Op::Insert,
    Op::Hit,
    Op::Miss,
    Op::Size,
    Op::Change,
    Op::Remove,
  ];

  /// Execution order within one dataset instance
  /// 单个数据集实例内的执行顺序
  pub const SEQ: [Op; Op::COUNT] = [
    Op::Insert,
    Op::Hit,
    Op::Miss,
    Op::Change,
    Op::Size,
    Op::Remove,
  ];

  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Op::Insert => "insert",
      Op::Hit => "hit",
      Op::Miss => "miss",
      Op::Size => "size",
      Op::Change => "change",
      Op::Remove => "remove",
    }
  }

  /// Unit of the recorded value
  /// 记录值的单位
  #[must_use]
  pub const fn unit(self) -> &'static str {
    match self {
      Op::Size => "byte",
      _ => "ns",
    }
  }

  #[inline]
  #[must_use]
  pub const fn idx(self) -> usize {
    self as usize
  }
}

impl fmt::Display for Op {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.pad(self.name())
  }
}

/// Key order under test
/// 被测试的键顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Order {
  /// Insert and look up in ascending key order
  /// 按升序插入与查找
  Forward = 0,
  /// Insert with Random-A, look up / remove with Random-B
  /// 用 Random-A 插入，用 Random-B 查找/删除
  Random = 1,
}

impl Order {
  pub const COUNT: usize = 2;
  pub const ALL: [Order; Order::COUNT] = [Order::Forward, Order::Random];

  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Order::Forward => "forward",
      Order::Random => "random",
    }
  }

  #[inline]
  #[must_use]
  pub const fn idx(self) -> usize {
    self as usize
  }
}

impl fmt::Display for Order {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.pad(self.name())
  }
}
