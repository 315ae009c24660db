use thiserror::Error;

use crate::{Handle, Key, op::Op};

/// Bench specialized Result type.
/// 基准测试专用的 Result 类型。
pub type Result<T> = std::result::Result<T, Error>;

/// Bench Error Enum. Every variant aborts the run.
/// 基准测试错误枚举。任一变体都会终止运行。
#[derive(Error, Debug)]
pub enum Error {
  /// Backend name not registered.
  /// 未注册的后端名称。
  #[error("Unknown data {0}")]
  UnknownBackend(String),
  /// Dataset size must be positive.
  /// 数据集大小必须为正。
  #[error("Invalid size {0}")]
  InvalidSize(u32),
  /// Key guaranteed present was not found.
  /// 保证存在的键未找到。
  #[error("{backend} {op}: key {key:#010x} not found")]
  NotFound {
    backend: &'static str,
    op: Op,
    key: Key,
  },
  /// Key guaranteed absent was found.
  /// 保证不存在的键被找到。
  #[error("{backend} {op}: absent key {key:#010x} found")]
  UnexpectedHit {
    backend: &'static str,
    op: Op,
    key: Key,
  },
  /// Located element carries another key.
  /// 找到的元素携带了其他键。
  #[error("{backend} {op}: expected key {expected:#010x}, element holds {found:#010x}")]
  KeyMismatch {
    backend: &'static str,
    op: Op,
    expected: Key,
    found: Key,
  },
  /// Backend returned a handle outside the element slab.
  /// 后端返回了元素数组之外的句柄。
  #[error("{backend} {op}: handle {handle} out of range")]
  BadHandle {
    backend: &'static str,
    op: Op,
    handle: Handle,
  },
  /// Container still holds elements at teardown.
  /// 销毁时容器仍持有元素。
  #[error("{backend}: {len} live elements at teardown")]
  NotEmpty { backend: &'static str, len: usize },
  /// Shifted keys would collide with live keys.
  /// 偏移后的键会与存活键冲突。
  #[error("Key delta {delta} collides at size {size}")]
  DeltaCollision { size: u32, delta: u32 },
  /// Result file IO.
  /// 结果文件 IO。
  #[error("IO error: {0}")]
  Io(#[from] std::io::Error),
}

impl Error {
  /// Bad invocation, nothing measured
  /// 调用参数错误，未进行任何测量
  #[must_use]
  pub fn is_usage(&self) -> bool {
    matches!(self, Self::UnknownBackend(_) | Self::InvalidSize(_))
  }
}
