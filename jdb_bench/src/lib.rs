//! Cold-cache micro-benchmark harness for associative containers
//! 关联容器冷缓存微基准测试工具
//!
//! Every backend sees the same keys, in the same orders, starting from a cold
//! cache. Each (size, backend, order, operation) cell keeps the minimum over
//! retries.
//! 所有后端使用相同的键与顺序，并从冷缓存开始。每个（大小、后端、顺序、操作）单元格保留多次重试中的最小值。

pub mod backend;
pub mod cache;
pub mod calib;
pub mod clock;
pub mod conf;
pub mod driver;
pub mod error;
pub mod op;
pub mod order;
pub mod rnd;
pub mod scan;
pub mod sink;

pub use self::{
  backend::{Backend, Entry},
  clock::Clock,
  error::{Error, Result},
  op::{Op, Order},
  order::{KeyMode, Orders},
  scan::{Conf, Report, Scan},
};
use conf::PAYLOAD;

/// 32-bit key
/// 32 位键
pub type Key = u32;

/// Index of an element in the run's element slab
/// 元素在运行期元素数组中的下标
pub type Handle = u32;

/// One logical record: key plus opaque payload
/// 一条逻辑记录：键加不透明负载
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(C)]
pub struct Elem {
  pub key: Key,
  pub payload: [u8; PAYLOAD],
}
