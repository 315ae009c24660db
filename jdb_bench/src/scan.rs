//! Scan controller: dataset sizes, retries and degenerate-case skipping
//! 扫描控制器：数据集大小、重试与退化情况跳过

use std::path::PathBuf;

use log::{Level, debug, info};

use crate::{
  Elem, Error, Result,
  backend::{self, Entry},
  cache::Scratch,
  clock::Clock,
  conf::{BASE_SIZE, DELTA, MAX_SIZE, RETRY_BUDGET, RETRY_MAX, SIZE_STEP_EXP, TIME_MAX_NS},
  driver::{self, Driver},
  op::{Op, Order},
  order::{KeyMode, Orders},
  rnd::Lcg,
  sink::{Grid, Sink, Table},
};

/// Run configuration
/// 运行配置
#[derive(Debug, Clone)]
pub struct Conf {
  /// Pinned dataset size
  /// 固定的数据集大小
  pub size: Option<u32>,
  pub max_size: u32,
  /// Pinned backend name
  /// 固定的后端名称
  pub backend: Option<String>,
  /// Force result files and verbose lines
  /// 强制输出结果文件与详细日志
  pub log: bool,
  pub mode: KeyMode,
  pub out_dir: PathBuf,
}

impl Default for Conf {
  fn default() -> Self {
    Self {
      size: None,
      max_size: MAX_SIZE,
      backend: None,
      log: false,
      mode: KeyMode::default(),
      out_dir: PathBuf::from("."),
    }
  }
}

impl Conf {
  /// Neither size nor backend pinned
  /// 大小与后端均未固定
  #[must_use]
  pub fn is_sweep(&self) -> bool {
    self.size.is_none() && self.backend.is_none()
  }

  /// Result files are written
  /// 是否写入结果文件
  #[must_use]
  pub fn emits(&self) -> bool {
    self.log || self.is_sweep()
  }
}

/// Dataset sizes: `single`, or `base` grown by 10^SIZE_STEP_EXP while `<= max`
/// 数据集大小：`single`，或从 `base` 按 10^SIZE_STEP_EXP 增长直到超过 `max`
#[must_use]
pub fn sizes(base: u32, max: u32, single: Option<u32>) -> Vec<u32> {
  if let Some(n) = single {
    return vec![n];
  }
  let step = 10f64.powf(SIZE_STEP_EXP);
  let mut out = Vec::new();
  let mut f = f64::from(base);
  while f <= f64::from(max) {
    out.push(f as u32);
    f *= step;
  }
  out
}

/// Retries for size `n`
/// 大小 `n` 的重试次数
#[must_use]
pub fn retry_count(n: u32, single: bool) -> usize {
  if single {
    return 1;
  }
  (RETRY_BUDGET / n.max(1)).clamp(1, RETRY_MAX as u32) as usize
}

/// What one run measured
/// 一次运行的测量结果
#[derive(Debug, Clone, Default)]
pub struct Report {
  /// One table per (order, op), rows in size order
  /// 每个（顺序、操作）一张表，行按大小排列
  pub tables: Vec<Table>,
  /// (size, retries) per dataset size
  /// 每个数据集大小的（大小、重试次数）
  pub sizes: Vec<(u32, usize)>,
  /// Backend instances built and torn down
  /// 创建并销毁的后端实例数
  pub instances: usize,
  /// (backend, order) runs skipped as too slow
  /// 因过慢而跳过的（后端、顺序）次数
  pub skipped: usize,
}

impl Report {
  #[must_use]
  pub fn table(&self, order: Order, op: Op) -> Option<&Table> {
    self.tables.iter().find(|t| t.order == order && t.op == op)
  }
}

/// Run context: everything one benchmark run owns
/// 运行上下文：一次基准运行持有的全部状态
pub struct Scan<'a> {
  conf: Conf,
  entries: &'a [Entry],
  selected: Option<usize>,
  clock: Clock,
  scratch: Scratch,
  rng: Lcg,
  /// Worst non-size ns per (backend, order) seen so far
  /// 目前为止每个（后端、顺序）最差的非 size 纳秒值
  worst: Vec<[u32; Order::COUNT]>,
}

impl<'a> Scan<'a> {
  /// Validates the pinned backend and size
  /// 校验固定的后端与大小
  pub fn new(conf: Conf, entries: &'a [Entry]) -> Result<Self> {
    let selected = match &conf.backend {
      Some(name) => Some(backend::position(entries, name)?),
      None => None,
    };
    if let Some(0) = conf.size {
      return Err(Error::InvalidSize(0));
    }
    Ok(Self {
      conf,
      entries,
      selected,
      clock: Clock::new(),
      scratch: Scratch::default(),
      rng: Lcg::default(),
      worst: vec![[0; Order::COUNT]; entries.len()],
    })
  }

  /// Replace the cache-clearing buffer
  /// 替换清缓存缓冲区
  #[must_use]
  pub fn scratch(mut self, scratch: Scratch) -> Self {
    self.scratch = scratch;
    self
  }

  pub fn run(mut self) -> Result<Report> {
    let names: Vec<&str> = self.entries.iter().map(|e| e.name).collect();
    let dir = self.conf.emits().then(|| self.conf.out_dir.clone());
    let mut sink = Sink::new(&names, dir)?;
    let mut report = Report::default();

    let single = self.conf.size.is_some();
    let skip = self.conf.is_sweep();
    let level = if self.conf.emits() {
      Level::Debug
    } else {
      Level::Info
    };

    for n in sizes(BASE_SIZE, self.conf.max_size, self.conf.size) {
      if !self.conf.mode.delta_is_safe(n, DELTA) {
        return Err(Error::DeltaCollision { size: n, delta: DELTA });
      }
      let retry = retry_count(n, single);
      let orders = Orders::new(n, self.conf.mode, &mut self.rng);
      let mut elems = vec![Elem::default(); orders.len()];
      let mut grid = Grid::new(self.entries.len());

      for _ in 0..retry {
        for (b, entry) in self.entries.iter().enumerate() {
          if self.selected.is_some_and(|s| s != b) {
            continue;
          }
          for order in Order::ALL {
            if skip && self.worst[b][order.idx()] > TIME_MAX_NS {
              debug!("{n} {} {order} skipped", entry.name);
              report.skipped += 1;
              continue;
            }
            if self.conf.emits() {
              info!("{n} {} {order}", entry.name);
            }

            let (insert, search) = orders.keys(order);
            let mut instance = (entry.new)(orders.len());
            let cells = Driver::new(&self.clock, entry.name, instance.as_mut(), &mut elems)
              .level(level)
              .run(&mut self.scratch, order, insert, search)?;
            driver::teardown(entry.name, instance)?;

            grid.record_all(b, order, &cells);
            report.instances += 1;
          }
        }
      }

      for (b, worst) in self.worst.iter_mut().enumerate() {
        for order in Order::ALL {
          for op in Op::ALL {
            if op == Op::Size {
              continue;
            }
            if let Some(v) = grid.get(b, order, op)
              && v > 0
            {
              let w = &mut worst[order.idx()];
              *w = (*w).max(v);
            }
          }
        }
      }

      sink.push(n, &grid)?;
      report.sizes.push((n, retry));
    }

    report.tables = sink.into_tables();
    Ok(report)
  }
}
