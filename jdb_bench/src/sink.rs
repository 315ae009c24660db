//! Result sink: min-over-retries grid and append-only result tables
//! 结果汇：重试取最小值的网格与只追加的结果表

use std::{
  fmt::Write as _,
  fs::{File, OpenOptions},
  io::Write,
  path::{Path, PathBuf},
};

use crate::{
  Result,
  driver::Cells,
  op::{Op, Order},
};

/// Minimum over retries per (backend, order, op); None = never measured
/// 每个（后端、顺序、操作）的重试最小值；None 表示未测量
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
  backends: usize,
  cells: Vec<Option<u32>>,
}

impl Grid {
  #[must_use]
  pub fn new(backends: usize) -> Self {
    Self {
      backends,
      cells: vec![None; backends * Order::COUNT * Op::COUNT],
    }
  }

  #[inline]
  fn idx(b: usize, order: Order, op: Op) -> usize {
    (b * Order::COUNT + order.idx()) * Op::COUNT + op.idx()
  }

  #[must_use]
  pub fn backends(&self) -> usize {
    self.backends
  }

  pub fn record(&mut self, b: usize, order: Order, op: Op, v: u32) {
    let cell = &mut self.cells[Self::idx(b, order, op)];
    *cell = Some(cell.map_or(v, |old| old.min(v)));
  }

  pub fn record_all(&mut self, b: usize, order: Order, cells: &Cells) {
    for op in Op::ALL {
      self.record(b, order, op, cells[op.idx()]);
    }
  }

  #[must_use]
  pub fn get(&self, b: usize, order: Order, op: Op) -> Option<u32> {
    self.cells[Self::idx(b, order, op)]
  }
}

/// One size of one table
/// 某张表中的一个大小
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
  pub size: u32,
  pub values: Vec<Option<u32>>,
}

impl Row {
  /// `<size>\t<v>\t...\n`, empty cells as 0
  #[must_use]
  pub fn render(&self) -> String {
    let mut s = format!("{}\t", self.size);
    for v in &self.values {
      let _ = write!(s, "{}\t", v.unwrap_or(0));
    }
    s.push('\n');
    s
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
  pub order: Order,
  pub op: Op,
  pub rows: Vec<Row>,
}

impl Table {
  #[must_use]
  pub fn file_name(&self) -> String {
    file_name(self.order, self.op)
  }
}

#[must_use]
pub fn file_name(order: Order, op: Op) -> String {
  format!("dat_{order}_{op}.lst")
}

/// `0\t<name>\t...\n`
#[must_use]
pub fn header(names: &[&str]) -> String {
  let mut s = String::from("0\t");
  for name in names {
    s.push_str(name);
    s.push('\t');
  }
  s.push('\n');
  s
}

/// Tables for every (order, op); optionally mirrored to `dat_*.lst` files
/// 每个（顺序、操作）的结果表；可选地同步写入 `dat_*.lst` 文件
#[derive(Debug)]
pub struct Sink {
  tables: Vec<Table>,
  dir: Option<PathBuf>,
}

impl Sink {
  /// With `dir`, every file is truncated and gets its header
  /// 指定 `dir` 时，每个文件被截断并写入表头
  pub fn new(names: &[&str], dir: Option<PathBuf>) -> Result<Self> {
    let mut tables = Vec::with_capacity(Order::COUNT * Op::COUNT);
    for order in Order::ALL {
      for op in Op::ALL {
        tables.push(Table {
          order,
          op,
          rows: Vec::new(),
        });
      }
    }

    if let Some(dir) = &dir {
      std::fs::create_dir_all(dir)?;
      let head = header(names);
      for t in &tables {
        File::create(dir.join(t.file_name()))?.write_all(head.as_bytes())?;
      }
    }

    Ok(Self { tables, dir })
  }

  /// Append one row per table; files are flushed before returning
  /// 为每张表追加一行；返回前文件已刷新
  pub fn push(&mut self, size: u32, grid: &Grid) -> Result<()> {
    for t in &mut self.tables {
      let row = Row {
        size,
        values: (0..grid.backends())
          .map(|b| grid.get(b, t.order, t.op))
          .collect(),
      };
      if let Some(dir) = &self.dir {
        append(&dir.join(t.file_name()), &row.render())?;
      }
      t.rows.push(row);
    }
    Ok(())
  }

  #[must_use]
  pub fn into_tables(self) -> Vec<Table> {
    self.tables
  }
}

fn append(path: &Path, line: &str) -> Result<()> {
  let mut f = OpenOptions::new().append(true).open(path)?;
  f.write_all(line.as_bytes())?;
  f.flush()?;
  Ok(())
}
