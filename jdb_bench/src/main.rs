use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use jdb_bench::{
  Conf, KeyMode, Result, Scan,
  backend::ENTRIES,
  calib::{self, MISS_DELTA, MISS_PASSES, MISS_SIZE},
  clock::Clock,
  conf::MAX_SIZE,
};
use log::{error, info};

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
  /// Write result files and verbose lines even for a pinned run
  #[arg(short = 'l')]
  log: bool,

  /// Sparse keys instead of dense
  #[arg(short = 's')]
  sparse: bool,

  /// Print the estimated ns per cache-line miss and exit
  #[arg(short = 'm')]
  miss: bool,

  /// Pin the dataset size to the configured maximum
  #[arg(short = 'n')]
  max: bool,

  /// Pin the dataset size
  #[arg(short = 'N', value_name = "SIZE")]
  size: Option<u32>,

  /// Run one backend only
  #[arg(short = 'd', value_name = "NAME")]
  backend: Option<String>,

  /// Directory of the dat_*.lst files
  #[arg(short = 'o', value_name = "DIR", default_value = ".")]
  out: PathBuf,
}

impl Args {
  fn conf(self) -> Conf {
    Conf {
      size: self.size.or(self.max.then_some(MAX_SIZE)),
      max_size: MAX_SIZE,
      backend: self.backend,
      log: self.log,
      mode: if self.sparse {
        KeyMode::Sparse
      } else {
        KeyMode::Dense
      },
      out_dir: self.out,
    }
  }
}

fn run(args: Args) -> Result<()> {
  if args.miss {
    let ns = calib::cache_miss(&Clock::new(), MISS_SIZE, MISS_DELTA, MISS_PASSES);
    println!("{ns}");
    return Ok(());
  }

  let conf = args.conf();
  info!("max size {}, mode {:?}", conf.max_size, conf.mode);
  let report = Scan::new(conf, ENTRIES)?.run()?;
  info!(
    "{} sizes, {} instances, {} skipped",
    report.sizes.len(),
    report.instances,
    report.skipped
  );
  println!("OK");
  Ok(())
}

fn main() -> ExitCode {
  log_init::init();
  match run(Args::parse()) {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      if e.is_usage() {
        error!("usage: {e}");
      } else {
        error!("{e}");
      }
      ExitCode::FAILURE
    }
  }
}

#[cfg(test)]
mod tests {
  use aok::{OK, Void};
  use clap::error::ErrorKind;
  use jdb_bench::Error;

  use super::*;

  fn parse(argv: &[&str]) -> std::result::Result<Args, clap::Error> {
    Args::try_parse_from(std::iter::once("jdb_bench").chain(argv.iter().copied()))
  }

  #[test]
  fn bad_flags_rejected() -> Void {
    let err = parse(&["-x"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    assert!(parse(&["-N"]).is_err());
    assert!(parse(&["-N", "many"]).is_err());
    assert!(parse(&["-d"]).is_err());
    OK
  }

  #[test]
  fn defaults_sweep() -> Void {
    let conf = parse(&[])?.conf();
    assert!(conf.is_sweep());
    assert!(conf.emits());
    assert_eq!(conf.size, None);
    assert_eq!(conf.max_size, MAX_SIZE);
    assert_eq!(conf.mode, KeyMode::Dense);
    assert_eq!(conf.out_dir, PathBuf::from("."));
    OK
  }

  #[test]
  fn pin_to_max() -> Void {
    let conf = parse(&["-n"])?.conf();
    assert_eq!(conf.size, Some(MAX_SIZE));
    assert!(!conf.is_sweep());
    assert!(!conf.emits());

    let conf = parse(&["-n", "-N", "700"])?.conf();
    assert_eq!(conf.size, Some(700));
    OK
  }

  #[test]
  fn sparse_and_log() -> Void {
    let conf = parse(&["-s", "-l", "-o", "out"])?.conf();
    assert_eq!(conf.mode, KeyMode::Sparse);
    assert!(conf.log);
    assert_eq!(conf.out_dir, PathBuf::from("out"));
    OK
  }

  #[test]
  fn pinned_size_and_backend() -> Void {
    let conf = parse(&["-N", "500", "-d", "jdb-chain"])?.conf();
    assert_eq!(conf.size, Some(500));
    assert_eq!(conf.backend.as_deref(), Some("jdb-chain"));
    assert!(!conf.emits());
    OK
  }

  #[test]
  fn miss_flag() -> Void {
    assert!(parse(&["-m"])?.miss);
    assert!(!parse(&[])?.miss);
    OK
  }

  #[test]
  fn usage_errors_stop_before_measuring() -> Void {
    let err = run(parse(&["-d", "nope"])?).unwrap_err();
    assert!(matches!(&err, Error::UnknownBackend(name) if name == "nope"));
    assert!(err.is_usage());

    let err = run(parse(&["-N", "0"])?).unwrap_err();
    assert!(matches!(err, Error::InvalidSize(0)));
    OK
  }
}
