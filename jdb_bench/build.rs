use std::{env, fs, path::Path, str::FromStr};

/// Get an environment variable or a default value and register it for cargo rerun.
/// 获取环境变量或默认值，并将其注册为 cargo rerun 触发项。
fn get_env_or_default<T: FromStr>(name: &str, default: T) -> T {
  println!("cargo:rerun-if-env-changed={}", name);
  env::var(name)
    .ok()
    .and_then(|v| v.parse().ok())
    .unwrap_or(default)
}

fn main() {
  println!("cargo:rerun-if-changed=build.rs");

  let out_dir = env::var_os("OUT_DIR").expect("OUT_DIR not set");
  let dest_path = Path::new(&out_dir).join("conf_gen.rs");

  // Debug builds stop the sweep early
  // Debug 构建提前结束扫描
  let default_max = if env::var("PROFILE").is_ok_and(|p| p == "release") {
    10_000_000u32
  } else {
    100_000u32
  };
  let max_size = get_env_or_default("BENCH_MAX_SIZE", default_max);
  let retry_max = get_env_or_default("BENCH_RETRY_MAX", 3usize);
  let time_max_ns = get_env_or_default("BENCH_TIME_MAX_NS", 1500u32);
  let cache_size = get_env_or_default("BENCH_CACHE_SIZE", 8usize * 1024 * 1024);

  let content = format!(
    r#"
pub const MAX_SIZE: u32 = {max_size};
pub const RETRY_MAX: usize = {retry_max};
pub const TIME_MAX_NS: u32 = {time_max_ns};
pub const CACHE_SIZE: usize = {cache_size};
"#
  );

  fs::write(&dest_path, content).expect("Failed to write conf_gen.rs");
}
