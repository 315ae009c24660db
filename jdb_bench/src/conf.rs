//! Benchmark constants
//! 基准测试常量
//!
//! `MAX_SIZE`, `RETRY_MAX`, `TIME_MAX_NS` and `CACHE_SIZE` come from build.rs
//! (env `BENCH_MAX_SIZE`, `BENCH_RETRY_MAX`, `BENCH_TIME_MAX_NS`, `BENCH_CACHE_SIZE`).
//! `MAX_SIZE` 等来自 build.rs（可用环境变量覆盖）。

include!(concat!(env!("OUT_DIR"), "/conf_gen.rs"));

/// First dataset size of a sweep
/// 扫描的起始数据集大小
pub const BASE_SIZE: u32 = 1000;

/// Sizes grow by 10^SIZE_STEP_EXP per step
/// 数据集大小每步增长 10^SIZE_STEP_EXP 倍
pub const SIZE_STEP_EXP: f64 = 0.1;

/// Retries per size = RETRY_BUDGET / size, clamped to [1, RETRY_MAX]
/// 每个大小的重试次数 = RETRY_BUDGET / size，限制在 [1, RETRY_MAX]
pub const RETRY_BUDGET: u32 = 500_000;

/// Opaque payload bytes per element
/// 每个元素的不透明负载字节数
pub const PAYLOAD: usize = 16;

/// Key shift applied by miss, change and remove
/// miss、change、remove 使用的键偏移
pub const DELTA: u32 = 1;

/// Initial LCG state
/// LCG 初始状态
pub const SEED: u64 = 0;

/// Byte stride of the cache-clearing sweep
/// 清缓存扫描的字节步长
pub const CACHE_STRIDE: usize = 32;
