//! Constants for Chain
//! Chain 常量

/// Empty link marker
/// 空链接标记
pub const NIL: u32 = u32::MAX;

/// Minimum bucket count (power of two)
/// 最小桶数（2 的幂）
pub const MIN_BUCKETS: usize = 16;

/// Auto-resizing table shrinks when `len <= buckets / SHRINK_DIV`
/// 自动扩缩表在 `len <= buckets / SHRINK_DIV` 时收缩
pub const SHRINK_DIV: usize = 8;
