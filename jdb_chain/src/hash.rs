//! Integer hash for u32 keys
//! u32 键的整数哈希

/// Robert Jenkins 4-byte integer hash (full avalanche on 32 bits)
/// Robert Jenkins 4 字节整数哈希（32 位全雪崩）
#[inline(always)]
#[must_use]
pub const fn inthash_u32(key: u32) -> u32 {
  let mut key = key;
  key = key.wrapping_sub(key << 6);
  key ^= key >> 17;
  key = key.wrapping_sub(key << 9);
  key ^= key << 4;
  key = key.wrapping_sub(key << 3);
  key ^= key << 10;
  key ^= key >> 15;
  key
}
