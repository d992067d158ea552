use num_integer::Integer;
use tracing::debug;

use crate::error::{RecamanError, Result};

/// 出現済み整数の集合。
/// 内部表現は LSB順のパックドビット列（Vec<u8>、各バイト8値分）。
/// 値 x のビットは bits[x/8] の (x%8) ビット目。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipSet {
    bits: Vec<u8>,
    /// 追跡可能な値の上限（排他的）。常に8の倍数
    capacity: u64,
    /// 立っているビット数
    count: u64,
}

/// 容量を超える値を記録しようとしたことを示す。
/// エラーではなく、生成の正常な停止条件。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfBounds {
    pub value: u64,
    pub capacity: u64,
}

/// bound をバイト境界（8の倍数）に切り上げた容量を返す。
/// u64 に収まらない場合は None。
pub fn rounded_capacity(bound: u64) -> Option<u64> {
    Integer::div_ceil(&bound, &8).checked_mul(8)
}

impl MembershipSet {
    /// [0, bound) を追跡する集合を確保する。bound は8の倍数に切り上げる。
    pub fn new(bound: u64) -> Result<Self> {
        let bytes = Integer::div_ceil(&bound, &8);
        let capacity = rounded_capacity(bound).ok_or(RecamanError::Allocation { bytes })?;
        let len = usize::try_from(bytes).map_err(|_| RecamanError::Allocation { bytes })?;

        let mut bits = Vec::new();
        bits.try_reserve_exact(len)
            .map_err(|_| RecamanError::Allocation { bytes })?;
        bits.resize(len, 0u8);

        debug!(bound, capacity, bytes, "allocated membership bitset");
        Ok(MembershipSet { bits, capacity, count: 0 })
    }

    /// 追跡可能な値の上限（排他的）
    #[inline]
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// 記録済みの値の数
    #[inline]
    pub fn count(&self) -> u64 {
        self.count
    }

    /// x が記録済みか。容量外は「未出現」扱いで false。
    #[inline]
    pub fn contains(&self, x: u64) -> bool {
        if x >= self.capacity {
            return false;
        }
        let byte_idx = (x >> 3) as usize;
        let bit_idx = x & 0b111;
        (self.bits[byte_idx] >> bit_idx) & 1 != 0
    }

    /// x を記録する。冪等。容量外なら OutOfBounds を返し、集合は変更しない。
    #[inline]
    pub fn mark(&mut self, x: u64) -> std::result::Result<(), OutOfBounds> {
        if x >= self.capacity {
            return Err(OutOfBounds { value: x, capacity: self.capacity });
        }
        let byte_idx = (x >> 3) as usize;
        let mask = 1u8 << (x & 0b111);
        if self.bits[byte_idx] & mask == 0 {
            self.bits[byte_idx] |= mask;
            self.count += 1;
        }
        Ok(())
    }
}
