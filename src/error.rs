use thiserror::Error;

/// ライブラリ全体のエラー型。
///
/// 容量超過（[`crate::membership::OutOfBounds`]）は正常終了の合図なので、
/// ここには含めない。
#[derive(Debug, Error)]
pub enum RecamanError {
    #[error("cannot allocate membership bitset of {bytes} bytes")]
    Allocation { bytes: u64 },

    #[error("invalid digit '{digit}' at position {position} in mode string (expected 0 or 1)")]
    InvalidModeDigit { digit: char, position: usize },

    #[error("mode string has {digits} significant digits (at most 64 supported)")]
    ModeTooWide { digits: usize },

    #[error("output error")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RecamanError>;
