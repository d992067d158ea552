//! 出力モード。
//!
//! CLI の MODE 引数（2進数字列、MSB 先頭）をビットフィールドとして解釈し、
//! 名前付きの設定に変換する。
//!
//! | bit | 意味 |
//! |-----|------|
//! | 0 | 各項の値を出力 |
//! | 1 | 増減特徴の出力を有効化（bit 2〜5 はこの下位設定） |
//! | 2 | 各ステップの方向マーカーをそのまま出力（振動処理なし） |
//! | 3 | 振動処理中に方向マーカーを出力 |
//! | 4 | 振動を検出して回数にまとめる |
//! | 5 | まとめた回数の代わりに空白1文字を出力 |

use std::str::FromStr;

use crate::error::RecamanError;

const BIT_TERMS: u64 = 1 << 0;
const BIT_CHANGES: u64 = 1 << 1;
const BIT_RAW_DIRECTION: u64 = 1 << 2;
const BIT_MARKERS: u64 = 1 << 3;
const BIT_COLLATE: u64 = 1 << 4;
const BIT_COLLATE_SPACE: u64 = 1 << 5;

/// 振動回数の出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collation {
    /// 回数を10進数で出力
    Count,
    /// 回数の代わりに空白1文字
    Space,
}

/// 増減特徴の出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOutput {
    /// 1ステップごとに 'x' / '_'
    Raw,
    /// 振動検出の状態機械を通す
    Oscillation {
        markers: bool,
        collation: Option<Collation>,
    },
}

/// 出力モード設定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Mode {
    pub emit_terms: bool,
    pub changes: Option<ChangeOutput>,
}

impl Mode {
    /// ビットフィールドから設定を作る。未定義ビットは無視する。
    pub fn from_bits(bits: u64) -> Self {
        let changes = if bits & BIT_CHANGES == 0 {
            None
        } else if bits & BIT_RAW_DIRECTION != 0 {
            Some(ChangeOutput::Raw)
        } else {
            let collation = if bits & BIT_COLLATE == 0 {
                None
            } else if bits & BIT_COLLATE_SPACE != 0 {
                Some(Collation::Space)
            } else {
                Some(Collation::Count)
            };
            Some(ChangeOutput::Oscillation {
                markers: bits & BIT_MARKERS != 0,
                collation,
            })
        };
        Mode {
            emit_terms: bits & BIT_TERMS != 0,
            changes,
        }
    }

    /// 正規化されたビットフィールド（効果のないビットは落とす）
    pub fn bits(&self) -> u64 {
        let mut bits = 0;
        if self.emit_terms {
            bits |= BIT_TERMS;
        }
        match self.changes {
            None => {}
            Some(ChangeOutput::Raw) => bits |= BIT_CHANGES | BIT_RAW_DIRECTION,
            Some(ChangeOutput::Oscillation { markers, collation }) => {
                bits |= BIT_CHANGES;
                if markers {
                    bits |= BIT_MARKERS;
                }
                match collation {
                    None => {}
                    Some(Collation::Count) => bits |= BIT_COLLATE,
                    Some(Collation::Space) => bits |= BIT_COLLATE | BIT_COLLATE_SPACE,
                }
            }
        }
        bits
    }
}

impl FromStr for Mode {
    type Err = RecamanError;

    /// 2進数字列を解析する。空文字列は 0。
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bits = 0u64;
        let mut significant = 0usize;
        for (position, digit) in s.chars().enumerate() {
            let bit = match digit {
                '0' => 0,
                '1' => 1,
                _ => return Err(RecamanError::InvalidModeDigit { digit, position }),
            };
            if significant > 0 || bit == 1 {
                significant += 1;
            }
            if significant > 64 {
                return Err(RecamanError::ModeTooWide { digits: significant });
            }
            bits = (bits << 1) | bit;
        }
        Ok(Mode::from_bits(bits))
    }
}
