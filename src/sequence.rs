use tracing::{debug, info};

use crate::error::Result;
use crate::membership::{MembershipSet, OutOfBounds};

/// 1ステップの増減方向。a(n) - a(n-1) の符号（0 にはならない）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// 方向マーカー文字（上昇 'x' / 下降 '_'）
    #[inline]
    pub fn marker(self) -> char {
        match self {
            Direction::Up => 'x',
            Direction::Down => '_',
        }
    }
}

/// 生成された1項
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// 添字 n（a(0) は 0）
    pub n: u64,
    /// a(n)
    pub term: u64,
    /// a(n-1)。初項では None
    pub(crate) previous: Option<u64>,
    /// 初項では None
    pub direction: Option<Direction>,
}

/// レカマン数列の生成器。
///
/// a(0) = 0、a(n) = a(n-1) - n（非負かつ未出現の場合）、それ以外は a(n-1) + n。
/// 各項を出現集合に記録し、容量を超える項が現れた時点で反復を終える。
#[derive(Debug, Clone)]
pub struct Recaman {
    set: MembershipSet,
    /// 次に計算するステップ番号
    n: u64,
    current: u64,
    started: bool,
    stopped_at: Option<OutOfBounds>,
    overflowed: bool,
}

impl Recaman {
    /// bound（8の倍数に切り上げ）までの値を追跡する生成器を作る。
    pub fn new(bound: u64) -> Result<Self> {
        let set = MembershipSet::new(bound)?;
        debug!(capacity = set.capacity(), "recaman generator created");
        Ok(Recaman {
            set,
            n: 1,
            current: 0,
            started: false,
            stopped_at: None,
            overflowed: false,
        })
    }

    /// 出現集合への参照
    pub fn membership(&self) -> &MembershipSet {
        &self.set
    }

    /// 容量超過で停止した場合、その原因となった値
    pub fn stopped_at(&self) -> Option<OutOfBounds> {
        self.stopped_at
    }

    /// 反復が終了したか
    pub fn is_exhausted(&self) -> bool {
        self.stopped_at.is_some() || self.overflowed
    }

    /// 漸化式による次項の候補
    #[inline]
    fn next_candidate(&self) -> Option<u64> {
        match self.current.checked_sub(self.n) {
            Some(c) if !self.set.contains(c) => Some(c),
            _ => self.current.checked_add(self.n),
        }
    }

    fn stop(&mut self, oob: OutOfBounds) {
        info!(
            n = self.n,
            value = oob.value,
            capacity = oob.capacity,
            "capacity exhausted, stopping generation"
        );
        self.stopped_at = Some(oob);
    }
}

impl Iterator for Recaman {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        if self.is_exhausted() {
            return None;
        }

        if !self.started {
            self.started = true;
            if let Err(oob) = self.set.mark(0) {
                self.stop(oob);
                return None;
            }
            return Some(Step { n: 0, term: 0, previous: None, direction: None });
        }

        let Some(term) = self.next_candidate() else {
            self.overflowed = true;
            return None;
        };
        if let Err(oob) = self.set.mark(term) {
            self.stop(oob);
            return None;
        }

        let previous = self.current;
        let step = Step {
            n: self.n,
            term,
            previous: Some(previous),
            direction: Some(if term > previous { Direction::Up } else { Direction::Down }),
        };
        self.current = term;
        self.n += 1;
        Some(step)
    }
}

/// 数列追跡の結果
#[derive(Debug, Clone)]
pub struct SequenceResult {
    /// 容量内で生成された項 a(0), a(1), ...
    pub terms: Vec<u64>,
    /// 漸化式を適用した回数（= terms.len() - 1、初項のみなら 0）
    pub total_steps: u64,
    /// 最大項
    pub max_value: u64,
    /// 上昇ステップ数
    pub up_moves: u64,
    /// 下降ステップ数
    pub down_moves: u64,
    /// 停止原因（容量超過時）
    pub stopped_at: Option<OutOfBounds>,
}

/// 容量を使い切るまで数列を生成し、全項を記録する。
pub fn trace_sequence(bound: u64) -> Result<SequenceResult> {
    trace_sequence_with_callback(bound, |_| {})
}

/// コールバック付き数列追跡。callback(step) を各項で呼ぶ。
pub fn trace_sequence_with_callback(
    bound: u64,
    mut callback: impl FnMut(&Step),
) -> Result<SequenceResult> {
    let mut seq = Recaman::new(bound)?;
    let mut terms = Vec::new();
    let mut max_value = 0u64;
    let mut up_moves = 0u64;
    let mut down_moves = 0u64;

    for step in seq.by_ref() {
        match step.direction {
            Some(Direction::Up) => up_moves += 1,
            Some(Direction::Down) => down_moves += 1,
            None => {}
        }
        max_value = max_value.max(step.term);
        callback(&step);
        terms.push(step.term);
    }

    Ok(SequenceResult {
        total_steps: up_moves + down_moves,
        terms,
        max_value,
        up_moves,
        down_moves,
        stopped_at: seq.stopped_at(),
    })
}
