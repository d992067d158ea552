//! 各ステップの出力（項の値、方向マーカー、振動回数）。
//!
//! 振動検出は2状態の状態機械:
//!
//! | 状態 | 入力 | 動作 | 次状態 |
//! |------|------|------|--------|
//! | Idle | 上昇 | 出力なし | PendingUp |
//! | Idle | 下降 | flush、'_' | Idle |
//! | PendingUp | 上昇 | flush、'x' | PendingUp |
//! | PendingUp | 下降 | counter += 1 | Idle |
//!
//! マーカーは bit 3、flush の出力は bit 4 が立っている場合のみ。

use std::io::Write;

use tracing::trace;

use crate::error::Result;
use crate::mode::{ChangeOutput, Collation, Mode};
use crate::sequence::{Direction, Step};

/// 振動検出の状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OscillationState {
    #[default]
    Idle,
    /// 直前が上昇で、その解決待ち
    PendingUp,
}

/// モードに従って各ステップを sink に書き出す。
#[derive(Debug)]
pub struct FeatureWriter<W: Write> {
    out: W,
    mode: Mode,
    state: OscillationState,
    counter: u64,
    terms_written: u64,
}

impl<W: Write> FeatureWriter<W> {
    pub fn new(out: W, mode: Mode) -> Self {
        FeatureWriter {
            out,
            mode,
            state: OscillationState::Idle,
            counter: 0,
            terms_written: 0,
        }
    }

    pub(crate) fn state(&self) -> OscillationState {
        self.state
    }

    /// 未 flush の振動回数
    pub fn pending_count(&self) -> u64 {
        self.counter
    }

    /// 1項分を出力する。項は記録済みであること。
    pub fn write_step(&mut self, step: &Step) -> Result<()> {
        if self.mode.emit_terms {
            if self.terms_written > 0 {
                self.out.write_all(b", ")?;
            }
            write!(self.out, "{}", step.term)?;
            self.terms_written += 1;
        }

        let (Some(changes), Some(direction)) = (self.mode.changes, step.direction) else {
            return Ok(());
        };

        match changes {
            ChangeOutput::Raw => self.write_marker(direction)?,
            ChangeOutput::Oscillation { markers, collation } => {
                self.oscillate(direction, markers, collation)?
            }
        }
        trace!(n = step.n, term = step.term, state = ?self.state, counter = self.counter, "step written");
        Ok(())
    }

    fn oscillate(
        &mut self,
        direction: Direction,
        markers: bool,
        collation: Option<Collation>,
    ) -> Result<()> {
        match (self.state, direction) {
            (OscillationState::Idle, Direction::Up) => {
                self.state = OscillationState::PendingUp;
            }
            (OscillationState::Idle, Direction::Down) => {
                self.flush_oscillation(markers, collation)?;
                if markers {
                    self.write_marker(Direction::Down)?;
                }
            }
            (OscillationState::PendingUp, Direction::Up) => {
                self.flush_oscillation(markers, collation)?;
                if markers {
                    self.write_marker(Direction::Up)?;
                }
            }
            (OscillationState::PendingUp, Direction::Down) => {
                self.counter += 1;
                self.state = OscillationState::Idle;
            }
        }
        Ok(())
    }

    /// 溜まった振動回数を出力してリセットする。
    fn flush_oscillation(&mut self, markers: bool, collation: Option<Collation>) -> Result<()> {
        let count = std::mem::take(&mut self.counter);
        match collation {
            Some(_) if count == 0 => {}
            None => {}
            Some(Collation::Space) => self.out.write_all(b" ")?,
            Some(Collation::Count) if markers => write!(self.out, "{}", count)?,
            Some(Collation::Count) => write!(self.out, "{} ", count)?,
        }
        Ok(())
    }

    #[inline]
    fn write_marker(&mut self, direction: Direction) -> Result<()> {
        write!(self.out, "{}", direction.marker())?;
        Ok(())
    }

    /// 終端の改行を書いて sink を flush し、sink を返す。
    /// 未 flush の振動回数は出力しない。
    pub fn finish(mut self) -> Result<W> {
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        Ok(self.out)
    }
}
