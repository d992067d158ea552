use std::io::Write;

use tracing::{debug, info};

use crate::error::Result;
use crate::features::FeatureWriter;
use crate::membership::OutOfBounds;
use crate::mode::Mode;
use crate::sequence::Recaman;

/// 1回の実行の集計
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// 8の倍数に切り上げた実容量
    pub capacity: u64,
    /// 漸化式を適用した回数
    pub total_steps: u64,
    /// 容量内で最後に生成された項
    pub last_term: Option<u64>,
    /// 最大項
    pub max_value: u64,
    /// 容量超過で停止した場合、その値
    pub stopped_at: Option<OutOfBounds>,
    /// 終了時点で未出力のまま残った振動回数
    pub pending_oscillations: u64,
}

/// bound まで数列を生成し、mode に従って sink へ書き出す。
///
/// 容量を使い切った時点で改行を書いて正常に戻る。
pub fn run<W: Write>(mode: Mode, bound: u64, sink: W) -> Result<RunSummary> {
    let mut seq = Recaman::new(bound)?;
    let capacity = seq.membership().capacity();
    debug!(bound, capacity, mode = mode.bits(), "starting run");

    let mut writer = FeatureWriter::new(sink, mode);
    let mut total_steps = 0u64;
    let mut last_term = None;
    let mut max_value = 0u64;

    for step in seq.by_ref() {
        writer.write_step(&step)?;
        total_steps = step.n;
        last_term = Some(step.term);
        max_value = max_value.max(step.term);
    }
    let pending_oscillations = writer.pending_count();
    writer.finish()?;

    let summary = RunSummary {
        capacity,
        total_steps,
        last_term,
        max_value,
        stopped_at: seq.stopped_at(),
        pending_oscillations,
    };
    info!(
        total_steps,
        max_value,
        distinct = seq.membership().count(),
        pending_oscillations,
        "run finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(bits: u64, bound: u64) -> (String, RunSummary) {
        let mut out = Vec::new();
        let summary = run(Mode::from_bits(bits), bound, &mut out).unwrap();
        (String::from_utf8(out).unwrap(), summary)
    }

    #[test]
    fn test_run_terms() {
        let (out, summary) = render(0b1, 20);
        assert_eq!(out, "0, 1, 3, 6, 2, 7, 13, 20, 12, 21, 11, 22, 10, 23, 9\n");
        assert_eq!(summary.capacity, 24);
        assert_eq!(summary.total_steps, 14);
        assert_eq!(summary.last_term, Some(9));
        assert_eq!(summary.max_value, 23);
        assert_eq!(summary.stopped_at, Some(OutOfBounds { value: 24, capacity: 24 }));
    }

    #[test]
    fn test_run_zero_bound() {
        let (out, summary) = render(0b1, 0);
        assert_eq!(out, "\n");
        assert_eq!(summary.last_term, None);
        assert_eq!(summary.total_steps, 0);
    }

    #[test]
    fn test_run_mode_zero_prints_newline_only() {
        let (out, _) = render(0, 100);
        assert_eq!(out, "\n");
    }

    #[test]
    fn test_run_raw_directions() {
        let (out, summary) = render(0b110, 20);
        assert_eq!(out, "xxx_xxx_x_x_x_\n");
        assert_eq!(out.trim_end().len() as u64, summary.total_steps);
    }

    #[test]
    fn test_run_oscillation_count() {
        // x x x _ x x x _ x _ x _ x _  → 最後の 4 組は未 flush
        let (out, summary) = render(0b10010, 20);
        assert_eq!(out, "1 \n");
        assert_eq!(summary.pending_oscillations, 4);
    }
}
