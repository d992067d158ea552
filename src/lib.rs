//! レカマン数列（OEIS A005132）生成器
//!
//! a(0) = 0、a(n) = a(n-1) - n（非負かつ未出現なら）、それ以外は a(n-1) + n。
//! 出現済みの整数をビット集合で追跡し、容量（上限を8の倍数に切り上げた値）を
//! 超える項が現れた時点で生成を終える。
//!
//! 各項の値、または増減の特徴（方向マーカー、振動回数）をモードに応じて出力する。

pub mod emit;
pub mod error;
pub mod features;
pub mod membership;
pub mod mode;
pub mod sequence;

pub use emit::{run, RunSummary};
pub use error::{RecamanError, Result};
pub use features::{FeatureWriter, OscillationState};
pub use membership::{rounded_capacity, MembershipSet, OutOfBounds};
pub use mode::{ChangeOutput, Collation, Mode};
pub use sequence::{trace_sequence, trace_sequence_with_callback, Direction, Recaman, SequenceResult, Step};
