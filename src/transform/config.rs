// Copyright (c) 2020-2022, The rav1e contributors. All rights reserved
//
// This source code is subject to the terms of the BSD 2 Clause License and
// the Alliance for Open Media Patent License 1.0. If the BSD 2 Clause License
// was not distributed with this source code in the LICENSE file, you can
// obtain it at www.aomedia.org/license/software. If the Alliance for Open
// Media Patent License 1.0 was not distributed with this source code in the
// PATENTS file, you can obtain it at www.aomedia.org/license/patent.

use arrayvec::ArrayVec;
use thiserror::Error;

use super::{
  fwd_txfm1d, TxfmType, COS_BIT_MAX, COS_BIT_MIN, MAX_TXFM_STAGE_NUM,
};

const FWD_COS_BIT: i8 = 13;

// Column pass budgets, admitting any input with |x| < 2^14.
const FWD_STAGE_RANGE_DCT4: [i8; 4] = [15, 16, 17, 17];
const FWD_STAGE_RANGE_DCT8: [i8; 6] = [15, 16, 17, 18, 18, 18];
const FWD_STAGE_RANGE_DCT16: [i8; 8] = [15, 16, 17, 18, 19, 19, 19, 19];

/// Enumeration of possible invalid transform configuration errors.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
#[non_exhaustive]
pub enum InvalidConfig {
  /// The `cos_bit` sequence does not have one entry per stage.
  #[error("invalid cos_bit length {actual} (expected {expected})")]
  InvalidCosBitLen {
    /// The actual value.
    actual: usize,
    /// The number of stages of the transform.
    expected: usize,
  },
  /// The `stage_range` sequence does not have one entry per stage.
  #[error("invalid stage_range length {actual} (expected {expected})")]
  InvalidStageRangeLen {
    /// The actual value.
    actual: usize,
    /// The number of stages of the transform.
    expected: usize,
  },
  /// A rotation stage selects a precision with no cosine table.
  #[error("invalid cos_bit {cos_bit} at stage {stage} (expected >= 10, <= 16)")]
  InvalidCosBit {
    /// The offending stage.
    stage: usize,
    /// The actual value.
    cos_bit: i8,
  },
  /// A stage budget cannot describe a 32-bit signed value.
  #[error("invalid stage_range {range} at stage {stage} (expected >= 1, <= 32)")]
  InvalidStageRange {
    /// The offending stage.
    stage: usize,
    /// The actual value.
    range: i8,
  },
}

/// A forward 1-D transform together with its per-stage precision and bit
/// budgets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Txfm1DCfg {
  txfm_type: TxfmType,
  cos_bit: ArrayVec<i8, MAX_TXFM_STAGE_NUM>,
  stage_range: ArrayVec<i8, MAX_TXFM_STAGE_NUM>,
}

impl Txfm1DCfg {
  /// Validates a configuration.
  ///
  /// `cos_bit` entries of stages that do not rotate are not checked.
  ///
  /// # Errors
  ///
  /// - Returns `InvalidConfig` if a sequence does not have
  ///   `txfm_type.stage_num()` entries, if a rotation stage selects a
  ///   precision outside `COS_BIT_MIN..=COS_BIT_MAX`, or if a stage budget is
  ///   outside `1..=32`.
  pub fn new(
    txfm_type: TxfmType, cos_bit: &[i8], stage_range: &[i8],
  ) -> Result<Self, InvalidConfig> {
    use InvalidConfig::*;

    let stage_num = txfm_type.stage_num();
    if cos_bit.len() != stage_num {
      return Err(InvalidCosBitLen { actual: cos_bit.len(), expected: stage_num });
    }
    if stage_range.len() != stage_num {
      return Err(InvalidStageRangeLen {
        actual: stage_range.len(),
        expected: stage_num,
      });
    }
    for (stage, &bit) in cos_bit.iter().enumerate() {
      if txfm_type.is_rotation_stage(stage)
        && !(COS_BIT_MIN..=COS_BIT_MAX).contains(&bit)
      {
        return Err(InvalidCosBit { stage, cos_bit: bit });
      }
    }
    for (stage, &range) in stage_range.iter().enumerate() {
      if !(1..=32).contains(&range) {
        return Err(InvalidStageRange { stage, range });
      }
    }

    Ok(Txfm1DCfg {
      txfm_type,
      cos_bit: cos_bit.iter().copied().collect(),
      stage_range: stage_range.iter().copied().collect(),
    })
  }

  /// The reference column pass configuration: 13-bit cosines on every stage
  /// and budgets that hold for any input below 2^14 in magnitude.
  pub fn reference(txfm_type: TxfmType) -> Self {
    let stage_range: &[i8] = match txfm_type {
      TxfmType::DCT4 => &FWD_STAGE_RANGE_DCT4,
      TxfmType::DCT8 => &FWD_STAGE_RANGE_DCT8,
      TxfmType::DCT16 => &FWD_STAGE_RANGE_DCT16,
    };

    Txfm1DCfg {
      txfm_type,
      cos_bit: (0..txfm_type.stage_num()).map(|_| FWD_COS_BIT).collect(),
      stage_range: stage_range.iter().copied().collect(),
    }
  }

  #[inline]
  pub const fn txfm_type(&self) -> TxfmType {
    self.txfm_type
  }

  #[inline]
  pub fn cos_bit(&self) -> &[i8] {
    &self.cos_bit
  }

  #[inline]
  pub fn stage_range(&self) -> &[i8] {
    &self.stage_range
  }

  /// Runs the configured forward transform on `input`, writing the
  /// coefficients to `output`.
  pub fn fwd(&self, input: &[i32], output: &mut [i32]) {
    fwd_txfm1d(
      self.txfm_type,
      input,
      output,
      &self.cos_bit,
      &self.stage_range,
    );
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use interpolate_name::interpolate_test;
  use pretty_assertions::assert_eq;

  #[interpolate_test(dct4, TxfmType::DCT4)]
  #[interpolate_test(dct8, TxfmType::DCT8)]
  #[interpolate_test(dct16, TxfmType::DCT16)]
  fn reference_is_valid(txfm_type: TxfmType) {
    let cfg = Txfm1DCfg::reference(txfm_type);
    assert_eq!(cfg.txfm_type(), txfm_type);
    assert_eq!(cfg.cos_bit().len(), txfm_type.stage_num());
    assert_eq!(
      Txfm1DCfg::new(txfm_type, cfg.cos_bit(), cfg.stage_range()),
      Ok(cfg.clone())
    );
  }

  #[test]
  fn rejects_wrong_lengths() {
    assert_eq!(
      Txfm1DCfg::new(TxfmType::DCT8, &[13; 4], &[18; 6]),
      Err(InvalidConfig::InvalidCosBitLen { actual: 4, expected: 6 })
    );
    assert_eq!(
      Txfm1DCfg::new(TxfmType::DCT4, &[13; 4], &[18; 8]),
      Err(InvalidConfig::InvalidStageRangeLen { actual: 8, expected: 4 })
    );
  }

  #[test]
  fn rejects_unknown_precision_on_rotation_stages_only() {
    let cos_bit = [13, 13, 13, 13, 17, 13, 13, 13];
    assert_eq!(
      Txfm1DCfg::new(TxfmType::DCT16, &cos_bit, &[20; 8]),
      Err(InvalidConfig::InvalidCosBit { stage: 4, cos_bit: 17 })
    );
    assert!(Txfm1DCfg::new(TxfmType::DCT4, &[0, 0, 10, 0], &[20; 4]).is_ok());
  }

  #[test]
  fn rejects_impossible_budgets() {
    assert_eq!(
      Txfm1DCfg::new(TxfmType::DCT4, &[13; 4], &[15, 16, 0, 17]),
      Err(InvalidConfig::InvalidStageRange { stage: 2, range: 0 })
    );
    assert_eq!(
      Txfm1DCfg::new(TxfmType::DCT4, &[13; 4], &[15, 33, 17, 17]),
      Err(InvalidConfig::InvalidStageRange { stage: 1, range: 33 })
    );
  }

  #[test]
  fn error_messages() {
    assert_eq!(
      InvalidConfig::InvalidCosBit { stage: 3, cos_bit: 9 }.to_string(),
      "invalid cos_bit 9 at stage 3 (expected >= 10, <= 16)"
    );
  }

  #[test]
  fn fwd_uses_stored_sequences() {
    let cfg = Txfm1DCfg::new(TxfmType::DCT4, &[0, 0, 13, 0], &[20; 4])
      .expect("valid configuration");
    let mut output = [0; 4];
    cfg.fwd(&[1, 2, 3, 4], &mut output);
    assert_eq!(output, [7, -3, 0, 0]);
  }
}
