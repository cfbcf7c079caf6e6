// Copyright (c) 2018-2022, The rav1e contributors. All rights reserved
//
// This source code is subject to the terms of the BSD 2 Clause License and
// the Alliance for Open Media Patent License 1.0. If the BSD 2 Clause License
// was not distributed with this source code in the LICENSE file, you can
// obtain it at www.aomedia.org/license/software. If the Alliance for Open
// Media Patent License 1.0 was not distributed with this source code in the
// PATENTS file, you can obtain it at www.aomedia.org/license/patent.

use thiserror::Error;

use crate::util::ILog;

/// Whether the stage networks verify every stage against its bit budget.
pub const RANGE_CHECK_ENABLED: bool = cfg!(any(test, feature = "check_range"));

/// An intermediate value that does not fit the bit budget of its stage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
  "stage {stage} node {node}: value {value} needs {buf_bit} bits, budget is {bit}; input: {input:?}"
)]
pub struct RangeOverflow {
  /// Stage that produced the value, 0 being the input itself.
  pub stage: usize,
  /// Position of the value in the stage's buffer.
  pub node: usize,
  pub value: i32,
  /// Signed width of `value`, sign bit included.
  pub buf_bit: usize,
  /// The stage's budget.
  pub bit: i8,
  /// The vector originally fed to the transform.
  pub input: Vec<i32>,
}

/// Minimal number of bits holding `|value|`, 0 for 0.
#[inline]
pub fn bits_needed(value: i32) -> usize {
  ILog::ilog(value.unsigned_abs())
}

/// Checks that every element of `buf` fits in `bit` signed bits.
///
/// # Errors
///
/// - Returns `RangeOverflow` describing the first element of `buf` whose
///   magnitude plus a sign bit exceeds `bit`.
pub fn check_stage_range(
  stage: usize, input: &[i32], buf: &[i32], bit: i8,
) -> Result<(), RangeOverflow> {
  let budget = i64::from(bit);
  match buf.iter().position(|&v| bits_needed(v) as i64 + 1 > budget) {
    Some(node) => Err(RangeOverflow {
      stage,
      node,
      value: buf[node],
      buf_bit: bits_needed(buf[node]) + 1,
      bit,
      input: input.to_vec(),
    }),
    None => Ok(()),
  }
}

cfg_if::cfg_if! {
  if #[cfg(any(test, feature = "check_range"))] {
    /// # Panics
    ///
    /// - If an element of `buf` exceeds the budget `bit`
    #[inline]
    pub(crate) fn range_check(
      name: &str, stage: usize, input: &[i32], buf: &[i32], bit: i8,
    ) {
      if let Err(e) = check_stage_range(stage, input, buf, bit) {
        log::error!("{} overflow: {}", name, e);
        panic!("{} overflow: {}", name, e);
      }
    }

    /// # Panics
    ///
    /// - If `w0 * in0 + w1 * in1` does not fit in 32 bits
    #[inline]
    pub(crate) fn check_half_btf(w0: i32, in0: i32, w1: i32, in1: i32) {
      let result =
        i64::from(w0) * i64::from(in0) + i64::from(w1) * i64::from(in1);
      if i32::try_from(result).is_err() {
        log::error!(
          "half_btf overflow: {} * {} + {} * {} = {}",
          w0, in0, w1, in1, result
        );
        panic!(
          "half_btf overflow: {} * {} + {} * {} = {}",
          w0, in0, w1, in1, result
        );
      }
    }
  } else {
    #[inline(always)]
    pub(crate) fn range_check(
      _name: &str, _stage: usize, _input: &[i32], _buf: &[i32], _bit: i8,
    ) {
    }

    #[inline(always)]
    pub(crate) fn check_half_btf(_w0: i32, _in0: i32, _w1: i32, _in1: i32) {}
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn bits_needed_uses_magnitude() {
    assert_eq!(bits_needed(0), 0);
    assert_eq!(bits_needed(1), 1);
    assert_eq!(bits_needed(-1), 1);
    assert_eq!(bits_needed(255), 8);
    assert_eq!(bits_needed(-256), 9);
    assert_eq!(bits_needed(i32::MIN), 32);
    assert_eq!(bits_needed(i32::MAX), 31);
  }

  #[test]
  fn accepts_values_within_budget() {
    let buf = [0, 127, -127, 64];
    assert_eq!(check_stage_range(3, &buf, &buf, 8), Ok(()));
    assert_eq!(check_stage_range(0, &[], &[], 1), Ok(()));
  }

  #[test]
  fn reports_first_offending_node() {
    let input = [1, 2, 3, 4];
    let buf = [127, -128, 300, 0];
    let err = check_stage_range(2, &input, &buf, 8).unwrap_err();
    assert_eq!(
      err,
      RangeOverflow {
        stage: 2,
        node: 1,
        value: -128,
        buf_bit: 9,
        bit: 8,
        input: input.to_vec(),
      }
    );
    assert_eq!(
      err.to_string(),
      "stage 2 node 1: value -128 needs 9 bits, budget is 8; input: [1, 2, 3, 4]"
    );
  }

  #[test]
  fn zero_fits_any_positive_budget() {
    assert!(check_stage_range(0, &[0], &[0], 1).is_ok());
    assert!(check_stage_range(0, &[1], &[1], 1).is_err());
    assert!(check_stage_range(0, &[0], &[0], 0).is_err());
  }

  #[test]
  #[should_panic(expected = "fdct8 overflow: stage 4 node 2")]
  fn hook_panics_with_diagnostic() {
    range_check("fdct8", 4, &[0; 8], &[0, 0, 1 << 20, 0, 0, 0, 0, 0], 20);
  }
}
