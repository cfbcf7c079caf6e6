// Copyright (c) 2017-2022, The rav1e contributors. All rights reserved
//
// This source code is subject to the terms of the BSD 2 Clause License and
// the Alliance for Open Media Patent License 1.0. If the BSD 2 Clause License
// was not distributed with this source code in the LICENSE file, you can
// obtain it at www.aomedia.org/license/software. If the Alliance for Open
// Media Patent License 1.0 was not distributed with this source code in the
// PATENTS file, you can obtain it at www.aomedia.org/license/patent.

//! Forward 1-D DCT stage networks and the fixed-point primitives they share.

pub use self::config::*;
pub use self::forward::*;
pub use self::range_check::{
  bits_needed, check_stage_range, RangeOverflow, RANGE_CHECK_ENABLED,
};

use crate::util::round_shift;

mod config;
mod forward;
mod range_check;

/// Largest transform length handled by the stage networks.
pub const MAX_TXFM_LEN: usize = 16;
/// Largest number of stages (stage 0 included) of any supported network.
pub const MAX_TXFM_STAGE_NUM: usize = 8;

/// Lowest precision level stored in [`COSPI_ARR`].
pub const COS_BIT_MIN: i8 = 10;
/// Highest precision level stored in [`COSPI_ARR`].
pub const COS_BIT_MAX: i8 = 16;
const COS_BIT_LEVELS: usize = (COS_BIT_MAX - COS_BIT_MIN + 1) as usize;

/// `round(cos(j * pi / 128) * 2^cos_bit)` for `j` in `0..64`, one row per
/// precision level starting at [`COS_BIT_MIN`].
pub static COSPI_ARR: [[i32; 64]; COS_BIT_LEVELS] = [
  [
    1024, 1024, 1023, 1021, 1019, 1016, 1013, 1009, 1004, 999, 993, 987, 980,
    972, 964, 955, 946, 936, 926, 915, 903, 891, 878, 865, 851, 837, 822, 807,
    792, 775, 759, 742, 724, 706, 688, 669, 650, 630, 610, 590, 569, 548, 526,
    505, 483, 460, 438, 415, 392, 369, 345, 321, 297, 273, 249, 224, 200, 175,
    150, 125, 100, 75, 50, 25,
  ],
  [
    2048, 2047, 2046, 2042, 2038, 2033, 2026, 2018, 2009, 1998, 1987, 1974,
    1960, 1945, 1928, 1911, 1892, 1872, 1851, 1829, 1806, 1782, 1757, 1730,
    1703, 1674, 1645, 1615, 1583, 1551, 1517, 1483, 1448, 1412, 1375, 1338,
    1299, 1260, 1220, 1179, 1138, 1096, 1053, 1009, 965, 921, 876, 830, 784,
    737, 690, 642, 595, 546, 498, 449, 400, 350, 301, 251, 201, 151, 100, 50,
  ],
  [
    4096, 4095, 4091, 4085, 4076, 4065, 4052, 4036, 4017, 3996, 3973, 3948,
    3920, 3889, 3857, 3822, 3784, 3745, 3703, 3659, 3612, 3564, 3513, 3461,
    3406, 3349, 3290, 3229, 3166, 3102, 3035, 2967, 2896, 2824, 2751, 2675,
    2598, 2520, 2440, 2359, 2276, 2191, 2106, 2019, 1931, 1842, 1751, 1660,
    1567, 1474, 1380, 1285, 1189, 1092, 995, 897, 799, 700, 601, 501, 401, 301,
    201, 101,
  ],
  [
    8192, 8190, 8182, 8170, 8153, 8130, 8103, 8071, 8035, 7993, 7946, 7895,
    7839, 7779, 7713, 7643, 7568, 7489, 7405, 7317, 7225, 7128, 7027, 6921,
    6811, 6698, 6580, 6458, 6333, 6203, 6070, 5933, 5793, 5649, 5501, 5351,
    5197, 5040, 4880, 4717, 4551, 4383, 4212, 4038, 3862, 3683, 3503, 3320,
    3135, 2948, 2760, 2570, 2378, 2185, 1990, 1795, 1598, 1401, 1202, 1003,
    803, 603, 402, 201,
  ],
  [
    16384, 16379, 16364, 16340, 16305, 16261, 16207, 16143, 16069, 15986,
    15893, 15791, 15679, 15557, 15426, 15286, 15137, 14978, 14811, 14635,
    14449, 14256, 14053, 13842, 13623, 13395, 13160, 12916, 12665, 12406,
    12140, 11866, 11585, 11297, 11003, 10702, 10394, 10080, 9760, 9434, 9102,
    8765, 8423, 8076, 7723, 7366, 7005, 6639, 6270, 5897, 5520, 5139, 4756,
    4370, 3981, 3590, 3196, 2801, 2404, 2006, 1606, 1205, 804, 402,
  ],
  [
    32768, 32758, 32729, 32679, 32610, 32522, 32413, 32286, 32138, 31972,
    31786, 31581, 31357, 31114, 30853, 30572, 30274, 29957, 29622, 29269,
    28899, 28511, 28106, 27684, 27246, 26791, 26320, 25833, 25330, 24812,
    24279, 23732, 23170, 22595, 22006, 21403, 20788, 20160, 19520, 18868,
    18205, 17531, 16846, 16151, 15447, 14733, 14010, 13279, 12540, 11793,
    11039, 10279, 9512, 8740, 7962, 7180, 6393, 5602, 4808, 4011, 3212, 2411,
    1608, 804,
  ],
  [
    65536, 65516, 65457, 65358, 65220, 65043, 64827, 64571, 64277, 63944,
    63572, 63162, 62714, 62228, 61705, 61145, 60547, 59914, 59244, 58538,
    57798, 57022, 56212, 55368, 54491, 53581, 52639, 51665, 50660, 49624,
    48559, 47464, 46341, 45190, 44011, 42806, 41576, 40320, 39040, 37736,
    36410, 35062, 33692, 32303, 30893, 29466, 28020, 26558, 25080, 23586,
    22078, 20557, 19024, 17479, 15924, 14359, 12785, 11204, 9616, 8022, 6424,
    4821, 3216, 1608,
  ],
];

/// Returns the cosine row for precision `cos_bit`.
///
/// # Panics
///
/// - If `cos_bit` is outside `COS_BIT_MIN..=COS_BIT_MAX`
#[inline]
pub fn cospi_arr(cos_bit: i8) -> &'static [i32; 64] {
  assert!(
    (COS_BIT_MIN..=COS_BIT_MAX).contains(&cos_bit),
    "cos_bit {} out of range",
    cos_bit
  );
  &COSPI_ARR[(cos_bit - COS_BIT_MIN) as usize]
}

// performs half a butterfly
#[inline]
pub fn half_btf(w0: i32, in0: i32, w1: i32, in1: i32, bit: usize) -> i32 {
  range_check::check_half_btf(w0, in0, w1, in1);
  // Ensure defined behaviour for when w0*in0 + w1*in1 is negative and
  //   overflows, but w0*in0 + w1*in1 + rounding isn't.
  let result = w0.wrapping_mul(in0).wrapping_add(w1.wrapping_mul(in1));
  round_shift(result, bit)
}

/// The 1-D transforms implemented by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TxfmType {
  DCT4,
  DCT8,
  DCT16,
}

impl TxfmType {
  pub const ALL: [TxfmType; 3] =
    [TxfmType::DCT4, TxfmType::DCT8, TxfmType::DCT16];

  /// Returns the transform for a vector of `size` elements, if any.
  pub const fn from_size(size: usize) -> Option<Self> {
    match size {
      4 => Some(TxfmType::DCT4),
      8 => Some(TxfmType::DCT8),
      16 => Some(TxfmType::DCT16),
      _ => None,
    }
  }

  #[inline]
  pub const fn size_log2(self) -> usize {
    match self {
      TxfmType::DCT4 => 2,
      TxfmType::DCT8 => 3,
      TxfmType::DCT16 => 4,
    }
  }

  #[inline]
  pub const fn size(self) -> usize {
    1 << self.size_log2()
  }

  /// Number of entries expected in the `cos_bit` and `stage_range`
  /// sequences: stage 0 (the input) plus `2 * log2(N) - 1` computing stages.
  #[inline]
  pub const fn stage_num(self) -> usize {
    2 * self.size_log2()
  }

  /// Whether `stage` looks up cosine coefficients. All stages but the input,
  /// the first butterfly and the final permutation do.
  #[inline]
  pub const fn is_rotation_stage(self, stage: usize) -> bool {
    stage >= 2 && stage + 1 < self.stage_num()
  }

  pub const fn name(self) -> &'static str {
    match self {
      TxfmType::DCT4 => "fdct4",
      TxfmType::DCT8 => "fdct8",
      TxfmType::DCT16 => "fdct16",
    }
  }
}

type TxfmFunc = fn(&[i32], &mut [i32], &[i8], &[i8]);

const fn get_func(t: TxfmType) -> TxfmFunc {
  use self::TxfmType::*;
  match t {
    DCT4 => fdct4,
    DCT8 => fdct8,
    DCT16 => fdct16,
  }
}

/// Runs the forward 1-D transform `txfm_type` on `input`, leaving the
/// coefficients in ascending frequency order in `output`.
///
/// `cos_bit` and `stage_range` carry one entry per stage, stage 0 included
/// (see [`TxfmType::stage_num`]).
pub fn fwd_txfm1d(
  txfm_type: TxfmType, input: &[i32], output: &mut [i32], cos_bit: &[i8],
  stage_range: &[i8],
) {
  get_func(txfm_type)(input, output, cos_bit, stage_range);
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn cospi_rows_are_scaled_cosines() {
    for cos_bit in COS_BIT_MIN..=COS_BIT_MAX {
      let cospi = cospi_arr(cos_bit);
      let scale = f64::from(1u32 << cos_bit);
      for (j, &c) in cospi.iter().enumerate() {
        let expected =
          ((j as f64) * std::f64::consts::PI / 128.).cos() * scale;
        assert_eq!(c, expected.round() as i32, "cos_bit {} index {}", cos_bit, j);
      }
    }
  }

  #[test]
  fn cospi_reference_values() {
    let cospi = cospi_arr(12);
    assert_eq!(cospi[0], 4096);
    assert_eq!(cospi[16], 3784);
    assert_eq!(cospi[32], 2896);
    assert_eq!(cospi[48], 1567);
    let cospi = cospi_arr(13);
    assert_eq!((cospi[32], cospi[16], cospi[48]), (5793, 7568, 3135));
  }

  #[test]
  #[should_panic(expected = "out of range")]
  fn cospi_rejects_unknown_precision() {
    cospi_arr(COS_BIT_MIN - 1);
  }

  #[test]
  fn half_btf_rounds_half_up() {
    let c32 = cospi_arr(13)[32];
    assert_eq!(half_btf(c32, 2, c32, 2, 13), 3);
    assert_eq!(half_btf(c32, -2, c32, -2, 13), -3);
    assert_eq!(half_btf(1, 1, 0, 0, 1), 1);
    assert_eq!(half_btf(-1, 1, 0, 0, 1), 0);
    assert_eq!(half_btf(-3, 1, 0, 0, 1), -1);
  }

  #[test]
  #[should_panic(expected = "half_btf overflow")]
  fn half_btf_detects_product_overflow() {
    half_btf(46341, 46341, 46341, 46341, 16);
  }

  #[test]
  fn stage_layout() {
    let expected = [(4, 4), (8, 6), (16, 8)];
    for (&t, &(size, stage_num)) in TxfmType::ALL.iter().zip(&expected) {
      assert_eq!(t.size(), size);
      assert_eq!(t.stage_num(), stage_num);
      assert_eq!(TxfmType::from_size(size), Some(t));
      assert!(!t.is_rotation_stage(0));
      assert!(!t.is_rotation_stage(1));
      assert!(!t.is_rotation_stage(stage_num - 1));
      assert!((2..stage_num - 1).all(|s| t.is_rotation_stage(s)));
    }
    assert_eq!(TxfmType::from_size(32), None);
    assert!(TxfmType::ALL.iter().all(|t| t.stage_num() <= MAX_TXFM_STAGE_NUM));
  }
}
