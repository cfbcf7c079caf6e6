// Copyright (c) 2018-2022, The rav1e contributors. All rights reserved
//
// This source code is subject to the terms of the BSD 2 Clause License and
// the Alliance for Open Media Patent License 1.0. If the BSD 2 Clause License
// was not distributed with this source code in the LICENSE file, you can
// obtain it at www.aomedia.org/license/software. If the Alliance for Open
// Media Patent License 1.0 was not distributed with this source code in the
// PATENTS file, you can obtain it at www.aomedia.org/license/patent.

use std::ops::Range;

use super::range_check::range_check;
use super::{cospi_arr, half_btf, TxfmType, MAX_TXFM_LEN};
use crate::util::AlignedArray;

/// Final reindexing from the butterfly (bit-reversed) order to ascending
/// frequency order: `output[i] = stage[ORDER[i]]`.
const FDCT4_ORDER: [usize; 4] = [0, 2, 1, 3];
const FDCT8_ORDER: [usize; 8] = [0, 4, 2, 6, 1, 5, 3, 7];
const FDCT16_ORDER: [usize; 16] =
  [0, 8, 4, 12, 2, 10, 6, 14, 1, 9, 5, 13, 3, 11, 7, 15];

/// Cosine index of the leading coefficient of each odd-frequency rotation
/// pair; the trailing coefficient is `64 - k`.
const FDCT8_ODD_COS: [usize; 2] = [56, 24];
const FDCT16_ODD_COS: [usize; 4] = [60, 28, 44, 12];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Front {
  Input,
  Output,
  Step,
}

/// The two coefficient buffers of one transform call.
///
/// Stage 1 reads the caller's input and writes the output buffer, every
/// later stage reads whichever buffer is current and writes the other one.
/// Networks have an odd number of computing stages, so the result always
/// ends up in the output buffer.
struct StageBuffers<'a> {
  txfm_type: TxfmType,
  input: &'a [i32],
  output: &'a mut [i32],
  step: AlignedArray<[i32; MAX_TXFM_LEN]>,
  front: Front,
  stage: usize,
  cos_bit: &'a [i8],
  stage_range: &'a [i8],
}

impl<'a> StageBuffers<'a> {
  fn new(
    txfm_type: TxfmType, input: &'a [i32], output: &'a mut [i32],
    cos_bit: &'a [i8], stage_range: &'a [i8],
  ) -> Self {
    let size = txfm_type.size();
    debug_assert!(input.len() >= size);
    debug_assert!(output.len() >= size);
    debug_assert_eq!(cos_bit.len(), txfm_type.stage_num());
    debug_assert_eq!(stage_range.len(), txfm_type.stage_num());

    let input = &input[..size];
    // stage 0
    range_check(txfm_type.name(), 0, input, input, stage_range[0]);

    StageBuffers {
      txfm_type,
      input,
      output: &mut output[..size],
      step: AlignedArray::new([0; MAX_TXFM_LEN]),
      front: Front::Input,
      stage: 0,
      cos_bit,
      stage_range,
    }
  }

  /// Runs a stage made of butterflies, copies or a permutation.
  fn stage<F>(&mut self, f: F)
  where
    F: FnOnce(&[i32], &mut [i32]),
  {
    let size = self.input.len();
    self.stage += 1;
    self.front = match self.front {
      Front::Input => {
        f(self.input, &mut self.output[..]);
        Front::Output
      }
      Front::Output => {
        f(&self.output[..], &mut self.step.array[..size]);
        Front::Step
      }
      Front::Step => {
        f(&self.step.array[..size], &mut self.output[..]);
        Front::Output
      }
    };

    let buf = match self.front {
      Front::Step => &self.step.array[..size],
      _ => &self.output[..],
    };
    range_check(
      self.txfm_type.name(),
      self.stage,
      self.input,
      buf,
      self.stage_range[self.stage],
    );
  }

  /// Runs a stage that also rotates, using the cosine row selected by this
  /// stage's `cos_bit`.
  fn rotation_stage<F>(&mut self, f: F)
  where
    F: FnOnce(&[i32], &mut [i32], &[i32; 64], usize),
  {
    let cos_bit = self.cos_bit[self.stage + 1];
    let cospi = cospi_arr(cos_bit);
    self.stage(|src, dst| f(src, dst, cospi, cos_bit as usize));
  }

  fn finish(self) {
    debug_assert_eq!(self.stage + 1, self.txfm_type.stage_num());
    debug_assert_eq!(self.front, Front::Output);
  }
}

#[inline]
fn copy(src: &[i32], dst: &mut [i32], range: Range<usize>) {
  dst[range.clone()].copy_from_slice(&src[range]);
}

/// Butterfly on `off..off + len` folding the block onto itself: the lower
/// half receives mirror-symmetric sums, the upper half mirror-antisymmetric
/// differences.
#[inline]
fn mirror_btf(src: &[i32], dst: &mut [i32], off: usize, len: usize) {
  let half = len / 2;
  for i in 0..half {
    dst[off + i] = src[off + i] + src[off + len - 1 - i];
    dst[off + half + i] = -src[off + half + i] + src[off + half - 1 - i];
  }
}

/// Butterfly on `off..off + len` with the difference on the lower half.
/// Recombines the two rotated halves of an odd-frequency block.
#[inline]
fn mirror_btf_rev(src: &[i32], dst: &mut [i32], off: usize, len: usize) {
  for i in 0..len / 2 {
    dst[off + i] = -src[off + i] + src[off + len - 1 - i];
    dst[off + len - 1 - i] = src[off + len - 1 - i] + src[off + i];
  }
}

#[inline]
fn permute(src: &[i32], dst: &mut [i32], order: &[usize]) {
  for (d, &o) in dst.iter_mut().zip(order) {
    *d = src[o];
  }
}

/// Rotates `(p, q)` by the angle `k * pi / 128`.
#[inline]
fn rotate_pair(
  src: &[i32], dst: &mut [i32], cospi: &[i32; 64], bit: usize, p: usize,
  q: usize, k: usize,
) {
  dst[p] = half_btf(cospi[k], src[p], cospi[64 - k], src[q], bit);
  dst[q] = half_btf(cospi[k], src[q], -cospi[64 - k], src[p], bit);
}

/// The `cospi[32]` rotation turning the difference pair `(p, q)` into the
/// `(q - p, q + p) / sqrt(2)` pair.
#[inline]
fn rotate_pi4(
  src: &[i32], dst: &mut [i32], cospi: &[i32; 64], bit: usize, p: usize,
  q: usize,
) {
  dst[p] = half_btf(-cospi[32], src[p], cospi[32], src[q], bit);
  dst[q] = half_btf(cospi[32], src[q], cospi[32], src[p], bit);
}

/// Last arithmetic stage of the 4-point transform, on positions `0..4`.
#[inline]
fn fdct4_rotations(
  src: &[i32], dst: &mut [i32], cospi: &[i32; 64], bit: usize,
) {
  dst[0] = half_btf(cospi[32], src[0], cospi[32], src[1], bit);
  dst[1] = half_btf(-cospi[32], src[1], cospi[32], src[0], bit);
  rotate_pair(src, dst, cospi, bit, 2, 3, 48);
}

// The 8-point stages after the first butterfly. The 16-point network runs
// them unchanged on its even half.

fn fdct8_stage2(
  src: &[i32], dst: &mut [i32], cospi: &[i32; 64], bit: usize,
) {
  mirror_btf(src, dst, 0, 4);
  dst[4] = src[4];
  rotate_pi4(src, dst, cospi, bit, 5, 6);
  dst[7] = src[7];
}

fn fdct8_stage3(
  src: &[i32], dst: &mut [i32], cospi: &[i32; 64], bit: usize,
) {
  fdct4_rotations(src, dst, cospi, bit);
  mirror_btf(src, dst, 4, 2);
  mirror_btf_rev(src, dst, 6, 2);
}

fn fdct8_stage4(
  src: &[i32], dst: &mut [i32], cospi: &[i32; 64], bit: usize,
) {
  copy(src, dst, 0..4);
  for (i, &k) in FDCT8_ODD_COS.iter().enumerate() {
    rotate_pair(src, dst, cospi, bit, 4 + i, 7 - i, k);
  }
}

/// Forward 4-point DCT-II.
///
/// `cos_bit` and `stage_range` hold 4 entries, one per stage, stage 0 being
/// the input. Only `cos_bit[2]` is read.
pub fn fdct4(
  input: &[i32], output: &mut [i32], cos_bit: &[i8], stage_range: &[i8],
) {
  let mut bufs =
    StageBuffers::new(TxfmType::DCT4, input, output, cos_bit, stage_range);

  // stage 1
  bufs.stage(|src, dst| mirror_btf(src, dst, 0, 4));

  // stage 2
  bufs.rotation_stage(fdct4_rotations);

  // stage 3
  bufs.stage(|src, dst| permute(src, dst, &FDCT4_ORDER));

  bufs.finish();
}

/// Forward 8-point DCT-II.
///
/// `cos_bit` and `stage_range` hold 6 entries, one per stage, stage 0 being
/// the input. `cos_bit[2..5]` are read.
pub fn fdct8(
  input: &[i32], output: &mut [i32], cos_bit: &[i8], stage_range: &[i8],
) {
  let mut bufs =
    StageBuffers::new(TxfmType::DCT8, input, output, cos_bit, stage_range);

  // stage 1
  bufs.stage(|src, dst| mirror_btf(src, dst, 0, 8));

  // stage 2
  bufs.rotation_stage(fdct8_stage2);

  // stage 3
  bufs.rotation_stage(fdct8_stage3);

  // stage 4
  bufs.rotation_stage(fdct8_stage4);

  // stage 5
  bufs.stage(|src, dst| permute(src, dst, &FDCT8_ORDER));

  bufs.finish();
}

/// Forward 16-point DCT-II.
///
/// `cos_bit` and `stage_range` hold 8 entries, one per stage, stage 0 being
/// the input. `cos_bit[2..7]` are read.
pub fn fdct16(
  input: &[i32], output: &mut [i32], cos_bit: &[i8], stage_range: &[i8],
) {
  let mut bufs =
    StageBuffers::new(TxfmType::DCT16, input, output, cos_bit, stage_range);

  // stage 1
  bufs.stage(|src, dst| mirror_btf(src, dst, 0, 16));

  // stage 2
  bufs.rotation_stage(|src, dst, cospi, bit| {
    mirror_btf(src, dst, 0, 8);
    copy(src, dst, 8..10);
    rotate_pi4(src, dst, cospi, bit, 10, 13);
    rotate_pi4(src, dst, cospi, bit, 11, 12);
    copy(src, dst, 14..16);
  });

  // stage 3
  bufs.rotation_stage(|src, dst, cospi, bit| {
    fdct8_stage2(src, dst, cospi, bit);
    mirror_btf(src, dst, 8, 4);
    mirror_btf_rev(src, dst, 12, 4);
  });

  // stage 4
  bufs.rotation_stage(|src, dst, cospi, bit| {
    fdct8_stage3(src, dst, cospi, bit);
    dst[8] = src[8];
    dst[9] = half_btf(-cospi[16], src[9], cospi[48], src[14], bit);
    dst[10] = half_btf(-cospi[48], src[10], -cospi[16], src[13], bit);
    copy(src, dst, 11..13);
    dst[13] = half_btf(cospi[48], src[13], -cospi[16], src[10], bit);
    dst[14] = half_btf(cospi[16], src[14], cospi[48], src[9], bit);
    dst[15] = src[15];
  });

  // stage 5
  bufs.rotation_stage(|src, dst, cospi, bit| {
    fdct8_stage4(src, dst, cospi, bit);
    mirror_btf(src, dst, 8, 2);
    mirror_btf_rev(src, dst, 10, 2);
    mirror_btf(src, dst, 12, 2);
    mirror_btf_rev(src, dst, 14, 2);
  });

  // stage 6
  bufs.rotation_stage(|src, dst, cospi, bit| {
    copy(src, dst, 0..8);
    for (i, &k) in FDCT16_ODD_COS.iter().enumerate() {
      rotate_pair(src, dst, cospi, bit, 8 + i, 15 - i, k);
    }
  });

  // stage 7
  bufs.stage(|src, dst| permute(src, dst, &FDCT16_ORDER));

  bufs.finish();
}
