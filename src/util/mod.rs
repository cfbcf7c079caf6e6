// Copyright (c) 2017-2022, The rav1e contributors. All rights reserved
//
// This source code is subject to the terms of the BSD 2 Clause License and
// the Alliance for Open Media Patent License 1.0. If the BSD 2 Clause License
// was not distributed with this source code in the LICENSE file, you can
// obtain it at www.aomedia.org/license/software. If the Alliance for Open
// Media Patent License 1.0 was not distributed with this source code in the
// PATENTS file, you can obtain it at www.aomedia.org/license/patent.

use num_traits::PrimInt;
use std::mem::size_of;
use std::ops::{Deref, DerefMut};

#[allow(dead_code)]
#[repr(align(32))]
pub struct Align32;

// A 32 byte aligned array.
// # Examples
// ```
// let x: AlignedArray<[i32; 16]> = AlignedArray::new([0; 16]);
// assert!(x.array.as_ptr() as usize % 32 == 0);
// ```
pub struct AlignedArray<ARRAY, A = Align32> {
  _alignment: [A; 0],
  pub array: ARRAY,
}

impl<A> AlignedArray<A> {
  pub const fn new(array: A) -> Self {
    AlignedArray { _alignment: [], array }
  }
}

impl<A, B> Deref for AlignedArray<A, B> {
  type Target = A;
  fn deref(&self) -> &A {
    &self.array
  }
}

impl<A, B> DerefMut for AlignedArray<A, B> {
  fn deref_mut(&mut self) -> &mut A {
    &mut self.array
  }
}

pub trait ILog: PrimInt {
  // Integer binary logarithm of an integer value.
  // Returns floor(log2(self)) + 1, or 0 if self == 0.
  // This is the number of bits that would be required to represent self in two's
  //  complement notation with all of the leading zeros stripped.
  fn ilog(self) -> usize {
    size_of::<Self>() * 8 - self.leading_zeros() as usize
  }
}

impl<T> ILog for T where T: PrimInt {}

/// Rounds `value / 2^bit` half up, wrapping on 32-bit overflow of the
/// rounding offset.
#[inline(always)]
pub const fn round_shift(value: i32, bit: usize) -> i32 {
  if bit == 0 {
    value
  } else {
    value.wrapping_add(1 << (bit - 1)) >> bit
  }
}
