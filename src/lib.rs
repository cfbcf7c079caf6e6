// Copyright (c) 2017-2022, The rav1e contributors. All rights reserved
//
// This source code is subject to the terms of the BSD 2 Clause License and
// the Alliance for Open Media Patent License 1.0. If the BSD 2 Clause License
// was not distributed with this source code in the LICENSE file, you can
// obtain it at www.aomedia.org/license/software. If the Alliance for Open
// Media Patent License 1.0 was not distributed with this source code in the
// PATENTS file, you can obtain it at www.aomedia.org/license/patent.

//! Bit-exact forward 1-D integer DCT-II for 4, 8 and 16 point vectors.
//!
//! Each transform is a fixed network of butterfly, rotation and permutation
//! stages. Rotations use 32-bit fixed point cosines whose precision is
//! chosen per stage by the caller, and every stage has a caller supplied bit
//! budget. With the `check_range` feature the networks verify each stage
//! against its budget and panic with a diagnostic on overflow.
//!
//! ```
//! use txfm1d::{Txfm1DCfg, TxfmType};
//!
//! let cfg = Txfm1DCfg::reference(TxfmType::DCT4);
//! let mut coeffs = [0; 4];
//! cfg.fwd(&[1, 1, 1, 1], &mut coeffs);
//! assert_eq!(coeffs, [3, 0, 0, 0]);
//! ```

#![deny(bare_trait_objects)]
#![warn(clippy::cast_lossless)]
#![warn(clippy::map_flatten)]
#![warn(clippy::mut_mut)]
#![warn(clippy::needless_borrow)]
#![warn(clippy::needless_continue)]
#![warn(clippy::range_plus_one)]

mod util;

pub mod transform;

pub use crate::transform::{
  bits_needed, check_stage_range, fdct16, fdct4, fdct8, fwd_txfm1d,
  InvalidConfig, RangeOverflow, Txfm1DCfg, TxfmType,
};
