/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Linear intensity rescaling

use zune_core::log::trace;

use crate::errors::PgmErrors;
use crate::image::PgmImage;

/// Map `value` from `0..=old_max` to `0..=new_max`
///
/// Computes `value*new_max/old_max` in 32 bits with truncating division.
/// Values above `old_max` can overshoot `u16::MAX`, those saturate.
///
/// `old_max` must not be zero.
#[inline]
pub(crate) fn renormalize(value: u16, old_max: u16, new_max: u16) -> u16 {
    let scaled = u32::from(value) * u32::from(new_max) / u32::from(old_max);

    u16::try_from(scaled).unwrap_or(u16::MAX)
}

impl PgmImage {
    /// Remap every sample from `0..=max_val` to `0..=new_max_val`
    /// and make `new_max_val` the image max value.
    ///
    /// Each sample becomes `sample*new_max_val/max_val` with truncating
    /// division, so scaling down and back up again is lossy.
    ///
    /// # Errors
    /// [`ZeroMaxVal`](PgmErrors::ZeroMaxVal) if `new_max_val` is 0, the image is unchanged.
    ///
    /// # Example
    /// ```
    /// use zune_pgm::PgmImage;
    ///
    /// let mut image = PgmImage::from_samples(2, 1, 255, vec![255, 128]).unwrap();
    /// image.rescale(1023).unwrap();
    ///
    /// assert_eq!(image.max_val(), 1023);
    /// assert_eq!(image.samples(), &[1023, 513]);
    /// ```
    pub fn rescale(&mut self, new_max_val: u16) -> Result<(), PgmErrors> {
        if new_max_val == 0 {
            return Err(PgmErrors::ZeroMaxVal);
        }
        let old_max_val = self.max_val();

        trace!("Rescaling samples from {old_max_val} to {new_max_val}");

        if old_max_val != new_max_val {
            for sample in self.samples_mut() {
                *sample = renormalize(*sample, old_max_val, new_max_val);
            }
        }
        self.set_max_val(new_max_val)
    }
}
