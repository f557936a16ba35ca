/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The in-memory grayscale image
//!
//! A [`PgmImage`] owns `width*height` samples stored row-major as `u16`,
//! together with the max value the samples are measured against.
//! Storage is released when the image is dropped.
//!
//! # Pixel coordinates
//! All accessors take `(row, column)` with `row` in `0..height` and
//! `column` in `0..width`. Anything else is an
//! [`OutOfBounds`](PgmErrors::OutOfBounds) error and leaves the image untouched.

use zune_core::bit_depth::BitDepth;

use crate::errors::PgmErrors;
use crate::rescale::renormalize;

/// A grayscale image with 16 bit samples
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PgmImage {
    width:   u16,
    height:  u16,
    max_val: u16,
    samples: Vec<u16>
}

/// Reserve space for `width*height` samples without initializing them.
pub(crate) fn allocate_samples(width: u16, height: u16) -> Result<Vec<u16>, PgmErrors> {
    let size = usize::from(width)
        .checked_mul(usize::from(height))
        .ok_or(PgmErrors::OutOfMemory(usize::MAX))?;

    allocate(size)
}

/// Reserve space for `size` samples, failing instead of aborting
/// when the allocator can't provide it.
pub(crate) fn allocate(size: usize) -> Result<Vec<u16>, PgmErrors> {
    let mut samples = Vec::new();
    samples
        .try_reserve_exact(size)
        .map_err(|_| PgmErrors::OutOfMemory(size))?;

    Ok(samples)
}

/// Sample width of binary data for `max_val`
///
/// One byte up to 255, two bytes above.
pub(crate) const fn bit_depth_for(max_val: u16) -> BitDepth {
    if max_val > 255 {
        BitDepth::Sixteen
    } else {
        BitDepth::Eight
    }
}

impl PgmImage {
    /// Create a new image with every sample set to zero
    ///
    /// # Errors
    /// - [`ZeroMaxVal`](PgmErrors::ZeroMaxVal) if `max_val` is 0
    /// - [`OutOfMemory`](PgmErrors::OutOfMemory) if the samples cannot be allocated
    ///
    /// # Example
    /// ```
    /// use zune_pgm::PgmImage;
    /// let image = PgmImage::new(3, 2, 255).unwrap();
    ///
    /// assert_eq!(image.samples(), &[0; 6]);
    /// ```
    pub fn new(width: u16, height: u16, max_val: u16) -> Result<PgmImage, PgmErrors> {
        if max_val == 0 {
            return Err(PgmErrors::ZeroMaxVal);
        }
        let mut samples = allocate_samples(width, height)?;
        samples.resize(usize::from(width) * usize::from(height), 0);

        Ok(PgmImage {
            width,
            height,
            max_val,
            samples
        })
    }

    /// Create an image from existing row-major samples
    ///
    /// Samples are taken as is, they are not checked against `max_val`.
    ///
    /// # Errors
    /// - [`ZeroMaxVal`](PgmErrors::ZeroMaxVal) if `max_val` is 0
    /// - [`MismatchedLength`](PgmErrors::MismatchedLength) if `samples.len() != width*height`
    pub fn from_samples(
        width: u16, height: u16, max_val: u16, samples: Vec<u16>
    ) -> Result<PgmImage, PgmErrors> {
        if max_val == 0 {
            return Err(PgmErrors::ZeroMaxVal);
        }
        let expected = usize::from(width) * usize::from(height);

        if samples.len() != expected {
            return Err(PgmErrors::MismatchedLength {
                expected,
                found: samples.len()
            });
        }
        Ok(PgmImage {
            width,
            height,
            max_val,
            samples
        })
    }

    /// Number of columns in the image
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Number of rows in the image
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// The maximum sample value, always at least 1
    pub const fn max_val(&self) -> u16 {
        self.max_val
    }

    /// Overwrite the max value without touching the samples
    ///
    /// Use [`rescale`](Self::rescale) to remap the samples as well.
    ///
    /// # Errors
    /// [`ZeroMaxVal`](PgmErrors::ZeroMaxVal) if `max_val` is 0, the image is unchanged.
    pub fn set_max_val(&mut self, max_val: u16) -> Result<(), PgmErrors> {
        if max_val == 0 {
            return Err(PgmErrors::ZeroMaxVal);
        }
        self.max_val = max_val;
        Ok(())
    }

    /// Sample width this image would be written with as `P5`
    pub const fn bit_depth(&self) -> BitDepth {
        bit_depth_for(self.max_val)
    }

    /// All samples, row-major
    pub fn samples(&self) -> &[u16] {
        &self.samples
    }

    /// Consume the image returning its sample storage
    pub fn into_samples(self) -> Vec<u16> {
        self.samples
    }

    pub(crate) fn samples_mut(&mut self) -> &mut [u16] {
        &mut self.samples
    }

    fn index(&self, row: usize, column: usize) -> Result<usize, PgmErrors> {
        if row >= usize::from(self.height) || column >= usize::from(self.width) {
            return Err(PgmErrors::OutOfBounds {
                row,
                column,
                width: self.width,
                height: self.height
            });
        }
        Ok(row * usize::from(self.width) + column)
    }

    /// Return the raw sample at `(row, column)`
    pub fn get(&self, row: usize, column: usize) -> Result<u16, PgmErrors> {
        let index = self.index(row, column)?;
        Ok(self.samples[index])
    }

    /// Store `sample` at `(row, column)`
    ///
    /// If `sample` is greater than the max value, the max value is
    /// raised to `sample`. Other samples are not modified.
    ///
    /// # Example
    /// ```
    /// use zune_pgm::PgmImage;
    /// let mut image = PgmImage::new(2, 2, 100).unwrap();
    ///
    /// image.set(1, 0, 300).unwrap();
    /// assert_eq!(image.max_val(), 300);
    /// assert_eq!(image.get(1, 0).unwrap(), 300);
    /// ```
    pub fn set(&mut self, row: usize, column: usize, sample: u16) -> Result<(), PgmErrors> {
        let index = self.index(row, column)?;
        self.samples[index] = sample;

        if sample > self.max_val {
            self.max_val = sample;
        }
        Ok(())
    }

    /// Return the sample at `(row, column)` scaled to `0..=65535`
    ///
    /// Computed as `sample*65535/max_val` with truncating division.
    pub fn get_normalized(&self, row: usize, column: usize) -> Result<u16, PgmErrors> {
        let index = self.index(row, column)?;
        Ok(renormalize(self.samples[index], self.max_val, u16::MAX))
    }

    /// Store a sample given in `0..=65535`, scaled down to `0..=max_val`
    ///
    /// Computed as `sample*max_val/65535` with truncating division,
    /// the max value is never changed.
    pub fn set_normalized(
        &mut self, row: usize, column: usize, sample: u16
    ) -> Result<(), PgmErrors> {
        let index = self.index(row, column)?;
        self.samples[index] = renormalize(sample, u16::MAX, self.max_val);

        Ok(())
    }
}
