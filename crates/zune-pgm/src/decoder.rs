/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use zune_core::bit_depth::{BitDepth, ByteEndian};
use zune_core::bytestream::{ZByteReaderTrait, ZReader};
use zune_core::log::{trace, warn};
use zune_core::options::DecoderOptions;

use crate::ascii::{peek_byte, read_byte, read_decimal, skip_whitespace};
use crate::encoder::PgmVariant;
use crate::errors::{PgmErrorKind, PgmErrors};
use crate::image::{allocate_samples, bit_depth_for, PgmImage};

/// Size of the scratch buffer binary samples are read through
const CHUNK_SIZE: usize = 1 << 12;

/// A PGM decoder
///
/// The decoder understands the ASCII (`P2`) and binary (`P5`) variants.
/// Binary files with a max value above 255 store two bytes per sample,
/// in the byte order configured in [`DecoderOptions`].
///
/// Header comments (`#` lines) are not supported and make decoding fail.
///
/// Once decoding fails the decoder stays failed, further calls
/// return [`PreviousError`](PgmErrors::PreviousError).
///
/// # Example
/// ```
/// use zune_pgm::zune_core::bytestream::ZCursor;
/// use zune_pgm::PgmDecoder;
///
/// let mut decoder = PgmDecoder::new(ZCursor::new(b"P2\n2 1\n9\n3 9\n"));
/// let image = decoder.decode().unwrap();
///
/// assert_eq!(image.samples(), &[3, 9]);
/// ```
pub struct PgmDecoder<T: ZByteReaderTrait> {
    width:           u16,
    height:          u16,
    max_val:         u16,
    variant:         PgmVariant,
    decoded_headers: bool,
    failed:          Option<PgmErrorKind>,
    stream:          ZReader<T>,
    options:         DecoderOptions
}

impl<T> PgmDecoder<T>
where
    T: ZByteReaderTrait
{
    /// Create a new decoder with default PGM options
    ///
    /// These differ from `DecoderOptions::default()`: samples above
    /// the max value are kept instead of rejected, and the dimension
    /// limits are raised to 65535 so that any valid header is accepted.
    ///
    /// # Arguments
    /// - data: PGM encoded bytes, e.g a `ZCursor<&[u8]>` or a `BufReader<File>`
    pub fn new(data: T) -> PgmDecoder<T> {
        let options = DecoderOptions::default()
            .set_strict_mode(false)
            .set_max_width(usize::from(u16::MAX))
            .set_max_height(usize::from(u16::MAX));

        PgmDecoder::new_with_options(data, options)
    }

    /// Create a new decoder that respects the given options
    ///
    /// Strict mode rejects samples above the max value, the byte endian
    /// option selects the order of 16 bit binary samples.
    ///
    /// # Example
    /// ```
    /// use zune_pgm::zune_core::bytestream::ZCursor;
    /// use zune_pgm::zune_core::options::DecoderOptions;
    /// use zune_pgm::PgmDecoder;
    ///
    /// let options = DecoderOptions::default().set_max_width(1);
    /// let mut decoder = PgmDecoder::new_with_options(ZCursor::new(b"P2 2 1 9 3 9"), options);
    ///
    /// assert!(decoder.decode().is_err());
    /// ```
    pub fn new_with_options(data: T, options: DecoderOptions) -> PgmDecoder<T> {
        PgmDecoder {
            width: 0,
            height: 0,
            max_val: 0,
            variant: PgmVariant::P5,
            decoded_headers: false,
            failed: None,
            stream: ZReader::new(data),
            options
        }
    }

    /// Read the magic bytes and the header, storing the
    /// image information in the decoder.
    ///
    /// On success the stream is positioned at the first sample.
    /// Calling this more than once does nothing.
    ///
    /// # Errors
    /// - [`IoErrors`](PgmErrors::IoErrors): empty stream, read failure or a
    ///   malformed width, height or max value
    /// - [`NotPgm`](PgmErrors::NotPgm), [`UnknownVariant`](PgmErrors::UnknownVariant),
    ///   [`MissingHeader`](PgmErrors::MissingHeader), [`ZeroMaxVal`](PgmErrors::ZeroMaxVal):
    ///   structurally invalid file
    /// - [`LargeDimensions`](PgmErrors::LargeDimensions): dimensions above the configured limits
    /// - [`PreviousError`](PgmErrors::PreviousError): an earlier call failed
    pub fn decode_headers(&mut self) -> Result<(), PgmErrors> {
        if let Some(kind) = self.failed {
            return Err(PgmErrors::PreviousError(kind));
        }
        if self.decoded_headers {
            return Ok(());
        }
        let result = self.read_headers();

        if let Err(err) = &result {
            self.failed = Some(err.kind());
        }
        result
    }

    fn read_headers(&mut self) -> Result<(), PgmErrors> {
        let p = read_byte(&mut self.stream)?;

        if p != b'P' {
            return Err(PgmErrors::NotPgm(p));
        }
        let variant = match peek_byte(&mut self.stream)? {
            Some(version) => {
                read_byte(&mut self.stream)?;
                PgmVariant::from_magic(version).ok_or(PgmErrors::UnknownVariant(Some(version)))?
            }
            None => return Err(PgmErrors::UnknownVariant(None))
        };
        // dimensions must follow the magic
        if skip_whitespace(&mut self.stream)? {
            return Err(PgmErrors::MissingHeader);
        }
        let width = read_decimal(&mut self.stream)?;
        let height = read_decimal(&mut self.stream)?;
        let max_val = read_decimal(&mut self.stream)?;

        if max_val == 0 {
            return Err(PgmErrors::ZeroMaxVal);
        }
        if usize::from(width) > self.options.max_width() {
            return Err(PgmErrors::LargeDimensions {
                limit: self.options.max_width(),
                found: usize::from(width)
            });
        }
        if usize::from(height) > self.options.max_height() {
            return Err(PgmErrors::LargeDimensions {
                limit: self.options.max_height(),
                found: usize::from(height)
            });
        }
        // a single byte separates the header from the samples,
        // it is consumed whatever its value.
        read_byte(&mut self.stream)?;

        trace!("Variant: {variant}");
        trace!("Width: {width}, height: {height}");
        trace!("Max value: {max_val}");
        trace!("Bit depth: {:?}", bit_depth_for(max_val));

        self.variant = variant;
        self.width = width;
        self.height = height;
        self.max_val = max_val;
        self.decoded_headers = true;

        Ok(())
    }

    /// Return image dimensions as `(width, height)` or none if headers
    /// aren't decoded
    pub const fn dimensions(&self) -> Option<(usize, usize)> {
        if self.decoded_headers {
            Some((self.width as usize, self.height as usize))
        } else {
            None
        }
    }

    /// Return the declared max value or none if headers aren't decoded
    pub const fn max_val(&self) -> Option<u16> {
        if self.decoded_headers {
            Some(self.max_val)
        } else {
            None
        }
    }

    /// Return the file variant or none if headers aren't decoded
    pub const fn variant(&self) -> Option<PgmVariant> {
        if self.decoded_headers {
            Some(self.variant)
        } else {
            None
        }
    }

    /// Return the sample width of binary data or none if headers
    /// aren't decoded
    ///
    /// This is [`BitDepth::Eight`] for max values up to 255 and
    /// [`BitDepth::Sixteen`] above that.
    pub const fn bit_depth(&self) -> Option<BitDepth> {
        if self.decoded_headers {
            Some(bit_depth_for(self.max_val))
        } else {
            None
        }
    }

    /// Number of samples the decoded image will hold,
    /// or none if headers aren't decoded
    pub const fn output_buffer_size(&self) -> Option<usize> {
        if self.decoded_headers {
            Some(self.width as usize * self.height as usize)
        } else {
            None
        }
    }

    /// Decode the whole file into a [`PgmImage`]
    ///
    /// Headers are decoded first if that hasn't happened yet.
    /// On error no image is returned and any storage is freed.
    pub fn decode(&mut self) -> Result<PgmImage, PgmErrors> {
        self.decode_headers()?;

        let result = self.decode_samples();

        if let Err(err) = &result {
            self.failed = Some(err.kind());
        }
        result
    }

    fn decode_samples(&mut self) -> Result<PgmImage, PgmErrors> {
        let size = usize::from(self.width) * usize::from(self.height);
        let mut samples = allocate_samples(self.width, self.height)?;

        match self.variant {
            PgmVariant::P2 => self.decode_ascii(size, &mut samples)?,
            PgmVariant::P5 => self.decode_binary(size, &mut samples)?
        }
        self.check_samples(&samples)?;

        PgmImage::from_samples(self.width, self.height, self.max_val, samples)
    }

    fn decode_ascii(&mut self, size: usize, samples: &mut Vec<u16>) -> Result<(), PgmErrors> {
        for _ in 0..size {
            samples.push(read_decimal(&mut self.stream)?);
        }
        Ok(())
    }

    fn decode_binary(&mut self, size: usize, samples: &mut Vec<u16>) -> Result<(), PgmErrors> {
        let depth = bit_depth_for(self.max_val);
        let little_endian = matches!(self.options.byte_endian(), ByteEndian::LE);

        let mut chunk = [0_u8; CHUNK_SIZE];
        let mut remaining = size;

        while remaining > 0 {
            let count = remaining.min(CHUNK_SIZE / depth.size_of());
            let bytes = &mut chunk[..count * depth.size_of()];

            self.stream.read_exact_bytes(bytes)?;

            if depth == BitDepth::Eight {
                samples.extend(bytes.iter().map(|x| u16::from(*x)));
            } else if little_endian {
                samples.extend(
                    bytes
                        .chunks_exact(2)
                        .map(|x| u16::from_le_bytes([x[0], x[1]]))
                );
            } else {
                samples.extend(
                    bytes
                        .chunks_exact(2)
                        .map(|x| u16::from_be_bytes([x[0], x[1]]))
                );
            }
            remaining -= count;
        }
        Ok(())
    }

    /// Confirm samples are in `0..=max_val`
    fn check_samples(&self, samples: &[u16]) -> Result<(), PgmErrors> {
        if let Some(sample) = samples.iter().copied().find(|x| *x > self.max_val) {
            if self.options.strict_mode() {
                return Err(PgmErrors::SampleOutOfRange {
                    sample,
                    max_val: self.max_val
                });
            }
            warn!(
                "Sample {sample} exceeds max value {}, keeping it as is",
                self.max_val
            );
        }
        Ok(())
    }
}

/// Decode the PGM file at `path` with default options
///
/// # Example
/// ```no_run
/// let image = zune_pgm::decode_file("gradient.pgm").unwrap();
/// println!("{}x{}", image.width(), image.height());
/// ```
pub fn decode_file<P: AsRef<Path>>(path: P) -> Result<PgmImage, PgmErrors> {
    let file = File::open(path)?;

    PgmDecoder::new(BufReader::new(file)).decode()
}
