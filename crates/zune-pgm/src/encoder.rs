/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fmt::{Display, Formatter, Write as _};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use zune_core::bit_depth::{BitDepth, ByteEndian};
use zune_core::log::trace;

use crate::errors::PgmErrors;
use crate::image::PgmImage;

/// The two PGM encodings
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PgmVariant {
    /// Samples written as whitespace separated decimal text
    P2,
    /// Samples written as raw bytes, one or two per sample
    P5
}

impl PgmVariant {
    /// Map the second magic byte to a variant
    ///
    /// ```
    /// use zune_pgm::PgmVariant;
    /// assert_eq!(PgmVariant::from_magic(b'2'), Some(PgmVariant::P2));
    /// assert_eq!(PgmVariant::from_magic(b'6'), None);
    /// ```
    pub const fn from_magic(byte: u8) -> Option<PgmVariant> {
        match byte {
            b'2' => Some(PgmVariant::P2),
            b'5' => Some(PgmVariant::P5),
            _ => None
        }
    }
}

impl Display for PgmVariant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::P2 => write!(f, "P2"),
            Self::P5 => write!(f, "P5")
        }
    }
}

/// A PGM encoder
///
/// # Example
/// ```
/// use zune_pgm::{PgmEncoder, PgmImage, PgmVariant};
///
/// let image = PgmImage::from_samples(2, 1, 9, vec![3, 9]).unwrap();
/// let mut output = vec![];
///
/// PgmEncoder::new(&mut output).encode(&image, PgmVariant::P2).unwrap();
/// assert_eq!(output, b"P2\n2 1\n9\n3 9\n");
/// ```
pub struct PgmEncoder<'a, W: Write> {
    writer: &'a mut W,
    endian: ByteEndian
}

impl<'a, W: Write> PgmEncoder<'a, W> {
    /// Create a new encoder that writes to `writer`
    ///
    /// 16 bit samples are written big endian unless changed with
    /// [`set_byte_endian`](Self::set_byte_endian).
    pub fn new(writer: &'a mut W) -> PgmEncoder<'a, W> {
        Self {
            writer,
            endian: ByteEndian::BE
        }
    }

    /// Set the byte order of 16 bit `P5` samples
    ///
    /// # Example
    /// ```
    /// use zune_pgm::zune_core::bit_depth::ByteEndian;
    /// use zune_pgm::{PgmEncoder, PgmImage, PgmVariant};
    ///
    /// let image = PgmImage::from_samples(1, 1, 1000, vec![1000]).unwrap();
    /// let mut output = vec![];
    ///
    /// PgmEncoder::new(&mut output)
    ///     .set_byte_endian(ByteEndian::LE)
    ///     .encode(&image, PgmVariant::P5)
    ///     .unwrap();
    /// assert_eq!(output, b"P5\n1 1\n1000\n\xe8\x03");
    /// ```
    pub fn set_byte_endian(mut self, endian: ByteEndian) -> Self {
        self.endian = endian;
        self
    }

    fn write_headers(&mut self, image: &PgmImage, variant: PgmVariant) -> Result<(), PgmErrors> {
        let header = format!(
            "{variant}\n{} {}\n{}\n",
            image.width(),
            image.height(),
            image.max_val()
        );
        self.writer.write_all(header.as_bytes())?;

        Ok(())
    }

    /// Encode `image` as `variant` and flush the writer
    ///
    /// - `P2` writes one line of space separated decimal samples per row.
    /// - `P5` writes one byte per sample if the max value is at most 255,
    ///   keeping only the low 8 bits of each sample, otherwise two bytes
    ///   in the configured byte order.
    pub fn encode(&mut self, image: &PgmImage, variant: PgmVariant) -> Result<(), PgmErrors> {
        trace!(
            "Encoding {}x{} image with max value {} as {variant}",
            image.width(),
            image.height(),
            image.max_val()
        );
        self.write_headers(image, variant)?;

        match variant {
            PgmVariant::P2 => self.encode_ascii(image)?,
            PgmVariant::P5 => self.encode_binary(image)?
        }
        self.writer.flush()?;

        Ok(())
    }

    fn encode_ascii(&mut self, image: &PgmImage) -> Result<(), PgmErrors> {
        let width = usize::from(image.width());

        if width == 0 {
            // no samples, so no rows to write
            return Ok(());
        }
        let mut line = String::with_capacity(width * 6);

        for row in image.samples().chunks_exact(width) {
            line.clear();

            for (i, sample) in row.iter().enumerate() {
                if i != 0 {
                    line.push(' ');
                }
                // writing to a String cannot fail
                let _ = write!(line, "{sample}");
            }
            line.push('\n');

            self.writer.write_all(line.as_bytes())?;
        }
        Ok(())
    }

    fn encode_binary(&mut self, image: &PgmImage) -> Result<(), PgmErrors> {
        let owned_data = match image.bit_depth() {
            BitDepth::Eight => image
                .samples()
                .iter()
                .map(|x| (*x & 0xFF) as u8)
                .collect::<Vec<u8>>(),
            _ => {
                let endian = self.endian;

                image
                    .samples()
                    .iter()
                    .flat_map(|x| u16_to_bytes(*x, endian))
                    .collect::<Vec<u8>>()
            }
        };
        self.writer.write_all(&owned_data)?;

        Ok(())
    }
}

#[inline]
fn u16_to_bytes(value: u16, endian: ByteEndian) -> [u8; 2] {
    if matches!(endian, ByteEndian::LE) {
        value.to_le_bytes()
    } else {
        value.to_be_bytes()
    }
}

/// Encode `image` as `variant` into the file at `path`, writing 16 bit samples big endian
///
/// The file is created if missing and truncated otherwise.
pub fn encode_file<P: AsRef<Path>>(
    image: &PgmImage, variant: PgmVariant, path: P
) -> Result<(), PgmErrors> {
    let mut writer = BufWriter::new(File::create(path)?);

    PgmEncoder::new(&mut writer).encode(image, variant)
}
