/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Errors possible when decoding, encoding and accessing PGM images
use std::fmt::{Debug, Display, Formatter};
use std::io;

use zune_core::bytestream::ZByteIoError;

/// Broad classes of [`PgmErrors`]
///
/// Callers that only care about *why* something failed, and not the
/// specifics, can match on this instead of the full error.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PgmErrorKind {
    /// Underlying read/write failure, early end of stream or
    /// a malformed decimal number
    Io,
    /// Structurally invalid PGM data
    Format,
    /// Sample storage could not be allocated
    OutOfMemory,
    /// Pixel coordinate outside the image
    Bounds,
    /// Image exceeds limits configured in the decoder options
    Limits
}

/// Possible errors that may occur when working with PGM images
pub enum PgmErrors {
    /// An I/O error from the underlying reader or writer.
    ///
    /// Also used for premature end of stream and for header or
    /// ASCII sample tokens that are not decimal numbers fitting a `u16`
    IoErrors(ZByteIoError),
    /// The first byte of the stream is not `P`
    ///
    /// The argument is the byte found
    NotPgm(u8),
    /// The second byte of the stream is not `2` or `5`
    ///
    /// `None` indicates the stream ended after the `P`
    UnknownVariant(Option<u8>),
    /// The stream ended while skipping whitespace after the magic bytes
    MissingHeader,
    /// A max value of zero was found or requested
    ZeroMaxVal,
    /// A sample exceeded the max value in strict mode
    SampleOutOfRange { sample: u16, max_val: u16 },
    /// Width or height larger than the configured limit
    LargeDimensions { limit: usize, found: usize },
    /// Allocating storage for the given number of samples failed
    OutOfMemory(usize),
    /// The number of samples given does not match `width*height`
    MismatchedLength { expected: usize, found: usize },
    /// A pixel accessor was called with a coordinate outside the image
    OutOfBounds {
        row:    usize,
        column: usize,
        width:  u16,
        height: u16
    },
    /// The decoder already failed with an error of this kind
    ///
    /// A decoder does not resume from the middle of a stream,
    /// every call after the first failure returns this.
    PreviousError(PgmErrorKind)
}

impl PgmErrors {
    /// Return the class this error belongs to
    pub const fn kind(&self) -> PgmErrorKind {
        match self {
            PgmErrors::IoErrors(_) => PgmErrorKind::Io,
            PgmErrors::NotPgm(_)
            | PgmErrors::UnknownVariant(_)
            | PgmErrors::MissingHeader
            | PgmErrors::ZeroMaxVal
            | PgmErrors::SampleOutOfRange { .. }
            | PgmErrors::MismatchedLength { .. } => PgmErrorKind::Format,
            PgmErrors::LargeDimensions { .. } => PgmErrorKind::Limits,
            PgmErrors::OutOfMemory(_) => PgmErrorKind::OutOfMemory,
            PgmErrors::OutOfBounds { .. } => PgmErrorKind::Bounds,
            PgmErrors::PreviousError(kind) => *kind
        }
    }
}

impl Debug for PgmErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PgmErrors::IoErrors(err) => {
                writeln!(f, "I/O error {err:?}")
            }
            PgmErrors::NotPgm(byte) => {
                writeln!(
                    f,
                    "Not a PGM file, expected 'P' as first byte but found {:?}",
                    *byte as char
                )
            }
            PgmErrors::UnknownVariant(Some(byte)) => {
                writeln!(
                    f,
                    "Unsupported PGM variant {:?}, supported variants are P2 and P5",
                    *byte as char
                )
            }
            PgmErrors::UnknownVariant(None) => {
                writeln!(f, "Stream ended before the PGM variant byte")
            }
            PgmErrors::MissingHeader => {
                writeln!(f, "Stream ended before the PGM header")
            }
            PgmErrors::ZeroMaxVal => {
                writeln!(f, "Max value must be at least 1")
            }
            PgmErrors::SampleOutOfRange { sample, max_val } => {
                writeln!(f, "Sample {sample} is greater than max value {max_val}")
            }
            PgmErrors::LargeDimensions { limit, found } => {
                writeln!(
                    f,
                    "Too large dimensions, expected a value less than {limit} but found {found}"
                )
            }
            PgmErrors::OutOfMemory(samples) => {
                writeln!(f, "Could not allocate storage for {samples} samples")
            }
            PgmErrors::MismatchedLength { expected, found } => {
                writeln!(
                    f,
                    "Sample count does not match dimensions, expected {expected} but found {found}"
                )
            }
            PgmErrors::OutOfBounds {
                row,
                column,
                width,
                height
            } => {
                writeln!(
                    f,
                    "Pixel ({row},{column}) is outside image of {height} rows and {width} columns"
                )
            }
            PgmErrors::PreviousError(kind) => {
                writeln!(f, "Decoder previously failed with a {kind:?} error")
            }
        }
    }
}

impl Display for PgmErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

impl std::error::Error for PgmErrors {}

impl From<ZByteIoError> for PgmErrors {
    fn from(err: ZByteIoError) -> Self {
        PgmErrors::IoErrors(err)
    }
}

impl From<io::Error> for PgmErrors {
    fn from(err: io::Error) -> Self {
        PgmErrors::IoErrors(ZByteIoError::from(err))
    }
}
