/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Parsing the textual parts of PGM files
//!
//! Headers and `P2` samples are whitespace separated decimal numbers.

use zune_core::bytestream::{ZByteIoError, ZByteReaderTrait, ZReader};

use crate::errors::PgmErrors;

/// Whitespace as understood by PGM headers
///
/// Space, horizontal tab, line feed and carriage return.
#[inline(always)]
pub(crate) const fn is_pgm_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r')
}

/// Consume and return the next byte, end of stream is an error
#[inline]
pub(crate) fn read_byte<T: ZByteReaderTrait>(reader: &mut ZReader<T>) -> Result<u8, ZByteIoError> {
    let [byte] = reader.read_fixed_bytes_or_error::<1>()?;
    Ok(byte)
}

/// Return the next byte without consuming it, or `None` at end of stream
#[inline]
pub(crate) fn peek_byte<T: ZByteReaderTrait>(
    reader: &mut ZReader<T>
) -> Result<Option<u8>, ZByteIoError> {
    if reader.eof()? {
        return Ok(None);
    }
    Ok(reader.peek_at(0, 1)?.first().copied())
}

/// Skip PGM whitespace, returning `true` if the end of the stream was reached.
pub(crate) fn skip_whitespace<T: ZByteReaderTrait>(
    reader: &mut ZReader<T>
) -> Result<bool, ZByteIoError> {
    while let Some(byte) = peek_byte(reader)? {
        if !is_pgm_whitespace(byte) {
            break;
        }
        read_byte(reader)?;
    }
    reader.eof()
}

/// Read an unsigned decimal number that fits in a `u16`
///
/// Leading whitespace is skipped, parsing stops at the first
/// non digit which is left in the stream.
///
/// # Errors
/// - End of stream before any digit
/// - No digits at the current position
/// - The number does not fit in a `u16`
pub(crate) fn read_decimal<T: ZByteReaderTrait>(reader: &mut ZReader<T>) -> Result<u16, PgmErrors> {
    if skip_whitespace(reader)? {
        return Err(PgmErrors::IoErrors(ZByteIoError::Generic(
            "stream ended while expecting a decimal number"
        )));
    }
    let mut value = 0_u32;
    let mut digits = 0_usize;

    while let Some(byte) = peek_byte(reader)? {
        if !byte.is_ascii_digit() {
            break;
        }
        read_byte(reader)?;

        value = value * 10 + u32::from(byte - b'0');
        digits += 1;

        if value > u32::from(u16::MAX) {
            return Err(PgmErrors::IoErrors(ZByteIoError::Generic(
                "decimal number does not fit in 16 bits"
            )));
        }
    }
    if digits == 0 {
        return Err(PgmErrors::IoErrors(ZByteIoError::Generic(
            "expected a decimal number"
        )));
    }
    // value <= u16::MAX checked in the loop
    Ok(value as u16)
}
