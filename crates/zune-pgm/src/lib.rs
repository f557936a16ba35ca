/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Decoding, encoding and editing Portable Graymap (PGM) images
//!
//! [Format Specification](https://netpbm.sourceforge.net/doc/pgm.html)
//!
//! # Features
//! - ASCII (`P2`) and binary (`P5`) decoding and encoding
//! - 8 and 16 bit samples, chosen by the header max value
//! - Bounds checked pixel access, raw or normalized to `0..=65535`
//! - Linear intensity rescaling
//!
//! # Limitations
//! - Header comments (`#`) are not supported
//! - The whole image is held in memory
//!
//! # Cargo features
//! - `log` (default): emit trace and warning messages through the [log](https://docs.rs/log) crate
//!
//! # Example
//! ```
//! use zune_pgm::zune_core::bytestream::ZCursor;
//! use zune_pgm::{PgmDecoder, PgmEncoder, PgmVariant};
//!
//! let mut image = PgmDecoder::new(ZCursor::new(&b"P2\n2 2\n255\n0 128\n255 64\n"[..]))
//!     .decode()
//!     .unwrap();
//!
//! image.set(0, 0, 10).unwrap();
//! image.rescale(1023).unwrap();
//!
//! let mut output = vec![];
//! PgmEncoder::new(&mut output)
//!     .encode(&image, PgmVariant::P5)
//!     .unwrap();
//! assert!(output.starts_with(b"P5\n2 2\n1023\n"));
//! ```

pub use decoder::*;
pub use encoder::*;
pub use errors::*;
pub use image::PgmImage;
pub use zune_core;

mod ascii;
mod decoder;
mod encoder;
mod errors;
mod image;
mod rescale;
