/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

#![allow(unused_imports, unused)]

use std::path::{Path, PathBuf};

use serde::Deserialize;
use xxhash_rust::xxh3::xxh3_128;
use zune_pgm::PgmErrorKind;

mod pgm;

#[derive(Copy, Clone, Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JsonErrorKind {
    Io,
    Format,
    OutOfMemory,
    Bounds,
    Limits
}

impl JsonErrorKind {
    pub fn to_error_kind(self) -> PgmErrorKind {
        match self {
            Self::Io => PgmErrorKind::Io,
            Self::Format => PgmErrorKind::Format,
            Self::OutOfMemory => PgmErrorKind::OutOfMemory,
            Self::Bounds => PgmErrorKind::Bounds,
            Self::Limits => PgmErrorKind::Limits
        }
    }
}

#[derive(Clone, Deserialize, Debug)]
pub struct TestEntry {
    pub name:    String,
    pub width:   Option<u16>,
    pub height:  Option<u16>,
    pub max_val: Option<u16>,
    /// Another file that must decode to the same samples
    pub same_as: Option<String>,
    /// Decoding must fail with this error kind
    pub error:   Option<JsonErrorKind>,
    pub comment: Option<String>
}

pub fn sample_path() -> PathBuf {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"));
    // get parent path
    path.parent().unwrap().to_owned()
}

fn hash(samples: &[u16]) -> u128 {
    let bytes = samples
        .iter()
        .flat_map(|x| x.to_le_bytes())
        .collect::<Vec<u8>>();

    xxh3_128(&bytes)
}
