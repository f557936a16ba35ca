/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fs::read;
use std::path::{Path, PathBuf};

use zune_pgm::{decode_file, encode_file, PgmErrorKind, PgmImage, PgmVariant};

use crate::{hash, sample_path, TestEntry};

pub fn pgm_path() -> PathBuf {
    sample_path().join("test-images/pgm")
}

fn load_entries() -> Vec<TestEntry> {
    let file = Path::new(env!("CARGO_MANIFEST_DIR")).join("pgm.json");
    let json_file = read(file).unwrap();

    serde_json::from_slice(&json_file).unwrap()
}

/// A scratch file name unique to this test binary
fn temp_file(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("zune-pgm-{}-{name}", std::process::id()))
}

#[test]
#[allow(clippy::uninlined_format_args)]
fn test_pgm() {
    let default_path = pgm_path();
    let mut error = false;
    let mut files = Vec::new();

    for entry in &load_entries() {
        let file_name = default_path.join(&entry.name);
        let result = decode_file(&file_name);

        let failure = match (result, entry.error) {
            (Err(err), Some(expected)) if err.kind() == expected.to_error_kind() => None,
            (Err(err), expected) => Some(format!(
                "Expected {:?} but decoding failed with {:?}",
                expected, err
            )),
            (Ok(_), Some(expected)) => Some(format!(
                "Expected {:?} error but decoding succeeded",
                expected
            )),
            (Ok(image), None) => check_image(entry, &default_path, &image)
        };

        if let Some(err) = failure {
            error = true;
            files.push(entry.to_owned());
            eprintln!("{:?}: {}\nConfig:{:#?}\n", file_name, err, entry);
        }
    }
    if error {
        panic!("Errors found during test decoding\n {:#?}", files);
    }
}

fn check_image(entry: &TestEntry, default_path: &Path, image: &PgmImage) -> Option<String> {
    let found = (image.width(), image.height(), image.max_val());
    let expected = (
        entry.width.unwrap_or(found.0),
        entry.height.unwrap_or(found.1),
        entry.max_val.unwrap_or(found.2)
    );
    if found != expected {
        return Some(format!(
            "Header mismatch, expected {expected:?} but found {found:?}"
        ));
    }
    if let Some(other) = &entry.same_as {
        let reference = decode_file(default_path.join(other)).unwrap();

        let (expected_hash, hash) = (hash(reference.samples()), hash(image.samples()));

        if expected_hash != hash {
            return Some(format!(
                "Hash mismatch with {other}, expected {expected_hash} but found {hash}"
            ));
        }
    }
    None
}

#[test]
fn test_file_round_trip() {
    for entry in load_entries().iter().filter(|x| x.error.is_none()) {
        let image = decode_file(pgm_path().join(&entry.name)).unwrap();

        for variant in [PgmVariant::P2, PgmVariant::P5] {
            let output = temp_file(&format!("{variant}-{}", entry.name));

            encode_file(&image, variant, &output).unwrap();
            let decoded = decode_file(&output);
            std::fs::remove_file(&output).unwrap();

            let decoded = decoded.unwrap();
            assert_eq!(decoded.width(), image.width());
            assert_eq!(decoded.height(), image.height());
            assert_eq!(decoded.max_val(), image.max_val());
            assert_eq!(
                hash(decoded.samples()),
                hash(image.samples()),
                "{} as {variant}",
                entry.name
            );
        }
    }
}

#[test]
fn test_encoded_file_layout() {
    let image = PgmImage::from_samples(2, 2, 255, vec![0, 128, 255, 64]).unwrap();
    let output = temp_file("layout.pgm");

    encode_file(&image, PgmVariant::P5, &output).unwrap();
    let bytes = read(&output).unwrap();
    std::fs::remove_file(&output).unwrap();

    assert_eq!(bytes, b"P5\n2 2\n255\n\x00\x80\xff\x40");
}

#[test]
fn test_edit_and_rescale_file() {
    let mut image = decode_file(pgm_path().join("gradient_p5.pgm")).unwrap();

    image.set(0, 0, 15).unwrap();
    image.rescale(255).unwrap();
    // 15 is the max value, so it maps to the new max value
    assert_eq!(image.get(0, 0).unwrap(), 255);
    // 10*255/15
    assert_eq!(image.get(2, 2).unwrap(), 170);

    let output = temp_file("rescaled.pgm");
    encode_file(&image, PgmVariant::P5, &output).unwrap();
    let decoded = decode_file(&output);
    std::fs::remove_file(&output).unwrap();

    assert_eq!(decoded.unwrap(), image);
}

#[test]
fn test_missing_files() {
    let err = decode_file(pgm_path().join("does-not-exist.pgm")).unwrap_err();
    assert_eq!(err.kind(), PgmErrorKind::Io);

    let image = PgmImage::new(1, 1, 1).unwrap();
    let err = encode_file(&image, PgmVariant::P2, pgm_path().join("missing-dir/out.pgm"))
        .unwrap_err();
    assert_eq!(err.kind(), PgmErrorKind::Io);
}
