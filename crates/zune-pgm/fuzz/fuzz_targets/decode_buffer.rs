#![no_main]

use libfuzzer_sys::fuzz_target;
use zune_pgm::zune_core::bytestream::ZCursor;
use zune_pgm::{PgmDecoder, PgmEncoder, PgmVariant};

fuzz_target!(|data: &[u8]| {
    let mut decoder = PgmDecoder::new(ZCursor::new(data));

    if let Ok(image) = decoder.decode() {
        // anything we decode must survive a trip through the encoder
        // as long as samples fit the max value
        if image.samples().iter().all(|x| *x <= image.max_val()) {
            for variant in [PgmVariant::P2, PgmVariant::P5] {
                let mut output = vec![];
                PgmEncoder::new(&mut output).encode(&image, variant).unwrap();

                let decoded = PgmDecoder::new(ZCursor::new(&output[..])).decode().unwrap();
                assert_eq!(decoded, image);
            }
        }
    }
});
