#![no_main]
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use utft::{DecodeError, SENTINEL, TranscodeOptions, Transcoder, Utf8Boundaries, testing};

#[derive(Debug, Arbitrary)]
enum Input {
    /// Arbitrary bytes, possibly malformed.
    Raw(Vec<u8>),
    /// Well-formed UTF-T built from arbitrary text.
    Text(String),
}

#[derive(Debug, Arbitrary)]
struct Case {
    input: Input,
    canonical: bool,
    initial_capacity: u16,
    growth_increment: u16,
}

fn transcoder(case: &Case) -> Transcoder {
    Transcoder::new(TranscodeOptions {
        initial_capacity: usize::from(case.initial_capacity),
        growth_increment: usize::from(case.growth_increment),
        boundaries: if case.canonical {
            Utf8Boundaries::Canonical
        } else {
            Utf8Boundaries::Legacy
        },
    })
}

fn run(case: Case) {
    let transcoder = transcoder(&case);
    let reference = Transcoder::new(TranscodeOptions {
        boundaries: transcoder.options().boundaries,
        ..Default::default()
    });

    match &case.input {
        Input::Raw(bytes) => match transcoder.transcode(bytes) {
            Ok(out) => {
                assert!(out.len() <= 4 * bytes.len());
                assert_eq!(out, reference.transcode(bytes).unwrap());
            }
            Err(DecodeError::TruncatedUnit { offset, available }) => {
                assert_eq!(bytes[offset], SENTINEL);
                assert_eq!(available, bytes.len() - offset - 1);
                assert!(available < 3);
            }
        },
        Input::Text(text) => {
            let encoded = testing::encode_str(text);
            let out = transcoder.transcode(&encoded).unwrap();
            if case.canonical {
                assert_eq!(out, text.as_str());
            } else if !text.contains(['\u{7FF}', '\u{FFFF}']) {
                assert_eq!(out, text.as_str());
            }
        }
    }
}

fuzz_target!(|case: Case| run(case));
