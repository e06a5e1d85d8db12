use rs_docparser::media_type::{DOCX, MSWORD, ODT, RTF};
use rs_docparser::rtf::{extract_rtf, RtfTokenizer};
use rs_docparser::{extract_bytes_with_options, Error, Options};
use std::time::{Duration, Instant};

fn options() -> Options {
    Options {
        use_doc_converter: false,
        ..Options::default()
    }
}

/// Deterministic pseudo-random bytes (xorshift).
fn noise(len: usize, mut seed: u32) -> Vec<u8> {
    (0..len)
        .map(|_| {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            seed.to_le_bytes()[0]
        })
        .collect()
}

#[test]
fn rtf_never_fails_on_noise() {
    for seed in 1..64 {
        let bytes = noise(512, seed);
        let result = extract_bytes_with_options(&bytes, Some(RTF), &options());
        assert!(result.is_ok(), "seed {seed}: {result:?}");
    }
}

#[test]
fn rtf_truncated_escapes_at_end_of_input() {
    let inputs: [&[u8]; 8] = [br"\", br"\'", br"\'4", br"{\u", br"{\u-", br"{\uc5\u65", br"\*", br"{\ansicpg"];
    for input in inputs {
        assert!(!extract_rtf(input).contains('\\'));
    }
    assert_eq!(extract_rtf(br"ab\'4"), "ab4");
}

#[test]
fn rtf_huge_parameters_saturate() {
    assert_eq!(extract_rtf(br"{\uc99999999999999999 x}"), "x");
    let text = extract_rtf(br"{\fs-99999999999999999999 y}");
    assert_eq!(text, "y");
}

#[test]
fn rtf_deep_nesting_is_linear() {
    let mut rtf = Vec::new();
    rtf.extend(std::iter::repeat(b'{').take(10_000));
    rtf.extend_from_slice(b"deep");
    rtf.extend(std::iter::repeat(b'}').take(10_000));

    let start = Instant::now();
    let scanned = RtfTokenizer::new(&rtf).run();
    assert!(start.elapsed() < Duration::from_secs(5));
    assert_eq!(scanned.text, "deep");
    assert!(scanned.is_balanced());
}

#[test]
fn packages_reject_noise_with_typed_errors() {
    for media_type in [DOCX, ODT] {
        for seed in 1..16 {
            let mut bytes = b"PK\x03\x04".to_vec();
            bytes.extend(noise(256, seed));
            match extract_bytes_with_options(&bytes, Some(media_type), &options()) {
                Ok(_) | Err(Error::MalformedContainer(_) | Error::MalformedMarkup(_)) => {}
                Err(err) => panic!("expected Ok(_) or a malformed error, got Err({err:?})"),
            }
        }
    }
}

#[test]
fn doc_fallback_never_fails_on_noise() {
    for seed in 1..32 {
        let bytes = noise(1024, seed);
        let result = extract_bytes_with_options(&bytes, Some(MSWORD), &options());
        match result {
            Ok(result) => assert!(!result.content.contains('\0')),
            Err(err) => panic!("fallback should not fail, got Err({err:?})"),
        }
    }
}

#[test]
fn text_never_fails_on_noise() {
    for media_type in ["text/plain", "text/html", "text/plain; charset=bogus"] {
        let result = extract_bytes_with_options(&noise(300, 7), Some(media_type), &options());
        assert!(result.is_ok(), "{media_type}: {result:?}");
    }
}
