#![allow(clippy::expect_used)]

use rs_docparser::media_type::MSWORD;
use rs_docparser::{extract_bytes_with_options, Options};

#[test]
fn defaults_use_antiword_docbook() {
    let options = Options::default();
    assert!(options.use_doc_converter);
    assert_eq!(options.doc_converter_program, "antiword");
    assert_eq!(options.doc_converter_args, vec!["-x".to_string(), "db".to_string()]);
    assert!(options.flatten_docbook_output);
}

#[test]
fn options_do_not_affect_non_doc_formats() {
    let with_converter = Options::default();
    let without = Options {
        use_doc_converter: false,
        flatten_docbook_output: false,
        ..Options::default()
    };
    let a = extract_bytes_with_options(b"line one\nline two", Some("text/plain"), &with_converter)
        .expect("extraction failed");
    let b = extract_bytes_with_options(b"line one\nline two", Some("text/plain"), &without)
        .expect("extraction failed");
    assert_eq!(a, b);
}

#[cfg(unix)]
#[test]
fn flattening_removes_newlines_from_converter_output() {
    // `cat` echoes the staged input, standing in for a DocBook converter.
    let docbook = b"<book>\n<para>one\ntwo</para>\n<para>three</para>\n</book>";
    let converter = |flatten| Options {
        doc_converter_program: "cat".to_string(),
        doc_converter_args: Vec::new(),
        flatten_docbook_output: flatten,
        ..Options::default()
    };

    let flat = extract_bytes_with_options(docbook, Some(MSWORD), &converter(true)).expect("extraction failed");
    assert_eq!(flat.content, "<p>onetwo</p><p>three</p>");

    let kept = extract_bytes_with_options(docbook, Some(MSWORD), &converter(false)).expect("extraction failed");
    assert_eq!(kept.content, "<p>one\ntwo</p>\n<p>three</p>");
}
