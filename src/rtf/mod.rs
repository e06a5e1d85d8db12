//! RTF to plain text.
//!
//! A single left-to-right scan over the raw bytes driven by a stack of
//! groups. Control words either map to fixed output (`\par`, `\emdash`,
//! `\uN`, ...) or are recorded on the current group; a group that has
//! recorded one of the destination words (`\*`, `\fonttbl`, `\colortbl`,
//! `\datastore`, `\themedata`) suppresses all literal content until it
//! closes.
//!
//! The scan never fails. Truncated escapes at the end of input are left for
//! the main loop to treat as ordinary content, and a `}` with no open group
//! is ignored.
//!
//! ```rust
//! use rs_docparser::rtf::extract_rtf;
//!
//! let text = extract_rtf(br"{\rtf1{\*\fonttbl test}Hello\par World}");
//! assert_eq!(text, "Hello\nWorld");
//! ```

mod control;
mod cursor;
mod group;

pub use cursor::ByteCursor;
pub use group::{ControlValue, Group, GroupStack};

use crate::encoding::{codepage_encoding, decode_byte};
use chrono::{Local, NaiveDateTime};
use control::Mapped;

/// Output of a complete scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RtfText {
    /// Extracted plain text.
    pub text: String,

    /// Groups still open at end of input (0 for balanced input).
    pub open_groups: usize,

    /// `}` bytes that had no group to close.
    pub unmatched_closes: usize,
}

impl RtfText {
    /// Whether every `{` was matched by a `}`.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.open_groups == 0 && self.unmatched_closes == 0
    }
}

/// Extract plain text from RTF bytes.
#[must_use]
pub fn extract_rtf(bytes: &[u8]) -> String {
    RtfTokenizer::new(bytes).run().text
}

/// Group-stack RTF tokenizer.
pub struct RtfTokenizer<'a> {
    cursor: ByteCursor<'a>,
    stack: GroupStack,
    out: Vec<u8>,
    now: NaiveDateTime,
}

impl<'a> RtfTokenizer<'a> {
    #[must_use]
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            cursor: ByteCursor::new(bytes),
            stack: GroupStack::new(),
            out: Vec::with_capacity(bytes.len() / 2),
            now: Local::now().naive_local(),
        }
    }

    /// Use a fixed time for `\chdate`, `\chdpl`, `\chdpa` and `\chtime`.
    #[must_use]
    pub fn with_clock(mut self, now: NaiveDateTime) -> Self {
        self.now = now;
        self
    }

    /// Scan the whole input.
    #[must_use]
    pub fn run(mut self) -> RtfText {
        while let Some(byte) = self.cursor.advance() {
            // Visibility is decided by the group in force before this byte
            let visible = !self.stack.current().is_destination();

            match byte {
                b'\\' => self.escape(visible),
                b'{' => self.stack.push(),
                b'}' => self.stack.pop(),
                b'\r' | b'\n' | 0x0C | 0x00 => {}
                _ => {
                    if visible {
                        self.out.push(byte);
                    }
                }
            }
        }

        let result = RtfText {
            text: String::from_utf8_lossy(&self.out).into_owned(),
            open_groups: self.stack.depth() - 1,
            unmatched_closes: self.stack.unmatched_closes(),
        };
        log::debug!(
            "rtf: {} bytes in, {} chars out, {} open groups, {} unmatched closes",
            self.cursor.position(),
            result.text.len(),
            result.open_groups,
            result.unmatched_closes
        );
        result
    }

    /// Handle the byte after a backslash.
    fn escape(&mut self, visible: bool) {
        let Some(next) = self.cursor.peek() else {
            return;
        };

        match next {
            b'\\' | b'~' | b'_' | b'{' | b'}' => {
                self.cursor.advance();
                if visible {
                    let literal = match next {
                        b'~' => b' ',
                        b'_' => b'-',
                        other => other,
                    };
                    self.out.push(literal);
                }
            }
            b'*' => {
                self.cursor.advance();
                self.stack.current_mut().mark_ignorable();
            }
            b'\'' => {
                self.cursor.advance();
                self.hex_escape(visible);
            }
            b if b.is_ascii_alphabetic() => self.control_word(visible),
            _ => {
                // Other control symbols (`\-`, `\:`, `\|`, ...) carry no text
                self.cursor.advance();
            }
        }
    }

    /// `\'hh`: one byte in the document code page.
    fn hex_escape(&mut self, visible: bool) {
        let digits = self.cursor.lookahead(2);
        if digits.len() < 2 {
            return;
        }
        self.cursor.advance_by(2);

        if !digits.iter().all(u8::is_ascii_hexdigit) {
            return;
        }
        let value = digits
            .iter()
            .fold(0u8, |acc, d| (acc << 4) | hex_value(*d));

        if visible {
            let codepage = match self.stack.current().get("ansicpg") {
                Some(ControlValue::Number(cp)) => cp,
                _ => 1252,
            };
            let decoded = decode_byte(codepage_encoding(codepage), value);
            self.out.extend_from_slice(decoded.as_bytes());
        }
    }

    /// `\word[-][digits][ ]`
    fn control_word(&mut self, visible: bool) {
        let mut word = String::new();
        while let Some(b) = self.cursor.peek().filter(u8::is_ascii_alphabetic) {
            word.push(char::from(b.to_ascii_lowercase()));
            self.cursor.advance();
        }

        let mut param = String::new();
        if self.cursor.peek() == Some(b'-') {
            param.push('-');
            self.cursor.advance();
        }
        while let Some(b) = self.cursor.peek().filter(u8::is_ascii_digit) {
            param.push(char::from(b));
            self.cursor.advance();
        }

        // A single space delimits the word and is not content
        if self.cursor.peek() == Some(b' ') {
            self.cursor.advance();
        }

        let value = match param.as_str() {
            "" => None,
            "-" => Some(ControlValue::BareMinus),
            digits => Some(ControlValue::Number(parse_param(digits))),
        };

        match control::lookup(&word) {
            Some(Mapped::Unicode) => {
                if visible {
                    if let Some(ch) = value.and_then(|v| match v {
                        ControlValue::Number(n) => control::unicode_char(n),
                        _ => None,
                    }) {
                        self.push_char(ch);
                    }
                }
                if let Some(skip) = self.stack.current().positive("uc") {
                    self.cursor.advance_by(skip);
                }
            }
            Some(Mapped::Text(text)) => {
                if visible {
                    self.out.extend_from_slice(text.as_bytes());
                }
            }
            Some(Mapped::Clock(format)) => {
                if visible {
                    let stamp = control::render_clock(format, self.now);
                    self.out.extend_from_slice(stamp.as_bytes());
                }
            }
            None => {
                self.stack
                    .current_mut()
                    .record(&word, value.unwrap_or(ControlValue::Flag));
            }
        }
    }

    fn push_char(&mut self, ch: char) {
        let mut buf = [0u8; 4];
        self.out
            .extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
    }
}

fn hex_value(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        b'A'..=b'F' => digit - b'A' + 10,
        _ => 0,
    }
}

/// Parse a control-word parameter, saturating on overflow.
fn parse_param(digits: &str) -> i32 {
    digits.parse().unwrap_or(if digits.starts_with('-') {
        i32::MIN
    } else {
        i32::MAX
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn scan(input: &[u8]) -> RtfText {
        RtfTokenizer::new(input).run()
    }

    #[test]
    fn par_becomes_newline_and_consumes_delimiter() {
        assert_eq!(extract_rtf(br"Hello\par World"), "Hello\nWorld");
    }

    #[test]
    fn destination_content_is_suppressed() {
        assert_eq!(extract_rtf(br"{\*\fonttbl test}Hello"), "Hello");
        assert_eq!(extract_rtf(br"{\fonttbl{\f0 Arial;}}Body"), "Body");
        assert_eq!(extract_rtf(br"{\colortbl;\red0\green0\blue0;}x"), "x");
    }

    #[test]
    fn nested_groups_inherit_destination() {
        let text = extract_rtf(br"{\*\datastore {inner {deeper}} more}after");
        assert_eq!(text, "after");
    }

    #[test]
    fn nested_state_does_not_leak_to_parent() {
        let text = extract_rtf(br"{{\*\generator Word;}visible}");
        assert_eq!(text, "visible");
    }

    #[test]
    fn unicode_without_uc_keeps_fallback() {
        assert_eq!(extract_rtf(br"\u9731?"), "\u{2603}?");
    }

    #[test]
    fn unicode_with_uc_skips_fallback() {
        assert_eq!(extract_rtf(br"{\uc1\u9731?x}"), "\u{2603}x");
        assert_eq!(extract_rtf(br"{\uc2\u-4064 ??y}"), "\u{F020}y");
    }

    #[test]
    fn uc_is_scoped_to_group() {
        assert_eq!(extract_rtf(br"{\uc1 a}\u9731?"), "a\u{2603}?");
    }

    #[test]
    fn uc_skip_past_end_is_clamped() {
        assert_eq!(extract_rtf(br"\uc5\u9731?"), "\u{2603}");
    }

    #[test]
    fn control_symbols() {
        assert_eq!(extract_rtf(br"a\\b\~c\_d"), "a\\b c-d");
        assert_eq!(extract_rtf(br"\{braces\}"), "{braces}");
        assert_eq!(extract_rtf(br"soft\-hyphen"), "softhyphen");
    }

    #[test]
    fn control_symbols_hidden_in_destination() {
        assert_eq!(extract_rtf(br"{\*\x a\\b\~c}"), "");
    }

    #[test]
    fn hex_escape_uses_code_page() {
        assert_eq!(extract_rtf(br"caf\'e9"), "café");
        assert_eq!(extract_rtf(br"{\ansi\ansicpg1251 \'c0}"), "А");
        assert_eq!(extract_rtf(br"\'93quoted\'94"), "\u{201C}quoted\u{201D}");
    }

    #[test]
    fn truncated_hex_escape_does_not_panic() {
        assert_eq!(extract_rtf(br"end\'4"), "end4");
        assert_eq!(extract_rtf(br"end\'"), "end");
        assert_eq!(extract_rtf(b"end\\"), "end");
    }

    #[test]
    fn invalid_hex_escape_is_skipped() {
        assert_eq!(extract_rtf(br"a\'zzb"), "ab");
    }

    #[test]
    fn typographic_words() {
        let text = extract_rtf(br"\ldblquote a\rdblquote \emdash \endash \bullet \lquote b\rquote");
        assert_eq!(text, "\u{201C}a\u{201D}\u{2014}\u{2013}\u{2022}\u{2018}b\u{2019}");
    }

    #[test]
    fn spacing_words() {
        assert_eq!(extract_rtf(br"a\tab b\emspace c\line d"), "a\tb c\nd");
    }

    #[test]
    fn clock_words_use_injected_time() {
        let now = NaiveDate::from_ymd_opt(2021, 12, 31)
            .and_then(|d| d.and_hms_opt(23, 59, 58))
            .unwrap_or_default();
        let text = RtfTokenizer::new(br"\chdate|\chtime").with_clock(now).run().text;
        assert_eq!(text, "12.31.2021|23:59:58");
    }

    #[test]
    fn mapped_words_hidden_in_destination() {
        assert_eq!(extract_rtf(br"{\*\x \par\tab\u65 ?}z"), "z");
    }

    #[test]
    fn structural_whitespace_is_dropped() {
        assert_eq!(extract_rtf(b"a\r\nb\x0cc\x00d"), "abcd");
    }

    #[test]
    fn parameter_scan_stops_at_non_digit() {
        // `\fs24x` records fs=24 and leaves `x` as content
        assert_eq!(extract_rtf(br"\fs24x"), "x");
        // A second minus ends the parameter
        assert_eq!(extract_rtf(br"\li-5-"), "-");
    }

    #[test]
    fn bare_minus_is_recorded() {
        let text = extract_rtf(br"\foo- x");
        assert_eq!(text, "x");
    }

    #[test]
    fn huge_parameter_saturates() {
        assert_eq!(extract_rtf(br"\fs99999999999999 ok"), "ok");
    }

    #[test]
    fn control_words_are_case_insensitive() {
        assert_eq!(extract_rtf(br"a\PAR b"), "a\nb");
    }

    #[test]
    fn balanced_input_returns_to_root() {
        let result = scan(br"{\rtf1{\b bold}{\i{\ul x}}}");
        assert_eq!(result.open_groups, 0);
        assert!(result.is_balanced());
        assert_eq!(result.text, "boldx");
    }

    #[test]
    fn excess_closing_braces_do_not_underflow() {
        let result = scan(b"a}}b{c");
        assert_eq!(result.text, "abc");
        assert_eq!(result.unmatched_closes, 2);
        assert_eq!(result.open_groups, 1);
        assert!(!result.is_balanced());
    }

    #[test]
    fn raw_utf8_passes_through() {
        assert_eq!(extract_rtf("naïve".as_bytes()), "naïve");
    }

    #[test]
    fn empty_input() {
        assert_eq!(extract_rtf(b""), "");
    }
}
