//! Control words with fixed output.

use chrono::NaiveDateTime;

/// What a recognised control word produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mapped {
    /// Literal replacement text.
    Text(&'static str),
    /// The current date or time in the given `chrono` format.
    Clock(&'static str),
    /// `\uN`: the parameter is a code point.
    Unicode,
}

/// Look up a (lower-cased) control word.
///
/// Returns `None` for words that only record state on the current group.
#[must_use]
pub fn lookup(word: &str) -> Option<Mapped> {
    let mapped = match word {
        "u" => Mapped::Unicode,
        "par" | "page" | "column" | "line" | "lbr" => Mapped::Text("\n"),
        "emspace" | "enspace" | "qmspace" => Mapped::Text(" "),
        "tab" => Mapped::Text("\t"),
        "chdate" => Mapped::Clock("%m.%d.%Y"),
        "chdpl" => Mapped::Clock("%A, %-d %B %Y"),
        "chdpa" => Mapped::Clock("%a, %-d %b %Y"),
        "chtime" => Mapped::Clock("%H:%M:%S"),
        "emdash" => Mapped::Text("\u{2014}"),
        "endash" => Mapped::Text("\u{2013}"),
        "bullet" => Mapped::Text("\u{2022}"),
        "lquote" => Mapped::Text("\u{2018}"),
        "rquote" => Mapped::Text("\u{2019}"),
        "ldblquote" => Mapped::Text("\u{201C}"),
        "rdblquote" => Mapped::Text("\u{201D}"),
        _ => return None,
    };
    Some(mapped)
}

/// Character for a `\uN` parameter.
///
/// Negative parameters follow the signed 16-bit convention (`\u-4064` is
/// U+F020). Surrogates and out-of-range values produce nothing.
#[must_use]
pub fn unicode_char(param: i32) -> Option<char> {
    let code = if param < 0 { param + 0x1_0000 } else { param };
    u32::try_from(code).ok().and_then(char::from_u32)
}

/// Render a clock word.
#[must_use]
pub fn render_clock(format: &str, now: NaiveDateTime) -> String {
    now.format(format).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 5)
            .and_then(|d| d.and_hms_opt(9, 7, 2))
            .unwrap_or_default()
    }

    #[test]
    fn line_breaks_and_spaces() {
        for word in ["par", "page", "column", "line", "lbr"] {
            assert_eq!(lookup(word), Some(Mapped::Text("\n")));
        }
        assert_eq!(lookup("qmspace"), Some(Mapped::Text(" ")));
        assert_eq!(lookup("tab"), Some(Mapped::Text("\t")));
    }

    #[test]
    fn state_words_are_not_mapped() {
        assert_eq!(lookup("fonttbl"), None);
        assert_eq!(lookup("b"), None);
        assert_eq!(lookup("uc"), None);
    }

    #[test]
    fn clock_formats() {
        let now = sample_time();
        let render = |word| match lookup(word) {
            Some(Mapped::Clock(format)) => render_clock(format, now),
            other => panic!("{word} mapped to {other:?}"),
        };
        assert_eq!(render("chdate"), "03.05.2024");
        assert_eq!(render("chdpl"), "Tuesday, 5 March 2024");
        assert_eq!(render("chdpa"), "Tue, 5 Mar 2024");
        assert_eq!(render("chtime"), "09:07:02");
    }

    #[test]
    fn unicode_parameters() {
        assert_eq!(unicode_char(9731), Some('\u{2603}'));
        assert_eq!(unicode_char(-4064), Some('\u{F020}'));
        assert_eq!(unicode_char(0xD800), None);
    }
}
