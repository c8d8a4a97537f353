//! XLSX (Office Open XML) output

mod styles;
mod writer;

pub use writer::XlsxWriter;

/// MIME type of an `.xlsx` workbook
pub const XLSX_MIME_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Escape text for XML content or attribute values, dropping characters XML 1.0 cannot carry
pub(crate) fn escape_xml(s: &str) -> String {
    let cleaned: std::borrow::Cow<'_, str> = if s.chars().any(is_forbidden_xml_char) {
        s.chars().filter(|&c| !is_forbidden_xml_char(c)).collect::<String>().into()
    } else {
        s.into()
    };
    quick_xml::escape::escape(cleaned.as_ref()).into_owned()
}

fn is_forbidden_xml_char(c: char) -> bool {
    matches!(c, '\u{0}'..='\u{8}' | '\u{b}' | '\u{c}' | '\u{e}'..='\u{1f}' | '\u{fffe}' | '\u{ffff}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a<b>&\"c\""), "a&lt;b&gt;&amp;&quot;c&quot;");
        assert_eq!(escape_xml("bad\u{1}char"), "badchar");
        assert_eq!(escape_xml("ACGT"), "ACGT");
    }
}
