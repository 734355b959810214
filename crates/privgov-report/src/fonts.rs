//! Width metrics for the two standard fonts used in reports.
//!
//! Widths are the AFM values for Helvetica and Helvetica-Bold in
//! thousandths of the point size, covering the printable ASCII range.
//! Characters outside that range fall back to a typical glyph width.

/// Font face used by the report builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    /// Helvetica.
    Regular,
    /// Helvetica-Bold.
    Bold,
}

impl Font {
    /// PDF base font name.
    pub fn base_name(self) -> &'static str {
        match self {
            Font::Regular => "Helvetica",
            Font::Bold => "Helvetica-Bold",
        }
    }

    /// Resource name inside page content streams.
    pub fn resource_name(self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
        }
    }

    /// Width of `text` at `size`, in points.
    pub fn text_width(self, text: &str, size: f32) -> f32 {
        let table = match self {
            Font::Regular => &HELVETICA_WIDTHS,
            Font::Bold => &HELVETICA_BOLD_WIDTHS,
        };
        let units: u32 = text
            .chars()
            .map(|c| match u32::from(c) {
                code @ 0x20..=0x7e => u32::from(table[(code - 0x20) as usize]),
                _ => DEFAULT_WIDTH,
            })
            .sum();
        units as f32 * size / 1000.0
    }
}

const DEFAULT_WIDTH: u32 = 556;

/// Helvetica glyph widths for U+0020..=U+007E.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, 667, 778, 722,
    667, 611, 722, 667, 944, 667, 667, 611, // 'A'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, 556, 556, 333,
    500, 278, 556, 500, 722, 500, 500, 500, // 'a'..'z'
    334, 260, 334, 584, // '{'..'~'
];

/// Helvetica-Bold glyph widths for U+0020..=U+007E.
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    333, 333, 584, 584, 584, 611, 975, // ':'..'@'
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, 667, 778, 722,
    667, 611, 722, 667, 944, 667, 667, 611, // 'A'..'Z'
    333, 278, 333, 584, 556, 333, // '['..'`'
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, 611, 611, 389,
    556, 333, 611, 556, 778, 556, 556, 500, // 'a'..'z'
    389, 280, 389, 584, // '{'..'~'
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_widths() {
        // 'M' regular 833/1000 at 11pt.
        assert!((Font::Regular.text_width("M", 11.0) - 9.163).abs() < 0.001);
        // Space regular 278/1000 at 11pt.
        assert!((Font::Regular.text_width(" ", 11.0) - 3.058).abs() < 0.001);
    }

    #[test]
    fn test_bold_wider_than_regular() {
        let regular = Font::Regular.text_width("Retention period", 11.0);
        let bold = Font::Bold.text_width("Retention period", 11.0);
        assert!(bold > regular);
    }

    #[test]
    fn test_width_scales_linearly() {
        let at_10 = Font::Regular.text_width("Privacy", 10.0);
        let at_20 = Font::Regular.text_width("Privacy", 20.0);
        assert!((at_20 - 2.0 * at_10).abs() < 0.001);
    }

    #[test]
    fn test_non_ascii_falls_back() {
        assert!(Font::Regular.text_width("é", 11.0) > 0.0);
    }
}
