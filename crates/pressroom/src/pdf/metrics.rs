//! Advance widths of the standard Type1 fonts, from the Adobe Core14 AFM
//! files, in 1/1000 em.
//!
//! The oblique faces share the widths of their upright counterparts and
//! every Courier glyph is 600 units wide.

const COURIER: u16 = 600;

/// Helvetica, U+0020 through U+007E
#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    278, 278, 584, 584, 584, 556, 1015,
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    278, 278, 278, 469, 556, 333,
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    334, 260, 334, 584,
];

/// Helvetica-Bold, U+0020 through U+007E
#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

/// Width of `ch` in 1/1000 em
pub(crate) fn char_width(ch: char, mono: bool, bold: bool) -> u16 {
    if mono {
        return COURIER;
    }

    let table = if bold { &HELVETICA_BOLD } else { &HELVETICA };
    match ch {
        ' '..='~' => table[ch as usize - 0x20],
        '\u{a0}' => 278,
        '•' => 350,
        '–' | '€' => 556,
        '—' | '…' => 1000,
        '‘' | '’' | '‚' => {
            if bold {
                278
            } else {
                222
            }
        }
        '“' | '”' | '„' => {
            if bold {
                500
            } else {
                333
            }
        }
        '°' => 400,
        '©' | '®' => 737,
        // Accented Latin-1 letters are as wide as their base letters
        c if c.is_uppercase() => 722,
        _ => {
            if bold {
                611
            } else {
                556
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_widths() {
        assert_eq!(char_width(' ', false, false), 278);
        assert_eq!(char_width('0', false, false), 556);
        assert_eq!(char_width('A', false, false), 667);
        assert_eq!(char_width('A', false, true), 722);
        assert_eq!(char_width('i', false, false), 222);
        assert_eq!(char_width('m', false, true), 889);
        assert_eq!(char_width('~', false, false), 584);
    }

    #[test]
    fn test_courier_is_monospaced() {
        for ch in ['i', 'W', '•', ' '] {
            assert_eq!(char_width(ch, true, false), 600);
            assert_eq!(char_width(ch, true, true), 600);
        }
    }

    #[test]
    fn test_bullet() {
        assert_eq!(char_width('•', false, false), 350);
    }
}
