//! Character classification for identifiers, whitespace and line breaks.

/// Identifier start table for the ASCII range.
const ASCII_ID_START: [bool; 128] = ascii_table(false);
/// Identifier continue table for the ASCII range.
const ASCII_ID_CONTINUE: [bool; 128] = ascii_table(true);

const fn ascii_table(allow_digits: bool) -> [bool; 128] {
    let mut table = [false; 128];
    let mut i = 0;
    while i < 128 {
        let c = i as u8;
        table[i] = c.is_ascii_alphabetic()
            || c == b'$'
            || c == b'_'
            || (allow_digits && c.is_ascii_digit());
        i += 1;
    }
    table
}

/// Characters with the Other_ID_Start property.
fn is_other_id_start(ch: char) -> bool {
    matches!(ch, '\u{1885}' | '\u{1886}' | '\u{2118}' | '\u{212E}' | '\u{309B}' | '\u{309C}')
}

/// True if `ch` can begin an identifier.
pub fn is_id_start(ch: char) -> bool {
    if ch.is_ascii() {
        return ASCII_ID_START[ch as usize];
    }
    unicode_ident::is_xid_start(ch) || is_other_id_start(ch)
}

/// True if `ch` can continue an identifier.
pub fn is_id_continue(ch: char) -> bool {
    if ch.is_ascii() {
        return ASCII_ID_CONTINUE[ch as usize];
    }
    // ZWNJ and ZWJ are explicitly allowed inside identifiers
    ch == '\u{200C}'
        || ch == '\u{200D}'
        || unicode_ident::is_xid_continue(ch)
        || is_other_id_start(ch)
}

/// True for line terminators: LF, CR, LS and PS.
pub fn is_line_terminator(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// True for whitespace that is not a line terminator.
pub fn is_whitespace(ch: char) -> bool {
    match ch {
        ' ' | '\t' | '\u{000B}' | '\u{000C}' | '\u{00A0}' | '\u{FEFF}' => true,
        // Space_Separator (Zs)
        '\u{1680}' | '\u{2000}'..='\u{200A}' | '\u{202F}' | '\u{205F}' | '\u{3000}' => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_identifiers() {
        assert!(is_id_start('a'));
        assert!(is_id_start('$'));
        assert!(is_id_start('_'));
        assert!(!is_id_start('1'));
        assert!(is_id_continue('1'));
        assert!(!is_id_continue('-'));
    }

    #[test]
    fn test_unicode_identifiers() {
        assert!(is_id_start('ä'));
        assert!(is_id_start('\u{309B}'));
        assert!(is_id_continue('\u{200D}'));
        assert!(!is_id_start('\u{200D}'));
        assert!(!is_id_start('€'));
    }

    #[test]
    fn test_whitespace_and_terminators() {
        assert!(is_whitespace('\u{00A0}'));
        assert!(is_whitespace('\u{2003}'));
        assert!(!is_whitespace('\n'));
        assert!(is_line_terminator('\u{2028}'));
        assert!(is_line_terminator('\r'));
    }
}
