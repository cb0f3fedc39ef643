//! Numeral transliteration to ASCII digits

/// Map a single full-width or kanji digit to its value
fn digit_value(c: char) -> Option<u32> {
    match c {
        '０'..='９' => Some(c as u32 - '０' as u32),
        '〇' | '零' => Some(0),
        '一' => Some(1),
        '二' => Some(2),
        '三' => Some(3),
        '四' => Some(4),
        '五' => Some(5),
        '六' => Some(6),
        '七' => Some(7),
        '八' => Some(8),
        '九' => Some(9),
        _ => None,
    }
}

/// Multiplier for kanji unit characters
fn unit_value(c: char) -> Option<u32> {
    match c {
        '十' => Some(10),
        '百' => Some(100),
        '千' => Some(1000),
        _ => None,
    }
}

fn is_kanji_numeral(c: char) -> bool {
    !c.is_ascii_digit() && !('０'..='９').contains(&c) && (digit_value(c).is_some() || unit_value(c).is_some())
}

/// Value of a kanji numeral run written with units (`二十五`, `十二`)
fn kanji_run_value(run: &[char]) -> u32 {
    let mut total = 0;
    let mut pending: Option<u32> = None;
    for &c in run {
        if let Some(unit) = unit_value(c) {
            // A bare unit (十 without a leading digit) counts once
            total += pending.take().unwrap_or(1) * unit;
        } else if let Some(d) = digit_value(c) {
            pending = Some(d);
        }
    }
    total + pending.unwrap_or(0)
}

/// Replace full-width and kanji numerals with ASCII digits
///
/// Other characters pass through unchanged.
///
/// # Examples
/// ```
/// use ja_text::to_ascii_digits;
/// assert_eq!(to_ascii_digits("令和７年"), "令和7年");
/// assert_eq!(to_ascii_digits("十二月"), "12月");
/// assert_eq!(to_ascii_digits("4/1"), "4/1");
/// ```
pub fn to_ascii_digits(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut result = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if is_kanji_numeral(c) {
            let start = i;
            while i < chars.len() && is_kanji_numeral(chars[i]) {
                i += 1;
            }
            let run = &chars[start..i];
            if run.iter().all(|&c| unit_value(c).is_none()) {
                // Positional form keeps leading zeros (〇五 -> 05)
                for &c in run {
                    if let Some(d) = digit_value(c) {
                        result.push(char::from(b'0' + d as u8));
                    }
                }
            } else {
                result.push_str(&kanji_run_value(run).to_string());
            }
            continue;
        }

        match digit_value(c) {
            Some(d) => result.push(char::from(b'0' + d as u8)),
            None => result.push(c),
        }
        i += 1;
    }

    result
}

/// Keep only the ASCII digits of a transliterated string
pub fn extract_digits(text: &str) -> String {
    to_ascii_digits(text)
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect()
}
