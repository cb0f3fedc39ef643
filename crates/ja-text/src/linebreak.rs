//! Line breaking utilities for Japanese text (禁則処理)

/// Check if a character may not begin a line
///
/// Closing brackets, sentence punctuation, the prolonged sound mark,
/// iteration marks and small kana.
pub fn is_line_start_prohibited(c: char) -> bool {
    matches!(
        c,
        '、' | '。'
            | '，'
            | '．'
            | ','
            | '.'
            | '）'
            | ')'
            | '」'
            | '』'
            | '】'
            | '〕'
            | '〉'
            | '》'
            | '］'
            | '｝'
            | '！'
            | '？'
            | '!'
            | '?'
            | '：'
            | '；'
            | 'ー'
            | '々'
            | 'ゝ'
            | 'ゞ'
            | '・'
            | 'ぁ'
            | 'ぃ'
            | 'ぅ'
            | 'ぇ'
            | 'ぉ'
            | 'っ'
            | 'ゃ'
            | 'ゅ'
            | 'ょ'
            | 'ゎ'
            | 'ァ'
            | 'ィ'
            | 'ゥ'
            | 'ェ'
            | 'ォ'
            | 'ッ'
            | 'ャ'
            | 'ュ'
            | 'ョ'
            | 'ヮ'
    )
}

/// Check if a character may not end a line (opening brackets)
pub fn is_line_end_prohibited(c: char) -> bool {
    matches!(
        c,
        '（' | '(' | '「' | '『' | '【' | '〔' | '〈' | '《' | '［' | '｛'
    )
}

/// Check if breaking between two characters is allowed
///
/// Returns true if a line break is allowed between `left` and `right`.
pub fn can_break_between(left: char, right: char) -> bool {
    if is_line_start_prohibited(right) {
        return false;
    }

    if is_line_end_prohibited(left) {
        return false;
    }

    // Keep runs of ASCII letters and digits together
    !(left.is_ascii_alphanumeric() && right.is_ascii_alphanumeric())
}

/// Wrap text into lines that fit `max_width`
///
/// `advance` returns the width of a single character in the same units as
/// `max_width`. Explicit `\n` always starts a new line, and an empty
/// paragraph yields an empty line. A line is never left empty because of a
/// wide character; an unbreakable run wider than `max_width` is split at
/// the character that overflows.
pub fn wrap_by_width<F>(text: &str, max_width: f64, advance: F) -> Vec<String>
where
    F: Fn(char) -> f64,
{
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let paragraph = paragraph.strip_suffix('\r').unwrap_or(paragraph);
        wrap_paragraph(paragraph, max_width, &advance, &mut lines);
    }

    lines
}

fn wrap_paragraph<F>(paragraph: &str, max_width: f64, advance: &F, lines: &mut Vec<String>)
where
    F: Fn(char) -> f64,
{
    let chars: Vec<char> = paragraph.chars().collect();
    if chars.is_empty() {
        lines.push(String::new());
        return;
    }

    let mut line: Vec<char> = Vec::new();
    let mut width = 0.0;

    for &c in &chars {
        let w = advance(c);
        if line.is_empty() || width + w <= max_width {
            line.push(c);
            width += w;
            continue;
        }

        // Find the last position in the line where a break is allowed
        let mut split = line.len();
        let mut next = c;
        while split > 0 && !can_break_between(line[split - 1], next) {
            next = line[split - 1];
            split -= 1;
        }

        // No legal break point, or the carried tail would overflow again;
        // break before the overflowing char
        let carried_width: f64 = line[split..].iter().map(|&ch| advance(ch)).sum::<f64>() + w;
        if split == 0 || carried_width > max_width {
            split = line.len();
        }

        let carried: Vec<char> = line.split_off(split);
        lines.push(line.iter().collect());

        line = carried;
        line.push(c);
        width = line.iter().map(|&c| advance(c)).sum();
    }

    lines.push(line.iter().collect());
}

/// Find safe break points in text
///
/// Returns character indices where line breaks are allowed.
pub fn find_break_points(text: &str) -> Vec<usize> {
    let chars: Vec<char> = text.chars().collect();
    let mut break_points = vec![0];

    for i in 1..chars.len() {
        if can_break_between(chars[i - 1], chars[i]) {
            break_points.push(i);
        }
    }

    break_points.push(chars.len());
    break_points
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn unit(_: char) -> f64 {
        1.0
    }

    #[test]
    fn test_no_break_before_closing_punctuation() {
        assert!(!can_break_between('会', '。'));
        assert!(!can_break_between('し', 'ょ'));
        assert!(!can_break_between('ス', 'ー'));
    }

    #[test]
    fn test_no_break_after_opening_bracket() {
        assert!(!can_break_between('「', '総'));
        assert!(can_break_between('」', '総'));
    }

    #[test]
    fn test_break_between_kanji() {
        assert!(can_break_between('入', '学'));
    }

    #[test]
    fn test_no_break_inside_ascii_word() {
        assert!(!can_break_between('P', 'T'));
        assert!(can_break_between('A', '会'));
    }

    #[test]
    fn test_wrap_fixed_width() {
        let lines = wrap_by_width("あいうえおかきくけこ", 4.0, unit);
        assert_eq!(lines, vec!["あいうえ", "おかきく", "けこ"]);
    }

    #[test]
    fn test_wrap_moves_char_before_prohibited_start() {
        // "。" may not start a line, so "た" is carried with it
        let lines = wrap_by_width("しました。", 4.0, unit);
        assert_eq!(lines, vec!["しまし", "た。"]);
    }

    #[test]
    fn test_wrap_explicit_newlines() {
        let lines = wrap_by_width("総会\n\n反省会", 10.0, unit);
        assert_eq!(lines, vec!["総会", "", "反省会"]);
    }

    #[test]
    fn test_wrap_empty_text() {
        let lines = wrap_by_width("", 10.0, unit);
        assert_eq!(lines, vec![""]);
    }

    #[test]
    fn test_wrap_unbreakable_run_is_split() {
        let lines = wrap_by_width("ABCDEFG", 3.0, unit);
        assert_eq!(lines, vec!["ABC", "DEF", "G"]);
    }

    #[test]
    fn test_wrap_wide_char_never_leaves_empty_line() {
        let lines = wrap_by_width("総会", 0.5, unit);
        assert_eq!(lines, vec!["総", "会"]);
    }

    #[test]
    fn test_wrap_backoff_never_overflows_next_line() {
        let advance = |c: char| match c {
            'a' => 0.5,
            '「' => 1.25,
            _ => 1.0,
        };

        let lines = wrap_by_width("a「「「", 3.0, advance);
        assert_eq!(lines, vec!["a「「", "「"]);

        for line in wrap_by_width("a「「「「あ「「「", 3.0, advance) {
            let width: f64 = line.chars().map(advance).sum();
            assert!(line.chars().count() == 1 || width <= 3.0, "{line:?} is {width} wide");
        }
    }

    #[test]
    fn test_find_break_points() {
        assert_eq!(find_break_points("総会。"), vec![0, 1, 3]);
        assert_eq!(find_break_points(""), vec![0, 0]);
    }
}
