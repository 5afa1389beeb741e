/// Characters that separate words on a command line.
pub const WORD_SEPARATORS: &str = " \t\r\n";

/// Characters that always form a word of their own.
pub const SPECIAL_CHARS: &str = "!><|";

/// Splits `line` into words.
///
/// Runs of `separators` delimit words and are dropped. Any character in
/// `special_chars` becomes a one-character word even when it touches other
/// word characters, so `ls!3` splits into `ls`, `!` and `3`. Never yields an
/// empty word.
pub fn tokenize(line: &str, separators: &str, special_chars: &str) -> Vec<String> {
    let is_separator = |c: char| return separators.contains(c);
    let is_special = |c: char| return special_chars.contains(c);

    let mut tokens = Vec::new();
    let mut rest = line;

    loop {
        rest = rest.trim_start_matches(is_separator);

        let Some(first) = rest.chars().next() else {
            break;
        };

        let length = if is_special(first) {
            first.len_utf8()
        } else {
            rest.find(|c: char| return is_separator(c) || is_special(c))
                .unwrap_or(rest.len())
        };

        let (token, remainder) = rest.split_at(length);
        tokens.push(token.to_string());
        rest = remainder;
    }

    return tokens;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(line: &str) -> Vec<String> {
        return tokenize(line, WORD_SEPARATORS, SPECIAL_CHARS);
    }

    #[test]
    fn splits_on_separator_runs() {
        assert_eq!(words("  ls \t -l\t/tmp \n"), vec!["ls", "-l", "/tmp"]);
    }

    #[test]
    fn special_chars_stand_alone() {
        assert_eq!(words("ls!3"), vec!["ls", "!", "3"]);
        assert_eq!(words("cat<in>out"), vec!["cat", "<", "in", ">", "out"]);
        assert_eq!(words("a|b"), vec!["a", "|", "b"]);
    }

    #[test]
    fn only_special_chars() {
        assert_eq!(words("!><|"), vec!["!", ">", "<", "|"]);
        assert_eq!(words("!!"), vec!["!", "!"]);
    }

    #[test]
    fn only_separators_is_empty() {
        assert!(words("").is_empty());
        assert!(words(" \t\r\n  ").is_empty());
    }

    #[test]
    fn never_yields_empty_words() {
        for line in ["! 2", "  !  ", "a  !b ! c", ">>x", "\t|\t"] {
            assert!(words(line).iter().all(|word| return !word.is_empty()));
        }
    }

    #[test]
    fn rejoined_words_collapse_separators() {
        let tokens = words("echo   hello\t\tworld");
        assert_eq!(tokens.join(" "), "echo hello world");
    }

    #[test]
    fn splits_search_path() {
        assert_eq!(
            tokenize("/bin::/usr/bin:", ":", ""),
            vec!["/bin", "/usr/bin"]
        );
    }

    #[test]
    fn handles_multibyte_words() {
        assert_eq!(words("échó ünï!x"), vec!["échó", "ünï", "!", "x"]);
    }
}
