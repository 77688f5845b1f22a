//! Command tokenizer
//!
//! Splits a command string into an argument vector. Arguments are separated
//! by spaces; `"double quoted"` text is kept as one argument and `""` inside
//! quotes stands for a literal double quote.

const SEPARATOR: char = ' ';
const QUOTE: char = '"';

/// Split a command into its argument vector.
///
/// Never fails: unbalanced quotes degrade into a best-effort split and an
/// all-whitespace command yields an empty vector.
pub fn tokenize(command: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quote = false;
    let mut chars = command.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            QUOTE if in_quote => match chars.peek() {
                Some(&QUOTE) => {
                    current.push(QUOTE);
                    chars.next();
                }
                Some(&SEPARATOR) | None => in_quote = false,
                Some(_) => {
                    push_token(&mut tokens, &mut current);
                    in_quote = false;
                }
            },
            QUOTE => in_quote = true,
            SEPARATOR | '\n' if !in_quote => push_token(&mut tokens, &mut current),
            _ => current.push(c),
        }
    }

    push_token(&mut tokens, &mut current);
    tokens
}

// Only non-empty text becomes a token.
fn push_token(tokens: &mut Vec<String>, current: &mut String) {
    if !current.is_empty() {
        tokens.push(std::mem::take(current));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_plain_words() {
        assert_eq!(tokenize("echo hello"), vec!["echo", "hello"]);
    }

    #[test]
    fn test_runs_of_separators_collapse() {
        assert_eq!(tokenize("  a   b  "), vec!["a", "b"]);
        assert_eq!(tokenize("a\n\nb"), vec!["a", "b"]);
    }

    #[test]
    fn test_quoted_argument() {
        assert_eq!(tokenize("a \"b c\" d"), vec!["a", "b c", "d"]);
    }

    #[test]
    fn test_newline_kept_inside_quotes() {
        assert_eq!(tokenize("printf \"x\ny\""), vec!["printf", "x\ny"]);
    }

    #[test]
    fn test_escaped_quote() {
        assert_eq!(tokenize("\"x\"\"y\""), vec!["x\"y"]);
        assert_eq!(tokenize("a \"\"\"\" b"), vec!["a", "\"", "b"]);
    }

    #[test]
    fn test_escape_stays_in_quote_mode() {
        assert_eq!(tokenize("\"a\"\"b c\""), vec!["a\"b c"]);
    }

    #[test]
    fn test_closing_quote_before_text_ends_token() {
        assert_eq!(tokenize("\"ab\"cd"), vec!["ab", "cd"]);
    }

    #[test]
    fn test_empty_quotes_produce_nothing() {
        assert!(tokenize("\"\"").is_empty());
        assert_eq!(tokenize("a \"\" b"), vec!["a", "b"]);
    }

    #[test]
    fn test_unterminated_quote() {
        assert_eq!(tokenize("sh -c \"echo hi"), vec!["sh", "-c", "echo hi"]);
    }

    #[test]
    fn test_empty_and_blank() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \n  ").is_empty());
    }

    #[test]
    fn test_tabs_are_not_separators() {
        assert_eq!(tokenize("a\tb c"), vec!["a\tb", "c"]);
    }

    proptest! {
        #[test]
        fn prop_unquoted_matches_plain_split(command in "[a-z \\n-]{0,40}") {
            let expected: Vec<String> = command
                .split(|c: char| c == ' ' || c == '\n')
                .filter(|piece| !piece.is_empty())
                .map(String::from)
                .collect();
            prop_assert_eq!(tokenize(&command), expected);
        }

        #[test]
        fn prop_tokens_never_empty(command in "[a-z \"\\n]{0,40}") {
            prop_assert!(tokenize(&command).iter().all(|token| !token.is_empty()));
        }
    }
}
