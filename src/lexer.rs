//! Lexical analysis (tokenization) for the shell's input lines.
//!
//! The language here is deliberately tiny: a line is a sequence of words
//! separated by runs of delimiter characters, with no quoting and no
//! operator syntax.

/// Characters that separate tokens.
///
/// Besides the usual whitespace this includes the carriage return (so lines
/// from files with CRLF endings tokenize cleanly) and the bell character.
pub const DELIMITERS: [char; 5] = [' ', '\t', '\r', '\n', '\u{7}'];

/// Split a line into its argument vector.
///
/// Runs of delimiters count as a single separator and never produce empty
/// tokens, so a blank or all-delimiter line yields an empty vector. The
/// number of tokens is unbounded.
pub fn split_into_tokens(line: &str) -> Vec<String> {
    line.split(|ch| DELIMITERS.contains(&ch))
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_on_single_spaces() {
        assert_eq!(split_into_tokens("echo hello world"), ["echo", "hello", "world"]);
    }

    #[test]
    fn test_runs_of_delimiters_collapse() {
        assert_eq!(
            split_into_tokens("  ls \t\t -l \r\n"),
            ["ls", "-l"]
        );
    }

    #[test]
    fn test_leading_and_trailing_delimiters_produce_no_empty_tokens() {
        let tokens = split_into_tokens("\t cmd arg \n");
        assert_eq!(tokens, ["cmd", "arg"]);
        assert!(tokens.iter().all(|t| !t.is_empty()));
    }

    #[test]
    fn test_empty_line_yields_empty_vector() {
        assert!(split_into_tokens("").is_empty());
    }

    #[test]
    fn test_all_whitespace_line_yields_empty_vector() {
        assert!(split_into_tokens(" \t \r \n \u{7} ").is_empty());
    }

    #[test]
    fn test_every_delimiter_in_the_set_splits() {
        for delim in DELIMITERS {
            let line = format!("a{delim}b");
            assert_eq!(split_into_tokens(&line), ["a", "b"], "delimiter {:?}", delim);
        }
    }

    #[test]
    fn test_split_then_rejoin_is_stable() {
        // Joining with single spaces and re-splitting reproduces the
        // token sequence exactly, whatever the original separators were.
        let line = "one  \ttwo\r\nthree \u{7} four";
        let tokens = split_into_tokens(line);
        let rejoined = tokens.join(" ");
        assert_eq!(split_into_tokens(&rejoined), tokens);
    }
}
