//! Tokenizer for console input lines.
//!
//! Splits a line into a lowercase command name and a list of arguments.
//! Whitespace inside a pair of double quotes belongs to the argument, and the
//! quote characters themselves are stripped from the result.

/// Result of tokenizing a command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizedCommand<'a> {
    /// The command name (first token, lowercased).
    pub command: String,
    /// The arguments, with enclosing quotes removed.
    pub args: Vec<String>,
    /// The trimmed input line.
    pub raw: &'a str,
}

/// Tokenize error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenizeError {
    /// Input was empty after trimming.
    EmptyInput,
}

impl std::fmt::Display for TokenizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenizeError::EmptyInput => write!(f, "empty input"),
        }
    }
}

impl std::error::Error for TokenizeError {}

/// Tokenize a command line into command name and arguments.
///
/// # Syntax
///
/// - The first whitespace-delimited token is the command name, lowercased
/// - Remaining tokens are separated by whitespace
/// - Double-quoted sections keep their whitespace; the quotes are dropped
/// - A lone empty argument (`cmd ""`) counts as no arguments at all
///
/// An unmatched `"` is not an error. The argument text is then split on
/// whitespace literally and any quote characters are removed.
///
/// # Examples
///
/// ```
/// use bevy_command_console::core::tokenize;
///
/// let result = tokenize(r#"test "a b" 3"#).unwrap();
/// assert_eq!(result.command, "test");
/// assert_eq!(result.args, vec!["a b", "3"]);
///
/// let result = tokenize("HELP 2").unwrap();
/// assert_eq!(result.command, "help");
/// assert_eq!(result.args, vec!["2"]);
/// ```
pub fn tokenize(input: &str) -> Result<TokenizedCommand<'_>, TokenizeError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(TokenizeError::EmptyInput);
    }

    let (command, rest) = match trimmed.find(char::is_whitespace) {
        Some(pos) => (&trimmed[..pos], trimmed[pos..].trim_start()),
        None => (trimmed, ""),
    };

    let mut args = split_arguments(rest);
    if args.len() == 1 && args[0].is_empty() {
        args.clear();
    }

    Ok(TokenizedCommand {
        command: command.to_lowercase(),
        args,
        raw: trimmed,
    })
}

/// Split an argument string on whitespace, honouring double quotes.
///
/// Lower-level function used by [`tokenize`]; it does not treat the first
/// token specially.
pub fn split_arguments(input: &str) -> Vec<String> {
    if input.matches('"').count() % 2 != 0 {
        return input
            .split_whitespace()
            .map(|token| token.replace('"', ""))
            .collect();
    }

    let mut args = Vec::new();
    let mut current = String::new();
    // Distinguishes `""` (an empty argument) from no token at all.
    let mut in_token = false;
    let mut in_quotes = false;

    for c in input.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                in_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if in_token {
                    args.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if in_token {
        args.push(current);
    }

    args
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_simple() {
        let result = tokenize("echo hello world").unwrap();
        assert_eq!(result.command, "echo");
        assert_eq!(result.args, vec!["hello", "world"]);
    }

    #[test]
    fn test_tokenize_no_args() {
        let result = tokenize("qqq").unwrap();
        assert_eq!(result.command, "qqq");
        assert!(result.args.is_empty());
    }

    #[test]
    fn test_tokenize_quoted_argument() {
        let result = tokenize(r#"test "a b" 3"#).unwrap();
        assert_eq!(result.command, "test");
        assert_eq!(result.args, vec!["a b", "3"]);
    }

    #[test]
    fn test_tokenize_lowercases_command_only() {
        let result = tokenize("FindCmd Help").unwrap();
        assert_eq!(result.command, "findcmd");
        assert_eq!(result.args, vec!["Help"]);
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(matches!(tokenize(""), Err(TokenizeError::EmptyInput)));
        assert!(matches!(tokenize("   "), Err(TokenizeError::EmptyInput)));
        assert!(matches!(tokenize("\t\n"), Err(TokenizeError::EmptyInput)));
    }

    #[test]
    fn test_tokenize_single_empty_argument_is_absent() {
        let result = tokenize(r#"help """#).unwrap();
        assert_eq!(result.command, "help");
        assert!(result.args.is_empty());
    }

    #[test]
    fn test_tokenize_empty_argument_among_others_is_kept() {
        let result = tokenize(r#"say "" x"#).unwrap();
        assert_eq!(result.args, vec!["", "x"]);
    }

    #[test]
    fn test_tokenize_extra_whitespace() {
        let result = tokenize("  echo   hello    world  ").unwrap();
        assert_eq!(result.command, "echo");
        assert_eq!(result.args, vec!["hello", "world"]);
        assert_eq!(result.raw, "echo   hello    world");
    }

    #[test]
    fn test_tokenize_quotes_inside_token() {
        // Quotes join the surrounding text into one argument
        let result = tokenize(r#"say pre"fix suf"fix"#).unwrap();
        assert_eq!(result.args, vec!["prefix suffix"]);
    }

    #[test]
    fn test_tokenize_unmatched_quote_falls_back() {
        let result = tokenize(r#"say "hello world"#).unwrap();
        assert_eq!(result.command, "say");
        assert_eq!(result.args, vec!["hello", "world"]);
    }

    #[test]
    fn test_tokenize_numbers() {
        let result = tokenize("test s -3 800.5 TRUE").unwrap();
        assert_eq!(result.args, vec!["s", "-3", "800.5", "TRUE"]);
    }

    #[test]
    fn test_split_arguments_empty() {
        assert!(split_arguments("").is_empty());
        assert!(split_arguments("   ").is_empty());
    }
}
