use quiver_core::{Error, Result, Target};

const TARGET_PLACEHOLDER: &str = "{target}";
const OUTPUT_PLACEHOLDER: &str = "{output}";

/// A tokenized command template with `{target}` and `{output}` placeholders.
///
/// The template string is split with shell-word quoting rules once at parse
/// time; placeholders are substituted inside the resulting tokens, so a
/// target or output path containing whitespace stays a single argument and
/// quoted arguments in the template survive substitution.
#[derive(Debug, Clone)]
pub struct CommandTemplate {
    tokens: Vec<String>,
}

impl CommandTemplate {
    /// Parses a template string into shell words.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Template`] for an empty template, unbalanced
    /// quotes, or a trailing backslash.
    pub fn parse(template: &str) -> Result<Self> {
        let tokens = split_words(template)?;
        if tokens.is_empty() {
            return Err(Error::Template("template is empty".to_owned()));
        }
        Ok(Self { tokens })
    }

    /// Renders the argument vector for one target.
    #[must_use]
    pub fn render(&self, target: &Target) -> Vec<String> {
        let output = target.output.to_string_lossy();
        self.tokens
            .iter()
            .map(|token| {
                token
                    .replace(TARGET_PLACEHOLDER, &target.ident)
                    .replace(OUTPUT_PLACEHOLDER, &output)
            })
            .collect()
    }

    /// The parsed tokens, placeholders intact.
    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

/// Splits a command line into words with POSIX-style quoting: whitespace
/// separates words, single quotes preserve their content literally, double
/// quotes group words and honor backslash escapes for `"` and `\`, and a
/// bare backslash escapes the next character.
fn split_words(input: &str) -> Result<Vec<String>> {
    enum Quote {
        None,
        Single,
        Double,
    }

    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote = Quote::None;
    let mut chars = input.chars();

    while let Some(ch) = chars.next() {
        match quote {
            Quote::Single => {
                if ch == '\'' {
                    quote = Quote::None;
                } else {
                    current.push(ch);
                }
            }
            Quote::Double => match ch {
                '"' => quote = Quote::None,
                '\\' => match chars.next() {
                    Some(escaped @ ('"' | '\\')) => current.push(escaped),
                    Some(other) => {
                        current.push('\\');
                        current.push(other);
                    }
                    None => {
                        return Err(Error::Template("trailing backslash".to_owned()));
                    }
                },
                _ => current.push(ch),
            },
            Quote::None => match ch {
                '\'' => {
                    quote = Quote::Single;
                    in_word = true;
                }
                '"' => {
                    quote = Quote::Double;
                    in_word = true;
                }
                '\\' => {
                    let Some(escaped) = chars.next() else {
                        return Err(Error::Template("trailing backslash".to_owned()));
                    };
                    current.push(escaped);
                    in_word = true;
                }
                c if c.is_whitespace() => {
                    if in_word {
                        words.push(std::mem::take(&mut current));
                        in_word = false;
                    }
                }
                c => {
                    current.push(c);
                    in_word = true;
                }
            },
        }
    }

    if !matches!(quote, Quote::None) {
        return Err(Error::Template("unbalanced quote".to_owned()));
    }
    if in_word {
        words.push(current);
    }

    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(template: &str, ident: &str, output: &str) -> Vec<String> {
        CommandTemplate::parse(template)
            .unwrap()
            .render(&Target::new(ident, output))
    }

    #[test]
    fn test_basic_substitution() {
        let args = render("scan {target} -o {output}", "10.0.0.1", "/tmp/out.txt");
        assert_eq!(args, vec!["scan", "10.0.0.1", "-o", "/tmp/out.txt"]);
    }

    #[test]
    fn test_whitespace_in_target_stays_one_argument() {
        let args = render("scan {target} -o {output}", "a b c", "/tmp/out dir/x");
        assert_eq!(args, vec!["scan", "a b c", "-o", "/tmp/out dir/x"]);
    }

    #[test]
    fn test_quoted_template_arguments_survive() {
        let args = render(
            "nmap --script \"default and safe\" -oN {output} {target}",
            "10.0.0.1",
            "/tmp/out",
        );
        assert_eq!(
            args,
            vec!["nmap", "--script", "default and safe", "-oN", "/tmp/out", "10.0.0.1"]
        );
    }

    #[test]
    fn test_single_quotes_are_literal() {
        let args = render("sh -c 'echo {target} > {output}'", "host", "/tmp/o");
        assert_eq!(args, vec!["sh", "-c", "echo host > /tmp/o"]);
    }

    #[test]
    fn test_placeholder_inside_quoted_word() {
        let args = render("tool --label \"run for {target}\"", "x", "/o");
        assert_eq!(args, vec!["tool", "--label", "run for x"]);
    }

    #[test]
    fn test_empty_template_rejected() {
        assert!(matches!(
            CommandTemplate::parse("   "),
            Err(Error::Template(_))
        ));
    }

    #[test]
    fn test_unbalanced_quote_rejected() {
        assert!(matches!(
            CommandTemplate::parse("scan \"oops {target}"),
            Err(Error::Template(_))
        ));
        assert!(matches!(
            CommandTemplate::parse("scan 'oops"),
            Err(Error::Template(_))
        ));
    }

    #[test]
    fn test_trailing_backslash_rejected() {
        assert!(matches!(
            CommandTemplate::parse("scan {target} \\"),
            Err(Error::Template(_))
        ));
    }

    #[test]
    fn test_backslash_escapes_space() {
        let args = render("scan long\\ name {target}", "t", "/o");
        assert_eq!(args, vec!["scan", "long name", "t"]);
    }

    #[test]
    fn test_template_without_placeholders_is_accepted() {
        let template = CommandTemplate::parse("tool --version").unwrap();
        assert_eq!(template.tokens(), ["tool", "--version"]);
    }
}
