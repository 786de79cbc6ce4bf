//! Compilation of turnip-style phrases into anchored matchers.
//!
//! A phrase such as `I make request :method :uri` contains placeholders
//! (`:` followed by a word). Each placeholder captures a double-quoted
//! string, a single-quoted string, or a run of non-blank characters. All
//! other text must match literally, and the whole step must match.

use regex::Regex;

use super::StepError;

const PLACEHOLDER: &str = r#"(?:"([^"]*)"|'([^']*)'|([^\s"']+))"#;
const GROUPS_PER_PLACEHOLDER: usize = 3;

/// A compiled step phrase.
#[derive(Debug, Clone)]
pub struct StepPattern {
    phrase: &'static str,
    placeholders: Vec<&'static str>,
    regex: Regex,
}

impl StepPattern {
    /// Compile `phrase`.
    ///
    /// # Errors
    ///
    /// Returns [`StepError::InvalidPhrase`] when the generated expression does
    /// not compile.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use restapi_steps::steps::StepPattern;
    ///
    /// let pattern = StepPattern::compile("I make request :method :uri")?;
    /// let args = pattern.captures(r#"I make request GET "/users/1""#);
    /// assert_eq!(args, Some(vec!["GET".to_owned(), "/users/1".to_owned()]));
    /// # Ok::<(), restapi_steps::steps::StepError>(())
    /// ```
    pub fn compile(phrase: &'static str) -> Result<Self, StepError> {
        let mut source = String::from("^");
        let mut placeholders = Vec::new();
        let mut rest = phrase;
        while let Some((literal, name, tail)) = next_placeholder(rest) {
            source.push_str(&regex::escape(literal));
            source.push_str(PLACEHOLDER);
            placeholders.push(name);
            rest = tail;
        }
        source.push_str(&regex::escape(rest));
        source.push('$');
        let regex = Regex::new(&source).map_err(|err| StepError::InvalidPhrase {
            phrase: phrase.to_owned(),
            reason: err.to_string(),
        })?;
        Ok(Self {
            phrase,
            placeholders,
            regex,
        })
    }

    /// The phrase as declared.
    #[must_use]
    pub const fn phrase(&self) -> &'static str {
        self.phrase
    }

    /// Placeholder names in order of appearance.
    #[must_use]
    pub fn placeholders(&self) -> &[&'static str] {
        &self.placeholders
    }

    /// Match `text` and return the captured arguments with quotes removed.
    #[must_use]
    pub fn captures(&self, text: &str) -> Option<Vec<String>> {
        let found = self.regex.captures(text)?;
        let args = (0..self.placeholders.len())
            .map(|index| {
                let first = index * GROUPS_PER_PLACEHOLDER + 1;
                (first..first + GROUPS_PER_PLACEHOLDER)
                    .find_map(|group| found.get(group))
                    .map_or_else(String::new, |m| m.as_str().to_owned())
            })
            .collect();
        Some(args)
    }
}

/// Split off the text before the next `:word` placeholder.
///
/// Returns `(literal, name, rest)`; a colon not followed by a word character
/// is literal text.
fn next_placeholder(text: &'static str) -> Option<(&'static str, &'static str, &'static str)> {
    let mut search_from = 0;
    loop {
        let offset = text.get(search_from..)?.find(':')? + search_from;
        let literal = text.get(..offset)?;
        let after = text.get(offset + 1..)?;
        let name_len = after
            .find(|c: char| !(c.is_alphanumeric() || c == '_'))
            .unwrap_or(after.len());
        if name_len > 0 {
            let name = after.get(..name_len)?;
            let rest = after.get(name_len..)?;
            return Some((literal, name, rest));
        }
        search_from = offset + 1;
    }
}
