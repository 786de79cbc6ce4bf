//! Gherkin data tables.

use indexmap::IndexMap;

use super::StepError;

/// Rows of cells attached to a step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Build a table from rows of cells.
    #[must_use]
    pub fn new<R, C>(rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = C>,
        C: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    /// Parse pipe-delimited rows such as `| name | Ann |`.
    ///
    /// Blank lines and `#` comments are skipped. Cells are trimmed; `\|`
    /// escapes a literal pipe and `\\` a backslash.
    ///
    /// # Errors
    ///
    /// Returns [`StepError::InvalidTable`] when a line does not start and end
    /// with `|`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use restapi_steps::steps::Table;
    ///
    /// let table = Table::parse("| name | Ann |\n| tags | ['a'] |")?;
    /// assert_eq!(table.rows()[1], ["tags", "['a']"]);
    /// # Ok::<(), restapi_steps::steps::StepError>(())
    /// ```
    pub fn parse(text: &str) -> Result<Self, StepError> {
        let rows = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(parse_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rows })
    }

    /// All rows in order.
    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Interpret a two-column table as an ordered key/value map.
    ///
    /// A repeated key keeps its first position and takes the last value.
    ///
    /// # Errors
    ///
    /// Returns [`StepError::InvalidTable`] when any row does not have exactly
    /// two cells.
    pub fn rows_hash(&self) -> Result<IndexMap<String, String>, StepError> {
        self.rows
            .iter()
            .enumerate()
            .map(|(index, row)| match row.as_slice() {
                [key, value] => Ok((key.clone(), value.clone())),
                cells => Err(StepError::InvalidTable {
                    reason: format!(
                        "row {} has {} cells; expected 2 (name | value)",
                        index + 1,
                        cells.len()
                    ),
                }),
            })
            .collect()
    }
}

fn parse_row(line: &str) -> Result<Vec<String>, StepError> {
    let inner = line
        .strip_prefix('|')
        .and_then(|rest| rest.strip_suffix('|'))
        .ok_or_else(|| StepError::InvalidTable {
            reason: format!("row '{line}' must start and end with '|'"),
        })?;
    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(escaped @ ('|' | '\\')) => cell.push(escaped),
                Some(other) => {
                    cell.push('\\');
                    cell.push(other);
                }
                None => cell.push('\\'),
            },
            '|' => cells.push(std::mem::take(&mut cell).trim().to_owned()),
            other => cell.push(other),
        }
    }
    cells.push(cell.trim().to_owned());
    Ok(cells)
}
