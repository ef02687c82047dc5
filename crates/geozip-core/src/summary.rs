//! Summary of one column of the dataset: its distinct values in sorted
//! order, plus the number of records.

use std::collections::BTreeSet;
use std::fmt;

use tracing::warn;

use crate::models::Column;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Distinct column values, ascending
    pub values: Vec<String>,
    /// Every line of the dataset, including ones lacking the column
    pub total: usize,
    /// Lines too short to contain the column
    pub skipped: usize,
}

impl Summary {
    pub fn from_lines<S: AsRef<str>>(lines: &[S], column: Column) -> Self {
        let mut values = BTreeSet::new();
        let mut skipped = 0;

        for line in lines {
            match column.get(line.as_ref()) {
                Some(value) => {
                    values.insert(value);
                }
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            warn!(
                skipped,
                column = ?column,
                "Records without the summary column were left out"
            );
        }

        Self {
            values: values.into_iter().map(str::to_owned).collect(),
            total: lines.len(),
            skipped,
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.values.join(", "))?;
        write!(f, "{} entries to be exact", self.total)
    }
}
