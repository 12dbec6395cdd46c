//! Duplicate-line tally with stable output order.

use rustc_hash::FxHashMap;

/// Counts identical lines while remembering first-occurrence order.
///
/// ```
/// use drunkala::triggers::LineTally;
///
/// let mut tally = LineTally::new();
/// tally.extend(["bob: drink", "ann: cheer", "bob: drink"].map(String::from));
/// assert_eq!(tally.render(), "bob: drink ×2\nann: cheer");
/// ```
#[derive(Clone, Debug, Default)]
pub struct LineTally {
    lines: Vec<(String, usize)>,
    index: FxHashMap<String, usize>,
}

impl LineTally {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of a line.
    pub fn push(&mut self, line: String) {
        match self.index.get(&line) {
            Some(&slot) => self.lines[slot].1 += 1,
            None => {
                self.index.insert(line.clone(), self.lines.len());
                self.lines.push((line, 1));
            }
        }
    }

    /// Distinct lines seen so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Distinct lines with their counts, in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.lines.iter().map(|(l, n)| (l.as_str(), *n))
    }

    /// One row per distinct line, repeated lines suffixed with `×N`,
    /// joined with newlines.
    #[must_use]
    pub fn render(&self) -> String {
        self.iter()
            .map(|(line, count)| {
                if count > 1 {
                    format!("{line} ×{count}")
                } else {
                    line.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Extend<String> for LineTally {
    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        for line in iter {
            self.push(line);
        }
    }
}
