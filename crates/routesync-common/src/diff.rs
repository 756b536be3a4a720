//! Line diffs between two route attribute sets.
//!
//! Both sides are rendered as YAML so every attribute lands on its own line,
//! then compared with a longest-common-subsequence walk. The result is kept
//! structured ([`RouteDiff`]) so log sinks can inspect it, and rendered to
//! unified-style text for humans.

use crate::color::Color;
use serde::Serialize;

/// Kind of a diff line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffLineKind {
    /// Present on both sides.
    Context,
    /// Only on the old side.
    Removed,
    /// Only on the new side.
    Added,
}

impl DiffLineKind {
    fn prefix(&self) -> char {
        match self {
            DiffLineKind::Context => ' ',
            DiffLineKind::Removed => '-',
            DiffLineKind::Added => '+',
        }
    }

    fn color(&self) -> Option<Color> {
        match self {
            DiffLineKind::Context => None,
            DiffLineKind::Removed => Some(Color::Red),
            DiffLineKind::Added => Some(Color::Green),
        }
    }
}

/// One line of a diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    pub kind: DiffLineKind,
    pub text: String,
}

impl DiffLine {
    fn new(kind: DiffLineKind, text: &str) -> Self {
        Self {
            kind,
            text: text.to_string(),
        }
    }
}

/// Structured diff between an old and a new value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteDiff {
    lines: Vec<DiffLine>,
}

impl RouteDiff {
    /// Diffs the YAML renderings of `old` and `new`.
    pub fn between<T: Serialize + ?Sized>(old: &T, new: &T) -> Result<Self, serde_yaml::Error> {
        let old_yaml = serde_yaml::to_string(old)?;
        let new_yaml = serde_yaml::to_string(new)?;

        let old_lines: Vec<&str> = old_yaml.lines().collect();
        let new_lines: Vec<&str> = new_yaml.lines().collect();

        Ok(Self {
            lines: diff_lines(&old_lines, &new_lines),
        })
    }

    /// Returns the diff lines in order.
    pub fn lines(&self) -> &[DiffLine] {
        &self.lines
    }

    /// Returns true if any line was added or removed.
    pub fn has_changes(&self) -> bool {
        self.lines
            .iter()
            .any(|line| line.kind != DiffLineKind::Context)
    }

    /// Renders the diff as text, one prefixed line per entry.
    ///
    /// With `color`, removed lines are red and added lines green.
    pub fn render(&self, color: bool) -> String {
        self.lines
            .iter()
            .map(|line| {
                let text = format!("{}{}", line.kind.prefix(), line.text);
                match line.kind.color() {
                    Some(c) if color => c.paint(&text),
                    _ => text,
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn diff_lines(old: &[&str], new: &[&str]) -> Vec<DiffLine> {
    let (n, m) = (old.len(), new.len());

    // lcs[i][j] = length of the LCS of old[i..] and new[j..]
    let mut lcs = vec![vec![0usize; m + 1]; n + 1];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            lcs[i][j] = if old[i] == new[j] {
                lcs[i + 1][j + 1] + 1
            } else {
                lcs[i + 1][j].max(lcs[i][j + 1])
            };
        }
    }

    let mut lines = Vec::with_capacity(n.max(m));
    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if old[i] == new[j] {
            lines.push(DiffLine::new(DiffLineKind::Context, old[i]));
            i += 1;
            j += 1;
        } else if lcs[i + 1][j] >= lcs[i][j + 1] {
            lines.push(DiffLine::new(DiffLineKind::Removed, old[i]));
            i += 1;
        } else {
            lines.push(DiffLine::new(DiffLineKind::Added, new[j]));
            j += 1;
        }
    }
    lines.extend(old[i..].iter().map(|l| DiffLine::new(DiffLineKind::Removed, l)));
    lines.extend(new[j..].iter().map(|l| DiffLine::new(DiffLineKind::Added, l)));

    lines
}
