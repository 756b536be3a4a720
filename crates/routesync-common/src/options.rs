//! Driver configuration.

use serde::Deserialize;

/// Runtime options consumed by the driver at construction.
///
/// Both flags default to `false`, so a missing section in an embedding
/// program's configuration means "apply changes, plain output".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DriverOptions {
    /// Log intended changes without calling any mutating provider API.
    pub dry_run: bool,
    /// Paint route diffs with ANSI colours.
    pub color: bool,
}

impl DriverOptions {
    /// Sets dry-run mode.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Sets coloured diff output.
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let options = DriverOptions::default();
        assert!(!options.dry_run);
        assert!(!options.color);
    }

    #[test]
    fn test_builder() {
        let options = DriverOptions::default().with_dry_run(true).with_color(true);
        assert_eq!(
            options,
            DriverOptions {
                dry_run: true,
                color: true
            }
        );
    }

    #[test]
    fn test_deserialize_partial() {
        let options: DriverOptions = serde_json::from_str(r#"{"dry_run": true}"#).unwrap();
        assert!(options.dry_run);
        assert!(!options.color);

        let options: DriverOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, DriverOptions::default());
    }
}
