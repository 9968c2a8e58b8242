//! Line classification for ctgui acquisition logs
//!
//! Each input line falls into one of four classes, tried in a fixed order:
//! the acquisition-finished marker, the acquisition-started marker carrying
//! the quoted sample name, a whitespace-separated data triple, or noise.

use crate::types::SINGLE_LABEL;
use regex::Regex;

/// One classified log line
#[derive(Debug, Clone, PartialEq)]
pub enum LogLine {
    /// `Acquisition finished` marker, closes the open label
    Finished,
    /// `SAMPLE ... Acquisition started` marker; `None` when the embedded
    /// name could not be extracted
    Started(Option<String>),
    /// `timestamp index position` data triple (timestamp discarded)
    Data { index: i64, position: f64 },
    /// Anything else; only reported when a label is open
    Unrecognized,
}

/// Classifies raw log lines, holding the compiled sample-name pattern
pub struct LineClassifier {
    label_re: Regex,
}

impl LineClassifier {
    pub fn new() -> Self {
        Self {
            label_re: Regex::new(r#""SAMPLE(.*?)""#).unwrap(),
        }
    }

    pub fn classify(&self, line: &str) -> LogLine {
        if line.contains("Acquisition finished") {
            return LogLine::Finished;
        }
        if line.contains("SAMPLE") && line.contains("Acquisition started") {
            return LogLine::Started(self.extract_label(line));
        }
        if let Some((index, position)) = parse_data_row(line) {
            return LogLine::Data { index, position };
        }
        LogLine::Unrecognized
    }

    /// Pull the sample name out of the quoted `"SAMPLE..."` text. A trailing
    /// `_T` (the tiled-scan suffix) is cut, then framing underscores; an
    /// empty remainder maps to the sentinel label.
    fn extract_label(&self, line: &str) -> Option<String> {
        let caps = self.label_re.captures(line)?;
        let mut name = caps.get(1).map_or("", |m| m.as_str());
        if name.ends_with("_T") {
            name = &name[..name.len() - 2];
        }
        let name = name.trim_matches('_');
        if name.is_empty() {
            Some(SINGLE_LABEL.to_string())
        } else {
            Some(name.to_string())
        }
    }
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse fields 0-2 of a whitespace split as `(timestamp, index, position)`.
/// Extra trailing fields are ignored.
fn parse_data_row(line: &str) -> Option<(i64, f64)> {
    let mut fields = line.split_whitespace();
    let _timestamp = fields.next()?;
    let index = fields.next()?.parse::<i64>().ok()?;
    let position = fields.next()?.parse::<f64>().ok()?;
    Some((index, position))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_markers() {
        let classifier = LineClassifier::new();
        assert_eq!(
            classifier.classify("12:00:01 Acquisition finished."),
            LogLine::Finished
        );
        assert_eq!(
            classifier.classify("12:00:00 \"SAMPLE_scree_1_T\" Acquisition started."),
            LogLine::Started(Some("scree_1".to_string()))
        );
    }

    #[test]
    fn test_classify_data_row() {
        let classifier = LineClassifier::new();
        assert_eq!(
            classifier.classify("12:00:02.123 17 4.25 extra fields ignored"),
            LogLine::Data {
                index: 17,
                position: 4.25
            }
        );
        assert_eq!(
            classifier.classify("12:00:02.123 17"),
            LogLine::Unrecognized
        );
        assert_eq!(
            classifier.classify("12:00:02.123 x 4.25"),
            LogLine::Unrecognized
        );
    }

    #[test]
    fn test_finished_takes_priority() {
        // A pathological line carrying both markers closes the label
        let classifier = LineClassifier::new();
        assert_eq!(
            classifier.classify("\"SAMPLE_a\" Acquisition started after Acquisition finished"),
            LogLine::Finished
        );
    }

    #[test]
    fn test_label_extraction_rules() {
        let classifier = LineClassifier::new();
        let started = |line: &str| match classifier.classify(line) {
            LogLine::Started(name) => name,
            other => panic!("expected start marker, got {:?}", other),
        };

        // Bare SAMPLE yields the sentinel label
        assert_eq!(
            started("\"SAMPLE\" Acquisition started"),
            Some("single".to_string())
        );
        // _T suffix and framing underscores are stripped
        assert_eq!(
            started("\"SAMPLE__bone_2__T\" Acquisition started"),
            Some("bone_2".to_string())
        );
        // Interior underscores survive
        assert_eq!(
            started("\"SAMPLE_foo_bar\" Acquisition started"),
            Some("foo_bar".to_string())
        );
        // No quoted SAMPLE text anywhere: extraction fails
        assert_eq!(started("SAMPLE Acquisition started"), None);
    }
}
