/*!
 * Assembly of classified outcomes into the final document
 */

use crate::types::{BundleFileLists, BundleResult, BundleStats, Outcome, SkippedFile};
use crate::utils::SEPARATOR;

/// Replace every CRLF pair with a bare LF
///
/// Lone CR characters are left alone.
pub fn normalize_line_endings(content: &str) -> String {
    content.replace("\r\n", "\n")
}

/// Format one included file as `<label>:\n<content>`
///
/// `content` is expected to be normalized already.
pub fn format_block(label: &str, content: &str) -> String {
    format!("{}:\n{}", label, content)
}

/// Build the result for `outcomes`, keeping their order everywhere
pub fn assemble(outcomes: Vec<Outcome>) -> BundleResult {
    let total = outcomes.len();
    let mut blocks = Vec::new();
    let mut files = BundleFileLists::default();

    for outcome in outcomes {
        match outcome {
            Outcome::Included { label, content } => {
                blocks.push(format_block(&label, &content));
                files.included.push(label);
            }
            Outcome::Skipped { label, reason } => {
                files.skipped.push(SkippedFile {
                    path: label,
                    reason,
                });
            }
        }
    }

    BundleResult {
        output: blocks.join(SEPARATOR),
        stats: BundleStats {
            included: files.included.len(),
            skipped: files.skipped.len(),
            total,
        },
        files,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SkipReason;

    fn included(label: &str, content: &str) -> Outcome {
        Outcome::Included {
            label: label.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_normalize_line_endings() {
        assert_eq!(normalize_line_endings("line1\r\nline2"), "line1\nline2");
        assert_eq!(normalize_line_endings("a\rb\r\r\nc"), "a\rb\r\nc");
    }

    #[test]
    fn test_blocks_joined_without_trailing_separator() {
        let result = assemble(vec![
            included("a.txt", "alpha\n"),
            Outcome::Skipped {
                label: "b.png".to_string(),
                reason: SkipReason::IgnoredExtension,
            },
            included("c/d.txt", "delta"),
        ]);

        assert_eq!(result.output, "a.txt:\nalpha\n\n\n--\n\nc/d.txt:\ndelta");
        assert_eq!(
            result.stats,
            BundleStats {
                included: 2,
                skipped: 1,
                total: 3
            }
        );
        assert_eq!(result.files.included, vec!["a.txt", "c/d.txt"]);
        assert_eq!(
            result.files.skipped,
            vec![SkippedFile {
                path: "b.png".to_string(),
                reason: SkipReason::IgnoredExtension,
            }]
        );
    }

    #[test]
    fn test_empty_outcomes() {
        let result = assemble(Vec::new());
        assert_eq!(result.output, "");
        assert_eq!(result.stats, BundleStats::default());
    }

    #[test]
    fn test_single_empty_file() {
        let result = assemble(vec![included("empty.txt", "")]);
        assert_eq!(result.output, "empty.txt:\n");
    }

    #[test]
    fn test_result_serializes_to_wire_shape() {
        let result = assemble(vec![
            included("a.txt", "x"),
            Outcome::Skipped {
                label: "big.log".to_string(),
                reason: SkipReason::TooLarge,
            },
        ]);

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "output": "a.txt:\nx",
                "stats": { "included": 1, "skipped": 1, "total": 2 },
                "files": {
                    "included": ["a.txt"],
                    "skipped": [{ "path": "big.log", "reason": "too large" }]
                }
            })
        );
    }
}
