//! OCR client wrapping the `tesseract` CLI tool.

use std::process::{Command, Output};

use serde_json::{Value, json};

use super::OcrClient;
use crate::prelude::*;

/// OCR client wrapping the `tesseract` CLI tool.
///
/// Results follow tesseract's word-level TSV data: one list per page, each
/// detection of the form `[[left, top, width, height], [text, confidence]]`
/// with the confidence scaled to `0.0..=1.0`.
#[non_exhaustive]
pub struct TesseractClient {}

impl TesseractClient {
    /// Create a new `tesseract` client.
    pub fn new() -> Self {
        Self {}
    }
}

impl OcrClient for TesseractClient {
    #[instrument(level = "debug", skip(self))]
    fn ocr(&self, document_path: &str, cls: bool) -> Result<Value> {
        let mut command = Command::new("tesseract");
        command.arg(document_path).arg("stdout").arg("tsv");
        if cls {
            // Automatic page segmentation with orientation and script
            // detection.
            command.args(["--psm", "1"]);
        }
        let output = command.output().context("cannot run tesseract")?;
        check_for_command_failure("tesseract", &output)?;

        let tsv = String::from_utf8(output.stdout)
            .context("tesseract output is not UTF-8")?;
        Ok(parse_tsv(&tsv))
    }
}

/// Check whether a command failed, and report its stderr if so.
fn check_for_command_failure(command_name: &str, output: &Output) -> Result<()> {
    if output.status.success() {
        Ok(())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        error!(
            command_name = command_name,
            output = %stderr,
            "Standard error from command",
        );
        Err(anyhow!("{} failed with {}", command_name, output.status))
    }
}

/// Convert tesseract's TSV data into per-page detection lists.
///
/// Keeps word rows (level 5) with a non-negative confidence; the header and
/// any malformed rows are skipped.
fn parse_tsv(tsv: &str) -> Value {
    let mut pages: Vec<Value> = vec![];
    for line in tsv.lines().skip(1) {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 12 {
            continue;
        }
        let Ok(level) = fields[0].parse::<u32>() else {
            continue;
        };
        if level != 5 {
            continue;
        }
        let Ok(conf) = fields[10].parse::<f64>() else {
            continue;
        };
        if conf < 0.0 {
            continue;
        }
        let Ok(page) = fields[1].parse::<usize>() else {
            continue;
        };
        if page == 0 {
            continue;
        }
        let geometry = fields[6..10]
            .iter()
            .map(|f| f.parse::<i64>())
            .collect::<Result<Vec<_>, _>>();
        let Ok(geometry) = geometry else {
            continue;
        };
        let text = fields[11];

        while pages.len() < page {
            pages.push(json!([]));
        }
        if let Some(Value::Array(detections)) = pages.get_mut(page - 1) {
            detections.push(json!([geometry, [text, conf / 100.0]]));
        }
    }
    Value::Array(pages)
}

#[cfg(test)]
mod tests {
    use super::*;

    static SAMPLE_TSV: &str = "\
level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\tleft\ttop\twidth\theight\tconf\ttext
1\t1\t0\t0\t0\t0\t0\t0\t640\t480\t-1\t
4\t1\t1\t1\t1\t0\t10\t10\t200\t30\t-1\t
5\t1\t1\t1\t1\t1\t10\t10\t90\t30\t96.5\tHello
5\t1\t1\t1\t1\t2\t110\t10\t100\t30\t91\tworld
";

    #[test]
    fn parse_tsv_keeps_word_rows() {
        let result = parse_tsv(SAMPLE_TSV);
        assert_eq!(
            result,
            json!([[
                [[10, 10, 90, 30], ["Hello", 0.965]],
                [[110, 10, 100, 30], ["world", 0.91]],
            ]])
        );
    }

    #[test]
    fn parse_tsv_handles_empty_output() {
        let result = parse_tsv("");
        assert_eq!(result, json!([]));
    }
}
