use std::fs;
use std::io::Write;
use std::path::PathBuf;

use tempfile::NamedTempFile;
use tracing::info;

use crate::config::{DictConfig, DictOutput};
use crate::error::{DictError, DictResult};
use crate::source::DictSource;

/// Reduce one OpenCC line to `preimage\timage`, keeping the first image.
///
/// Surrounding whitespace is trimmed and blank lines yield `None`. Any
/// other line must have exactly two tab-separated columns with at least one
/// image in the second.
pub fn merge_line(source_name: &str, line_no: usize, line: &str) -> DictResult<Option<String>> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let malformed = || DictError::MalformedLine {
        source_name: source_name.to_string(),
        line_no,
        line: line.to_string(),
    };
    let mut cols = trimmed.split('\t');
    let (Some(preimage), Some(images), None) = (cols.next(), cols.next(), cols.next()) else {
        return Err(malformed());
    };
    let image = images.split_whitespace().next().ok_or_else(malformed)?;
    if preimage.is_empty() {
        return Err(malformed());
    }
    Ok(Some(format!("{preimage}\t{image}")))
}

/// One merged file written by [`DictMerger::update`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WrittenDict {
    pub path: PathBuf,
    pub lines: usize,
}

/// Result of a full update.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DictReport {
    pub written: Vec<WrittenDict>,
}

impl DictReport {
    pub fn total_lines(&self) -> usize {
        self.written.iter().map(|w| w.lines).sum()
    }
}

/// Merges dictionary sources from a [`DictSource`] into flat output files.
pub struct DictMerger<S> {
    source: S,
}

impl<S: DictSource> DictMerger<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Merge every source of `output` in order. Returns the file body and
    /// its line count; each line is `\n`-terminated.
    pub fn merge_output(&self, output: &DictOutput) -> DictResult<(String, usize)> {
        let mut body = String::new();
        let mut count = 0;
        for name in &output.sources {
            info!(source = %name, "fetch");
            for (i, line) in self.source.fetch_lines(name)?.iter().enumerate() {
                if let Some(merged) = merge_line(name, i + 1, line)? {
                    body.push_str(&merged);
                    body.push('\n');
                    count += 1;
                }
            }
        }
        Ok((body, count))
    }

    /// Merge and write every configured output.
    ///
    /// Each output is written to a temp file in the output directory and
    /// then moved into place, so a failed fetch never leaves a truncated
    /// dictionary behind.
    pub fn update(&self, config: &DictConfig) -> DictResult<DictReport> {
        fs::create_dir_all(&config.output_dir)
            .map_err(|e| DictError::io(&config.output_dir, e))?;

        let mut report = DictReport::default();
        for output in &config.outputs {
            let (body, lines) = self.merge_output(output)?;
            let path = config.output_path(output);

            let mut tmp = NamedTempFile::new_in(&config.output_dir)
                .map_err(|e| DictError::io(&config.output_dir, e))?;
            tmp.write_all(body.as_bytes())
                .map_err(|e| DictError::io(tmp.path(), e))?;
            tmp.persist(&path).map_err(|e| DictError::io(&path, e.error))?;

            info!(path = %path.display(), lines, "dict updated");
            report.written.push(WrittenDict { path, lines });
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StaticDictSource;

    fn merged(line: &str) -> Option<String> {
        merge_line("test.txt", 1, line).unwrap()
    }

    #[test]
    fn keeps_first_image() {
        assert_eq!(merged("干\t幹 乾 干").unwrap(), "干\t幹");
        assert_eq!(merged("万\t萬").unwrap(), "万\t萬");
    }

    #[test]
    fn trims_line() {
        assert_eq!(merged("  发\t發 髮\r").unwrap(), "发\t發");
    }

    #[test]
    fn blank_line_is_skipped() {
        assert_eq!(merged(""), None);
        assert_eq!(merged("   "), None);
    }

    #[test]
    fn malformed_lines_rejected() {
        for line in ["no-tab-here", "a\tb\tc", "a\t   ", "\tb"] {
            let err = merge_line("STPhrases.txt", 7, line).unwrap_err();
            match err {
                DictError::MalformedLine { source_name, line_no, .. } => {
                    assert_eq!(source_name, "STPhrases.txt");
                    assert_eq!(line_no, 7);
                }
                other => panic!("unexpected error for {line:?}: {other}"),
            }
        }
    }

    fn source() -> StaticDictSource {
        StaticDictSource::new()
            .with("STCharacters.txt", "万\t萬 万\n干\t幹 乾 干\n")
            .with("STPhrases.txt", "一干二净\t一乾二淨\n")
            .with("TSCharacters.txt", "萬\t万\n")
            .with("TSPhrases.txt", "\n")
    }

    #[test]
    fn merge_output_concatenates_in_order() {
        let merger = DictMerger::new(source());
        let output = DictOutput::new("s2t.txt", &["STCharacters.txt", "STPhrases.txt"]);
        let (body, lines) = merger.merge_output(&output).unwrap();
        assert_eq!(body, "万\t萬\n干\t幹\n一干二净\t一乾二淨\n");
        assert_eq!(lines, 3);
    }

    #[test]
    fn merge_output_reports_line_numbers() {
        let merger = DictMerger::new(StaticDictSource::new().with("x.txt", "a\tb\nbroken\n"));
        let err = merger
            .merge_output(&DictOutput::new("x", &["x.txt"]))
            .unwrap_err();
        assert!(matches!(err, DictError::MalformedLine { line_no: 2, .. }));
    }

    #[test]
    fn update_writes_all_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let config = DictConfig {
            output_dir: dir.path().join("public"),
            ..DictConfig::default()
        };

        let report = DictMerger::new(source()).update(&config).unwrap();

        assert_eq!(report.written.len(), 2);
        assert_eq!(report.total_lines(), 4);
        assert_eq!(
            fs::read_to_string(dir.path().join("public/s2t.txt")).unwrap(),
            "万\t萬\n干\t幹\n一干二净\t一乾二淨\n"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("public/t2s.txt")).unwrap(),
            "萬\t万\n"
        );
    }

    #[test]
    fn failed_source_keeps_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = DictConfig {
            output_dir: dir.path().to_path_buf(),
            outputs: vec![DictOutput::new("s2t.txt", &["STCharacters.txt", "Missing.txt"])],
            ..DictConfig::default()
        };
        fs::write(dir.path().join("s2t.txt"), "old\n").unwrap();

        let err = DictMerger::new(source()).update(&config).unwrap_err();
        assert!(matches!(err, DictError::UnknownSource(_)));
        assert_eq!(fs::read_to_string(dir.path().join("s2t.txt")).unwrap(), "old\n");
    }
}
