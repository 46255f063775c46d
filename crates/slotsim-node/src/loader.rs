//! Input file loaders
//!
//! Frequency file: `key:count` records separated by newlines or other
//! whitespace. Trace file: integers separated by commas, whitespace or
//! newlines; each run of `n_ops` values is one transaction.

use crate::error::{LoadError, NodeError, NodeResult};
use slotsim_core::RawTrace;
use slotsim_types::{FrequencyIndex, Key};
use std::path::Path;

fn read(path: &Path) -> NodeResult<String> {
    std::fs::read_to_string(path).map_err(|source| NodeError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_int(token: &str, path: &Path, line: usize) -> Result<u64, LoadError> {
    token.parse().map_err(|_| LoadError::InvalidInteger {
        path: path.to_path_buf(),
        line,
        token: token.to_string(),
    })
}

/// Parse frequency records
pub fn parse_frequencies(content: &str, path: &Path) -> Result<FrequencyIndex, LoadError> {
    let mut records = Vec::new();
    for (idx, text) in content.lines().enumerate() {
        let line = idx + 1;
        for record in text.split_whitespace() {
            let (key, count) = record.split_once(':').ok_or_else(|| LoadError::BadRecord {
                path: path.to_path_buf(),
                line,
                record: record.to_string(),
            })?;
            let key = parse_int(key, path, line)?;
            let count = parse_int(count, path, line)?;
            records.push((Key(key), count));
        }
    }
    FrequencyIndex::from_records(records).map_err(|source| LoadError::Frequencies {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse one node's trace into transactions of `n_ops` keys
pub fn parse_trace(content: &str, path: &Path, n_ops: usize) -> Result<RawTrace, LoadError> {
    let mut values = Vec::new();
    for (idx, text) in content.lines().enumerate() {
        let line = idx + 1;
        for token in text
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
        {
            values.push(Key(parse_int(token, path, line)?));
        }
    }

    if n_ops == 0 || values.len() % n_ops != 0 {
        return Err(LoadError::Arity {
            path: path.to_path_buf(),
            values: values.len(),
            n_ops,
        });
    }
    Ok(values.chunks(n_ops).map(<[Key]>::to_vec).collect())
}

/// Read and parse a frequency file
pub fn load_frequencies(path: &Path) -> NodeResult<FrequencyIndex> {
    tracing::info!("Loading key frequencies from {:?}", path);
    let index = parse_frequencies(&read(path)?, path)?;
    tracing::info!(keys = index.len(), "Key frequencies loaded");
    Ok(index)
}

/// Read and parse a trace file
pub fn load_trace(path: &Path, n_ops: usize) -> NodeResult<RawTrace> {
    let trace = parse_trace(&read(path)?, path, n_ops)?;
    tracing::info!(transactions = trace.len(), "Loaded trace {:?}", path);
    Ok(trace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn p() -> &'static Path {
        Path::new("input")
    }

    // ==================== Frequency File ====================

    #[test]
    fn test_frequencies() {
        let index = parse_frequencies("1:10\n2:0\n\n3:720 4:5\n", p()).unwrap();
        assert_eq!(index.len(), 4);
        assert_eq!(index.get(Key(1)), Some(10));
        assert_eq!(index.get(Key(2)), Some(0));
        assert_eq!(index.get(Key(4)), Some(5));
    }

    #[test]
    fn test_frequency_bad_record() {
        let err = parse_frequencies("1:10\n2-3\n", p()).unwrap_err();
        assert!(matches!(err, LoadError::BadRecord { line: 2, .. }));
    }

    #[test]
    fn test_frequency_non_integer() {
        let err = parse_frequencies("1:ten\n", p()).unwrap_err();
        assert!(matches!(err, LoadError::InvalidInteger { line: 1, .. }));
        assert!(err.to_string().contains("\"ten\""));
    }

    #[test]
    fn test_frequency_negative_count() {
        let err = parse_frequencies("1:-1\n", p()).unwrap_err();
        assert!(matches!(err, LoadError::InvalidInteger { .. }));
    }

    #[test]
    fn test_frequency_duplicate() {
        let err = parse_frequencies("1:1\n1:2\n", p()).unwrap_err();
        assert!(matches!(err, LoadError::Frequencies { .. }));
    }

    // ==================== Trace File ====================

    #[test]
    fn test_trace_chunks() {
        let trace = parse_trace("1,2,3,4\n5,6,7,8\n", p(), 4).unwrap();
        assert_eq!(trace.len(), 2);
        assert_eq!(trace[1], vec![Key(5), Key(6), Key(7), Key(8)]);
    }

    #[test]
    fn test_trace_mixed_separators() {
        let trace = parse_trace("1, 2\n3 4,\n", p(), 2).unwrap();
        assert_eq!(trace, vec![vec![Key(1), Key(2)], vec![Key(3), Key(4)]]);
    }

    #[test]
    fn test_trace_wrong_arity() {
        let err = parse_trace("1,2,3\n", p(), 2).unwrap_err();
        assert!(matches!(err, LoadError::Arity { values: 3, n_ops: 2, .. }));
    }

    #[test]
    fn test_trace_bad_token_line() {
        let err = parse_trace("1,2\n3,x\n", p(), 2).unwrap_err();
        assert!(matches!(err, LoadError::InvalidInteger { line: 2, .. }));
    }

    #[test]
    fn test_empty_trace() {
        assert!(parse_trace("", p(), 8).unwrap().is_empty());
    }

    #[test]
    fn test_load_files() {
        let mut freq = NamedTempFile::new().unwrap();
        freq.write_all(b"0:3\n1:4\n").unwrap();
        let mut trace = NamedTempFile::new().unwrap();
        trace.write_all(b"0,1\n1,0\n").unwrap();

        assert_eq!(load_frequencies(freq.path()).unwrap().len(), 2);
        assert_eq!(load_trace(trace.path(), 2).unwrap().len(), 2);
    }

    #[test]
    fn test_missing_file() {
        let err = load_trace(Path::new("/nonexistent/trace.txt"), 2).unwrap_err();
        assert!(matches!(err, NodeError::Read { .. }));
    }
}
