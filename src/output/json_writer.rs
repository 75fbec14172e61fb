//! JSON output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::error::Result;

/// Serializes a report to a JSON string.
///
/// Works for [`ThreadReport`](crate::pipeline::ThreadReport),
/// [`ListReport`](crate::activity::ListReport), or any single view.
pub fn to_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

/// Writes a report to a JSON file, followed by a newline.
pub fn write_json<T: Serialize + ?Sized>(
    value: &T,
    output_path: impl AsRef<Path>,
    pretty: bool,
) -> Result<()> {
    let json = to_json(value, pretty)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    file.write_all(b"\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::ThreadAnalyzer;
    use crate::config::AnalysisConfig;
    use tempfile::NamedTempFile;

    const THREAD: &str = r#"{"messages": [
        {"sender_name": "alice", "timestamp_ms": 1672621200000, "content": "hello world"},
        {"sender_name": "bob", "timestamp_ms": 1672617600000, "content": "bob sent an attachment."}
    ]}"#;

    #[test]
    fn test_to_json_report() {
        let report = ThreadAnalyzer::with_config(AnalysisConfig::new().with_timezone(chrono_tz::UTC))
            .analyze_str(THREAD)
            .unwrap();
        let json = to_json(&report, false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["total_messages"], 2);
        assert_eq!(value["content_messages"], 1);
        assert_eq!(value["timezone"], "UTC");
        assert_eq!(value["word_frequency"][0]["word"], "hello");
        assert_eq!(value["daily_series"][0]["date"], "2023-01-02");
        assert_eq!(value["first_messages"][0]["time"], "01-02-2023 01:00");
        assert_eq!(value["hour_month_matrix"]["counts"].as_array().unwrap().len(), 24);
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&vec![1, 2], true).unwrap();
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_write_json_file() {
        let report = ThreadAnalyzer::new().analyze_str(THREAD).unwrap();
        let temp_file = NamedTempFile::new().unwrap();
        write_json(&report, temp_file.path(), true).unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert!(content.ends_with('\n'));
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["timezone"], "US/Pacific");
    }
}
