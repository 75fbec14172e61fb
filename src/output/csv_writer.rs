//! CSV output writer.
//!
//! Every table uses `;` as delimiter and starts with a header row.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::activity::{ListReport, ListWindowEntry};
use crate::analysis::{DailyCount, HourMonthMatrix, SenderCount, WindowEntry, WordCount};
use crate::error::{DigestError, Result};
use crate::pipeline::ThreadReport;

fn table_writer() -> csv::Writer<Vec<u8>> {
    csv::WriterBuilder::new()
        .delimiter(b';')
        .from_writer(Vec::new())
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| DigestError::Io(io::Error::new(e.error().kind(), e.error().to_string())))?;
    String::from_utf8(bytes)
        .map_err(|e| DigestError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
}

/// `word;count`
pub fn word_frequency_to_csv(rows: &[WordCount]) -> Result<String> {
    let mut writer = table_writer();
    writer.write_record(["word", "count"])?;
    for row in rows {
        writer.write_record([row.word.clone(), row.count.to_string()])?;
    }
    finish(writer)
}

/// `sender;count;percentage`, percentage with two decimals.
pub fn sender_counts_to_csv(rows: &[SenderCount]) -> Result<String> {
    let mut writer = table_writer();
    writer.write_record(["sender", "count", "percentage"])?;
    for row in rows {
        writer.write_record([
            row.sender.clone(),
            row.count.to_string(),
            format!("{:.2}", row.percentage),
        ])?;
    }
    finish(writer)
}

/// `date;count`, date as `YYYY-MM-DD`.
pub fn daily_series_to_csv(rows: &[DailyCount]) -> Result<String> {
    let mut writer = table_writer();
    writer.write_record(["date", "count"])?;
    for row in rows {
        writer.write_record([row.date.format("%Y-%m-%d").to_string(), row.count.to_string()])?;
    }
    finish(writer)
}

/// `hour;1;…;12`, one row per local hour.
pub fn matrix_to_csv(matrix: &HourMonthMatrix) -> Result<String> {
    let mut writer = table_writer();

    let mut header = vec!["hour".to_string()];
    header.extend((1..=12).map(|m: u32| m.to_string()));
    writer.write_record(&header)?;

    for (hour, row) in matrix.rows().iter().enumerate() {
        let mut record = Vec::with_capacity(13);
        record.push(hour.to_string());
        record.extend(row.iter().map(ToString::to_string));
        writer.write_record(&record)?;
    }
    finish(writer)
}

/// `time;sender;text`
pub fn window_to_csv(rows: &[WindowEntry]) -> Result<String> {
    let mut writer = table_writer();
    writer.write_record(["time", "sender", "text"])?;
    for row in rows {
        writer.write_record([row.time.as_str(), row.sender.as_str(), row.text.as_str()])?;
    }
    finish(writer)
}

/// `time;value;href;title`
pub fn list_entries_to_csv(rows: &[ListWindowEntry]) -> Result<String> {
    let mut writer = table_writer();
    writer.write_record(["time", "value", "href", "title"])?;
    for row in rows {
        writer.write_record([
            row.time.as_str(),
            row.value.as_str(),
            row.href.as_str(),
            row.title.as_deref().unwrap_or(""),
        ])?;
    }
    finish(writer)
}

/// Renders every view of a thread report, tables separated by a blank line.
pub fn report_to_csv(report: &ThreadReport) -> Result<String> {
    let tables = [
        word_frequency_to_csv(&report.word_frequency)?,
        sender_counts_to_csv(&report.sender_counts)?,
        daily_series_to_csv(&report.daily_series)?,
        matrix_to_csv(&report.hour_month_matrix)?,
        window_to_csv(&report.first_messages)?,
        window_to_csv(&report.last_messages)?,
    ];
    Ok(tables.join("\n"))
}

/// Renders the windows of a list report, tables separated by a blank line.
pub fn list_report_to_csv(report: &ListReport) -> Result<String> {
    let mut tables = vec![
        list_entries_to_csv(&report.first)?,
        list_entries_to_csv(&report.recent)?,
    ];
    if let Some(missing) = &report.not_following_back {
        tables.push(list_entries_to_csv(missing)?);
    }
    Ok(tables.join("\n"))
}

fn write_file(content: &str, output_path: &Path) -> Result<()> {
    let mut file = File::create(output_path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

/// Writes a thread report as CSV tables.
pub fn write_csv(report: &ThreadReport, output_path: impl AsRef<Path>) -> Result<()> {
    write_file(&report_to_csv(report)?, output_path.as_ref())
}

/// Writes a list report as CSV tables.
pub fn write_list_csv(report: &ListReport, output_path: impl AsRef<Path>) -> Result<()> {
    write_file(&list_report_to_csv(report)?, output_path.as_ref())
}
