use crate::roster::{Grade, StudentRecord};
use anyhow::Context;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fmt::Write as _;
use std::path::Path;

pub const EXPORT_FILENAME: &str = "student_results_filtered.csv";
pub const EXPORT_MIME: &str = "text/csv";

const HEADER: [&str; 7] = [
    "Name",
    "Maths",
    "Physics",
    "English",
    "Total Marks",
    "Percentage",
    "Grade",
];

/// Plain number for files: `66.67`.
pub fn format_percentage_plain(p: f64) -> String {
    format!("{:.2}", p)
}

/// On-screen only: `66.67%`.
pub fn format_percentage_display(p: f64) -> String {
    format!("{:.2}%", p)
}

#[derive(Serialize)]
struct CsvRow<'a> {
    name: &'a str,
    maths: u8,
    physics: u8,
    english: u8,
    total_marks: u32,
    percentage: String,
    grade: Grade,
}

pub fn export_csv<'a, I>(records: I) -> anyhow::Result<Vec<u8>>
where
    I: IntoIterator<Item = &'a StudentRecord>,
{
    // Header is written by hand so an empty view still yields a header line.
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    wtr.write_record(HEADER)?;
    for r in records {
        wtr.serialize(CsvRow {
            name: &r.name,
            maths: r.maths,
            physics: r.physics,
            english: r.english,
            total_marks: r.total(),
            percentage: format_percentage_plain(r.percentage()),
            grade: r.grade(),
        })?;
    }
    wtr.into_inner()
        .map_err(|e| anyhow::anyhow!("failed to finish csv: {}", e.error()))
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest.iter() {
        let _ = write!(out, "{:02x}", b);
    }
    out
}

pub fn write_export(out_path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.to_string_lossy()))?;
    }
    std::fs::write(out_path, bytes)
        .with_context(|| format!("failed to write {}", out_path.to_string_lossy()))?;
    Ok(())
}
