use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;
use chrono::Local;
use clap::ValueEnum;
use log::info;

use crate::{ResultTable, modes::Mode};

const DATETIME_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Bordered table on stdout.
    Pretty,
    /// CSV file in the results directory.
    File,
}

/// Renders `table` as requested; plain console output when no format is given.
pub fn control_output(
    table: &ResultTable,
    format: Option<OutputFormat>,
    mode: Mode,
    results_dir: &Path,
) -> anyhow::Result<()> {
    let stdout = io::stdout();
    match format {
        None => default_output(table, &mut stdout.lock())?,
        Some(OutputFormat::Pretty) => pretty_output(table, &mut stdout.lock())?,
        Some(OutputFormat::File) => {
            let path = file_output(table, mode, results_dir)?;
            info!("Results saved to: {}", path.display());
        }
    }
    Ok(())
}

/// One line per row, fields separated by a space.
pub fn default_output(table: &ResultTable, out: &mut impl Write) -> io::Result<()> {
    for row in table.all_rows() {
        writeln!(out, "{}", row.join(" "))?;
    }
    Ok(())
}

/// Left-aligned table with ASCII borders.
pub fn pretty_output(table: &ResultTable, out: &mut impl Write) -> io::Result<()> {
    let mut widths = vec![0; table.header.len()];
    for row in table.all_rows() {
        for (i, field) in row.iter().enumerate() {
            let width = field.chars().count();
            match widths.get_mut(i) {
                Some(current) => *current = (*current).max(width),
                None => widths.push(width),
            }
        }
    }

    let separator = widths
        .iter()
        .map(|width| "-".repeat(width + 2))
        .collect::<Vec<_>>()
        .join("+");
    let separator = format!("+{separator}+");

    writeln!(out, "{separator}")?;
    write_pretty_row(out, &table.header, &widths)?;
    writeln!(out, "{separator}")?;
    for row in &table.rows {
        write_pretty_row(out, row, &widths)?;
    }
    writeln!(out, "{separator}")
}

fn write_pretty_row(out: &mut impl Write, row: &[String], widths: &[usize]) -> io::Result<()> {
    let cells = widths
        .iter()
        .enumerate()
        .map(|(i, &width)| {
            let field = row.get(i).map(String::as_str).unwrap_or("");
            format!(" {field:<width$} ")
        })
        .collect::<Vec<_>>()
        .join("|");
    writeln!(out, "|{cells}|")
}

/// Writes `<results_dir>/<mode>_<timestamp>.csv` and returns its path.
pub fn file_output(table: &ResultTable, mode: Mode, results_dir: &Path) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(results_dir)
        .with_context(|| format!("failed to create {}", results_dir.display()))?;
    let now = Local::now().format(DATETIME_FORMAT);
    let path = results_dir.join(format!("{}_{now}.csv", mode.as_str()));

    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_path(&path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    for row in table.all_rows() {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ResultTable {
        let mut table = ResultTable::new(&["Status", "Count"]);
        table.push_row(vec!["Active".to_string(), "31".to_string()]);
        table.push_row(vec!["Total".to_string(), "31".to_string()]);
        table
    }

    #[test]
    fn test_default_output() {
        let mut out = Vec::new();
        default_output(&table(), &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Status Count\nActive 31\nTotal 31\n"
        );
    }

    #[test]
    fn test_pretty_output() {
        let mut out = Vec::new();
        pretty_output(&table(), &mut out).unwrap();
        let expected = "\
+--------+-------+
| Status | Count |
+--------+-------+
| Active | 31    |
| Total  | 31    |
+--------+-------+
";
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[test]
    fn test_file_output() {
        let dir = tempfile::tempdir().unwrap();
        let results_dir = dir.path().join("results");
        let path = file_output(&table(), Mode::Pep, &results_dir).unwrap();

        assert_eq!(path.parent().unwrap(), results_dir);
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("pep_") && name.ends_with(".csv"));
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "\"Status\",\"Count\"\n\"Active\",\"31\"\n\"Total\",\"31\"\n"
        );
    }
}
