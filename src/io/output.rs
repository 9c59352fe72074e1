use crate::classifier::TableDiagnostics;
use crate::config::RiskAssessmentConfig;
use crate::formatting::{Marker, OutputFormatter};
use crate::relabel::{RelabelSummary, ScoredRow};
use crate::scale::Scale;
use crate::scoring::ScoreDomain;
use comfy_table::{presets, Cell, ContentArrangement, Table};
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Terminal,
}

/// Outcome of classifying one score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub score: f64,
    /// Resolved label, empty when unresolved.
    pub label: String,
    /// 1-based position of the range the score resolved through.
    pub range: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<i64>,
}

impl Classification {
    pub fn of(config: &RiskAssessmentConfig, score: f64) -> Self {
        let resolution = config.resolve(score);
        Self {
            score,
            label: resolution.map(|r| r.label.to_string()).unwrap_or_default(),
            range: resolution.map(|r| r.position + 1),
            frequency: None,
            severity: None,
        }
    }

    pub fn with_factors(mut self, frequency: i64, severity: i64) -> Self {
        self.frequency = Some(frequency);
        self.severity = Some(severity);
        self
    }
}

/// Scales, range table, and diagnostics of one configuration.
#[derive(Debug, Serialize)]
pub struct ConfigOverview<'a> {
    pub config: &'a RiskAssessmentConfig,
    pub score_domain: Option<ScoreDomain>,
    pub diagnostics: &'a TableDiagnostics,
}

pub trait OutputWriter {
    fn write_classification(&mut self, classification: &Classification) -> anyhow::Result<()>;
    fn write_relabel(&mut self, rows: &[ScoredRow], summary: &RelabelSummary)
        -> anyhow::Result<()>;
    fn write_overview(&mut self, overview: &ConfigOverview<'_>) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_json<T: Serialize + ?Sized>(&mut self, value: &T) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_classification(&mut self, classification: &Classification) -> anyhow::Result<()> {
        self.write_json(classification)
    }

    /// Rows only, so the output is itself a valid rows file.
    fn write_relabel(
        &mut self,
        rows: &[ScoredRow],
        _summary: &RelabelSummary,
    ) -> anyhow::Result<()> {
        self.write_json(rows)
    }

    fn write_overview(&mut self, overview: &ConfigOverview<'_>) -> anyhow::Result<()> {
        self.write_json(overview)
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
    formatter: Box<dyn OutputFormatter>,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W, formatter: Box<dyn OutputFormatter>) -> Self {
        Self { writer, formatter }
    }

    fn table(&self, header: &[&str]) -> Table {
        let mut table = Table::new();
        table
            .load_preset(if self.formatter.unicode() {
                presets::UTF8_FULL
            } else {
                presets::ASCII_FULL
            })
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(header.iter().map(|h| Cell::new(h)).collect::<Vec<_>>());
        table
    }

    fn label_cell(&self, label: &str) -> String {
        if label.is_empty() {
            self.formatter.dim("(unresolved)")
        } else {
            label.to_string()
        }
    }

    fn write_scale(&mut self, scale: &Scale) -> anyhow::Result<()> {
        let title = format!(
            "{} scale [{}, {}]",
            capitalize(scale.kind.as_str()),
            scale.min,
            scale.max
        );
        writeln!(self.writer, "{}", self.formatter.header(&title))?;
        if scale.is_empty() {
            writeln!(self.writer, "  {}", self.formatter.dim("(no points)"))?;
            return Ok(());
        }
        let mut table = self.table(&["Value", "Label"]);
        for point in &scale.points {
            table.add_row(vec![point.value.to_string(), point.label.clone()]);
        }
        writeln!(self.writer, "{table}")?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_classification(&mut self, classification: &Classification) -> anyhow::Result<()> {
        let source = match (classification.frequency, classification.severity) {
            (Some(f), Some(s)) => format!(" ({f} x {s})"),
            _ => String::new(),
        };
        match classification.range {
            Some(range) => writeln!(
                self.writer,
                "{} Score {}{} -> {} {}",
                self.formatter.marker(Marker::Ok),
                classification.score,
                source,
                self.formatter.bold(&self.label_cell(&classification.label)),
                self.formatter.dim(&format!("(range {range})"))
            )?,
            None => writeln!(
                self.writer,
                "{} Score {}{} -> {}",
                self.formatter.marker(Marker::Warn),
                classification.score,
                source,
                self.formatter.warning("no enabled range contains this score")
            )?,
        }
        Ok(())
    }

    fn write_relabel(
        &mut self,
        rows: &[ScoredRow],
        summary: &RelabelSummary,
    ) -> anyhow::Result<()> {
        let mut table = self.table(&["#", "Score", "Label"]);
        for (index, row) in rows.iter().enumerate() {
            let score = row.score.map_or_else(|| "-".to_string(), |s| s.to_string());
            table.add_row(vec![
                (index + 1).to_string(),
                score,
                self.label_cell(&row.label),
            ]);
        }
        writeln!(self.writer, "{table}")?;

        let line = format!(
            "{} rows: {} relabeled, {} changed, {} skipped, {} unresolved",
            summary.examined,
            summary.relabeled,
            summary.changed,
            summary.skipped,
            summary.unresolved
        );
        let marker = if summary.unresolved > 0 {
            Marker::Warn
        } else {
            Marker::Ok
        };
        writeln!(self.writer, "{} {}", self.formatter.marker(marker), line)?;
        Ok(())
    }

    fn write_overview(&mut self, overview: &ConfigOverview<'_>) -> anyhow::Result<()> {
        self.write_scale(&overview.config.frequency)?;
        writeln!(self.writer)?;
        self.write_scale(&overview.config.severity)?;
        writeln!(self.writer)?;

        writeln!(self.writer, "{}", self.formatter.header("Risk ranges"))?;
        let mut table = self.table(&["#", "Min", "Max", "Label", "Enabled"]);
        for (index, range) in overview.config.risk_ranges.iter().enumerate() {
            table.add_row(vec![
                (index + 1).to_string(),
                range.min.to_string(),
                range.max.to_string(),
                range.label.clone(),
                if range.enabled { "yes" } else { "no" }.to_string(),
            ]);
        }
        writeln!(self.writer, "{table}")?;

        if let Some(domain) = overview.score_domain {
            writeln!(
                self.writer,
                "{} Scores range over [{}, {}]",
                self.formatter.marker(Marker::Info),
                domain.min,
                domain.max
            )?;
        }

        if overview.diagnostics.is_clean() {
            writeln!(
                self.writer,
                "{} {}",
                self.formatter.marker(Marker::Ok),
                self.formatter.success("Every achievable score has a category")
            )?;
        }
        for finding in &overview.diagnostics.findings {
            writeln!(
                self.writer,
                "{} {}",
                self.formatter.marker(Marker::Warn),
                self.formatter.warning(&finding.message())
            )?;
        }
        Ok(())
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn create_writer<'a>(
    format: OutputFormat,
    writer: Box<dyn Write + 'a>,
    formatter: Box<dyn OutputFormatter>,
) -> Box<dyn OutputWriter + 'a> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer, formatter)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::diagnose;
    use crate::formatting::PlainFormatter;

    fn render(format: OutputFormat, write: impl FnOnce(&mut dyn OutputWriter)) -> String {
        let mut buffer = Vec::new();
        match format {
            OutputFormat::Json => write(&mut JsonWriter::new(&mut buffer)),
            OutputFormat::Terminal => {
                write(&mut TerminalWriter::new(&mut buffer, Box::new(PlainFormatter)))
            }
        }
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn json_relabel_output_is_a_rows_file() {
        let mut row = ScoredRow::new(12.0);
        row.label = "Immediate improvement".into();
        let rows = vec![row];

        let text = render(OutputFormat::Json, |w| {
            w.write_relabel(&rows, &RelabelSummary::default()).unwrap()
        });

        let parsed: Vec<ScoredRow> = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, rows);
    }

    #[test]
    fn terminal_classification_names_the_range() {
        let config = RiskAssessmentConfig::default();
        let classification = Classification::of(&config, 12.0).with_factors(3, 4);

        let text = render(OutputFormat::Terminal, |w| {
            w.write_classification(&classification).unwrap()
        });

        assert_eq!(text, "[OK] Score 12 (3 x 4) -> Immediate improvement (range 3)\n");
    }

    #[test]
    fn terminal_overview_lists_scales_and_findings() {
        let mut config = RiskAssessmentConfig::default();
        config.risk_ranges.set_enabled(1, false).unwrap();
        let diagnostics = diagnose(&config);
        let overview = ConfigOverview {
            config: &config,
            score_domain: config.score_domain(),
            diagnostics: &diagnostics,
        };

        let text = render(OutputFormat::Terminal, |w| w.write_overview(&overview).unwrap());

        assert!(text.contains("Frequency scale [1, 4]"));
        assert!(text.contains("Very frequently"));
        assert!(text.contains("Needs management"));
        assert!(text.contains("[WARN] scores without a category: 6, 8"));
    }
}
