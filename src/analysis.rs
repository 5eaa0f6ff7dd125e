//! Plain-text answer analysis against the sheet grid
//!
//! Works on free text that has not been structured into blocks: every
//! `\n`-separated line is measured in cells, checked against the limits in
//! [`GridConfig`] and summarized into sheet-level statistics.

use serde::{Deserialize, Serialize};

use crate::models::{MAX_CELLS_PER_LINE, MAX_LINES};
use crate::utils::{kind_of, width_of, CharKind};

/// Limits used when analyzing plain text
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct GridConfig {
    pub max_lines: u32,
    pub max_cells_per_line: u32,
    /// Without strict validation the tolerances below are added to the limits
    pub strict_validation: bool,
    pub tolerance_lines: u32,
    pub tolerance_cells: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            max_lines: MAX_LINES as u32,
            max_cells_per_line: MAX_CELLS_PER_LINE,
            strict_validation: false,
            tolerance_lines: 2,
            tolerance_cells: 1,
        }
    }
}

impl GridConfig {
    pub fn strict() -> Self {
        Self {
            strict_validation: true,
            ..Self::default()
        }
    }

    /// Cells a line may use before it is rejected
    pub fn allowed_cells(&self) -> u32 {
        if self.strict_validation {
            self.max_cells_per_line
        } else {
            self.max_cells_per_line.saturating_add(self.tolerance_cells)
        }
    }

    /// Lines a sheet may use before it is rejected
    pub fn allowed_lines(&self) -> u32 {
        if self.strict_validation {
            self.max_lines
        } else {
            self.max_lines.saturating_add(self.tolerance_lines)
        }
    }
}

/// One character and the cells it takes
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CharCell {
    pub char: char,
    pub kind: CharKind,
    pub cells: f32,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LineStatus {
    Success,
    Warning,
    Error,
}

/// Measurement of one line of plain text
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LineReport {
    pub line_number: u32,
    pub content: String,
    /// Width rounded up to whole cells
    pub cell_count: u32,
    pub breakdown: Vec<CharCell>,
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_message: Option<String>,
}

/// Fraction of a line's cells above which the UI shows a warning color
pub const NEAR_LIMIT_THRESHOLD: f32 = 0.9;

pub fn is_line_near_limit(cell_count: u32, threshold: f32) -> bool {
    cell_count as f32 >= MAX_CELLS_PER_LINE as f32 * threshold
}

impl LineReport {
    pub fn status(&self) -> LineStatus {
        if !self.is_valid {
            LineStatus::Error
        } else if is_line_near_limit(self.cell_count, NEAR_LIMIT_THRESHOLD) {
            LineStatus::Warning
        } else {
            LineStatus::Success
        }
    }
}

/// Measure and check a single line
pub fn analyze_line(line_number: u32, content: &str, config: &GridConfig) -> LineReport {
    let mut half_cells: u32 = 0;
    let breakdown: Vec<CharCell> = content
        .chars()
        .filter(|c| *c != '\r' && *c != '\n')
        .map(|c| {
            let width = width_of(c);
            half_cells += width.half_cells();
            CharCell {
                char: c,
                kind: kind_of(c),
                cells: width.cells(),
            }
        })
        .collect();

    let cell_count = half_cells.div_ceil(2);
    let is_valid = cell_count <= config.allowed_cells();
    let validation_message = (!is_valid).then(|| {
        format!(
            "Line {}: {} cells (exceeds the {} cell limit)",
            line_number, cell_count, config.max_cells_per_line
        )
    });

    LineReport {
        line_number,
        content: content.to_string(),
        cell_count,
        breakdown,
        is_valid,
        validation_message,
    }
}

/// Measurement of a whole plain-text answer
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SheetReport {
    pub lines: Vec<LineReport>,
    pub total_lines: u32,
    pub total_cells: u32,
    pub average_cells_per_line: f32,
    pub is_valid: bool,
    pub validation_errors: Vec<String>,
    pub validation_warnings: Vec<String>,
}

/// Split `content` on newlines and check it against the sheet limits
pub fn analyze_sheet(content: &str, config: &GridConfig) -> SheetReport {
    let lines: Vec<LineReport> = content
        .split('\n')
        .enumerate()
        .map(|(i, line)| analyze_line(i as u32 + 1, line, config))
        .collect();

    let mut validation_errors: Vec<String> = lines
        .iter()
        .filter_map(|line| line.validation_message.clone())
        .collect();
    let mut validation_warnings = Vec::new();

    let total_lines = lines.len() as u32;
    let total_cells: u32 = lines.iter().map(|line| line.cell_count).sum();
    let average_cells_per_line = if total_lines > 0 {
        total_cells as f32 / total_lines as f32
    } else {
        0.0
    };

    if total_lines > config.allowed_lines() {
        validation_errors.push(format!(
            "{} lines in total (exceeds the {} line limit)",
            total_lines, config.max_lines
        ));
    }

    let min_lines = config.max_lines as f32 * 0.5;
    if (total_lines as f32) < min_lines {
        validation_warnings.push(format!(
            "Answer is short ({} lines); at least {} lines recommended",
            total_lines, min_lines
        ));
    }

    if average_cells_per_line < config.max_cells_per_line as f32 * 0.5 {
        validation_warnings.push(format!(
            "Lines are sparse ({:.1} cells on average); fill them further",
            average_cells_per_line
        ));
    }

    SheetReport {
        is_valid: validation_errors.is_empty(),
        lines,
        total_lines,
        total_cells,
        average_cells_per_line,
        validation_errors,
        validation_warnings,
    }
}

/// Character counts and grid utilization of a sheet
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SheetStats {
    pub total_characters: usize,
    pub hangul_count: usize,
    pub latin_count: usize,
    pub digit_count: usize,
    pub symbol_count: usize,
    pub wide_count: usize,
    pub space_count: usize,
    pub total_lines: u32,
    pub total_cells: u32,
    pub average_cells_per_line: f32,
    /// Percentage of the full 22 x 19 grid in use
    pub utilization_rate: f32,
}

/// Display-ready summary of a report's findings
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FormattedMessages {
    pub has_errors: bool,
    pub has_warnings: bool,
    pub error_message: Option<String>,
    pub warning_message: Option<String>,
}

impl SheetReport {
    pub fn stats(&self) -> SheetStats {
        let count = |kind: CharKind| {
            self.lines
                .iter()
                .flat_map(|line| &line.breakdown)
                .filter(|c| c.kind == kind)
                .count()
        };
        let hangul_count = count(CharKind::Hangul);
        let latin_count = count(CharKind::Latin);
        let digit_count = count(CharKind::Digit);
        let symbol_count = count(CharKind::Symbol);
        let wide_count = count(CharKind::Wide);
        let space_count = count(CharKind::Space);

        let grid_cells = (MAX_LINES as u32 * MAX_CELLS_PER_LINE) as f32;

        SheetStats {
            total_characters: hangul_count
                + latin_count
                + digit_count
                + symbol_count
                + wide_count
                + space_count,
            hangul_count,
            latin_count,
            digit_count,
            symbol_count,
            wide_count,
            space_count,
            total_lines: self.total_lines,
            total_cells: self.total_cells,
            average_cells_per_line: self.average_cells_per_line,
            utilization_rate: self.total_cells as f32 / grid_cells * 100.0,
        }
    }

    /// Join the analyzed lines back into plain text
    pub fn to_plain_text(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.content.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn format_messages(&self) -> FormattedMessages {
        let bulleted = |title: &str, items: &[String]| {
            (!items.is_empty()).then(|| {
                let body: Vec<_> = items.iter().map(|item| format!("  • {}", item)).collect();
                format!("{}:\n{}", title, body.join("\n"))
            })
        };

        FormattedMessages {
            has_errors: !self.validation_errors.is_empty(),
            has_warnings: !self.validation_warnings.is_empty(),
            error_message: bulleted("Format errors", &self.validation_errors),
            warning_message: bulleted("Notes", &self.validation_warnings),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_cell_count_rounds_up() {
        let config = GridConfig::default();
        assert_eq!(analyze_line(1, "정보관리기술사", &config).cell_count, 7);
        assert_eq!(analyze_line(1, "OAuth", &config).cell_count, 3);
        assert_eq!(analyze_line(1, "OAuth 2.0 인증", &config).cell_count, 7);
        assert_eq!(analyze_line(1, "API Gateway 패턴", &config).cell_count, 8);
        assert_eq!(analyze_line(1, "", &config).cell_count, 0);
    }

    #[test]
    fn test_breakdown_kinds() {
        let report = analyze_line(1, "가a1", &GridConfig::default());
        let kinds: Vec<_> = report.breakdown.iter().map(|c| c.kind).collect();
        assert_eq!(kinds, vec![CharKind::Hangul, CharKind::Latin, CharKind::Digit]);
        let cells: f32 = report.breakdown.iter().map(|c| c.cells).sum();
        assert_eq!(cells, 2.0);
    }

    #[test]
    fn test_tolerance_depends_on_strictness() {
        let line = "가".repeat(20);
        assert!(analyze_line(1, &line, &GridConfig::default()).is_valid);

        let strict = analyze_line(1, &line, &GridConfig::strict());
        assert!(!strict.is_valid);
        assert!(strict.validation_message.unwrap().contains("exceeds"));
        assert_eq!(
            analyze_line(1, &line, &GridConfig::strict()).status(),
            LineStatus::Error
        );
    }

    #[test]
    fn test_line_status_near_limit() {
        let config = GridConfig::default();
        assert_eq!(analyze_line(1, &"가".repeat(18), &config).status(), LineStatus::Warning);
        assert_eq!(analyze_line(1, &"가".repeat(5), &config).status(), LineStatus::Success);
    }

    #[test]
    fn test_sheet_report_and_stats() {
        let content = "정의: OAuth 2.0\n구조: 인증 서버\n특징: 토큰 기반";
        let report = analyze_sheet(content, &GridConfig::default());
        assert_eq!(report.total_lines, 3);
        assert!(report.is_valid);
        // short and sparse
        assert_eq!(report.validation_warnings.len(), 2);
        assert_eq!(report.to_plain_text(), content);

        let stats = report.stats();
        assert_eq!(stats.hangul_count, 14);
        assert_eq!(stats.total_lines, 3);
        assert!(stats.utilization_rate > 0.0);
    }

    #[test]
    fn test_too_many_lines_is_an_error() {
        let content = vec!["가나다라마바사아자차카타"; 25].join("\n");
        let report = analyze_sheet(&content, &GridConfig::default());
        assert!(!report.is_valid);
        assert_eq!(report.validation_errors.len(), 1);

        let within = vec!["가나다라마바사아자차카타"; 24].join("\n");
        assert!(analyze_sheet(&within, &GridConfig::default()).is_valid);
        assert!(!analyze_sheet(&within, &GridConfig::strict()).is_valid);
    }

    #[test]
    fn test_short_answer_threshold_is_half_the_sheet() {
        let config = GridConfig {
            max_lines: 21,
            ..GridConfig::default()
        };
        let ten = vec!["가나다라마바사아자차카타"; 10].join("\n");
        let report = analyze_sheet(&ten, &config);
        assert!(report
            .validation_warnings
            .iter()
            .any(|w| w == "Answer is short (10 lines); at least 10.5 lines recommended"));

        let eleven = vec!["가나다라마바사아자차카타"; 11].join("\n");
        let report = analyze_sheet(&eleven, &config);
        assert!(!report.validation_warnings.iter().any(|w| w.contains("short")));
    }

    #[test]
    fn test_huge_limits_saturate() {
        let config = GridConfig {
            max_lines: u32::MAX,
            max_cells_per_line: u32::MAX,
            ..GridConfig::default()
        };
        assert_eq!(config.allowed_cells(), u32::MAX);
        assert_eq!(config.allowed_lines(), u32::MAX);
        assert!(analyze_line(1, &"가".repeat(40), &config).is_valid);
    }

    #[test]
    fn test_format_messages() {
        let report = analyze_sheet("짧음", &GridConfig::default());
        let messages = report.format_messages();
        assert!(!messages.has_errors);
        assert!(messages.error_message.is_none());
        assert!(messages.warning_message.unwrap().contains("  • Answer is short"));
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: GridConfig = serde_json::from_str(r#"{ "strictValidation": true }"#).unwrap();
        assert!(config.strict_validation);
        assert_eq!(config.max_cells_per_line, 19);
        assert_eq!(config.allowed_cells(), 19);
    }
}
