//! Terminal output for verification results.

use std::io::Write;

use crate::requirements::{
    CheckResult, Constraint, Report, VerificationOutcome, Violation, WarningSink,
};

use super::theme::DepcheckTheme;

/// Prints warnings as they are emitted.
///
/// Write failures are ignored; a warning that cannot be shown must not
/// abort the check.
pub struct TerminalSink<W: Write> {
    writer: W,
    theme: DepcheckTheme,
}

impl TerminalSink<std::io::Stderr> {
    /// A sink writing to stderr.
    pub fn stderr(theme: DepcheckTheme) -> Self {
        Self::new(std::io::stderr(), theme)
    }
}

impl<W: Write> TerminalSink<W> {
    /// A sink writing to `writer`.
    pub fn new(writer: W, theme: DepcheckTheme) -> Self {
        Self { writer, theme }
    }

    /// Consume the sink, returning the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> WarningSink for TerminalSink<W> {
    fn emit(&mut self, category: &str, message: &str) {
        let detail = self.theme.format_detail(&format!("[{}]", category));
        let line = self.theme.format_warning(&format!("{} {}", message, detail));
        let _ = writeln!(self.writer, "{}", line);
    }
}

/// One line per checked constraint.
pub fn render_result(result: &CheckResult, theme: &DepcheckTheme) -> String {
    match &result.outcome {
        VerificationOutcome::Satisfied => theme.format_success(&result.constraint.to_string()),
        VerificationOutcome::Violation(Violation::MissingPackage) => theme.format_error(&format!(
            "{} {}",
            result.constraint,
            theme.format_detail("(not installed)")
        )),
        VerificationOutcome::Violation(Violation::VersionMismatch { installed, .. }) => {
            theme.format_error(&format!(
                "{} {}",
                result.constraint,
                theme.format_detail(&format!("(installed {})", installed))
            ))
        }
    }
}

/// Per-constraint lines followed by a summary line.
pub fn render_report(report: &Report, theme: &DepcheckTheme) -> String {
    let mut lines: Vec<String> = report
        .results()
        .iter()
        .map(|r| render_result(r, theme))
        .collect();

    let violations = report.violation_count();
    let summary = if report.is_empty() {
        theme.format_detail("No requirements to check")
    } else if violations == 0 {
        theme.format_success(&format!(
            "All {} requirement{} satisfied",
            report.len(),
            plural(report.len())
        ))
    } else {
        theme.format_warning(&format!(
            "{} of {} requirement{} not satisfied",
            violations,
            report.len(),
            plural(report.len())
        ))
    };
    lines.push(summary);
    lines.join("\n")
}

/// Parsed constraints, one per line.
pub fn render_constraints(constraints: &[Constraint], theme: &DepcheckTheme) -> String {
    if constraints.is_empty() {
        return theme.format_detail("No requirements");
    }
    constraints
        .iter()
        .map(|c| {
            let name = theme.format_highlight(&c.name);
            match &c.requirement {
                Some(req) => format!("{} {}", name, theme.format_detail(&req.to_string())),
                None => format!("{} {}", name, theme.format_detail("(any version)")),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}
