use crate::TOOL_NAME;
use crate::report::model::Report;

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

pub fn render_text(report: &Report) -> String {
    let findings = &report.findings;

    let mut out = String::new();
    out.push_str(&format!("{} {}\n", TOOL_NAME, report.tool.version));
    if let Some(path) = &report.artifact.path {
        out.push_str(&format!("SARIF: {path}\n"));
    }
    out.push_str(&format!(
        "Input size: {} bytes\n",
        report.artifact.size_bytes
    ));
    out.push_str(&format!("Results: {}\n", yes_no(findings.has_results)));
    out.push_str(&format!(
        "Alerts: error={} warning={} note={}\n",
        yes_no(findings.error_alerts),
        yes_no(findings.warning_alerts),
        yes_no(findings.note_alerts)
    ));
    out.push_str(&format!(
        "Max security severity: {} ({})\n",
        findings.max_security_score, findings.max_problem_severity
    ));
    if let Some(query) = &report.query {
        out.push_str(&format!(
            "Query: {} matched={}\n",
            query.expression,
            yes_no(query.matched)
        ));
    }
    out.push_str(&format!("Verdict: {}\n", report.verdict.status));
    for reason in &report.verdict.reasons {
        out.push_str(&format!("  - {reason}\n"));
    }
    out
}
