use anyhow::Result;
use colored::Colorize;
use keymaster_games::{ResolvedTemplate, Severity};
use std::io::Write;

use crate::audit::GameReport;

pub fn generate_console_report(out: &mut dyn Write, reports: &[GameReport]) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Catalog Audit Summary".bright_cyan().bold())?;
    writeln!(out, "{}", "========================".cyan())?;

    let passed = reports.iter().filter(|r| r.passed).count();
    writeln!(out, "Games audited: {}", reports.len())?;
    writeln!(out, "Passed: {}", passed.to_string().green())?;
    writeln!(out, "Failed: {}", (reports.len() - passed).to_string().red())?;
    writeln!(out)?;

    for report in reports {
        let status = if report.passed {
            "✅ PASS".green()
        } else {
            "❌ FAIL".red()
        };
        writeln!(out, "{} {}", status, report.game.bold())?;
        writeln!(
            out,
            "   Objectives: {}  Constraints: {}",
            report.objectives, report.constraints
        )?;
        writeln!(out, "   Pools:")?;
        for (pool, size) in &report.pools {
            writeln!(out, "     {pool:20} {size}")?;
        }

        if !report.issues.is_empty() {
            writeln!(out, "   Issues:")?;
            for issue in &report.issues {
                let line = format!("{}: {}", issue.subject, issue.message);
                match issue.severity {
                    Severity::Error => writeln!(out, "     • {}", line.red())?,
                    Severity::Warning => writeln!(out, "     • {}", line.yellow())?,
                }
            }
        }

        if !report.templates.is_empty() {
            writeln!(out, "   Templates:")?;
            for template in &report.templates {
                writeln!(out, "     {}", describe_template(template))?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn generate_json_report(out: &mut dyn Write, reports: &[GameReport]) -> Result<()> {
    let json_output = serde_json::to_string_pretty(reports)?;
    writeln!(out, "{json_output}")?;
    Ok(())
}

pub fn generate_markdown_report(out: &mut dyn Write, reports: &[GameReport]) -> Result<()> {
    writeln!(out, "# Keymaster Catalog Audit\n")?;

    let passed = reports.iter().filter(|r| r.passed).count();
    writeln!(out, "## Summary\n")?;
    writeln!(out, "- **Games audited**: {}", reports.len())?;
    writeln!(out, "- **Passed**: {passed}")?;
    writeln!(out, "- **Failed**: {}\n", reports.len() - passed)?;

    writeln!(
        out,
        "| Game | Status | Objectives | Constraints | Errors | Warnings |"
    )?;
    writeln!(out, "|---|---|---|---|---|---|")?;
    for report in reports {
        writeln!(
            out,
            "| {} | {} | {} | {} | {} | {} |",
            report.game,
            if report.passed { "✅" } else { "❌" },
            report.objectives,
            report.constraints,
            report.count(Severity::Error),
            report.count(Severity::Warning),
        )?;
    }

    for report in reports {
        writeln!(out, "\n## {}\n", report.game)?;
        writeln!(out, "| Pool | Values |")?;
        writeln!(out, "|---|---|")?;
        for (pool, size) in &report.pools {
            writeln!(out, "| `{pool}` | {size} |")?;
        }
        if !report.issues.is_empty() {
            writeln!(out, "\n### Issues\n")?;
            for issue in &report.issues {
                writeln!(
                    out,
                    "- **{}** `{}`: {}",
                    issue.severity, issue.subject, issue.message
                )?;
            }
        }
        if !report.templates.is_empty() {
            writeln!(out, "\n### Templates\n")?;
            for template in &report.templates {
                writeln!(out, "- {}", describe_template(template))?;
            }
        }
    }
    Ok(())
}

fn describe_template(template: &ResolvedTemplate) -> String {
    let mut flags = Vec::new();
    if template.is_time_consuming {
        flags.push("time-consuming");
    }
    if template.is_difficult {
        flags.push("difficult");
    }
    let bindings: Vec<String> = template
        .bindings
        .iter()
        .map(|b| format!("{}={}×{}", b.token, b.pool, b.count))
        .collect();
    let mut line = format!(
        "{} (weight {}; {})",
        template.label,
        template.weight,
        bindings.join(", ")
    );
    if !flags.is_empty() {
        line.push_str(&format!(" [{}]", flags.join(", ")));
    }
    line
}
