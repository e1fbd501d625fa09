mod audit;
mod reports;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;

use audit::{GameReport, audit_game, load_options, select_games};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Colored summary for terminals
    Console,
    /// Pretty-printed JSON array of game reports
    Json,
    /// Markdown tables
    Markdown,
}

#[derive(Debug, Parser)]
#[command(name = "keymaster-tester", version)]
#[command(about = "Audit Keymaster's Keep game catalogs for template, pool and option problems")]
struct Args {
    /// Games to audit by slug or title (comma-separated, or `all`)
    #[arg(long, default_value = "all")]
    games: String,

    /// JSON object of option values applied to every selected game
    #[arg(long)]
    options: Option<PathBuf>,

    /// Output report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// List all registered games and exit
    #[arg(long)]
    list_games: bool,

    /// Treat warnings as failures
    #[arg(long)]
    strict: bool,

    /// Include every resolved template in the report
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_games(&args)? {
        return Ok(());
    }

    if args.report == ReportFormat::Console && args.output.is_none() {
        announce_banner();
    }

    let reports = run_audits(&args)?;
    write_reports(&args, &reports)?;

    if reports.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }

    Ok(())
}

fn maybe_list_games(args: &Args) -> Result<bool> {
    if !args.list_games {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Registered games:")?;
    for entry in keymaster_games::entries() {
        writeln!(output_target.writer(), "  {:20} - {}", entry.slug, entry.name)?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "🗝️  Keymaster Catalog Tester".bright_cyan().bold());
    println!("{}", "============================".cyan());
}

fn run_audits(args: &Args) -> Result<Vec<GameReport>> {
    let options_json = load_options(args.options.as_deref())?;
    let selection = split_csv(&args.games);
    select_games(&selection)?
        .into_iter()
        .map(|entry| audit_game(entry, options_json.as_deref(), args.strict, args.verbose))
        .collect()
}

fn write_reports(args: &Args, reports: &[GameReport]) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;
    match args.report {
        ReportFormat::Console => reports::generate_console_report(&mut output_target, reports)?,
        ReportFormat::Json => reports::generate_json_report(&mut output_target, reports)?,
        ReportFormat::Markdown => reports::generate_markdown_report(&mut output_target, reports)?,
    }
    output_target.flush_inner()?;
    Ok(())
}

fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}

#[cfg(test)]
fn temp_path(label: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "keymaster-tester-{label}-{}-{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> Args {
        Args {
            games: "all".to_string(),
            options: None,
            report: ReportFormat::Json,
            output: None,
            list_games: false,
            strict: false,
            verbose: false,
        }
    }

    #[test]
    fn split_csv_trims_and_filters() {
        let parts = split_csv(" pokemon_unite, ,pokemon_pinball_rs ");
        assert_eq!(parts, vec!["pokemon_unite", "pokemon_pinball_rs"]);
    }

    #[test]
    fn run_audits_covers_all_games_by_default() {
        let reports = run_audits(&base_args()).unwrap();
        assert_eq!(reports.len(), keymaster_games::entries().len());
        assert!(reports.iter().all(|r| r.passed));
    }

    #[test]
    fn run_audits_applies_options_file() {
        let path = temp_path("options");
        std::fs::write(&path, r#"{"pokemon_pinball_rs_include_rare_spawns": true}"#).unwrap();
        let args = Args {
            games: "pokemon_pinball_rs".to_string(),
            options: Some(path),
            ..base_args()
        };
        let reports = run_audits(&args).unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].pools["locations"], 10);
    }

    #[test]
    fn run_audits_rejects_unknown_game() {
        let args = Args {
            games: "pokemon_snap".to_string(),
            ..base_args()
        };
        assert!(run_audits(&args).is_err());
    }

    #[test]
    fn run_audits_rejects_empty_selection_even_when_strict() {
        for games in ["", " , "] {
            let args = Args {
                games: games.to_string(),
                strict: true,
                ..base_args()
            };
            let err = run_audits(&args).unwrap_err();
            assert!(err.to_string().contains("no games selected"), "{games:?}");
        }
    }

    #[test]
    fn write_reports_emits_json_output() {
        let temp = temp_path("report-json");
        let args = Args {
            games: "pokemon_unite".to_string(),
            output: Some(temp.clone()),
            ..base_args()
        };
        let reports = run_audits(&args).unwrap();
        write_reports(&args, &reports).unwrap();
        let contents = std::fs::read_to_string(temp).unwrap();
        let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(value[0]["game"], "Pokémon Unite");
        assert_eq!(value[0]["issues"].as_array().map(Vec::len), Some(7));
    }

    #[test]
    fn write_reports_emits_markdown_output() {
        let temp = temp_path("report-md");
        let args = Args {
            report: ReportFormat::Markdown,
            output: Some(temp.clone()),
            ..base_args()
        };
        let reports = run_audits(&args).unwrap();
        write_reports(&args, &reports).unwrap();
        let contents = std::fs::read_to_string(temp).unwrap();
        assert!(contents.contains("# Keymaster Catalog Audit"));
        assert!(contents.contains("Pokémon Pinball: Ruby & Sapphire"));
    }

    #[test]
    fn maybe_list_games_writes_output() {
        let temp = temp_path("games");
        let args = Args {
            list_games: true,
            output: Some(temp.clone()),
            ..base_args()
        };
        assert!(maybe_list_games(&args).unwrap());
        let contents = std::fs::read_to_string(temp).unwrap();
        assert!(contents.contains("pokemon_unite"));
        assert!(contents.contains("Pokémon Pinball: Ruby & Sapphire"));
    }

    #[test]
    fn maybe_list_games_skips_when_not_requested() {
        assert!(!maybe_list_games(&base_args()).unwrap());
    }
}
