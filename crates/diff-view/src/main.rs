//! Diff View - compare two files in the terminal
//!
//! Shows the differences side by side or inline, prints a status line and
//! exits with 0 when the files are identical and 1 when they differ.

use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use env_logger::Env;
use line_diff::{DiffAlgorithm, DiffEngine, DiffOptions, DiffResult};

mod diff_text_view;
mod theme;

use diff_text_view::{DiffTextView, DiffTheme, ViewMode};

/// Compare two text files line by line
#[derive(Parser, Debug)]
#[command(name = "diff-view")]
#[command(version)]
#[command(about = "Line-accurate side-by-side comparison of two files")]
struct Cli {
    /// Left (old) file
    left: PathBuf,

    /// Right (new) file
    right: PathBuf,

    /// Ignore all whitespace
    #[arg(short = 'w', long)]
    ignore_whitespace: bool,

    /// Ignore changes in the amount of whitespace
    #[arg(short = 'b', long)]
    ignore_whitespace_change: bool,

    /// Treat whitespace-only lines as equal to each other
    #[arg(short = 'B', long)]
    ignore_blank_lines: bool,

    /// Ignore case differences
    #[arg(short = 'i', long)]
    ignore_case: bool,

    /// Sequence matching algorithm
    #[arg(short, long, value_enum, default_value_t = AlgorithmArg::Myers)]
    algorithm: AlgorithmArg,

    /// Output layout
    #[arg(short, long, value_enum, default_value_t = ModeArg::SideBySide)]
    mode: ModeArg,

    /// Total width of side-by-side output
    #[arg(long, default_value_t = 120)]
    width: usize,

    /// Fold unchanged lines farther than this from a change
    #[arg(short = 'C', long)]
    context: Option<usize>,

    /// Only show the given difference (1-based)
    #[arg(long)]
    block: Option<usize>,

    /// Print the comparison result as JSON
    #[arg(long)]
    json: bool,

    /// When to use colors
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,

    /// Use colors meant for light terminal backgrounds
    #[arg(long)]
    light: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AlgorithmArg {
    Myers,
    Patience,
    Histogram,
    Minimal,
}

impl From<AlgorithmArg> for DiffAlgorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Myers => DiffAlgorithm::Myers,
            AlgorithmArg::Patience => DiffAlgorithm::Patience,
            AlgorithmArg::Histogram => DiffAlgorithm::Histogram,
            AlgorithmArg::Minimal => DiffAlgorithm::Minimal,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    SideBySide,
    Inline,
}

impl From<ModeArg> for ViewMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::SideBySide => ViewMode::SideBySide,
            ModeArg::Inline => ViewMode::Inline,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl Cli {
    fn options(&self) -> DiffOptions {
        DiffOptions::default()
            .ignore_whitespace(self.ignore_whitespace)
            .ignore_whitespace_change(self.ignore_whitespace_change)
            .ignore_blank_lines(self.ignore_blank_lines)
            .ignore_case(self.ignore_case)
            .algorithm(self.algorithm.into())
    }

    fn theme(&self) -> DiffTheme {
        let colors = match self.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => {
                std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
            }
        };
        colored::control::set_override(colors);
        match (colors, self.light) {
            (false, _) => DiffTheme::plain(),
            (true, false) => DiffTheme::dark(),
            (true, true) => DiffTheme::light(),
        }
    }
}

fn status_line(result: &DiffResult) -> String {
    if result.binary_file || result.identical {
        result.summary()
    } else {
        format!("{} ({})", result.summary(), result.stats())
    }
}

fn run(cli: &Cli, out: &mut impl Write) -> Result<DiffResult> {
    let engine = DiffEngine::new(cli.options());
    log::debug!("comparing {:?} with {:?} using {:?}", cli.left, cli.right, engine);
    let result = engine.compare_files(&cli.left, &cli.right);

    if cli.json {
        let json = serde_json::to_string_pretty(&result).context("Failed to serialize result")?;
        writeln!(out, "{json}")?;
        return Ok(result);
    }

    let view = DiffTextView::new(result)
        .with_theme(cli.theme())
        .with_mode(cli.mode.into())
        .with_width(cli.width)
        .with_context(cli.context);

    match cli.block {
        Some(k) => {
            let total = view.result().total_diffs();
            let Some(rendered) = k.checked_sub(1).and_then(|index| view.render_block(index))
            else {
                bail!("No difference {k}: the files have {total} difference(s)");
            };
            writeln!(out, "[{k}/{total}]")?;
            write!(out, "{rendered}")?;
        }
        None => write!(out, "{}", view.render())?,
    }
    writeln!(out, "{}", status_line(view.result()))?;

    Ok(view.into_result())
}

/// 0 when identical, 1 when different, 2 on error
fn exit_status(outcome: &Result<DiffResult>) -> u8 {
    match outcome {
        Ok(result) if result.identical => 0,
        Ok(_) => 1,
        Err(_) => 2,
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let outcome = run(&cli, &mut std::io::stdout().lock());
    if let Err(e) = &outcome {
        eprintln!("{}: {:#}", "error".red().bold(), e);
    }
    ExitCode::from(exit_status(&outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::Path;

    fn files(left: &str, right: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("left.txt"), left).unwrap();
        std::fs::write(dir.path().join("right.txt"), right).unwrap();
        dir
    }

    fn cli(dir: &Path, flags: &[&str]) -> Cli {
        let left = dir.join("left.txt");
        let right = dir.join("right.txt");
        let mut args = vec!["diff-view", left.to_str().unwrap(), right.to_str().unwrap()];
        args.extend_from_slice(&["--color", "never"]);
        args.extend_from_slice(flags);
        Cli::try_parse_from(args).unwrap()
    }

    fn run_to_string(cli: &Cli) -> (Result<DiffResult>, String) {
        let mut out = Vec::new();
        let outcome = run(cli, &mut out);
        (outcome, String::from_utf8(out).unwrap())
    }

    #[test]
    fn identical_files_exit_zero() {
        let dir = files("a\nb\n", "a\nb\n");
        let (outcome, out) = run_to_string(&cli(dir.path(), &[]));
        assert_eq!(exit_status(&outcome), 0);
        assert!(out.ends_with("Files are identical\n"), "{out}");
    }

    #[test]
    fn different_files_exit_one() {
        let dir = files("a\nb\n", "a\nx\n");
        let (outcome, out) = run_to_string(&cli(dir.path(), &["--mode", "inline"]));
        assert_eq!(exit_status(&outcome), 1);
        assert!(out.ends_with("1 difference (1 added, 1 removed, 1 unchanged)\n"), "{out}");
    }

    #[test]
    fn block_out_of_range_exits_two() {
        let dir = files("a\n", "b\n");
        for k in ["0", "2"] {
            let (outcome, out) = run_to_string(&cli(dir.path(), &["--block", k]));
            assert_eq!(exit_status(&outcome), 2);
            assert!(out.is_empty());
            let message = outcome.unwrap_err().to_string();
            assert!(message.contains("1 difference(s)"), "{message}");
        }
    }

    #[test]
    fn block_shows_one_difference() {
        let dir = files("a\nb\nc\nd\ne\n", "A\nb\nc\nd\nE\n");
        let (outcome, out) =
            run_to_string(&cli(dir.path(), &["--block", "2", "-C", "0", "--mode", "inline"]));
        assert_eq!(exit_status(&outcome), 1);
        assert!(out.starts_with("[2/2]\n"), "{out}");
        assert!(out.contains("- e") && out.contains("+ E"), "{out}");
        assert!(!out.contains("- a"), "{out}");
    }

    #[test]
    fn json_output_round_trips() {
        let dir = files("a\nb\n", "a\nc\n");
        let (outcome, out) = run_to_string(&cli(dir.path(), &["--json"]));
        let parsed: DiffResult = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed, outcome.unwrap());
        assert_eq!(parsed.total_diffs(), 1);
    }

    #[test]
    fn options_map_onto_diff_options() {
        let dir = files("", "");
        let cli = cli(dir.path(), &["-i", "-w", "--algorithm", "histogram"]);
        let options = cli.options();
        assert!(options.ignore_case && options.ignore_whitespace);
        assert!(!options.ignore_blank_lines);
        assert_eq!(options.algorithm, DiffAlgorithm::Histogram);
    }

    #[test]
    fn usage_errors_exit_two() {
        let err = Cli::try_parse_from(["diff-view", "only-one"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        let err = Cli::try_parse_from(["diff-view", "a", "b", "--algorithm", "fast"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
