//! # gitcd CLI Entry Point
//!
//! Index git projects once, then jump to them by a fragment of their path.
//!
//! ## Usage
//!
//! ```bash
//! # Index every git project under $GITCD_PROJECT_HOME (or $HOME)
//! gitcd --scan
//!
//! # Show the ten most used projects and pick one
//! gitcd
//!
//! # Jump to the best match for a search; several terms must appear in order
//! gitcd api
//! gitcd work api server
//!
//! # Forget projects that were deleted, or wipe everything and rescan
//! gitcd --clean
//! gitcd --reset
//! ```
//!
//! The actual directory change is done by a shell wrapper that sources the
//! script gitcd writes (see [`gitcd::shell`]).

use gitcd::config::Config;
use gitcd::logging;
use gitcd::registry::{compose_expression, Registry, RegistryError, DEFAULT_TOP_N};
use gitcd::scan;
use gitcd::shell::{self, Selection};

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::time::Instant;
use tracing::{debug, info};

/// How an invocation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Success,
    Failure,
    /// The search expression is not a valid regular expression
    InvalidPattern,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => ExitCode::SUCCESS,
            Outcome::Failure => ExitCode::FAILURE,
            Outcome::InvalidPattern => ExitCode::from(2),
        }
    }
}

/// gitcd - index your git projects and jump to them
#[derive(Parser, Debug)]
#[command(name = "gitcd")]
#[command(author = "thecheerfuldev")]
#[command(version = concat!(
    "version ",
    env!("CARGO_PKG_VERSION"),
    " - © Mark Hendriks <thecheerfuldev>"
))]
#[command(
    about = "Index your git projects and jump to them",
    long_about = "gitcd is a CLI tool that lets you easily index and navigate to git projects.\n\
                  If you don't provide a search term, your ten most used projects are shown."
)]
struct Args {
    /// Search terms (regular expressions); several terms must appear in order
    #[arg(value_name = "TERM")]
    terms: Vec<String>,

    /// Scan for git projects in $GITCD_PROJECT_HOME
    #[arg(long)]
    scan: bool,

    /// Remove all projects that no longer exist
    #[arg(long)]
    clean: bool,

    /// Reset the database and scan for git projects in $GITCD_PROJECT_HOME
    #[arg(long)]
    reset: bool,

    /// Print debug diagnostics to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = logging::init_logging(args.verbose) {
        eprintln!("Warning: {:#}", e);
    }

    let start = Instant::now();
    let code = match run(&args) {
        Ok(outcome) => ExitCode::from(outcome),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    };
    debug!(elapsed = ?start.elapsed(), "Finished");

    code
}

fn run(args: &Args) -> Result<Outcome> {
    let config = Config::from_env()?;
    config.init()?;

    let mut registry = Registry::open(config.registry_options())
        .context("unable to open gitcd database file")?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let outcome = dispatch(
        args,
        &config,
        &mut registry,
        &mut stdin.lock(),
        &mut stdout.lock(),
    );

    // Persist once, whatever happened above
    let flushed = registry
        .flush()
        .context("Failed to save project database");

    let outcome = outcome?;
    flushed?;
    Ok(outcome)
}

fn dispatch<R, W>(
    args: &Args,
    config: &Config,
    registry: &mut Registry,
    input: &mut R,
    output: &mut W,
) -> Result<Outcome>
where
    R: BufRead,
    W: Write,
{
    if args.reset {
        registry.reset_all();
        return handle_scan(config, registry, output);
    }

    if args.scan {
        return handle_scan(config, registry, output);
    }

    if registry.is_empty() {
        writeln!(
            output,
            "Your database appears to be empty. Run gitcd with the --scan flag to index your git projects."
        )?;
        return Ok(Outcome::Failure);
    }

    if args.clean {
        for path in scan::clean_stale(registry) {
            writeln!(output, "Removed: {}", path)?;
        }
        return Ok(Outcome::Success);
    }

    if args.terms.is_empty() {
        let top = registry.top_n(DEFAULT_TOP_N);
        return handle_multiple_matches(config, registry, &top, input, output);
    }

    let expression = compose_expression(&args.terms);
    debug!(expression = %expression, "Searching projects");

    let matches = match registry.match_pattern(&expression) {
        Ok(matches) => matches,
        Err(RegistryError::InvalidPattern(e)) => {
            writeln!(output, "Invalid regular expression: {}", e)?;
            return Ok(Outcome::InvalidPattern);
        }
        Err(e) => return Err(e.into()),
    };

    match matches.as_slice() {
        [] => {
            writeln!(output, "No projects found.")?;
            Ok(Outcome::Success)
        }
        [single] => handle_single_match(config, registry, single, output),
        _ => handle_multiple_matches(config, registry, &matches, input, output),
    }
}

fn handle_scan<W: Write>(
    config: &Config,
    registry: &mut Registry,
    output: &mut W,
) -> Result<Outcome> {
    match scan::discover_projects_with_progress(&config.project_root, registry) {
        Ok(report) => {
            info!(
                discovered = report.discovered,
                added = report.added,
                "Scan finished"
            );
            Ok(Outcome::Success)
        }
        Err(e) => {
            writeln!(output, "{:#}", e)?;
            Ok(Outcome::Failure)
        }
    }
}

fn handle_single_match<W: Write>(
    config: &Config,
    registry: &mut Registry,
    path: &str,
    output: &mut W,
) -> Result<Outcome> {
    shell::write_cd_script(&config.dir_changer_path, &shell::current_shell(), path)?;
    let count = registry.record_use(path)?;
    debug!(path, count, "Recorded project use");
    writeln!(output, "Changing directory to: {}", path)?;
    Ok(Outcome::Success)
}

fn handle_multiple_matches<R, W>(
    config: &Config,
    registry: &mut Registry,
    matches: &[String],
    input: &mut R,
    output: &mut W,
) -> Result<Outcome>
where
    R: BufRead,
    W: Write,
{
    match shell::prompt_selection(matches, input, output)? {
        Selection::Chosen(index) => handle_single_match(config, registry, &matches[index], output),
        Selection::Quit => {
            writeln!(output, "Quitting.")?;
            Ok(Outcome::Success)
        }
        Selection::Invalid => {
            writeln!(output, "Invalid choice.")?;
            Ok(Outcome::Failure)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    struct Fixture {
        _temp_dir: TempDir,
        config: Config,
        registry: Registry,
    }

    fn fixture(records: &str) -> Fixture {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::with_home(temp_dir.path(), |_| None).unwrap();
        config.init().unwrap();
        fs::write(&config.database_path, records).unwrap();
        let registry = Registry::open(config.registry_options()).unwrap();
        Fixture {
            _temp_dir: temp_dir,
            config,
            registry,
        }
    }

    fn args(argv: &[&str]) -> Args {
        Args::parse_from(std::iter::once("gitcd").chain(argv.iter().copied()))
    }

    fn run_with(fx: &mut Fixture, argv: &[&str], input: &str) -> (Outcome, String) {
        let mut input = input.as_bytes();
        let mut output = Vec::new();
        let code = dispatch(
            &args(argv),
            &fx.config,
            &mut fx.registry,
            &mut input,
            &mut output,
        )
        .unwrap();
        (code, String::from_utf8(output).unwrap())
    }

    fn script(config: &Config) -> String {
        fs::read_to_string(&config.dir_changer_path).unwrap()
    }

    #[test]
    fn test_version_banner() {
        use clap::CommandFactory;

        assert_eq!(
            Args::command().render_version(),
            format!(
                "gitcd version {} - © Mark Hendriks <thecheerfuldev>\n",
                env!("CARGO_PKG_VERSION")
            )
        );
    }

    #[test]
    fn test_args_parsing_terms() {
        let parsed = args(&["work", "api"]);
        assert_eq!(parsed.terms, vec!["work", "api"]);
        assert!(!parsed.scan && !parsed.clean && !parsed.reset);
    }

    #[test]
    fn test_args_parsing_flags() {
        let parsed = args(&["--scan", "--verbose"]);
        assert!(parsed.scan);
        assert!(parsed.verbose);
        assert!(parsed.terms.is_empty());
    }

    #[test]
    fn test_empty_database_reports_onboarding() {
        let mut fx = fixture("");
        let (code, out) = run_with(&mut fx, &["api"], "");
        assert_eq!(code, Outcome::Failure);
        assert!(out.contains("--scan"));
        assert!(!fx.registry.is_modified());
    }

    #[test]
    fn test_single_match_changes_directory() {
        let mut fx = fixture("/w/api;4\n/w/web;1\n");
        let (code, out) = run_with(&mut fx, &["api"], "");

        assert_eq!(code, Outcome::Success);
        assert_eq!(out, "Changing directory to: /w/api\n");
        assert_eq!(fx.registry.get("/w/api").unwrap().usage_count, 5);
        assert!(script(&fx.config).contains("cd '/w/api'"));
    }

    #[test]
    fn test_multiple_terms_are_composed() {
        let mut fx = fixture("/work/api/server;0\n/server/api;0\n");
        let (code, out) = run_with(&mut fx, &["api", "server"], "");

        assert_eq!(code, Outcome::Success);
        assert_eq!(out, "Changing directory to: /work/api/server\n");
    }

    #[test]
    fn test_multiple_matches_prompt() {
        let mut fx = fixture("/w/api;1\n/w/app;9\n");
        let (code, out) = run_with(&mut fx, &["/w/ap"], "2\n");

        assert_eq!(code, Outcome::Success);
        assert!(out.starts_with("1) /w/app\n2) /w/api\nSelect a project: "));
        assert!(out.ends_with("Changing directory to: /w/api\n"));
        assert_eq!(fx.registry.get("/w/api").unwrap().usage_count, 2);
    }

    #[test]
    fn test_top_ten_without_terms() {
        let mut fx = fixture("/a;1\n/b;3\n");
        let (code, out) = run_with(&mut fx, &[], "q\n");

        assert_eq!(code, Outcome::Success);
        assert!(out.starts_with("1) /b\n2) /a\n"));
        assert!(out.ends_with("Quitting.\n"));
        assert!(!fx.registry.is_modified());
    }

    #[test]
    fn test_invalid_choice() {
        let mut fx = fixture("/a;1\n/b;3\n");
        let (code, out) = run_with(&mut fx, &[], "7\n");

        assert_eq!(code, Outcome::Failure);
        assert!(out.ends_with("Invalid choice.\n"));
        assert!(!fx.config.dir_changer_path.exists());
    }

    #[test]
    fn test_no_matches() {
        let mut fx = fixture("/a;1\n");
        let (code, out) = run_with(&mut fx, &["zzz"], "");

        assert_eq!(code, Outcome::Success);
        assert_eq!(out, "No projects found.\n");
        assert!(!fx.registry.is_modified());
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let mut fx = fixture("/a;1\n");
        let (code, out) = run_with(&mut fx, &[".*("], "");

        assert_eq!(code, Outcome::InvalidPattern);
        assert!(out.starts_with("Invalid regular expression"));
        assert!(!fx.registry.is_modified());
    }

    #[test]
    fn test_clean_removes_stale_projects() {
        let mut fx = fixture("/nonexistent/gitcd/project;3\n");
        let (code, out) = run_with(&mut fx, &["--clean"], "");

        assert_eq!(code, Outcome::Success);
        assert_eq!(out, "Removed: /nonexistent/gitcd/project\n");
        assert!(fx.registry.is_empty());
    }

    #[test]
    fn test_reset_rescans_project_root() {
        let mut fx = fixture("/old/project;12\n");
        let root = fx.config.project_root.canonicalize().unwrap();
        fs::create_dir_all(root.join("code/fresh/.git")).unwrap();

        let (code, _) = run_with(&mut fx, &["--reset"], "");

        assert_eq!(code, Outcome::Success);
        assert!(fx.registry.get("/old/project").is_none());
        let fresh = root.join("code/fresh");
        assert!(fx.registry.contains(fresh.to_str().unwrap()));
    }

    #[test]
    fn test_scan_missing_root() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing");
        let missing_str = missing.to_str().unwrap().to_string();
        let config = Config::with_home(temp_dir.path(), |key| {
            (key == gitcd::config::PROJECT_HOME_ENV).then(|| missing_str.clone())
        })
        .unwrap();
        config.init().unwrap();
        let mut registry = Registry::open(config.registry_options()).unwrap();

        let mut output = Vec::new();
        let code = handle_scan(&config, &mut registry, &mut output).unwrap();

        assert_eq!(code, Outcome::Failure);
        assert!(String::from_utf8(output).unwrap().contains("does not exist"));
        assert!(!missing.exists());
    }
}
