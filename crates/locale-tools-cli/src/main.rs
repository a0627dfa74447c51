// crates/locale-tools-cli/src/main.rs
// ============================================================================
// Module: Locale Tools CLI Entry Point
// Description: Command dispatcher for the translation audit and patch tools.
// Purpose: Provide a localized CLI over the locale-tools core library.
// Dependencies: clap, locale-tools-config, locale-tools-core, serde_json, thiserror.
// ============================================================================

//! ## Overview
//! `locale-tools` audits and patches the JSON locale catalogs that sit next to
//! an English reference catalog. All user-facing strings are routed through
//! the i18n catalog. Reports go to stdout; warnings and errors go to stderr.
//!
//! Semantic findings never fail `audit` unless `--strict` is given. I/O and
//! parse failures always do, and `patch` writes nothing until every catalog
//! has loaded and rendered.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use locale_tools_cli::i18n::Locale;
use locale_tools_cli::i18n::set_locale;
use locale_tools_cli::t;
use locale_tools_config::LocaleToolsConfig;
use locale_tools_core::AuditReport;
use locale_tools_core::PatchPlan;
use locale_tools_core::UpdateTable;
use locale_tools_core::audit_directory;
use locale_tools_core::plan_patch;
use locale_tools_core::render_key_list;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable for CLI locale selection.
const LANG_ENV: &str = "LOCALE_TOOLS_LANG";

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "locale-tools", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Preferred output language (overrides `LOCALE_TOOLS_LANG`).
    #[arg(long, value_enum, value_name = "LANG", global = true)]
    lang: Option<LangArg>,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Report empty, stale, missing, and untranslated keys per locale file.
    Audit(AuditCommand),
    /// Apply the built-in translation updates and reorder keys like the reference.
    Patch(PatchCommand),
}

/// Catalog location arguments shared by every subcommand.
#[derive(Args, Debug)]
struct CatalogArgs {
    /// Optional config file path (defaults to locale-tools.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Directory holding the reference and locale catalogs.
    #[arg(long, value_name = "DIR")]
    dir: Option<PathBuf>,
}

/// Arguments for the `audit` command.
#[derive(Args, Debug)]
struct AuditCommand {
    /// Catalog location settings.
    #[command(flatten)]
    catalogs: CatalogArgs,
    /// Report output format.
    #[arg(long, value_enum, default_value_t = AuditFormat::Text)]
    format: AuditFormat,
    /// Exit non-zero when any locale file has findings.
    #[arg(long, action = ArgAction::SetTrue)]
    strict: bool,
}

/// Arguments for the `patch` command.
#[derive(Args, Debug)]
struct PatchCommand {
    /// Catalog location settings.
    #[command(flatten)]
    catalogs: CatalogArgs,
    /// Report files that would change without writing them.
    #[arg(long, action = ArgAction::SetTrue)]
    check: bool,
}

/// Audit report output formats.
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
enum AuditFormat {
    /// Indented text blocks, one per locale file.
    Text,
    /// A JSON array of report objects.
    Json,
}

/// Supported CLI language selections.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum LangArg {
    /// English.
    En,
    /// Catalan.
    Ca,
}

/// Converts CLI language selections into locales.
impl From<LangArg> for Locale {
    fn from(value: LangArg) -> Self {
        match value {
            LangArg::En => Self::En,
            LangArg::Ca => Self::Ca,
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for localized error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a localized message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    let env_lang = std::env::var(LANG_ENV).ok();
    let locale = resolve_locale(cli.lang, env_lang.as_deref())?;
    set_locale(locale);
    if locale != Locale::En {
        write_stderr_line(&t!("i18n.disclaimer.machine_translated"))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Audit(command) => command_audit(&command),
        Commands::Patch(command) => command_patch(&command),
    }
}

/// Emits the top-level help message for the CLI.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    command.print_help().map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line("").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(())
}

/// Loads configuration and applies the `--dir` override.
fn load_config(args: &CatalogArgs) -> CliResult<LocaleToolsConfig> {
    LocaleToolsConfig::load(args.config.as_deref())
        .and_then(|config| config.with_messages_dir(args.dir.clone()))
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))
}

// ============================================================================
// SECTION: Audit Command
// ============================================================================

/// Executes the `audit` command.
fn command_audit(command: &AuditCommand) -> CliResult<ExitCode> {
    let config = load_config(&command.catalogs)?;
    let reports = audit_directory(&config.messages_dir, &config.reference, &config.locales)
        .map_err(|err| CliError::new(t!("audit.failed", error = err)))?;

    let output = match command.format {
        AuditFormat::Text => render_audit_text(&reports, &config.reference),
        AuditFormat::Json => render_audit_json(&reports)?,
    };
    write_stdout_bytes(output.as_bytes())
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;

    if !command.strict {
        return Ok(ExitCode::SUCCESS);
    }
    let dirty = reports.iter().filter(|report| !report.is_clean()).count();
    if dirty == 0 {
        return Ok(ExitCode::SUCCESS);
    }
    let count: usize = reports.iter().map(AuditReport::issue_count).sum();
    write_stderr_line(&t!("audit.strict.failed", count = count, files = dirty))
        .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    Ok(ExitCode::FAILURE)
}

/// Renders audit reports as indented text blocks.
fn render_audit_text(reports: &[AuditReport], reference: &str) -> String {
    let mut output = String::new();
    for report in reports {
        let lines = [
            t!("audit.report.header", file = report.file),
            t!("audit.report.empty", keys = render_key_list(&report.empty)),
            t!("audit.report.stale", keys = render_key_list(&report.stale)),
            t!("audit.report.missing", keys = render_key_list(&report.missing)),
            t!(
                "audit.report.english",
                reference = reference,
                keys = render_key_list(&report.english)
            ),
        ];
        for line in lines {
            output.push_str(&line);
            output.push('\n');
        }
        output.push('\n');
    }
    output
}

/// Renders audit reports as a pretty JSON array with a trailing newline.
fn render_audit_json(reports: &[AuditReport]) -> CliResult<String> {
    let mut output = serde_json::to_string_pretty(reports)
        .map_err(|err| CliError::new(t!("audit.render_failed", error = err)))?;
    output.push('\n');
    Ok(output)
}

// ============================================================================
// SECTION: Patch Command
// ============================================================================

/// Executes the `patch` command.
fn command_patch(command: &PatchCommand) -> CliResult<ExitCode> {
    let config = load_config(&command.catalogs)?;
    let plan = plan_patch(
        &config.messages_dir,
        &config.reference,
        &config.locales,
        &UpdateTable::builtin(),
    )
    .map_err(|err| CliError::new(t!("patch.failed", error = err)))?;

    if config.warn_skipped_updates {
        warn_skipped_updates(&plan)?;
    }
    if command.check {
        return check_patch_plan(&plan);
    }

    for file in plan.files() {
        file.write().map_err(|err| CliError::new(t!("patch.failed", error = err)))?;
        write_stdout_line(&t!("patch.updated", file = file.file))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    }
    write_stdout_line(&t!("patch.done"))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Emits one warning per update key absent from its target catalog.
fn warn_skipped_updates(plan: &PatchPlan) -> CliResult<()> {
    for file in plan.files() {
        for key in &file.outcome.skipped {
            write_stderr_line(&t!("patch.skipped_key", file = file.file, key = key))
                .map_err(|err| CliError::new(output_error("stderr", &err)))?;
        }
    }
    Ok(())
}

/// Reports drifted files without writing and fails when any exist.
fn check_patch_plan(plan: &PatchPlan) -> CliResult<ExitCode> {
    let mut drifted = false;
    for file in plan.drifted() {
        drifted = true;
        write_stderr_line(&t!("patch.check.drift", file = file.file))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }
    if drifted {
        return Ok(ExitCode::FAILURE);
    }
    write_stdout_line(&t!("patch.check.ok", count = plan.files().len()))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Locale Helpers
// ============================================================================

/// Resolves the CLI locale from flags or environment.
fn resolve_locale(lang: Option<LangArg>, env_lang: Option<&str>) -> CliResult<Locale> {
    if let Some(lang) = lang {
        return Ok(lang.into());
    }
    if let Some(value) = env_lang {
        return Locale::parse(value).ok_or_else(|| {
            CliError::new(t!("i18n.lang.invalid_env", env = LANG_ENV, value = value))
        });
    }
    Ok(Locale::En)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes raw bytes to stdout without adding a newline.
fn write_stdout_bytes(bytes: &[u8]) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    stdout.write_all(bytes)
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats a localized output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
