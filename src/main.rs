// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Command-line interface for the gitfolio binary.
//!
//! The CLI loads a portfolio configuration and either resolves the full page
//! view, prints the sanitized configuration, or inspects and updates the
//! persisted theme preference.

use std::{io, path::PathBuf, process, sync::Arc, time::Duration};

use clap::{ArgAction, Args, Parser, Subcommand};
use gitfolio::{
    DEFAULT_THEME_STORE, Error, FileThemeStore, HttpSource, Orchestrator, RawConfig,
    RenderDocument, TracingAnalytics, ViewState, change_theme, initial_theme, load_config,
    sanitize,
};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive.
const LOG_ENV: &str = "GITFOLIO_LOG";

/// Resolve a portfolio configuration into a render-ready view.
#[derive(Debug, Parser,)]
#[command(name = "gitfolio", version, about = "Resolve a GitHub portfolio page")]
struct Cli
{
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Debug, Subcommand,)]
enum Command
{
    /// Load remote data and print the resolved view state.
    Build,
    /// Print the sanitized configuration.
    Sanitize,
    /// Print the initial theme or persist a new one.
    Theme(ThemeArgs,),
}

#[derive(Debug, Args,)]
struct CommonArgs
{
    /// Path to the YAML portfolio configuration.
    #[arg(long = "config", value_name = "PATH", env = "GITFOLIO_CONFIG", global = true)]
    config: Option<PathBuf,>,

    /// Output formatted JSON for easier inspection.
    #[arg(long = "pretty", action = ArgAction::SetTrue, global = true)]
    pretty: bool,

    /// Budget in seconds for each remote request.
    #[arg(long = "timeout-secs", value_name = "SECS", default_value_t = 15, global = true)]
    timeout_secs: u64,

    /// File holding the persisted theme preference.
    #[arg(long = "theme-store", value_name = "PATH", default_value = DEFAULT_THEME_STORE, global = true)]
    theme_store: PathBuf,

    /// System color-scheme hint used when the configuration respects it.
    #[arg(long = "prefers-dark", value_name = "BOOL", global = true)]
    prefers_dark: Option<bool,>,
}

#[derive(Debug, Args,)]
struct ThemeArgs
{
    /// Theme to persist; must be one of the configured themes.
    #[arg(long = "set", value_name = "NAME")]
    set: Option<String,>,
}

#[derive(Debug, Serialize,)]
struct ThemeReport
{
    theme:     String,
    persisted: bool,
}

/// Entry point that reports errors and sets the appropriate exit status.
fn main()
{
    init_tracing();
    if let Err(error,) = run() {
        eprintln!("{}", error.to_display_string());
        process::exit(1,);
    }
}

fn init_tracing()
{
    let filter = EnvFilter::try_from_env(LOG_ENV,).unwrap_or_else(|_| EnvFilter::new("warn",),);
    let _ = tracing_subscriber::fmt().with_env_filter(filter,).with_writer(io::stderr,).try_init();
}

/// Executes the CLI using parsed arguments.
///
/// # Errors
///
/// Propagates configuration loading, validation and serialization errors.
/// Remote failures are part of the printed view state, not errors.
fn run() -> Result<(), Error,>
{
    let cli = Cli::parse();

    match cli.command {
        Command::Build => run_build(&cli.common,),
        Command::Sanitize => run_sanitize(&cli.common, &mut io::stdout().lock(),),
        Command::Theme(args,) => run_theme(&cli.common, &args, &mut io::stdout().lock(),),
    }
}

fn load_raw(common: &CommonArgs,) -> Result<RawConfig, Error,>
{
    let path = common
        .config
        .as_deref()
        .ok_or_else(|| Error::validation("missing required --config <PATH> argument",),)?;
    debug!("Loading configuration from {}", path.display());
    load_config(path,)
}

fn run_build(common: &CommonArgs,) -> Result<(), Error,>
{
    let raw = load_raw(common,)?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| Error::service(format!("failed to start async runtime: {e}"),),)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.yellow} [{elapsed_precise}] {msg}",)
            .unwrap_or_else(|_| ProgressStyle::default_spinner(),),
    );
    spinner.enable_steady_tick(Duration::from_millis(100,),);
    spinner.set_message("Loading portfolio data...",);

    let state = runtime.block_on(resolve_view(common, &raw,),);
    spinner.finish_and_clear();
    let state = state?;

    write_document(&mut io::stdout().lock(), &RenderDocument::new(&state,), common.pretty,)
}

async fn resolve_view(common: &CommonArgs, raw: &RawConfig,) -> Result<ViewState, Error,>
{
    let orchestrator = Orchestrator::new(
        Arc::new(HttpSource::public()?,),
        Arc::new(FileThemeStore::new(&common.theme_store,),),
        Arc::new(TracingAnalytics,),
    )
    .with_timeout(Duration::from_secs(common.timeout_secs,),)
    .with_color_scheme_hint(common.prefers_dark,);

    Ok(orchestrator.mount(raw,).await,)
}

fn run_sanitize<W: io::Write,>(common: &CommonArgs, writer: &mut W,) -> Result<(), Error,>
{
    let config = sanitize(&load_raw(common,)?,)?;
    write_document(writer, &config, common.pretty,)
}

fn run_theme<W: io::Write,>(
    common: &CommonArgs,
    args: &ThemeArgs,
    writer: &mut W,
) -> Result<(), Error,>
{
    let config = sanitize(&load_raw(common,)?,)?;
    let store = FileThemeStore::new(&common.theme_store,);

    let report = match args.set.as_deref() {
        Some(theme,) => ThemeReport {
            theme:     change_theme(&config.theme_config, &store, theme,)?,
            persisted: true,
        },
        None => ThemeReport {
            theme:     initial_theme(&config.theme_config, &store, common.prefers_dark,),
            persisted: false,
        },
    };
    write_document(writer, &report, common.pretty,)
}

fn write_document<W: io::Write, T: Serialize,>(
    writer: &mut W,
    document: &T,
    pretty: bool,
) -> Result<(), Error,>
{
    if pretty {
        serde_json::to_writer_pretty(writer, document,)?;
    } else {
        serde_json::to_writer(writer, document,)?;
    }

    Ok((),)
}

#[cfg(test)]
mod tests
{
    use std::{fs, io::Cursor, path::Path};

    use clap::Parser;
    use tempfile::tempdir;

    use super::{Cli, Command, ThemeArgs, run_sanitize, run_theme, write_document};

    fn parse(args: &[&str],) -> Cli
    {
        let mut argv = vec![env!("CARGO_PKG_NAME")];
        argv.extend_from_slice(args,);
        Cli::try_parse_from(argv,).expect("failed to parse CLI",)
    }

    #[test]
    fn build_accepts_global_flags_after_subcommand()
    {
        let cli = parse(&["build", "--config", "portfolio.yaml", "--pretty", "--timeout-secs", "3"],);

        assert!(matches!(cli.command, Command::Build));
        assert_eq!(cli.common.config.as_deref(), Some(Path::new("portfolio.yaml")));
        assert!(cli.common.pretty);
        assert_eq!(cli.common.timeout_secs, 3);
        assert_eq!(cli.common.theme_store, Path::new(".gitfolio-theme.json"));
        assert!(cli.common.prefers_dark.is_none());
    }

    #[test]
    fn theme_subcommand_parses_set_and_hint()
    {
        let cli = parse(&["--prefers-dark", "true", "theme", "--set", "dracula"],);
        match cli.command {
            Command::Theme(args,) => assert_eq!(args.set.as_deref(), Some("dracula")),
            other => panic!("unexpected command variant: {other:?}"),
        }
        assert_eq!(cli.common.prefers_dark, Some(true));
    }

    #[test]
    fn write_document_switches_between_pretty_and_compact()
    {
        let document = serde_json::json!({ "theme": "lofi" });

        let mut compact = Cursor::new(Vec::new(),);
        write_document(&mut compact, &document, false,).expect("failed to serialize",);
        assert_eq!(String::from_utf8(compact.into_inner(),).expect("invalid UTF-8",), "{\"theme\":\"lofi\"}");

        let mut pretty = Cursor::new(Vec::new(),);
        write_document(&mut pretty, &document, true,).expect("failed to serialize",);
        assert_eq!(
            String::from_utf8(pretty.into_inner(),).expect("invalid UTF-8",),
            "{\n  \"theme\": \"lofi\"\n}"
        );
    }

    #[test]
    fn sanitize_reports_invalid_configuration()
    {
        let temp = tempdir().expect("failed to create tempdir",);
        let config_path = temp.path().join("portfolio.yaml",);
        fs::write(&config_path, "github:\n  username: '   '\n",).expect("failed to write config",);

        let cli = parse(&["sanitize", "--config", config_path.to_str().expect("utf-8 path",)],);
        let mut buffer = Cursor::new(Vec::new(),);
        let error = run_sanitize(&cli.common, &mut buffer,).expect_err("expected validation error",);

        match error {
            gitfolio::Error::Validation {
                message,
            } => assert_eq!(message, "github.username must be provided"),
            other => panic!("unexpected error variant: {other:?}"),
        }
        assert!(buffer.into_inner().is_empty());
    }

    #[test]
    fn sanitize_prints_defaulted_configuration()
    {
        let temp = tempdir().expect("failed to create tempdir",);
        let config_path = temp.path().join("portfolio.yaml",);
        fs::write(&config_path, "github: { username: octocat }\n",).expect("failed to write config",);

        let cli = parse(&["sanitize", "--config", config_path.to_str().expect("utf-8 path",)],);
        let mut buffer = Cursor::new(Vec::new(),);
        run_sanitize(&cli.common, &mut buffer,).expect("failed to sanitize",);

        let document: serde_json::Value =
            serde_json::from_slice(&buffer.into_inner(),).expect("valid json",);
        assert_eq!(document["github"]["username"], "octocat");
        assert_eq!(document["themeConfig"]["defaultTheme"], "lofi");
    }

    #[test]
    fn theme_set_persists_and_is_read_back()
    {
        let temp = tempdir().expect("failed to create tempdir",);
        let config_path = temp.path().join("portfolio.yaml",);
        let store_path = temp.path().join("theme.json",);
        fs::write(&config_path, "github: { username: octocat }\n",).expect("failed to write config",);

        let cli = parse(&[
            "theme",
            "--config",
            config_path.to_str().expect("utf-8 path",),
            "--theme-store",
            store_path.to_str().expect("utf-8 path",),
        ],);

        let set = ThemeArgs {
            set: Some("night".to_owned(),),
        };
        let mut buffer = Cursor::new(Vec::new(),);
        run_theme(&cli.common, &set, &mut buffer,).expect("failed to persist theme",);
        assert_eq!(
            String::from_utf8(buffer.into_inner(),).expect("invalid UTF-8",),
            "{\"theme\":\"night\",\"persisted\":true}"
        );

        let read = ThemeArgs {
            set: None,
        };
        let mut buffer = Cursor::new(Vec::new(),);
        run_theme(&cli.common, &read, &mut buffer,).expect("failed to read theme",);
        assert_eq!(
            String::from_utf8(buffer.into_inner(),).expect("invalid UTF-8",),
            "{\"theme\":\"night\",\"persisted\":false}"
        );
    }
}
