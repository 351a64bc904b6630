//! CLI entry point for depgate.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and exit codes.
//! All business logic lives in the `depgate-app` crate.

mod gha;
mod git;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, Parser, Subcommand, ValueEnum};
use depgate_app::{
    ChangeSetError, CheckError, CheckInput, EventSourceInput, ExplainOutput, collect_event_files,
    config_data, parse_report_json, render_annotations, render_console, render_fatal_annotation,
    render_markdown, run_check, run_explain, runtime_error_report, serialize_report,
    to_renderable, verdict_exit_code, violations_output,
};
use depgate_remote::{DEFAULT_API_URL, HttpPolicySource};
use depgate_repo::FsManifestReader;
use depgate_settings::{ConfigError, DepgateConfigV1, Overrides, ResolvedConfig};
use depgate_types::{DepgateData, DepgateReportV1, ids};

#[derive(Parser, Debug)]
#[command(
    name = "depgate",
    version,
    about = "Dependency policy gate for package.json manifests changed in CI"
)]
struct Cli {
    /// Repository root (the checked-out working tree).
    #[arg(long, default_value = ".")]
    repo_root: Utf8PathBuf,

    /// Path to depgate config TOML, relative to the repository root.
    #[arg(long, default_value = "depgate.toml")]
    config: Utf8PathBuf,

    /// Log level for diagnostics on stderr (RUST_LOG takes precedence).
    #[arg(long, value_enum, default_value = "info", env = "DEPGATE_LOG_LEVEL")]
    log_level: LogLevel,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    None,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate changed manifests against the policy and write artifacts.
    Check(CheckArgs),

    /// Render markdown from an existing JSON report.
    Md {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/depgate/report.json")]
        report: Utf8PathBuf,

        /// Where to write the Markdown output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Render GitHub Actions annotations from an existing JSON report.
    Annotations {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/depgate/report.json")]
        report: Utf8PathBuf,

        /// Maximum number of annotations to emit.
        #[arg(long, default_value = "10")]
        max: usize,
    },

    /// Explain a check_id or code with remediation guidance.
    Explain {
        /// The check_id (e.g., "policy.allow") or code (e.g., "package_not_allowed") to explain.
        identifier: String,
    },
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// Policy mode: allow or prohibit.
    #[arg(long, env = "INPUT_POLICY")]
    policy: Option<String>,

    /// URL of the JSON policy document.
    #[arg(long, env = "INPUT_POLICY-URL")]
    policy_url: Option<String>,

    /// Token used to list commits through the GitHub API.
    #[arg(long, env = "INPUT_GITHUB-TOKEN", hide_env_values = true)]
    github_token: Option<String>,

    /// Fail the run when violations are found (true|false).
    #[arg(long, env = "INPUT_FAIL-IF-VIOLATIONS", num_args = 0..=1, default_missing_value = "true")]
    fail_if_violations: Option<String>,

    /// Also evaluate devDependencies (true|false).
    #[arg(long, env = "INPUT_INCLUDE-DEV-DEPENDENCIES", num_args = 0..=1, default_missing_value = "true")]
    include_dev_dependencies: Option<String>,

    /// Read the change-set from a file (one path per line) instead of the GitHub event.
    #[arg(long, conflicts_with_all = ["base", "head"])]
    changed_files: Option<Utf8PathBuf>,

    /// Read the change-set from local git history: base revision (e.g. origin/main).
    #[arg(long, requires = "head")]
    base: Option<String>,

    /// Read the change-set from local git history: head revision (e.g. HEAD).
    #[arg(long, requires = "base")]
    head: Option<String>,

    #[arg(long, env = "GITHUB_EVENT_NAME", hide = true)]
    event_name: Option<String>,

    #[arg(long, env = "GITHUB_EVENT_PATH", hide = true)]
    event_path: Option<Utf8PathBuf>,

    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL, hide = true)]
    api_url: String,

    #[arg(long, env = "GITHUB_REPOSITORY", hide = true)]
    repository: Option<String>,

    #[arg(long, env = "GITHUB_OUTPUT", hide = true)]
    github_output: Option<Utf8PathBuf>,

    #[arg(long, env = "GITHUB_ACTIONS", hide = true)]
    github_actions: Option<String>,

    /// Where to write the JSON report.
    #[arg(long, default_value = "artifacts/depgate/report.json")]
    report_out: Utf8PathBuf,

    /// Write a Markdown report alongside the JSON.
    #[arg(long)]
    write_markdown: bool,

    /// Where to write the Markdown report (if enabled).
    #[arg(long, default_value = "artifacts/depgate/comment.md")]
    markdown_out: Utf8PathBuf,

    /// Maximum number of annotations to emit when running inside GitHub Actions.
    #[arg(long, default_value = "10")]
    max_annotations: usize,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    match &cli.cmd {
        Commands::Check(args) => cmd_check(&cli, args),
        Commands::Md { report, output } => cmd_md(report, output.as_deref()),
        Commands::Annotations { report, max } => cmd_annotations(report, *max),
        Commands::Explain { identifier } => cmd_explain(identifier),
    }
}

fn init_logging(log_level: LogLevel) {
    let level = match log_level {
        LogLevel::None => return,
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
        .init();
}

fn cmd_check(cli: &Cli, args: &CheckArgs) -> anyhow::Result<()> {
    let repo_root = cli
        .repo_root
        .canonicalize_utf8()
        .unwrap_or_else(|_| cli.repo_root.clone());

    let mut data = DepgateData::default();

    let result = (|| -> anyhow::Result<i32> {
        if !repo_root.exists() {
            anyhow::bail!("repo root does not exist: {}", repo_root);
        }

        let resolved = resolve(&repo_root.join(&cli.config), args)?;
        log::debug!("resolved config: {resolved:?}");

        let changed_files = collect_change_set(&repo_root, args, &resolved)?;
        data = config_data(&resolved.effective, changed_files.len());

        let input = CheckInput {
            config: resolved.effective.clone(),
            changed_files,
        };
        let reader = FsManifestReader::new(repo_root.clone());
        let policy_source = HttpPolicySource::new()?;

        let output = run_check(&input, &reader, &policy_source)?;

        publish(args, &output.report)?;
        Ok(verdict_exit_code(output.report.verdict))
    })();

    match result {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(err) => {
            let report = runtime_error_report(error_code(&err), &format!("{err:#}"), data);
            let _ = write_report_file(&args.report_out, &report);
            if gha::running_in_actions(args.github_actions.as_deref()) {
                println!("{}", render_fatal_annotation(&format!("{err:#}")));
            }
            eprintln!("depgate error: {err:#}");
            std::process::exit(1);
        }
    }
}

/// Inputs over `depgate.toml` over defaults. A missing config file is allowed.
fn resolve(cfg_path: &Utf8Path, args: &CheckArgs) -> anyhow::Result<ResolvedConfig> {
    let cfg_text = std::fs::read_to_string(cfg_path).unwrap_or_default();
    let cfg = if cfg_text.trim().is_empty() {
        DepgateConfigV1::default()
    } else {
        depgate_settings::parse_config_toml(&cfg_text)
            .with_context(|| format!("parse config: {cfg_path}"))?
    };

    let overrides = Overrides {
        policy: args.policy.clone(),
        policy_url: args.policy_url.clone(),
        github_token: args.github_token.clone(),
        fail_if_violations: args.fail_if_violations.clone(),
        include_dev_dependencies: args.include_dev_dependencies.clone(),
    };

    depgate_settings::resolve_config(cfg, overrides).context("resolve config")
}

fn collect_change_set(
    repo_root: &Utf8Path,
    args: &CheckArgs,
    resolved: &ResolvedConfig,
) -> anyhow::Result<Vec<String>> {
    if let Some(list) = &args.changed_files {
        return git::read_changed_files_list(&repo_root.join(list));
    }

    if let (Some(base), Some(head)) = (&args.base, &args.head) {
        return git::git_changed_files(repo_root, base, head)
            .context("git log --name-status failed");
    }

    let Some(event_name) = args.event_name.as_deref() else {
        anyhow::bail!(
            "no change-set source: pass --changed-files, --base/--head, or run inside GitHub Actions"
        );
    };

    let payload = match &args.event_path {
        Some(path) => Some(
            std::fs::read_to_string(path).with_context(|| format!("read event payload: {path}"))?,
        ),
        None => None,
    };

    let files = collect_event_files(
        EventSourceInput {
            event_name,
            payload: payload.as_deref(),
            api_url: &args.api_url,
            repository: args.repository.as_deref(),
        },
        resolved,
    )?;
    Ok(files)
}

/// Report artifact, console log, step output, and annotations.
fn publish(args: &CheckArgs, report: &DepgateReportV1) -> anyhow::Result<()> {
    write_report_file(&args.report_out, report).context("write report json")?;

    let renderable = to_renderable(report);
    if args.write_markdown {
        let md = render_markdown(&renderable);
        write_text_file(&args.markdown_out, &md).context("write markdown")?;
    }

    print!("{}", render_console(&renderable));

    if let (Some(path), Some(value)) = (&args.github_output, violations_output(report)?) {
        gha::append_output(path, ids::OUTPUT_VIOLATIONS, &value)?;
    }

    if gha::running_in_actions(args.github_actions.as_deref()) {
        for annotation in render_annotations(&renderable, args.max_annotations) {
            println!("{annotation}");
        }
    }

    Ok(())
}

fn error_code(err: &anyhow::Error) -> &'static str {
    for cause in err.chain() {
        if cause.is::<ConfigError>() {
            return ids::CODE_CONFIG_ERROR;
        }
        if let Some(e) = cause.downcast_ref::<ChangeSetError>() {
            return e.code();
        }
        if let Some(e) = cause.downcast_ref::<CheckError>() {
            return e.code();
        }
    }
    ids::CODE_RUNTIME_ERROR
}

fn write_report_file(path: &Utf8Path, report: &DepgateReportV1) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {parent}"))?;
    }
    let data = serialize_report(report).context("serialize report")?;
    std::fs::write(path, data).with_context(|| format!("write report: {path}"))?;
    Ok(())
}

fn write_text_file(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {parent}"))?;
    }
    std::fs::write(path, text).with_context(|| format!("write text: {path}"))?;
    Ok(())
}

fn cmd_md(report_path: &Utf8Path, output: Option<&Utf8Path>) -> anyhow::Result<()> {
    let report_text = std::fs::read_to_string(report_path)
        .with_context(|| format!("read report: {report_path}"))?;
    let report = parse_report_json(&report_text)?;
    let md = render_markdown(&to_renderable(&report));

    if let Some(out_path) = output {
        write_text_file(out_path, &md).context("write markdown output")?;
    } else {
        print!("{md}");
    }

    Ok(())
}

fn cmd_annotations(report_path: &Utf8Path, max: usize) -> anyhow::Result<()> {
    let report_text = std::fs::read_to_string(report_path)
        .with_context(|| format!("read report: {report_path}"))?;
    let report = parse_report_json(&report_text)?;

    for annotation in render_annotations(&to_renderable(&report), max) {
        println!("{annotation}");
    }

    Ok(())
}

fn cmd_explain(identifier: &str) -> anyhow::Result<()> {
    match run_explain(identifier) {
        ExplainOutput::Found(exp) => {
            print!("{}", depgate_app::format_explanation(&exp));
            Ok(())
        }
        ExplainOutput::NotFound {
            identifier,
            available_check_ids,
            available_codes,
        } => {
            eprint!(
                "{}",
                depgate_app::format_not_found(&identifier, available_check_ids, available_codes)
            );
            std::process::exit(1);
        }
    }
}
