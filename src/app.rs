use std::io::Write;
use std::time::Duration;

use clap::{error::ErrorKind, CommandFactory, Parser};
use colored::Colorize;
use indexmap::IndexMap;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::time::Instant;

use crate::cli::args::CliArgs;
use crate::cli::validation;
use crate::clock;
use crate::config::{self, ConfigFile};
use crate::country::NeighbourScope;
use crate::fetch::{CountryClient, HttpFetcher, DEFAULT_BASE_URL};
use crate::output::{self, OutputFormat};
use crate::page::{DetailPage, ListingPage};
use crate::render::listing::CardLine;

fn print_banner() {
    const BANNER: &str = r#"
                       _                                 _
   ___ ___  _   _ _ __ | |_ _ __ _   _  ___ __ _ _ __ __| |___
  / __/ _ \| | | | '_ \| __| '__| | | |/ __/ _` | '__/ _` / __|
 | (_| (_) | |_| | | | | |_| |  | |_| | (_| (_| | | | (_| \__ \
  \___\___/ \__,_|_| |_|\__|_|   \__, |\___\__,_|_|  \__,_|___/
                                 |___/
       v0.1.0 - REST Countries browser
    "#;
    eprint!("{}", BANNER);
    eprintln!();
}

fn format_kv_line(label: &str, value: &str) {
    eprintln!(":: {:<10}: {}", label, value);
}

/// `-s, --q, --search <QUERY>`
fn arg_flags(arg: &clap::Arg) -> String {
    let mut parts: Vec<String> = arg.get_short().map(|s| format!("-{s}")).into_iter().collect();
    parts.extend(arg.get_long().map(|l| format!("--{l}")));
    parts.extend(
        arg.get_visible_aliases()
            .unwrap_or_default()
            .into_iter()
            .map(|a| format!("--{a}")),
    );
    let mut flags = parts.join(", ");
    if arg.get_action().takes_values() {
        let value = arg
            .get_value_names()
            .and_then(|names| names.first())
            .map(|name| name.as_str())
            .unwrap_or("VALUE");
        flags.push_str(&format!(" <{value}>"));
    }
    flags
}

fn render_custom_help() -> String {
    let cmd = CliArgs::command();
    let mut groups: IndexMap<&str, Vec<&clap::Arg>> = IndexMap::new();
    for arg in cmd.get_arguments().filter(|a| !a.is_hide_set()) {
        groups
            .entry(arg.get_help_heading().unwrap_or("Options"))
            .or_default()
            .push(arg);
    }

    let mut out = format!(
        "{} {}\n",
        cmd.get_name(),
        cmd.get_version().unwrap_or_default()
    );
    if let Some(about) = cmd.get_about() {
        out.push_str(&format!("{about}\n"));
    }
    if let Some(long_about) = cmd.get_long_about() {
        out.push_str(&format!("\n{long_about}\n"));
    }
    out.push_str(&format!("\nUsage: {} [OPTIONS]\n", cmd.get_name()));

    for (heading, args) in groups {
        out.push_str(&format!("\n{heading}:\n"));
        for arg in args {
            out.push_str(&format!("  {}\n", arg_flags(arg)));
            if let Some(help) = arg.get_help().map(|h| h.to_string()) {
                if !help.trim().is_empty() {
                    out.push_str(&format!("          {}\n", help.trim()));
                }
            }
        }
    }
    out
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_target(false)
        .try_init();
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum View {
    Listing { search: Option<String> },
    Detail { page_url: String },
    Clock { label: String },
}

#[derive(Clone, Debug)]
struct RunConfig {
    view: View,
    base_url: String,
    timeout: Duration,
    workers: usize,
    neighbours: NeighbourScope,
    card_line: CardLine,
    output: Option<String>,
    output_format: OutputFormat,
    no_color: bool,
}

fn build_run_config(args: CliArgs, cfg: ConfigFile) -> Result<RunConfig, String> {
    validation::validate(&args)?;

    let no_color = args.no_color || cfg.no_color.unwrap_or(false);
    let base_url = args
        .base_url
        .or(cfg.base_url)
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    if reqwest::Url::parse(&base_url).is_err() {
        return Err(format!("invalid base url '{base_url}'"));
    }

    let timeout = args.timeout.or(cfg.timeout).unwrap_or(10);
    if timeout == 0 {
        return Err("invalid timeout, expected positive integer".to_string());
    }
    let workers = args.workers.or(cfg.workers).unwrap_or(2).max(1);

    let neighbours = match args.neighbours.or(cfg.neighbours) {
        Some(raw) => NeighbourScope::parse(&raw)
            .ok_or_else(|| format!("invalid neighbours '{raw}', expected subregion or region"))?,
        None => NeighbourScope::default(),
    };
    let card_line = match args.card_line.or(cfg.card_line) {
        Some(raw) => CardLine::parse(&raw)
            .ok_or_else(|| format!("invalid card line '{raw}', expected datetime or region"))?,
        None => CardLine::default(),
    };

    let output_path = args
        .output
        .or(cfg.output)
        .map(|p| config::expand_tilde_string(&p));
    let output_format = match args.output_format.or(cfg.output_format) {
        Some(raw) => OutputFormat::parse(&raw)
            .ok_or_else(|| format!("invalid output format '{raw}'"))?,
        None => output_path
            .as_deref()
            .and_then(output::infer_format_from_path)
            .unwrap_or_default(),
    };

    let view = if let Some(label) = args.time {
        View::Clock { label }
    } else if let Some(code) = args.country {
        View::Detail {
            page_url: crate::utils::detail_href(code.trim()),
        }
    } else if let Some(page_url) = args.detail {
        View::Detail { page_url }
    } else {
        View::Listing {
            search: args.search,
        }
    };

    Ok(RunConfig {
        view,
        base_url,
        timeout: Duration::from_secs(timeout),
        workers,
        neighbours,
        card_line,
        output: output_path,
        output_format,
        no_color,
    })
}

fn spinner(message: &str, hidden: bool) -> Result<ProgressBar, String> {
    let pb = ProgressBar::new_spinner();
    pb.set_draw_target(if hidden {
        ProgressDrawTarget::hidden()
    } else {
        ProgressDrawTarget::stderr()
    });
    pb.enable_steady_tick(Duration::from_millis(120));
    pb.set_style(
        ProgressStyle::with_template(":: {spinner} {msg} [{elapsed_precise}]")
            .map_err(|e| format!("failed to build progress bar style: {e}"))?,
    );
    pb.set_message(message.to_string());
    Ok(pb)
}

async fn write_output(path: Option<&str>, rendered: &[u8]) -> Result<(), String> {
    match path {
        Some(path) => {
            let mut outfile = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(path)
                .await
                .map_err(|e| format!("failed to open output file: {e}"))?;
            outfile
                .write_all(rendered)
                .await
                .map_err(|_| "failed to write output file".to_string())?;
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(rendered)
                .and_then(|_| stdout.flush())
                .map_err(|e| format!("failed to write to stdout: {e}"))?;
        }
    }
    Ok(())
}

async fn run_async(run: RunConfig) -> Result<(), String> {
    if run.no_color {
        colored::control::set_override(false);
    }

    if let View::Clock { label } = &run.view {
        let line = format!("{}\n", clock::calculate_datetime(Some(label.as_str())));
        return write_output(run.output.as_deref(), line.as_bytes()).await;
    }

    print_banner();
    format_kv_line("Base URL", &run.base_url);
    format_kv_line("Timeout", &format!("{}s", run.timeout.as_secs()));
    let fmt_label = match run.output_format {
        OutputFormat::Text => "text",
        OutputFormat::Json => "json",
        OutputFormat::Html => "html",
    };
    format_kv_line("Format", fmt_label);
    if let Some(path) = run.output.as_deref() {
        format_kv_line("Output", path);
    }

    let fetcher = HttpFetcher::new(Some(run.timeout)).map_err(|e| e.to_string())?;
    let client = CountryClient::new(fetcher, &run.base_url);
    let now = Instant::now();

    let rendered = if let View::Detail { page_url } = &run.view {
        format_kv_line("Neighbours", run.neighbours.label());
        eprintln!();
        let pb = spinner("fetching country details", run.no_color)?;
        let page = DetailPage::load(&client, page_url, run.neighbours).await;
        pb.finish_and_clear();

        match page.record() {
            Some(record) => eprintln!(
                ":: {} :: {} neighbours by {}",
                record.common_name().green(),
                page.neighbour_names().len(),
                page.scope().label()
            ),
            None => eprintln!("{}", ":: Unable to fetch country details ::".red()),
        }
        output::render_detail(&page, run.output_format)
    } else {
        format_kv_line("Card line", run.card_line.label());
        eprintln!();
        let pb = spinner("fetching countries", run.no_color)?;
        let mut page = ListingPage::load(&client, run.card_line).await;
        pb.finish_and_clear();

        if page.load_failed() {
            eprintln!("{}", ":: Unable to fetch countries ::".red());
        } else {
            eprintln!(
                ":: {} countries loaded",
                page.search_controller().records().len().to_string().green()
            );
        }
        match &run.view {
            View::Listing {
                search: Some(query),
            } if !page.load_failed() => {
                page.search(query);
                eprintln!(
                    ":: Search '{}' matched {} countries",
                    query,
                    page.visible().len().to_string().green()
                );
            }
            _ => {}
        }
        output::render_listing(&page, run.output_format)
    };

    write_output(run.output.as_deref(), &rendered).await?;

    eprintln!();
    eprintln!(":: Completed :: took {}ms ::", now.elapsed().as_millis());
    Ok(())
}

pub fn run_cli() -> Result<(), String> {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp => {
                print!("{}", render_custom_help());
                return Ok(());
            }
            ErrorKind::DisplayVersion => {
                let cmd = CliArgs::command();
                print!("{}", cmd.render_version());
                return Ok(());
            }
            _ => return Err(e.to_string()),
        },
    };

    init_logging(args.verbose);

    let user_config_path = args.config.clone().map(|p| config::expand_tilde(&p));
    if args.init_config {
        let path = user_config_path
            .clone()
            .or_else(config::default_config_path)
            .ok_or_else(|| "could not determine config path".to_string())?;
        let status = if config::ensure_default_config_file(&path)? {
            "created"
        } else {
            "already exists"
        };
        format_kv_line("Config", &format!("{} ({status})", path.display()));
        return Ok(());
    }

    let cfg = match user_config_path.as_ref() {
        Some(path) => config::load_config(path, false)?,
        None => match config::default_config_path() {
            Some(path) => config::load_config(&path, true)?,
            None => ConfigFile::default(),
        },
    };

    let run = build_run_config(args, cfg)?;

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .worker_threads(run.workers)
        .build()
        .map_err(|e| format!("failed to build runtime: {e}"))?;

    rt.block_on(run_async(run))?;
    Ok(())
}
