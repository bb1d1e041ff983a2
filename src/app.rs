use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{error::ErrorKind, Parser};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::time::Instant;

use crate::cli::args::CliArgs;
use crate::cli::validation;
use crate::config::{self, ConfigFile};
use crate::loader::{self, LoadError, LoadOptions, PostSource};
use crate::output::{self, OutputFormat};
use crate::pagination::{Pager, DEFAULT_PAGE_SIZE, DEFAULT_RANGE};

const DEFAULT_INPUT: &str = "posts.csv";
const DEFAULT_TITLE: &str = "Blog";

fn print_banner() {
    const BANNER: &str = r#"
    __    __
   / /_  / /___  ____ _____  ____ _____ ____  _____
  / __ \/ / __ \/ __ `/ __ \/ __ `/ __ `/ _ \/ ___/
 / /_/ / / /_/ / /_/ / /_/ / /_/ / /_/ /  __/ /
/_.___/_/\____/\__, / .___/\__,_/\__, /\___/_/
              /____/_/          /____/
       v0.1.0 - paginated blog listings
    "#;
    eprint!("{}", BANNER);
    eprintln!();
}

fn format_kv_line(label: &str, value: &str) {
    eprintln!(":: {:<10}: {}", label, value);
}

fn format_status(tag: &str, message: &str) -> String {
    let tag = match tag {
        "ERR" => tag.bold().red(),
        "WRN" => tag.bold().yellow(),
        _ => tag.bold().green(),
    };
    format!(
        "{}{}{} {}",
        "[".bold().white(),
        tag,
        "]".bold().white(),
        message
    )
}

/// Prints a `[TAG] message` status line on stderr.
pub fn print_status(tag: &str, message: &str) {
    eprintln!("{}", format_status(tag, message));
}

fn format_label(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Text => "text",
        OutputFormat::Json => "json",
        OutputFormat::Html => "html",
    }
}

#[derive(Clone, Debug)]
struct RunConfig {
    source: PostSource,
    page_size: usize,
    range: usize,
    page: Option<usize>,
    output: Option<String>,
    output_dir: Option<String>,
    output_format: OutputFormat,
    title: String,
    timeout: u64,
    no_color: bool,
    verbose: u8,
}

fn build_run_config(args: CliArgs, cfg: ConfigFile) -> Result<RunConfig, String> {
    validation::validate(&args)?;

    let no_color = if args.color {
        false
    } else {
        args.no_color || cfg.no_color.unwrap_or(false)
    };

    let input = args
        .input
        .or(cfg.input)
        .unwrap_or_else(|| DEFAULT_INPUT.to_string());
    if input.trim().is_empty() {
        return Err("input is empty".to_string());
    }
    let source = match PostSource::from_location(&input) {
        PostSource::FilePath(path) => PostSource::FilePath(config::expand_tilde_string(&path)),
        other => other,
    };

    let page_size = args
        .page_size
        .or(cfg.page_size)
        .unwrap_or(DEFAULT_PAGE_SIZE);
    if page_size == 0 {
        return Err("invalid page_size, expected positive integer".to_string());
    }
    let range = args.range.or(cfg.range).unwrap_or(DEFAULT_RANGE);
    if range > validation::MAX_RANGE {
        return Err(format!(
            "invalid range {range}, expected at most {}",
            validation::MAX_RANGE
        ));
    }
    let page = args.page.or(cfg.page);
    let timeout = args.timeout.or(cfg.timeout).unwrap_or(10).max(1);
    let title = args
        .title
        .or(cfg.title)
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());

    let output = args
        .output
        .or(cfg.output)
        .map(|p| config::expand_tilde_string(&p));
    let output_dir = args
        .output_dir
        .or(cfg.output_dir)
        .map(|p| config::expand_tilde_string(&p));
    if output.is_some() && output_dir.is_some() {
        return Err("use either output or output_dir, not both".to_string());
    }

    let output_format = match args.output_format.or(cfg.output_format) {
        Some(raw) => OutputFormat::parse(&raw).ok_or_else(|| {
            format!("invalid output format '{raw}', expected text, json, or html")
        })?,
        None => match output.as_deref() {
            Some(path) => output::infer_format_from_path(path).unwrap_or(OutputFormat::Html),
            None if output_dir.is_some() => OutputFormat::Html,
            None => OutputFormat::Text,
        },
    };
    if output_dir.is_some() && output_format != OutputFormat::Html {
        return Err("output-dir only supports the html format".to_string());
    }

    Ok(RunConfig {
        source,
        page_size,
        range,
        page,
        output,
        output_dir,
        output_format,
        title,
        timeout,
        no_color,
        verbose: args.verbose,
    })
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_target(false)
        .try_init();
}

fn loading_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_draw_target(ProgressDrawTarget::stderr());
    pb.enable_steady_tick(Duration::from_millis(120));
    if let Ok(style) = ProgressStyle::with_template(":: {spinner} {msg}") {
        pb.set_style(style);
    }
    pb.set_message("Loading posts...");
    pb
}

async fn write_file(path: &Path, contents: &[u8]) -> Result<(), String> {
    let mut outfile = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .await
        .map_err(|e| format!("failed to open output file {}: {e}", path.display()))?;
    outfile
        .write_all(contents)
        .await
        .map_err(|e| format!("failed to write output file {}: {e}", path.display()))
}

async fn write_site(pager: &mut Pager, dir: &str, title: &str) -> Result<usize, String> {
    let dir = PathBuf::from(dir);
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|e| format!("failed to create output directory {}: {e}", dir.display()))?;
    let files = output::render_site(pager, title);
    for (name, contents) in files.iter() {
        write_file(&dir.join(name), contents).await?;
    }
    Ok(pager.total_pages())
}

/// Puts the fixed failure message where the listing would have gone.
async fn write_message(run: &RunConfig, message: &str) -> Result<(), String> {
    if run.output_format != OutputFormat::Html {
        return Ok(());
    }
    let html = output::document::render_message(&run.title, message);
    if let Some(dir) = run.output_dir.as_deref() {
        let dir = PathBuf::from(dir);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| format!("failed to create output directory {}: {e}", dir.display()))?;
        write_file(&dir.join("index.html"), html.as_bytes()).await?;
    } else if let Some(path) = run.output.as_deref() {
        write_file(Path::new(path), html.as_bytes()).await?;
    }
    Ok(())
}

/// Reports a failed load and leaves the fixed message where the listing
/// would have gone. An empty result is not an error.
async fn handle_load_failure(run: &RunConfig, err: &LoadError) -> Result<(), String> {
    log::error!("{err}");
    let tag = if err.is_empty_result() { "WRN" } else { "ERR" };
    print_status(tag, err.user_message());
    write_message(run, err.user_message()).await?;
    if err.is_empty_result() {
        Ok(())
    } else {
        Err(err.to_string())
    }
}

async fn run_async(run: RunConfig) -> Result<(), String> {
    if run.no_color {
        colored::control::set_override(false);
    }
    print_banner();

    format_kv_line("Input", &run.source.describe());
    format_kv_line(
        "Pagination",
        &format!("{} per page, range {}", run.page_size, run.range),
    );
    match (run.output_dir.as_deref(), run.output.as_deref()) {
        (Some(dir), _) => format_kv_line("Output", &format!("{dir}/ (html)")),
        (None, Some(path)) => format_kv_line(
            "Output",
            &format!("{path} ({})", format_label(run.output_format)),
        ),
        (None, None) => format_kv_line(
            "Output",
            &format!("stdout ({})", format_label(run.output_format)),
        ),
    }
    eprintln!();

    let now = Instant::now();
    let options = LoadOptions {
        timeout_seconds: run.timeout,
        ..LoadOptions::default()
    };

    let spinner = loading_spinner();
    let posts = match loader::load_posts(&run.source, &options).await {
        Ok(posts) => {
            spinner.finish_and_clear();
            posts
        }
        Err(e) => {
            spinner.finish_and_clear();
            return handle_load_failure(&run, &e).await;
        }
    };

    let mut pager = Pager::new(posts, run.page_size, run.range);
    print_status(
        "INF",
        &format!(
            "loaded {} posts across {} pages ({} per page, range {})",
            pager.posts().len(),
            pager.total_pages(),
            pager.page_size(),
            pager.range()
        ),
    );
    if let Some(page) = run.page {
        if !pager.go_to_page(page) {
            print_status(
                "WRN",
                &format!(
                    "page {page} is outside 1-{}, showing page {}",
                    pager.total_pages(),
                    pager.current_page()
                ),
            );
        }
    }

    if let Some(dir) = run.output_dir.as_deref() {
        let pages = write_site(&mut pager, dir, &run.title).await?;
        print_status("INF", &format!("wrote {pages} pages to {dir}"));
    } else {
        let rendered = output::render(&pager.view(), run.output_format, &run.title);
        match run.output.as_deref() {
            Some(path) => {
                write_file(Path::new(path), &rendered).await?;
                print_status(
                    "INF",
                    &format!("wrote page {} to {path}", pager.current_page()),
                );
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout
                    .write_all(&rendered)
                    .map_err(|e| format!("failed to write to stdout: {e}"))?;
                stdout
                    .flush()
                    .map_err(|e| format!("failed to write to stdout: {e}"))?;
            }
        }
    }

    eprintln!();
    eprintln!(
        ":: Completed :: rendered in {}ms ::",
        now.elapsed().as_millis()
    );
    Ok(())
}

fn init_config(args: &CliArgs) -> Result<(), String> {
    let path = match args.config.as_deref() {
        Some(p) => config::expand_tilde(p),
        None => config::default_config_path()
            .ok_or_else(|| "could not determine home directory for config".to_string())?,
    };
    if config::ensure_default_config_file(&path)? {
        println!("wrote default config to {}", path.display());
    } else {
        println!("config already exists at {}", path.display());
    }
    Ok(())
}

pub fn run_cli() -> Result<(), String> {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                e.print()
                    .map_err(|err| format!("failed to print help: {err}"))?;
                return Ok(());
            }
            _ => return Err(e.to_string()),
        },
    };

    init_logging(args.verbose);

    if args.init_config {
        return init_config(&args);
    }

    let cfg = match args.config.as_deref() {
        Some(p) => config::load_config(&config::expand_tilde(p), false)?,
        None => match config::default_config_path() {
            Some(path) => config::load_config(&path, true)?,
            None => ConfigFile::default(),
        },
    };

    let run = build_run_config(args, cfg)?;
    log::debug!("run config: {run:?}");

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to build runtime: {e}"))?;

    rt.block_on(run_async(run))
}
