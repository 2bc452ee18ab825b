// src/cli.rs
use std::{path::PathBuf, time::Duration};

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::{AppOptions, ExportFormat, FailurePolicy};
use crate::core::HttpFetcher;
use crate::progress::StderrProgress;
use crate::{log, runner, text};

#[derive(Debug, Parser)]
#[command(name = "forum_scrape", version, about = "Scrape a paginated forum thread into CSV")]
pub struct Cli {
    /// Debug-level logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch every page in the range and write one row per post (default)
    Scrape(ScrapeArgs),
    /// Split text into sentences and words
    Tokenize {
        /// Text to tokenize; a built-in sample when omitted
        text: Option<String>,
    },
}

#[derive(Debug, Default, Args)]
pub struct ScrapeArgs {
    /// URL template; `{page}` is replaced by the page number
    #[arg(long = "url")]
    pub url_template: Option<String>,
    /// First page (inclusive)
    #[arg(long)]
    pub start: Option<u32>,
    /// Last page (exclusive)
    #[arg(long)]
    pub end: Option<u32>,
    /// Output file
    #[arg(short, long)]
    pub out: Option<PathBuf>,
    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,
    /// Parallel page fetchers
    #[arg(long)]
    pub workers: Option<usize>,
    /// Extra attempts per page before giving up
    #[arg(long)]
    pub retries: Option<u32>,
    /// Pause after each request, in milliseconds
    #[arg(long)]
    pub pause_ms: Option<u64>,
    /// On fetch failure, still write the pages scraped before it
    #[arg(long)]
    pub keep_partial: bool,
    /// Write a header row
    #[arg(long)]
    pub headers: bool,
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,
    /// Replacement for non-ASCII characters
    #[arg(long)]
    pub placeholder: Option<char>,
    /// First class token of a post container
    #[arg(long)]
    pub post_class: Option<String>,
    /// First class token of a message body
    #[arg(long)]
    pub body_class: Option<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum FormatArg {
    Csv,
    Tsv,
}

impl From<FormatArg> for ExportFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Tsv => ExportFormat::Tsv,
        }
    }
}

impl ScrapeArgs {
    /// Overlay the given flags on the defaults.
    pub fn to_options(&self) -> AppOptions {
        let mut opts = AppOptions::default();
        let scrape = &mut opts.scrape;
        let export = &mut opts.export;

        if let Some(t) = &self.url_template { scrape.url_template = t.clone(); }
        if let Some(s) = self.start { scrape.pages.start = s; }
        if let Some(e) = self.end { scrape.pages.end = e; }
        if let Some(t) = self.timeout { scrape.timeout = Duration::from_secs(t); }
        if let Some(w) = self.workers { scrape.workers = w; }
        if let Some(r) = self.retries { scrape.retries = r; }
        if let Some(ms) = self.pause_ms { scrape.request_pause = Duration::from_millis(ms); }
        if self.keep_partial { scrape.on_failure = FailurePolicy::KeepPartial; }
        if let Some(c) = self.placeholder { scrape.placeholder = c; }
        if let Some(c) = &self.post_class { scrape.post_class = c.clone(); }
        if let Some(c) = &self.body_class { scrape.body_class = c.clone(); }

        if let Some(f) = self.format {
            export.format = f.into();
            if self.out.is_none() {
                export.out_path.set_extension(export.format.ext());
            }
        }
        if let Some(o) = &self.out { export.out_path = o.clone(); }
        export.include_headers = self.headers;

        opts
    }
}

pub fn run() -> color_eyre::Result<()> {
    let cli = Cli::parse();
    log::init(cli.verbose);

    match cli.command.unwrap_or(Command::Scrape(ScrapeArgs::default())) {
        Command::Scrape(args) => scrape(&args),
        Command::Tokenize { text } => {
            tokenize(text.as_deref().unwrap_or(text::EXAMPLE_TEXT));
            Ok(())
        }
    }
}

fn scrape(args: &ScrapeArgs) -> color_eyre::Result<()> {
    let opts = args.to_options();
    let fetcher = HttpFetcher::new(&opts.scrape)?;
    let mut progress = StderrProgress::default();
    let summary = runner::run(&opts, &fetcher, Some(&mut progress))?;

    println!("Wrote to {}", summary.path.display());
    Ok(())
}

fn tokenize(input: &str) {
    println!("{:?}", text::sentences(input));
    println!("{:?}", text::words(input));
}
