use carioca_data::normalize_locale;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

mod app;
mod input;
mod persistence;
mod recognizer;
mod view;

pub const LANG_ENV: &str = "CARIOCA_LANG";
pub const LOG_ENV: &str = "CARIOCA_LOG";
const DEFAULT_ASSETS_DIR: &str = "assets";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiLocale {
    EnUs,
    EsEs,
}

impl UiLocale {
    pub fn from_code(code: &str) -> Self {
        if normalize_locale(Some(code)) == "es_ES" {
            Self::EsEs
        } else {
            Self::EnUs
        }
    }

    pub fn text<'a>(self, en: &'a str, es: &'a str) -> &'a str {
        if matches!(self, Self::EsEs) {
            es
        } else {
            en
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliOptions {
    pub locale: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub assets: PathBuf,
    pub help: bool,
}

fn parse_cli_options(args: &[String], env_locale: Option<String>) -> CliOptions {
    let mut locale = env_locale;
    let mut data_dir = None;
    let mut assets = PathBuf::from(DEFAULT_ASSETS_DIR);
    let mut help = false;
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "--help" | "-h" => help = true,
            "--lang" | "-l" => {
                if let Some(value) = args.get(idx + 1) {
                    locale = Some(value.clone());
                    idx += 1;
                }
            }
            "--data-dir" => {
                if let Some(value) = args.get(idx + 1) {
                    data_dir = Some(PathBuf::from(value));
                    idx += 1;
                }
            }
            "--assets" => {
                if let Some(value) = args.get(idx + 1) {
                    assets = PathBuf::from(value);
                    idx += 1;
                }
            }
            _ => {}
        }
        idx += 1;
    }
    CliOptions {
        locale,
        data_dir,
        assets,
        help,
    }
}

/// Logs go to stderr, filtered by `CARIOCA_LOG`, then `RUST_LOG`, then `warn`.
fn init_logging() {
    let filter = std::env::var(LOG_ENV)
        .or_else(|_| std::env::var("RUST_LOG"))
        .map(EnvFilter::new)
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .try_init()
        .ok();
}

fn print_usage() {
    println!("usage: carioca-cli [--lang <en|es>] [--data-dir <path>] [--assets <path>]");
    println!("  --lang, -l    interface language (env {LANG_ENV})");
    println!(
        "  --data-dir    where settings and the saved game live (env {}, default ~/.carioca)",
        persistence::DATA_DIR_ENV
    );
    println!("  --assets      directory holding locales/*.json (default {DEFAULT_ASSETS_DIR})");
}

fn main() {
    init_logging();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_cli_options(&args, std::env::var(LANG_ENV).ok());
    if options.help {
        print_usage();
        return;
    }
    if let Err(err) = app::run(options) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
