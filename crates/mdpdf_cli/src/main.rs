use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use mdpdf_core::{Config, Converter, PageSize};

const STDIN_OUTPUT: &str = "converted_document.pdf";

#[derive(Parser)]
#[command(name = "mdpdf")]
#[command(about = "Convert Markdown checklists and notes to PDF")]
struct Cli {
    /// Input Markdown file, or `-` for stdin
    input: PathBuf,

    /// Output PDF file (defaults to input name with .pdf extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Page size (overrides the config file)
    #[arg(short, long, value_enum)]
    page_size: Option<PageSizeArg>,

    /// TOML config file with style and page settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log progress to stderr (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum PageSizeArg {
    Letter,
    A4,
}

impl From<PageSizeArg> for PageSize {
    fn from(arg: PageSizeArg) -> Self {
        match arg {
            PageSizeArg::Letter => PageSize::Letter,
            PageSizeArg::A4 => PageSize::A4,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(output) => println!("Created {}", output.display()),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn run(cli: &Cli) -> Result<PathBuf, String> {
    let config = match &cli.config {
        Some(path) => Config::load(path).map_err(|e| e.to_string())?,
        None => Config::compiled_default(),
    };
    let page_size = cli.page_size.map(PageSize::from).unwrap_or(config.page.size);

    // Font registration happens here, before any input is touched
    let converter = Converter::with_config(&config).map_err(|e| e.to_string())?;

    let markdown = read_input(&cli.input)
        .map_err(|e| format!("reading {}: {}", cli.input.display(), e))?;
    log::info!("converting {} on {} pages", cli.input.display(), page_size);

    let pdf_bytes = converter
        .convert(&markdown, page_size)
        .map_err(|e| e.to_string())?;

    let output = output_path(&cli.input, cli.output.as_deref());
    fs::write(&output, pdf_bytes).map_err(|e| format!("writing {}: {}", output.display(), e))?;

    Ok(output)
}

fn is_stdin(input: &Path) -> bool {
    input.as_os_str() == "-"
}

fn read_input(input: &Path) -> io::Result<String> {
    if is_stdin(input) {
        let mut markdown = String::new();
        io::stdin().read_to_string(&mut markdown)?;
        Ok(markdown)
    } else {
        fs::read_to_string(input)
    }
}

fn output_path(input: &Path, output: Option<&Path>) -> PathBuf {
    match output {
        Some(path) => path.to_path_buf(),
        None if is_stdin(input) => PathBuf::from(STDIN_OUTPUT),
        None => input.with_extension("pdf"),
    }
}
