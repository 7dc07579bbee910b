//! CLI for subtopic-render - Render subtopic articles from Markdown to styled HTML.

use std::fmt;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use subtopic_render::{
    append_references, classes, extract_citations, load_options, load_sources, render,
    ContentInput, ParagraphMode, RenderOptions,
};

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

/// Render subtopic articles from Markdown to styled HTML
#[derive(Parser)]
#[command(name = "subtopic-render")]
#[command(version)]
#[command(after_help = "\
Examples:
  subtopic-render render article.md
  subtopic-render render article.md --sources sources.json -o article.html
  echo 'Partial text [1]' | subtopic-render render - --loading
  subtopic-render classes")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a Markdown article to HTML
    #[command(after_help = "\
Examples:
  subtopic-render render topic.md
  subtopic-render render topic.md --loading
  subtopic-render render topic.md -s grounding.jsonl --config render.toml -o topic.html

An empty input renders the empty placeholder, or the loading skeleton with --loading.
Citation syntax: [1], [2], [12]")]
    Render {
        /// Input Markdown file (use '-' for stdin)
        input: PathBuf,

        /// More content is still arriving: show the skeleton or streaming indicator
        #[arg(long)]
        loading: bool,

        /// Grounding sources to append as a references section (JSON array or JSONL)
        #[arg(short, long)]
        sources: Option<PathBuf>,

        /// Render options file (TOML)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Enable tables, strikethrough and task lists
        #[arg(long)]
        gfm: bool,

        /// HTML-escape paragraph text instead of injecting it verbatim
        #[arg(long)]
        escape_paragraphs: bool,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the style classes used in rendered output
    Classes,
}

// ---------------------------------------------------------------------------
// AppError: semantic exit codes
// ---------------------------------------------------------------------------

#[derive(Debug)]
enum AppError {
    /// Exit 10: input file not found / unreadable
    InputFile(String),
    /// Exit 11: sources file not found / invalid
    SourcesFile(String),
    /// Exit 12: options file not found / invalid
    Config(String),
    /// Exit 13: cannot write output file
    OutputFile(String),
}

impl AppError {
    fn exit_code(&self) -> i32 {
        match self {
            AppError::InputFile(_) => 10,
            AppError::SourcesFile(_) => 11,
            AppError::Config(_) => 12,
            AppError::OutputFile(_) => 13,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InputFile(msg) => {
                write!(f, "{}\n  hint: verify the file path is correct", msg)
            }
            AppError::SourcesFile(msg) => {
                write!(
                    f,
                    "{}\n  hint: the file must be a JSON array of {{\"title\", \"uri\"}} objects \
                     or {{\"web\": {{...}}}} grounding chunks, or JSONL (one object per line)",
                    msg
                )
            }
            AppError::Config(msg) => {
                write!(
                    f,
                    "{}\n  hint: valid keys are gfm, paragraphs (\"trusted\" or \"escaped\") \
                     and [references] header, limit",
                    msg
                )
            }
            AppError::OutputFile(msg) => {
                write!(
                    f,
                    "{}\n  hint: check that the output directory exists and is writable",
                    msg
                )
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "subtopic_render=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(e.exit_code());
    }
}

fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            input,
            loading,
            sources,
            config,
            gfm,
            escape_paragraphs,
            output,
        } => {
            let mut options = match config {
                Some(path) => load_options(&path)
                    .map_err(|e| AppError::Config(format!("'{}': {}", path.display(), e)))?,
                None => RenderOptions::default(),
            };
            options.gfm |= gfm;
            if escape_paragraphs {
                options.paragraphs = ParagraphMode::Escaped;
            }

            render_command(&input, loading, sources.as_deref(), &options, output.as_deref())?;
        }
        Commands::Classes => {
            classes_command();
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// Render a Markdown article.
fn render_command(
    input: &Path,
    loading: bool,
    sources: Option<&Path>,
    options: &RenderOptions,
    output: Option<&Path>,
) -> Result<(), AppError> {
    // 1. Read the Markdown file (support '-' for stdin)
    let mut markdown = if input == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| AppError::InputFile(format!("failed to read from stdin: {}", e)))?;
        buf
    } else {
        fs::read_to_string(input)
            .map_err(|e| AppError::InputFile(format!("'{}': {}", input.display(), e)))?
    };

    // 2. Append the references section, if any sources were given
    if let Some(path) = sources {
        let sources = load_sources(path)
            .map_err(|e| AppError::SourcesFile(format!("'{}': {}", path.display(), e)))?;
        markdown = append_references(&markdown, &sources, &options.references);
    }

    // 3. Render
    let rendered = render(&ContentInput::new(Some(markdown.as_str()), loading), options);

    // 4. Write to file or stdout
    if let Some(output_path) = output {
        fs::write(output_path, &rendered.html)
            .map_err(|e| AppError::OutputFile(format!("'{}': {}", output_path.display(), e)))?;
        info!(
            mode = rendered.mode.as_str(),
            citations = extract_citations(&markdown).len(),
            has_sources = rendered.has_sources,
            "wrote {}",
            output_path.display()
        );
    } else {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        writeln!(handle, "{}", rendered.html)
            .map_err(|e| AppError::OutputFile(format!("stdout: {}", e)))?;
    }

    Ok(())
}

/// List the style classes used in rendered output.
fn classes_command() {
    for name in classes::ALL {
        println!("{}", name);
    }
}
