//! outliner CLI - reading-structure reconstruction for OCR'd pages

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use outliner::{
    CleanupPreset, FlashcardSet, JsonFormat, LayoutOptions, OcrDocument, Outliner, OutlinerResult,
    PrecomputedAnalyzer, RenderOptions,
};

#[derive(Parser)]
#[command(name = "outliner")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Rebuild lines, paragraphs and an outline from OCR output", long_about = None)]
struct Cli {
    /// Input OCR JSON file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Layout options (JSON)
    #[arg(long, global = true, value_name = "FILE", env = "OUTLINER_CONFIG")]
    config: Option<PathBuf>,

    /// Keep only words detected in this language (repeatable)
    #[arg(long = "lang", global = true, value_name = "CODE")]
    languages: Vec<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the outline of every page
    Outline {
        /// Input OCR JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Deepest layer to render
        #[arg(long)]
        max_depth: Option<usize>,

        /// Omit the annotation list
        #[arg(long)]
        no_annotations: bool,

        /// Also list fragments
        #[arg(long)]
        fragments: bool,

        /// Prefix nodes with their layer label
        #[arg(long)]
        labels: bool,

        /// Text cleanup preset
        #[arg(long, value_enum)]
        cleanup: Option<CleanupLevel>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// List paragraphs in reading order with their positions
    Paragraphs {
        /// Input OCR JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Generate fill-in-the-blank questions
    Questions {
        /// Input OCR JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Precomputed sentence analysis (JSON object keyed by sentence)
        #[arg(long, value_name = "FILE")]
        nlp: Option<PathBuf>,

        /// Print a flashcard set with this title as JSON
        #[arg(long)]
        title: Option<String>,
    },

    /// Show document information
    Info {
        /// Input OCR JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Render many files into a directory
    Batch {
        /// Input OCR JSON files
        #[arg(value_name = "FILES", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "markdown")]
        format: Format,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Box-drawing tree
    Text,
    /// Nested Markdown list
    Markdown,
    /// Nested JSON entries
    Json,
}

impl Format {
    fn extension(self) -> &'static str {
        match self {
            Format::Text => "txt",
            Format::Markdown => "md",
            Format::Json => "json",
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum CleanupLevel {
    /// Minimal cleanup (Unicode normalization only)
    Minimal,
    /// Standard cleanup (default)
    Standard,
    /// Aggressive cleanup (also rejoins hyphenated words)
    Aggressive,
}

impl From<CleanupLevel> for CleanupPreset {
    fn from(level: CleanupLevel) -> Self {
        match level {
            CleanupLevel::Minimal => CleanupPreset::Minimal,
            CleanupLevel::Standard => CleanupPreset::Standard,
            CleanupLevel::Aggressive => CleanupPreset::Aggressive,
        }
    }
}

/// Settings shared by every subcommand.
struct Global {
    config: Option<PathBuf>,
    languages: Vec<String>,
}

impl Global {
    fn outliner(&self) -> Result<Outliner, Box<dyn std::error::Error>> {
        let layout = match &self.config {
            Some(path) => LayoutOptions::from_json_file(path)?,
            None => LayoutOptions::default(),
        };
        log::debug!("Layout options: {:?}", layout);

        let mut outliner = Outliner::new().with_layout_options(layout);
        for code in &self.languages {
            outliner = outliner.with_language(code.clone());
        }
        Ok(outliner)
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let global = Global {
        config: cli.config,
        languages: cli.languages,
    };

    let result = match cli.command {
        Some(Commands::Outline {
            input,
            format,
            output,
            max_depth,
            no_annotations,
            fragments,
            labels,
            cleanup,
            compact,
        }) => {
            let mut options = RenderOptions::new()
                .with_annotations(!no_annotations)
                .with_fragments(fragments)
                .with_labels(labels);
            if let Some(depth) = max_depth {
                options = options.with_max_depth(depth);
            }
            if let Some(level) = cleanup {
                options = options.with_cleanup_preset(level.into());
            }
            cmd_outline(&global, &input, format, output.as_deref(), options, compact)
        }
        Some(Commands::Paragraphs { input }) => cmd_paragraphs(&global, &input),
        Some(Commands::Questions { input, nlp, title }) => {
            cmd_questions(&global, &input, nlp.as_deref(), title)
        }
        Some(Commands::Info { input }) => cmd_info(&global, &input),
        Some(Commands::Batch {
            inputs,
            output,
            format,
        }) => cmd_batch(&global, &inputs, &output, format),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: print the text tree if input is provided
            if let Some(input) = cli.input {
                cmd_outline(
                    &global,
                    &input,
                    Format::Text,
                    None,
                    RenderOptions::default(),
                    false,
                )
            } else {
                println!("{}", "Usage: outliner <FILE>".yellow());
                println!("       outliner --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn render(
    result: &OutlinerResult,
    format: Format,
    compact: bool,
) -> Result<String, Box<dyn std::error::Error>> {
    let rendered = match format {
        Format::Text => result.to_text()?,
        Format::Markdown => result.to_markdown()?,
        Format::Json => result.to_json(if compact {
            JsonFormat::Compact
        } else {
            JsonFormat::Pretty
        })?,
    };
    Ok(rendered)
}

fn write_or_print(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_outline(
    global: &Global,
    input: &Path,
    format: Format,
    output: Option<&Path>,
    options: RenderOptions,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = global
        .outliner()?
        .with_render_options(options)
        .parse_file(input)?;
    let rendered = render(&result, format, compact)?;
    write_or_print(output, &rendered)
}

fn cmd_paragraphs(global: &Global, input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let result = global.outliner()?.parse_file(input)?;
    let multi_page = result.page_count() > 1;

    for (i, page) in result.pages.iter().enumerate() {
        if multi_page {
            println!("{}", format!("Page {}", i + 1).cyan().bold());
        }
        for node in page.outline.pre_order() {
            let Some(paragraph) = &node.paragraph else {
                continue;
            };
            println!(
                "{} {}",
                format!(
                    "[{}] ({:.0}, {:.0})",
                    node.label,
                    paragraph.left(),
                    paragraph.top()
                )
                .dimmed(),
                paragraph.trimmed()
            );
        }
        for paragraph in &page.annotations {
            println!(
                "{} {}",
                format!("[annotation] ({:.0}, {:.0})", paragraph.left(), paragraph.top())
                    .yellow(),
                paragraph.trimmed()
            );
        }
    }

    Ok(())
}

fn cmd_questions(
    global: &Global,
    input: &Path,
    nlp: Option<&Path>,
    title: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut outliner = global.outliner()?;
    match nlp {
        Some(path) => outliner = outliner.with_analyzer(PrecomputedAnalyzer::from_file(path)?),
        None => eprintln!(
            "{}",
            "No --nlp analysis given; questions need entity tags".yellow()
        ),
    }

    let result = outliner.parse_file(input)?;
    let questions = result.questions();

    if let Some(title) = title {
        let mut set = FlashcardSet::from_questions(title, &questions);
        if let [code, ..] = global.languages.as_slice() {
            set = set.with_language(code.clone());
        }
        println!("{}", serde_json::to_string_pretty(&set)?);
        return Ok(());
    }

    for (i, question) in questions.iter().enumerate() {
        println!("{}. {}", i + 1, question.prompt);
        println!("   {} {}", "→".green(), question.answer);
    }
    println!("\n{} {} questions", "Done!".green().bold(), questions.len());

    Ok(())
}

fn cmd_info(global: &Global, input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let document = OcrDocument::from_file(input)?;
    let result = global.outliner()?.parse_document(&document)?;
    let stats = result.stats();

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Pages".bold(), document.page_count());
    println!("{}: {}", "OCR words".bold(), document.word_count());
    for (i, page) in document.pages.iter().enumerate() {
        println!("  Page {}: {} x {} px", i + 1, page.width, page.height);
    }

    println!();
    println!("{}", "Layout Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Lines".bold(), stats.line_count);
    println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    println!("{}: {}", "Outline nodes".bold(), stats.node_count);
    println!("{}: {}", "Layers".bold(), stats.depth);
    println!("{}: {}", "Annotations".bold(), stats.annotation_count);
    println!("{}: {}", "Fragments".bold(), stats.fragment_count);
    println!("{}: {}", "Words".bold(), stats.word_count);
    println!("{}: {}", "Characters".bold(), stats.char_count);

    Ok(())
}

fn output_path(dir: &Path, input: &Path, format: Format) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    dir.join(format!("{}.{}", stem, format.extension()))
}

fn cmd_batch(
    global: &Global,
    inputs: &[PathBuf],
    output: &Path,
    format: Format,
) -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all(output)?;

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let mut failed = 0usize;
    for input in inputs {
        pb.set_message(input.display().to_string());
        let rendered = global
            .outliner()
            .and_then(|o| o.parse_file(input).map_err(Into::into))
            .and_then(|r| render(&r, format, false));

        match rendered {
            Ok(content) => fs::write(output_path(output, input, format), content)?,
            Err(e) => {
                failed += 1;
                pb.println(format!("{} {}: {}", "Failed".red(), input.display(), e));
            }
        }
        pb.inc(1);
    }

    pb.finish_with_message("Done!");

    println!(
        "\n{} {} of {} files written to {}",
        "Done!".green().bold(),
        inputs.len() - failed,
        inputs.len(),
        output.display()
    );
    if failed > 0 {
        return Err(format!("{} files failed", failed).into());
    }
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "outliner".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Reading-structure reconstruction for OCR'd pages");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/outliner".dimmed());
    println!("License: MIT");
}
