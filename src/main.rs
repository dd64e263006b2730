//! highlight-card - Main Entry Point
//!
//! Command-line front end: renders highlighted prose to styled markup and
//! exports cards as PNG images.

use clap::{ArgMatches, Args, CommandFactory, FromArgMatches, Parser, Subcommand};
use highlight_card::config::{get_config_file_path, load_config, save_config, Settings};
use highlight_card::editor::{EditorSession, InsertCommand, SEED_DOCUMENT};
use highlight_card::error::{Error, Result};
use highlight_card::export::{copy_html_with_fallback, ExportOutcome, ExportTarget, Exporter};
use highlight_card::render::card_document;
use highlight_card::style::{FontFamily, Preset};
use log::{debug, error, info};
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Application name constant.
const APP_NAME: &str = "highlight-card";

// ─────────────────────────────────────────────────────────────────────────────
// Command Line
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(version, about = "Turn highlighted prose into shareable image cards", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the styled markup for a document
    Render {
        #[command(flatten)]
        input: InputArgs,

        /// Wrap the markup in the styled card container
        #[arg(long, conflicts_with = "document")]
        card: bool,

        /// Emit a standalone HTML document with fonts loaded
        #[arg(long)]
        document: bool,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also place the result on the clipboard as HTML
        #[arg(long)]
        copy: bool,
    },
    /// Export the card as a PNG image
    Export {
        #[command(flatten)]
        input: InputArgs,

        /// Save a file instead of copying to the clipboard
        #[arg(long)]
        file: bool,

        /// Directory for saved images
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Pixel density multiplier
        #[arg(long)]
        scale: Option<f32>,
    },
    /// List style presets
    Presets,
    /// List available fonts
    Fonts,
    /// Show the configuration file path and effective settings
    Config {
        /// Write the effective settings to the configuration file
        #[arg(long)]
        init: bool,
    },
}

/// Document source and per-run adjustments shared by `render` and `export`.
#[derive(Args)]
struct InputArgs {
    /// Input file; reads stdin when omitted or "-"
    input: Option<PathBuf>,

    /// Use the built-in sample document
    #[arg(long, conflicts_with = "input")]
    sample: bool,

    /// Style preset to apply
    #[arg(long)]
    preset: Option<Preset>,

    /// Treat the document as literal HTML instead of Markdown
    #[arg(long)]
    literal: bool,

    /// Body font
    #[arg(long)]
    font: Option<FontFamily>,

    /// Heading and bold font
    #[arg(long)]
    header_font: Option<FontFamily>,

    /// Highlight background color
    #[arg(long)]
    highlight_color: Option<String>,

    /// Card width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Highlight the character span START:END (repeatable)
    #[arg(long, value_name = "START:END", value_parser = parse_span)]
    highlight: Vec<(usize, usize)>,

    /// Bold the character span START:END (repeatable)
    #[arg(long, value_name = "START:END", value_parser = parse_span)]
    bold: Vec<(usize, usize)>,
}

/// Parse a `START:END` character span.
fn parse_span(value: &str) -> std::result::Result<(usize, usize), String> {
    let (start, end) = value
        .split_once(':')
        .ok_or_else(|| format!("expected START:END, got '{}'", value))?;
    let parse = |s: &str| {
        s.trim()
            .parse::<usize>()
            .map_err(|e| format!("invalid position '{}': {}", s, e))
    };
    Ok((parse(start)?, parse(end)?))
}

// ─────────────────────────────────────────────────────────────────────────────
// Entry Point
// ─────────────────────────────────────────────────────────────────────────────

fn main() -> ExitCode {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = Cli::command().get_matches();
    let cli = match Cli::from_arg_matches(&matches) {
        Ok(cli) => cli,
        Err(e) => e.exit(),
    };

    debug!("Starting {}", APP_NAME);

    match run(cli, &matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, matches: &ArgMatches) -> Result<()> {
    let settings = load_config();
    // Subcommand matches carry the argument positions for --highlight/--bold
    let sub_matches = matches.subcommand().map(|(_, m)| m);

    match cli.command {
        Commands::Render {
            input,
            card,
            document,
            output,
            copy,
        } => {
            let session = build_session(&input, sub_matches, &settings)?;
            let markup = if document {
                card_document(&session.render(), session.style(), Some(APP_NAME))
            } else if card {
                session.render_card()
            } else {
                session.render()
            };

            if copy {
                copy_html_with_fallback(&markup, session.document())?;
                info!("Copied rendered HTML to clipboard");
            }

            match output {
                Some(path) => write_output(&path, &markup)?,
                None => println!("{}", markup),
            }
        }
        Commands::Export {
            input,
            file,
            output_dir,
            scale,
        } => {
            let session = build_session(&input, sub_matches, &settings)?;

            let mut options = settings.export.clone();
            if let Some(dir) = output_dir {
                options = options.with_directory(dir);
            }
            if let Some(scale) = scale {
                options.scale = scale;
            }
            let target = if file {
                ExportTarget::File
            } else {
                options.default_target
            };

            info!(
                "{}: {}px card at {}x",
                target.label(),
                session.style().width,
                options.scale
            );
            let mut exporter = Exporter::system(options);
            match exporter.export(&session.export_snapshot(), target)? {
                ExportOutcome::Clipboard => println!("Copied image to clipboard"),
                ExportOutcome::File(path) => println!("Saved {}", path.display()),
                ExportOutcome::FileAfterClipboardFailure { path, reason } => {
                    println!("Clipboard unavailable ({}); saved {}", reason, path.display())
                }
            }
        }
        Commands::Presets => {
            for preset in Preset::all() {
                let mut style = settings.style.clone();
                preset.apply_to(&mut style);
                println!(
                    "{:<16} {}px wide, {}px text, {}px padding, {} / {}",
                    preset.label(),
                    style.width,
                    style.font_size,
                    style.padding,
                    style.font_family,
                    style.header_font_family
                );
            }
        }
        Commands::Fonts => {
            for font in FontFamily::all() {
                println!("{:<16} {}", font.display_name(), font.css_stack());
            }
        }
        Commands::Config { init } => {
            let path = get_config_file_path()?;
            println!("{}", path.display());
            if init {
                save_config(&settings)?;
            }
            let json = serde_json::to_string_pretty(&settings)?;
            println!("{}", json);
        }
    }

    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Session Setup
// ─────────────────────────────────────────────────────────────────────────────

/// Create a session for the input and apply the command-line adjustments.
fn build_session(
    args: &InputArgs,
    matches: Option<&ArgMatches>,
    settings: &Settings,
) -> Result<EditorSession> {
    let document = if args.sample {
        SEED_DOCUMENT.to_string()
    } else {
        read_input(args.input.as_deref())?
    };

    let mut session = EditorSession::from_settings(document, settings);

    if let Some(preset) = args.preset {
        session.apply_preset(preset);
    }

    let mut style = session.style().clone();
    if args.literal {
        style.markdown = false;
    }
    if let Some(font) = args.font {
        style.font_family = font;
    }
    if let Some(font) = args.header_font {
        style.header_font_family = font;
    }
    if let Some(color) = &args.highlight_color {
        style.highlight_color = color.clone();
    }
    if let Some(width) = args.width {
        style.width = width;
    }
    session.set_style(style);

    for (command, (start, end)) in ordered_insertions(args, matches) {
        let result = match command {
            InsertCommand::Highlight => session.highlight_selection(start, end),
            InsertCommand::Bold => session.bold_selection(start, end),
        };
        if !result.applied {
            debug!("Empty span {}:{} ignored", start, end);
        }
    }

    Ok(session)
}

/// Highlight and bold spans in the order they appeared on the command line.
fn ordered_insertions(
    args: &InputArgs,
    matches: Option<&ArgMatches>,
) -> Vec<(InsertCommand, (usize, usize))> {
    let indexed = |id: &str, spans: &[(usize, usize)], command: InsertCommand| {
        let indices: Vec<usize> = matches
            .and_then(|m| m.indices_of(id))
            .map(|i| i.collect())
            .unwrap_or_default();
        spans
            .iter()
            .enumerate()
            .map(|(n, span)| (indices.get(n).copied().unwrap_or(usize::MAX), command, *span))
            .collect::<Vec<_>>()
    };

    let mut all = indexed("highlight", args.highlight.as_slice(), InsertCommand::Highlight);
    all.extend(indexed("bold", args.bold.as_slice(), InsertCommand::Bold));
    all.sort_by_key(|(index, _, _)| *index);
    all.into_iter().map(|(_, command, span)| (command, span)).collect()
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => {
            std::fs::read_to_string(path).map_err(|source| Error::FileRead {
                path: path.to_path_buf(),
                source,
            })
        }
        _ => {
            let mut stdin = io::stdin();
            if stdin.is_terminal() {
                info!("Reading document from stdin (Ctrl-D to finish)");
            }
            let mut text = String::new();
            stdin.read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn write_output(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents).map_err(|source| Error::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Wrote {}", path.display());
    Ok(())
}
