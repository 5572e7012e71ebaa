use anyhow::Result;
use clap::{Parser, Subcommand};
use marginalia::document::{Document, decorations};
use marginalia::overlay::{EmphasisInput, Piece, resolve_block};
use marginalia::{Config, Lesson};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "marginalia")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the segmentation of a lesson file
    Inspect {
        /// Path to a lesson JSON file
        path: String,
    },
    /// Print per-segment emphasis for a lesson file
    Emphasis {
        /// Path to a lesson JSON file
        path: String,
        /// Annotation id whose thread is open
        #[arg(long)]
        active: Option<String>,
        /// Annotation id hovered in the side panel
        #[arg(long)]
        preview: Option<String>,
    },
    /// Re-locate annotations inside the lesson treated as a rich-text
    /// document and print the resulting decorations
    Locate {
        /// Path to a lesson JSON file
        path: String,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "marginalia=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect { path } => inspect(&path),
        Commands::Emphasis { path, active, preview } => {
            emphasis(&path, active.as_deref(), preview.as_deref())
        }
        Commands::Locate { path } => locate(&path),
    }
}

fn inspect(path: &str) -> Result<()> {
    let lesson = Lesson::from_path(path)?;
    let layout = lesson.layout();

    for piece in &layout.pieces {
        match piece {
            Piece::Text { start, end, text } => {
                println!("text  [{start:>4}..{end:<4}] {text:?}");
            }
            Piece::Block(block) => {
                println!(
                    "block [{:>4}..{:<4}] {} annotation(s): {}",
                    block.start,
                    block.end,
                    block.highlight_count(),
                    block.highlight_ids.join(", ")
                );
                for segment in &block.segments {
                    println!(
                        "  seg [{:>4}..{:<4}] {:?} ids: {}",
                        segment.start,
                        segment.end,
                        segment.text,
                        segment.data_highlight_ids()
                    );
                }
            }
        }
    }

    for (offset, ids) in &layout.anchors {
        println!("anchor @{offset}: {}", ids.join(", "));
    }

    Ok(())
}

fn emphasis(path: &str, active: Option<&str>, preview: Option<&str>) -> Result<()> {
    let lesson = Lesson::from_path(path)?;
    let config = Config::load()?;
    let layout = lesson.layout();

    let input = EmphasisInput {
        active_id: active,
        preview_id: preview,
        fallback_to_primary: config.fallback_emphasis,
    };

    for piece in &layout.pieces {
        let Piece::Block(block) = piece else {
            continue;
        };
        for (segment, resolved) in block.segments.iter().zip(resolve_block(block, &input)) {
            match (&resolved.id, &resolved.variant) {
                (Some(id), Some(variant)) => {
                    println!(
                        "[{:>4}..{:<4}] {:?} emphasized: {} ({:?})",
                        segment.start, segment.end, segment.text, id, variant
                    );
                }
                _ => {
                    println!("[{:>4}..{:<4}] {:?} idle", segment.start, segment.end, segment.text);
                }
            }
        }
    }

    Ok(())
}

fn locate(path: &str) -> Result<()> {
    let lesson = Lesson::from_path(path)?;
    let doc = Document::from_plain_text(&lesson.content);
    let decos = decorations(&doc, &lesson.normalized());

    if decos.is_empty() {
        println!("no resolvable annotations");
        return Ok(());
    }

    for deco in decos {
        println!(
            "{} ({:?}): block {} run {} offset {} -> block {} run {} offset {}",
            deco.id,
            deco.action,
            deco.from.block,
            deco.from.run,
            deco.from.offset,
            deco.to.block,
            deco.to.run,
            deco.to.offset
        );
    }

    Ok(())
}
