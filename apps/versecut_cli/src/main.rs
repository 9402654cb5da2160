mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use versecut_core::{registry, AssetStore, Clip, ClipKind, ClipRegistry, EditorSession, Project};

use crate::cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    debug!(project = %cli.project.display(), command = ?cli.command, "versecut starting");
    if registry::install(ClipRegistry::with_builtin_kinds()).is_err() {
        debug!("clip registry already in use");
    }

    match cli.command {
        Commands::New { name } => {
            let mut session = EditorSession::new(Project::new(name));
            let written = session
                .save_as(&cli.project)
                .with_context(|| format!("failed to create {}", cli.project.display()))?;
            println!("created {}", written.display());
        }
        Commands::Info(args) => {
            let session = EditorSession::open(&cli.project)
                .with_context(|| format!("failed to open {}", cli.project.display()))?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(session.project())?);
            } else {
                print_summary(session.project());
            }
        }
        command => {
            let edit = command
                .edit_command()
                .context("subcommand does not edit the project")?;
            let mut session = EditorSession::open(&cli.project)
                .with_context(|| format!("failed to open {}", cli.project.display()))?;
            let outcome = session.apply(edit).context("edit rejected")?;
            session.save().context("failed to save project")?;
            println!("{outcome}");
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn print_summary(project: &Project) {
    println!("{} ({})", project.name, project.id);
    println!(
        "{} asset(s), {} clip(s), ends at {}",
        project.assets.len(),
        project.timeline.clip_count(),
        project.timeline.duration()
    );

    for asset in &project.assets {
        println!("  asset {}  {:?}  {}", asset.id, asset.kind, asset.path.display());
    }

    for track in project.timeline.tracks() {
        println!();
        println!("[{:?}] {}  ({} clip(s))", track.kind(), track.name(), track.len());
        for clip in track.clips() {
            println!(
                "  {}  {} -> {}  ({})  {}",
                clip.id(),
                clip.start_time(),
                clip.end_time(),
                clip.duration(),
                describe(clip, project)
            );
        }
    }
}

fn describe(clip: &Clip, project: &Project) -> String {
    match clip.kind() {
        ClipKind::Silence => "silence".to_string(),
        ClipKind::Asset(a) => match project.asset(a.asset_id) {
            Some(asset) => format!("asset {}", asset.name),
            None => format!("asset {} (missing)", a.asset_id),
        },
        ClipKind::Subtitle(s) => format!("{} {}", s.verse_key(), s.text),
        ClipKind::PredefinedSubtitle(p) => format!("{:?} {}", p.predefined_type, p.text),
    }
}
