//! Command-line argument definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use uuid::Uuid;
use versecut_core::{EditCommand, PredefinedSubtitleType, TimeMs, TrackKind};

/// Edit the timeline of a versecut project from the command line.
#[derive(Parser, Debug)]
#[command(name = "versecut", version, about)]
pub struct Cli {
    /// Project file (`.versecut` is appended when missing on save)
    pub project: PathBuf,

    /// Log every edit and the reason of rejected ones
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a project with empty subtitle, video and audio tracks
    New {
        #[arg(long, default_value = "Untitled")]
        name: String,
    },
    /// Print tracks and clips
    Info(InfoArgs),
    /// Import a media file into the asset list
    Import {
        file: PathBuf,
        #[arg(long)]
        youtube_url: Option<String>,
    },
    /// Put an imported asset on the first track of a kind
    PlaceAsset {
        asset: Uuid,
        #[arg(long, value_enum)]
        track: TrackArg,
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Add a silence clip to the subtitle track
    AddSilence(RangeArgs),
    /// Add a predefined phrase to the subtitle track
    AddPredefined {
        #[arg(long, value_enum)]
        kind: PhraseArg,
        #[arg(long)]
        text: String,
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Drag the left edge of a clip (milliseconds)
    TrimStart {
        clip: Uuid,
        #[arg(long)]
        to: i64,
    },
    /// Drag the right edge of a clip (milliseconds)
    TrimEnd {
        clip: Uuid,
        #[arg(long)]
        to: i64,
    },
    /// Split a clip in two; the left half ends at --at
    Split {
        clip: Uuid,
        #[arg(long)]
        at: i64,
    },
    /// Remove a clip, leaving a gap
    Delete { clip: Uuid },
    /// Remove an asset and every clip that uses it
    RemoveAsset { asset: Uuid },
}

#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Dump the project as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone, Copy)]
pub struct RangeArgs {
    /// Start time in milliseconds
    #[arg(long)]
    pub start: i64,

    /// End time in milliseconds
    #[arg(long)]
    pub end: i64,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum TrackArg {
    Subtitle,
    Video,
    Audio,
}

impl From<TrackArg> for TrackKind {
    fn from(arg: TrackArg) -> Self {
        match arg {
            TrackArg::Subtitle => TrackKind::Subtitle,
            TrackArg::Video => TrackKind::Video,
            TrackArg::Audio => TrackKind::Audio,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum PhraseArg {
    Basmala,
    Istiadhah,
    Sadaqallah,
    Takbir,
    Other,
}

impl From<PhraseArg> for PredefinedSubtitleType {
    fn from(arg: PhraseArg) -> Self {
        match arg {
            PhraseArg::Basmala => PredefinedSubtitleType::Basmala,
            PhraseArg::Istiadhah => PredefinedSubtitleType::Istiadhah,
            PhraseArg::Sadaqallah => PredefinedSubtitleType::SadaqallahulAzim,
            PhraseArg::Takbir => PredefinedSubtitleType::Takbir,
            PhraseArg::Other => PredefinedSubtitleType::Other,
        }
    }
}

impl Commands {
    /// The timeline edit this subcommand stands for, if it is one.
    pub fn edit_command(self) -> Option<EditCommand> {
        let edit = match self {
            Commands::New { .. } | Commands::Info(_) => return None,
            Commands::Import { file, youtube_url } => EditCommand::ImportAsset {
                path: file,
                youtube_url,
            },
            Commands::PlaceAsset { asset, track, range } => EditCommand::PlaceAsset {
                asset_id: asset,
                track: track.into(),
                start: TimeMs(range.start),
                end: TimeMs(range.end),
            },
            Commands::AddSilence(range) => EditCommand::AddSilence {
                start: TimeMs(range.start),
                end: TimeMs(range.end),
            },
            Commands::AddPredefined { kind, text, range } => EditCommand::AddPredefined {
                start: TimeMs(range.start),
                end: TimeMs(range.end),
                text,
                predefined_type: kind.into(),
            },
            Commands::TrimStart { clip, to } => EditCommand::TrimStart {
                clip_id: clip,
                time: TimeMs(to),
            },
            Commands::TrimEnd { clip, to } => EditCommand::TrimEnd {
                clip_id: clip,
                time: TimeMs(to),
            },
            Commands::Split { clip, at } => EditCommand::Split {
                clip_id: clip,
                at: TimeMs(at),
            },
            Commands::Delete { clip } => EditCommand::Delete { clip_id: clip },
            Commands::RemoveAsset { asset } => EditCommand::RemoveAsset { asset_id: asset },
        };
        Some(edit)
    }
}
