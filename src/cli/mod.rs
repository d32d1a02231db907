//! CLI Module
//!
//! Command-line interface for the Prism decision pipeline and services.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Prism - route intent to Architect, Author or Lab
#[derive(Parser, Debug)]
#[command(name = "prism")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify free text into a mode
    #[command(name = "classify")]
    Classify {
        /// What the visitor typed
        text: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the fixed preset for a mode
    #[command(name = "preset")]
    Preset {
        /// architect, author or lab
        mode: String,
    },

    /// Generate whispers
    #[command(name = "whisper")]
    Whisper {
        /// landing, architect, author or lab
        #[arg(short, long, default_value = "landing")]
        mode: String,

        /// Visitor mood
        #[arg(long)]
        mood: Option<String>,

        /// Number of whispers
        #[arg(short, long, default_value_t = 1)]
        count: usize,
    },

    /// Synthesize speech to a file
    #[command(name = "speak")]
    Speak {
        /// Text to speak
        text: String,

        /// Voice identifier
        #[arg(long)]
        voice: String,

        /// Output file
        #[arg(short, long)]
        out: PathBuf,
    },

    /// List speech voices
    #[command(name = "voices")]
    Voices,

    /// Echo Chamber guestbook
    #[command(subcommand)]
    Echo(EchoCommands),

    /// Render the preset drone for a mode
    #[command(name = "render-ambient")]
    RenderAmbient {
        /// architect, author or lab
        mode: String,

        /// Output WAV file
        #[arg(short, long)]
        out: PathBuf,

        /// Duration in seconds
        #[arg(short, long, default_value_t = 8.0)]
        seconds: f32,
    },
}

#[derive(Subcommand, Debug)]
pub enum EchoCommands {
    /// Post an entry
    #[command(name = "post")]
    Post {
        /// Display name
        #[arg(long, default_value = "")]
        name: String,

        /// Message
        #[arg(long)]
        message: String,

        /// Mode the visitor was in
        #[arg(long, default_value = "landing")]
        mode: String,
    },

    /// List recent entries
    #[command(name = "list")]
    List {
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },
}
