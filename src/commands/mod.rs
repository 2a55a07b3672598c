use crate::commands::sheet::{CuesCommand, LayoutCommand, LookupCommand};
use clap::{Parser, Subcommand};

pub mod sheet;

/// CLI for inspecting WebVTT thumbnail sheets and thumbnail placement.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Cues(CuesCommand),
    Lookup(LookupCommand),
    Layout(LayoutCommand),
}
