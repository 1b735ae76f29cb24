use crate::core::ServiceIcon;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "site-admin")]
#[command(about = "Manage hero, services and materials content of the marketing site")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "site-admin.toml", global = true)]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Work against an empty in-memory store instead of Firestore
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Answer yes to every confirmation prompt
    #[arg(short, long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Hero section text
    #[command(subcommand)]
    Hero(HeroCommand),
    /// Services list
    #[command(subcommand)]
    Services(ServiceCommand),
    /// Materials list
    #[command(subcommand)]
    Materials(MaterialCommand),
    /// Upload an icon image and print its final link
    UploadIcon {
        file: PathBuf,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum HeroCommand {
    Show,
    Edit(HeroArgs),
}

#[derive(Debug, Clone, Args)]
pub struct HeroArgs {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub subtitle: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum ServiceCommand {
    List,
    Add(ServiceArgs),
    Edit {
        id: String,
        #[command(flatten)]
        fields: ServiceArgs,
    },
    Delete {
        id: String,
    },
}

#[derive(Debug, Clone, Args)]
pub struct ServiceArgs {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub image_url: Option<String>,
    #[arg(long, value_enum)]
    pub icon: Option<ServiceIcon>,
    /// Local image uploaded as the custom icon
    #[arg(long, conflicts_with = "clear_icon_photo")]
    pub icon_file: Option<PathBuf>,
    /// Drop the custom icon image
    #[arg(long)]
    pub clear_icon_photo: bool,
    #[arg(long, allow_negative_numbers = true)]
    pub order_index: Option<i64>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum MaterialCommand {
    List,
    Add(MaterialArgs),
    Edit {
        id: String,
        #[command(flatten)]
        fields: MaterialArgs,
    },
    Delete {
        id: String,
    },
}

#[derive(Debug, Clone, Args)]
pub struct MaterialArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long, allow_negative_numbers = true)]
    pub order_index: Option<i64>,
}
