use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "mtrans")]
#[command(about = "Text transform toolkit with universal auto-detection")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Config file (default: <config dir>/mtrans/config.toml)")]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, action = ArgAction::Count, help = "More log output (-v info, -vv debug, -vvv trace)")]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    #[command(about = "Encode text with a transform")]
    Enc {
        #[arg(long, short = 't', default_value = "base64")]
        transform: String,

        #[arg(long = "set", value_name = "NAME=VALUE", help = "Override a transform setting")]
        set: Vec<String>,

        #[arg(long, short = 'i', default_value = "-")]
        r#in: String,

        #[arg(long, short = 'o', default_value = "-")]
        out: String,

        #[arg(long, help = "Show encoding with all transforms")]
        all: bool,

        #[arg(long, help = "Output as JSON")]
        json: bool,
    },

    #[command(about = "Decode text with a transform")]
    Dec {
        #[arg(long, short = 't', default_value = "base64")]
        transform: String,

        #[arg(long = "set", value_name = "NAME=VALUE", help = "Override a transform setting")]
        set: Vec<String>,

        #[arg(long, short = 'i', default_value = "-")]
        r#in: String,

        #[arg(long, short = 'o', default_value = "-")]
        out: String,

        #[arg(long, help = "Output as JSON")]
        json: bool,
    },

    #[command(about = "Detect and decode input automatically")]
    Detect {
        #[arg(long, short = 'i', default_value = "-")]
        r#in: String,

        #[arg(long, value_name = "TRANSFORM", help = "Transform currently in use; its decoding is boosted")]
        active: Option<String>,

        #[arg(long)]
        json: bool,

        #[arg(long, help = "Number of alternatives to show (default from config)")]
        top: Option<usize>,
    },

    #[command(about = "List available transforms")]
    List {
        #[arg(long)]
        json: bool,

        #[arg(long, help = "Only this category")]
        category: Option<String>,
    },

    #[command(about = "Show transform details")]
    Info {
        transform: String,

        #[arg(long)]
        json: bool,
    },

    #[command(about = "Render a sample with a transform's default settings")]
    Preview {
        transform: String,

        #[arg(long, default_value = "Hello World")]
        sample: String,
    },
}
