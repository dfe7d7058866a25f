use clap::{
    Parser,
    Subcommand,
};
use serde::{
    Deserialize,
    Serialize,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search a map for its best fall.
    Seek(SeekArgs),
    /// Write a template configuration file.
    WriteTemplate(WriteTemplateArgs),
}

#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    PrettyJson,
}

#[derive(Parser, Debug, Clone, Default)]
pub struct SeekArgs {
    /// Path to the JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Path to the map file (will over-write the config file)
    #[arg(short, long)]
    pub map_file: Option<PathBuf>,

    /// Cell separator used in the map file, any whitespace when omitted
    #[arg(short, long)]
    pub separator: Option<char>,

    /// Maximum number of landing sites explored at the same time
    #[arg(short = 'j', long)]
    pub max_concurrency: Option<usize>,

    /// The format to use for the result
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Write the result to this file instead of stdout
    #[arg(short, long)]
    pub output_path: Option<PathBuf>,

    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

#[derive(Parser, Debug)]
pub struct WriteTemplateArgs {
    /// Where to write the template configuration.
    #[arg(short, long)]
    pub output_path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seek_args_parse() {
        let args = Args::try_parse_from([
            "bestfall", "seek", "-m", "map.txt", "-j", "4", "--format", "pretty-json",
            "--no-progress",
        ])
        .unwrap();
        match args.command {
            Some(Commands::Seek(seek)) => {
                assert_eq!(seek.map_file, Some(PathBuf::from("map.txt")));
                assert_eq!(seek.max_concurrency, Some(4));
                assert_eq!(seek.format, Some(OutputFormat::PrettyJson));
                assert!(seek.no_progress);
                assert!(seek.config.is_none());
            }
            other => panic!("Unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_write_template_requires_output() {
        assert!(Args::try_parse_from(["bestfall", "write-template"]).is_err());
        assert!(Args::try_parse_from(["bestfall", "write-template", "-o", "conf.json"]).is_ok());
    }
}
