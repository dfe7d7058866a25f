use bestfall::{
    ExplorationConfig,
    Separator,
};
use serde::{
    Deserialize,
    Serialize,
};
use std::path::{
    Path,
    PathBuf,
};

use crate::cli::{
    OutputFormat,
    SeekArgs,
};
use crate::errors::CliError;

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub input: Option<InputConfig>,
    pub exploration: ExplorationConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct InputConfig {
    pub path: PathBuf,
    #[serde(default)]
    pub separator: Option<char>,
}

impl InputConfig {
    pub fn separator(&self) -> Separator {
        Separator::from(self.separator)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub path: Option<PathBuf>,
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, CliError> {
        let file = std::fs::File::open(path).map_err(|e| CliError::Io {
            source: e,
            path: Some(path.to_path_buf()),
        })?;
        Ok(serde_json::from_reader(file)?)
    }

    /// Template written by `write-template`.
    pub fn template() -> Self {
        Self {
            input: Some(InputConfig {
                path: PathBuf::from("map.txt"),
                separator: None,
            }),
            ..Default::default()
        }
    }

    /// Command line values win over the config file.
    pub fn with_cli_args(mut self, args: &SeekArgs) -> Result<Self, CliError> {
        if let Some(map_file) = args.map_file.clone() {
            let separator = self.input.as_ref().and_then(|i| i.separator);
            self.input = Some(InputConfig {
                path: map_file,
                separator,
            });
        }
        if let Some(separator) = args.separator {
            match self.input.as_mut() {
                Some(input) => input.separator = Some(separator),
                None => {
                    return Err(CliError::Config(
                        "A separator was given without a map file".to_string(),
                    ));
                }
            }
        }
        if let Some(max_concurrency) = args.max_concurrency {
            self.exploration.max_concurrency = max_concurrency;
        }
        if let Some(format) = args.format {
            self.output.format = format;
        }
        if let Some(output_path) = args.output_path.clone() {
            self.output.path = Some(output_path);
        }

        if self.input.is_none() {
            return Err(CliError::Config(
                "No input provided, please provide one in either the config file or with the --map-file flag".to_string(),
            ));
        }
        self.exploration.validate()?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let conf: Config =
            serde_json::from_str(r#"{"input": {"path": "some/map.txt"}}"#).unwrap();
        assert_eq!(conf.input.as_ref().unwrap().path, PathBuf::from("some/map.txt"));
        assert_eq!(conf.input.as_ref().unwrap().separator(), Separator::Whitespace);
        assert_eq!(conf.exploration, ExplorationConfig::default());
        assert_eq!(conf.output.format, OutputFormat::Text);
        assert!(conf.output.path.is_none());
    }

    #[test]
    fn test_template_roundtrips() {
        let template = Config::template();
        let text = serde_json::to_string_pretty(&template).unwrap();
        let back: Config = serde_json::from_str(&text).unwrap();
        assert_eq!(back, template);
        assert!(text.contains("\"max_concurrency\": 10"));
    }

    #[test]
    fn test_cli_overrides_config() {
        let conf: Config = serde_json::from_str(
            r#"{
                "input": {"path": "a.txt", "separator": ","},
                "exploration": {"max_concurrency": 2, "progress_interval_ms": 50},
                "output": {"format": "json"}
            }"#,
        )
        .unwrap();
        let args = SeekArgs {
            map_file: Some(PathBuf::from("b.txt")),
            max_concurrency: Some(6),
            format: Some(OutputFormat::PrettyJson),
            ..Default::default()
        };
        let conf = conf.with_cli_args(&args).unwrap();
        let input = conf.input.unwrap();
        assert_eq!(input.path, PathBuf::from("b.txt"));
        // The file's separator survives a map-file override.
        assert_eq!(input.separator, Some(','));
        assert_eq!(conf.exploration.max_concurrency, 6);
        assert_eq!(conf.exploration.progress_interval_ms, 50);
        assert_eq!(conf.output.format, OutputFormat::PrettyJson);
    }

    #[test]
    fn test_missing_input_is_an_error() {
        let res = Config::default().with_cli_args(&SeekArgs::default());
        assert!(matches!(res, Err(CliError::Config(_))));
    }

    #[test]
    fn test_zero_concurrency_is_an_error() {
        let args = SeekArgs {
            map_file: Some(PathBuf::from("map.txt")),
            max_concurrency: Some(0),
            ..Default::default()
        };
        let res = Config::default().with_cli_args(&args);
        assert!(matches!(res, Err(CliError::Search(_))));
    }
}
