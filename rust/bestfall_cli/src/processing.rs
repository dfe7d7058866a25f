use bestfall::{
    ElevationGrid,
    FallReport,
    NoopObserver,
    ProgressEvent,
    ProgressObserver,
    find_best_fall,
    load_grid,
};
use indicatif::{
    ProgressBar,
    ProgressStyle,
};
use std::fs::File;
use std::io::{
    BufWriter,
    Write,
};
use tracing::{
    info,
    instrument,
    warn,
};

use crate::cli::{
    OutputFormat,
    SeekArgs,
    WriteTemplateArgs,
};
use crate::config::Config;
use crate::errors::CliError;

/// Mirrors progress events onto an indicatif bar.
pub struct ProgressBarObserver {
    bar: ProgressBar,
}

impl ProgressBarObserver {
    pub fn new(grid: &ElevationGrid) -> Self {
        let bar = match bestfall::progress::theoretical_max_opportunities(grid.rows(), grid.cols())
        {
            Some(_) => {
                let bar = ProgressBar::new(100);
                bar.set_style(
                    ProgressStyle::with_template(
                        "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}% {msg}",
                    )
                    .unwrap_or_else(|_| ProgressStyle::default_bar()),
                );
                bar
            }
            None => {
                let bar = ProgressBar::new_spinner();
                bar.set_style(
                    ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg}")
                        .unwrap_or_else(|_| ProgressStyle::default_spinner()),
                );
                bar
            }
        };
        bar.set_message(format!(
            "Processing {} * {} dataset...",
            grid.rows(),
            grid.cols()
        ));
        Self { bar }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressObserver for ProgressBarObserver {
    fn on_progress(&self, event: &ProgressEvent) {
        match (event.percent, event.theoretical_max) {
            (Some(pct), Some(max)) => {
                self.bar.set_position(pct as u64);
                self.bar.set_message(format!(
                    "Evaluated {} of {} possible paths",
                    event.evaluated, max
                ));
            }
            _ => {
                self.bar.set_message(format!("Evaluated {} paths", event.evaluated));
                self.bar.tick();
            }
        }
    }
}

fn render(report: &FallReport, format: OutputFormat) -> Result<String, CliError> {
    Ok(match format {
        OutputFormat::Text => report.to_string(),
        OutputFormat::Json => serde_json::to_string(report)?,
        OutputFormat::PrettyJson => serde_json::to_string_pretty(report)?,
    })
}

/// Main function for the 'seek' subcommand.
#[instrument(skip_all)]
pub fn main_seek(args: SeekArgs) -> Result<(), CliError> {
    let config = match args.config.as_ref() {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    let config = config.with_cli_args(&args)?;
    info!("Parsed configuration: {:#?}", config);

    let Some(input) = config.input.as_ref() else {
        return Err(CliError::Config("No input specified".to_string()));
    };
    let grid = load_grid(&input.path, input.separator())?;

    let outcome = if args.no_progress {
        find_best_fall(&grid, &config.exploration, &NoopObserver)?
    } else {
        let observer = ProgressBarObserver::new(&grid);
        let res = find_best_fall(&grid, &config.exploration, &observer);
        observer.finish();
        res?
    };
    info!(
        "Evaluated {} falls in {:?}",
        outcome.paths_evaluated, outcome.elapsed
    );

    let Some(report) = FallReport::from_outcome(&outcome, &grid)? else {
        warn!("No valid falls were found");
        println!("There seems to be an issue with the provided data.\nNo valid falls were found.");
        return Ok(());
    };

    let rendered = render(&report, config.output.format)?;
    match config.output.path.as_ref() {
        Some(path) => {
            let file = File::create(path).map_err(|e| CliError::Io {
                source: e,
                path: Some(path.clone()),
            })?;
            let mut writer = BufWriter::new(file);
            writeln!(writer, "{}", rendered)?;
            writer.flush()?;
            println!("Wrote to {}", path.display());
        }
        None => println!("{}", rendered),
    }
    Ok(())
}

/// Main function for the 'write-template' subcommand.
#[instrument(skip_all)]
pub fn main_write_template(args: WriteTemplateArgs) -> Result<(), CliError> {
    let template = serde_json::to_string_pretty(&Config::template())?;
    if let Some(parent) = args.output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(&args.output_path, template).map_err(|e| CliError::Io {
        source: e,
        path: Some(args.output_path.clone()),
    })?;
    println!("Wrote template config to {}", args.output_path.display());
    Ok(())
}
