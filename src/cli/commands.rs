use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::DatasetBuilder;
use crate::cli::args::{Cli, Commands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::Settings;
use crate::domain::{parse_ids, TreeDisplay};
use crate::infrastructure::{write_dataset, SourceReader};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Build { input, output }) => {
            let settings = Settings::load(cli.config.as_deref())?;
            _build(&settings, input.as_deref(), output.as_deref())
        }
        Some(Commands::Check { input }) => {
            let settings = Settings::load(cli.config.as_deref())?;
            _check(&settings, input.as_deref())
        }
        Some(Commands::Tree { ids }) => _tree(ids),
        Some(Commands::Info) => {
            let settings = Settings::load(cli.config.as_deref())?;
            _info(&settings)
        }
        Some(Commands::Completion { shell }) => {
            _completion(*shell);
            Ok(())
        }
        None => Ok(()),
    }
}

/// Settings with command-line overrides applied.
fn effective(settings: &Settings, input: Option<&Path>, output: Option<&Path>) -> Settings {
    Settings {
        data_dir: input
            .map(Path::to_path_buf)
            .unwrap_or_else(|| settings.data_dir.clone()),
        output_path: output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| settings.output_path.clone()),
        sources: settings.sources.clone(),
    }
}

#[instrument(skip(settings))]
fn _build(settings: &Settings, input: Option<&Path>, output: Option<&Path>) -> CliResult<()> {
    let settings = effective(settings, input, output);
    debug!("data_dir: {:?}, output: {:?}", settings.data_dir, settings.output_path);

    let dataset = build_dataset(&settings)?;
    write_dataset(&settings.output_path, &dataset)?;
    output::action(
        "Built",
        &format!(
            "{} entries, {} variant groups -> {}",
            dataset.entries.len(),
            dataset.variants.len(),
            settings.output_path.display()
        ),
    );
    Ok(())
}

#[instrument(skip(settings))]
fn _check(settings: &Settings, input: Option<&Path>) -> CliResult<()> {
    let settings = effective(settings, input, None);

    let dataset = build_dataset(&settings)?;
    let decomposed = dataset.entries.iter().filter(|r| r.ids.is_some()).count();
    let aliases = dataset.entries.iter().filter(|r| r.alias.is_some()).count();
    let excluded = dataset
        .entries
        .iter()
        .filter(|r| r.excluded.is_some())
        .count();

    output::success(&format!("{} entries classified", dataset.entries.len()));
    output::detail(&format!("decompositions: {}", decomposed));
    output::detail(&format!("aliases:        {}", aliases));
    output::detail(&format!("exclusions:     {}", excluded));
    output::detail(&format!("variant groups: {}", dataset.variants.len()));
    Ok(())
}

fn build_dataset(settings: &Settings) -> CliResult<crate::application::Dataset> {
    let reader = SourceReader::new();
    let paths = reader.source_paths(&settings.data_dir, &settings.sources);
    let rows = reader.read_rows(&paths)?;
    let geta = reader.read_geta(&settings.geta_path())?;
    let extra = reader.read_extra(&settings.extra_path())?;
    let oracle = reader.read_oracle(&settings.oracle_path())?;

    Ok(DatasetBuilder::new().build(&rows, &geta, &extra, &oracle)?)
}

#[instrument]
fn _tree(ids: &str) -> CliResult<()> {
    let node = parse_ids(ids)?;
    output::info(&node.to_tree_string());
    output::detail(&format!("serialized: {}", node));
    output::detail(&format!("nodes: {}", node.count()));
    Ok(())
}

fn _info(settings: &Settings) -> CliResult<()> {
    let rendered = toml::to_string_pretty(settings)
        .map_err(|e| CliError::Config(config::ConfigError::Message(e.to_string())))?;
    output::info(&rendered);
    Ok(())
}

fn _completion(shell: clap_complete::Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}
