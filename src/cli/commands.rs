//! Command dispatch

use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::application::services::KnowledgeService;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, Settings};
use crate::domain::{KnowledgeBase, TreeNodeConvert};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::traits::{ConsoleMessenger, FileSystem};
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    if let Some(Commands::Completion { shell }) = &cli.command {
        return cmd_completion(*shell);
    }

    let settings = Settings::load()?.with_knowledge_file(cli.file.clone());
    debug!("settings: {:?}", settings);
    let container = ServiceContainer::new(settings);

    match &cli.command {
        None | Some(Commands::Play) => cmd_play(&container),
        Some(Commands::Tree) => cmd_tree(&container),
        Some(Commands::Transcript) => cmd_transcript(&container),
        Some(Commands::Info) => cmd_info(&container),
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Show => cmd_config_show(&container),
            ConfigCommands::Init { force } => cmd_config_init(&container, *force),
            ConfigCommands::Path => cmd_config_path(&container),
        },
        Some(Commands::Completion { .. }) => Ok(()),
    }
}

fn load_knowledge(container: &ServiceContainer) -> CliResult<KnowledgeBase> {
    let settings = &container.settings;
    Ok(container
        .knowledge
        .load(&settings.knowledge_file, &settings.seed_animal)?)
}

#[instrument(skip_all)]
fn cmd_play(container: &ServiceContainer) -> CliResult<()> {
    let mut io = ConsoleMessenger::stdio();
    container.game.play(&mut io)?;
    Ok(())
}

#[instrument(skip_all)]
fn cmd_tree(container: &ServiceContainer) -> CliResult<()> {
    let kb = load_knowledge(container)?;
    output::raw(&kb.to_tree_string());
    Ok(())
}

#[instrument(skip_all)]
fn cmd_transcript(container: &ServiceContainer) -> CliResult<()> {
    let kb = load_knowledge(container)?;
    output::raw(&KnowledgeService::transcript(kb)?);
    Ok(())
}

#[instrument(skip_all)]
fn cmd_info(container: &ServiceContainer) -> CliResult<()> {
    let path = &container.settings.knowledge_file;
    let kb = load_knowledge(container)?;

    output::header("Knowledge");
    output::action("file", &path.display());
    output::action(
        "saved",
        if container.fs.exists(path) { "yes" } else { "no" },
    );
    output::action("animals", &kb.animal_count());
    output::action("questions", &kb.question_count());
    output::action("depth", &kb.depth());
    Ok(())
}

fn cmd_config_show(container: &ServiceContainer) -> CliResult<()> {
    output::raw(&container.settings.to_toml()?);
    Ok(())
}

fn cmd_config_path(container: &ServiceContainer) -> CliResult<()> {
    match global_config_path() {
        Some(path) => output::action("global", &path.display()),
        None => output::action("global", "(no config directory)"),
    }
    output::action("knowledge", &container.settings.knowledge_file.display());
    Ok(())
}

fn cmd_config_init(container: &ServiceContainer, force: bool) -> CliResult<()> {
    let path = global_config_path()
        .ok_or_else(|| CliError::InvalidArgs("cannot determine config directory".into()))?;
    if container.fs.exists(&path) && !force {
        return Err(CliError::InvalidArgs(format!(
            "config file already exists: {} (use --force to overwrite)",
            path.display()
        )));
    }

    container
        .fs
        .ensure_parent(&path)
        .map_err(|e| InfraError::io(format!("create {}", path.display()), e))?;
    container
        .fs
        .write(&path, &Settings::template())
        .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
    output::success(&format!("created {}", path.display()));
    Ok(())
}

fn cmd_completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
