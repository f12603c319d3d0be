mod cli;

use clap::Parser as ClapParser;
use colored::*;
use mica_config::{MicaConfig, MicaProjectConfig};
use mica_driver::{check_file, run_file};
use mica_log::log_info;

use cli::{Cli, SubCommand};

fn load_project_config() -> Result<Option<MicaProjectConfig>, String> {
  let dir = std::env::current_dir().map_err(|e| e.to_string())?;
  MicaProjectConfig::load_from_dir(&dir).map_err(|e| e.to_string())
}

fn parse_cli_to_config(cli: &Cli) -> Result<MicaConfig, String> {
  let mut config = MicaConfig::new_basic(
    cli.debug,
    cli.debug_trace.iter().copied().map(Into::into).collect(),
    cli.quiet,
    cli.verbose,
  );

  if let Some(project) = load_project_config()? {
    config.apply_project(project);
  }

  if !cli.dump.is_empty() {
    config.run_config.dump = cli.dump.iter().copied().map(Into::into).collect();
  }

  if cli.dump_dir.is_some() {
    config.run_config.dump_dir.clone_from(&cli.dump_dir);
  }

  let (file_path, no_host_imports) = match &cli.subcommand {
    SubCommand::Run(run) => {
      if let Some(backend) = run.backend {
        config.run_config.backend = backend.into();
      }

      if let Some(depth) = run.max_call_depth {
        config.max_call_depth = depth;
      }

      (&run.file_path, run.no_host_imports)
    },
    SubCommand::Check(check) => {
      config.run_config.check_only = true;
      (&check.file_path, check.no_host_imports)
    },
  };

  if no_host_imports {
    config.host_imports = false;
  }

  if file_path.is_some() {
    config.run_config.file.clone_from(file_path);
  }

  Ok(config)
}

fn main() {
  let cli = Cli::parse();

  let config = match parse_cli_to_config(&cli) {
    Ok(config) => config,
    Err(message) => {
      eprintln!("{} {}", "error:".red().bold(), message);
      std::process::exit(1);
    },
  };

  let Some(file_path) = config.run_config.file.clone() else {
    eprintln!("No file path provided. Please provide a file path or add `entry` to mica.toml.");
    eprintln!("For more information, run `mica --help`");
    std::process::exit(1);
  };

  let result = if config.run_config.check_only {
    check_file(&config, &file_path).map(|_| None)
  } else {
    run_file(&config, &file_path).map(Some)
  };

  match result {
    Ok(Some(value)) => log_info!(&config, "entry returned {}", value),
    Ok(None) => {},
    Err(error) => {
      if error.is_fatal() {
        eprintln!("{} {}", "fatal:".red().bold(), error);
      } else {
        eprintln!("{} {}", "error:".red().bold(), error);
      }
      std::process::exit(1);
    },
  }
}
