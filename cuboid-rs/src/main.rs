//! Main entry point for the cuboid-rs CLI

mod cli;
mod commands;
mod utils;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::{Generator, generate};
use std::io;

use crate::cli::{Cli, Commands};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if cli.verbose > 0 {
        log::set_max_level(match cli.verbose {
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        });
    } else if cli.quiet {
        log::set_max_level(log::LevelFilter::Error);
    }

    match cli.command {
        Commands::Info { file } => commands::model::handle_info(&file),
        Commands::Tree {
            file,
            depth,
            no_color,
            details,
        } => commands::model::handle_tree(&file, depth, no_color, details),
        Commands::Lock { model, ids, unlock } => commands::model::handle_lock(&model, &ids, unlock),
        Commands::Translate {
            model,
            cubes,
            axis,
            length,
            target,
            space,
            all_cubes,
        } => commands::gumball::handle_translate(
            &model,
            &cubes,
            axis,
            length,
            target.into(),
            space.into(),
            all_cubes,
        ),
        Commands::Rotate {
            model,
            cubes,
            axis,
            angle,
            around_point,
            space,
        } => commands::gumball::handle_rotate(&model, &cubes, axis, angle, around_point, space.into()),
        Commands::Resize {
            model,
            cubes,
            axis,
            length,
            space,
        } => commands::gumball::handle_resize(&model, &cubes, axis, length, space.into()),
        Commands::Mirror {
            model,
            cubes,
            point,
            normal,
        } => commands::edit::handle_mirror(&model, &cubes, point, normal),
        Commands::Invert { model, cubes } => commands::edit::handle_invert(&model, &cubes),
        Commands::Completions { shell } => {
            print_completions(shell, &mut Cli::command());
            Ok(())
        }
    }
}

fn print_completions<G: Generator>(generator: G, cmd: &mut clap::Command) {
    generate(
        generator,
        cmd,
        cmd.get_name().to_string(),
        &mut io::stdout(),
    );
}
