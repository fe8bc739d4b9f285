//! Main packer executable, to be used as custom build step. For help run this
//! command with `-h`.

#![warn(missing_docs)]

use anyhow::{Context, Error};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use simple_logger::SimpleLogger;
use std::path::PathBuf;
use www_pack_packer::{
    compress::CompressionOptions,
    directory::SearchOptions,
    filesystem::{FilesystemOptions, Strategy},
    pipeline::{self, Mode, PipelineOptions, Report},
    route_path::RouteKey,
    route_table::RouteTableOptions,
};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Arguments {
    /// Log details of every step, not only packed files.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug)]
struct GlobalOptions {
    /// Gzip compression level, 0-9. If not set, uses best compression.
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=9))]
    pub level: Option<u32>,

    /// Whether to follow links while traversing source directory. If not set,
    /// uses sane defaults.
    #[arg(long)]
    pub follow_links: Option<bool>,
}
impl GlobalOptions {
    pub fn into_pipeline_options(self) -> PipelineOptions {
        let mut pipeline_options = PipelineOptions::default();

        if let Some(level) = self.level {
            pipeline_options.compression = CompressionOptions { level };
        }

        if let Some(follow_links) = self.follow_links {
            pipeline_options.search = SearchOptions { follow_links };
        }

        pipeline_options
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum RouteKeyArgument {
    /// `/dir/file.html` for `dir/file.html`.
    RelativePath,
    /// `/file.html` for `dir/file.html`, colliding names are rejected.
    FileName,
}
impl From<RouteKeyArgument> for RouteKey {
    fn from(route_key: RouteKeyArgument) -> Self {
        match route_key {
            RouteKeyArgument::RelativePath => RouteKey::RelativePath,
            RouteKeyArgument::FileName => RouteKey::FileName,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum StrategyArgument {
    /// Remove all destination content, then write everything.
    Wipe,
    /// Remove stale files, write only new and changed ones.
    Sync,
}
impl From<StrategyArgument> for Strategy {
    fn from(strategy: StrategyArgument) -> Self {
        match strategy {
            StrategyArgument::Wipe => Strategy::Wipe,
            StrategyArgument::Sync => Strategy::Sync,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generates route table with every file of source directory embedded as
    /// gzip compressed literal. Table is meant to be included into firmware
    /// router initializer.
    Routes {
        #[command(flatten)]
        global_options: GlobalOptions,

        /// How route paths are derived from file paths. If not set, uses full
        /// relative path.
        #[arg(long)]
        route_key: Option<RouteKeyArgument>,

        /// Name of device function serving payload. If not set, uses
        /// `serve_static`.
        #[arg(long)]
        handler: Option<String>,

        /// The directory with static files.
        source_directory_path: PathBuf,

        /// Output table path, eg. `build/generated/static_routes.h`.
        output_file_path: PathBuf,
    },
    /// Mirrors source directory into destination, with every file gzip
    /// compressed and `.gz` appended to its name. Content of destination not
    /// matching source is removed.
    Filesystem {
        #[command(flatten)]
        global_options: GlobalOptions,

        /// How destination is updated. If not set, wipes destination.
        #[arg(long)]
        strategy: Option<StrategyArgument>,

        /// The directory with static files.
        source_directory_path: PathBuf,

        /// Destination directory, eg. `data/www`.
        destination_directory_path: PathBuf,
    },
}

fn main() -> Result<(), Error> {
    let arguments = Arguments::parse();

    SimpleLogger::new()
        .with_level(if arguments.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .init()?;

    match arguments.command {
        Command::Routes {
            global_options,
            route_key,
            handler,
            source_directory_path,
            output_file_path,
        } => {
            let mut route_table_options = RouteTableOptions::default();
            if let Some(route_key) = route_key {
                route_table_options.route_key = route_key.into();
            }
            if let Some(handler) = handler {
                route_table_options.handler = handler;
            }

            let report = pipeline::run(
                &source_directory_path,
                &Mode::Embedded {
                    output_file: output_file_path.clone(),
                    options: route_table_options,
                },
                &global_options.into_pipeline_options(),
            )
            .with_context(|| output_file_path.to_string_lossy().into_owned())?;

            if let Report::Embedded(report) = report {
                println!(
                    "{} routes, {} -> {} bytes",
                    report.route_paths.len(),
                    report.content_length,
                    report.content_gzip_length
                );
            }
        }
        Command::Filesystem {
            global_options,
            strategy,
            source_directory_path,
            destination_directory_path,
        } => {
            let mut filesystem_options = FilesystemOptions::default();
            if let Some(strategy) = strategy {
                filesystem_options.strategy = strategy.into();
            }

            let report = pipeline::run(
                &source_directory_path,
                &Mode::Filesystem {
                    destination: destination_directory_path.clone(),
                    options: filesystem_options,
                },
                &global_options.into_pipeline_options(),
            )
            .with_context(|| destination_directory_path.to_string_lossy().into_owned())?;

            if let Report::Filesystem(report) = report {
                println!(
                    "added {}, changed {}, unchanged {}, removed {}",
                    report.added.len(),
                    report.changed.len(),
                    report.unchanged.len(),
                    report.removed.len()
                );
            }
        }
    }

    Ok(())
}
