mod app;
mod cli;
mod commands;
mod config;
mod fullscreen;
mod presenter;
mod render;
mod shortcuts;
mod theme;

use clap::Parser;

fn main() {
    let cli = cli::Cli::parse();

    // RUST_LOG takes precedence over -v / -q
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(cli.log_level().as_str()),
    )
    .init();

    if cli.no_color {
        colored::control::set_override(false);
    }

    if let Err(e) = cli.run() {
        eprintln!("{} {e:#}", colored::Colorize::red("error:"));
        std::process::exit(1);
    }
}
