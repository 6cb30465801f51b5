use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "picdeck")]
#[command(author, version, about)]
#[command(long_about = "An image slideshow presenter.\n\n\
    Load a set of images and cycle through them automatically or by hand.\n\n\
    Examples:\n  \
    picdeck ~/Pictures/trip          Present every image in a folder\n  \
    picdeck a.jpg b.png --play       Start playing immediately\n  \
    picdeck --demo --windowed        Show the demo set in a window\n  \
    picdeck config set defaults.interval_ms 4000")]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Image files or directories to load
    pub paths: Vec<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Load the bundled demo images
    #[arg(long, conflicts_with = "paths")]
    pub demo: bool,

    /// Start playing as soon as the slides are loaded
    #[arg(long)]
    pub play: bool,

    /// Time each slide is shown, in milliseconds (800-6000)
    #[arg(long, value_name = "MS")]
    pub interval: Option<u32>,

    /// Title shown in the header
    #[arg(long)]
    pub title: Option<String>,

    /// Launch in a window instead of fullscreen
    #[arg(long)]
    pub windowed: bool,

    /// Increase output verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// View and modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Display current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. defaults.interval_ms, defaults.theme)
        key: String,

        /// Value to set
        value: String,
    },
}

#[derive(Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

/// Everything the presenter window needs at launch.
#[derive(Debug, Clone, Default)]
pub struct LaunchOptions {
    pub paths: Vec<PathBuf>,
    pub demo: bool,
    pub play: bool,
    pub interval: Option<u32>,
    pub title: Option<String>,
    pub windowed: bool,
}

impl Cli {
    /// Log filter implied by `-q` / `-v`.
    pub fn log_level(&self) -> log::LevelFilter {
        if self.quiet {
            return log::LevelFilter::Error;
        }
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }

    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Commands::Config { command }) => crate::commands::config::run(command),
            Some(Commands::Completion { shell }) => {
                crate::commands::completion::run(shell);
                Ok(())
            }
            Some(Commands::Version) => {
                println!("picdeck {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
            None => crate::app::run(LaunchOptions {
                paths: self.paths,
                demo: self.demo,
                play: self.play,
                interval: self.interval,
                title: self.title,
                windowed: self.windowed,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_launch_flags() {
        let cli = Cli::try_parse_from([
            "picdeck",
            "a.png",
            "pics",
            "--play",
            "--interval",
            "1800",
            "--windowed",
        ])
        .unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.paths, vec![PathBuf::from("a.png"), PathBuf::from("pics")]);
        assert!(cli.play);
        assert_eq!(cli.interval, Some(1800));
        assert!(cli.windowed);
    }

    #[test]
    fn test_demo_conflicts_with_paths() {
        assert!(Cli::try_parse_from(["picdeck", "--demo", "a.png"]).is_err());
    }

    #[test]
    fn test_config_subcommand() {
        let cli = Cli::try_parse_from(["picdeck", "config", "set", "defaults.theme", "light"])
            .unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                command: ConfigCommands::Set { .. }
            })
        ));
    }

    #[test]
    fn test_log_level() {
        let cli = Cli::try_parse_from(["picdeck", "-vv"]).unwrap();
        assert_eq!(cli.log_level(), log::LevelFilter::Debug);
        let cli = Cli::try_parse_from(["picdeck", "-q", "-v"]).unwrap();
        assert_eq!(cli.log_level(), log::LevelFilter::Error);
        let cli = Cli::try_parse_from(["picdeck"]).unwrap();
        assert_eq!(cli.log_level(), log::LevelFilter::Warn);
    }
}
