//! Main CLI application

use crate::config::{parse_config_auto, parse_config_file, validate_config, YarFile};
use crate::error::YarError;
use crate::logging::{init_logging, Verbosity};
use crate::runner::{run_named, Context};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use clap_complete::Shell;
use colored::Colorize;
use std::ffi::{OsStr, OsString};
use std::io::{self, Write};
use std::path::PathBuf;

/// Name of the built-in subcommand that lists commands
const HELP_COMMAND: &str = "help";

/// CLI application
pub struct App {
    /// The clap command
    command: Command,
    /// Parsed configuration
    config: YarFile,
    /// Config file path
    config_path: PathBuf,
}

impl App {
    /// Create a new app, discovering yar.yml from the current directory upwards
    pub fn new() -> Result<Self, YarError> {
        let (config, config_path) = parse_config_auto()?;
        Self::from_parts(config, config_path)
    }

    /// Create app with a specific config file
    pub fn with_config_file(path: PathBuf) -> Result<Self, YarError> {
        let config = parse_config_file(&path)?;
        Self::from_parts(config, path)
    }

    fn from_parts(config: YarFile, config_path: PathBuf) -> Result<Self, YarError> {
        validate_config(&config)?;
        let command = build_command(&config);

        Ok(App {
            command,
            config,
            config_path,
        })
    }

    /// Run the application with the process's command line arguments
    pub fn run(self) -> Result<(), YarError> {
        self.run_from(std::env::args_os())
    }

    /// Run the application with explicit arguments (the first is the binary name)
    pub fn run_from<I, T>(mut self, args: I) -> Result<(), YarError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self.command.clone().get_matches_from(args);

        // A subscriber may already be installed when embedded; keep that one
        let _ = init_logging(get_verbosity(&matches));

        if let Some(shell) = matches.get_one::<Shell>("completions").copied() {
            let bin_name = self.command.get_name().to_string();
            clap_complete::generate(shell, &mut self.command, bin_name, &mut io::stdout());
            return Ok(());
        }

        let command_name = match matches.subcommand_name() {
            Some(name) if !matches.get_flag("list") && !self.is_builtin_help(name) => name.to_string(),
            _ => {
                self.print_listing()?;
                return Ok(());
            }
        };

        let mut ctx = Context::new()
            .with_config_path(&self.config_path)
            .with_skip_up_to_date(matches.get_flag("if-stale"));

        if let Some(dir) = matches.get_one::<PathBuf>("scratch-dir") {
            ctx = ctx.with_scratch_dir(dir.clone());
        }

        run_named(&self.config.commands, &command_name, &ctx)?;
        Ok(())
    }

    fn is_builtin_help(&self, name: &str) -> bool {
        name == HELP_COMMAND && !self.config.commands.contains_key(HELP_COMMAND)
    }

    /// Print the list of available commands to stdout
    pub fn print_listing(&self) -> Result<(), YarError> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.write_listing(&mut out)?;
        Ok(())
    }

    /// Write the list of available commands, sorted by name
    pub fn write_listing<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if self.config.commands.is_empty() {
            return Ok(());
        }

        writeln!(
            out,
            "The yar file {} has the following commands available:",
            self.config_path.display()
        )?;

        let mut names: Vec<&String> = self.config.commands.keys().collect();
        names.sort();

        for name in names {
            let command = &self.config.commands[name];
            writeln!(out, "- {} [{}]", name.green().bold(), command.summary())?;
        }

        Ok(())
    }
}

/// Build the clap command from configuration
fn build_command(config: &YarFile) -> Command {
    let mut cmd = Command::new("yar")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Runs commands defined in a yar.yml file")
        .disable_help_subcommand(true)
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .visible_alias("yar")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Path to yar.yml config file")
                .global(true),
        )
        .arg(
            Arg::new("list")
                .short('l')
                .long("list")
                .help("List the available commands")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("if-stale")
                .long("if-stale")
                .help("Skip the command when its outputs are newer than its dependencies")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("scratch-dir")
                .long("scratch-dir")
                .value_name("DIR")
                .help("Directory for temporary script files")
                .value_parser(value_parser!(PathBuf))
                .global(true),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Only log errors")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("silent")
                .short('s')
                .long("silent")
                .help("Log nothing")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log more detail (repeat for trace output)")
                .action(ArgAction::Count)
                .global(true),
        )
        .arg(
            Arg::new("completions")
                .long("completions")
                .value_name("SHELL")
                .help("Print a shell completion script")
                .value_parser(value_parser!(Shell)),
        );

    let mut names: Vec<&String> = config.commands.keys().collect();
    names.sort();

    for name in names {
        let command = &config.commands[name];
        cmd = cmd.subcommand(Command::new(name.clone()).about(command.summary().to_string()));
    }

    if !config.commands.contains_key(HELP_COMMAND) {
        cmd = cmd.subcommand(Command::new(HELP_COMMAND).about("List the available commands"));
    }

    cmd
}

/// Get verbosity level from matches
fn get_verbosity(matches: &ArgMatches) -> Verbosity {
    if matches.get_flag("silent") {
        Verbosity::Silent
    } else if matches.get_flag("quiet") {
        Verbosity::Quiet
    } else {
        match matches.get_count("verbose") {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            _ => Verbosity::Trace,
        }
    }
}

/// Run the CLI application with the process's arguments
pub fn run() -> Result<(), YarError> {
    // The config file decides which subcommands exist, so it is located before clap parses
    let args: Vec<OsString> = std::env::args_os().collect();
    let file_path = extract_file_arg(&args);

    let app = if let Some(path) = file_path {
        App::with_config_file(path)?
    } else {
        App::new()?
    };

    app.run_from(args)
}

/// Short flags that take no value and may share a cluster with `-f`
const SHORT_SWITCHES: &[u8] = b"lqsvhV";

/// Long options whose value is the following argument
const VALUE_OPTIONS: &[&str] = &["--scratch-dir", "--completions"];

/// Extract the --file argument before clap parsing, accepting every form clap does:
/// `--file X`, `--file=X`, `--yar X`, `--yar=X`, `-f X`, `-fX` and clusters like `-vfX`
fn extract_file_arg(args: &[OsString]) -> Option<PathBuf> {
    let mut iter = args.iter().skip(1);

    while let Some(arg) = iter.next() {
        let bytes = arg.as_encoded_bytes();

        if bytes == b"--" {
            break;
        }
        if bytes == b"--file" || bytes == b"--yar" {
            return iter.next().map(PathBuf::from);
        }
        if let Some(value) =
            strip_ascii_prefix(arg, "--file=").or_else(|| strip_ascii_prefix(arg, "--yar="))
        {
            return Some(PathBuf::from(value));
        }
        if VALUE_OPTIONS.iter().any(|opt| bytes == opt.as_bytes()) {
            iter.next();
            continue;
        }
        if bytes.len() > 1 && bytes[0] == b'-' && bytes[1] != b'-' {
            for (i, &b) in bytes.iter().enumerate().skip(1) {
                if b == b'f' {
                    if i + 1 == bytes.len() {
                        return iter.next().map(PathBuf::from);
                    }
                    // clap reads `-f=X` as the value `X`
                    let end = if bytes[i + 1] == b'=' { i + 2 } else { i + 1 };
                    let prefix = String::from_utf8_lossy(&bytes[..end]).into_owned();
                    return strip_ascii_prefix(arg, &prefix).map(PathBuf::from);
                }
                if !SHORT_SWITCHES.contains(&b) {
                    break;
                }
            }
        }
    }
    None
}

/// The part of `arg` after an ASCII `prefix`, keeping non-UTF-8 bytes intact
#[cfg(unix)]
fn strip_ascii_prefix(arg: &OsStr, prefix: &str) -> Option<OsString> {
    use std::os::unix::ffi::OsStrExt;

    arg.as_bytes()
        .strip_prefix(prefix.as_bytes())
        .map(|rest| OsStr::from_bytes(rest).to_os_string())
}

#[cfg(not(unix))]
fn strip_ascii_prefix(arg: &OsStr, prefix: &str) -> Option<OsString> {
    arg.to_str()?.strip_prefix(prefix).map(OsString::from)
}
