//! melt: back up an Ed25519 SSH key as a seed phrase, and restore it.
//!
//! # Usage
//!
//! ```bash
//! melt ~/.ssh/id_ed25519
//! melt ~/.ssh/id_ed25519 > seed
//! melt restore --seed "seed phrase" ./restored_id25519
//! melt restore ./restored_id25519 < seed
//! ```

mod config;
mod render;

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, FromArgMatches, Parser, Subcommand};
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use zeroize::Zeroizing;

use melt_core::language::{self, WordlistTag};
use melt_core::{
    BackupPipeline, FilePairSink, KeySource, PassphraseNegotiator, RestorePipeline, StreamSink,
    TerminalReader,
};

use config::MeltConfig;
use render::Presenter;

const EXAMPLES: &str = "Examples:
  melt ~/.ssh/id_ed25519
  melt ~/.ssh/id_ed25519 > seed
  melt restore --seed \"seed phrase\" ./restored_id25519
  melt restore ./restored_id25519 < seed";

/// Generate a seed phrase from an SSH key.
///
/// melt generates a seed phrase from an SSH key. That phrase can be used to
/// rebuild your public and private keys.
#[derive(Parser, Debug)]
#[command(
    name = "melt",
    author,
    version,
    about,
    args_conflicts_with_subcommands = true,
    after_help = EXAMPLES
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// SSH private key to back up (`-` or omitted reads stdin)
    #[arg(value_name = "KEY")]
    key: Option<String>,

    /// Seed phrase language: a tag such as `ja` or a name such as `Japanese`
    #[arg(short, long, global = true)]
    language: Option<String>,

    /// Config file (defaults to $MELT_CONFIG, then the user config dir)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Recreate a key using the given seed phrase
    #[command(visible_aliases = ["res", "r"])]
    Restore(RestoreArgs),
    /// Generate a man page
    #[command(hide = true)]
    Man,
}

#[derive(Args, Debug)]
struct RestoreArgs {
    /// Seed phrase, a file holding it, or `-` for stdin
    #[arg(short, long, default_value = "-")]
    seed: String,

    /// Where to write the key (`-` for stdout, otherwise PATH and PATH.pub)
    #[arg(value_name = "PATH")]
    out: String,
}

fn main() -> Result<()> {
    // Before any key material is read
    let core_dumps_off = melt_core::memory::disable_core_dumps();

    let cli = Cli::from_arg_matches(&command().get_matches()).unwrap_or_else(|e| e.exit());

    if let Some(Command::Man) = cli.command {
        return print_man_page();
    }

    let mut config = MeltConfig::load(cli.config.as_deref()).context("Failed to load config")?;
    if let Some(lang) = &cli.language {
        config.language = lang.clone();
    }
    config
        .validate()
        .context("Configuration validation failed")?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.as_str()),
    )
    .init();

    if !core_dumps_off {
        log::warn!("core dumps could not be disabled");
    }

    run(
        cli.command,
        cli.key.as_deref(),
        &config.language,
        io::stdin().is_terminal(),
        Presenter::detect(),
    )
}

/// Resolve the wordlist, then back up or restore.
fn run(
    command: Option<Command>,
    key: Option<&str>,
    language: &str,
    stdin_is_terminal: bool,
    presenter: Presenter,
) -> Result<()> {
    // Resolved before touching any key so a bad value fails early.
    let wordlist = language::resolve(language)?;
    log::debug!("using {} wordlist", wordlist);

    match command {
        Some(Command::Restore(args)) => restore(&args, wordlist, stdin_is_terminal, presenter),
        Some(Command::Man) => Ok(()),
        None => backup(key.unwrap_or(""), wordlist, stdin_is_terminal, presenter),
    }
}

fn backup(
    path: &str,
    wordlist: WordlistTag,
    stdin_is_terminal: bool,
    presenter: Presenter,
) -> Result<()> {
    let mut source = KeySource::from_stdin(stdin_is_terminal);
    let negotiator = PassphraseNegotiator::new(TerminalReader::stderr());
    let phrase = BackupPipeline::new(&mut source, negotiator, wordlist).run(path)?;

    let output = Zeroizing::new(presenter.backup_output(phrase.as_str(), &program_name(), wordlist));
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(output.as_bytes())
        .and_then(|_| stdout.flush())
        .context("Failed to write seed phrase")?;
    Ok(())
}

fn restore(
    args: &RestoreArgs,
    wordlist: WordlistTag,
    stdin_is_terminal: bool,
    presenter: Presenter,
) -> Result<()> {
    let mut source = KeySource::from_stdin(stdin_is_terminal);
    let phrase = Zeroizing::new(source.read_phrase(&args.seed));
    let mut pipeline = RestorePipeline::new(
        PassphraseNegotiator::new(TerminalReader::stderr()),
        wordlist,
    );

    if args.out == "-" {
        eprintln!("Restoring key to STDOUT...");
        let mut sink = StreamSink::new(io::stdout().lock());
        pipeline.run(&phrase, &mut sink)?;
        return Ok(());
    }

    let mut sink = FilePairSink::new(&args.out);
    let private = sink.private_path().display().to_string();
    let public = sink.public_path().display().to_string();
    eprintln!("Restoring key to {private} and {public}...");

    let report = pipeline.run(&phrase, &mut sink)?;
    log::debug!(
        "restored {} key, encrypted: {}",
        report.algorithm,
        report.encrypted
    );
    print!("{}", presenter.restore_success(&private, &public));
    Ok(())
}

/// How the user invoked us, for the restore hint.
fn program_name() -> String {
    std::env::args().next().unwrap_or_else(|| "melt".to_string())
}

/// The derived command plus the list of supported languages in `--help`.
fn command() -> clap::Command {
    let mut languages = String::from("Languages:\n");
    for (tag, name) in language::supported_languages() {
        languages.push_str(&format!("  {tag:<8} {name}\n"));
    }
    Cli::command().after_long_help(format!("{languages}\n{EXAMPLES}"))
}

fn print_man_page() -> Result<()> {
    let man = clap_mangen::Man::new(command());
    let mut stdout = io::stdout().lock();
    man.render(&mut stdout).context("Failed to render man page")?;
    Ok(())
}
