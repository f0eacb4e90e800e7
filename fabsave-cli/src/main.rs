//! fabsave CLI - tee stdin into a fresh Markdown note
//!
//! Reads standard input line by line, echoes it to standard output and
//! writes it to `{date}-{stub}.md` under `FABRIC_OUTPUT_PATH`, optionally
//! behind a frontmatter block for note-taking tools.

use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, CommandFactory, Parser};
use clap_complete::Shell;
use fabsave_core::{load_env_file, save, SaveConfig, SaveRequest};
use tracing::{debug, error};

mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "fabsave",
    author,
    version,
    about = "Save piped output to a dated Markdown note while passing it through",
    long_about = "Tee standard input to standard output and to a new file named \
                  {date}-{stub}.md in FABRIC_OUTPUT_PATH. Existing files are never \
                  overwritten; a numeric suffix is added instead.\n\n\
                  Settings are read from ~/.config/fabric/.env, then the environment:\n  \
                  FABRIC_OUTPUT_PATH       directory to save into (required)\n  \
                  FABRIC_FRONTMATTER_TAGS  default tags for the frontmatter block\n  \
                  SAVE_DATE_FORMAT         strftime pattern for the prefix (default %Y-%m-%d, empty disables)"
)]
struct Cli {
    /// Stub used to name the file, also added as a tag
    stub: Option<String>,

    /// Add a frontmatter tag (repeatable)
    #[arg(short = 't', long = "tag", value_name = "TAG", action = ArgAction::Append)]
    tags: Vec<String>,

    /// Don't include FABRIC_FRONTMATTER_TAGS in the frontmatter
    #[arg(short = 'n', long)]
    nofabric: bool,

    /// Don't echo input to stdout
    #[arg(short = 's', long)]
    silent: bool,

    /// More log output (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,

    /// Less log output (repeatable)
    #[arg(short = 'q', long = "quiet", action = ArgAction::Count)]
    quiet: u8,

    /// Print a shell completion script and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    completions: Option<Shell>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    tracing_setup::init(&TracingConfig::from_flags(cli.verbose, cli.quiet)).ok();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    if let Some(shell) = cli.completions {
        return run_completions(shell);
    }

    // An empty stub counts as no stub
    let Some(stub) = cli.stub.filter(|stub| !stub.is_empty()) else {
        Cli::command()
            .print_help()
            .context("failed to print help")?;
        return Ok(());
    };

    load_env_file();
    let config = SaveConfig::from_env().context("failed to load save configuration")?;

    let request = SaveRequest {
        stub,
        tags: cli.tags,
        silent: cli.silent,
        include_default_tags: !cli.nofabric,
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut input = stdin.lock();
    let mut echo = stdout.lock();

    let outcome = save(&config, &request, &mut input, &mut echo)
        .with_context(|| format!("failed to save {:?}", request.stub))?;

    debug!(
        path = %outcome.path.display(),
        frontmatter = outcome.frontmatter,
        "done"
    );
    Ok(())
}

fn run_completions(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    clap_complete::generate(shell, &mut cmd, bin_name, &mut io::stdout());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "fabsave", "notes", "-t", "foo", "--tag", "bar", "-n", "-s", "-vv", "-q",
        ])
        .unwrap();

        assert_eq!(cli.stub.as_deref(), Some("notes"));
        assert_eq!(cli.tags, vec!["foo", "bar"]);
        assert!(cli.nofabric);
        assert!(cli.silent);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.quiet, 1);
    }

    #[test]
    fn test_stub_kept_verbatim() {
        let cli = Cli::try_parse_from(["fabsave", " my notes "]).unwrap();
        assert_eq!(cli.stub.as_deref(), Some(" my notes "));
    }

    #[test]
    fn test_stub_is_optional() {
        let cli = Cli::try_parse_from(["fabsave"]).unwrap();
        assert_eq!(cli.stub, None);
        assert!(cli.tags.is_empty());
    }
}
