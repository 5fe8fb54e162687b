//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `init`: Write a default `.keybundlerc.json`
//! - `check`: Validate catalogs and the generated bundle files
//! - `generate`: Turn catalogs into `.properties` bundles
//! - `key`: Print composed message or text keys
//! - `lookup`: Resolve a key against the bundles on disk

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::keys::TextUse;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Check(cmd)) => cmd.common.verbose,
            Some(Command::Generate(cmd)) => cmd.common.verbose,
            Some(Command::Lookup(cmd)) => cmd.common.verbose,
            Some(Command::Key(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Project directory (default: current directory)
    #[arg(long)]
    pub path: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct GenerateCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Actually write the bundle files (default is dry-run)
    #[arg(long)]
    pub apply: bool,
}

#[derive(Debug, Args)]
pub struct KeyCommand {
    #[command(subcommand)]
    pub kind: KeyKind,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum KeyKind {
    /// Compose a message key: <prefix>-<id>, numeric ids padded to six digits
    Message {
        /// Message id, a name or a number
        id: String,

        /// Message prefix (overrides config file)
        #[arg(long)]
        prefix: Option<String>,
    },
    /// Compose a text key: <class>.<USE>_<id>
    Text {
        /// Fully qualified name of the class owning the text
        class: String,

        /// How the text is used
        #[arg(value_enum, ignore_case = true, value_name = "USE")]
        text_use: TextUse,

        /// Text id
        id: String,
    },
}

#[derive(Debug, Args)]
pub struct LookupCommand {
    /// Key to resolve
    pub key: String,

    /// Template arguments; integers and decimals are passed as numbers
    pub args: Vec<String>,

    /// Base bundle name (overrides config file)
    #[arg(long)]
    pub bundle: Option<String>,

    /// Locale to resolve for, e.g. de-CH (default: system locale)
    #[arg(long)]
    pub locale: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Initialize a new .keybundlerc.json configuration file
    Init,
    /// Check catalogs for duplicate keys, missing and untranslated texts
    Check(CheckCommand),
    /// Generate .properties bundles from catalogs
    Generate(GenerateCommand),
    /// Print a composed message or text key
    Key(KeyCommand),
    /// Resolve a key against the generated bundles
    Lookup(LookupCommand),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        Arguments::command().debug_assert();
    }

    #[test]
    fn parse_key_text_ignores_case() {
        let args =
            Arguments::try_parse_from(["keybundle", "key", "text", "a.B", "tooltip", "Id"]).unwrap();
        let Some(Command::Key(KeyCommand {
            kind: KeyKind::Text { text_use, .. },
            ..
        })) = args.command
        else {
            panic!("expected key text");
        };
        assert_eq!(text_use, TextUse::Tooltip);
    }

    #[test]
    fn parse_lookup_args() {
        let args = Arguments::try_parse_from([
            "keybundle", "lookup", "MSG-000001", "C:", "3", "--locale", "de", "-v",
        ])
        .unwrap();
        assert!(args.verbose());
        let Some(Command::Lookup(cmd)) = args.command else {
            panic!("expected lookup");
        };
        assert_eq!(cmd.args, vec!["C:", "3"]);
        assert_eq!(cmd.locale.as_deref(), Some("de"));
    }
}
