use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{
        CommandResult, check::check, generate::generate, init::init, key::key, lookup::lookup,
    },
};

pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Init) => init(),
        Some(Command::Check(cmd)) => check(cmd),
        Some(Command::Generate(cmd)) => generate(cmd),
        Some(Command::Key(cmd)) => key(cmd),
        Some(Command::Lookup(cmd)) => lookup(cmd),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
