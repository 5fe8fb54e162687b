use anyhow::Result;

use super::{
    CommandResult, CommandSummary,
    helper::{Project, finish},
};
use crate::{
    cli::args::{KeyCommand, KeyKind},
    keys::{MessageId, compose_message_key, compose_text_key},
};

pub fn key(cmd: KeyCommand) -> Result<CommandResult> {
    let key = match &cmd.kind {
        KeyKind::Message { id, prefix } => {
            let prefix = match prefix {
                Some(prefix) => prefix.clone(),
                None => Project::open(&cmd.common)?.config.message_prefix,
            };
            compose_message_key(&prefix, parse_message_id(id))?
        }
        KeyKind::Text {
            class,
            text_use,
            id,
        } => compose_text_key(class, *text_use, id)?,
    };

    Ok(finish(CommandSummary::Output(key), Vec::new()))
}

/// Numeric ids are padded, everything else is used as a name.
fn parse_message_id(id: &str) -> MessageId<'_> {
    match id.parse::<i64>() {
        Ok(number) => MessageId::Number(number),
        Err(_) => MessageId::Name(id),
    }
}
