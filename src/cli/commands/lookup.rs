use std::path::PathBuf;

use anyhow::{Context, Result};
use unic_langid::LanguageIdentifier;

use super::{
    CommandResult, CommandSummary,
    helper::{Project, finish},
};
use crate::{
    cli::args::LookupCommand,
    format::Arg,
    loader::{BundleLoader, RESOURCE_PATH_ENV, parse_locale},
    resolve::{create_fallback, retrieve_text},
};

pub fn lookup(cmd: LookupCommand) -> Result<CommandResult> {
    let project = Project::open(&cmd.common)?;
    let config = &project.config;

    let locale = match &cmd.locale {
        Some(tag) => Some(
            parse_locale(tag).with_context(|| format!("Invalid locale: \"{}\"", tag))?,
        ),
        None => sys_locale::get_locale().and_then(|tag| parse_locale(&tag)),
    };
    let fallback: Option<LanguageIdentifier> = parse_locale(&config.default_language);

    let roots: Vec<PathBuf> = match std::env::var_os(RESOURCE_PATH_ENV) {
        Some(paths) => std::env::split_paths(&paths).collect(),
        None => config
            .resource_roots
            .iter()
            .map(|root| project.resolve(root))
            .collect(),
    };

    let loader = BundleLoader::new(roots)
        .with_locale(locale)
        .with_fallback_language(fallback);
    let base_name = cmd.bundle.as_deref().unwrap_or(&config.base_bundle_name);
    let bundle = loader.load(base_name)?;

    let args: Vec<Arg> = cmd.args.iter().map(|value| parse_arg(value)).collect();
    let text = match &bundle {
        Some(bundle) => retrieve_text(bundle, &cmd.key, Some(args.as_slice()))?,
        None => {
            tracing::warn!(bundle = base_name, "resource bundle not found");
            create_fallback(&cmd.key, Some(args.as_slice()))?
        }
    };

    Ok(finish(CommandSummary::Output(text), Vec::new()))
}

/// Command-line values that look like numbers are passed as numbers so
/// that `%d` and `%f` conversions accept them.
fn parse_arg(value: &str) -> Arg {
    if let Ok(number) = value.parse::<i64>() {
        Arg::Int(number)
    } else if value.contains('.')
        && let Ok(number) = value.parse::<f64>()
    {
        Arg::Float(number)
    } else {
        Arg::from(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_arg() {
        assert!(matches!(parse_arg("42"), Arg::Int(42)));
        assert!(matches!(parse_arg("1.5"), Arg::Float(_)));
        assert!(matches!(parse_arg("C:"), Arg::Str(_)));
        assert!(matches!(parse_arg("1e5"), Arg::Str(_)));
    }
}
