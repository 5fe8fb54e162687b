use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, stdout};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;
    assert!(output.status.success());
    assert!(stdout(&output).contains("Created .keybundlerc.json"));

    let content = test.read_file(".keybundlerc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    for field in [
        "catalogs",
        "outputDir",
        "resourceRoots",
        "baseBundleName",
        "messagePrefix",
        "defaultLanguage",
    ] {
        assert!(parsed.get(field).is_some(), "Config should have '{}' field", field);
    }
    assert!(content.contains("  "), "Config should use 2-space indentation");

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".keybundlerc.json", "{}")?;

    let output = test.command().arg("init").output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains(".keybundlerc.json already exists"));
    assert_eq!(test.read_file(".keybundlerc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;
    test.command().arg("init").output()?;
    test.write_file("i18n/app.json", crate::SAMPLE_CATALOG)?;

    let output = test.check_command().output()?;
    assert!(
        output.status.success(),
        "Check command should work with initialized config. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    Ok(())
}
