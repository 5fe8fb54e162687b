use anyhow::Result;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_key_message_numeric() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().args(["key", "message", "42"]).output()?;
    assert!(output.status.success());
    assert_eq!(stdout(&output), "MSG-000042\n");

    Ok(())
}

#[test]
fn test_key_message_prefix() -> Result<()> {
    let test = CliTest::with_file(".keybundlerc.json", r#"{ "messagePrefix": "CFG" }"#)?;

    let output = test.command().args(["key", "message", "Named"]).output()?;
    assert_eq!(stdout(&output), "CFG-Named\n");

    let output = test
        .command()
        .args(["key", "message", "1704", "--prefix", "ERR"])
        .output()?;
    assert_eq!(stdout(&output), "ERR-001704\n");

    Ok(())
}

#[test]
fn test_key_text() -> Result<()> {
    let test = CliTest::new()?;

    let output = test
        .command()
        .args(["key", "text", "com.sample.Example", "tooltip", "Property"])
        .output()?;
    assert!(output.status.success());
    assert_eq!(stdout(&output), "com.sample.Example.TOOLTIP_Property\n");

    Ok(())
}

#[test]
fn test_key_empty_argument_is_error() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().args(["key", "text", "", "TXT", "Id"]).output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("argument 'sourceClass' must not be empty"));

    Ok(())
}
