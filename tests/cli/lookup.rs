use anyhow::Result;

use crate::{CliTest, SAMPLE_CATALOG, stderr, stdout};

fn generated() -> Result<CliTest> {
    let test = CliTest::with_file("i18n/app.json", SAMPLE_CATALOG)?;
    let output = test.generate_command().arg("--apply").output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    Ok(test)
}

#[test]
fn test_lookup_formats_template() -> Result<()> {
    let test = generated()?;

    let output = test
        .command()
        .args(["lookup", "SMP-001704", "C:", "--bundle", "com.sample.Texts", "--locale", "de-CH"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "Platte C: ist voll\n");

    Ok(())
}

#[test]
fn test_lookup_falls_back_to_default_language() -> Result<()> {
    let test = generated()?;

    let output = test
        .command()
        .args([
            "lookup",
            "com.sample.Example.TXT_Greeting",
            "--bundle",
            "com.sample.Texts",
            "--locale",
            "fr",
        ])
        .output()?;
    assert_eq!(stdout(&output), "Hello\n");

    Ok(())
}

#[test]
fn test_lookup_missing_key() -> Result<()> {
    let test = generated()?;

    let output = test
        .command()
        .args(["lookup", "ABSENT", "a", "2", "--bundle", "com.sample.Texts", "--locale", "en"])
        .output()?;
    assert!(output.status.success());
    assert_eq!(stdout(&output), "[ABSENT] \u{2013} [a, 2]\n");

    Ok(())
}

#[test]
fn test_lookup_missing_bundle() -> Result<()> {
    let test = CliTest::new()?;

    let output = test
        .command()
        .args(["lookup", "KEY", "--locale", "en"])
        .output()?;
    assert!(output.status.success());
    assert_eq!(stdout(&output), "[KEY] \u{2013} []\n");
    assert!(stderr(&output).contains("resource bundle not found"));

    Ok(())
}

#[test]
fn test_lookup_invalid_locale() -> Result<()> {
    let test = CliTest::new()?;

    let output = test
        .command()
        .args(["lookup", "KEY", "--locale", "not a locale"])
        .output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Invalid locale"));

    Ok(())
}
