use anyhow::Result;

use crate::{CliTest, SAMPLE_CATALOG, stderr, stdout};

#[test]
fn test_check_clean_catalog() -> Result<()> {
    let test = CliTest::with_file("i18n/app.json", SAMPLE_CATALOG)?;

    let output = test.check_command().output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "\u{2713} Checked 1 catalog, 2 keys - no issues found\n"
    );

    Ok(())
}

#[test]
fn test_check_without_catalogs() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.check_command().output()?;
    assert!(output.status.success());
    assert!(stdout(&output).contains("Checked 0 catalogs, 0 keys"));

    Ok(())
}

#[test]
fn test_check_reports_errors_and_warnings() -> Result<()> {
    let test = CliTest::with_file(
        "i18n/a.json",
        r#"{ "messages": [
            { "id": 1, "description": "one", "translations": [
                { "language": "en", "text": "one" }, { "language": "de", "text": "eins" } ] },
            { "id": 2, "description": "two", "translations": [
                { "language": "en", "text": "two" } ] }
        ] }"#,
    )?;
    test.write_file(
        "i18n/b.json",
        r#"{ "messages": [
            { "id": 1, "description": "again", "translations": [
                { "language": "en", "text": "again" }, { "language": "de", "text": "wieder" } ] }
        ] }"#,
    )?;

    let output = test.check_command().output()?;
    let out = stdout(&output);
    assert_eq!(output.status.code(), Some(1), "stdout: {}", out);
    assert!(out.contains("error: \"MSG-000001\"  duplicate-key"));
    assert!(out.contains("  --> i18n/b.json"));
    assert!(out.contains("= note: already defined in i18n/a.json"));
    assert!(out.contains("warning: \"MSG-000002\"  untranslated"));
    assert!(out.contains("= note: missing in: de"));
    assert!(out.contains("2 problems (1 error, 1 warning)"));

    Ok(())
}

#[test]
fn test_check_warnings_only_succeeds() -> Result<()> {
    let test = CliTest::with_file(
        "i18n/a.json",
        r#"{ "messages": [
            { "id": 1, "description": "one", "translations": [
                { "language": "en", "text": "one" }, { "language": "de", "text": "eins" } ] },
            { "id": 2, "description": "two", "translations": [
                { "language": "en", "text": "two" } ] }
        ] }"#,
    )?;

    let output = test.check_command().output()?;
    assert!(output.status.success());
    assert!(stdout(&output).contains("1 problems (0 errors, 1 warning)"));

    Ok(())
}

#[test]
fn test_check_missing_default_language() -> Result<()> {
    let test = CliTest::with_file(
        "i18n/a.json",
        r#"{ "messages": [
            { "id": "Only", "description": "german only", "translations": [
                { "language": "de", "text": "nur deutsch" } ] }
        ] }"#,
    )?;

    let output = test.check_command().output()?;
    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("error: \"MSG-Only\"  missing-default"));
    assert!(out.contains("= hint: add { \"language\": \"en\""));

    Ok(())
}

#[test]
fn test_check_parse_error() -> Result<()> {
    let test = CliTest::with_file("i18n/broken.json", "{ not json")?;

    let output = test.check_command().output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("1 catalog(s) could not be loaded"));

    let output = test.check_command().arg("-v").output()?;
    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("parse-error"));
    assert!(out.contains("--> i18n/broken.json"));

    Ok(())
}

#[test]
fn test_check_orphan_bundle() -> Result<()> {
    let test = CliTest::with_file("i18n/app.json", SAMPLE_CATALOG)?;
    test.write_file("resources/com/sample/Texts_fr.properties", "a=b\n")?;

    let output = test.check_command().output()?;
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("warning: \"fr\"  orphan-bundle"));
    assert!(out.contains("--> resources/com/sample/Texts_fr.properties"));

    Ok(())
}

#[test]
fn test_check_uses_config_patterns() -> Result<()> {
    let test = CliTest::with_file(".keybundlerc.json", r#"{ "catalogs": ["texts/*.json"] }"#)?;
    test.write_file("texts/app.json", SAMPLE_CATALOG)?;
    test.write_file("i18n/ignored.json", "{ not json")?;

    let output = test.check_command().output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Checked 1 catalog"));

    Ok(())
}

#[test]
fn test_check_invalid_config_is_internal_error() -> Result<()> {
    let test = CliTest::with_file(".keybundlerc.json", r#"{ "catalogs": ["[invalid"] }"#)?;

    let output = test.check_command().output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Invalid glob pattern in 'catalogs'"));

    Ok(())
}
