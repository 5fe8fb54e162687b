use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, SAMPLE_CATALOG, stderr, stdout};

#[test]
fn test_generate_dry_run_writes_nothing() -> Result<()> {
    let test = CliTest::with_file("i18n/app.json", SAMPLE_CATALOG)?;

    let output = test.generate_command().output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "Would write 3 file(s):\n  \
         resources/com/sample/Texts.properties (2 keys)\n  \
         resources/com/sample/Texts_de.properties (2 keys)\n  \
         resources/com/sample/Texts_en.properties (2 keys)\n\
         Run with --apply to write these files.\n"
    );
    assert!(!test.root().join("resources").exists());

    Ok(())
}

#[test]
fn test_generate_apply_writes_bundles() -> Result<()> {
    let test = CliTest::with_file("i18n/app.json", SAMPLE_CATALOG)?;

    let output = test.generate_command().arg("--apply").output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Wrote 3 file(s)."));

    insta::assert_snapshot!(test.read_file("resources/com/sample/Texts_de.properties")?, @r"
    # Generated by keybundle from i18n/app.json. Do not edit.

    # Disk is full
    SMP-001704=Platte %s ist voll
    # Greeting
    com.sample.Example.TXT_Greeting=Hallo
    ");
    assert_eq!(
        test.read_file("resources/com/sample/Texts.properties")?,
        test.read_file("resources/com/sample/Texts_en.properties")?
    );

    Ok(())
}

#[test]
fn test_generate_is_deterministic() -> Result<()> {
    let test = CliTest::with_file("i18n/app.json", SAMPLE_CATALOG)?;

    test.generate_command().arg("--apply").output()?;
    let first = test.read_file("resources/com/sample/Texts_de.properties")?;
    test.generate_command().arg("--apply").output()?;
    let second = test.read_file("resources/com/sample/Texts_de.properties")?;
    assert_eq!(first, second);

    Ok(())
}

#[test]
fn test_generate_refuses_on_errors() -> Result<()> {
    let test = CliTest::with_file(
        "i18n/a.json",
        r#"{ "messages": [
            { "id": 1, "description": "one", "translations": [ { "language": "de", "text": "eins" } ] }
        ] }"#,
    )?;

    let output = test.generate_command().arg("--apply").output()?;
    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("missing-default"));
    assert!(out.contains("Not writing 2 file(s) because of 1 error(s)."));
    assert!(!test.root().join("resources").exists());

    Ok(())
}

#[test]
fn test_generate_honours_output_dir() -> Result<()> {
    let test = CliTest::with_file(".keybundlerc.json", r#"{ "outputDir": "gen" }"#)?;
    test.write_file(
        "i18n/app.json",
        r#"{ "messages": [
            { "id": "Hello", "description": "hi", "translations": [ { "language": "en", "text": "Hi" } ] }
        ] }"#,
    )?;

    let output = test.generate_command().arg("--apply").output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let content = test.read_file("gen/MessagesAndTexts.properties")?;
    assert!(content.contains("# hi\nMSG-Hello=Hi\n"));
    assert!(test.root().join("gen/MessagesAndTexts_en.properties").exists());

    Ok(())
}
