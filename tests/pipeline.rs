use crowdle_guesses::processor::{Processor, ProcessorConfig};
use crowdle_guesses::vocabulary::TargetPolicy;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_inputs(dir: &Path, wordlist: &str, targets: &str) -> ProcessorConfig {
    let wordlist_path = dir.join("wordlist.txt");
    let targets_path = dir.join("crowdle-possible-targets.jsonld");
    fs::write(&wordlist_path, wordlist).unwrap();
    fs::write(&targets_path, targets).unwrap();

    ProcessorConfig {
        wordlist: wordlist_path,
        targets: targets_path,
        output_dir: dir.join("out"),
        quiet: true,
        ..ProcessorConfig::default()
    }
}

fn read_bucket(dir: &Path, length: usize) -> String {
    fs::read_to_string(dir.join("out").join(format!("allowed-{}.txt", length))).unwrap()
}

#[test]
fn test_reference_example() {
    let dir = TempDir::new().unwrap();
    let config = write_inputs(
        dir.path(),
        "APPEL\nijsvrij\n\n",
        r#"{"answer": ["APPEL", "ZEBRA"]}"#,
    );

    let outcome = Processor::new(config).run().unwrap();

    let mut words: Vec<_> = outcome.vocabulary.iter().collect();
    words.sort_unstable();
    assert_eq!(words, vec!["APPEL", "ZEBRA", "ĲSVRĲ"]);

    assert_eq!(outcome.merge.missing.len(), 1);
    assert_eq!(outcome.merge.missing[0].to_string(), "CROW's ZEBRA not in OpenTaal");

    // Both IJs fold, so IJSVRIJ is five letters
    assert_eq!(read_bucket(dir.path(), 5), "APPEL\nZEBRA\nĲSVRĲ\n");
    assert_eq!(read_bucket(dir.path(), 6), "");
    assert_eq!(read_bucket(dir.path(), 7), "");
    assert_eq!(read_bucket(dir.path(), 8), "");
}

#[test]
fn test_buckets_and_omitted_lengths() {
    let dir = TempDir::new().unwrap();
    let config = write_inputs(
        dir.path(),
        "kaas\nbanaan\nbanaan\nAPPEL\nfiets\n4x4\nappelboom\nijsbeer\naardbei\nzeppelin\n",
        r#"{"@context": "https://schema.org", "answer": ["FIETS"]}"#,
    );

    let outcome = Processor::new(config).run().unwrap();
    let partition = outcome.partition.unwrap();

    assert_eq!(read_bucket(dir.path(), 5), "APPEL\nFIETS\n");
    assert_eq!(read_bucket(dir.path(), 6), "BANAAN\nĲSBEER\n");
    assert_eq!(read_bucket(dir.path(), 7), "AARDBEI\n");
    assert_eq!(read_bucket(dir.path(), 8), "ZEPPELIN\n");

    // KAAS and APPELBOOM
    assert_eq!(partition.omitted, 2);
    assert_eq!(partition.written() + partition.omitted, outcome.vocabulary.len() as u64);
    assert!(outcome.merge.missing.is_empty());

    let stats = outcome.stats;
    assert_eq!(stats.primary.lines, 10);
    assert_eq!(stats.primary.rejected, 1);
    assert_eq!(stats.primary.duplicates, 1);
}

#[test]
fn test_custom_lengths_and_prefix() {
    let dir = TempDir::new().unwrap();
    let mut config = write_inputs(dir.path(), "kaas\nappel\n", r#"{"answer": []}"#);
    config.lengths = vec![4];
    config.prefix = "guesses".to_string();

    Processor::new(config).run().unwrap();

    let out = dir.path().join("out");
    assert_eq!(fs::read_to_string(out.join("guesses-4.txt")).unwrap(), "KAAS\n");
    assert!(!out.join("guesses-5.txt").exists());
    assert!(!out.join("allowed-4.txt").exists());
}

#[test]
fn test_trust_policy_keeps_targets_verbatim() {
    let dir = TempDir::new().unwrap();
    let mut config = write_inputs(dir.path(), "ijzer\n", r#"{"answer": ["IJZER"]}"#);
    config.target_policy = TargetPolicy::Trust;

    let outcome = Processor::new(config).run().unwrap();

    assert_eq!(outcome.merge.missing.len(), 1);
    assert_eq!(read_bucket(dir.path(), 5), "IJZER\n");
    assert_eq!(outcome.partition.unwrap().omitted, 1);
}

#[test]
fn test_dry_run_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let mut config = write_inputs(dir.path(), "appel\n", r#"{"answer": ["ZEBRA"]}"#);
    config.dry_run = true;

    let outcome = Processor::new(config).run().unwrap();

    assert!(outcome.partition.is_none());
    assert_eq!(outcome.vocabulary.len(), 2);
    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_rerun_truncates_outputs() {
    let dir = TempDir::new().unwrap();
    let config = write_inputs(dir.path(), "appel\nperen\n", r#"{"answer": []}"#);
    Processor::new(config.clone()).run().unwrap();

    fs::write(&config.wordlist, "appel\n").unwrap();
    Processor::new(config).run().unwrap();

    assert_eq!(read_bucket(dir.path(), 5), "APPEL\n");
}

#[test]
fn test_missing_wordlist_is_fatal() {
    let dir = TempDir::new().unwrap();
    let mut config = write_inputs(dir.path(), "appel\n", r#"{"answer": []}"#);
    config.wordlist = dir.path().join("missing.txt");

    assert!(Processor::new(config).run().is_err());
    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_malformed_targets_are_fatal() {
    let dir = TempDir::new().unwrap();
    let config = write_inputs(dir.path(), "appel\n", r#"{"answer": "APPEL"}"#);

    let err = Processor::new(config).run().unwrap_err();
    assert!(err.to_string().contains("malformed target list"));
}

#[test]
fn test_unwritable_output_is_fatal() {
    let dir = TempDir::new().unwrap();
    let config = write_inputs(dir.path(), "appel\nbanaan\n", r#"{"answer": []}"#);
    // A directory where a bucket file should go cannot be opened for writing
    fs::create_dir_all(dir.path().join("out").join("allowed-6.txt")).unwrap();

    let err = Processor::new(config).run().unwrap_err();
    assert!(format!("{:#}", err).contains("cannot create output file"));
}

#[test]
fn test_legacy_bytes_after_ascii_prefix_are_kept() {
    let dir = TempDir::new().unwrap();
    let mut wordlist = "appel\n".repeat(20_000).into_bytes();
    // "cafés" in windows-1252, past the encoding sample
    wordlist.extend_from_slice(b"caf\xe9s\n");
    let config = write_inputs(dir.path(), "", r#"{"answer": []}"#);
    fs::write(&config.wordlist, &wordlist).unwrap();

    let outcome = Processor::new(config).run().unwrap();

    assert!(outcome.vocabulary.contains("CAFÉS"));
    assert_eq!(read_bucket(dir.path(), 5), "APPEL\nCAFÉS\n");
}
