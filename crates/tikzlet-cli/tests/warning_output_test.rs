//! Warnings of a conversion are reported once each.

use std::{fs, sync::Mutex};

use log::{Level, LevelFilter, Log, Metadata, Record};
use tempfile::tempdir;

use tikzlet_cli::{Args, run};

/// Keeps the level and target of every record.
struct RecordingLogger {
    records: Mutex<Vec<(Level, String)>>,
}

impl Log for RecordingLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        self.records
            .lock()
            .unwrap()
            .push((record.level(), record.target().to_string()));
    }

    fn flush(&self) {}
}

static LOGGER: RecordingLogger = RecordingLogger {
    records: Mutex::new(Vec::new()),
};

const SOURCE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<diagram program="umlet" version="15.1">
  <zoom_level>10</zoom_level>
  <element><id>UMLClass</id>
    <coordinates><x>0</x><y>0</y><w>100</w><h>60</h></coordinates>
    <panel_attributes>A</panel_attributes></element>
  <element><id>Relation</id>
    <coordinates><x>90</x><y>20</y><w>10</w><h>10</h></coordinates>
    <panel_attributes>lt=&lt;.&gt;</panel_attributes>
    <additional_attributes>0;10;300;10</additional_attributes></element>
</diagram>
"#;

#[test]
fn each_warning_is_logged_once() {
    log::set_logger(&LOGGER).expect("Failed to install logger");
    log::set_max_level(LevelFilter::Trace);

    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = temp_dir.path().join("detached.uxf");
    let output = temp_dir.path().join("detached.tex");
    fs::write(&input, SOURCE).expect("Failed to write input");

    let args = Args {
        input: input.to_string_lossy().to_string(),
        output: output.to_string_lossy().to_string(),
        config: None,
        log_level: "trace".to_string(),
    };
    run(&args).expect("Warnings must not fail the run");

    let records = LOGGER.records.lock().unwrap();
    let warnings: Vec<&String> = records
        .iter()
        .filter(|(level, _)| *level == Level::Warn)
        .map(|(_, target)| target)
        .collect();

    // One detached end and one unknown style.
    assert_eq!(warnings.len(), 2, "warnings logged: {warnings:?}");
    assert!(warnings.iter().all(|target| target.starts_with("tikzlet_cli")));
}
