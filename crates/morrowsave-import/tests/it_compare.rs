mod support;

use std::fs;

use morrowsave_common::{Encoding, Tag};
use morrowsave_import::{compare_files, Difference, ImportOptions, Importer};

use support::*;

fn save_with_cell(fog: &[u8], water: f32) -> Vec<u8> {
    let fog = fog.to_vec();
    Ess::new("Seyda Neen")
        .record(b"CELL", move |w| {
            exterior_cell(w, -2, -9, 0x20);
            w.write_hn_f32(b"WHGT", water).unwrap();
            w.write_hn_bytes(b"NAM8", &fog).unwrap();
        })
        .finish()
}

#[test]
fn test_fog_is_ignored_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.ess");
    let second = dir.path().join("second.ess");
    fs::write(&first, save_with_cell(&[0x00; 16], 0.0)).unwrap();
    fs::write(&second, save_with_cell(&[0xff; 16], 0.0)).unwrap();

    let differences = compare_files(&first, &second, Encoding::Win1252).unwrap();
    assert!(differences.is_empty(), "{differences:?}");
}

#[test]
fn test_data_difference_reported() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.ess");
    let second = dir.path().join("second.ess");
    fs::write(&first, save_with_cell(&[0; 16], 0.0)).unwrap();
    fs::write(&second, save_with_cell(&[0; 16], -128.0)).unwrap();

    let differences = compare_files(&first, &second, Encoding::Win1252).unwrap();
    assert_eq!(differences.len(), 1);
    match &differences[0] {
        Difference::Data { record, sub, first, second, .. } => {
            assert_eq!(*record, Tag::new(b"CELL"));
            assert_eq!(*sub, Tag::new(b"WHGT"));
            assert_eq!(first, &0.0f32.to_le_bytes());
            assert_eq!(second, &(-128.0f32).to_le_bytes());
        }
        other => panic!("unexpected difference {other}"),
    }
}

#[test]
fn test_conversion_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("quiksave.ess");
    fs::write(&input, save_with_cell(&[0x0f; 16], 0.0)).unwrap();

    let importer = Importer::new(ImportOptions::default());
    let outputs = ["one.omwsave", "two.omwsave"].map(|name| dir.path().join(name));
    for output in &outputs {
        importer.run(&input, output).unwrap();
    }

    let differences = compare_files(&outputs[0], &outputs[1], Encoding::Win1252).unwrap();
    assert!(differences.is_empty(), "{differences:?}");
}

#[test]
fn test_run_refuses_foreign_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("quiksave.ess");
    let output = dir.path().join("quiksave.txt");
    fs::write(&input, save_with_cell(&[0; 16], 0.0)).unwrap();
    fs::write(&output, b"keep me").unwrap();

    let importer = Importer::new(ImportOptions::default());
    assert!(importer.run(&input, &output).is_err());
    assert_eq!(fs::read(&output).unwrap(), b"keep me");

    let output = dir.path().join("quiksave.omwsave");
    let summary = importer.run(&input, &output).unwrap();
    assert_eq!(summary.cells_written, 1);
    assert!(fs::metadata(&output).unwrap().len() > 0);
}
