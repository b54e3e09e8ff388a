use std::io;
use std::path::PathBuf;

use changeme::assets::{AssetStep, Platform};
use changeme::error::Error;

#[test]
fn test_io_error_carries_path() {
    let err = Error::io("/work/README.md", io::Error::new(io::ErrorKind::NotFound, "gone"));
    match &err {
        Error::IoError { path, .. } => assert_eq!(path, &PathBuf::from("/work/README.md")),
        _ => panic!("Expected IoError variant"),
    }
    assert_eq!(err.to_string(), "IO error at '/work/README.md': gone.");
}

#[test]
fn test_error_display() {
    let err = Error::ConfigResolutionError("missing primary email (PMAIL)".to_string());
    assert_eq!(
        err.to_string(),
        "Configuration resolution error: missing primary email (PMAIL)."
    );

    let err = Error::AmbiguousBundleMatch {
        platform: Platform::Linux,
        pattern: "resources/linux/*.AppDir".to_string(),
        matches: vec![PathBuf::from("a.AppDir"), PathBuf::from("b.AppDir")],
    };
    assert_eq!(
        err.to_string(),
        "Expected exactly one Linux bundle matching 'resources/linux/*.AppDir', found 2."
    );
}

#[test]
fn test_asset_step_error_names_step() {
    let err = Error::AssetStepError {
        step: AssetStep::ExportIcns,
        source: Box::new(Error::RenameFailed { count: 1 }),
    };
    assert!(err.to_string().starts_with("Asset pipeline failed at step 'export icns'"));
}
