use super::*;
use super::sink::probe_duration;
use std::fs;
use std::path::Path;

#[test]
fn clamp_volume_keeps_values_in_range() {
    assert_eq!(clamp_volume(0.5), 0.5);
    assert_eq!(clamp_volume(-0.2), 0.0);
    assert_eq!(clamp_volume(1.7), 1.0);
    assert_eq!(clamp_volume(f32::NAN), 0.0);
}

#[test]
fn probe_duration_reports_missing_file_as_open_error() {
    let err = probe_duration(Path::new("/definitely/not/here.mp3")).unwrap_err();
    assert!(matches!(err, crate::error::AudioError::Open { .. }));
}

#[test]
fn probe_duration_reports_garbage_as_decode_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fake.mp3");
    fs::write(&path, b"not a real mp3").unwrap();

    let err = probe_duration(&path).unwrap_err();
    assert!(matches!(err, crate::error::AudioError::Decode { .. }));
}
