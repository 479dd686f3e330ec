use logmine::{ClusterError, ClusterOpts};
use std::io::Write;

#[test]
fn defaults() {
    let opts = ClusterOpts::default();
    assert_eq!(opts.max_distance, 0.5);
    assert_eq!(opts.min_members, 1);
    assert_eq!(opts.wildcard, "<*>");
    assert!(!opts.mask_variables);
    assert!(opts.validate().is_ok());
}

#[test]
fn partial_toml_keeps_other_defaults() {
    let opts = ClusterOpts::from_toml_str("max_distance = 0.3\nmin_members = 2\n").unwrap();
    assert_eq!(opts.max_distance, 0.3);
    assert_eq!(opts.min_members, 2);
    assert_eq!(opts.delimiters, ClusterOpts::default().delimiters);
}

#[test]
fn unknown_keys_are_rejected() {
    let err = ClusterOpts::from_toml_str("max_wildcard_ratio = 0.5").unwrap_err();
    assert!(matches!(err, ClusterError::ConfigParse(_)));
}

#[test]
fn out_of_range_threshold_is_rejected() {
    let err = ClusterOpts::from_toml_str("max_distance = 2.0").unwrap_err();
    assert!(matches!(err, ClusterError::InvalidThreshold(d) if d == 2.0));
}

#[test]
fn empty_markers_are_rejected() {
    let err = ClusterOpts::from_toml_str("wildcard = \"\"").unwrap_err();
    assert!(matches!(err, ClusterError::InvalidConfig(_)));
    let err = ClusterOpts::from_toml_str("delimiters = \"\"").unwrap_err();
    assert!(matches!(err, ClusterError::InvalidConfig(_)));
}

#[test]
fn load_from_file() {
    let path = std::env::temp_dir().join(format!("logmine-config-{}.toml", std::process::id()));
    {
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "mask_variables = true").unwrap();
        writeln!(f, "delimiters = \" ,\"").unwrap();
    }
    let opts = ClusterOpts::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert!(opts.mask_variables);
    assert_eq!(opts.delimiters, " ,");
}

#[test]
fn missing_file_reports_path() {
    let err = ClusterOpts::load("/nonexistent/logmine.toml").unwrap_err();
    assert!(matches!(err, ClusterError::Io { .. }));
    assert!(err.to_string().contains("/nonexistent/logmine.toml"));
}
