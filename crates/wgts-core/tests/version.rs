use wgts_core::version::WorkflowVersion;

fn v(s: &str) -> WorkflowVersion {
    WorkflowVersion::parse(s).unwrap()
}

#[test]
fn parses_plain_and_prefixed_versions() {
    assert_eq!(v("2.1.0"), WorkflowVersion::new(2, 1, 0));
    assert_eq!(v("v2.2.0"), WorkflowVersion::new(2, 2, 0));
    assert_eq!(v("1.0.0+build.7"), WorkflowVersion::new(1, 0, 0));

    let pre = v("2.2.0-rc.1");
    assert_eq!(pre.pre.as_deref(), Some("rc.1"));
    assert_eq!(pre.to_string(), "2.2.0-rc.1");
}

#[test]
fn rejects_malformed_versions() {
    for bad in ["", "2.1", "2.1.0.0", "02.1.0", "2.x.0", "2.1.0-", "2.1.0+", "latest", "2.1.0-rc..1"] {
        assert!(WorkflowVersion::parse(bad).is_err(), "{bad} should not parse");
    }
}

#[test]
fn orders_numerically() {
    assert!(v("2.1.0") < v("2.2.0"));
    assert!(v("2.10.0") > v("2.9.9"));
    assert!(v("3.0.0") > v("2.99.99"));
    assert_eq!(v("1.2.3+a").cmp(&v("1.2.3+b")), std::cmp::Ordering::Equal);
}

#[test]
fn pre_release_orders_before_release() {
    assert!(v("2.2.0-rc.1") < v("2.2.0"));
    assert!(v("2.2.0-rc.1") > v("2.1.9"));
    assert!(v("2.2.0-alpha") < v("2.2.0-beta"));
    assert!(v("2.2.0-rc.2") < v("2.2.0-rc.10"));
    assert!(v("2.2.0-1") < v("2.2.0-alpha"));
    assert!(v("2.2.0-rc") < v("2.2.0-rc.1"));
}

#[test]
fn from_str_matches_parse() {
    let parsed: WorkflowVersion = "v1.4.2".parse().unwrap();
    assert_eq!(parsed, v("1.4.2"));
}
