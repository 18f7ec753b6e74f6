use wgts_core::s3_uri::S3Uri;

#[test]
fn parse_and_display() {
    let uri = S3Uri::parse("s3://bucket/a/b/").unwrap();
    assert_eq!(uri.bucket, "bucket");
    assert_eq!(uri.path, "a/b/");
    assert!(uri.is_dir());
    assert_eq!(uri.to_string(), "s3://bucket/a/b/");

    let bare = S3Uri::parse("s3://bucket").unwrap();
    assert_eq!(bare.path, "");
    assert_eq!(bare.to_string(), "s3://bucket");

    assert!(S3Uri::parse("https://bucket/a").is_none());
    assert!(S3Uri::parse("s3:///a").is_none());
}

#[test]
fn run_root_keeps_segments_through_run_id() {
    let root = S3Uri::run_root("b", "byob/analysis/run1/out/x.bam", "run1");
    assert_eq!(root.to_string(), "s3://b/byob/analysis/run1");

    let unmatched = S3Uri::run_root("b", "a/b/c.txt", "run1");
    assert_eq!(unmatched.to_string(), "s3://b/a/b/c.txt");
}

#[test]
fn join_drops_empty_segments() {
    let root = S3Uri::new("b", "run1/");
    assert_eq!(root.join("/out//file.bam").to_string(), "s3://b/run1/out/file.bam");
    assert_eq!(root.join("out/dir/").to_string(), "s3://b/run1/out/dir/");
    assert!(!root.join("out/file.bam").is_dir());
}

#[test]
fn relative_to_requires_strict_descendant() {
    let root = S3Uri::parse("s3://b/analyses/run1/").unwrap();

    let child = S3Uri::parse("s3://b/analyses/run1/oncoanalyser/2024/").unwrap();
    assert_eq!(child.relative_to(&root).as_deref(), Some("oncoanalyser/2024"));

    let same = S3Uri::parse("s3://b/analyses/run1").unwrap();
    assert_eq!(same.relative_to(&root), None);

    let sibling = S3Uri::parse("s3://b/analyses/run10/x").unwrap();
    assert_eq!(sibling.relative_to(&root), None);

    let other_bucket = S3Uri::parse("s3://c/analyses/run1/x").unwrap();
    assert_eq!(other_bucket.relative_to(&root), None);
}
