//! Tests for checksum index construction.

use crate::container::MemoryContainer;

use super::{build_index, IndexError, SOURCE_FILE_PREFIX, SOURCE_STREAM_HEADER_LEN};

/// A well-formed source-record stream: fixed header bytes then the digest.
fn record(hash: &[u8]) -> Vec<u8> {
    let mut v = vec![0u8; SOURCE_STREAM_HEADER_LEN];
    v.extend_from_slice(hash);
    v
}

fn src_name(path: &str) -> String {
    format!("{}{}", SOURCE_FILE_PREFIX, path)
}

#[test]
fn only_prefixed_records_are_indexed() {
    let mut c = MemoryContainer::new();
    c.add_stream("/names", b"not a source record".to_vec());
    c.add_stream(&src_name("a.cs"), record(&[1u8; 16]));
    c.add_stream("/LinkInfo", vec![0u8; 4]);
    c.add_stream("srcsrv", vec![0u8; 200]);

    let index = build_index(&c).unwrap();
    assert_eq!(index.len(), 1);
    let entry = index.get("a.cs").unwrap();
    assert_eq!(entry.path, "a.cs");
    assert_eq!(entry.hash, vec![1u8; 16]);
}

#[test]
fn hash_is_the_stream_tail() {
    let mut c = MemoryContainer::new();
    let sha1 = (0u8..20).collect::<Vec<_>>();
    c.add_stream(&src_name("dir/b.cs"), record(&sha1));

    let index = build_index(&c).unwrap();
    assert_eq!(index.get("dir/b.cs").unwrap().hash, sha1);
}

#[test]
fn header_only_stream_yields_empty_hash() {
    let mut c = MemoryContainer::new();
    c.add_stream(&src_name("empty.cs"), vec![0u8; SOURCE_STREAM_HEADER_LEN]);

    // Builder accepts it; the verifier rejects the zero-length digest.
    let index = build_index(&c).unwrap();
    assert!(index.get("empty.cs").unwrap().hash.is_empty());
}

#[test]
fn short_stream_aborts_the_scan() {
    let mut c = MemoryContainer::new();
    c.add_stream(&src_name("ok.cs"), record(&[2u8; 16]));
    c.add_stream(&src_name("bad.cs"), vec![0u8; 40]);

    let err = build_index(&c).unwrap_err();
    match err {
        IndexError::RecordTooShort { name, len } => {
            assert_eq!(name, src_name("bad.cs"));
            assert_eq!(len, 40);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn duplicate_paths_collapse_case_insensitively_last_wins() {
    let mut c = MemoryContainer::new();
    c.add_stream(&src_name("Foo/Bar.cs"), record(&[1u8; 16]));
    c.add_stream(&src_name("foo/bar.cs"), record(&[2u8; 16]));

    let index = build_index(&c).unwrap();
    assert_eq!(index.len(), 1);
    let entry = index.get("FOO/BAR.CS").unwrap();
    assert_eq!(entry.path, "foo/bar.cs");
    assert_eq!(entry.hash, vec![2u8; 16]);
}

#[test]
fn iteration_order_is_deterministic() {
    let mut c = MemoryContainer::new();
    c.add_stream(&src_name("z.cs"), record(&[1u8; 16]));
    c.add_stream(&src_name("A.cs"), record(&[2u8; 16]));
    c.add_stream(&src_name("m.cs"), record(&[3u8; 16]));

    let index = build_index(&c).unwrap();
    let paths: Vec<_> = index.iter().map(|e| e.path.as_str()).collect();
    assert_eq!(paths, vec!["A.cs", "m.cs", "z.cs"]);
}

#[test]
fn empty_container_builds_empty_index() {
    let c = MemoryContainer::new();
    let index = build_index(&c).unwrap();
    assert!(index.is_empty());
}

#[test]
fn missing_stream_surfaces_container_error() {
    // A name-table entry pointing at a stream the container cannot produce.
    struct Broken {
        names: Vec<(String, u32)>,
    }
    impl crate::container::SymbolContainer for Broken {
        fn name_table(&self) -> &[(String, u32)] {
            &self.names
        }
        fn read_stream(&self, index: u32) -> anyhow::Result<Vec<u8>> {
            anyhow::bail!("no stream at index {index}")
        }
    }

    let broken = Broken {
        names: vec![(src_name("gone.cs"), 9)],
    };
    let err = build_index(&broken).unwrap_err();
    assert!(matches!(err, IndexError::Stream { index: 9, .. }));
}
