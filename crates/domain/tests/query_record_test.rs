use holeflux_domain::query_record::canonical_destination;
use holeflux_domain::QueryBatch;

mod helpers;
use helpers::QueryRecordBuilder;

#[test]
fn test_destination_port_suffix_stripped() {
    assert_eq!(canonical_destination("9.9.9.9#53"), "9.9.9.9");
    assert_eq!(canonical_destination("localhost#5335"), "localhost");
}

#[test]
fn test_destination_name_ip_pair_stripped() {
    assert_eq!(canonical_destination("dns.quad9.net|9.9.9.9"), "dns.quad9.net");
}

#[test]
fn test_destination_without_separator_untouched() {
    assert_eq!(canonical_destination("1.1.1.1"), "1.1.1.1");
}

#[test]
fn test_record_canonical_destination() {
    let forwarded = QueryRecordBuilder::new().destination("8.8.8.8#53").build();
    let local = QueryRecordBuilder::new().build();
    let empty = QueryRecordBuilder::new().destination("#53").build();

    assert_eq!(forwarded.canonical_destination(), Some("8.8.8.8"));
    assert_eq!(local.canonical_destination(), None);
    assert_eq!(empty.canonical_destination(), None);
}

#[test]
fn test_batch_len() {
    let batch = QueryBatch::new(vec![
        QueryRecordBuilder::new().build(),
        QueryRecordBuilder::new().build(),
    ]);
    assert_eq!(batch.len(), 2);
    assert_eq!(batch.malformed, 0);
    assert!(QueryBatch::default().is_empty());
}
