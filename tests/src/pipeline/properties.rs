#![cfg(test)]
use geoset_common::GeoError;
use geoset_common::network::family::{AddressFamily, IgnoreOption};
use geoset_core::{Container, Entry};

const SAMPLE: [&str; 8] = [
    "10.0.0.0/24",
    "10.0.1.0/24",
    "10.0.0.0/25",
    "172.16.5.0/24",
    "172.16.0.0/12",
    "2001:db8::/48",
    "2001:db8:1::/48",
    "8.8.8.8",
];

fn finalized_text(order: &[&str]) -> Vec<String> {
    let mut entry = Entry::new("perm");
    for cidr in order {
        entry.insert(*cidr).unwrap();
    }
    entry.finalize();
    entry.to_text(IgnoreOption::None).unwrap()
}

#[test]
fn finalize_ignores_insertion_order() {
    let expected = finalized_text(&SAMPLE);

    for shift in 1..SAMPLE.len() {
        let mut rotated = SAMPLE;
        rotated.rotate_left(shift);
        assert_eq!(finalized_text(&rotated), expected, "rotation {shift}");
    }

    let mut reversed = SAMPLE;
    reversed.reverse();
    assert_eq!(finalized_text(&reversed), expected);
}

#[test]
fn finalize_twice_is_stable() {
    let mut entry = Entry::new("stable");
    for cidr in SAMPLE {
        entry.insert(cidr).unwrap();
    }
    entry.finalize();
    let once = entry.finalized(AddressFamily::V4);
    entry.finalize();
    assert_eq!(entry.finalized(AddressFamily::V4), once);
}

#[test]
fn text_round_trip_reproduces_set() {
    let mut entry = Entry::new("source");
    for cidr in SAMPLE {
        entry.insert(cidr).unwrap();
    }

    let mut copy = Entry::new("copy");
    for line in entry.to_text(IgnoreOption::None).unwrap() {
        copy.insert(&line).unwrap();
    }

    for family in AddressFamily::ALL {
        assert_eq!(entry.finalized(family), copy.finalized(family));
    }
}

#[test]
fn comment_only_line_is_a_skip_signal() {
    let mut entry = Entry::new("c");
    let err = entry.insert("  # just a comment").unwrap_err();
    assert_eq!(err, GeoError::CommentOrBlankLine);
    assert!(err.is_skippable());
    assert!(entry.is_empty());
}

#[test]
fn identity_is_case_and_whitespace_insensitive() {
    let container = Container::new();
    let mut entry = Entry::new(" Foo ");
    entry.insert("1.1.1.1").unwrap();
    container.add(entry, IgnoreOption::None).unwrap();

    assert!(container.get("FOO").is_some());
    assert!(container.get("  foo  ").is_some());
}

#[test]
fn ignore_v4_on_merge_keeps_target_v4() {
    let container = Container::new();
    let mut first = Entry::new("x");
    first.insert("2001:db8::/32").unwrap();
    first.insert("192.0.2.0/24").unwrap();
    container.add(first, IgnoreOption::None).unwrap();

    let mut second = Entry::new("X");
    second.insert("198.51.100.0/24").unwrap();
    container.add(second, IgnoreOption::IgnoreV4).unwrap();

    let stored = container.get("x").unwrap();
    assert_eq!(stored.to_text(IgnoreOption::IgnoreV6).unwrap(), vec!["192.0.2.0/24"]);
    assert!(stored.has_v6());
}
