use super::*;

#[test]
fn username_defaults_to_local_part() {
    assert_eq!(username_from_email("julia@child.com"), "julia");
    assert_eq!(username_from_email("plain"), "plain");
}

#[test]
fn blank_local_part_falls_back() {
    assert_eq!(username_from_email("@child.com"), "cook");
    assert_eq!(username_from_email(" @child.com"), "cook");
}
