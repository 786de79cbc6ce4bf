//! Tests for placeholder substitution.

use super::*;
use rstest::{fixture, rstest};

#[fixture]
fn bag() -> ParameterBag {
    [("id", "42"), ("name", "Ann")].into_iter().collect()
}

#[rstest]
#[case("/users/%id%", "/users/42")]
#[case("%name% #%id%", "Ann #42")]
#[case("/users/%missing%", "/users/%missing%")]
#[case("50% off", "50% off")]
#[case("100%%id%", "100%42")]
#[case("%%", "%%")]
#[case("no tokens", "no tokens")]
#[case("", "")]
fn replaces_known_tokens(bag: ParameterBag, #[case] input: &str, #[case] expected: &str) {
    assert_eq!(bag.replace(input), expected);
}

#[rstest]
fn later_values_win(mut bag: ParameterBag) {
    bag.set("id", "7");
    assert_eq!(bag.replace("%id%"), "7");
    assert_eq!(bag.remove("id").as_deref(), Some("7"));
    assert_eq!(bag.replace("%id%"), "%id%");
}

#[rstest]
fn references_substitute_through() {
    let bag: ParameterBag = [("x", "y")].into_iter().collect();
    let borrowed = &bag;
    assert_eq!(Substitutor::replace(&borrowed, "%x%"), "y");
    assert!(!bag.is_empty());
}
