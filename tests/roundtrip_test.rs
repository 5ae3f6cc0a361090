//! Parser round-trip and canonical-form tests

use abshape::parse_ids;
use rstest::rstest;

#[rstest]
#[case("⿰氵工", "⿰[氵][工]")]
#[case("⿳亠口川", "⿳[亠][口][川]")]
#[case("⿻工", "⿻[工]")]
#[case("⿾匕", "⿾[匕]")]
#[case("逢(夆)", "[逢(夆)]")]
#[case("⿺辶⿱夂丰", "⿺[辶]⿱[夂][丰]")]
#[case("⿴囗⿱一一", "⿴[囗]⿱[一][一]")]
fn given_raw_ids_when_parsing_then_canonical_form(#[case] raw: &str, #[case] canonical: &str) {
    let node = parse_ids(raw).unwrap();
    assert_eq!(node.to_string(), canonical);
}

#[rstest]
#[case("⿰[氵][工]")]
#[case("⿳[亠][口][川]")]
#[case("[逢(夆)]")]
#[case("⿱⿰[十][八]⿰⿰[十][八]⿰[十][八]")]
#[case("⿿[丩]")]
fn given_canonical_form_when_reparsing_then_identity(#[case] serialized: &str) {
    let node = parse_ids(serialized).unwrap();
    assert_eq!(node.to_string(), serialized);

    // A second pass stays fixed, and the trees are structurally equal.
    let reparsed = parse_ids(&node.to_string()).unwrap();
    assert_eq!(reparsed, node);
}

#[test]
fn given_deeply_nested_expression_when_round_tripping_then_stable() {
    let raw = "⿱⿰氵⿱夂丰⿲彳⿱亠口亍";
    let node = parse_ids(raw).unwrap();
    let serialized = node.to_string();
    let reparsed = parse_ids(&serialized).unwrap();
    assert_eq!(reparsed.to_string(), serialized);
    assert_eq!(reparsed, node);
    assert_eq!(node.count(), reparsed.count());
}
