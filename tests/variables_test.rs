use changeme::error::Error;
use changeme::variables::{ExternalValues, VariableMap};

fn complete_values() -> ExternalValues {
    ExternalValues {
        owner: Some("acme-org".to_string()),
        repo: Some("Rocket".to_string()),
        primary_email: Some("dev@acme.test".to_string()),
        secondary_email: Some("ops@acme.test".to_string()),
        description: Some("Fast rockets".to_string()),
    }
}

#[test]
fn test_prefix_token_does_not_corrupt_longer_token() {
    let map = VariableMap::from_pairs([("AB", "x"), ("ABC", "y")]).unwrap();
    assert_eq!(map.apply("ABC"), "y");
}

#[test]
fn test_declared_order_does_not_matter_for_prefixes() {
    let map = VariableMap::from_pairs([("ABC", "y"), ("AB", "x")]).unwrap();
    assert_eq!(map.apply("ABC AB"), "y x");
}

#[test]
fn test_resolve_full_map() {
    let map = VariableMap::resolve(&complete_values()).unwrap();

    assert_eq!(map.get("CHANGEME_USER"), Some("acme-org"));
    assert_eq!(map.get("CHANGEME_NAME"), Some("Rocket"));
    assert_eq!(map.get("CHANGEME_BIN"), Some("rocket"));
    assert_eq!(map.get("changeme_bin"), Some("rocket"));
    assert_eq!(map.get("CHANGEME_DESC"), Some("Fast rockets"));
    assert_eq!(map.get("CHANGEME"), Some("Rocket"));

    let text = "CHANGEME by CHANGEME_USER <CHANGEME_PMAIL>, run `CHANGEME_BIN`";
    assert_eq!(map.apply(text), "Rocket by acme-org <dev@acme.test>, run `rocket`");
}

#[test]
fn test_bare_token_applied_last() {
    let map = VariableMap::resolve(&complete_values()).unwrap();
    let last = map.ordered().last().map(|(token, _)| token);
    assert_eq!(last, Some("CHANGEME"));
}

#[test]
fn test_resolve_missing_value() {
    let mut values = complete_values();
    values.secondary_email = None;

    match VariableMap::resolve(&values) {
        Err(Error::ConfigResolutionError(msg)) => assert!(msg.contains("SMAIL")),
        other => panic!("Expected ConfigResolutionError, got {:?}", other),
    }
}

#[test]
fn test_resolve_empty_value_counts_as_missing() {
    let mut values = complete_values();
    values.owner = Some(String::new());
    assert!(matches!(
        VariableMap::resolve(&values),
        Err(Error::ConfigResolutionError(_))
    ));
}

#[test]
fn test_binary_name_is_lowercase() {
    assert_eq!(complete_values().binary_name().unwrap(), "rocket");
    assert!(ExternalValues::default().binary_name().is_err());
}

#[test]
fn test_description_only() {
    let values = ExternalValues {
        description: Some("Just a description".to_string()),
        ..ExternalValues::default()
    };
    let map = VariableMap::description_only(&values).unwrap();

    assert_eq!(map.len(), 1);
    assert_eq!(
        map.apply("CHANGEME_DESC stays CHANGEME_BIN"),
        "Just a description stays CHANGEME_BIN"
    );
}

#[test]
fn test_values_containing_tokens_are_inserted_verbatim() {
    let mut values = complete_values();
    values.description =
        Some("Rename every CHANGEME_BIN placeholder in a CHANGEME skeleton".to_string());

    let full = VariableMap::resolve(&values).unwrap();
    let description = VariableMap::description_only(&values).unwrap();

    let expected = "Rename every CHANGEME_BIN placeholder in a CHANGEME skeleton";
    assert_eq!(full.apply("CHANGEME_DESC"), expected);
    assert_eq!(description.apply("CHANGEME_DESC"), expected);
    assert_eq!(
        full.apply("CHANGEME: CHANGEME_DESC"),
        format!("Rocket: {expected}")
    );
}

#[test]
fn test_longer_value_containing_shorter_token() {
    let map = VariableMap::from_pairs([("ABC", "AB!"), ("AB", "x")]).unwrap();
    assert_eq!(map.apply("ABC"), "AB!");
    assert_eq!(map.apply("AB ABC AB"), "x AB! x");
}
