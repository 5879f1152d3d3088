use permapages_core::{
    LedgerEntry, LedgerRecord, Page, PageValidationError, Profile, ProfileValidationError,
    ProtocolConfig,
};
use serde_json::json;

const OWNER: &str = "vh-NTHVvlKZqRxc8LyyTNok65yQ55a_PJ1zWLb9G2JI";

#[test]
fn tag_derivation_is_pure() {
    let config = ProtocolConfig::default();
    let mut page = Page::new("T", "D", "<p>x</p>");
    page.timestamp = Some(7);
    let copy = page.clone();

    assert_eq!(page.derive_tags(&config), copy.derive_tags(&config));
    assert_eq!(page.derive_tags(&config), page.derive_tags(&config));

    let profile = Profile::new("rakis");
    assert_eq!(
        profile.derive_tags(&config),
        profile.clone().derive_tags(&config)
    );
}

#[test]
fn tags_follow_configured_protocols() {
    let config = ProtocolConfig::from_json_str(
        r#"{"pages_protocol":"PermaPages-v0.4","profile_protocol":"PermaProfile-v0.2"}"#,
    )
    .expect("config should load");

    assert_eq!(
        Page::new("T", "D", "<p>x</p>").derive_tags(&config)[0].value,
        "PermaPages-v0.4"
    );
    assert_eq!(
        Profile::new("rakis").derive_tags(&config)[0].value,
        "PermaProfile-v0.2"
    );
}

#[test]
fn page_deserializes_from_raw_json_and_validates() {
    let page: Page = serde_json::from_value(json!({
        "title": "T",
        "description": "D",
        "html": "<p>x</p>",
        "owner": OWNER
    }))
    .expect("raw page should decode");
    page.validate().expect("raw page should be valid");

    let mut bad = page.clone();
    bad.owner = Some("not-an-address".to_string());
    assert_eq!(
        bad.validate(),
        Err(PageValidationError::InvalidOwner(
            "not-an-address".to_string()
        ))
    );

    let long = Page::new("x".repeat(121), "", "<p>x</p>");
    assert!(matches!(
        long.validate(),
        Err(PageValidationError::TitleTooLong { len: 121, .. })
    ));
}

#[test]
fn profile_validation_covers_required_and_optional_fields() {
    assert_eq!(
        Profile::new("  ").validate(),
        Err(ProfileValidationError::EmptyHandle)
    );

    let mut profile = Profile::new("rakis");
    profile.avatar = Some(" ".to_string());
    assert_eq!(profile.validate(), Err(ProfileValidationError::EmptyAvatar));

    profile.avatar = Some("ar://avatar-tx".to_string());
    profile.owner = Some(OWNER.to_string());
    profile.validate().expect("profile should be valid");
}

#[test]
fn entry_mapping_always_sets_id() {
    let entry: LedgerEntry = serde_json::from_value(json!({
        "id": "tx-1",
        "owner": { "address": OWNER },
        "tags": [{ "name": "Profile-Handle", "value": "rakis" }]
    }))
    .expect("entry should decode");

    let profile = Profile::from_entry(&entry);
    assert_eq!(profile.id.as_deref(), Some("tx-1"));
    assert_eq!(profile.handle, "rakis");
    assert_eq!(profile.owner.as_deref(), Some(OWNER));
    assert_eq!(LedgerRecord::timestamp(&profile), 0);

    let page = Page::from_entry(&LedgerEntry::new("tx-2"));
    assert_eq!(page.id.as_deref(), Some("tx-2"));
    assert!(page.title.is_empty());
}
