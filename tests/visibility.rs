use abe_feed::{Reply, Viewer, VisibilityFilter, VisibilityMode};

fn viewer() -> Viewer {
    Viewer {
        id: "viewer".to_string(),
        phone_number: "555-2222".to_string(),
        contact_phone_numbers: vec!["555-3333".to_string(), "(555) 4444".to_string()],
    }
}

fn reply(author_id: &str, author_phone: Option<&str>, visibility: VisibilityMode) -> Reply {
    Reply {
        id: format!("reply-{}", author_id),
        author_id: author_id.to_string(),
        author_phone_number: author_phone.map(str::to_string),
        body: "hello".to_string(),
        visibility,
        allowed_phone_numbers: Vec::new(),
        scores: Vec::new(),
    }
}

#[test]
fn public_replies_are_visible_to_anyone() {
    let filter = VisibilityFilter::new();
    let reply = reply("stranger", Some("555-9999"), VisibilityMode::All);
    assert!(filter.is_visible(&reply, &viewer()));

    let no_contacts = Viewer {
        id: "other".to_string(),
        phone_number: String::new(),
        contact_phone_numbers: Vec::new(),
    };
    assert!(filter.is_visible(&reply, &no_contacts));
}

#[test]
fn contacts_replies_require_author_in_contacts() {
    let filter = VisibilityFilter::new();
    let friend = reply("friend", Some("5553333"), VisibilityMode::Contacts);
    let formatted_friend = reply("friend2", Some("555 4444"), VisibilityMode::Contacts);
    let stranger = reply("stranger", Some("555-9999"), VisibilityMode::Contacts);
    let unknown_phone = reply("ghost", None, VisibilityMode::Contacts);

    assert!(filter.is_visible(&friend, &viewer()));
    assert!(filter.is_visible(&formatted_friend, &viewer()));
    assert!(!filter.is_visible(&stranger, &viewer()));
    assert!(!filter.is_visible(&unknown_phone, &viewer()));
}

#[test]
fn individual_contacts_require_viewer_on_allow_list() {
    let filter = VisibilityFilter::new();
    let mut addressed = reply("author", Some("555-3333"), VisibilityMode::IndividualContacts);
    addressed.allowed_phone_numbers = vec!["555-1111".to_string()];

    assert!(!filter.is_visible(&addressed, &viewer()));

    addressed.allowed_phone_numbers.push("5552222".to_string());
    assert!(filter.is_visible(&addressed, &viewer()));
}

#[test]
fn author_always_sees_own_reply() {
    let filter = VisibilityFilter::new();
    let own_contacts = reply("viewer", None, VisibilityMode::Contacts);
    let mut own_individual = reply("viewer", None, VisibilityMode::IndividualContacts);
    own_individual.allowed_phone_numbers = vec!["555-1111".to_string()];

    assert!(filter.is_visible(&own_contacts, &viewer()));
    assert!(filter.is_visible(&own_individual, &viewer()));
}

#[test]
fn visibility_tags_parse_into_closed_set() {
    assert_eq!(VisibilityMode::from_str("all"), Some(VisibilityMode::All));
    assert_eq!(VisibilityMode::from_str("Contacts"), Some(VisibilityMode::Contacts));
    assert_eq!(
        VisibilityMode::from_str("individualContacts"),
        Some(VisibilityMode::IndividualContacts)
    );
    assert_eq!(VisibilityMode::from_str("friendsOfFriends"), None);
}
