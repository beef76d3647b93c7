// Contact list seeding and navigation into chat sessions

mod common;
use common::setup_logging;

use day_night::{AvatarColor, ChatSession, ContactList};

#[test]
fn test_seeded_contacts() {
    setup_logging();
    let list = ContactList::new();

    let seeded: Vec<(&str, AvatarColor)> = list
        .contacts()
        .iter()
        .map(|c| (c.name.as_str(), c.avatar_color))
        .collect();

    assert_eq!(
        seeded,
        vec![
            ("🇫🇷 김지우", AvatarColor::Orange),
            ("🇮🇳 박규태", AvatarColor::Lavender),
            ("🇨🇦 이은혜", AvatarColor::Blue),
        ]
    );
}

#[test]
fn test_selected_contact_scopes_new_session() {
    setup_logging();
    let mut list = ContactList::new();
    list.select_previous();

    let contact = list.open_selected().expect("a contact is always selected");
    let session = ChatSession::new(contact.clone());

    assert_eq!(session.contact(), &contact);
    assert_eq!(session.contact().name, "🇨🇦 이은혜");
    assert!(session.messages().is_empty());
}
