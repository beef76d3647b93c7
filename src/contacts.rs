// Static contact list shown on the first screen

use log::debug;

use crate::models::{AvatarColor, Contact};

/// The fixed contacts every run starts with, in display order
pub fn seed_contacts() -> Vec<Contact> {
    vec![
        Contact::new("🇫🇷 김지우", AvatarColor::Orange),
        Contact::new("🇮🇳 박규태", AvatarColor::Lavender),
        Contact::new("🇨🇦 이은혜", AvatarColor::Blue),
    ]
}

pub struct ContactList {
    contacts: Vec<Contact>,
    selected: usize,
}

impl ContactList {
    pub fn new() -> Self {
        Self::with_contacts(seed_contacts())
    }

    pub fn with_contacts(contacts: Vec<Contact>) -> Self {
        ContactList {
            contacts,
            selected: 0,
        }
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> Option<&Contact> {
        self.contacts.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if !self.contacts.is_empty() {
            self.selected = (self.selected + 1) % self.contacts.len();
        }
    }

    pub fn select_previous(&mut self) {
        if !self.contacts.is_empty() {
            self.selected = (self.selected + self.contacts.len() - 1) % self.contacts.len();
        }
    }

    /// Hand the highlighted contact to the navigation layer
    pub fn open_selected(&self) -> Option<Contact> {
        let contact = self.selected().cloned();
        if let Some(c) = &contact {
            debug!("Opening chat with {} ({})", c.name, c.id);
        }
        contact
    }
}

impl Default for ContactList {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_has_three_contacts_in_order() {
        let list = ContactList::new();
        let names: Vec<&str> = list.contacts().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["🇫🇷 김지우", "🇮🇳 박규태", "🇨🇦 이은혜"]);
        assert_eq!(list.contacts()[0].avatar_color, AvatarColor::Orange);
        assert_eq!(list.contacts()[1].avatar_color, AvatarColor::Lavender);
        assert_eq!(list.contacts()[2].avatar_color, AvatarColor::Blue);
    }

    #[test]
    fn test_contact_ids_are_unique() {
        let list = ContactList::new();
        let c = list.contacts();
        assert_ne!(c[0].id, c[1].id);
        assert_ne!(c[1].id, c[2].id);
        assert_ne!(c[0].id, c[2].id);
    }

    #[test]
    fn test_selection_wraps_both_ways() {
        let mut list = ContactList::new();
        assert_eq!(list.selected_index(), 0);

        list.select_previous();
        assert_eq!(list.selected_index(), 2);

        list.select_next();
        assert_eq!(list.selected_index(), 0);

        list.select_next();
        list.select_next();
        list.select_next();
        assert_eq!(list.selected_index(), 0);
    }

    #[test]
    fn test_open_selected_yields_highlighted_contact() {
        let mut list = ContactList::new();
        list.select_next();
        let opened = list.open_selected().expect("contact should be selected");
        assert_eq!(opened.name, "🇮🇳 박규태");
    }

    #[test]
    fn test_empty_list_has_no_selection() {
        let mut list = ContactList::with_contacts(Vec::new());
        list.select_next();
        list.select_previous();
        assert!(list.selected().is_none());
        assert!(list.open_selected().is_none());
    }
}
