use std::rc::Rc;

use gloo_events::EventListener;
use log::debug;
use web_sys::{Document, Element};

use crate::dom;

const MENU_BUTTON_ID: &str = "menuBtn";
const MOBILE_MENU_ID: &str = "mobileMenu";
const MOBILE_LINKS: &str = ".mobile-link";
const ACTIVE: &str = "active";

/// Drawer state. The body scroll lock always follows `open`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MenuState {
    open: bool,
}

impl MenuState {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn scroll_locked(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    pub fn close(&mut self) {
        self.open = false;
    }
}

struct Drawer {
    document: Document,
    button: Element,
    menu: Element,
}

impl Drawer {
    // The tab controls also close the drawer, so the class list is the source of truth.
    fn state(&self) -> MenuState {
        MenuState {
            open: self.menu.class_list().contains(ACTIVE),
        }
    }

    fn render(&self, state: MenuState) {
        for element in [&self.button, &self.menu] {
            let _ = element.class_list().toggle_with_force(ACTIVE, state.is_open());
        }
        dom::set_scroll_lock(&self.document, state.scroll_locked());
    }

    fn toggle(&self) {
        let mut state = self.state();
        state.toggle();
        self.render(state);
    }

    fn close(&self) {
        let mut state = self.state();
        state.close();
        self.render(state);
    }
}

pub struct MobileMenu {
    _listeners: Vec<EventListener>,
}

impl MobileMenu {
    pub fn install(document: &Document) -> Option<Self> {
        let button = document.get_element_by_id(MENU_BUTTON_ID);
        let menu = document.get_element_by_id(MOBILE_MENU_ID);
        let (Some(button), Some(menu)) = (button, menu) else {
            debug!("Mobile menu skipped: missing #{} or #{}", MENU_BUTTON_ID, MOBILE_MENU_ID);
            return None;
        };
        let links = dom::query_all(document, MOBILE_LINKS);

        for (index, link) in links.iter().enumerate() {
            dom::set_style(link, "--index", &index.to_string());
        }

        let drawer = Rc::new(Drawer {
            document: document.clone(),
            button: button.clone(),
            menu,
        });

        let mut listeners = Vec::with_capacity(links.len() + 1);
        {
            let drawer = Rc::clone(&drawer);
            listeners.push(EventListener::new(&button, "click", move |_| drawer.toggle()));
        }
        for link in &links {
            let drawer = Rc::clone(&drawer);
            listeners.push(EventListener::new(link, "click", move |_| drawer.close()));
        }

        debug!("Mobile menu installed with {} links", links.len());
        Some(Self {
            _listeners: listeners,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_closed_and_unlocked() {
        let state = MenuState::default();
        assert!(!state.is_open());
        assert!(!state.scroll_locked());
    }

    #[test]
    fn toggling_open_locks_scrolling() {
        let mut state = MenuState::default();
        assert!(state.toggle());
        assert!(state.scroll_locked());
    }

    #[test]
    fn toggling_twice_releases_the_lock() {
        let mut state = MenuState::default();
        state.toggle();
        assert!(!state.toggle());
        assert!(!state.scroll_locked());
    }

    #[test]
    fn link_close_always_releases_the_lock() {
        let mut state = MenuState::default();
        state.toggle();
        state.close();
        assert!(!state.is_open());
        assert!(!state.scroll_locked());

        state.close();
        assert!(!state.scroll_locked());
    }
}
