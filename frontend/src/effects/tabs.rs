use std::rc::Rc;

use gloo_events::EventListener;
use log::debug;
use web_sys::{Document, Element, Window};

use crate::dom;

const DESKTOP_TABS: &str = ".main-tab";
const MOBILE_TABS: &str = ".mobile-tab";
const SECTIONS: &str = "[data-tab]";
const TAB_BAR_ID: &str = "mainTabs";
const MENU_BUTTON_ID: &str = "menuBtn";
const MOBILE_MENU_ID: &str = "mobileMenu";

const ACTIVE: &str = "active";
const VISIBLE: &str = "tab-visible";

/// Whether an element tagged `tag` is part of the `active` selection.
pub fn is_selected(tag: Option<&str>, active: &str) -> bool {
    tag == Some(active)
}

struct TabElements {
    window: Window,
    document: Document,
    desktop: Vec<Element>,
    sections: Vec<Element>,
}

impl TabElements {
    fn show(&self, tab: &str) {
        for section in &self.sections {
            let classes = section.class_list();
            let _ = if is_selected(dom::data_attr(section, "tab").as_deref(), tab) {
                classes.add_1(VISIBLE)
            } else {
                classes.remove_1(VISIBLE)
            };
        }
    }

    fn mark_desktop(&self, tab: &str) {
        for control in &self.desktop {
            let classes = control.class_list();
            let _ = classes.remove_1(ACTIVE);
            if is_selected(dom::data_attr(control, "tab").as_deref(), tab) {
                let _ = classes.add_1(ACTIVE);
            }
        }
    }

    fn activate(&self, tab: &str) {
        debug!("Activating tab {}", tab);
        self.mark_desktop(tab);
        self.show(tab);

        if let Some(bar) = self
            .document
            .get_element_by_id(TAB_BAR_ID)
            .and_then(|bar| dom::as_html(&bar))
        {
            let offset = f64::from(bar.offset_top() + bar.offset_height());
            dom::smooth_scroll_to(&self.window, offset);
        }
    }

    fn close_mobile_menu(&self) {
        let button = self.document.get_element_by_id(MENU_BUTTON_ID);
        let menu = self.document.get_element_by_id(MOBILE_MENU_ID);
        if let (Some(button), Some(menu)) = (button, menu) {
            let _ = button.class_list().remove_1(ACTIVE);
            let _ = menu.class_list().remove_1(ACTIVE);
            dom::set_scroll_lock(&self.document, false);
        }
    }
}

pub struct TabNavigation {
    _listeners: Vec<EventListener>,
}

impl TabNavigation {
    /// Shows `default_tab` and wires every desktop and mobile tab control. Returns `None`
    /// when the page has no tab controls or no tagged sections.
    pub fn install(window: &Window, document: &Document, default_tab: &str) -> Option<Self> {
        let desktop = dom::query_all(document, DESKTOP_TABS);
        let sections = dom::query_all(document, SECTIONS);
        if desktop.is_empty() || sections.is_empty() {
            debug!("Tab navigation skipped: no tabs or sections");
            return None;
        }
        let mobile = dom::query_all(document, MOBILE_TABS);

        let elements = Rc::new(TabElements {
            window: window.clone(),
            document: document.clone(),
            desktop,
            sections,
        });
        elements.mark_desktop(default_tab);
        elements.show(default_tab);

        let mut listeners = Vec::with_capacity(elements.desktop.len() + mobile.len());
        for control in &elements.desktop {
            let elements = Rc::clone(&elements);
            let target = control.clone();
            listeners.push(EventListener::new(control, "click", move |_| {
                if let Some(tab) = dom::data_attr(&target, "tab") {
                    elements.activate(&tab);
                }
            }));
        }
        for control in &mobile {
            let elements = Rc::clone(&elements);
            let target = control.clone();
            listeners.push(EventListener::new(control, "click", move |_| {
                if let Some(tab) = dom::data_attr(&target, "tab") {
                    elements.activate(&tab);
                }
                elements.close_mobile_menu();
            }));
        }

        debug!(
            "Tab navigation installed: {} desktop, {} mobile, {} sections",
            elements.desktop.len(),
            mobile.len(),
            elements.sections.len()
        );
        Some(Self {
            _listeners: listeners,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marks(tags: &[Option<&str>], active: &str) -> Vec<bool> {
        tags.iter().map(|tag| is_selected(*tag, active)).collect()
    }

    #[test]
    fn switching_from_home_to_stats_moves_the_marker() {
        let desktop = [Some("home"), Some("stats"), Some("pricing")];
        assert_eq!(marks(&desktop, "home"), vec![true, false, false]);
        assert_eq!(marks(&desktop, "stats"), vec![false, true, false]);
    }

    #[test]
    fn exactly_one_desktop_control_is_active() {
        let desktop = [Some("home"), Some("stats"), Some("pricing")];
        for tab in ["home", "stats", "pricing"] {
            assert_eq!(marks(&desktop, tab).iter().filter(|m| **m).count(), 1);
        }
    }

    #[test]
    fn every_section_sharing_the_identifier_is_shown() {
        let sections = [Some("home"), Some("stats"), Some("home"), Some("stats")];
        assert_eq!(marks(&sections, "stats"), vec![false, true, false, true]);
    }

    #[test]
    fn untagged_elements_are_never_selected() {
        assert!(!is_selected(None, "home"));
        assert!(!is_selected(Some(""), "home"));
        assert!(!is_selected(Some("Home"), "home"));
    }
}
