//! Page chrome state: mobile menu and keyboard-navigation styling.
//!
//! Pages are rendered with the menu collapsed unless the request carries
//! `menu=open`, so the hamburger works as a plain link without scripting.

use serde::Serialize;

/// Input events the page chrome reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEvent {
    HamburgerClick,
    NavLinkClick,
    KeyDown(Key),
    MouseDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Tab,
    Other,
}

/// Mobile menu plus the body's keyboard-nav class
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChromeState {
    pub menu_open: bool,
    pub keyboard_nav: bool,
}

impl ChromeState {
    pub fn handle(&mut self, event: PageEvent) {
        match event {
            PageEvent::HamburgerClick => self.menu_open = !self.menu_open,
            PageEvent::NavLinkClick => self.menu_open = false,
            PageEvent::KeyDown(Key::Escape) => self.menu_open = false,
            PageEvent::KeyDown(Key::Tab) => self.keyboard_nav = true,
            PageEvent::KeyDown(Key::Other) => {}
            PageEvent::MouseDown => self.keyboard_nav = false,
        }
    }

    /// State for a page request; `menu=open` counts as one hamburger click
    pub fn from_menu_param(menu: Option<&str>) -> Self {
        let mut state = Self::default();
        if menu == Some("open") {
            state.handle(PageEvent::HamburgerClick);
        }
        state
    }

    /// Class list for the hamburger button and the nav menu
    pub fn menu_class(&self) -> &'static str {
        if self.menu_open {
            "active"
        } else {
            ""
        }
    }

    /// `menu` value the hamburger link carries to flip the menu
    pub fn toggle_param(&self) -> &'static str {
        if self.menu_open {
            "closed"
        } else {
            "open"
        }
    }
}
