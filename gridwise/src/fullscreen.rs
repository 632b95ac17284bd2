//! Fullscreen presentation state machine.
//!
//! `Normal --open--> Fullscreen --close/Escape--> Normal`. The escape key
//! listener exists only while fullscreen.

use celldom::element::find_element_mut;
use celldom::{Element, InlineStyle, KeyEvent};

use crate::document::Document;
use crate::listeners::{ListenerId, ListenerKind, ListenerTarget, Listeners};
use crate::markup::{CLOSE_BUTTON_ID, OVERLAY_ID, WRAPPER_FULLSCREEN_CLASS, WRAPPER_ID};

/// Host class while fullscreen.
pub const HOST_FULLSCREEN_CLASS: &str = "full-screen";
/// Document root class while any table is fullscreen.
pub const DOCUMENT_FULLSCREEN_CLASS: &str = "table--is-full-screen";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FullscreenState {
    #[default]
    Normal,
    Fullscreen,
}

/// The parts of the component a transition touches.
pub struct Surfaces<'a> {
    pub host: &'a mut Element,
    pub shadow: &'a mut Element,
    pub document: &'a Document,
    pub listeners: &'a mut Listeners,
}

#[derive(Debug, Default)]
pub struct FullscreenController {
    state: FullscreenState,
    /// Host inline style from before the height was pinned.
    prior_style: Option<InlineStyle>,
    escape_listener: Option<ListenerId>,
}

impl FullscreenController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> FullscreenState {
        self.state
    }

    pub fn is_fullscreen(&self) -> bool {
        self.state == FullscreenState::Fullscreen
    }

    pub fn escape_listener(&self) -> Option<ListenerId> {
        self.escape_listener
    }

    /// Enter fullscreen, pinning the host at `host_height`. Returns false if
    /// already fullscreen.
    pub fn open(&mut self, surfaces: Surfaces<'_>, host_height: u16) -> bool {
        if self.is_fullscreen() {
            return false;
        }
        let Surfaces {
            host,
            shadow,
            document,
            listeners,
        } = surfaces;

        // Static height so the page doesn't reflow under the overlay.
        self.prior_style = Some(host.inline_style.clone());
        host.inline_style.set("height", format!("{host_height}px"));
        host.add_class(HOST_FULLSCREEN_CLASS);
        document.add_class(DOCUMENT_FULLSCREEN_CLASS);

        match find_element_mut(shadow, WRAPPER_ID) {
            Some(wrapper) => {
                wrapper.add_class(WRAPPER_FULLSCREEN_CLASS);
            }
            None => log::warn!("[fullscreen] wrapper missing"),
        }
        for id in [OVERLAY_ID, CLOSE_BUTTON_ID] {
            match find_element_mut(shadow, id) {
                Some(element) => element.hidden = false,
                None => log::warn!("[fullscreen] {id} missing"),
            }
        }

        listeners.bind(
            &mut self.escape_listener,
            ListenerTarget::Window,
            ListenerKind::KeyDown,
        );
        self.state = FullscreenState::Fullscreen;
        log::debug!("[fullscreen] open host={} height={host_height}", host.id);
        true
    }

    /// Leave fullscreen. Returns false if not fullscreen.
    pub fn close(&mut self, surfaces: Surfaces<'_>) -> bool {
        if !self.is_fullscreen() {
            return false;
        }
        let Surfaces {
            host,
            shadow,
            document,
            listeners,
        } = surfaces;

        host.inline_style = self.prior_style.take().unwrap_or_default();
        host.remove_class(HOST_FULLSCREEN_CLASS);
        document.remove_class(DOCUMENT_FULLSCREEN_CLASS);

        if let Some(wrapper) = find_element_mut(shadow, WRAPPER_ID) {
            wrapper.remove_class(WRAPPER_FULLSCREEN_CLASS);
        }
        for id in [OVERLAY_ID, CLOSE_BUTTON_ID] {
            if let Some(element) = find_element_mut(shadow, id) {
                element.hidden = true;
            }
        }

        listeners.unbind(&mut self.escape_listener);
        self.state = FullscreenState::Normal;
        log::debug!("[fullscreen] close host={}", host.id);
        true
    }

    /// Inspect a key press. Escape is claimed (default prevented) and
    /// returns true when it should close fullscreen. Presses another handler
    /// already claimed are left alone.
    pub fn claim_escape(&self, event: &mut KeyEvent) -> bool {
        if event.default_prevented() || !event.key.is_escape() {
            return false;
        }
        event.prevent_default();
        self.is_fullscreen()
    }
}
