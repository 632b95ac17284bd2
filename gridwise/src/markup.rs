//! The component's own markup region.
//!
//! ```text
//! root
//! ├── div#wrapper
//! │   ├── button#full-screen--open   (hidden until the table overflows)
//! │   └── slot                       (projects the host's table)
//! ├── button#full-screen--close      (hidden outside fullscreen)
//! └── div#overlay.overlay            (hidden outside fullscreen)
//! ```

use celldom::Element;

pub const WRAPPER_ID: &str = "wrapper";
pub const OPEN_BUTTON_ID: &str = "full-screen--open";
pub const CLOSE_BUTTON_ID: &str = "full-screen--close";
pub const OVERLAY_ID: &str = "overlay";
pub const SLOT_ID: &str = "slot";

/// Wrapper class while fullscreen.
pub const WRAPPER_FULLSCREEN_CLASS: &str = "table-full-screen";

pub fn render() -> Element {
    Element::div()
        .id("shadow-root")
        .child(
            Element::div()
                .id(WRAPPER_ID)
                .class("table-wrapper")
                .child(
                    Element::button()
                        .id(OPEN_BUTTON_ID)
                        .class("full-screen")
                        .hidden(true)
                        .clickable(true)
                        .child(Element::span("Expand Table").class("hidden-text")),
                )
                .child(Element::slot().id(SLOT_ID)),
        )
        .child(
            Element::button()
                .id(CLOSE_BUTTON_ID)
                .class("full-screen--close")
                .hidden(true)
                .clickable(true)
                .child(Element::span("Close").class("hidden-text")),
        )
        .child(Element::div().id(OVERLAY_ID).class("overlay").hidden(true))
}
