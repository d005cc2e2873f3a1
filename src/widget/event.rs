//! UI events delivered to the widget by its host.

use crate::markup::Element;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Click,
    Submit,
}

/// A user interaction aimed at one element of the page
#[derive(Debug, Clone)]
pub struct Event {
    kind: EventKind,
    target: Element,
    default_prevented: bool,
}

impl Event {
    pub fn click(target: Element) -> Self {
        Self {
            kind: EventKind::Click,
            target,
            default_prevented: false,
        }
    }

    pub fn submit(form: Element) -> Self {
        Self {
            kind: EventKind::Submit,
            target: form,
            default_prevented: false,
        }
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn target(&self) -> &Element {
        &self.target
    }

    /// Suppress the host's default action (form navigation)
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}
