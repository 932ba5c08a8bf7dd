//! AttrName — streaming join of an object-name stream and an attribute-name
//! stream into `"object.attribute"` plug identifiers.
//!
//! The two inputs may end at different times. Each `process` step pulls one
//! value from every still-open side, tracked by a [`PairState`] machine; an
//! emission consumes both held values, so an element never pairs twice. The
//! component reports done only once both sides have ended, after attempting
//! output from the values it still holds.

use crate::flow::component::Component;
use crate::flow::packet::Packet;
use crate::flow::port::{InputPort, OutputPort, PortDescriptor};
use crate::flow::sync::PairState;

static PORTS: &[PortDescriptor] = &[
    PortDescriptor::input("name"),
    PortDescriptor::input("attr"),
    PortDescriptor::output("plug"),
];

pub struct AttrName {
    name: InputPort<String>,
    attr: InputPort<String>,
    plug: OutputPort<String>,
    state: PairState,
    held_name: Option<String>,
    held_attr: Option<String>,
}

impl AttrName {
    pub fn new(
        name: InputPort<String>,
        attr: InputPort<String>,
        plug: OutputPort<String>,
    ) -> Self {
        Self {
            name,
            attr,
            plug,
            state: PairState::BothOpen,
            held_name: None,
            held_attr: None,
        }
    }
}

impl Component for AttrName {
    fn name(&self) -> &str {
        "AttrName"
    }

    fn ports(&self) -> &[PortDescriptor] {
        PORTS
    }

    fn process(&mut self) -> bool {
        if self.state.left_open() {
            match self.name.receive() {
                Packet::Value(name) => self.held_name = Some(name),
                Packet::EndOfStream => self.state = self.state.left_ended(),
            }
        }
        if self.state.right_open() {
            match self.attr.receive() {
                Packet::Value(attr) => self.held_attr = Some(attr),
                Packet::EndOfStream => self.state = self.state.right_ended(),
            }
        }

        if self.held_name.is_some() && self.held_attr.is_some() {
            // take() consumes both: a value pairs exactly once
            if let (Some(name), Some(attr)) = (self.held_name.take(), self.held_attr.take()) {
                let _ = self.plug.send_or_default(format!("{name}.{attr}"));
            }
        }

        !self.state.is_terminal()
    }
}
