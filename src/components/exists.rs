//! Exists — streaming existence check, one name per step.

use crate::flow::component::Component;
use crate::flow::packet::Packet;
use crate::flow::port::{InputPort, OutputPort, PortDescriptor};
use crate::options::OptionMap;
use crate::session::HostSession;
use crate::types::SceneValue;

static PORTS: &[PortDescriptor] = &[
    PortDescriptor::input("name"),
    PortDescriptor::output("exist"),
];

pub struct Exists {
    session: HostSession,
    name: InputPort<String>,
    exist: OutputPort<bool>,
}

impl Exists {
    pub fn new(session: HostSession, name: InputPort<String>, exist: OutputPort<bool>) -> Self {
        Self {
            session,
            name,
            exist,
        }
    }
}

impl Component for Exists {
    fn name(&self) -> &str {
        "Exists"
    }

    fn ports(&self) -> &[PortDescriptor] {
        PORTS
    }

    fn process(&mut self) -> bool {
        let name = match self.name.receive() {
            Packet::Value(name) => name,
            Packet::EndOfStream => return false,
        };

        let found = match self.session.call(
            "objExists",
            vec![SceneValue::from(name.clone())],
            OptionMap::new(),
        ) {
            Ok(values) => values.first().and_then(SceneValue::as_bool).unwrap_or(false),
            Err(err) => {
                tracing::warn!("Exists: host call failed for {}: {}", name, err);
                false
            }
        };

        let _ = self.exist.send_or_default(found);
        true
    }
}
