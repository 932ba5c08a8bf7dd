//! Connect / Disconnect — streaming plug linking.
//!
//! One mandatory pair per step: a source plug and a destination plug. Either
//! side's end-of-stream stops the component; a half-received pair is
//! discarded. Each pair issues one marshaled link (or unlink) call and the
//! outcome flag goes downstream.

use crate::flow::component::Component;
use crate::flow::packet::Packet;
use crate::flow::port::{InputPort, OutputPort, PortDescriptor};
use crate::options::OptionMap;
use crate::session::HostSession;
use crate::types::SceneValue;

static PORTS: &[PortDescriptor] = &[
    PortDescriptor::input("source"),
    PortDescriptor::input("destination"),
    PortDescriptor::output("done"),
];

pub struct Link {
    session: HostSession,
    op: &'static str,
    label: &'static str,
    source: InputPort<String>,
    destination: InputPort<String>,
    done: OutputPort<bool>,
}

impl Link {
    pub fn connect(
        session: HostSession,
        source: InputPort<String>,
        destination: InputPort<String>,
        done: OutputPort<bool>,
    ) -> Self {
        Self {
            session,
            op: "connectAttr",
            label: "Connect",
            source,
            destination,
            done,
        }
    }

    pub fn disconnect(
        session: HostSession,
        source: InputPort<String>,
        destination: InputPort<String>,
        done: OutputPort<bool>,
    ) -> Self {
        Self {
            session,
            op: "disconnectAttr",
            label: "Disconnect",
            source,
            destination,
            done,
        }
    }
}

impl Component for Link {
    fn name(&self) -> &str {
        self.label
    }

    fn ports(&self) -> &[PortDescriptor] {
        PORTS
    }

    fn process(&mut self) -> bool {
        let src = match self.source.receive() {
            Packet::Value(src) => src,
            Packet::EndOfStream => return false,
        };
        let dst = match self.destination.receive() {
            Packet::Value(dst) => dst,
            // `src` is discarded: both streams are mandatory
            Packet::EndOfStream => return false,
        };

        let ok = match self.session.call(
            self.op,
            vec![SceneValue::from(src.clone()), SceneValue::from(dst.clone())],
            OptionMap::new(),
        ) {
            Ok(_) => true,
            Err(err) => {
                tracing::warn!("{}: {} -> {} failed: {}", self.label, src, dst, err);
                false
            }
        };

        let _ = self.done.send_or_default(ok);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::port::stream;
    use crate::host::MemoryHost;

    fn scene_session() -> HostSession {
        let mut host = MemoryHost::new();
        host.add_node("a", "transform");
        host.set_attr("a", "out", SceneValue::Float(0.0));
        host.add_node("b", "transform");
        host.set_attr("b", "in", SceneValue::Float(0.0));
        HostSession::spawn(host)
    }

    fn feed(values: &[&str]) -> InputPort<String> {
        let (tx, rx) = stream(values.len().max(1));
        for v in values {
            tx.send(v.to_string());
        }
        rx
    }

    #[test]
    fn test_connect_then_disconnect() {
        let session = scene_session();

        let (done_tx, mut done_rx) = stream(8);
        let mut connect =
            Link::connect(session.clone(), feed(&["a.out"]), feed(&["b.in"]), done_tx);
        connect.run();
        drop(connect);
        assert_eq!(done_rx.drain(), vec![true]);

        let listed = session
            .call(
                "listConnections",
                vec![SceneValue::from("a.out")],
                OptionMap::new(),
            )
            .unwrap();
        assert_eq!(listed, vec![SceneValue::from("b.in")]);

        let (done_tx, mut done_rx) = stream(8);
        let mut disconnect =
            Link::disconnect(session.clone(), feed(&["a.out"]), feed(&["b.in"]), done_tx);
        disconnect.run();
        drop(disconnect);
        assert_eq!(done_rx.drain(), vec![true]);
        session.shutdown();
    }

    #[test]
    fn test_unknown_plug_flags_element_and_continues() {
        let session = scene_session();
        let (done_tx, mut done_rx) = stream(8);
        let mut connect = Link::connect(
            session.clone(),
            feed(&["a.out", "a.out"]),
            feed(&["ghost.in", "b.in"]),
            done_tx,
        );
        connect.run();
        drop(connect);
        assert_eq!(done_rx.drain(), vec![false, true]);
        session.shutdown();
    }

    #[test]
    fn test_uneven_streams_stop_at_shorter() {
        let session = scene_session();
        let (done_tx, mut done_rx) = stream(8);
        let mut connect = Link::connect(
            session.clone(),
            feed(&["a.out", "a.out"]),
            feed(&["b.in"]),
            done_tx,
        );
        connect.run();
        drop(connect);
        assert_eq!(done_rx.drain(), vec![true]);
        session.shutdown();
    }
}
