//! SetValue — batch attribute assignment.
//!
//! Zips the plug stream with the value stream (every element must pair),
//! then issues one marshaled request that applies all assignments in order.
//! A rejected assignment flags its element `false` and the batch continues;
//! the flags go out in input order.

use crate::flow::component::Component;
use crate::flow::port::{InputPort, OutputPort, PortDescriptor};
use crate::flow::sync::Zip2;
use crate::options::OptionMap;
use crate::session::HostSession;
use crate::types::SceneValue;

static PORTS: &[PortDescriptor] = &[
    PortDescriptor::input("plug"),
    PortDescriptor::input("value"),
    PortDescriptor::output("applied"),
];

pub struct SetValue {
    session: HostSession,
    plug: InputPort<String>,
    value: InputPort<SceneValue>,
    applied: OutputPort<bool>,
}

impl SetValue {
    pub fn new(
        session: HostSession,
        plug: InputPort<String>,
        value: InputPort<SceneValue>,
        applied: OutputPort<bool>,
    ) -> Self {
        Self {
            session,
            plug,
            value,
            applied,
        }
    }
}

impl Component for SetValue {
    fn name(&self) -> &str {
        "SetValue"
    }

    fn ports(&self) -> &[PortDescriptor] {
        PORTS
    }

    fn process(&mut self) -> bool {
        let assignments: Vec<(String, SceneValue)> =
            Zip2::new(&mut self.plug, &mut self.value).collect();
        if assignments.is_empty() {
            return false;
        }

        let flags: Vec<bool> = match self.session.execute(move |host| {
            assignments
                .into_iter()
                .map(|(plug, value)| {
                    match host.call(
                        "setAttr",
                        &[SceneValue::from(plug.clone()), value],
                        &OptionMap::new(),
                    ) {
                        Ok(_) => true,
                        Err(err) => {
                            tracing::warn!("SetValue: {} rejected: {}", plug, err);
                            false
                        }
                    }
                })
                .collect()
        }) {
            Ok(flags) => flags,
            Err(err) => {
                tracing::warn!("SetValue: session unavailable: {}", err);
                return false;
            }
        };

        for flag in flags {
            let _ = self.applied.send_or_default(flag);
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::port::stream;
    use crate::host::MemoryHost;

    fn scene_session() -> HostSession {
        let mut host = MemoryHost::new();
        host.add_node("n1", "transform");
        host.set_attr("n1", "tx", SceneValue::Float(0.0));
        host.add_node("n2", "transform");
        host.set_attr("n2", "ty", SceneValue::Float(0.0));
        HostSession::spawn(host)
    }

    fn feed_plugs(plugs: &[&str]) -> InputPort<String> {
        let (tx, rx) = stream(plugs.len().max(1));
        for p in plugs {
            tx.send(p.to_string());
        }
        rx
    }

    fn feed_values(values: Vec<SceneValue>) -> InputPort<SceneValue> {
        let (tx, rx) = stream(values.len().max(1));
        for v in values {
            tx.send(v);
        }
        rx
    }

    #[test]
    fn test_per_element_failure_does_not_abort_batch() {
        let session = scene_session();
        let (out_tx, mut out_rx) = stream(8);
        let mut set = SetValue::new(
            session.clone(),
            feed_plugs(&["n1.tx", "n2.ty", "bad.attr"]),
            feed_values(vec![
                SceneValue::Float(1.0),
                SceneValue::Float(2.0),
                SceneValue::Float(3.0),
            ]),
            out_tx,
        );

        assert!(!set.process());
        drop(set);
        // all three flags present, order preserved, only the bad plug failed
        assert_eq!(out_rx.drain(), vec![true, true, false]);

        let applied = session
            .call("getAttr", vec![SceneValue::from("n2.ty")], OptionMap::new())
            .unwrap();
        assert_eq!(applied, vec![SceneValue::Float(2.0)]);
        session.shutdown();
    }

    #[test]
    fn test_unpaired_tail_is_dropped() {
        let session = scene_session();
        let (out_tx, mut out_rx) = stream(8);
        let mut set = SetValue::new(
            session.clone(),
            feed_plugs(&["n1.tx", "n2.ty"]),
            feed_values(vec![SceneValue::Float(9.0)]),
            out_tx,
        );

        set.process();
        drop(set);
        assert_eq!(out_rx.drain(), vec![true]);
        session.shutdown();
    }

    #[test]
    fn test_empty_input_emits_nothing() {
        let session = scene_session();
        let (out_tx, mut out_rx) = stream(8);
        let mut set = SetValue::new(
            session.clone(),
            feed_plugs(&[]),
            feed_values(Vec::new()),
            out_tx,
        );

        assert!(!set.process());
        drop(set);
        assert!(out_rx.drain().is_empty());
        session.shutdown();
    }
}
