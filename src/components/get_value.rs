//! GetValue — batch attribute fetch with a typed output.
//!
//! Drains the whole plug stream first, then issues one marshaled request
//! that fetches every value in order. The output port is typed; a fetched
//! value whose kind does not match is skipped with a warning. A refused send
//! substitutes the type's default so downstream keeps positional alignment.

use crate::flow::component::Component;
use crate::flow::port::{InputPort, OutputPort, PortDescriptor};
use crate::host::HostError;
use crate::options::OptionMap;
use crate::session::HostSession;
use crate::types::{SceneValue, ValueKind};

static PORTS: &[PortDescriptor] = &[
    PortDescriptor::input("plug"),
    PortDescriptor::output("value"),
];

/// Conversion from a fetched [`SceneValue`] into a typed output element.
pub trait FromSceneValue: Default + Send + 'static {
    /// The kind this output declares.
    const KIND: ValueKind;

    fn from_scene(value: SceneValue) -> Option<Self>;
}

impl FromSceneValue for bool {
    const KIND: ValueKind = ValueKind::Bool;

    fn from_scene(value: SceneValue) -> Option<Self> {
        value.as_bool()
    }
}

impl FromSceneValue for i64 {
    const KIND: ValueKind = ValueKind::Int;

    fn from_scene(value: SceneValue) -> Option<Self> {
        value.as_int()
    }
}

impl FromSceneValue for f64 {
    const KIND: ValueKind = ValueKind::Float;

    // integers widen to float
    fn from_scene(value: SceneValue) -> Option<Self> {
        value.as_float()
    }
}

impl FromSceneValue for String {
    const KIND: ValueKind = ValueKind::Str;

    fn from_scene(value: SceneValue) -> Option<Self> {
        match value {
            SceneValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

pub struct GetValue<T: FromSceneValue> {
    session: HostSession,
    plug: InputPort<String>,
    value: OutputPort<T>,
    emitted: usize,
    substituted: usize,
}

impl<T: FromSceneValue> GetValue<T> {
    pub fn new(session: HostSession, plug: InputPort<String>, value: OutputPort<T>) -> Self {
        Self {
            session,
            plug,
            value,
            emitted: 0,
            substituted: 0,
        }
    }

    /// Elements emitted (including those that went out as the default).
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// Emissions where the value was refused and the default substituted.
    pub fn substituted(&self) -> usize {
        self.substituted
    }
}

impl<T: FromSceneValue> Component for GetValue<T> {
    fn name(&self) -> &str {
        "GetValue"
    }

    fn ports(&self) -> &[PortDescriptor] {
        PORTS
    }

    fn process(&mut self) -> bool {
        let plugs = self.plug.drain();
        if plugs.is_empty() {
            return false;
        }

        type Fetched = Vec<(String, Result<SceneValue, HostError>)>;
        let fetched: Fetched = match self.session.execute(move |host| {
            plugs
                .into_iter()
                .map(|plug| {
                    let result = host
                        .call("getAttr", &[SceneValue::from(plug.clone())], &OptionMap::new())
                        .and_then(|values| {
                            values.into_iter().next().ok_or_else(|| HostError::Failed {
                                op: "getAttr".to_string(),
                                message: format!("no value for {plug}"),
                            })
                        });
                    (plug, result)
                })
                .collect()
        }) {
            Ok(fetched) => fetched,
            Err(err) => {
                tracing::warn!("GetValue: session unavailable: {}", err);
                return false;
            }
        };

        for (plug, result) in fetched {
            match result {
                Ok(value) => {
                    let kind = value.kind();
                    match T::from_scene(value) {
                        Some(typed) => {
                            self.emitted += 1;
                            if !self.value.send(typed) {
                                self.substituted += 1;
                                if !self.value.send(T::default()) {
                                    tracing::warn!("GetValue: output refused element for {}", plug);
                                }
                            }
                        }
                        None => {
                            tracing::warn!(
                                "GetValue: skipping {}: fetched {:?}, output declares {:?}",
                                plug,
                                kind,
                                T::KIND
                            );
                        }
                    }
                }
                Err(err) => {
                    tracing::warn!("GetValue: fetch failed for {}: {}", plug, err);
                }
            }
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
        host.add_node("pCube1", "transform");
        host.set_attr("pCube1", "tx", SceneValue::Float(1.5));
        host.set_attr("pCube1", "ty", SceneValue::Int(2));
        host.set_attr("pCube1", "label", SceneValue::from("hero"));
        HostSession::spawn(host)
    }

    fn feed(plugs: &[&str]) -> InputPort<String> {
        let (tx, rx) = stream(plugs.len().max(1));
        for p in plugs {
            tx.send(p.to_string());
        }
        rx
    }

    #[test]
    fn test_batch_fetch_preserves_order() {
        let session = scene_session();
        let (out_tx, mut out_rx) = stream(8);
        let mut get = GetValue::<f64>::new(session.clone(), feed(&["pCube1.tx", "pCube1.ty"]), out_tx);

        assert!(!get.process());
        assert_eq!(get.emitted(), 2);
        assert_eq!(get.substituted(), 0);
        drop(get);
        // the integer widened to float
        assert_eq!(out_rx.drain(), vec![1.5, 2.0]);
        session.shutdown();
    }

    #[test]
    fn test_kind_mismatch_is_skipped_with_warning() {
        let session = scene_session();
        let (out_tx, mut out_rx) = stream(8);
        let mut get =
            GetValue::<f64>::new(session.clone(), feed(&["pCube1.tx", "pCube1.label"]), out_tx);

        get.process();
        assert_eq!(get.emitted(), 1);
        drop(get);
        assert_eq!(out_rx.drain(), vec![1.5]);
        session.shutdown();
    }

    #[test]
    fn test_fetch_failure_does_not_abort_batch() {
        let session = scene_session();
        let (out_tx, mut out_rx) = stream(8);
        let mut get = GetValue::<f64>::new(
            session.clone(),
            feed(&["pCube1.tx", "ghost.tx", "pCube1.ty"]),
            out_tx,
        );

        get.process();
        drop(get);
        assert_eq!(out_rx.drain(), vec![1.5, 2.0]);
        session.shutdown();
    }

    #[test]
    fn test_saturated_output_substitutes_default_for_every_element() {
        let session = scene_session();
        let (out_tx, out_rx) = stream::<f64>(8);
        // a refusing output: the receiver is gone, every send returns false
        drop(out_rx);
        let mut get = GetValue::<f64>::new(
            session.clone(),
            feed(&["pCube1.tx", "pCube1.ty", "pCube1.tx"]),
            out_tx,
        );

        get.process();
        // all three fetched fine; all three emissions fell back to the default
        assert_eq!(get.emitted(), 3);
        assert_eq!(get.substituted(), 3);
        session.shutdown();
    }

    #[test]
    fn test_string_output() {
        let session = scene_session();
        let (out_tx, mut out_rx) = stream(8);
        let mut get = GetValue::<String>::new(session.clone(), feed(&["pCube1.label"]), out_tx);

        get.process();
        drop(get);
        assert_eq!(out_rx.drain(), vec!["hero".to_string()]);
        session.shutdown();
    }
}
