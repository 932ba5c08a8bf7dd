//! Create — batch node creation driven by a gated pairing.
//!
//! The type-name stream is primary; the base-name stream gates it. The
//! pairing ends as soon as either side does, so a type name with no base
//! name left creates nothing. One marshaled request creates every aligned
//! pair in order and streams the actual created names out; a rejected
//! creation flags its slot with an empty name and the batch continues.

use crate::flow::component::Component;
use crate::flow::port::{InputPort, OutputPort, PortDescriptor};
use crate::flow::sync::GatedZip2;
use crate::host::HostError;
use crate::options::OptionMap;
use crate::session::HostSession;
use crate::types::SceneValue;

static PORTS: &[PortDescriptor] = &[
    PortDescriptor::input("kind"),
    PortDescriptor::input("name"),
    PortDescriptor::output("created"),
];

pub struct Create {
    session: HostSession,
    kind: InputPort<String>,
    name: InputPort<String>,
    created: OutputPort<String>,
}

impl Create {
    pub fn new(
        session: HostSession,
        kind: InputPort<String>,
        name: InputPort<String>,
        created: OutputPort<String>,
    ) -> Self {
        Self {
            session,
            kind,
            name,
            created,
        }
    }
}

impl Component for Create {
    fn name(&self) -> &str {
        "Create"
    }

    fn ports(&self) -> &[PortDescriptor] {
        PORTS
    }

    fn process(&mut self) -> bool {
        let requests: Vec<(String, String)> =
            GatedZip2::new(&mut self.kind, &mut self.name).collect();
        if requests.is_empty() {
            return false;
        }

        type Created = Vec<(String, Result<String, HostError>)>;
        let results: Created = match self.session.execute(move |host| {
            requests
                .into_iter()
                .map(|(kind, name)| {
                    let result = host
                        .call(
                            "createNode",
                            &[SceneValue::from(kind.clone()), SceneValue::from(name)],
                            &OptionMap::new(),
                        )
                        .and_then(|values| match values.into_iter().next() {
                            Some(SceneValue::Str(created)) => Ok(created),
                            _ => Err(HostError::Failed {
                                op: "createNode".to_string(),
                                message: "missing created name".to_string(),
                            }),
                        });
                    (kind, result)
                })
                .collect()
        }) {
            Ok(results) => results,
            Err(err) => {
                tracing::warn!("Create: session unavailable: {}", err);
                return false;
            }
        };

        for (kind, result) in results {
            match result {
                Ok(created) => {
                    let _ = self.created.send_or_default(created);
                }
                Err(err) => {
                    tracing::warn!("Create: {} rejected: {}", kind, err);
                    let _ = self.created.send_or_default(String::new());
                }
            }
        }
        false
    }
}
