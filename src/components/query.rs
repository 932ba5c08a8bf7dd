//! Query — batch source that lists scene nodes.
//!
//! One marshaled `ls` call per run: the `pattern` and `kind` params narrow
//! the listing, and free-form option text adds keyed arguments. Malformed
//! option text degrades to no extra arguments. Every matching name is
//! streamed to the `result` port.

use crate::flow::component::Component;
use crate::flow::port::{OutputPort, ParamPort, PortDescriptor};
use crate::options;
use crate::session::HostSession;
use crate::types::SceneValue;

static PORTS: &[PortDescriptor] = &[
    PortDescriptor::param("pattern"),
    PortDescriptor::param("kind"),
    PortDescriptor::param("options"),
    PortDescriptor::output("result"),
];

pub struct Query {
    session: HostSession,
    pattern: ParamPort<String>,
    kind: ParamPort<String>,
    options: ParamPort<String>,
    result: OutputPort<String>,
}

impl Query {
    pub fn new(
        session: HostSession,
        pattern: ParamPort<String>,
        kind: ParamPort<String>,
        options: ParamPort<String>,
        result: OutputPort<String>,
    ) -> Self {
        Self {
            session,
            pattern,
            kind,
            options,
            result,
        }
    }
}

impl Component for Query {
    fn name(&self) -> &str {
        "Query"
    }

    fn ports(&self) -> &[PortDescriptor] {
        PORTS
    }

    fn process(&mut self) -> bool {
        let mut kwargs = options::decode(&self.options.get());

        let kind = self.kind.get();
        if !kind.is_empty() {
            kwargs.insert("type".to_string(), SceneValue::from(kind));
        }

        let pattern = self.pattern.get();
        let mut args = Vec::new();
        if !pattern.is_empty() {
            args.push(SceneValue::from(pattern));
        }

        let values = match self.session.call("ls", args, kwargs) {
            Ok(values) => values,
            Err(err) => {
                tracing::warn!("Query: host call failed: {}", err);
                Vec::new()
            }
        };

        for value in values {
            match value {
                SceneValue::Str(name) => {
                    let _ = self.result.send_or_default(name);
                }
                other => {
                    tracing::warn!(
                        "Query: skipping result of kind {:?}, expected a name",
                        other.kind()
                    );
                }
            }
        }
        false
    }
}
