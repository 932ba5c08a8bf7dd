//! Host command interface.
//!
//! [`HostApi`] is the seam to the wrapped scene application: one generic
//! callable taking positional arguments and keyed options. The real host is
//! not safe to call from more than one thread; implementations are owned by
//! the session thread (see [`crate::session`]) and never touched directly by
//! component code.
//!
//! [`MemoryHost`] is the in-memory reference implementation used by tests
//! and benches.

use crate::options::OptionMap;
use crate::types::SceneValue;
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

/// Errors raised by a host operation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HostError {
    #[error("unknown node: {0}")]
    UnknownNode(String),

    #[error("unknown attribute: {0}")]
    UnknownAttribute(String),

    #[error("unknown node type: {0}")]
    UnknownType(String),

    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    #[error("bad argument for {op}: {message}")]
    BadArgument { op: String, message: String },

    #[error("operation {op} failed: {message}")]
    Failed { op: String, message: String },
}

/// Result of a single host operation.
pub type HostResult = std::result::Result<Vec<SceneValue>, HostError>;

/// The wrapped scene command interface.
///
/// A single entry point: `call(op, args, kwargs)` returns zero or more values
/// or a typed failure. Implementations are not reentrant and must only ever
/// be invoked from the session thread.
pub trait HostApi: Send {
    fn call(&mut self, op: &str, args: &[SceneValue], kwargs: &OptionMap) -> HostResult;
}

#[derive(Debug, Clone, Default)]
struct NodeRecord {
    kind: String,
    attrs: BTreeMap<String, SceneValue>,
}

/// In-memory scene: named, typed nodes with attributes and plug connections.
///
/// Operations mirror the generic command set the adapters drive: `ls`,
/// `objExists`, `getAttr`, `setAttr`, `connectAttr`, `disconnectAttr`,
/// `createNode`, `delete`, `listConnections`.
#[derive(Debug, Default)]
pub struct MemoryHost {
    nodes: BTreeMap<String, NodeRecord>,
    /// Directed (source plug, destination plug) pairs, in connection order.
    connections: Vec<(String, String)>,
    kinds: BTreeSet<String>,
}

impl MemoryHost {
    pub fn new() -> Self {
        let mut kinds = BTreeSet::new();
        for kind in ["transform", "mesh", "camera", "locator", "shader"] {
            kinds.insert(kind.to_string());
        }
        Self {
            nodes: BTreeMap::new(),
            connections: Vec::new(),
            kinds,
        }
    }

    /// Register an additional creatable node type.
    pub fn add_kind(&mut self, kind: &str) {
        self.kinds.insert(kind.to_string());
    }

    /// Insert a node, replacing any node of the same name.
    pub fn add_node(&mut self, name: &str, kind: &str) {
        self.nodes.insert(
            name.to_string(),
            NodeRecord {
                kind: kind.to_string(),
                attrs: BTreeMap::new(),
            },
        );
    }

    /// Set an attribute on an existing node, creating the attribute slot.
    pub fn set_attr(&mut self, node: &str, attr: &str, value: SceneValue) {
        if let Some(record) = self.nodes.get_mut(node) {
            record.attrs.insert(attr.to_string(), value);
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    fn node(&self, name: &str) -> Result<&NodeRecord, HostError> {
        self.nodes
            .get(name)
            .ok_or_else(|| HostError::UnknownNode(name.to_string()))
    }

    /// Resolve `"node.attr"` and verify both halves exist.
    fn resolve_plug<'a>(&self, op: &str, plug: &'a str) -> Result<(&'a str, &'a str), HostError> {
        let (node, attr) = plug.split_once('.').ok_or_else(|| HostError::BadArgument {
            op: op.to_string(),
            message: format!("expected node.attr plug, got {plug:?}"),
        })?;
        let record = self.node(node)?;
        if !record.attrs.contains_key(attr) {
            return Err(HostError::UnknownAttribute(plug.to_string()));
        }
        Ok((node, attr))
    }

    fn ls(&self, args: &[SceneValue], kwargs: &OptionMap) -> HostResult {
        let pattern = match args.first() {
            Some(_) => Some(str_arg("ls", args, 0)?),
            None => None,
        };
        let kind = kwargs.get("type").and_then(SceneValue::as_str);

        let names = self
            .nodes
            .iter()
            .filter(|(name, record)| {
                pattern.map_or(true, |p| wildcard_match(p, name))
                    && kind.map_or(true, |k| record.kind == k)
            })
            .map(|(name, _)| SceneValue::from(name.clone()))
            .collect();
        Ok(names)
    }

    fn obj_exists(&self, args: &[SceneValue]) -> HostResult {
        let name = str_arg("objExists", args, 0)?;
        Ok(vec![SceneValue::Bool(self.nodes.contains_key(name))])
    }

    fn get_attr(&self, args: &[SceneValue]) -> HostResult {
        let plug = str_arg("getAttr", args, 0)?;
        let (node, attr) = self.resolve_plug("getAttr", plug)?;
        let record = self.node(node)?;
        let value = record
            .attrs
            .get(attr)
            .ok_or_else(|| HostError::UnknownAttribute(plug.to_string()))?;
        Ok(vec![value.clone()])
    }

    fn set_attr_op(&mut self, args: &[SceneValue]) -> HostResult {
        let plug = str_arg("setAttr", args, 0)?;
        let value = args.get(1).ok_or_else(|| HostError::BadArgument {
            op: "setAttr".to_string(),
            message: "missing value argument".to_string(),
        })?;
        let (node, attr) = self.resolve_plug("setAttr", plug)?;
        let (node, attr) = (node.to_string(), attr.to_string());
        if let Some(record) = self.nodes.get_mut(&node) {
            record.attrs.insert(attr, value.clone());
        }
        Ok(vec![SceneValue::Bool(true)])
    }

    fn connect_attr(&mut self, args: &[SceneValue]) -> HostResult {
        let src = str_arg("connectAttr", args, 0)?;
        let dst = str_arg("connectAttr", args, 1)?;
        self.resolve_plug("connectAttr", src)?;
        self.resolve_plug("connectAttr", dst)?;
        let pair = (src.to_string(), dst.to_string());
        if self.connections.contains(&pair) {
            return Err(HostError::Failed {
                op: "connectAttr".to_string(),
                message: format!("{src} is already connected to {dst}"),
            });
        }
        self.connections.push(pair);
        Ok(vec![SceneValue::Bool(true)])
    }

    fn disconnect_attr(&mut self, args: &[SceneValue]) -> HostResult {
        let src = str_arg("disconnectAttr", args, 0)?;
        let dst = str_arg("disconnectAttr", args, 1)?;
        let pair = (src.to_string(), dst.to_string());
        match self.connections.iter().position(|p| *p == pair) {
            Some(idx) => {
                self.connections.remove(idx);
                Ok(vec![SceneValue::Bool(true)])
            }
            None => Err(HostError::Failed {
                op: "disconnectAttr".to_string(),
                message: format!("{src} is not connected to {dst}"),
            }),
        }
    }

    fn create_node(&mut self, args: &[SceneValue]) -> HostResult {
        let kind = str_arg("createNode", args, 0)?;
        if !self.kinds.contains(kind) {
            return Err(HostError::UnknownType(kind.to_string()));
        }
        let base = match args.get(1) {
            Some(_) => str_arg("createNode", args, 1)?,
            None => kind,
        };
        let name = self.unique_name(base);
        let mut attrs = BTreeMap::new();
        attrs.insert("visibility".to_string(), SceneValue::Bool(true));
        self.nodes.insert(
            name.clone(),
            NodeRecord {
                kind: kind.to_string(),
                attrs,
            },
        );
        Ok(vec![SceneValue::Str(name)])
    }

    fn delete(&mut self, args: &[SceneValue]) -> HostResult {
        let name = str_arg("delete", args, 0)?;
        if self.nodes.remove(name).is_none() {
            return Err(HostError::UnknownNode(name.to_string()));
        }
        let prefix = format!("{name}.");
        self.connections
            .retain(|(src, dst)| !src.starts_with(&prefix) && !dst.starts_with(&prefix));
        Ok(Vec::new())
    }

    fn list_connections(&self, args: &[SceneValue]) -> HostResult {
        let plug = str_arg("listConnections", args, 0)?;
        self.resolve_plug("listConnections", plug)?;
        let mut out = Vec::new();
        for (src, dst) in &self.connections {
            if src == plug {
                out.push(SceneValue::from(dst.clone()));
            } else if dst == plug {
                out.push(SceneValue::from(src.clone()));
            }
        }
        Ok(out)
    }

    fn unique_name(&self, base: &str) -> String {
        if !self.nodes.contains_key(base) {
            return base.to_string();
        }
        let mut n = 1u64;
        loop {
            let candidate = format!("{base}{n}");
            if !self.nodes.contains_key(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }
}

impl HostApi for MemoryHost {
    fn call(&mut self, op: &str, args: &[SceneValue], kwargs: &OptionMap) -> HostResult {
        match op {
            "ls" => self.ls(args, kwargs),
            "objExists" => self.obj_exists(args),
            "getAttr" => self.get_attr(args),
            "setAttr" => self.set_attr_op(args),
            "connectAttr" => self.connect_attr(args),
            "disconnectAttr" => self.disconnect_attr(args),
            "createNode" => self.create_node(args),
            "delete" => self.delete(args),
            "listConnections" => self.list_connections(args),
            other => Err(HostError::UnknownOperation(other.to_string())),
        }
    }
}

fn str_arg<'a>(op: &str, args: &'a [SceneValue], idx: usize) -> Result<&'a str, HostError> {
    match args.get(idx) {
        Some(SceneValue::Str(s)) => Ok(s),
        Some(other) => Err(HostError::BadArgument {
            op: op.to_string(),
            message: format!("argument {idx} must be a string, got {:?}", other.kind()),
        }),
        None => Err(HostError::BadArgument {
            op: op.to_string(),
            message: format!("missing argument {idx}"),
        }),
    }
}

/// `*`-wildcard match over node names, in the style of scene query patterns.
fn wildcard_match(pattern: &str, text: &str) -> bool {
    if !pattern.contains('*') {
        return pattern == text;
    }
    let segments: Vec<&str> = pattern.split('*').collect();
    let mut pos = 0usize;
    let last = segments.len() - 1;
    for (i, segment) in segments.iter().enumerate() {
        if segment.is_empty() {
            continue;
        }
        if i == 0 {
            if !text.starts_with(segment) {
                return false;
            }
            pos = segment.len();
        } else if i == last {
            let rest = &text[pos..];
            if rest.len() < segment.len() || !rest.ends_with(segment) {
                return false;
            }
        } else {
            match text[pos..].find(segment) {
                Some(idx) => pos += idx + segment.len(),
                None => return false,
            }
        }
    }
    true
}
