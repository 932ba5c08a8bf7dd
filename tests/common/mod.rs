//! Shared helpers for integration tests.

#![allow(dead_code)] // Test utilities may not all be used in every test file

use sceneflow::{MemoryHost, SceneValue};

/// Initialize tracing once per test binary; later calls are no-ops.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A small scene with transforms and a camera, all carrying `tx`/`ty`.
pub fn populated_scene() -> MemoryHost {
    let mut host = MemoryHost::new();
    for (name, kind) in [
        ("pCube1", "transform"),
        ("pCube2", "transform"),
        ("pSphere1", "transform"),
        ("persp", "camera"),
    ] {
        host.add_node(name, kind);
    }
    for (i, node) in ["pCube1", "pCube2", "pSphere1"].iter().enumerate() {
        host.set_attr(node, "tx", SceneValue::Float(i as f64 + 1.0));
        host.set_attr(node, "ty", SceneValue::Float(0.0));
    }
    host
}
