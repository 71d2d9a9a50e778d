//! Connector fake that never touches the network.

use std::sync::Mutex;

use async_trait::async_trait;
use db_infra::{ConnSpec, Connector, DbKind};

/// Handle returned by [`RecordingConnector`] on success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedHandle {
    pub kind: DbKind,
    pub dsn: String,
}

/// Records the DSN of every connection attempt; optionally fails each one.
#[derive(Debug, Default)]
pub struct RecordingConnector {
    calls: Mutex<Vec<String>>,
    fail: bool,
}

impl RecordingConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// A connector whose every attempt fails with a pool timeout.
    pub fn failing() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("calls lock").len()
    }
}

#[async_trait]
impl Connector for RecordingConnector {
    type Handle = RecordedHandle;

    async fn connect(&self, spec: &ConnSpec) -> Result<RecordedHandle, sqlx::Error> {
        self.calls.lock().expect("calls lock").push(spec.dsn());
        if self.fail {
            return Err(sqlx::Error::PoolTimedOut);
        }
        Ok(RecordedHandle {
            kind: spec.kind(),
            dsn: spec.dsn(),
        })
    }
}
