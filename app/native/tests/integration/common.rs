//! Common test utilities.

#![allow(dead_code)]

use std::sync::Arc;

use parking_lot::Mutex;
use sidekick_lib::commands::Dispatcher;
use sidekick_lib::config::{ConfigHandle, SidekickConfig};
use sidekick_lib::entity::ClassifiedEntity;
use sidekick_lib::host::{HostFacade, SharedHost};

/// One recorded façade invocation, flattened for assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Navigate(String),
    BringToFront,
    ScriptAsync(String),
    ScriptBlocking(String),
    Entity { kind: String, primary: String, source: String },
    RunScript { name: String, args: String },
}

/// Host façade double recording every call.
#[derive(Debug, Default)]
pub struct TestHost {
    calls: Mutex<Vec<Call>>,
    blocking_response: Mutex<String>,
}

impl TestHost {
    pub fn new() -> Arc<Self> { Arc::new(Self::default()) }

    pub fn set_blocking_response(&self, response: &str) {
        *self.blocking_response.lock() = response.to_string();
    }

    pub fn calls(&self) -> Vec<Call> { self.calls.lock().clone() }

    pub fn entities(&self) -> Vec<Call> {
        self.calls
            .lock()
            .iter()
            .filter(|call| matches!(call, Call::Entity { .. }))
            .cloned()
            .collect()
    }
}

impl HostFacade for TestHost {
    fn navigate(&self, url: &str) { self.calls.lock().push(Call::Navigate(url.to_string())); }

    fn bring_to_front(&self) { self.calls.lock().push(Call::BringToFront); }

    fn execute_script_async(&self, js: &str) {
        self.calls.lock().push(Call::ScriptAsync(js.to_string()));
    }

    fn execute_script_blocking(&self, js: &str) -> String {
        self.calls.lock().push(Call::ScriptBlocking(js.to_string()));
        self.blocking_response.lock().clone()
    }

    fn open_entity(&self, entity: &ClassifiedEntity) {
        self.calls.lock().push(Call::Entity {
            kind: entity.kind.as_str().to_string(),
            primary: entity.primary_value.clone(),
            source: entity.source.clone(),
        });
    }

    fn run_script_by_name(&self, name: &str, args: &str) -> bool {
        self.calls.lock().push(Call::RunScript {
            name: name.to_string(),
            args: args.to_string(),
        });
        true
    }
}

/// Builds a dispatcher over a fresh default config and a recording host.
pub fn dispatcher() -> (Dispatcher, Arc<TestHost>) {
    let host = TestHost::new();
    let dispatcher = Dispatcher::new(
        Arc::clone(&host) as SharedHost,
        ConfigHandle::new(SidekickConfig::default(), None),
    );
    (dispatcher, host)
}
