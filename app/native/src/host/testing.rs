//! Test double for the host façade.

use parking_lot::Mutex;

use super::HostFacade;
use crate::entity::ClassifiedEntity;

/// One recorded façade invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    Navigate(String),
    BringToFront,
    ExecuteScriptAsync(String),
    ExecuteScriptBlocking(String),
    OpenEntity(ClassifiedEntityCall),
    RunScript { name: String, args: String },
}

/// Entity data captured by [`HostCall::OpenEntity`].
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedEntityCall {
    pub kind: String,
    pub primary_value: String,
    pub source: String,
    pub fields: Vec<(String, String)>,
}

impl From<&ClassifiedEntity> for ClassifiedEntityCall {
    fn from(entity: &ClassifiedEntity) -> Self {
        let mut fields: Vec<(String, String)> = entity
            .fields
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        fields.sort();
        Self {
            kind: entity.kind.as_str().to_string(),
            primary_value: entity.primary_value.clone(),
            source: entity.source.clone(),
            fields,
        }
    }
}

/// Records every façade call for assertions.
#[derive(Debug, Default)]
pub struct RecordingHost {
    calls: Mutex<Vec<HostCall>>,
    blocking_response: Mutex<String>,
    script_found: Mutex<bool>,
}

impl RecordingHost {
    /// Creates a recorder whose blocking script calls return `""`.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Sets the response returned by `execute_script_blocking`.
    pub fn set_blocking_response(&self, response: impl Into<String>) {
        *self.blocking_response.lock() = response.into();
    }

    /// Sets the result of `run_script_by_name`.
    pub fn set_script_found(&self, found: bool) { *self.script_found.lock() = found; }

    /// Snapshot of all recorded calls.
    #[must_use]
    pub fn calls(&self) -> Vec<HostCall> { self.calls.lock().clone() }

    fn record(&self, call: HostCall) { self.calls.lock().push(call); }
}

impl HostFacade for RecordingHost {
    fn navigate(&self, url: &str) { self.record(HostCall::Navigate(url.to_string())); }

    fn bring_to_front(&self) { self.record(HostCall::BringToFront); }

    fn execute_script_async(&self, js: &str) {
        self.record(HostCall::ExecuteScriptAsync(js.to_string()));
    }

    fn execute_script_blocking(&self, js: &str) -> String {
        self.record(HostCall::ExecuteScriptBlocking(js.to_string()));
        self.blocking_response.lock().clone()
    }

    fn open_entity(&self, entity: &ClassifiedEntity) {
        self.record(HostCall::OpenEntity(entity.into()));
    }

    fn run_script_by_name(&self, name: &str, args: &str) -> bool {
        self.record(HostCall::RunScript {
            name: name.to_string(),
            args: args.to_string(),
        });
        *self.script_found.lock()
    }
}
