//! Command dispatch against the host façade.
//!
//! The dispatcher owns the fixed action table. It never raises on malformed
//! or unknown input: protocol failures degrade to a best-effort fallback or a
//! logged no-op, per the error-handling contract.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::context::ContextParams;
use super::parser::{self, ParsedCommand};
use crate::classifier::{self, ContactBlock};
use crate::config::ConfigHandle;
use crate::entity::{ClassifiedEntity, EntityKind};
use crate::host::SharedHost;

/// Structured result of a `call` command.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CallOutcome {
    /// Whether the page function completed without throwing.
    pub ok: bool,
    /// Return value of the function, when `ok`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    /// Stringified page error, when not `ok`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CallOutcome {
    fn failure(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            result: None,
            error: Some(error.into()),
        }
    }
}

/// Dispatches parsed commands to the host façade.
pub struct Dispatcher {
    host: SharedHost,
    config: ConfigHandle,
    context: Arc<ContextParams>,
}

impl Dispatcher {
    /// Creates a dispatcher bound to `host` and `config`.
    #[must_use]
    pub fn new(host: SharedHost, config: ConfigHandle) -> Self {
        Self {
            host,
            config,
            context: Arc::new(ContextParams::new()),
        }
    }

    /// Dispatches a command-protocol URI.
    ///
    /// Returns the structured outcome for `call` commands; everything else is
    /// fire-and-forget and yields `None` — including malformed and unknown
    /// input, which never errors outward.
    pub fn dispatch(&self, uri: &str) -> Option<CallOutcome> {
        let Some(command) = parser::parse(uri) else {
            debug!("ignoring URI with foreign scheme: {uri}");
            return None;
        };

        let action = command.action.to_ascii_lowercase();
        match action.as_str() {
            "navigate" | "nav" => {
                self.host.navigate(command.params.get("url"));
                self.host.bring_to_front();
                None
            }
            "exec" => {
                self.host.execute_script_async(command.params.get("js"));
                None
            }
            "execres" => {
                // Result intentionally discarded: the command exists for
                // side-effecting scripts that must run to completion.
                let _ = self.host.execute_script_blocking(command.params.get("js"));
                None
            }
            "script" => {
                let name = command.params.get_any(&["name", "script"]);
                let started = self.host.run_script_by_name(name, command.params.get("args"));
                if !started {
                    debug!("script {name:?} not found or failed to start");
                }
                None
            }
            "sethomepage" => {
                self.set_home_page(command.params.get("url"));
                None
            }
            "openentity" | "oe" => {
                let entity = self.entity_from_params(&command);
                self.open_entity(&entity);
                self.host.bring_to_front();
                None
            }
            "call" => Some(self.invoke_call(&command)),
            other => {
                if let Some(kind) = EntityKind::from_action(other) {
                    self.open_entity_from_uri(kind, &command);
                    return None;
                }
                self.fallback(&command)
            }
        }
    }

    /// Terminal entity sink shared by every flow (URI actions, classifier
    /// output routed through URIs, and file-parsed entities).
    pub fn open_entity(&self, entity: &ClassifiedEntity) {
        self.remember(entity);
        self.host.open_entity(entity);
    }

    /// `call`: invoke a named page-global function with JSON positional args.
    fn invoke_call(&self, command: &ParsedCommand) -> CallOutcome {
        let name = command.params.get_any(&["name", "n"]);
        if name.is_empty() {
            return CallOutcome::failure("missing function name");
        }
        let args = command.params.get("args");
        let args = if args.is_empty() { "[]" } else { args };
        if serde_json::from_str::<serde_json::Value>(args).is_err() {
            return CallOutcome::failure(format!("args is not valid JSON: {args}"));
        }

        let js = format!(
            "(async()=>{{try{{const fn=(window['{name}']||{name});\
             const args={args};const val=await fn.apply(window,args);\
             return {{ok:true,result:val}};}}catch(e){{return {{ok:false,error:String(e)}}}}}})()"
        );
        let raw = self.host.execute_script_blocking(&js);
        serde_json::from_str(&raw)
            .unwrap_or_else(|_| CallOutcome::failure(format!("unparseable result: {raw}")))
    }

    /// Unrecognized action: bare `url` or `script` keys still do something
    /// useful; anything else is a silent no-op.
    fn fallback(&self, command: &ParsedCommand) -> Option<CallOutcome> {
        if command.params.has("url") {
            self.host.navigate(command.params.get("url"));
            self.host.bring_to_front();
        } else if command.params.has("script") {
            self.host
                .run_script_by_name(command.params.get("script"), command.params.get("args"));
        } else {
            debug!("no-op for unrecognized command: {:?}", command.action);
        }
        None
    }

    fn set_home_page(&self, url: &str) {
        if url.trim().is_empty() {
            return;
        }
        self.config.write().startup_url = url.trim().to_string();
        if let Err(err) = self.config.persist() {
            tracing::warn!("failed to persist home page: {err}");
        }
    }

    /// Builds the entity for an explicit `openEntity` command.
    ///
    /// Canonical contract: only explicit parameters populate the entity. The
    /// legacy stateful mode (config `compat.statefulEntityFields`) fills
    /// absent parameters from previously accumulated context.
    fn entity_from_params(&self, command: &ParsedCommand) -> ClassifiedEntity {
        let stateful = self.config.read().compat.stateful_entity_fields;
        let param = |key: &str| -> String {
            let explicit = command.params.get(key);
            if stateful {
                self.context.or_stored(explicit, key)
            } else {
                explicit.to_string()
            }
        };

        let entity_type = command.params.get("entityType");
        let kind = EntityKind::from_action(entity_type).unwrap_or(EntityKind::Text);
        ClassifiedEntity::new(kind, command.params.get("entityId"), "uri")
            .with_field("entityType", entity_type)
            .with_field("emailAddress", param("emailAddress"))
            .with_field("phoneNumber", param("phoneNumber"))
            .with_field("address", param("address"))
            .with_field("name", param("name"))
            .with_field("contactName", param("ContactName"))
    }

    /// Entity-kind actions produced by the classifier (and by external
    /// integrations speaking the same URIs).
    fn open_entity_from_uri(&self, kind: EntityKind, command: &ParsedCommand) {
        let value = command.params.get("value");
        let source = command.params.get("source");
        let source = if source.is_empty() { "uri" } else { source };

        let entity = match kind {
            // Contact blocks re-extract their fields from the raw text so
            // URI-triggered and classifier-triggered flows stay identical.
            EntityKind::Contact => ContactBlock::extract(value).into_entity(source),
            // Text that still carries line breaks is a contact block in
            // disguise; classify it the standard way.
            EntityKind::Text if value.contains('\n') || value.contains('\r') => {
                match classifier::classify_content(value, source) {
                    Some(entity) => entity,
                    None => return,
                }
            }
            EntityKind::Address => {
                ClassifiedEntity::new(EntityKind::Address, value.trim(), source)
            }
            _ => ClassifiedEntity::new(kind, value, source),
        };
        self.open_entity(&entity);
    }

    /// Mirrors each opened entity into the legacy context store.
    fn remember(&self, entity: &ClassifiedEntity) {
        let key = match entity.kind {
            EntityKind::Email => "emailAddress",
            EntityKind::Phone => "phoneNumber",
            EntityKind::Website => "website",
            EntityKind::Address => "address",
            EntityKind::Contact => "companyName",
            EntityKind::Text => "textValue",
        };
        self.context.add(key, &entity.primary_value);
        self.context.add("source", &entity.source);
        self.context.add("contentType", entity.kind.as_str());
        for (field, value) in &entity.fields {
            self.context.add(field, value);
        }
    }
}
