//! CLI argument definitions using Clap.

use clap::Parser;

use crate::core::constants::{APP_VERSION, URI_SCHEME};

/// Sidekick - a desktop companion shell that turns activations into
/// structured host actions.
#[derive(Parser, Debug, Default)]
#[command(name = "sidekick")]
#[command(author, version = APP_VERSION, about, long_about = None)]
pub struct Cli {
    /// Command-protocol URI to dispatch after startup
    /// (e.g. `sidekick://navigate?url=https://example.test`).
    pub uri: Option<String>,

    /// URL to open instead of the configured home page.
    #[arg(long)]
    pub url: Option<String>,

    /// Print the JSON Schema for the configuration file and exit.
    ///
    /// Redirect to a file for editors that support JSON Schema validation.
    #[arg(long = "generate-schema")]
    pub generate_schema: bool,
}

impl Cli {
    /// The startup URI argument, when it carries our scheme.
    #[must_use]
    pub fn command_uri(&self) -> Option<&str> {
        self.uri.as_deref().filter(|uri| {
            uri.get(..URI_SCHEME.len())
                .is_some_and(|scheme| scheme.eq_ignore_ascii_case(URI_SCHEME))
        })
    }
}
