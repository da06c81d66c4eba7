//! `gram tag` command implementation.

use std::path::PathBuf;

use clap::Args;
use gram_config::{CliSettings, Config};
use gram_tag::{GRAM_TAG, GramOptions, GramTag, parse_directive};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the tag command.
#[derive(Args)]
pub(crate) struct TagArgs {
    /// Directive markup, with or without the surrounding `{% gram ... %}`.
    markup: String,

    /// Path to configuration file (default: auto-discover gram.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Media endpoint base URL (overrides config).
    #[arg(long, env = "GRAM_BASE_URL")]
    base_url: Option<String>,

    /// Timeout for the media lookup in seconds (overrides config).
    #[arg(long)]
    timeout: Option<u64>,

    /// Print the parsed fields as JSON instead of resolving the media URL.
    #[arg(long)]
    parse_only: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl TagArgs {
    /// Execute the tag command.
    ///
    /// # Errors
    ///
    /// Returns an error if the directive is malformed, configuration fails,
    /// or the media cannot be resolved.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let markup = directive_markup(&self.markup)?;

        if self.parse_only {
            let fields = parse_directive(markup)?;
            output.result(&serde_json::to_string_pretty(&fields)?)?;
            return Ok(());
        }

        let cli_settings = CliSettings {
            base_url: self.base_url,
            timeout_secs: self.timeout,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let gram = GramTag::new(
            GramOptions {
                base_url: config.media.base_url.clone(),
                escape_attributes: config.media.escape_attributes,
            },
            config.media.timeout(),
        );
        let html = gram.render_markup(markup)?;
        output.result(&html)?;
        Ok(())
    }
}

/// Extract the markup from a full `{% gram ... %}` directive.
///
/// Input that does not start with `{%` is returned trimmed.
fn directive_markup(input: &str) -> Result<&str, CliError> {
    let input = input.trim();
    let Some(inner) = input.strip_prefix("{%") else {
        return Ok(input);
    };
    let inner = inner
        .strip_suffix("%}")
        .ok_or_else(|| CliError::Validation("Unterminated directive: missing %}".to_owned()))?
        .trim();

    match inner.strip_prefix(GRAM_TAG) {
        Some(rest) if rest.is_empty() || rest.starts_with(char::is_whitespace) => Ok(rest.trim()),
        _ => Err(CliError::Validation(format!(
            "Expected a {{% {GRAM_TAG} %}} directive, got: {input}"
        ))),
    }
}
