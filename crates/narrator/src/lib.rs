//! Battle narrator: protocol events in, play-by-play text out.
//!
//! The narrator sits at the end of a battle stream. It reads protocol
//! events one at a time and writes readable commentary from one player's
//! point of view, the way a spectator log reads.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────┐   Event    ┌──────────┐   template   ┌──────────────┐   chunk   ┌──────┐
//! │  protocol  │ ─────────▶ │ handlers │ ───────────▶ │ lowercase +  │ ────────▶ │ sink │
//! │   stream   │            │          │  + subst.    │   sections   │           │      │
//! └────────────┘            └──────────┘              └──────────────┘           └──────┘
//! ```
//!
//! # Modules
//!
//! - [`templates`]: Namespaced template dictionary and candidate resolution
//! - [`substitute`]: Ordered placeholder substitution
//! - [`section`]: Paragraph sections and blank-line rules
//! - [`lowercase`]: Sentence-initial capitalization of pronoun templates
//! - [`sink`]: Output sinks
//! - [`renderer`]: The stateful renderer and its builder
//! - [`config`]: TOML configuration

pub mod config;
mod handlers;
pub mod lowercase;
pub mod renderer;
pub mod section;
pub mod sink;
pub mod substitute;
pub mod templates;

// Re-export renderer types
pub use renderer::{narrate, RenderError, Renderer, RendererBuilder, RendererState};

// Re-export config types
pub use config::{default_config_toml, ConfigError, NarratorConfig, RendererConfig, TemplatesConfig};

// Re-export template types
pub use templates::{
    bundled_templates_toml, Candidate, TemplateError, TemplateStore, DEFAULT_NAMESPACE,
};

// Re-export output types
pub use section::{LineSection, SectionTracker};
pub use sink::{OutputSink, Transcript, WriterSink};
pub use substitute::{Placeholder, Substitutions};

use std::path::Path;

/// Errors that can occur in narrator operations.
#[derive(Debug)]
pub enum NarratorError {
    /// Error loading configuration
    Config(ConfigError),
    /// Error loading templates
    Template(TemplateError),
    /// Error building the renderer
    Render(RenderError),
}

impl std::fmt::Display for NarratorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NarratorError::Config(e) => write!(f, "Config error: {}", e),
            NarratorError::Template(e) => write!(f, "Template error: {}", e),
            NarratorError::Render(e) => write!(f, "Renderer error: {}", e),
        }
    }
}

impl std::error::Error for NarratorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NarratorError::Config(e) => Some(e),
            NarratorError::Template(e) => Some(e),
            NarratorError::Render(e) => Some(e),
        }
    }
}

impl From<ConfigError> for NarratorError {
    fn from(e: ConfigError) -> Self {
        NarratorError::Config(e)
    }
}

impl From<TemplateError> for NarratorError {
    fn from(e: TemplateError) -> Self {
        NarratorError::Template(e)
    }
}

impl From<RenderError> for NarratorError {
    fn from(e: RenderError) -> Self {
        NarratorError::Render(e)
    }
}

/// Builds a renderer from a configuration file, loading any override
/// templates it names.
pub fn renderer_from_config_file<S: OutputSink>(
    path: &Path,
    sink: S,
) -> Result<Renderer<S>, NarratorError> {
    let config = NarratorConfig::from_file(path)?;
    renderer_from_config(&config, sink)
}

/// Builds a renderer from loaded configuration.
pub fn renderer_from_config<S: OutputSink>(
    config: &NarratorConfig,
    sink: S,
) -> Result<Renderer<S>, NarratorError> {
    let templates = config.load_templates()?;
    let renderer = Renderer::builder()
        .sink(sink)
        .templates(templates)
        .config(&config.renderer)
        .build()?;
    Ok(renderer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_protocol::Perspective;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_renderer_from_default_config() {
        let renderer = renderer_from_config(&NarratorConfig::default(), Transcript::new()).unwrap();
        assert_eq!(renderer.perspective(), Perspective::P1);
        assert!(renderer.templates().has_namespace(DEFAULT_NAMESPACE));
    }

    #[test]
    fn test_renderer_from_config_file_with_override_templates() {
        let mut templates = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            templates,
            r#"{{"default": {{"turn": "-- Round [NUMBER] --", "pokemon": "[NICKNAME]"}}}}"#
        )
        .unwrap();

        let mut config = NamedTempFile::new().unwrap();
        write!(
            config,
            "[renderer]\nperspective = 1\n\n[templates]\npath = {:?}\n",
            templates.path()
        )
        .unwrap();

        let mut renderer = renderer_from_config_file(config.path(), Transcript::new()).unwrap();
        assert_eq!(renderer.perspective(), Perspective::P2);
        renderer.render_line("|turn|4");
        assert_eq!(renderer.sink().text(), "-- Round 4 --\n\n");
    }

    #[test]
    fn test_config_errors_surface() {
        let missing = renderer_from_config_file(
            Path::new("/nonexistent/narrator.toml"),
            Transcript::new(),
        );
        assert!(matches!(missing, Err(NarratorError::Config(ConfigError::Io(_)))));

        let bad_templates = NarratorConfig {
            templates: TemplatesConfig {
                path: Some("/nonexistent/text.toml".into()),
            },
            ..NarratorConfig::default()
        };
        let err = renderer_from_config(&bad_templates, Transcript::new()).unwrap_err();
        assert!(matches!(err, NarratorError::Template(TemplateError::Io(_))));
        assert!(err.to_string().starts_with("Template error:"));
    }

    #[test]
    fn test_bad_perspective_in_config_is_rejected() {
        let err = NarratorConfig::from_str("[renderer]\nperspective = 3\n").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }
}
