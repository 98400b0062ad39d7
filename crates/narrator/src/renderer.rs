//! The stateful battle narrator.
//!
//! A [`Renderer`] consumes protocol events one at a time, in stream order,
//! and writes one chunk of narration per event to its [`OutputSink`].

use std::cell::OnceCell;
use std::sync::Arc;

use battle_protocol::{parse_log, Event, InvalidPerspective, Perspective, Side};

use crate::config::RendererConfig;
use crate::handlers::{dispatch, Narration};
use crate::lowercase::LowercaseFixer;
use crate::section::{classify, LineSection, SectionTracker};
use crate::sink::{OutputSink, Transcript};
use crate::templates::TemplateStore;

/// Errors raised while building a renderer.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("renderer needs an output sink")]
    MissingSink,
    #[error(transparent)]
    InvalidPerspective(#[from] InvalidPerspective),
}

/// State carried between events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RendererState {
    pub(crate) player1: String,
    pub(crate) player2: String,
    pub(crate) generation: u8,
    pub(crate) sections: SectionTracker,
}

impl Default for RendererState {
    fn default() -> Self {
        Self::from_config(&RendererConfig::default())
    }
}

impl RendererState {
    fn from_config(config: &RendererConfig) -> Self {
        Self {
            player1: config.player1.clone(),
            player2: config.player2.clone(),
            generation: config.generation,
            sections: SectionTracker::new(),
        }
    }

    pub fn player_name(&self, side: Side) -> &str {
        match side {
            Side::P1 => &self.player1,
            Side::P2 => &self.player2,
        }
    }

    pub fn generation(&self) -> u8 {
        self.generation
    }

    pub fn section(&self) -> LineSection {
        self.sections.current()
    }
}

/// Turns protocol events into narration.
///
/// Not shareable across threads; each stream gets its own renderer. The
/// template store is shared and read-only.
#[derive(Debug)]
pub struct Renderer<S: OutputSink> {
    sink: S,
    templates: Arc<TemplateStore>,
    perspective: Perspective,
    state: RendererState,
    /// Built from the templates on first use
    lowercase: OnceCell<LowercaseFixer>,
}

impl<S: OutputSink> Renderer<S> {
    /// Creates a renderer with the bundled English templates.
    pub fn new(sink: S, perspective: Perspective) -> Self {
        Self::with_templates(sink, perspective, TemplateStore::bundled())
    }

    pub fn with_templates(
        sink: S,
        perspective: Perspective,
        templates: Arc<TemplateStore>,
    ) -> Self {
        Self::from_parts(sink, perspective, templates, RendererState::default())
    }

    pub fn builder() -> RendererBuilder<S> {
        RendererBuilder::new()
    }

    fn from_parts(
        sink: S,
        perspective: Perspective,
        templates: Arc<TemplateStore>,
        state: RendererState,
    ) -> Self {
        tracing::debug!(
            "Renderer created for perspective {} with {} template namespaces",
            perspective.index(),
            templates.namespace_count()
        );
        Self {
            sink,
            templates,
            perspective,
            state,
            lowercase: OnceCell::new(),
        }
    }

    /// Renders one event.
    ///
    /// Unknown commands produce no output and leave the state untouched.
    /// The sink is only called when there is something to write.
    pub fn render(&mut self, event: &Event) {
        let Some(command) = event.known_command() else {
            tracing::trace!("Skipping unsupported command {:?}", event.command);
            return;
        };

        let text = {
            let mut cx = Narration {
                templates: &self.templates,
                perspective: self.perspective,
                state: &mut self.state,
            };
            dispatch(&mut cx, command, event)
        };

        let templates = &self.templates;
        let fixer = self
            .lowercase
            .get_or_init(|| LowercaseFixer::from_templates(templates));
        let text = fixer.apply(&text);

        let mut chunk = String::with_capacity(text.len() + 1);
        if self.state.sections.advance(classify(command, event)) {
            chunk.push('\n');
        }
        chunk.push_str(&text);

        if !chunk.is_empty() {
            self.sink.write(&chunk);
        }
    }

    /// Parses and renders one protocol line. Returns false if the line
    /// carried no event.
    pub fn render_line(&mut self, line: &str) -> bool {
        match Event::parse_line(line) {
            Some(event) => {
                self.render(&event);
                true
            }
            None => false,
        }
    }

    /// Renders every event in a protocol log, returning how many were seen.
    pub fn render_log(&mut self, log: &str) -> usize {
        let events = parse_log(log);
        for event in &events {
            self.render(event);
        }
        events.len()
    }

    pub fn state(&self) -> &RendererState {
        &self.state
    }

    pub fn perspective(&self) -> Perspective {
        self.perspective
    }

    pub fn templates(&self) -> &Arc<TemplateStore> {
        &self.templates
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

/// Builds a [`Renderer`] from configuration.
#[derive(Debug)]
pub struct RendererBuilder<S> {
    sink: Option<S>,
    perspective: u8,
    templates: Option<Arc<TemplateStore>>,
    config: RendererConfig,
}

impl<S> Default for RendererBuilder<S> {
    fn default() -> Self {
        Self {
            sink: None,
            perspective: 0,
            templates: None,
            config: RendererConfig::default(),
        }
    }
}

impl<S: OutputSink> RendererBuilder<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sink(mut self, sink: S) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn perspective(mut self, perspective: Perspective) -> Self {
        self.perspective = perspective.index();
        self
    }

    /// Sets the perspective from its numeric form, checked at build time.
    pub fn perspective_index(mut self, index: u8) -> Self {
        self.perspective = index;
        self
    }

    pub fn templates(mut self, templates: Arc<TemplateStore>) -> Self {
        self.templates = Some(templates);
        self
    }

    /// Applies renderer settings. The configured perspective replaces any
    /// set earlier.
    pub fn config(mut self, config: &RendererConfig) -> Self {
        self.perspective = config.perspective.index();
        self.config = config.clone();
        self
    }

    pub fn build(self) -> Result<Renderer<S>, RenderError> {
        let sink = self.sink.ok_or(RenderError::MissingSink)?;
        let perspective = Perspective::try_from(self.perspective)?;
        let templates = self.templates.unwrap_or_else(TemplateStore::bundled);
        let state = RendererState::from_config(&self.config);
        Ok(Renderer::from_parts(sink, perspective, templates, state))
    }
}

/// Narrates a whole protocol log with the bundled templates.
pub fn narrate(log: &str, perspective: Perspective) -> String {
    let mut renderer = Renderer::new(Transcript::new(), perspective);
    renderer.render_log(log);
    renderer.into_sink().into_string()
}
