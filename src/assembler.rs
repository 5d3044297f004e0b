//! Routes segments to their renderers and joins the results.

use crate::layout::{WRAP_WIDTH, fill};
use crate::locale_fix::{fix_punctuation_spacing, map_section_title};
use crate::normalize::{flatten_lines, normalize_for_translation, unhyphenate};
use crate::options::{looks_like_options_block, translate_options_block};
use crate::orchestrator::Orchestrator;
use crate::segment::{Segment, SegmentKind};
use tracing::debug;

/// The most recent section title seen in a document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionState {
    current: Option<String>,
}

impl SectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter(&mut self, title: &str) {
        self.current = Some(title.to_string());
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Command syntax under SYNOPSIS is kept in the source language
    pub fn is_synopsis(&self) -> bool {
        self.current
            .as_deref()
            .is_some_and(|title| title.eq_ignore_ascii_case("SYNOPSIS"))
    }
}

/// Renders a parsed document
///
/// Segments are processed strictly in order, one backend call at a time.
pub struct BlockAssembler<'a> {
    orchestrator: &'a Orchestrator,
}

impl<'a> BlockAssembler<'a> {
    pub fn new(orchestrator: &'a Orchestrator) -> Self {
        Self { orchestrator }
    }

    /// Render every segment and concatenate the output
    pub async fn assemble(&self, segments: &[Segment]) -> String {
        let mut state = SectionState::new();
        let mut out = String::new();
        for segment in segments {
            out.push_str(&self.render(segment, &mut state).await);
        }
        out
    }

    /// Render a single segment, updating the section state
    pub async fn render(&self, segment: &Segment, state: &mut SectionState) -> String {
        match segment.kind {
            SegmentKind::Section => self.render_section(&segment.content, state),
            SegmentKind::Text => self.render_text(&segment.content, state).await,
            SegmentKind::Options => translate_options_block(&segment.content, self.orchestrator).await,
            SegmentKind::Code | SegmentKind::Unset => render_verbatim(&segment.content),
        }
    }

    fn render_section(&self, chunk: &str, state: &mut SectionState) -> String {
        let title = chunk.trim();
        if title.is_empty() {
            return String::new();
        }
        state.enter(title);
        format!(
            "{}\n\n",
            map_section_title(title, self.orchestrator.target_is_spanish())
        )
    }

    async fn render_text(&self, chunk: &str, state: &SectionState) -> String {
        if looks_like_options_block(chunk) {
            debug!("text block looks like an option list");
            return translate_options_block(chunk, self.orchestrator).await;
        }

        let joined = normalize_for_translation(&flatten_lines(&unhyphenate(chunk)));
        if joined.is_empty() {
            return String::new();
        }

        let body = if state.is_synopsis() {
            joined
        } else {
            fix_punctuation_spacing(&self.orchestrator.translate_with_fallback(&joined).await)
        };
        format!("{}\n\n", fill(&body, WRAP_WIDTH, 0))
    }
}

fn render_verbatim(chunk: &str) -> String {
    if chunk.ends_with('\n') {
        chunk.to_string()
    } else {
        format!("{}\n", chunk)
    }
}
