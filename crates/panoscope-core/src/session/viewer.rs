use std::time::Duration;

use tracing::{info, warn};

use crate::config::ViewerConfig;
use crate::error::{PanoError, Result};
use crate::io::{CatalogEntry, PanoramaSource};
use crate::orientation::OrientationSample;

use super::panorama::PanoramaSession;
use super::types::{BuildReporter, BuildStage, FrameReport, ViewerEvent};

/// Lifecycle of the viewer.
pub enum ViewerState {
    /// Nothing selected yet.
    Idle,
    /// A panorama is being fetched and sliced; frames are refused.
    Loading { id: u32 },
    Ready(Box<PanoramaSession>),
    /// The last session was dropped; a new selection is needed.
    TornDown,
}

impl ViewerState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading { .. } => "loading",
            Self::Ready(_) => "ready",
            Self::TornDown => "torn down",
        }
    }
}

/// Selects panoramas and drives the ready session frame by frame.
pub struct Viewer {
    config: ViewerConfig,
    state: ViewerState,
    catalog: Vec<CatalogEntry>,
}

impl Viewer {
    pub fn new(config: ViewerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            state: ViewerState::Idle,
            catalog: Vec::new(),
        })
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, ViewerState::Ready(_))
    }

    pub fn catalog(&self) -> &[CatalogEntry] {
        &self.catalog
    }

    pub fn refresh_catalog(&mut self, source: &dyn PanoramaSource) -> Result<&[CatalogEntry]> {
        self.catalog = source.catalog()?;
        info!(entries = self.catalog.len(), "Catalog loaded");
        Ok(&self.catalog)
    }

    /// Select a panorama and build its session.
    ///
    /// An id missing from the catalog is rejected before anything changes.
    /// Any running session is dropped before loading starts, and a failed
    /// load leaves the viewer torn down rather than ready.
    pub fn select(
        &mut self,
        source: &dyn PanoramaSource,
        id: u32,
        reporter: &dyn BuildReporter,
    ) -> Result<&mut PanoramaSession> {
        if self.catalog.is_empty() {
            self.refresh_catalog(source)?;
        }
        if !self.catalog.iter().any(|e| e.id == id) {
            return Err(PanoError::InvalidSelection { id });
        }

        self.state = ViewerState::Loading { id };
        info!(id, "Loading panorama");

        reporter.begin_stage(BuildStage::Loading, None);
        let loaded = source.load(id);
        reporter.finish_stage();
        let built = loaded.and_then(|asset| PanoramaSession::build(asset, &self.config, reporter));

        match built {
            Ok(session) => {
                self.state = ViewerState::Ready(Box::new(session));
                match &mut self.state {
                    ViewerState::Ready(session) => Ok(&mut **session),
                    _ => Err(PanoError::NotReady),
                }
            }
            Err(e) => {
                warn!(id, "Panorama failed to load: {e}");
                self.state = ViewerState::TornDown;
                Err(e)
            }
        }
    }

    pub fn session(&self) -> Option<&PanoramaSession> {
        match &self.state {
            ViewerState::Ready(session) => Some(&**session),
            _ => None,
        }
    }

    pub fn session_mut(&mut self) -> Option<&mut PanoramaSession> {
        match &mut self.state {
            ViewerState::Ready(session) => Some(&mut **session),
            _ => None,
        }
    }

    pub fn frame(&mut self, sample: OrientationSample, now: Duration) -> Result<FrameReport> {
        let session = self.session_mut().ok_or(PanoError::NotReady)?;
        Ok(session.frame(sample, now))
    }

    pub fn handle(&mut self, event: ViewerEvent, now: Duration) -> Result<()> {
        if event == ViewerEvent::SwitchPanorama {
            self.switch_panorama();
            return Ok(());
        }
        let session = self.session_mut().ok_or(PanoError::NotReady)?;
        session.handle(event, now);
        Ok(())
    }

    /// Drop the running session and every tile it owns.
    pub fn switch_panorama(&mut self) {
        if let ViewerState::Ready(session) = &self.state {
            info!(id = session.id(), "Tearing down panorama");
        }
        self.state = ViewerState::TornDown;
    }
}
