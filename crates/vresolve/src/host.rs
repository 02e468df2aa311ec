//! Render-queue setup against a host application.
//!
//! The compositing application is reached only through the [`ProjectHost`]
//! capability trait: it reports which compositions exist, which are selected
//! or active, and accepts render items with an output path. The resolver
//! itself never sees the host.
//!
//! [`queue_renders`] is the whole dailies flow: choose compositions, snapshot
//! the target folder, resolve one versioned name per composition, and queue
//! each one with its output path.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::listing::{ListingError, ListingSource};
use crate::resolver::{ResolvedName, VersionResolver};

/// A composition as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composition {
    /// Host-assigned identifier.
    pub id: u32,
    /// Display name; becomes the output stem.
    pub name: String,
}

impl Composition {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Capabilities the render-queue setup needs from the host application.
pub trait ProjectHost {
    /// Every composition in the project.
    fn list_compositions(&self) -> Vec<Composition>;

    /// Compositions selected in the project panel, in selection order.
    fn selected_compositions(&self) -> Vec<Composition>;

    /// The composition open in the viewer, if any.
    fn active_composition(&self) -> Option<Composition>;

    /// Add `comp` to the render queue writing to `output_path`.
    fn add_render_item(&mut self, comp: &Composition, output_path: &Path) -> Result<(), String>;
}

/// Which compositions to queue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CompSelection {
    /// Selected compositions, falling back to the active one.
    #[default]
    SelectedOrActive,
    /// Every composition in the project.
    All,
}

/// Options for [`queue_renders`].
#[derive(Debug, Clone, Default)]
pub struct QueueOptions {
    pub selection: CompSelection,
    /// Extension appended to composition names before resolving, e.g. `.mov`.
    pub extension: Option<String>,
}

impl QueueOptions {
    pub fn with_selection(mut self, selection: CompSelection) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into());
        self
    }
}

/// A render item that was added to the host queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedRender {
    pub composition: Composition,
    pub resolved: ResolvedName,
    pub output_path: PathBuf,
}

#[derive(Debug, Error)]
pub enum QueueError {
    #[error("no composition selected or active")]
    NoComposition,

    #[error(transparent)]
    Listing(#[from] ListingError),

    #[error("host rejected render item for '{comp}': {message}")]
    Host { comp: String, message: String },
}

/// Queue versioned renders for the chosen compositions into `folder`.
///
/// Names are resolved as a batch, so two compositions with the same name
/// get different versions. A host failure stops the run; items queued
/// before it stay queued.
pub fn queue_renders<H, S>(
    host: &mut H,
    source: &S,
    folder: &Path,
    resolver: &VersionResolver,
    options: &QueueOptions,
) -> Result<Vec<QueuedRender>, QueueError>
where
    H: ProjectHost + ?Sized,
    S: ListingSource + ?Sized,
{
    let comps = choose_compositions(&*host, options.selection);
    if comps.is_empty() {
        return Err(QueueError::NoComposition);
    }
    debug!("Queueing {} composition(s) into {}", comps.len(), folder.display());

    let listing = source.list(folder)?;
    let extension = options.extension.as_deref().unwrap_or("");
    let requested: Vec<String> = comps
        .iter()
        .map(|c| format!("{}{extension}", c.name))
        .collect();
    let resolved = resolver.resolve_batch(&listing, requested.iter().map(String::as_str));

    let mut queued = Vec::with_capacity(comps.len());
    for (comp, resolved) in comps.into_iter().zip(resolved) {
        let output_path = folder.join(&resolved.file_name);
        host.add_render_item(&comp, &output_path)
            .map_err(|message| QueueError::Host {
                comp: comp.name.clone(),
                message,
            })?;
        info!("Queued {} -> {}", comp.name, output_path.display());
        queued.push(QueuedRender {
            composition: comp,
            resolved,
            output_path,
        });
    }
    Ok(queued)
}

fn choose_compositions<H: ProjectHost + ?Sized>(host: &H, selection: CompSelection) -> Vec<Composition> {
    match selection {
        CompSelection::All => host.list_compositions(),
        CompSelection::SelectedOrActive => {
            let selected = host.selected_compositions();
            if selected.is_empty() {
                host.active_composition().into_iter().collect()
            } else {
                selected
            }
        }
    }
}

/// In-memory host holding a fixed project and recording queued items.
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    comps: Vec<Composition>,
    selected: Vec<u32>,
    active: Option<u32>,
    queue: Vec<(Composition, PathBuf)>,
}

impl MemoryHost {
    pub fn new(comps: Vec<Composition>) -> Self {
        Self {
            comps,
            ..Self::default()
        }
    }

    /// Select compositions by id, in the given order.
    pub fn with_selected(mut self, ids: &[u32]) -> Self {
        self.selected = ids.to_vec();
        self
    }

    pub fn with_active(mut self, id: u32) -> Self {
        self.active = Some(id);
        self
    }

    /// Render items added so far.
    pub fn queue(&self) -> &[(Composition, PathBuf)] {
        &self.queue
    }

    fn find(&self, id: u32) -> Option<Composition> {
        self.comps.iter().find(|c| c.id == id).cloned()
    }
}

impl ProjectHost for MemoryHost {
    fn list_compositions(&self) -> Vec<Composition> {
        self.comps.clone()
    }

    fn selected_compositions(&self) -> Vec<Composition> {
        self.selected.iter().filter_map(|&id| self.find(id)).collect()
    }

    fn active_composition(&self) -> Option<Composition> {
        self.active.and_then(|id| self.find(id))
    }

    fn add_render_item(&mut self, comp: &Composition, output_path: &Path) -> Result<(), String> {
        if self.find(comp.id).is_none() {
            return Err(format!("unknown composition id {}", comp.id));
        }
        self.queue.push((comp.clone(), output_path.to_path_buf()));
        Ok(())
    }
}
