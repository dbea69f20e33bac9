use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::config::DashboardConfig;
use crate::data::aggregate::{filter_and_aggregate, Aggregation};
use crate::data::base_filter::base_filter;
use crate::data::loader::load_file;
use crate::data::model::{Dimension, PlayTable};
use crate::data::options::widget_options;
use crate::data::selection::SelectionState;

// ---------------------------------------------------------------------------
// Season data: loaded once, read-only afterwards
// ---------------------------------------------------------------------------

/// A cleaned season and the widget options derived from it.
#[derive(Debug, Clone)]
pub struct SeasonData {
    pub source: PathBuf,
    /// Plays in the file before cleaning.
    pub raw_plays: usize,
    /// Real passes by passers above the sample-size threshold.
    pub plays: PlayTable,
    pub options: BTreeMap<Dimension, Vec<String>>,
}

impl SeasonData {
    pub fn from_table(source: PathBuf, raw: &PlayTable, min_plays: usize) -> Self {
        let plays = base_filter(raw, min_plays);
        let options = Dimension::ALL
            .into_iter()
            .map(|d| (d, widget_options(&plays, d)))
            .collect();
        log::info!(
            "{} of {} plays kept as qualifying passes",
            plays.len(),
            raw.len()
        );
        SeasonData {
            source,
            raw_plays: raw.len(),
            plays,
            options,
        }
    }

    pub fn load(path: &Path, min_plays: usize) -> Result<Self> {
        let raw = load_file(path)?;
        Ok(Self::from_table(path.to_path_buf(), &raw, min_plays))
    }

    pub fn options(&self, dimension: Dimension) -> &[String] {
        self.options
            .get(&dimension)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Loaded season (None until a file is loaded).
    pub data: Option<SeasonData>,

    /// Current widget choices.
    pub selection: SelectionState,

    /// Summary for the current selection (cached).
    pub summary: Option<Aggregation>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a file loading operation is in progress.
    pub loading: bool,
}

impl AppState {
    pub fn new(config: DashboardConfig, data: Option<SeasonData>) -> Self {
        let mut state = Self {
            config,
            data: None,
            selection: SelectionState::default(),
            summary: None,
            status_message: None,
            loading: false,
        };
        if let Some(data) = data {
            state.set_data(data);
        }
        state
    }

    /// Ingest a newly loaded season and reset the widgets.
    pub fn set_data(&mut self, data: SeasonData) {
        self.data = Some(data);
        self.selection = SelectionState::default();
        self.status_message = None;
        self.loading = false;
        self.refresh();
    }

    /// Load a file chosen in the UI. Failures are reported in the status line.
    pub fn open_file(&mut self, path: &Path) {
        self.loading = true;
        match SeasonData::load(path, self.config.min_plays_per_passer) {
            Ok(data) => self.set_data(data),
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
                self.loading = false;
            }
        }
    }

    /// Recompute the summary after a selection change.
    pub fn refresh(&mut self) {
        self.summary = self
            .data
            .as_ref()
            .map(|d| filter_and_aggregate(&d.plays, &self.selection));
    }

    /// Toggle a single option in a dimension's selection.
    pub fn toggle(&mut self, dimension: Dimension, value: &str) {
        self.selection.toggle(dimension, value);
        self.refresh();
    }

    /// Tick every option of a dimension.
    pub fn select_all(&mut self, dimension: Dimension) {
        if let Some(data) = &self.data {
            self.selection
                .set(dimension, data.options(dimension).to_vec());
            self.refresh();
        }
    }

    /// Untick every option of a dimension.
    pub fn select_none(&mut self, dimension: Dimension) {
        self.selection.clear(dimension);
        self.refresh();
    }
}
