//! Configuration surface for the middleware wrapper.

use traceline_foundation::{
    ActionTransformer, FilterSpec, LevelSpec, StateTransformer, identity_action_transformer,
    identity_state_transformer,
};
use traceline_sink::{Collapse, ColorScheme, PosterConfig, PrinterConfig};

// =============================================================================
// Poster Options
// =============================================================================

/// Filtering and level criteria for the remote poster sink, independent of
/// the printer's.
#[derive(Clone)]
pub struct PosterOptions {
    /// Actions eligible for posting.
    pub filter: FilterSpec,
    /// Severity specification for the posted facets. The default
    /// passthrough includes each facet when its value is truthy, making
    /// errors visible exactly when present.
    pub level: LevelSpec,
}

impl Default for PosterOptions {
    fn default() -> Self {
        Self {
            filter: FilterSpec::default(),
            level: LevelSpec::passthrough(),
        }
    }
}

impl PosterOptions {
    /// Creates the default poster options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the poster filter.
    #[must_use]
    pub fn with_filter(mut self, filter: FilterSpec) -> Self {
        self.filter = filter;
        self
    }

    /// Builder method to set the poster level specification.
    #[must_use]
    pub fn with_level(mut self, level: LevelSpec) -> Self {
        self.level = level;
        self
    }
}

// =============================================================================
// Logger Options
// =============================================================================

/// The full configuration surface, merged over defaults.
#[derive(Clone)]
pub struct LoggerOptions {
    /// Severity specification for the printer's facets (default: plain
    /// `log` for every facet).
    pub level: LevelSpec,
    /// Whether printed groups start collapsed (default: expanded).
    pub collapsed: Collapse,
    /// Print the reducer duration in the title (default: true).
    pub duration: bool,
    /// Print the wall-clock timestamp in the title (default: true).
    pub timestamp: bool,
    /// Transformer applied to state snapshots before recording (default:
    /// identity).
    pub state_transformer: StateTransformer,
    /// Transformer applied to actions before display and posting (default:
    /// identity).
    pub action_transformer: ActionTransformer,
    /// Actions eligible for the printer sink (default: everything).
    pub filter: FilterSpec,
    /// Whether color hints are applied at all. Decided by the caller at
    /// construction time; there is no environment sniffing.
    pub colors_enabled: bool,
    /// Per-facet color functions (default: the standard scheme).
    pub colors: ColorScheme,
    /// Criteria for the remote poster sink.
    pub poster_options: PosterOptions,
}

impl Default for LoggerOptions {
    fn default() -> Self {
        Self {
            level: LevelSpec::default(),
            collapsed: Collapse::default(),
            duration: true,
            timestamp: true,
            state_transformer: identity_state_transformer(),
            action_transformer: identity_action_transformer(),
            filter: FilterSpec::default(),
            colors_enabled: true,
            colors: ColorScheme::standard(),
            poster_options: PosterOptions::default(),
        }
    }
}

impl LoggerOptions {
    /// Creates the default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the printer level specification.
    #[must_use]
    pub fn with_level(mut self, level: LevelSpec) -> Self {
        self.level = level;
        self
    }

    /// Builder method to set the collapse behavior.
    #[must_use]
    pub fn with_collapsed(mut self, collapsed: Collapse) -> Self {
        self.collapsed = collapsed;
        self
    }

    /// Builder method to toggle the duration segment.
    #[must_use]
    pub fn with_duration(mut self, duration: bool) -> Self {
        self.duration = duration;
        self
    }

    /// Builder method to toggle the timestamp segment.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: bool) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Builder method to set the state transformer.
    #[must_use]
    pub fn with_state_transformer(mut self, transformer: StateTransformer) -> Self {
        self.state_transformer = transformer;
        self
    }

    /// Builder method to set the action transformer.
    #[must_use]
    pub fn with_action_transformer(mut self, transformer: ActionTransformer) -> Self {
        self.action_transformer = transformer;
        self
    }

    /// Builder method to set the printer filter.
    #[must_use]
    pub fn with_filter(mut self, filter: FilterSpec) -> Self {
        self.filter = filter;
        self
    }

    /// Builder method to set the color scheme.
    #[must_use]
    pub fn with_colors(mut self, colors: ColorScheme) -> Self {
        self.colors = colors;
        self
    }

    /// Builder method to disable color hints entirely.
    #[must_use]
    pub fn without_colors(mut self) -> Self {
        self.colors_enabled = false;
        self
    }

    /// Builder method to set the poster options.
    #[must_use]
    pub fn with_poster_options(mut self, poster_options: PosterOptions) -> Self {
        self.poster_options = poster_options;
        self
    }

    /// Derives the printer configuration from these options.
    #[must_use]
    pub fn printer_config(&self) -> PrinterConfig {
        let colors = if self.colors_enabled {
            self.colors.clone()
        } else {
            ColorScheme::disabled()
        };
        PrinterConfig::new()
            .with_level(self.level.clone())
            .with_collapsed(self.collapsed.clone())
            .with_duration(self.duration)
            .with_timestamp(self.timestamp)
            .with_colors(colors)
            .with_action_transformer(self.action_transformer.clone())
    }

    /// Derives the poster configuration from these options.
    #[must_use]
    pub fn poster_config(&self) -> PosterConfig {
        PosterConfig::new()
            .with_level(self.poster_options.level.clone())
            .with_timestamp(self.timestamp)
            .with_duration(self.duration)
            .with_action_transformer(self.action_transformer.clone())
    }
}

// =============================================================================
// Tests
// =============================================================================
