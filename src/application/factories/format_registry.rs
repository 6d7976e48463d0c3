use crate::adapters::outbound::formatters::{JsonFormatter, MarkdownFormatter, TextFormatter};
use crate::ports::outbound::{RenderSettings, ReportFormat};
use crate::shared::error::AuditError;
use crate::shared::Result;
use std::collections::BTreeMap;

/// Builds a format instance for one invocation
pub type FormatConstructor = Box<dyn Fn(RenderSettings) -> Box<dyn ReportFormat>>;

/// Registry of report formats keyed by identifier
///
/// The dispatcher only resolves names through it; formats are added by
/// registering a constructor at start-up. Identifiers are matched
/// case-insensitively.
pub struct FormatRegistry {
    constructors: BTreeMap<String, FormatConstructor>,
}

impl FormatRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self {
            constructors: BTreeMap::new(),
        }
    }

    /// Creates a registry holding the formats shipped with uv-audit
    ///
    /// # Examples
    /// ```
    /// use uv_audit::application::factories::FormatRegistry;
    /// use uv_audit::ports::outbound::RenderSettings;
    ///
    /// let registry = FormatRegistry::with_builtin_formats();
    /// let format = registry.resolve("json", RenderSettings::default()).unwrap();
    /// assert_eq!(format.name(), "json");
    /// ```
    pub fn with_builtin_formats() -> Self {
        let mut registry = Self::new();
        registry.register(TextFormatter::NAME, |settings| {
            Box::new(TextFormatter::new(settings))
        });
        registry.register(JsonFormatter::NAME, |_| Box::new(JsonFormatter::new()));
        registry.register(MarkdownFormatter::NAME, |settings| {
            Box::new(MarkdownFormatter::new(settings))
        });
        registry.register("md", |settings| Box::new(MarkdownFormatter::new(settings)));
        registry
    }

    /// Registers (or replaces) the constructor for `name`
    pub fn register<F>(&mut self, name: &str, constructor: F)
    where
        F: Fn(RenderSettings) -> Box<dyn ReportFormat> + 'static,
    {
        self.constructors
            .insert(name.to_lowercase(), Box::new(constructor));
    }

    /// Resolves a format identifier to a ready-to-use format
    ///
    /// # Errors
    /// Returns [`AuditError::UnknownFormat`] when nothing is registered under `name`
    pub fn resolve(&self, name: &str, settings: RenderSettings) -> Result<Box<dyn ReportFormat>> {
        match self.constructors.get(&name.to_lowercase()) {
            Some(constructor) => Ok(constructor(settings)),
            None => Err(AuditError::UnknownFormat {
                format: name.to_string(),
                available: self.names().join(", "),
            }
            .into()),
        }
    }

    /// Registered identifiers in alphabetical order
    pub fn names(&self) -> Vec<&str> {
        self.constructors.keys().map(String::as_str).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(&name.to_lowercase())
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_builtin_formats()
    }
}
