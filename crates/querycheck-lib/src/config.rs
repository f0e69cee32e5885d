/// Switches for one checking run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    /// Cross-check declared bindings against query placeholders.
    pub check_bindings: bool,
    /// Let path lookups fall back to properties declared on known subtypes.
    pub fallback_to_subtypes: bool,
    /// Report shorthand calls whose target entity cannot be resolved.
    pub report_unknown_entity: bool,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            check_bindings: true,
            fallback_to_subtypes: true,
            report_unknown_entity: true,
        }
    }
}

impl CheckConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_check_bindings(mut self, value: bool) -> Self {
        self.check_bindings = value;
        self
    }

    pub fn with_fallback_to_subtypes(mut self, value: bool) -> Self {
        self.fallback_to_subtypes = value;
        self
    }

    pub fn with_report_unknown_entity(mut self, value: bool) -> Self {
        self.report_unknown_entity = value;
        self
    }
}
