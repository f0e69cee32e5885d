use std::fmt;

use rowan::TextRange;

/// What went wrong, grouped by the stage that reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Reported by the external analyzer, remapped verbatim
    QuerySyntax,
    QuerySemantic,

    // Metadata resolution failures surfaced by a caller
    UnknownEntity,
    UnknownProperty,
    UnknownCollection,

    // Shorthand expansion aborted
    MissingParameter,
    TooManyParameters,
    SortAlreadySpecified,

    // Parameter binding mismatches
    UnboundParameters,
    UnusedParameters,
}

impl DiagnosticKind {
    /// Expansion problems and binding mismatches warn; everything else errors.
    pub fn default_severity(&self) -> Severity {
        if self.aborts_expansion()
            || matches!(self, Self::UnboundParameters | Self::UnusedParameters)
        {
            Severity::Warning
        } else {
            Severity::Error
        }
    }

    /// Whether this kind means the literal could not be expanded at all.
    pub fn aborts_expansion(&self) -> bool {
        matches!(
            self,
            Self::MissingParameter | Self::TooManyParameters | Self::SortAlreadySpecified
        )
    }

    /// Message used when the reporter gives no detail.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::QuerySyntax => "syntax error in query",
            Self::QuerySemantic => "invalid query",
            Self::UnknownEntity => "unknown entity",
            Self::UnknownProperty => "unknown property",
            Self::UnknownCollection => "unknown collection",
            Self::MissingParameter => "missing required parameter",
            Self::TooManyParameters => "too many parameters",
            Self::SortAlreadySpecified => "query already has an ORDER BY clause",
            Self::UnboundParameters => "query parameter has no bound value",
            Self::UnusedParameters => "bound parameter does not occur in the query",
        }
    }

    /// Sentence around a reporter's detail, split at the detail.
    ///
    /// `None` means the detail is already the full message.
    fn template(&self) -> Option<(&'static str, &'static str)> {
        match self {
            Self::UnknownEntity => Some(("`", "` is not a mapped entity")),
            Self::UnknownCollection => Some(("`", "` is not a mapped collection role")),
            Self::MissingParameter => Some(("Missing required parameter for ", "")),
            Self::TooManyParameters => Some(("Too many parameters for ", "")),
            Self::SortAlreadySpecified => Some(("query already has an ORDER BY clause: ", "")),
            Self::QuerySyntax
            | Self::QuerySemantic
            | Self::UnknownProperty
            | Self::UnboundParameters
            | Self::UnusedParameters => None,
        }
    }

    /// Final message text for an optional reporter detail.
    pub fn message(&self, detail: Option<&str>) -> String {
        match (detail, self.template()) {
            (None, _) => self.fallback_message().to_owned(),
            (Some(detail), None) => detail.to_owned(),
            (Some(detail), Some((before, after))) => format!("{before}{detail}{after}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        })
    }
}

/// One finding. Its range is against the analyzed text until remapped, and
/// against the enclosing source afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    pub(crate) severity: Severity,
    pub(crate) range: TextRange,
    pub(crate) message: String,
    pub(crate) hints: Vec<String>,
}

impl DiagnosticMessage {
    pub(crate) fn with_default_message(kind: DiagnosticKind, range: TextRange) -> Self {
        Self {
            kind,
            severity: kind.default_severity(),
            range,
            message: kind.message(None),
            hints: Vec::new(),
        }
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn hints(&self) -> &[String] {
        &self.hints
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

/// `warning at 26..31: Parameter :age does not occur in the query`
impl fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (start, end): (u32, u32) = (self.range.start().into(), self.range.end().into());
        write!(f, "{} at {start}..{end}: {}", self.severity, self.message)?;
        self.hints
            .iter()
            .try_for_each(|hint| write!(f, " (hint: {hint})"))
    }
}
