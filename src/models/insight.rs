#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsightKind {
    Positive,
    Warning,
    Alert,
    Info,
}

impl InsightKind {
    pub fn label(self) -> &'static str {
        match self {
            InsightKind::Positive => "positive",
            InsightKind::Warning => "warning",
            InsightKind::Alert => "alert",
            InsightKind::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insight {
    pub kind: InsightKind,
    pub title: String,
    pub message: String,
}

impl Insight {
    pub fn new(kind: InsightKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
        }
    }
}
