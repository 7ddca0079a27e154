//! Error adapter for converting GraphtrimError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error type
//! and miette's rich diagnostic formatting used in the CLI. None of the
//! pipeline errors carry source spans, so the adapter only supplies codes and
//! help text.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use graphtrim::GraphtrimError;

/// Adapter wrapping a [`GraphtrimError`] for miette rendering.
pub struct ErrorAdapter<'a>(pub &'a GraphtrimError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            GraphtrimError::Io(_) => "graphtrim::io",
            GraphtrimError::Load { .. } => "graphtrim::load",
            GraphtrimError::NoMatch { .. } => "graphtrim::no_match",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            GraphtrimError::NoMatch { .. } => Some(Box::new(
                "labels are matched case-sensitively; check the substring against the \
                 label attributes in the input file",
            )),
            _ => None,
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}
