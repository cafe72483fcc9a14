use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// Well known envelope codes.
pub mod codes {
    /// A fault reached the containment boundary.
    pub const UNHANDLED: &str = "ERR-UNHANDLED";
    /// One or more validators rejected the request.
    pub const VALIDATION: &str = "ERR-VALIDATION";
    /// The invocation was cancelled before it completed.
    pub const CANCELLED: &str = "ERR-CANCELLED";
    /// The addressed entity does not exist.
    pub const NOT_FOUND: &str = "ERR-NOT-FOUND";
}

/// The uniform outcome of every operation.
///
/// Success is derived from the error list: an envelope is successful exactly
/// when it carries no errors. There is no separate flag that could disagree.
/// Envelopes are built once through [`ResultEnvelope::success`] or
/// [`ResultEnvelope::error`] and refined only by consuming builders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultEnvelope<T> {
    data: Option<T>,
    message: Option<String>,
    errors: Option<Vec<String>>,
    code: Option<String>,
    status_code: u16,
}

impl<T> ResultEnvelope<T> {
    /// A successful outcome carrying `data`.
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            data: Some(data),
            message: Some(message.into()),
            errors: None,
            code: None,
            status_code: 200,
        }
    }

    /// A failed outcome.
    ///
    /// When `errors` is empty the message itself becomes the only error, so
    /// an error envelope can never read as a success.
    pub fn error<I, S>(message: impl Into<String>, errors: I, code: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let message = message.into();
        let mut errors: Vec<String> = errors.into_iter().map(Into::into).collect();
        if errors.is_empty() {
            errors.push(message.clone());
        }

        Self {
            data: None,
            message: Some(message),
            errors: Some(errors),
            code: Some(code.into()),
            status_code: 200,
        }
    }

    /// A domain level "does not exist" outcome, code
    /// [`codes::NOT_FOUND`], status 404.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::error(message, Vec::<String>::new(), codes::NOT_FOUND).with_status_code(404)
    }

    /// Replace the status code.
    pub fn with_status_code(mut self, status_code: u16) -> Self {
        self.status_code = status_code;
        self
    }

    /// Whether the envelope carries no errors.
    pub fn is_success(&self) -> bool {
        self.errors.as_ref().is_none_or(Vec::is_empty)
    }

    /// The payload, if any.
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Consume into the payload.
    pub fn into_data(self) -> Option<T> {
        self.data
    }

    /// Human readable summary.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Error entries in order; empty on success.
    pub fn errors(&self) -> &[String] {
        self.errors.as_deref().unwrap_or_default()
    }

    /// Machine readable code, if any.
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// Status code, 200 unless set otherwise.
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Transform the payload, keeping everything else.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ResultEnvelope<U> {
        ResultEnvelope {
            data: self.data.map(f),
            message: self.message,
            errors: self.errors,
            code: self.code,
            status_code: self.status_code,
        }
    }
}

impl<T: Serialize> Serialize for ResultEnvelope<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ResultEnvelope", 6)?;
        state.serialize_field("isSuccess", &self.is_success())?;
        state.serialize_field("message", &self.message)?;
        state.serialize_field("errors", &self.errors)?;
        state.serialize_field("code", &self.code)?;
        state.serialize_field("statusCode", &self.status_code)?;
        state.serialize_field("data", &self.data)?;
        state.end()
    }
}

/// One page of a larger result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// One based page number.
    pub current_page: u32,
    /// Requested page size.
    pub page_size: u32,
    /// Items across all pages.
    pub total_count: u64,
}

impl<T> Page<T> {
    /// Create a page.
    pub fn new(items: Vec<T>, current_page: u32, page_size: u32, total_count: u64) -> Self {
        Self {
            items,
            current_page,
            page_size,
            total_count,
        }
    }

    /// Number of pages needed for `total_count` items; zero for a zero page
    /// size.
    pub fn total_pages(&self) -> u64 {
        match self.page_size {
            0 => 0,
            size => self.total_count.div_ceil(u64::from(size)),
        }
    }
}

impl<T: Serialize> Serialize for Page<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Page", 5)?;
        state.serialize_field("items", &self.items)?;
        state.serialize_field("currentPage", &self.current_page)?;
        state.serialize_field("pageSize", &self.page_size)?;
        state.serialize_field("totalCount", &self.total_count)?;
        state.serialize_field("totalPages", &self.total_pages())?;
        state.end()
    }
}

/// A page of search hits plus the search that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults<T> {
    /// The matching page.
    #[serde(flatten)]
    pub page: Page<T>,
    /// The term the search ran with.
    pub search_term_used: Option<String>,
    /// Filters as they were applied.
    pub applied_filters: BTreeMap<String, String>,
}
