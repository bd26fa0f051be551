//! HTTP response envelope and pagination.
//!
//! Every API endpoint responds with the same envelope shape:
//! `{success, data?, error?, message?}`. List endpoints wrap their data in
//! [`Page`].

use serde::{Deserialize, Serialize};

/// Uniform response envelope for the HTTP API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Successful response carrying data.
    #[must_use]
    pub const fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
        }
    }

    /// Successful response carrying data and a human-readable message.
    #[must_use]
    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: Some(message.into()),
        }
    }

    /// Successful response with only a message (e.g. logout).
    #[must_use]
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            error: None,
            message: Some(message.into()),
        }
    }

    /// Failed response carrying an error string.
    #[must_use]
    pub fn err(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            message: None,
        }
    }
}

/// One page of a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Total matching items across all pages.
    pub total: usize,
    pub page: u32,
    pub limit: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

impl<T> Page<T> {
    /// Slice a full result set into one page.
    ///
    /// `page` is 1-based; out-of-range pages yield empty `items`.
    #[must_use]
    pub fn paginate(all: Vec<T>, page: u32, limit: u32) -> Self {
        let total = all.len();
        let start = (page.saturating_sub(1) as usize).saturating_mul(limit as usize);
        let end = start.saturating_add(limit as usize).min(total);
        let items: Vec<T> = if start < total {
            all.into_iter().skip(start).take(limit as usize).collect()
        } else {
            Vec::new()
        };
        Self {
            items,
            total,
            page,
            limit,
            has_next: end < total,
            has_prev: page > 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_envelope_shape() {
        let json = serde_json::to_value(ApiResponse::ok(42)).expect("serialize");
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], 42);
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_err_envelope_shape() {
        let json = serde_json::to_value(ApiResponse::<()>::err("nope")).expect("serialize");
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "nope");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_paginate_middle_page() {
        let page = Page::paginate((1..=10).collect(), 2, 3);
        assert_eq!(page.items, vec![4, 5, 6]);
        assert_eq!(page.total, 10);
        assert!(page.has_next);
        assert!(page.has_prev);
    }

    #[test]
    fn test_paginate_last_page() {
        let page = Page::paginate((1..=10).collect(), 4, 3);
        assert_eq!(page.items, vec![10]);
        assert!(!page.has_next);
        assert!(page.has_prev);
    }

    #[test]
    fn test_paginate_out_of_range() {
        let page = Page::paginate((1..=3).collect::<Vec<i32>>(), 9, 10);
        assert!(page.items.is_empty());
        assert_eq!(page.total, 3);
        assert!(!page.has_next);
    }
}
