//! HTTP status code classification. A missing status is never in any class.

use std::ops::{Range, RangeFrom};

use crate::types::or_default;

const SUCCESS: Range<u16> = 200..300;
const CLIENT_ERROR: Range<u16> = 400..500;
const SERVER_ERROR: RangeFrom<u16> = 500..;

/// 2xx.
pub fn is_http_success_status(status: Option<u16>) -> bool {
    or_default(status, |s| SUCCESS.contains(&s))
}

/// 4xx.
pub fn is_http_client_error_status(status: Option<u16>) -> bool {
    or_default(status, |s| CLIENT_ERROR.contains(&s))
}

/// 5xx and anything above.
pub fn is_http_server_error_status(status: Option<u16>) -> bool {
    or_default(status, |s| SERVER_ERROR.contains(&s))
}
