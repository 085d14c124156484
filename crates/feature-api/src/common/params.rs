// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Raw parameter coercion
//!
//! Query and path values arrive as text. Missing text becomes `""` and a
//! missing or non-integer number becomes `0`, so the service reports the
//! field with its usual validation message.

use std::str::FromStr;

pub fn text_param(raw: Option<&str>) -> &str {
    raw.unwrap_or("")
}

pub fn int_param<T>(raw: Option<&str>) -> T
where
    T: FromStr + Default,
{
    raw.and_then(|value| value.parse().ok()).unwrap_or_default()
}
