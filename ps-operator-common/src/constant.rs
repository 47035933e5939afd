// SPDX-FileCopyrightText: 2025 Timothy Pogue
//
// SPDX-License-Identifier: ISC

pub const APP_NAME: &str = "pushsecret-operator";

/// Prefix for environment variables read by the configuration builder,
/// e.g. `PUSHSECRET_OPERATOR__REVIEW__TIMEOUT_SECS`
pub const ENV_PREFIX: &str = "PUSHSECRET_OPERATOR";

/// Environment variable holding the tracing filter directives
pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";
