// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Varjo - OSINT Reconnaissance Library
 * Exposes reconnaissance modules for testing
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

pub mod config;
pub mod dorks;
pub mod errors;
pub mod gallery;
pub mod http_client;
pub mod profile;
pub mod reporting;
pub mod search;
pub mod types;
