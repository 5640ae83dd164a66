// ABOUTME: Command modules for fitplan-cli and the context they share
// ABOUTME: Provides plan, media, and speech commands over one API client and local store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod media;
pub mod plan;
pub mod speak;

use std::env;
use std::path::PathBuf;

use anyhow::Result;
use fitplan_server::client::{ApiClient, LocalStore};

/// API client and store location shared by every command
pub struct CliContext {
    pub api: ApiClient,
    data_dir: Option<PathBuf>,
}

impl CliContext {
    /// Resolve the server URL and data directory from flags, then environment
    pub fn new(server_url: Option<String>, data_dir: Option<PathBuf>) -> Result<Self> {
        Ok(Self {
            api: ApiClient::from_env(server_url)?,
            data_dir: data_dir.or_else(|| env::var_os("FITPLAN_DATA_DIR").map(PathBuf::from)),
        })
    }

    /// Open the local store, creating it empty on first use
    pub fn store(&self) -> Result<LocalStore> {
        Ok(LocalStore::open_in(self.data_dir.as_deref())?)
    }
}
