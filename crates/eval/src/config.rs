// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Evaluation configuration.
use std::thread;

use crate::backend::{BLOCK_SIZE, BackendKind};

/// Backend configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// The backend that reduces matchups.
    pub backend: BackendKind,
    /// Number of worker threads.
    pub tasks: usize,
    /// Number of hands in a block for the batched backend.
    pub block_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            tasks: default_tasks(),
            block_size: BLOCK_SIZE,
        }
    }
}

/// The number of hardware threads, or one if unknown.
pub fn default_tasks() -> usize {
    thread::available_parallelism().map_or(1, |n| n.get())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.backend, BackendKind::Cpu);
        assert!(config.tasks >= 1);
        assert_eq!(config.block_size, 256);
        assert!(crate::backend::new(&config).is_ok());
    }
}
