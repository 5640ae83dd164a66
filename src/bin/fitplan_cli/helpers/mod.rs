// ABOUTME: Helper modules for fitplan-cli
// ABOUTME: Provides plan and image display formatting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod display;
