//! Launchdeck - a terminal dashboard for test-launch reporting servers
//!
//! This library provides a terminal-based client for browsing test launches
//! and previewing dashboard widgets against a reporting server. It includes
//! saved-filter navigation with asynchronous filter activation, a widget
//! builder with live preview reconciliation, and a rich interactive UI
//! built with Ratatui.
//!
//! # Modules
//!
//! The library is organized into several key modules:
//!
//! * [`backend`] - Reporting-server interface and REST implementation
//! * [`config`] - Application configuration management
//! * [`ui`] - Terminal user interface components
//! * [`widgets`] - Widget template catalog and preview configuration

/// Backend abstraction layer for reporting servers
pub mod backend;

/// Configuration module for managing application settings
pub mod config;

/// Application constants and default values
pub mod constants;

/// Icon definitions for visual representation in the TUI
pub mod icons;

/// Logging utilities for debugging and error tracking
pub mod logger;

/// Terminal user interface components and rendering
pub mod ui;

/// Widget template catalog and the preview configuration
pub mod widgets;
