//! Platform-specific key bindings

use crossterm::event::KeyModifiers;

/// Platform-appropriate modifier for the copy shortcut
/// - macOS: SUPER (Cmd key)
/// - Linux/Windows: CONTROL (Ctrl key)
#[cfg(target_os = "macos")]
pub const COPY_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
pub const COPY_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Copy shortcut display for the completion screen
#[cfg(target_os = "macos")]
pub const COPY_SHORTCUT: &str = "Cmd+Y";

#[cfg(not(target_os = "macos"))]
pub const COPY_SHORTCUT: &str = "Ctrl+Y";

/// Wizard shortcuts. Terminals rarely forward Cmd chords, so these use
/// Ctrl on every platform.
pub const SUBMIT_SHORTCUT: &str = "Ctrl+S";
pub const BACK_SHORTCUT: &str = "Ctrl+B";
pub const ADD_PARTY_SHORTCUT: &str = "Ctrl+A";
pub const REMOVE_PARTY_SHORTCUT: &str = "Ctrl+X";
pub const SIGN_OUT_SHORTCUT: &str = "Ctrl+L";
