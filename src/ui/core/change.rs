//! Structural change detection over comparison-relevant state.
//!
//! Components that refetch or rebuild on configuration changes must not react
//! to every field of their inputs. The [`Material`] trait lets a type expose
//! only the fields that matter, normalized so that a field still holding its
//! default compares equal to the field being absent.

use serde_json::Value;

/// View of the fields that matter for change detection.
///
/// Implementations build the view with serde, skipping fields at their
/// default value, so the default-equals-absent rule holds structurally and
/// does not need per-field comparison code.
pub trait Material {
    fn material_view(&self) -> Value;
}

/// Deep structural comparison of two values' material views.
///
/// Pure: no side effects. Key order never matters since [`Value`] maps
/// compare by content.
pub fn materially_differs<T: Material>(current: &T, next: &T) -> bool {
    current.material_view() != next.material_view()
}
