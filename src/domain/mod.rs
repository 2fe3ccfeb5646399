//! Domain modules (vertical slices).

/// Native → display-currency conversion and currency formatting.
pub mod rate;

/// Display formatter: branch selection, suffix casing, final assembly.
pub mod display;
