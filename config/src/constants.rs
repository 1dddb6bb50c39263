//! # Configuration Constants
//!
//! Centralized constants for the globe mesh pipeline. Tessellation bounds,
//! welding precision, extrusion and ribbon defaults, and marker sizing are
//! defined here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Tessellation**: Subdivision defaults and the dual-walk safety bound
//! - **Offsets**: Default radial extrusion, ribbon and marker dimensions
//! - **Limits**: Maximum values for safety bounds

use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-11));
/// ```
pub const EPSILON: f64 = 1e-10;

/// Length below which a vector is treated as zero.
///
/// Used when converting points to latitude/longitude and when deciding
/// that a projected ribbon edge has collapsed.
pub const DEGENERATE_LENGTH: f64 = 1e-10;

/// Area below which a polygon face is treated as degenerate.
pub const DEGENERATE_AREA: f64 = 1e-14;

/// Number of decimal places kept when welding vertices by position.
///
/// Positions are quantized with `round(x * 10^WELD_DECIMALS)` before being
/// used as a hash key. Must stay coarser than the noise of the tessellation's
/// own floating-point generation.
///
/// # Example
///
/// ```rust
/// use config::constants::{weld_scale, WELD_DECIMALS};
///
/// let key = (0.1234567_f64 * weld_scale(WELD_DECIMALS)).round() as i64;
/// assert_eq!(key, 123457);
/// ```
pub const WELD_DECIMALS: u32 = 6;

/// Largest weld precision accepted by configuration validation.
pub const MAX_WELD_DECIMALS: u32 = 12;

// =============================================================================
// TESSELLATION CONSTANTS
// =============================================================================

/// Default radius of the base sphere.
pub const DEFAULT_RADIUS: f64 = 1.0;

/// Default icosphere subdivision level.
///
/// Level 1 is the bare icosahedron; each further level splits every
/// triangle into four.
pub const DEFAULT_SUBDIVISION: u32 = 4;

/// Highest subdivision level accepted by configuration validation.
///
/// Level 10 already yields 2.6 million vertices.
pub const MAX_SUBDIVISION: u32 = 10;

/// Upper bound on faces visited while walking around one vertex to build a
/// dual cell.
///
/// No icosphere vertex has more than 6 incident faces; the extra slack lets
/// a slightly irregular input close while still catching broken adjacency.
pub const DUAL_WALK_LIMIT: usize = 8;

/// Number of sides of a pentagonal dual cell.
pub const PENTAGON_SIDES: usize = 5;

/// Number of sides of a hexagonal dual cell.
pub const HEXAGON_SIDES: usize = 6;

/// Number of pentagonal cells in any closed icosahedral dual.
pub const PENTAGON_COUNT: usize = 12;

// =============================================================================
// OFFSET CONSTANTS
// =============================================================================

/// Default outward extrusion of region shells.
pub const DEFAULT_EXTRUDE_ABOVE: f64 = 0.02;

/// Default inward extrusion of region shells.
pub const DEFAULT_EXTRUDE_BELOW: f64 = 0.0;

/// Default width of border ribbons.
pub const DEFAULT_BORDER_WIDTH: f64 = 0.0005;

/// Default height of border ribbons.
pub const DEFAULT_BORDER_HEIGHT: f64 = 0.0015;

/// Radial inset that keeps ribbon and marker bases embedded slightly below
/// the raised surface they sit on.
pub const EMBED_EPSILON: f64 = 0.0002;

/// Default tangent radius of a directly placed marker.
pub const DEFAULT_MARKER_RADIUS: f64 = 0.007;

/// Default side count of a directly placed marker.
pub const DEFAULT_MARKER_SIDES: usize = 3;

/// Default fraction by which an anchored marker footprint is pulled toward
/// its host primitive's center.
pub const DEFAULT_MARKER_SHRINK: f64 = 0.4;

/// Radial gap between a marker's top and its closing ribbon.
pub const DEFAULT_CLOSING_GAP: f64 = 0.0005;

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Maximum number of point markers generated in one run.
pub const MAX_MARKERS: usize = 200;

/// Number of work units between two progress log lines.
pub const PROGRESS_INTERVAL: usize = 50;

/// Minimum number of points in a polygon ring.
pub const MIN_RING_POINTS: usize = 3;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Returns the quantization scale for a weld precision in decimal places.
///
/// # Example
///
/// ```rust
/// use config::constants::weld_scale;
///
/// assert_eq!(weld_scale(5), 1e5);
/// ```
#[inline]
pub fn weld_scale(decimals: u32) -> f64 {
    10f64.powi(decimals as i32)
}

/// Checks if two f64 values are approximately equal within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_equal;
///
/// assert!(approx_equal(1.0, 1.0 + 1e-11));
/// assert!(!approx_equal(1.0, 1.1));
/// ```
#[inline]
pub fn approx_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Checks if a f64 value is approximately zero within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_zero;
///
/// assert!(approx_zero(1e-11));
/// assert!(!approx_zero(0.1));
/// ```
#[inline]
pub fn approx_zero(value: f64) -> bool {
    value.abs() < EPSILON
}

// =============================================================================
// TOLERANCE CONFIG
// =============================================================================

/// Immutable snapshot of the tolerances shared by the geometry stages.
///
/// # Examples
/// ```
/// use config::constants::ToleranceConfig;
/// let config = ToleranceConfig::default();
/// assert!(config.degenerate_length > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToleranceConfig {
    /// Decimal places kept when welding vertices.
    pub weld_decimals: u32,
    /// Length below which edges are treated as collapsed.
    pub degenerate_length: f64,
}

impl ToleranceConfig {
    /// Builds a tolerance set, rejecting out-of-range values.
    ///
    /// # Examples
    /// ```
    /// use config::constants::ToleranceConfig;
    /// let cfg = ToleranceConfig::new(5, 1.0e-9).expect("valid config");
    /// assert_eq!(cfg.weld_decimals, 5);
    /// ```
    pub fn new(weld_decimals: u32, degenerate_length: f64) -> Result<Self, ConfigError> {
        if weld_decimals == 0 || weld_decimals > MAX_WELD_DECIMALS {
            return Err(ConfigError::InvalidWeldDecimals(weld_decimals));
        }
        if !(degenerate_length > 0.0) {
            return Err(ConfigError::InvalidTolerance(degenerate_length));
        }
        Ok(Self {
            weld_decimals,
            degenerate_length,
        })
    }

    /// Quantization scale matching `weld_decimals`.
    pub fn weld_scale(&self) -> f64 {
        weld_scale(self.weld_decimals)
    }
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self {
            weld_decimals: WELD_DECIMALS,
            degenerate_length: DEGENERATE_LENGTH,
        }
    }
}

/// Error returned when invalid tolerance values are provided.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Raised when a tolerance is zero, negative or NaN.
    InvalidTolerance(f64),
    /// Raised when the weld precision is outside `1..=MAX_WELD_DECIMALS`.
    InvalidWeldDecimals(u32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTolerance(value) => {
                write!(f, "tolerance must be positive: {value}")
            }
            ConfigError::InvalidWeldDecimals(value) => {
                write!(f, "weld decimals must be in 1..={MAX_WELD_DECIMALS}: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
