//! # Configuration Constants
//!
//! Centralized constants for the Paragen model pipeline. Naming conventions,
//! host primitive defaults, build limits and numeric tolerances live here.
//!
//! ## Categories
//!
//! - **Naming**: Hierarchical name separator and host-facing identifiers
//! - **Precision**: Floating-point comparison tolerances
//! - **Primitive Defaults**: Shape parameters the host uses when none are given
//! - **Limits**: Safety bounds for nested builds and subprocesses

// =============================================================================
// NAMING CONSTANTS
// =============================================================================

/// Separator between a build context's object name and the names of things
/// created inside it.
///
/// Materials and instances created while building `"Castle"` are named
/// `"Castle.Sand"`, `"Castle.Tower"`, and so on.
///
/// # Example
///
/// ```rust
/// use config::constants::NAME_SEPARATOR;
///
/// let full_name = format!("Castle{}Sand", NAME_SEPARATOR);
/// assert_eq!(full_name, "Castle.Sand");
/// ```
pub const NAME_SEPARATOR: &str = ".";

/// Name given to the transient boolean modifier before it is applied.
pub const BOOLEAN_MODIFIER_NAME: &str = "booly";

/// Name of the principal shading node whose inputs carry base color and
/// metallic factor.
pub const PRINCIPAL_SHADER_NODE: &str = "Principled BSDF";

/// Number of digits in the numeric suffix used when a host name is taken
/// (`Cube`, `Cube.001`, `Cube.002`, ...).
pub const NAME_SUFFIX_DIGITS: usize = 3;

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
pub const EPSILON: f64 = 1e-9;

// =============================================================================
// MATERIAL CONSTANTS
// =============================================================================

/// Metallic factor used when a material is registered without one.
pub const DEFAULT_METALLIC: f64 = 0.0;

// =============================================================================
// PRIMITIVE DEFAULTS
// =============================================================================

/// Default edge length of a cube primitive.
pub const DEFAULT_CUBE_SIZE: f64 = 2.0;

/// Default radius for round primitives (cylinder, cone base, spheres, circle).
pub const DEFAULT_RADIUS: f64 = 1.0;

/// Default depth (height) of cylinders and cones.
pub const DEFAULT_DEPTH: f64 = 2.0;

/// Default vertex count around the circumference of cylinders, cones and
/// circles.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_VERTICES;
///
/// let requested: Option<i64> = None;
/// assert_eq!(requested.unwrap_or(DEFAULT_VERTICES), 32);
/// ```
pub const DEFAULT_VERTICES: i64 = 32;

/// Default number of longitudinal segments of a UV sphere.
pub const DEFAULT_SPHERE_SEGMENTS: i64 = 32;

/// Default number of latitudinal rings of a UV sphere.
pub const DEFAULT_SPHERE_RINGS: i64 = 16;

/// Default subdivision level of an ico sphere.
pub const DEFAULT_ICO_SUBDIVISIONS: i64 = 2;

/// Default edge length of a plane primitive.
pub const DEFAULT_PLANE_SIZE: f64 = 2.0;

/// Default ring radius of a torus.
pub const DEFAULT_TORUS_MAJOR_RADIUS: f64 = 1.0;

/// Default tube radius of a torus.
pub const DEFAULT_TORUS_MINOR_RADIUS: f64 = 0.25;

/// Default segment count around the torus ring.
pub const DEFAULT_TORUS_MAJOR_SEGMENTS: i64 = 48;

/// Default segment count around the torus tube.
pub const DEFAULT_TORUS_MINOR_SEGMENTS: i64 = 12;

/// Default size of the monkey head primitive.
pub const DEFAULT_MONKEY_SIZE: f64 = 2.0;

/// Default cap fill for cylinders and cones.
pub const DEFAULT_END_FILL: &str = "NGON";

/// Default fill for circles (an open ring of edges).
pub const DEFAULT_CIRCLE_FILL: &str = "NOTHING";

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Maximum nesting depth of build contexts.
///
/// Prevents runaway recursion when a model builds itself (directly or
/// through another model).
///
/// # Example
///
/// ```rust
/// use config::constants::MAX_BUILD_DEPTH;
///
/// let current_depth = 3;
/// assert!(current_depth < MAX_BUILD_DEPTH);
/// ```
pub const MAX_BUILD_DEPTH: usize = 64;

/// Default timeout, in seconds, for a Blender subprocess run.
pub const DEFAULT_BLENDER_TIMEOUT_SECS: u64 = 300;

/// Environment variable consulted first when locating the Blender executable.
pub const BLENDER_PATH_ENV: &str = "BLENDER_PATH";

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

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

/// Joins a context name and a child name with [`NAME_SEPARATOR`].
///
/// # Example
///
/// ```rust
/// use config::constants::qualified_name;
///
/// assert_eq!(qualified_name("T1", "Stone"), "T1.Stone");
/// ```
pub fn qualified_name(context: &str, name: &str) -> String {
    format!("{context}{NAME_SEPARATOR}{name}")
}

/// Formats the `index`-th disambiguated variant of a host name.
///
/// # Example
///
/// ```rust
/// use config::constants::suffixed_name;
///
/// assert_eq!(suffixed_name("Cube", 1), "Cube.001");
/// assert_eq!(suffixed_name("Cube", 12), "Cube.012");
/// ```
pub fn suffixed_name(base: &str, index: usize) -> String {
    format!(
        "{base}{NAME_SEPARATOR}{index:0width$}",
        width = NAME_SUFFIX_DIGITS
    )
}
