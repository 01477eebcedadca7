//! Uniform continuous collision detection over interchangeable engines.
//!
//! A [`Ccd`] handle owns the linked [`Engines`] and exposes the vertex-face
//! and edge-edge queries for every [`CcdMethod`]. Failures never escape the
//! boolean entry points: they turn into a conservative `true` and a
//! diagnostic logged through `tracing`.
//!
//! The crate only emits `tracing` events. A host that wants the diagnostics
//! on stderr installs a subscriber itself:
//!
//! ```no_run
//! tracing_subscriber::fmt().with_writer(std::io::stderr).init();
//! ```

pub mod dispatch;
pub mod engine;
pub mod error;
pub mod math;
pub mod method;
pub mod policy;
pub mod query;

pub use engine::{Engines, ExternalError};
pub use error::{CcdError, DisabledCause, FailureKind, Result};
pub use math::Real;
pub use method::{Capabilities, CcdMethod, FamilySet, MethodFamily};
pub use policy::Diagnostic;
pub use query::{
    Ccd, EdgeEdgeTrajectory, Impact, QueryKind, QueryParams, RoundingError,
    VertexFaceTrajectory,
};
