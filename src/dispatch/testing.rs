//! An engine that records how it was called and answers from a script.

#![allow(clippy::unwrap_used)]

use std::sync::Mutex;

use crate::engine::{
    EngineResult, ExactPredicate, ExternalError, InclusionOutcome, InclusionRequest,
    IntervalRootFinder, MinSeparationRootFinder, RootFinder, RootParityTest, SafeCcd,
    SignClassifier, TightInclusion,
};
use crate::math::{lit, Real, Vector3};
use crate::query::{EdgeEdgeTrajectory, VertexFaceTrajectory};

/// Bound returned by [`Scripted`] from [`SafeCcd::bound`].
pub(crate) const SCRIPTED_BOUND: f64 = 42.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Reply {
    Miss,
    /// Hit at this time of impact.
    Hit(f64),
    Fail,
    Panic,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call<T: Real> {
    RootFinder { edge_edge: bool, eta: T },
    MinSeparation { edge_edge: bool, minimum_distance: T },
    RootParity { points: Vec<Vector3<T>>, is_edge_edge: bool },
    Exact { edge_edge: bool },
    Sign { points: Vec<Vector3<T>>, edge_edge: bool },
    SafeBound { points: Vec<Vector3<T>>, is_edge_edge: bool },
    SafeTest { bound: T, interleaved: Vec<Vector3<T>>, edge_edge: bool },
    Interval { edge_edge: bool, multivariate: bool },
    Inclusion { edge_edge: bool, request: InclusionRequest<T> },
}

#[derive(Debug)]
pub(crate) struct Scripted<T: Real> {
    reply: Reply,
    calls: Mutex<Vec<Call<T>>>,
}

impl<T: Real> Default for Scripted<T> {
    fn default() -> Self {
        Self::replying(Reply::Miss)
    }
}

impl<T: Real> Scripted<T> {
    pub(crate) fn replying(reply: Reply) -> Self {
        Self {
            reply,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn calls(&self) -> Vec<Call<T>> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call<T>) {
        self.calls.lock().unwrap().push(call);
    }

    fn toi(&self) -> EngineResult<Option<T>> {
        match self.reply {
            Reply::Miss => Ok(None),
            Reply::Hit(toi) => Ok(Some(lit(toi))),
            Reply::Fail => Err(ExternalError::new("scripted failure")),
            Reply::Panic => panic!("scripted panic"),
        }
    }

    fn verdict(&self) -> EngineResult<bool> {
        self.toi().map(|toi| toi.is_some())
    }
}

fn owned<T: Real>(points: &[&Vector3<T>]) -> Vec<Vector3<T>> {
    points.iter().map(|p| **p).collect()
}

impl<T: Real> RootFinder<T> for Scripted<T> {
    fn vertex_face(&self, _: &VertexFaceTrajectory<T>, eta: T) -> EngineResult<Option<T>> {
        self.record(Call::RootFinder { edge_edge: false, eta });
        self.toi()
    }

    fn edge_edge(&self, _: &EdgeEdgeTrajectory<T>, eta: T) -> EngineResult<Option<T>> {
        self.record(Call::RootFinder { edge_edge: true, eta });
        self.toi()
    }
}

impl<T: Real> MinSeparationRootFinder<T> for Scripted<T> {
    fn vertex_face(
        &self,
        _: &VertexFaceTrajectory<T>,
        minimum_distance: T,
    ) -> EngineResult<Option<T>> {
        self.record(Call::MinSeparation { edge_edge: false, minimum_distance });
        self.toi()
    }

    fn edge_edge(&self, _: &EdgeEdgeTrajectory<T>, minimum_distance: T) -> EngineResult<Option<T>> {
        self.record(Call::MinSeparation { edge_edge: true, minimum_distance });
        self.toi()
    }
}

impl<T: Real> RootParityTest<T> for Scripted<T> {
    fn run(&self, points: [&Vector3<T>; 8], is_edge_edge: bool) -> EngineResult<bool> {
        self.record(Call::RootParity { points: owned(&points), is_edge_edge });
        self.verdict()
    }
}

impl<T: Real> ExactPredicate<T> for Scripted<T> {
    fn vertex_face(&self, _: &VertexFaceTrajectory<T>) -> EngineResult<bool> {
        self.record(Call::Exact { edge_edge: false });
        self.verdict()
    }

    fn edge_edge(&self, _: &EdgeEdgeTrajectory<T>) -> EngineResult<bool> {
        self.record(Call::Exact { edge_edge: true });
        self.verdict()
    }
}

impl<T: Real> SignClassifier<T> for Scripted<T> {
    fn intersect_vf(
        &self,
        face_start: [&Vector3<T>; 3],
        vertex_start: &Vector3<T>,
        face_end: [&Vector3<T>; 3],
        vertex_end: &Vector3<T>,
    ) -> EngineResult<bool> {
        let [a, b, c] = face_start;
        let [d, e, f] = face_end;
        self.record(Call::Sign {
            points: owned(&[a, b, c, vertex_start, d, e, f, vertex_end]),
            edge_edge: false,
        });
        self.verdict()
    }

    fn intersect_ee(&self, points: [&Vector3<T>; 8]) -> EngineResult<bool> {
        self.record(Call::Sign { points: owned(&points), edge_edge: true });
        self.verdict()
    }
}

impl<T: Real> SafeCcd<T> for Scripted<T> {
    fn bound(&self, points: [&Vector3<T>; 8], is_edge_edge: bool) -> T {
        self.record(Call::SafeBound { points: owned(&points), is_edge_edge });
        lit(SCRIPTED_BOUND)
    }

    fn vertex_triangle(&self, bound: T, interleaved: [&Vector3<T>; 8]) -> EngineResult<Option<T>> {
        self.record(Call::SafeTest {
            bound,
            interleaved: owned(&interleaved),
            edge_edge: false,
        });
        self.toi()
    }

    fn edge_edge(&self, bound: T, interleaved: [&Vector3<T>; 8]) -> EngineResult<Option<T>> {
        self.record(Call::SafeTest {
            bound,
            interleaved: owned(&interleaved),
            edge_edge: true,
        });
        self.toi()
    }
}

impl<T: Real> IntervalRootFinder<T> for Scripted<T> {
    fn vertex_face_univariate(&self, _: &VertexFaceTrajectory<T>) -> EngineResult<Option<T>> {
        self.record(Call::Interval { edge_edge: false, multivariate: false });
        self.toi()
    }

    fn vertex_face_multivariate(&self, _: &VertexFaceTrajectory<T>) -> EngineResult<Option<T>> {
        self.record(Call::Interval { edge_edge: false, multivariate: true });
        self.toi()
    }

    fn edge_edge_univariate(&self, _: &EdgeEdgeTrajectory<T>) -> EngineResult<Option<T>> {
        self.record(Call::Interval { edge_edge: true, multivariate: false });
        self.toi()
    }

    fn edge_edge_multivariate(&self, _: &EdgeEdgeTrajectory<T>) -> EngineResult<Option<T>> {
        self.record(Call::Interval { edge_edge: true, multivariate: true });
        self.toi()
    }
}

impl<T: Real> Scripted<T> {
    fn inclusion(&self, request: &InclusionRequest<T>) -> EngineResult<InclusionOutcome<T>> {
        let toi = self.toi()?;
        Ok(InclusionOutcome {
            hit: toi.is_some(),
            toi: toi.unwrap_or_else(T::one),
            output_tolerance: request.tolerance,
        })
    }
}

impl<T: Real> TightInclusion<T> for Scripted<T> {
    fn vertex_face(
        &self,
        _: &VertexFaceTrajectory<T>,
        request: &InclusionRequest<T>,
    ) -> EngineResult<InclusionOutcome<T>> {
        self.record(Call::Inclusion { edge_edge: false, request: *request });
        self.inclusion(request)
    }

    fn edge_edge(
        &self,
        _: &EdgeEdgeTrajectory<T>,
        request: &InclusionRequest<T>,
    ) -> EngineResult<InclusionOutcome<T>> {
        self.record(Call::Inclusion { edge_edge: true, request: *request });
        self.inclusion(request)
    }
}
