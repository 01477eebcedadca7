//! Reference engine shared by the integration tests.
//!
//! It samples the motion at evenly spaced times and widens the acceptance
//! distance by how far the primitives can move between samples, so it never
//! misses a contact. It answers every engine contract the same way.

#![allow(dead_code, clippy::unwrap_used)]

use std::sync::Arc;

use ccd_wrapper::engine::{
    EngineResult, ExactPredicate, InclusionOutcome, InclusionRequest, IntervalRootFinder,
    MinSeparationRootFinder, RootFinder, RootParityTest, SafeCcd, SignClassifier, TightInclusion,
};
use ccd_wrapper::math::{lit, Vector3};
use ccd_wrapper::{Ccd, EdgeEdgeTrajectory, Engines, Real, VertexFaceTrajectory};

pub fn v(x: f64, y: f64, z: f64) -> Vector3<f64> {
    Vector3::new(x, y, z)
}

/// A handle with the reference engine linked into every family.
pub fn reference_ccd<T: Real>() -> Ccd<T> {
    Ccd::new(Engines::uniform(&Arc::new(Reference::default())))
}

/// The unit triangle used by the crossing scenarios.
pub fn unit_triangle() -> [Vector3<f64>; 3] {
    [v(-1.0, -1.0, 0.0), v(1.0, -1.0, 0.0), v(0.0, 1.0, 0.0)]
}

/// A point moving from `from` to `to` against the static unit triangle.
pub fn point_against_unit_triangle(from: Vector3<f64>, to: Vector3<f64>) -> VertexFaceTrajectory<f64> {
    let face = unit_triangle();
    VertexFaceTrajectory {
        vertex_start: from,
        face_start: face,
        vertex_end: to,
        face_end: face,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Reference {
    pub intervals: usize,
}

impl Default for Reference {
    fn default() -> Self {
        Self { intervals: 256 }
    }
}

/// Corners of one primitive pair: which corners form each side and how
/// they move.
struct Motion<'a, T: Real> {
    start: [&'a Vector3<T>; 4],
    end: [&'a Vector3<T>; 4],
    edge_edge: bool,
}

impl<T: Real> Motion<'_, T> {
    fn at(&self, t: T) -> [Vector3<T>; 4] {
        let mut out = [Vector3::zeros(); 4];
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = self.start[i] + (self.end[i] - self.start[i]) * t;
        }
        out
    }

    fn distance(&self, t: T) -> T {
        let [a, b, c, d] = self.at(t);
        if self.edge_edge {
            segment_segment(&a, &b, &c, &d)
        } else {
            point_triangle(&a, &b, &c, &d)
        }
    }

    /// Bound on how fast the distance between the primitives can change.
    fn lipschitz(&self) -> T {
        let delta = |i: usize| self.end[i] - self.start[i];
        let pairs: &[(usize, usize)] = if self.edge_edge {
            &[(0, 2), (0, 3), (1, 2), (1, 3)]
        } else {
            &[(0, 1), (0, 2), (0, 3)]
        };
        pairs
            .iter()
            .map(|&(i, j)| (delta(i) - delta(j)).norm())
            .fold(T::zero(), T::max)
    }

    fn scale(&self) -> T {
        self.start
            .iter()
            .chain(self.end.iter())
            .flat_map(|p| p.iter())
            .fold(T::one(), |acc, x| acc.max(x.abs()))
    }
}

impl Reference {
    fn sweep<T: Real>(&self, motion: &Motion<'_, T>, minimum_distance: T) -> Option<T> {
        let n: T = lit(self.intervals as f64);
        let half_step = T::one() / (n + n);
        let slack = motion.lipschitz() * half_step + lit::<T>(1e-6) * motion.scale();
        (0..=self.intervals).find_map(|k| {
            let t = lit::<T>(k as f64) / n;
            (motion.distance(t) <= minimum_distance + slack).then(|| (t - half_step).max(T::zero()))
        })
    }

    fn vertex_face<T: Real>(&self, q: &VertexFaceTrajectory<T>, minimum_distance: T) -> Option<T> {
        let [f0s, f1s, f2s] = &q.face_start;
        let [f0e, f1e, f2e] = &q.face_end;
        let motion = Motion {
            start: [&q.vertex_start, f0s, f1s, f2s],
            end: [&q.vertex_end, f0e, f1e, f2e],
            edge_edge: false,
        };
        self.sweep(&motion, minimum_distance)
    }

    fn edge_edge<T: Real>(&self, q: &EdgeEdgeTrajectory<T>, minimum_distance: T) -> Option<T> {
        let [a0s, a1s] = &q.edge0_start;
        let [b0s, b1s] = &q.edge1_start;
        let [a0e, a1e] = &q.edge0_end;
        let [b0e, b1e] = &q.edge1_end;
        let motion = Motion {
            start: [a0s, a1s, b0s, b1s],
            end: [a0e, a1e, b0e, b1e],
            edge_edge: true,
        };
        self.sweep(&motion, minimum_distance)
    }

    /// Sweeps eight points laid out as four starts then four ends.
    fn packed<T: Real>(&self, points: [&Vector3<T>; 8], edge_edge: bool) -> Option<T> {
        let [s0, s1, s2, s3, e0, e1, e2, e3] = points;
        let motion = Motion {
            start: [s0, s1, s2, s3],
            end: [e0, e1, e2, e3],
            edge_edge,
        };
        self.sweep(&motion, T::zero())
    }

    /// Sweeps eight points laid out as start/end pairs.
    fn interleaved<T: Real>(&self, points: [&Vector3<T>; 8], edge_edge: bool) -> Option<T> {
        let [s0, e0, s1, e1, s2, e2, s3, e3] = points;
        self.packed([s0, s1, s2, s3, e0, e1, e2, e3], edge_edge)
    }

    fn inclusion<T: Real>(toi: Option<T>, request: &InclusionRequest<T>) -> InclusionOutcome<T> {
        InclusionOutcome {
            hit: toi.is_some_and(|t| t <= request.t_max),
            toi: toi.unwrap_or(request.t_max),
            output_tolerance: request.tolerance,
        }
    }
}

impl<T: Real> RootFinder<T> for Reference {
    fn vertex_face(&self, query: &VertexFaceTrajectory<T>, eta: T) -> EngineResult<Option<T>> {
        Ok(Reference::vertex_face(self, query, eta))
    }

    fn edge_edge(&self, query: &EdgeEdgeTrajectory<T>, eta: T) -> EngineResult<Option<T>> {
        Ok(Reference::edge_edge(self, query, eta))
    }
}

impl<T: Real> MinSeparationRootFinder<T> for Reference {
    fn vertex_face(
        &self,
        query: &VertexFaceTrajectory<T>,
        minimum_distance: T,
    ) -> EngineResult<Option<T>> {
        Ok(Reference::vertex_face(self, query, minimum_distance))
    }

    fn edge_edge(
        &self,
        query: &EdgeEdgeTrajectory<T>,
        minimum_distance: T,
    ) -> EngineResult<Option<T>> {
        Ok(Reference::edge_edge(self, query, minimum_distance))
    }
}

impl<T: Real> RootParityTest<T> for Reference {
    fn run(&self, points: [&Vector3<T>; 8], is_edge_edge: bool) -> EngineResult<bool> {
        Ok(self.packed(points, is_edge_edge).is_some())
    }
}

impl<T: Real> ExactPredicate<T> for Reference {
    fn vertex_face(&self, query: &VertexFaceTrajectory<T>) -> EngineResult<bool> {
        Ok(Reference::vertex_face(self, query, T::zero()).is_some())
    }

    fn edge_edge(&self, query: &EdgeEdgeTrajectory<T>) -> EngineResult<bool> {
        Ok(Reference::edge_edge(self, query, T::zero()).is_some())
    }
}

impl<T: Real> SignClassifier<T> for Reference {
    fn intersect_vf(
        &self,
        face_start: [&Vector3<T>; 3],
        vertex_start: &Vector3<T>,
        face_end: [&Vector3<T>; 3],
        vertex_end: &Vector3<T>,
    ) -> EngineResult<bool> {
        let [f0s, f1s, f2s] = face_start;
        let [f0e, f1e, f2e] = face_end;
        Ok(self
            .packed([vertex_start, f0s, f1s, f2s, vertex_end, f0e, f1e, f2e], false)
            .is_some())
    }

    fn intersect_ee(&self, points: [&Vector3<T>; 8]) -> EngineResult<bool> {
        Ok(self.packed(points, true).is_some())
    }
}

impl<T: Real> SafeCcd<T> for Reference {
    fn bound(&self, _: [&Vector3<T>; 8], _: bool) -> T {
        T::one()
    }

    fn vertex_triangle(&self, _: T, interleaved: [&Vector3<T>; 8]) -> EngineResult<Option<T>> {
        Ok(self.interleaved(interleaved, false))
    }

    fn edge_edge(&self, _: T, interleaved: [&Vector3<T>; 8]) -> EngineResult<Option<T>> {
        Ok(self.interleaved(interleaved, true))
    }
}

impl<T: Real> IntervalRootFinder<T> for Reference {
    fn vertex_face_univariate(&self, query: &VertexFaceTrajectory<T>) -> EngineResult<Option<T>> {
        Ok(Reference::vertex_face(self, query, T::zero()))
    }

    fn vertex_face_multivariate(&self, query: &VertexFaceTrajectory<T>) -> EngineResult<Option<T>> {
        Ok(Reference::vertex_face(self, query, T::zero()))
    }

    fn edge_edge_univariate(&self, query: &EdgeEdgeTrajectory<T>) -> EngineResult<Option<T>> {
        Ok(Reference::edge_edge(self, query, T::zero()))
    }

    fn edge_edge_multivariate(&self, query: &EdgeEdgeTrajectory<T>) -> EngineResult<Option<T>> {
        Ok(Reference::edge_edge(self, query, T::zero()))
    }
}

impl<T: Real> TightInclusion<T> for Reference {
    fn vertex_face(
        &self,
        query: &VertexFaceTrajectory<T>,
        request: &InclusionRequest<T>,
    ) -> EngineResult<InclusionOutcome<T>> {
        let toi = Reference::vertex_face(self, query, request.minimum_distance);
        Ok(Reference::inclusion(toi, request))
    }

    fn edge_edge(
        &self,
        query: &EdgeEdgeTrajectory<T>,
        request: &InclusionRequest<T>,
    ) -> EngineResult<InclusionOutcome<T>> {
        let toi = Reference::edge_edge(self, query, request.minimum_distance);
        Ok(Reference::inclusion(toi, request))
    }
}

fn point_segment<T: Real>(p: &Vector3<T>, a: &Vector3<T>, b: &Vector3<T>) -> T {
    let ab = b - a;
    let len2 = ab.norm_squared();
    let t = if len2 > T::zero() {
        ((p - a).dot(&ab) / len2).clamp(T::zero(), T::one())
    } else {
        T::zero()
    };
    (p - (a + ab * t)).norm()
}

/// Distance from `p` to the triangle `abc`, degenerate triangles included.
pub fn point_triangle<T: Real>(p: &Vector3<T>, a: &Vector3<T>, b: &Vector3<T>, c: &Vector3<T>) -> T {
    let n = (b - a).cross(&(c - a));
    let area2 = n.norm_squared();
    if area2 > T::zero() {
        let inside = [(a, b), (b, c), (c, a)]
            .iter()
            .all(|(u, w)| (*w - *u).cross(&(p - *u)).dot(&n) >= T::zero());
        if inside {
            return (p - a).dot(&n).abs() / area2.sqrt();
        }
    }
    point_segment(p, a, b)
        .min(point_segment(p, b, c))
        .min(point_segment(p, c, a))
}

/// Distance between the segments `p1q1` and `p2q2`.
pub fn segment_segment<T: Real>(
    p1: &Vector3<T>,
    q1: &Vector3<T>,
    p2: &Vector3<T>,
    q2: &Vector3<T>,
) -> T {
    let zero = T::zero();
    let one = T::one();
    let d1 = q1 - p1;
    let d2 = q2 - p2;
    let r = p1 - p2;
    let a = d1.dot(&d1);
    let e = d2.dot(&d2);
    let f = d2.dot(&r);

    let (s, t) = if a <= zero && e <= zero {
        (zero, zero)
    } else if a <= zero {
        (zero, (f / e).clamp(zero, one))
    } else {
        let c = d1.dot(&r);
        if e <= zero {
            ((-c / a).clamp(zero, one), zero)
        } else {
            let b = d1.dot(&d2);
            let denom = a * e - b * b;
            let s = if denom > zero {
                ((b * f - c * e) / denom).clamp(zero, one)
            } else {
                zero
            };
            let t = (b * s + f) / e;
            if t < zero {
                ((-c / a).clamp(zero, one), zero)
            } else if t > one {
                (((b - c) / a).clamp(zero, one), one)
            } else {
                (s, t)
            }
        }
    };
    ((p1 + d1 * s) - (p2 + d2 * t)).norm()
}
