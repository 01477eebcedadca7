use crate::math::{is_finite_vector, Real, Vector3};

/// A point and a triangle, each corner moving linearly over `[0, 1]`.
///
/// The triangle's vertices move independently, so it may shear or deform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexFaceTrajectory<T: Real> {
    /// Point at `t = 0`.
    pub vertex_start: Vector3<T>,
    /// Triangle vertices at `t = 0`.
    pub face_start: [Vector3<T>; 3],
    /// Point at `t = 1`.
    pub vertex_end: Vector3<T>,
    /// Triangle vertices at `t = 1`.
    pub face_end: [Vector3<T>; 3],
}

impl<T: Real> VertexFaceTrajectory<T> {
    /// Creates a trajectory from the eight corners in query order: point and
    /// face vertices at start, then point and face vertices at end.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        vertex_start: Vector3<T>,
        face_vertex0_start: Vector3<T>,
        face_vertex1_start: Vector3<T>,
        face_vertex2_start: Vector3<T>,
        vertex_end: Vector3<T>,
        face_vertex0_end: Vector3<T>,
        face_vertex1_end: Vector3<T>,
        face_vertex2_end: Vector3<T>,
    ) -> Self {
        Self {
            vertex_start,
            face_start: [face_vertex0_start, face_vertex1_start, face_vertex2_start],
            vertex_end,
            face_end: [face_vertex0_end, face_vertex1_end, face_vertex2_end],
        }
    }

    /// A point and triangle that do not move.
    #[must_use]
    pub fn stationary(vertex: Vector3<T>, face: [Vector3<T>; 3]) -> Self {
        Self {
            vertex_start: vertex,
            face_start: face,
            vertex_end: vertex,
            face_end: face,
        }
    }

    /// Corners in query order.
    #[must_use]
    pub fn corners(&self) -> [&Vector3<T>; 8] {
        let [f0s, f1s, f2s] = &self.face_start;
        let [f0e, f1e, f2e] = &self.face_end;
        [&self.vertex_start, f0s, f1s, f2s, &self.vertex_end, f0e, f1e, f2e]
    }

    /// Returns whether every corner has the same start and end position.
    #[must_use]
    pub fn is_stationary(&self) -> bool {
        self.vertex_start == self.vertex_end && self.face_start == self.face_end
    }

    /// Returns whether every coordinate is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.corners().into_iter().all(is_finite_vector)
    }
}

/// Two segments, each endpoint moving linearly over `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeEdgeTrajectory<T: Real> {
    /// First edge's endpoints at `t = 0`.
    pub edge0_start: [Vector3<T>; 2],
    /// Second edge's endpoints at `t = 0`.
    pub edge1_start: [Vector3<T>; 2],
    /// First edge's endpoints at `t = 1`.
    pub edge0_end: [Vector3<T>; 2],
    /// Second edge's endpoints at `t = 1`.
    pub edge1_end: [Vector3<T>; 2],
}

impl<T: Real> EdgeEdgeTrajectory<T> {
    /// Creates a trajectory from the eight corners in query order: both
    /// edges at start, then both edges at end.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        edge0_vertex0_start: Vector3<T>,
        edge0_vertex1_start: Vector3<T>,
        edge1_vertex0_start: Vector3<T>,
        edge1_vertex1_start: Vector3<T>,
        edge0_vertex0_end: Vector3<T>,
        edge0_vertex1_end: Vector3<T>,
        edge1_vertex0_end: Vector3<T>,
        edge1_vertex1_end: Vector3<T>,
    ) -> Self {
        Self {
            edge0_start: [edge0_vertex0_start, edge0_vertex1_start],
            edge1_start: [edge1_vertex0_start, edge1_vertex1_start],
            edge0_end: [edge0_vertex0_end, edge0_vertex1_end],
            edge1_end: [edge1_vertex0_end, edge1_vertex1_end],
        }
    }

    /// Two segments that do not move.
    #[must_use]
    pub fn stationary(edge0: [Vector3<T>; 2], edge1: [Vector3<T>; 2]) -> Self {
        Self {
            edge0_start: edge0,
            edge1_start: edge1,
            edge0_end: edge0,
            edge1_end: edge1,
        }
    }

    /// Corners in query order.
    #[must_use]
    pub fn corners(&self) -> [&Vector3<T>; 8] {
        let [a0s, a1s] = &self.edge0_start;
        let [b0s, b1s] = &self.edge1_start;
        let [a0e, a1e] = &self.edge0_end;
        let [b0e, b1e] = &self.edge1_end;
        [a0s, a1s, b0s, b1s, a0e, a1e, b0e, b1e]
    }

    /// Returns whether every corner has the same start and end position.
    #[must_use]
    pub fn is_stationary(&self) -> bool {
        self.edge0_start == self.edge0_end && self.edge1_start == self.edge1_end
    }

    /// Returns whether every coordinate is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.corners().into_iter().all(is_finite_vector)
    }
}
