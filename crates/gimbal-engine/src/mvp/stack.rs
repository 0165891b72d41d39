use glam::Mat4;
use smallvec::SmallVec;
use thiserror::Error;

/// Number of cells in a rendering matrix.
pub const MATRIX_SIZE: usize = 16;

/// Inline stack depth before spilling to the heap.
///
/// Widget trees rarely nest deeper than this, so traversal stays
/// allocation-free in the common case.
const INLINE_DEPTH: usize = 8;

/// Errors raised at the stack's call boundary.
///
/// Both variants indicate a programming error in the caller, not a runtime
/// condition to recover from.
#[derive(Debug, Error, Copy, Clone, PartialEq, Eq)]
pub enum TransformError {
    /// A slice-based operation received a matrix whose length is not 16.
    #[error("matrix must have a length of 16, got {0}")]
    InvalidMatrixSize(usize),

    /// A pop was attempted with only the seeded identity remaining.
    ///
    /// Callers must never pop the identity; hitting this means a push/pop
    /// pair is mismatched somewhere in a traversal.
    #[error("cannot pop the root identity matrix")]
    EmptyStack,
}

/// Transformation history of the model-view and projection matrices.
///
/// Both stacks are seeded with identity and are never empty. Matrices on the
/// stack are never mutated in place: a caller peeks a copy, derives a new
/// matrix from it, and pushes the result.
///
/// Not thread-safe by contract — each traversal (render or hit-test) owns a
/// private `Mvp` instance.
#[derive(Debug, Clone)]
pub struct Mvp {
    model: SmallVec<[Mat4; INLINE_DEPTH]>,
    projection: SmallVec<[Mat4; INLINE_DEPTH]>,
}

impl Mvp {
    /// Creates fresh stacks seeded with identity.
    pub fn new() -> Self {
        let mut model = SmallVec::new();
        let mut projection = SmallVec::new();
        model.push(Mat4::IDENTITY);
        projection.push(Mat4::IDENTITY);
        Self { model, projection }
    }

    // ── push ──────────────────────────────────────────────────────────────

    /// Pushes a matrix onto the model-view stack.
    ///
    /// `Mat4` is `Copy`, so the stored value is independent of the caller's.
    #[inline]
    pub fn push_model(&mut self, matrix: Mat4) {
        self.model.push(matrix);
    }

    /// Pushes a matrix onto the projection stack.
    #[inline]
    pub fn push_projection(&mut self, matrix: Mat4) {
        self.projection.push(matrix);
    }

    /// Pushes a column-major 16-element slice onto the model-view stack.
    pub fn push_model_slice(&mut self, matrix: &[f32]) -> Result<(), TransformError> {
        self.model.push(mat_from_slice(matrix)?);
        Ok(())
    }

    /// Pushes a column-major 16-element slice onto the projection stack.
    pub fn push_projection_slice(&mut self, matrix: &[f32]) -> Result<(), TransformError> {
        self.projection.push(mat_from_slice(matrix)?);
        Ok(())
    }

    // ── pop ───────────────────────────────────────────────────────────────

    /// Removes and returns the top of the model-view stack.
    ///
    /// Fails with [`TransformError::EmptyStack`] if only the seeded identity
    /// remains.
    pub fn pop_model(&mut self) -> Result<Mat4, TransformError> {
        if self.model.len() <= 1 {
            return Err(TransformError::EmptyStack);
        }
        Ok(self.model.pop().unwrap())
    }

    /// Removes and returns the top of the projection stack.
    pub fn pop_projection(&mut self) -> Result<Mat4, TransformError> {
        if self.projection.len() <= 1 {
            return Err(TransformError::EmptyStack);
        }
        Ok(self.projection.pop().unwrap())
    }

    // ── peek ──────────────────────────────────────────────────────────────

    /// Returns the current top of the model-view stack by reference.
    #[inline]
    pub fn peek_model(&self) -> &Mat4 {
        self.model.last().unwrap()
    }

    /// Returns the current top of the projection stack by reference.
    #[inline]
    pub fn peek_projection(&self) -> &Mat4 {
        self.projection.last().unwrap()
    }

    /// Returns an independent copy of the model-view top.
    ///
    /// Use this when deriving a new matrix that will be pushed; the value on
    /// the stack stays untouched.
    #[inline]
    pub fn peek_copy_model(&self) -> Mat4 {
        *self.model.last().unwrap()
    }

    /// Returns an independent copy of the projection top.
    #[inline]
    pub fn peek_copy_projection(&self) -> Mat4 {
        *self.projection.last().unwrap()
    }

    // ── scoped push ───────────────────────────────────────────────────────

    /// Runs `f` with `matrix` pushed on the model-view stack.
    ///
    /// The pop is tied to a drop guard, so depth is restored on every exit
    /// path — early returns and unwinds included. Traversal code composing a
    /// child space should use this instead of a manual push/pop pair.
    pub fn with_model<R>(&mut self, matrix: Mat4, f: impl FnOnce(&mut Mvp) -> R) -> R {
        self.model.push(matrix);
        let mut guard = ModelPopGuard(self);
        f(&mut *guard.0)
    }

    /// Runs `f` with `matrix` pushed on the projection stack.
    pub fn with_projection<R>(&mut self, matrix: Mat4, f: impl FnOnce(&mut Mvp) -> R) -> R {
        self.projection.push(matrix);
        let mut guard = ProjectionPopGuard(self);
        f(&mut *guard.0)
    }

    // ── collapse ──────────────────────────────────────────────────────────

    /// Collapses the stack tops into the matrix handed to the rasterizer or
    /// the hit-test: `projection_top * model_top` (model applied first).
    #[inline]
    pub fn collapse(&self) -> Mat4 {
        *self.peek_projection() * *self.peek_model()
    }

    /// Collapses a caller-provided model matrix with the projection top.
    #[inline]
    pub fn collapse_model(&self, model: Mat4) -> Mat4 {
        *self.peek_projection() * model
    }

    /// Collapses explicit column-major slices.
    ///
    /// Fails with [`TransformError::InvalidMatrixSize`] if either slice's
    /// length is not 16.
    pub fn collapse_slices(model: &[f32], projection: &[f32]) -> Result<Mat4, TransformError> {
        let model = mat_from_slice(model)?;
        let projection = mat_from_slice(projection)?;
        Ok(projection * model)
    }

    // ── introspection ─────────────────────────────────────────────────────

    /// Current model-view stack depth, counting the seeded identity.
    #[inline]
    pub fn model_depth(&self) -> usize {
        self.model.len()
    }

    /// Current projection stack depth, counting the seeded identity.
    #[inline]
    pub fn projection_depth(&self) -> usize {
        self.projection.len()
    }
}

impl Default for Mvp {
    fn default() -> Self {
        Self::new()
    }
}

/// Pops the model matrix pushed by [`Mvp::with_model`] when the scope ends.
struct ModelPopGuard<'a>(&'a mut Mvp);

impl Drop for ModelPopGuard<'_> {
    fn drop(&mut self) {
        let popped = self.0.pop_model();
        debug_assert!(popped.is_ok(), "scoped model pop had no matching push");
    }
}

struct ProjectionPopGuard<'a>(&'a mut Mvp);

impl Drop for ProjectionPopGuard<'_> {
    fn drop(&mut self) {
        let popped = self.0.pop_projection();
        debug_assert!(popped.is_ok(), "scoped projection pop had no matching push");
    }
}

fn mat_from_slice(matrix: &[f32]) -> Result<Mat4, TransformError> {
    if matrix.len() != MATRIX_SIZE {
        return Err(TransformError::InvalidMatrixSize(matrix.len()));
    }
    Ok(Mat4::from_cols_slice(matrix))
}
