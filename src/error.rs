/// Errors returned by objectives, transforms and the constraint machinery.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when a weight vector is not exactly one-dimensional.
    #[error("invalid weights: expected a 1-dimensional vector, got {ndim} dimensions")]
    InvalidWeights {
        /// The dimensionality of the rejected weights.
        ndim: usize,
    },

    /// Returned when the constraint sharpness is not a positive finite number.
    #[error("invalid eta: {0} must be positive and finite")]
    InvalidEta(f64),

    /// Returned when the trailing outcome axis does not match the weight length.
    #[error(
        "outcome dimension mismatch: expected a trailing axis of size {expected}, got shape {shape:?}"
    )]
    OutcomeMismatch {
        /// The number of outcomes the weights expect.
        expected: usize,
        /// The shape that was supplied.
        shape: Vec<usize>,
    },

    /// Returned when an objective's q-batch size disagrees with the inputs `X`.
    #[error(
        "output shape mismatch: the objective produced shape {output:?}, but X of shape {x:?} \
         implies a different q-batch size (output[-1] must equal X[-2])"
    )]
    OutputShapeMismatch {
        /// Shape of the objective output.
        output: Vec<usize>,
        /// Shape of the candidate inputs.
        x: Vec<usize>,
    },

    /// Returned when two arrays cannot be broadcast to a common shape.
    #[error("shapes {left:?} and {right:?} cannot be broadcast together")]
    Broadcast {
        /// Shape of the left operand.
        left: Vec<usize>,
        /// Shape of the right operand.
        right: Vec<usize>,
    },

    /// Returned when a posterior's mean and covariance shapes are inconsistent.
    #[error("invalid posterior: {0}")]
    InvalidPosterior(String),

    /// Returned when an internal reshape fails.
    #[error("array layout error: {0}")]
    Shape(#[from] ndarray::ShapeError),
}

pub type Result<T> = core::result::Result<T, Error>;
