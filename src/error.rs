#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unknown gate type '{0}'")]
    UnknownGateType(String),

    #[error("Gate '{gate}' must designate exactly one output instance, found {found}")]
    NoDesignatedOutput { gate: String, found: usize },

    #[error("Gate type '{0}' is already defined")]
    DuplicateGateType(String),

    #[error("Invalid body for gate '{gate}': {reason}")]
    InvalidBody { gate: String, reason: String },

    #[error("Unknown circuit '{0}'")]
    UnknownCircuit(String),

    #[error("Evaluation of '{gate}' did not settle within {passes} passes")]
    DivergedEvaluation { gate: String, passes: usize },

    #[error("Component {component} reads from component {source_index}, which does not exist")]
    DanglingSource {
        component: usize,
        source_index: usize,
    },

    #[error("Expected {expected} primary inputs, got {found}")]
    InputCountMismatch { expected: usize, found: usize },

    #[error("Truth table over {arity} inputs exceeds the limit of {limit}")]
    TableTooLarge { arity: usize, limit: usize },

    #[error("No component with index {0}")]
    InvalidComponent(usize),

    #[error("Component {component} has {arity} input slots, can't access slot {slot}")]
    InvalidSlot {
        component: usize,
        slot: usize,
        arity: usize,
    },

    #[error("No wire with index {0}")]
    InvalidWire(usize),

    #[error("Component {0} has no output port")]
    NoOutputPort(usize),

    #[error("Grid position ({x}, {y}) lies outside the grid")]
    OutOfGrid { x: i32, y: i32 },

    #[error("Grid position ({x}, {y}) is already occupied")]
    PositionOccupied { x: i32, y: i32 },

    #[error("Invalid signal '{0}', expected one of U, 0, 1")]
    InvalidSignal(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
