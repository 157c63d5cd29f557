/// One move through the cost table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraceStep {
    /// Pair a residue of S with a residue of T.
    Diagonal,
    /// Pair a residue of S with a gap.
    Up,
    /// Pair a gap with a residue of T.
    Left,
}

impl TraceStep {
    pub fn symbol(&self) -> char {
        match self {
            TraceStep::Diagonal => 'D',
            TraceStep::Up => 'U',
            TraceStep::Left => 'L',
        }
    }

    /// The same step with the roles of S and T exchanged.
    pub fn transposed(&self) -> Self {
        match self {
            TraceStep::Diagonal => TraceStep::Diagonal,
            TraceStep::Up => TraceStep::Left,
            TraceStep::Left => TraceStep::Up,
        }
    }
}

/// A path through the cost table, from (0, 0) to (S, T).
#[derive(Default, Clone, PartialEq, Eq)]
pub struct Trace {
    pub steps: Vec<TraceStep>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            steps: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn push(&mut self, step: TraceStep) {
        self.steps.push(step);
    }

    /// Append another trace, which must start where this one ends.
    pub fn append(&mut self, other: &mut Trace) {
        self.steps.append(&mut other.steps);
    }

    pub fn reverse(&mut self) {
        self.steps.reverse();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TraceStep> {
        self.steps.iter()
    }

    pub fn transposed(&self) -> Self {
        Self {
            steps: self.steps.iter().map(TraceStep::transposed).collect(),
        }
    }

    /// The number of residues of S the trace consumes.
    pub fn s_consumed(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| matches!(s, TraceStep::Diagonal | TraceStep::Up))
            .count()
    }

    /// The number of residues of T the trace consumes.
    pub fn t_consumed(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| matches!(s, TraceStep::Diagonal | TraceStep::Left))
            .count()
    }
}

impl std::fmt::Debug for Trace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.steps
            .iter()
            .try_for_each(|step| write!(f, "{}", step.symbol()))
    }
}
