/// Generation workflow phase. Triggers are enabled only in `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GenerationPhase {
    #[default]
    Idle,
    Requesting,
    Succeeded,
    Failed,
}

impl GenerationPhase {
    pub const fn accepts_triggers(self) -> bool {
        matches!(self, Self::Idle)
    }

    pub const fn is_settled(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}
