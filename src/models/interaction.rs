use serde::{Deserialize, Serialize};

/// Where a property sits in a user's ledger.
///
/// Liked and Loved are mutually exclusive; every change goes through one of
/// the transition functions below so the ledger can never hold both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Interaction {
    #[default]
    Unseen,
    Liked,
    Loved,
}

impl Interaction {
    /// Swipe right. Never downgrades a loved property.
    pub fn like(self) -> Self {
        match self {
            Self::Unseen | Self::Liked => Self::Liked,
            Self::Loved => Self::Loved,
        }
    }

    /// Swipe up or tap the heart.
    pub fn love(self) -> Self {
        Self::Loved
    }

    /// Drop back to liked; the property stays saved.
    pub fn unlove(self) -> Self {
        match self {
            Self::Loved => Self::Liked,
            other => other,
        }
    }

    pub fn clear(self) -> Self {
        Self::Unseen
    }

    pub fn is_loved(self) -> bool {
        self == Self::Loved
    }

    pub fn is_saved(self) -> bool {
        self != Self::Unseen
    }
}
