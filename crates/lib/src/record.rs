use strum_macros::{AsRefStr, Display, EnumString, EnumVariantNames, FromRepr};

/// One row of a replay file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Member(NewMember),
    Purchase(NewPurchase),
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display, EnumString, EnumVariantNames, FromRepr,
)]
#[strum(serialize_all = "lowercase")]
pub enum RecordKind {
    Member,
    Purchase,
}

impl Record {
    pub fn new_member(name: impl Into<String>) -> Self {
        Self::Member(NewMember { name: name.into() })
    }
    pub fn new_purchase(
        payer: impl Into<String>,
        item: impl Into<String>,
        price: impl Into<String>,
        split: Vec<String>,
    ) -> Self {
        Self::Purchase(NewPurchase {
            payer: payer.into(),
            item: item.into(),
            price: price.into(),
            split,
        })
    }

    pub fn kind(&self) -> RecordKind {
        match self {
            Self::Member(_) => RecordKind::Member,
            Self::Purchase(_) => RecordKind::Purchase,
        }
    }
}

/// Applies `T` to `self`, returning the updated state.
pub trait RecordExecutor<T>: Sized {
    type RecordError;

    fn execute(self, record: T) -> Result<Self, Self::RecordError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMember {
    pub name: String,
}

/// A purchase as written in a replay file, members referenced by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPurchase {
    pub payer: String,
    pub item: String,
    /// Kept as text so that an invalid price surfaces from the engine.
    pub price: String,
    /// Empty means everyone.
    pub split: Vec<String>,
}
