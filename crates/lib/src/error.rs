use crate::{Decimal, MemberId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Parser error")]
    ParserError(#[from] crate::parser::ParserError),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

/// Failures of the netting engine. All of them are deterministic in the input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DuesError {
    #[error("`{0}` is not a valid non-negative amount")]
    InvalidAmount(String),
    #[error("Purchase has no item")]
    MissingItem,
    #[error("Purchase has no participants to split with")]
    NoParticipants,
    #[error("Member {0} is not registered")]
    UnknownMember(MemberId),
    #[error("Share {0} is negative")]
    NegativeShare(Decimal),
    #[error("Member {0} cannot owe themselves")]
    SelfSettlement(MemberId),
    #[error("Action resulted in an overflow")]
    Overflow,
}
