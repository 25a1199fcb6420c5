use crate::{
    record::{NewMember, NewPurchase, Record, RecordExecutor},
    Book, DuesError, MemberId, MemberRegistry, PurchaseRequest, RegistryError,
};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ReplayError {
    #[error("No member is named `{0}`")]
    UnknownMemberName(String),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Dues(#[from] DuesError),
}

/// Members and the book of their shared purchases.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Household {
    pub members: MemberRegistry,
    pub book: Book,
}

impl Household {
    fn member_id(&self, name: &str) -> Result<MemberId, ReplayError> {
        self.members
            .find_by_name(name)
            .map(|member| member.id)
            .ok_or_else(|| ReplayError::UnknownMemberName(name.to_string()))
    }

    fn request(&self, purchase: NewPurchase) -> Result<PurchaseRequest, ReplayError> {
        let payer = self.member_id(&purchase.payer)?;
        let request = PurchaseRequest::new(purchase.item, purchase.price, payer);
        if purchase.split.is_empty() {
            return Ok(request);
        }
        let participants = purchase
            .split
            .iter()
            .map(|name| self.member_id(name))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(request.with_participants(participants))
    }
}

impl RecordExecutor<NewMember> for &mut Household {
    type RecordError = ReplayError;

    fn execute(self, record: NewMember) -> Result<Self, Self::RecordError> {
        self.members.register(&record.name)?;
        Ok(self)
    }
}

impl RecordExecutor<NewPurchase> for &mut Household {
    type RecordError = ReplayError;

    fn execute(self, record: NewPurchase) -> Result<Self, Self::RecordError> {
        let request = self.request(record)?;
        self.book.record_purchase(&self.members, request)?;
        Ok(self)
    }
}

impl RecordExecutor<Record> for &mut Household {
    type RecordError = ReplayError;

    fn execute(self, record: Record) -> Result<Self, Self::RecordError> {
        match record {
            Record::Member(m) => RecordExecutor::execute(self, m),
            Record::Purchase(p) => RecordExecutor::execute(self, p),
        }
    }
}
