use crate::{Book, Decimal, DuesError, MemberId, Purchase, PurchaseRequest, Roster};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A [`Book`] that can be handed to concurrent request handlers.
///
/// Every purchase is recorded under the write lock, so netting never
/// interleaves. A poisoned lock is recovered: purchases are staged and only
/// committed once nothing can fail.
#[derive(Default, Debug, Clone)]
pub struct SharedBook {
    inner: Arc<RwLock<Book>>,
}

impl SharedBook {
    pub fn new(book: Book) -> Self {
        Self {
            inner: Arc::new(RwLock::new(book)),
        }
    }

    pub fn record_purchase<R: Roster>(
        &self,
        roster: &R,
        request: PurchaseRequest,
    ) -> Result<Purchase, DuesError> {
        self.write().record_purchase(roster, request)
    }

    pub fn net_balance(&self, a: MemberId, b: MemberId) -> Decimal {
        self.read().net_balance(a, b)
    }

    pub fn list_purchases(&self) -> Vec<Purchase> {
        self.read().list_purchases().to_vec()
    }

    /// A consistent copy of the current state.
    pub fn snapshot(&self) -> Book {
        self.read().clone()
    }

    fn read(&self) -> RwLockReadGuard<'_, Book> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Book> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}
