use crate::{split_purchase, Decimal, DueLedger, DuesError, MemberId, Money, Roster};
use tracing::debug;

/// Split label of a purchase shared with every other member.
pub const EVERYONE: &str = "Everyone";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseRequest {
    pub item: String,
    pub price: String,
    pub payer: MemberId,
    pub participants: Option<Vec<MemberId>>,
}

impl PurchaseRequest {
    pub fn new(item: impl Into<String>, price: impl Into<String>, payer: MemberId) -> Self {
        Self {
            item: item.into(),
            price: price.into(),
            payer,
            participants: None,
        }
    }

    pub fn with_participants(mut self, participants: impl Into<Vec<MemberId>>) -> Self {
        self.participants = Some(participants.into());
        self
    }
}

/// An expense event, append only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Purchase {
    pub id: u32,
    pub item: String,
    pub price: Money,
    pub payer: MemberId,
    pub participants: Vec<MemberId>,
    pub share: Money,
    /// Participant names joined with `", "`, or [`EVERYONE`].
    pub split: String,
}

/// The dues ledger together with the purchases that produced it.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Book {
    dues: DueLedger,
    purchases: Vec<Purchase>,
}

impl Book {
    /// Records a purchase and settles every participant's share with the payer.
    ///
    /// The item label is trimmed and must not be empty. Nothing is written
    /// unless every step succeeds.
    pub fn record_purchase<R: Roster>(
        &mut self,
        roster: &R,
        request: PurchaseRequest,
    ) -> Result<Purchase, DuesError> {
        let item = request.item.trim();
        if item.is_empty() {
            return Err(DuesError::MissingItem);
        }
        let price = Money::parse(&request.price)?;
        let payer = request.payer;
        let split = split_purchase(roster, price, payer, request.participants.as_deref())?;
        let share = split.share.amount();

        let mut staged = self.dues.stage(split.participants().map(|p| (p, payer)));
        for participant in split.participants() {
            staged.settle_share(roster, participant, payer, share)?;
        }

        let label = if split.everyone {
            EVERYONE.to_string()
        } else {
            split
                .participants()
                .filter_map(|id| roster.member(id))
                .map(|member| member.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };
        let id = u32::try_from(self.purchases.len() + 1).map_err(|_| DuesError::Overflow)?;

        self.dues.commit(staged);
        debug!(id, payer, %price, share = %split.share, split = %label, "recorded purchase");
        let purchase = Purchase {
            id,
            item: item.to_string(),
            price,
            payer,
            participants: split.participants().collect(),
            share: split.share,
            split: label,
        };
        self.purchases.push(purchase.clone());
        Ok(purchase)
    }

    pub fn net_balance(&self, a: MemberId, b: MemberId) -> Decimal {
        self.dues.net_balance(a, b)
    }

    /// Purchases in the order they were recorded.
    pub fn list_purchases(&self) -> &[Purchase] {
        &self.purchases
    }

    pub fn dues(&self) -> &DueLedger {
        &self.dues
    }
}

#[cfg(test)]
mod tests {
    use super::{Book, PurchaseRequest, EVERYONE};
    use crate::{Decimal, DuesError, MemberId, MemberRegistry, Money};
    use rust_decimal_macros::dec;

    const ALICE: MemberId = 1;
    const BOB: MemberId = 2;
    const CAROL: MemberId = 3;

    fn money(amount: Decimal) -> Money {
        Money::from_decimal(amount).unwrap()
    }

    fn members(names: &[&str]) -> MemberRegistry {
        let mut registry = MemberRegistry::default();
        for name in names {
            registry.register(name).unwrap();
        }
        registry
    }

    #[test]
    fn groceries_then_energy() {
        let roster = members(&["Alice", "Bob", "Carol"]);
        let mut book = Book::default();

        let groceries = book
            .record_purchase(
                &roster,
                PurchaseRequest::new("groceries", "12.00", ALICE).with_participants([CAROL]),
            )
            .unwrap();
        assert_eq!(groceries.split, "Carol");
        assert_eq!(groceries.share, money(dec!(6)));
        assert_eq!(book.dues().due(CAROL, ALICE), money(dec!(6)));
        assert_eq!(book.dues().due(ALICE, CAROL), Money::ZERO);
        assert_eq!(book.net_balance(BOB, ALICE), dec!(0));

        let energy = book
            .record_purchase(&roster, PurchaseRequest::new("energy", "30.00", CAROL))
            .unwrap();
        assert_eq!(energy.split, EVERYONE);
        assert_eq!(energy.participants, vec![ALICE, BOB]);
        assert_eq!(book.dues().due(ALICE, CAROL), money(dec!(4)));
        assert_eq!(book.dues().due(CAROL, ALICE), Money::ZERO);
        assert_eq!(book.dues().due(BOB, CAROL), money(dec!(10)));
        assert_eq!(book.net_balance(CAROL, ALICE), dec!(-4));

        let items: Vec<_> = book
            .list_purchases()
            .iter()
            .map(|p| (p.id, p.item.as_str()))
            .collect();
        assert_eq!(items, vec![(1, "groceries"), (2, "energy")]);
    }

    #[test]
    fn explicit_split_label_lists_names() {
        let roster = members(&["Alice", "Bob", "Carol"]);
        let mut book = Book::default();
        let purchase = book
            .record_purchase(
                &roster,
                PurchaseRequest::new("pizza", "9", ALICE).with_participants([CAROL, BOB]),
            )
            .unwrap();
        assert_eq!(purchase.split, "Carol, Bob");
        assert_eq!(purchase.share, money(dec!(3)));
    }

    #[test]
    fn invalid_price_is_rejected() {
        let roster = members(&["Alice", "Bob"]);
        let mut book = Book::default();
        assert_eq!(
            book.record_purchase(&roster, PurchaseRequest::new("x", "abc", ALICE)),
            Err(DuesError::InvalidAmount("abc".to_string()))
        );
        assert_eq!(
            book.record_purchase(&roster, PurchaseRequest::new("x", "-5", ALICE)),
            Err(DuesError::InvalidAmount("-5".to_string()))
        );
        assert_eq!(book, Book::default());
    }

    #[test]
    fn sole_member_cannot_split() {
        let roster = members(&["Alice"]);
        let mut book = Book::default();
        assert_eq!(
            book.record_purchase(&roster, PurchaseRequest::new("lunch", "10", ALICE)),
            Err(DuesError::NoParticipants)
        );
        assert!(book.list_purchases().is_empty());
    }

    #[test]
    fn failed_purchase_leaves_no_partial_dues() {
        let roster = members(&["Alice", "Bob", "Carol"]);
        let mut book = Book::default();
        for _ in 0..2 {
            book.record_purchase(
                &roster,
                PurchaseRequest::new("tv", "99999999999999.9998", CAROL)
                    .with_participants([ALICE]),
            )
            .unwrap();
        }
        let before = book.clone();

        // Bob's share fits, Alice's overflows the edge she already has
        assert_eq!(
            book.record_purchase(
                &roster,
                PurchaseRequest::new("car", "99999999999999.9998", CAROL)
                    .with_participants([BOB, ALICE]),
            ),
            Err(DuesError::Overflow)
        );
        assert_eq!(book, before);
    }

    #[test]
    fn cents_net_back_to_exactly_zero() {
        let roster = members(&["Ann", "Ben"]);
        let (ann, ben) = (1, 2);
        let mut book = Book::default();
        book.record_purchase(
            &roster,
            PurchaseRequest::new("cake", "0.30", ann).with_participants([ben]),
        )
        .unwrap();
        for price in ["0.10", "0.20"] {
            book.record_purchase(
                &roster,
                PurchaseRequest::new("tea", price, ben).with_participants([ann]),
            )
            .unwrap();
        }

        assert_eq!(book.dues().due(ann, ben), Money::ZERO);
        assert_eq!(book.dues().due(ben, ann), Money::ZERO);
        assert_eq!(book.net_balance(ann, ben), Decimal::ZERO);
    }

    #[test]
    fn item_is_trimmed_and_required() {
        let roster = members(&["Alice", "Bob"]);
        let mut book = Book::default();
        for item in ["", "   "] {
            assert_eq!(
                book.record_purchase(&roster, PurchaseRequest::new(item, "4", ALICE)),
                Err(DuesError::MissingItem)
            );
        }
        assert_eq!(book, Book::default());

        let purchase = book
            .record_purchase(&roster, PurchaseRequest::new("  bread ", "4", ALICE))
            .unwrap();
        assert_eq!(purchase.item, "bread");
        assert_eq!(book.list_purchases()[0].item, "bread");
    }
}
