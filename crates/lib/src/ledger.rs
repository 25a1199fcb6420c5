use crate::{Decimal, DuesError, MemberId, Money, Roster};
use std::collections::HashMap;
use tracing::trace;

/// `owner` owes `to` the given amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DueEdge {
    pub owner: MemberId,
    pub to: MemberId,
    pub amount: Money,
}

/// Pairwise debts between members.
///
/// Both directions of a pair are stored, and at least one of them is always
/// zero. An edge is materialized the first time its pair interacts and is
/// kept afterwards, even once it nets back to zero.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct DueLedger {
    edges: HashMap<(MemberId, MemberId), Money>,
}

impl DueLedger {
    /// What `owner` owes `to`, zero when the pair never interacted.
    pub fn due(&self, owner: MemberId, to: MemberId) -> Money {
        self.edges.get(&(owner, to)).copied().unwrap_or_default()
    }

    /// Positive when `a` owes `b`, negative when `b` owes `a`.
    pub fn net_balance(&self, a: MemberId, b: MemberId) -> Decimal {
        self.due(a, b).amount() - self.due(b, a).amount()
    }

    /// Adds `share` to what `debtor` owes `creditor` and nets it against what
    /// `creditor` owes `debtor`.
    pub fn settle_share<R: Roster>(
        &mut self,
        roster: &R,
        debtor: MemberId,
        creditor: MemberId,
        share: Decimal,
    ) -> Result<(), DuesError> {
        for member in [debtor, creditor] {
            if !roster.contains(member) {
                return Err(DuesError::UnknownMember(member));
            }
        }
        if debtor == creditor {
            return Err(DuesError::SelfSettlement(debtor));
        }
        let share = Money::from_decimal(share)?;

        let forward = self
            .due(debtor, creditor)
            .checked_add(share)
            .ok_or(DuesError::Overflow)?;
        let backward = self.due(creditor, debtor);
        let m = forward.min(backward);
        // m never exceeds either side
        let forward = forward.checked_sub(m).ok_or(DuesError::Overflow)?;
        let backward = backward.checked_sub(m).ok_or(DuesError::Overflow)?;

        trace!(debtor, creditor, %share, %forward, %backward, "netted share");
        self.edges.insert((debtor, creditor), forward);
        self.edges.insert((creditor, debtor), backward);
        Ok(())
    }

    /// Every materialized edge, ordered by `(owner, to)`.
    pub fn iter(&self) -> impl Iterator<Item = DueEdge> {
        let mut edges: Vec<DueEdge> = self
            .edges
            .iter()
            .map(|(&(owner, to), &amount)| DueEdge { owner, to, amount })
            .collect();
        edges.sort_unstable_by_key(|edge| (edge.owner, edge.to));
        edges.into_iter()
    }

    /// Copies both directions of every given pair into a scratch ledger.
    pub(crate) fn stage(&self, pairs: impl IntoIterator<Item = (MemberId, MemberId)>) -> Self {
        let mut staged = Self::default();
        for (a, b) in pairs {
            for key in [(a, b), (b, a)] {
                if let Some(amount) = self.edges.get(&key) {
                    staged.edges.insert(key, *amount);
                }
            }
        }
        staged
    }

    /// Writes back the edges of a ledger produced by [`DueLedger::stage`].
    pub(crate) fn commit(&mut self, staged: Self) {
        self.edges.extend(staged.edges);
    }
}

#[cfg(test)]
mod tests {
    use super::{DueEdge, DueLedger};
    use crate::{Decimal, DuesError, MemberId, MemberRegistry, Money};
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    const ALICE: MemberId = 1;
    const BOB: MemberId = 2;
    const CAROL: MemberId = 3;

    fn money(amount: Decimal) -> Money {
        Money::from_decimal(amount).unwrap()
    }

    fn members() -> MemberRegistry {
        let mut registry = MemberRegistry::default();
        for name in ["Alice", "Bob", "Carol"] {
            registry.register(name).unwrap();
        }
        registry
    }

    #[test]
    fn first_share_creates_both_edges() {
        let roster = members();
        let mut ledger = DueLedger::default();
        ledger.settle_share(&roster, CAROL, ALICE, dec!(6)).unwrap();

        assert_eq!(
            ledger.iter().collect::<Vec<_>>(),
            vec![
                DueEdge {
                    owner: ALICE,
                    to: CAROL,
                    amount: Money::ZERO
                },
                DueEdge {
                    owner: CAROL,
                    to: ALICE,
                    amount: money(dec!(6))
                },
            ]
        );
        assert_eq!(ledger.due(BOB, ALICE), Money::ZERO);
    }

    #[test]
    fn opposing_debts_are_netted() {
        let roster = members();
        let mut ledger = DueLedger::default();
        ledger.settle_share(&roster, CAROL, ALICE, dec!(6)).unwrap();
        ledger.settle_share(&roster, ALICE, CAROL, dec!(10)).unwrap();

        assert_eq!(ledger.due(ALICE, CAROL), money(dec!(4)));
        assert_eq!(ledger.due(CAROL, ALICE), Money::ZERO);
        assert_eq!(ledger.net_balance(ALICE, CAROL), dec!(4));
        assert_eq!(ledger.net_balance(CAROL, ALICE), dec!(-4));
    }

    #[test]
    fn exact_opposite_debt_clears_the_pair() {
        let roster = members();
        let mut ledger = DueLedger::default();
        ledger.settle_share(&roster, ALICE, BOB, dec!(7.25)).unwrap();
        ledger.settle_share(&roster, BOB, ALICE, dec!(7.25)).unwrap();

        assert_eq!(ledger.due(ALICE, BOB), Money::ZERO);
        assert_eq!(ledger.due(BOB, ALICE), Money::ZERO);
        // zeroed edges stay materialized
        assert_eq!(ledger.iter().count(), 2);
    }

    #[test]
    fn zero_share_changes_nothing() {
        let roster = members();
        let mut ledger = DueLedger::default();
        ledger.settle_share(&roster, ALICE, BOB, dec!(3)).unwrap();
        let before = ledger.clone();
        ledger.settle_share(&roster, ALICE, BOB, dec!(0)).unwrap();
        ledger.settle_share(&roster, BOB, ALICE, dec!(0)).unwrap();
        assert_eq!(ledger, before);
    }

    #[test]
    fn rejects_bad_input_without_mutating() {
        let roster = members();
        let mut ledger = DueLedger::default();
        assert_eq!(
            ledger.settle_share(&roster, ALICE, 42, dec!(1)),
            Err(DuesError::UnknownMember(42))
        );
        assert_eq!(
            ledger.settle_share(&roster, ALICE, BOB, dec!(-1)),
            Err(DuesError::NegativeShare(dec!(-1)))
        );
        assert_eq!(
            ledger.settle_share(&roster, BOB, BOB, dec!(1)),
            Err(DuesError::SelfSettlement(BOB))
        );
        assert_eq!(ledger, DueLedger::default());
    }

    #[test]
    fn overflow_is_reported() {
        let roster = members();
        let mut ledger = DueLedger::default();
        ledger
            .settle_share(&roster, ALICE, BOB, dec!(60000000000000))
            .unwrap();
        let before = ledger.clone();
        assert_eq!(
            ledger.settle_share(&roster, ALICE, BOB, dec!(60000000000000)),
            Err(DuesError::Overflow)
        );
        assert_eq!(
            ledger.settle_share(&roster, ALICE, BOB, dec!(0.00001)),
            Err(DuesError::InvalidAmount("0.00001".to_string()))
        );
        assert_eq!(ledger, before);
    }

    proptest! {
        #[test]
        fn one_direction_per_pair_and_symmetric_balances(
            steps in proptest::collection::vec((1u32..=3, 1u32..=3, 0i64..5_000_000), 0..64)
        ) {
            let roster = members();
            let mut ledger = DueLedger::default();
            for (debtor, creditor, units) in steps {
                if debtor == creditor {
                    continue;
                }
                ledger
                    .settle_share(&roster, debtor, creditor, Decimal::new(units, 4))
                    .unwrap();
            }

            for a in ALICE..=CAROL {
                for b in ALICE..=CAROL {
                    prop_assert!(ledger.due(a, b).min(ledger.due(b, a)).is_zero());
                    prop_assert_eq!(ledger.net_balance(a, b), -ledger.net_balance(b, a));
                }
            }
        }
    }
}
