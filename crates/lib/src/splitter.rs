use crate::{DuesError, MemberId, Money, Roster};

/// Who owes what for one purchase.
///
/// The price is cut into `divisor` equal parts. The payer keeps one part and
/// every participant owes one, so `shares` adds up to
/// `price * participants / (participants + 1)`, never the full price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub divisor: u32,
    pub share: Money,
    /// True when no explicit participant list was given.
    pub everyone: bool,
    pub shares: Vec<(MemberId, Money)>,
}

impl Split {
    pub fn participants(&self) -> impl Iterator<Item = MemberId> + '_ {
        self.shares.iter().map(|(member, _)| *member)
    }
}

/// Resolves the participants of a purchase and their share of `price`.
///
/// An explicit list is deduplicated in order and never charges the payer. An
/// absent or empty list means every other registered member.
pub fn split_purchase<R: Roster>(
    roster: &R,
    price: Money,
    payer: MemberId,
    participants: Option<&[MemberId]>,
) -> Result<Split, DuesError> {
    if !roster.contains(payer) {
        return Err(DuesError::UnknownMember(payer));
    }

    let (members, divisor, everyone) = match participants {
        Some(explicit) if !explicit.is_empty() => {
            let mut members: Vec<MemberId> = Vec::with_capacity(explicit.len());
            for &id in explicit {
                if !roster.contains(id) {
                    return Err(DuesError::UnknownMember(id));
                }
                if id != payer && !members.contains(&id) {
                    members.push(id);
                }
            }
            let divisor = members.len() + 1;
            (members, divisor, false)
        }
        _ => {
            let members: Vec<MemberId> = roster
                .member_ids()
                .into_iter()
                .filter(|&id| id != payer)
                .collect();
            (members, roster.member_count(), true)
        }
    };

    if members.is_empty() {
        return Err(DuesError::NoParticipants);
    }

    let divisor = u32::try_from(divisor).map_err(|_| DuesError::Overflow)?;
    let share = price.split(divisor).ok_or(DuesError::NoParticipants)?;

    Ok(Split {
        divisor,
        share,
        everyone,
        shares: members.into_iter().map(|member| (member, share)).collect(),
    })
}
