use track_types::{EntityKind, PrincipalId};

use crate::error::LedgerError;

/// Ownership verification gate.
///
/// Every ownership-gated operation runs through this check before touching
/// state. The rule is plain equality on principals: the ledger holds no
/// opinion about delegation or roles, so a caller either is the recorded
/// owner or the operation is refused.
pub struct OwnershipGuard;

impl OwnershipGuard {
    /// Pass if `caller` is the recorded owner of the entity, otherwise
    /// refuse with [`LedgerError::Unauthorized`] naming the entity.
    pub fn ensure_owner(
        recorded: &PrincipalId,
        caller: &PrincipalId,
        kind: EntityKind,
        id: u64,
    ) -> Result<(), LedgerError> {
        if recorded == caller {
            Ok(())
        } else {
            Err(LedgerError::Unauthorized { kind, id })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_passes() {
        let owner = PrincipalId::account("owner");
        assert!(OwnershipGuard::ensure_owner(&owner, &owner, EntityKind::Item, 1).is_ok());
    }

    #[test]
    fn non_owner_is_refused_with_entity_details() {
        let owner = PrincipalId::account("owner");
        let intruder = PrincipalId::account("intruder");

        let error =
            OwnershipGuard::ensure_owner(&owner, &intruder, EntityKind::Item, 7).unwrap_err();
        assert_eq!(
            error,
            LedgerError::Unauthorized {
                kind: EntityKind::Item,
                id: 7
            }
        );
    }

    #[test]
    fn check_is_symmetric_in_state() {
        // The guard reads nothing but its arguments: the same pair always
        // produces the same answer.
        let a = PrincipalId::account("a");
        let b = PrincipalId::account("b");

        assert!(OwnershipGuard::ensure_owner(&a, &b, EntityKind::Batch, 3).is_err());
        assert!(OwnershipGuard::ensure_owner(&a, &b, EntityKind::Batch, 3).is_err());
        assert!(OwnershipGuard::ensure_owner(&b, &b, EntityKind::Batch, 3).is_ok());
    }
}
