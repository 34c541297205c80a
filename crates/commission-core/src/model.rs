use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::CommissionError;
use crate::types::{DealId, Money, UserId};
use crate::CommissionResult;

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// A salesperson and their monthly sales target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    /// Monthly sales target. Absent for policies that ignore it.
    #[serde(default)]
    pub objective: Money,
}

/// A closed deal attributed to one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    pub id: DealId,
    pub amount: Money,
    /// Owning user id
    pub user: UserId,
    /// Calendar date string, e.g. "2018-05-25". Only the month prefix is read.
    #[serde(default)]
    pub payment_date: String,
}

/// Users and deals as loaded from the input document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommissionInput {
    pub users: Vec<User>,
    pub deals: Vec<Deal>,
}

// ---------------------------------------------------------------------------
// User lookup
// ---------------------------------------------------------------------------

/// Id-keyed index over the input users, preserving their input position.
#[derive(Debug)]
pub struct UserDirectory<'a> {
    users: &'a [User],
    positions: HashMap<UserId, usize>,
}

impl<'a> UserDirectory<'a> {
    /// Index `users` by id. Duplicate ids are rejected.
    pub fn new(users: &'a [User]) -> CommissionResult<Self> {
        let mut positions = HashMap::with_capacity(users.len());
        for (idx, user) in users.iter().enumerate() {
            if positions.insert(user.id, idx).is_some() {
                return Err(CommissionError::InvalidInput {
                    field: "users".into(),
                    reason: format!("duplicate user id {}", user.id),
                });
            }
        }
        Ok(Self { users, positions })
    }

    /// Position of the deal's owner in the input user list.
    pub fn position_of(&self, deal: &Deal) -> CommissionResult<usize> {
        self.positions
            .get(&deal.user)
            .copied()
            .ok_or(CommissionError::UnknownUser {
                deal_id: deal.id,
                user_id: deal.user,
            })
    }

    pub fn users(&self) -> &'a [User] {
        self.users
    }
}

/// Reject amounts below zero before they reach any accumulator.
pub(crate) fn ensure_non_negative_amount(deal: &Deal) -> CommissionResult<()> {
    if deal.amount < Decimal::ZERO {
        return Err(CommissionError::InvalidInput {
            field: format!("deals[{}].amount", deal.id),
            reason: "Deal amount cannot be negative".into(),
        });
    }
    Ok(())
}

/// Reject objectives below zero.
pub(crate) fn ensure_non_negative_objective(user: &User) -> CommissionResult<()> {
    if user.objective < Decimal::ZERO {
        return Err(CommissionError::InvalidInput {
            field: format!("users[{}].objective", user.id),
            reason: "Objective cannot be negative".into(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn user(id: UserId) -> User {
        User {
            id,
            name: format!("user-{id}"),
            objective: dec!(1000),
        }
    }

    fn deal(id: DealId, user: UserId) -> Deal {
        Deal {
            id,
            amount: dec!(100),
            user,
            payment_date: "2018-05-25".into(),
        }
    }

    #[test]
    fn test_directory_resolves_by_id_not_position() {
        let users = vec![user(7), user(3)];
        let dir = UserDirectory::new(&users).unwrap();
        assert_eq!(dir.position_of(&deal(1, 3)).unwrap(), 1);
        assert_eq!(dir.users()[dir.position_of(&deal(1, 7)).unwrap()].id, 7);
    }

    #[test]
    fn test_directory_unknown_user() {
        let users = vec![user(1)];
        let dir = UserDirectory::new(&users).unwrap();
        match dir.position_of(&deal(42, 9)) {
            Err(CommissionError::UnknownUser { deal_id, user_id }) => {
                assert_eq!(deal_id, 42);
                assert_eq!(user_id, 9);
            }
            other => panic!("expected UnknownUser, got {other:?}"),
        }
    }

    #[test]
    fn test_directory_rejects_duplicate_ids() {
        let users = vec![user(1), user(1)];
        assert!(matches!(
            UserDirectory::new(&users),
            Err(CommissionError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_input_deserializes_json_numbers() {
        let json = r#"{
            "users": [{"id": 1, "name": "Bob", "objective": 1000}],
            "deals": [{"id": 1, "amount": 850.5, "user": 1, "payment_date": "2018-05-25"}]
        }"#;
        let input: CommissionInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.users[0].objective, dec!(1000));
        assert_eq!(input.deals[0].amount, dec!(850.5));
    }

    #[test]
    fn test_objective_and_date_default_when_absent() {
        let json = r#"{
            "users": [{"id": 1, "name": "Bob"}],
            "deals": [{"id": 1, "amount": 10, "user": 1}]
        }"#;
        let input: CommissionInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.users[0].objective, Decimal::ZERO);
        assert!(input.deals[0].payment_date.is_empty());
    }

    #[test]
    fn test_negative_amount_rejected() {
        let mut d = deal(1, 1);
        d.amount = dec!(-1);
        assert!(ensure_non_negative_amount(&d).is_err());
    }
}
