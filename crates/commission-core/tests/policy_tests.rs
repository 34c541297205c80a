use commission_core::bracketed::calculate_bracketed_commissions;
use commission_core::flat_rate::{calculate_flat_rate_commissions, FlatRateInput};
use commission_core::model::CommissionInput;
use commission_core::tiered::calculate_tiered_commissions;
use commission_core::types::{Money, UserCommission};
use commission_core::CommissionError;
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

const MONTH_OF_DEALS: &str = r#"{
    "users": [
        {"id": 1, "name": "John", "objective": 1000},
        {"id": 2, "name": "Mary", "objective": 3000},
        {"id": 3, "name": "Ali", "objective": 500}
    ],
    "deals": [
        {"id": 1, "amount": 800, "user": 1, "payment_date": "2018-05-25"},
        {"id": 2, "amount": 1500, "user": 2, "payment_date": "2018-05-25"},
        {"id": 3, "amount": 400, "user": 1, "payment_date": "2018-05-26"},
        {"id": 4, "amount": 700, "user": 2, "payment_date": "2018-05-27"},
        {"id": 5, "amount": 200, "user": 2, "payment_date": "2018-05-28"}
    ]
}"#;

// ===========================================================================
// Flat-rate policy
// ===========================================================================

#[test]
fn test_flat_rate_month() {
    let input: FlatRateInput = serde_json::from_str(MONTH_OF_DEALS).unwrap();
    let out = calculate_flat_rate_commissions(&input).unwrap().result;

    assert_eq!(
        out.commissions,
        vec![
            // 2 deals, 1200 total: 10%
            UserCommission {
                user_id: 1,
                commission: dec!(120),
            },
            // 3 deals, 2400 total: 20% + 500 bonus
            UserCommission {
                user_id: 2,
                commission: dec!(980),
            },
            UserCommission {
                user_id: 3,
                commission: dec!(0),
            },
        ]
    );
}

#[test]
fn test_flat_rate_schedule_from_json() {
    let input: FlatRateInput = serde_json::from_str(
        r#"{
            "users": [{"id": 1, "name": "John"}],
            "deals": [{"id": 1, "amount": 1000, "user": 1}],
            "schedule": {
                "small_book_rate": 0.15,
                "large_book_rate": 0.25,
                "small_book_max_deals": 1,
                "bonus": 100,
                "bonus_threshold": 1000
            }
        }"#,
    )
    .unwrap();
    let out = calculate_flat_rate_commissions(&input).unwrap().result;
    assert_eq!(out.commissions[0].commission, dec!(250));
}

// ===========================================================================
// Bracketed policy
// ===========================================================================

#[test]
fn test_bracketed_month() {
    let input: CommissionInput = serde_json::from_str(MONTH_OF_DEALS).unwrap();
    let out = calculate_bracketed_commissions(&input).unwrap().result;

    // John: 1200 vs 1000 -> 25 + 50 + 200 * 15% = 105
    assert_eq!(out.commissions[0].commission, dec!(105));
    // Mary: 2400 vs 3000 -> 1500 * 5% + 900 * 10% = 165
    assert_eq!(out.commissions[1].commission, dec!(165));
    assert_eq!(out.commissions[2].commission, dec!(0));
}

#[test]
fn test_bracketed_matches_tiered_for_single_month() {
    // Within one month the tiered fold telescopes to the bracketed total
    let input: CommissionInput = serde_json::from_str(MONTH_OF_DEALS).unwrap();
    let bracketed = calculate_bracketed_commissions(&input).unwrap().result;
    let tiered = calculate_tiered_commissions(&input).unwrap().result;

    for (b, t) in bracketed.commissions.iter().zip(&tiered.commissions) {
        assert_eq!(b.user_id, t.user_id);
        let tiered_total: Money = t.commission.values().copied().sum();
        assert_eq!(b.commission, tiered_total);
    }
}

// ===========================================================================
// Shared error behaviour
// ===========================================================================

#[test]
fn test_unknown_user_in_every_policy() {
    let json = r#"{
        "users": [{"id": 1, "name": "John", "objective": 1000}],
        "deals": [{"id": 8, "amount": 10, "user": 2, "payment_date": "2018-05-25"}]
    }"#;
    let input: CommissionInput = serde_json::from_str(json).unwrap();
    let flat: FlatRateInput = serde_json::from_str(json).unwrap();

    assert!(matches!(
        calculate_tiered_commissions(&input),
        Err(CommissionError::UnknownUser { deal_id: 8, user_id: 2 })
    ));
    assert!(matches!(
        calculate_bracketed_commissions(&input),
        Err(CommissionError::UnknownUser { deal_id: 8, user_id: 2 })
    ));
    assert!(matches!(
        calculate_flat_rate_commissions(&flat),
        Err(CommissionError::UnknownUser { deal_id: 8, user_id: 2 })
    ));
}

#[test]
fn test_error_messages_name_the_deal() {
    let input: CommissionInput = serde_json::from_str(
        r#"{
            "users": [{"id": 1, "name": "John", "objective": 1000}],
            "deals": [{"id": 4, "amount": 10, "user": 1, "payment_date": "05/2018"}]
        }"#,
    )
    .unwrap();
    let err = calculate_tiered_commissions(&input).unwrap_err();
    assert!(err.to_string().contains("deal 4"));
    assert!(err.to_string().contains("05/2018"));
}
