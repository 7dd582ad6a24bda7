use super::*;
use crate::models::BookedInterval;

fn d(s: &str) -> Day {
    s.parse().unwrap()
}

fn june_index() -> AvailabilityIndex {
    AvailabilityIndex::new(
        vec![BookedInterval::new(d("2024-06-10"), d("2024-06-12"))],
        d("2024-06-01"),
    )
}

#[test]
fn test_free_range_completes() {
    let index = AvailabilityIndex::empty(d("2024-06-01"));
    let state = evaluate_selection(&DateRange::new(d("2024-06-05"), d("2024-06-07")), &index);
    assert_eq!(
        state,
        SelectionState::Complete {
            from: d("2024-06-05"),
            to: d("2024-06-07"),
        }
    );
}

#[test]
fn test_range_over_booking_keeps_start() {
    let state = evaluate_selection(
        &DateRange::new(d("2024-06-08"), d("2024-06-15")),
        &june_index(),
    );
    assert_eq!(state, SelectionState::Anchored { from: d("2024-06-08") });
}

#[test]
fn test_range_ending_on_booking_start_rejected() {
    let state = evaluate_selection(
        &DateRange::new(d("2024-06-08"), d("2024-06-10")),
        &june_index(),
    );
    assert_eq!(state, SelectionState::Anchored { from: d("2024-06-08") });
}

#[test]
fn test_range_reaching_into_past_rejected() {
    let state = evaluate_selection(
        &DateRange::new(d("2024-05-30"), d("2024-06-03")),
        &june_index(),
    );
    assert_eq!(state, SelectionState::Anchored { from: d("2024-05-30") });
}

#[test]
fn test_anchor_only_always_accepted() {
    // Even a blocked anchor passes here; the end pick re-checks it.
    let state = evaluate_selection(&DateRange::anchor(d("2024-06-11")), &june_index());
    assert_eq!(state, SelectionState::Anchored { from: d("2024-06-11") });
}

#[test]
fn test_single_day_range() {
    let index = june_index();
    assert_eq!(
        evaluate_selection(&DateRange::new(d("2024-06-01"), d("2024-06-01")), &index),
        SelectionState::Complete {
            from: d("2024-06-01"),
            to: d("2024-06-01"),
        }
    );
    assert_eq!(
        evaluate_selection(&DateRange::new(d("2024-06-11"), d("2024-06-11")), &index),
        SelectionState::Anchored { from: d("2024-06-11") }
    );
}

#[test]
fn test_click_lifecycle() {
    let index = june_index();
    let state = SelectionState::None;

    let state = state.click(d("2024-06-03"), &index);
    assert_eq!(state, SelectionState::Anchored { from: d("2024-06-03") });

    let state = state.click(d("2024-06-06"), &index);
    assert_eq!(
        state,
        SelectionState::Complete {
            from: d("2024-06-03"),
            to: d("2024-06-06"),
        }
    );
    assert_eq!(
        state.range(),
        Some(DateRange::new(d("2024-06-03"), d("2024-06-06")))
    );

    // A click after completion starts over.
    let state = state.click(d("2024-06-20"), &index);
    assert_eq!(state, SelectionState::Anchored { from: d("2024-06-20") });

    assert_eq!(state.reset(), SelectionState::None);
}

#[test]
fn test_click_across_booking_collapses_to_anchor() {
    let index = june_index();
    let state = SelectionState::Anchored { from: d("2024-06-08") }.click(d("2024-06-15"), &index);
    assert_eq!(state, SelectionState::Anchored { from: d("2024-06-08") });
}

#[test]
fn test_click_before_anchor_orders_range() {
    let index = june_index();
    let state = SelectionState::Anchored { from: d("2024-06-07") }.click(d("2024-06-04"), &index);
    assert_eq!(
        state,
        SelectionState::Complete {
            from: d("2024-06-04"),
            to: d("2024-06-07"),
        }
    );
}

#[test]
fn test_click_on_disabled_day_is_ignored() {
    let index = june_index();
    let none = SelectionState::None;
    assert_eq!(none.click(d("2024-06-11"), &index), none);
    assert_eq!(none.click(d("2024-05-20"), &index), none);

    let anchored = SelectionState::Anchored { from: d("2024-06-03") };
    assert_eq!(anchored.click(d("2024-06-12"), &index), anchored);
}

#[test]
fn test_serde_shape() {
    let state = SelectionState::Complete {
        from: d("2024-06-03"),
        to: d("2024-06-06"),
    };
    let json = serde_json::to_value(state).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"state": "complete", "from": "2024-06-03", "to": "2024-06-06"})
    );
    let none: SelectionState = serde_json::from_str(r#"{"state":"none"}"#).unwrap();
    assert_eq!(none, SelectionState::None);
}
