use crate::models::{OrderStatus, Step, StepState};

/// Delivery lifecycle in rendering order.
pub const STEP_SEQUENCE: [OrderStatus; 4] = [
    OrderStatus::Pending,
    OrderStatus::Confirmed,
    OrderStatus::OnTheWay,
    OrderStatus::Delivered,
];

/// Projects the current status onto the fixed sequence in a single
/// left-to-right pass: steps before the match are completed, the match is
/// active, everything after is upcoming. An unknown status leaves every step
/// upcoming.
pub fn project_steps(current: Option<OrderStatus>) -> [Step; 4] {
    let mut before_active = current.is_some();
    STEP_SEQUENCE.map(|status| {
        let state = if current == Some(status) {
            before_active = false;
            StepState::Active
        } else if before_active {
            StepState::Completed
        } else {
            StepState::Upcoming
        };
        Step { status, state }
    })
}
