//! Headcount roll-forward with attrition, hiring and transfers

use crate::capacity_planning::models::{HeadcountFlow, HeadcountMovement};

/// One period: attrition comes off the starting headcount, then hires and
/// transfers are applied
pub fn project_headcount(
    actual_hc: f64,
    attrition_pct: f64,
    new_hires: f64,
    move_in: f64,
    move_out: f64,
) -> HeadcountFlow {
    let attrition_loss = actual_hc * attrition_pct / 100.0;
    let after_attrition = actual_hc - attrition_loss;

    HeadcountFlow {
        starting: actual_hc,
        attrition_loss,
        after_attrition,
        ending: after_attrition + new_hires + move_in - move_out,
    }
}

/// Roll headcount forward period by period, each ending feeding the next start
pub fn project_headcount_periods(
    starting_hc: f64,
    attrition_pct: f64,
    movements: &[HeadcountMovement],
) -> Vec<HeadcountFlow> {
    movements
        .iter()
        .scan(starting_hc, |current, movement| {
            let flow = project_headcount(
                *current,
                attrition_pct,
                movement.new_hires,
                movement.move_in,
                movement.move_out,
            );
            *current = flow.ending;
            Some(flow)
        })
        .collect()
}
