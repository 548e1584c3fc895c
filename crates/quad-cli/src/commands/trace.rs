use quad_core::{Refinement, RootStep};

const RULE: &str = "--------------------";

/// Renders adaptive refinements as a fixed-width table.
pub fn refinement_table(method: &str, accuracy: f64, events: &[Refinement]) -> String {
    let mut out = format!(
        "\n INTEGRATION using {method}\n Requested accuracy = {accuracy:?}\n Level  {:<20}  {:<20}  {:<20}\n -----  {RULE}  {RULE}  {RULE}\n",
        "Subintervals", "Estimate", "Change"
    );
    for event in events {
        out.push_str(&format!(
            "{:>6}  {:<20}  {:<20}  {:<20}\n",
            event.level,
            event.subintervals,
            format!("{:?}", event.estimate),
            format!("{:?}", event.change),
        ));
    }
    out
}

/// Renders root-finding steps as a fixed-width table.
pub fn root_table(algorithm: &str, accuracy: f64, steps: &[RootStep]) -> String {
    let mut out = format!(
        "\n ROOT FINDING using {algorithm}\n Requested accuracy = {accuracy:?}\n Step     Guess For Root          Step Size           Function Value\n ----  {RULE}  {RULE}  {RULE}\n"
    );
    for step in steps {
        out.push_str(&format!(
            "{:>5}  {:<20}  {:<20}  {:<20}\n",
            step.step,
            format!("{:?}", step.x),
            format!("{:?}", step.dx),
            format!("{:?}", step.fx),
        ));
    }
    out
}
