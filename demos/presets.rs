//! Example: Run every preset and summarize its cycle
//!
//! Prints the population range and the first integral drift for each
//! preset, using the default 500 point grid over `[0, t_max]`.

use lvsim::prelude::*;

fn main() {
    for preset in Preset::ALL {
        let scenario = preset.apply(Scenario::default());
        let request = SimulationRequest::new(scenario.parameters, scenario.initial, scenario.t_max);

        let trajectory = match simulate(&request) {
            Ok(trajectory) => trajectory,
            Err(e) => {
                eprintln!("{}: {e}", preset.label());
                continue;
            }
        };

        let model = LotkaVolterra::new(scenario.parameters);
        let v0 = model.first_integral(scenario.initial);
        let drift = trajectory
            .states()
            .iter()
            .map(|s| (model.first_integral(*s) - v0).abs())
            .fold(0.0, f64::max);

        let range = |values: Vec<f64>| {
            values
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
        };
        let (prey_lo, prey_hi) = range(trajectory.prey());
        let (pred_lo, pred_hi) = range(trajectory.predator());

        println!("{}", preset.label());
        println!("  prey     in [{prey_lo:.3}, {prey_hi:.3}]");
        println!("  predator in [{pred_lo:.3}, {pred_hi:.3}]");
        if let Some(eq) = model.equilibrium() {
            println!("  equilibrium ({:.2}, {:.2})", eq.prey, eq.predator);
        }
        println!(
            "  first integral drift {drift:.2e} over {} evaluations",
            trajectory.evals().ode
        );
    }
}
