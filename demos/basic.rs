//! Basic host-loop usage demo
//!
//! Simulates one hour of charging followed by a rest period and prints the
//! estimator's SOC/SOH/Kalman-gain trajectory.

use bms_estimator::BmsEstimator;

fn main() {
    println!("BMS Core Estimator - Basic Demo");
    println!("================================\n");

    run_charge_demo();
    println!();
    run_rest_recalibration_demo();
}

/// One hour of charging at 5 A, printed every 10 minutes.
fn run_charge_demo() {
    let mut estimator = BmsEstimator::new(50.0, 100.0).expect("valid init params");

    println!("Charging at +5.0 A, 25 degC, dt=0.1s for 1 hour:");
    println!("  time(min) | soc(%)  | soh(%)  | kalman_gain");
    println!("  ----------|---------|---------|------------");

    let ticks_per_minute = 600; // dt = 0.1s, 10 ticks/s * 60s
    for minute in 0..=60 {
        if minute > 0 {
            for i in 0..ticks_per_minute {
                let t = (minute - 1) * ticks_per_minute + i;
                let voltage = 12.5 + 0.3 * ((t as f32) * 0.001).sin();
                estimator
                    .update(voltage, 5.0, 25.0, 0.1)
                    .expect("finite inputs, positive dt");
            }
        }
        if minute % 10 == 0 {
            println!(
                "  {:9} | {:7.2} | {:7.2} | {:.4}",
                minute,
                estimator.soc_percent(),
                estimator.soh_percent(),
                estimator.kalman_gain()
            );
        }
    }
}

/// 10 s of charging (polarized voltage, SOC estimate drifts), then 35 s at
/// rest: demonstrates the rest-period snap and one SOH adaptation event.
fn run_rest_recalibration_demo() {
    let mut estimator = BmsEstimator::new(50.0, 100.0).expect("valid init params");

    println!("Rest-period recalibration demo:");
    println!("  10s at +10 A / 12.0V (polarized), then 35s at 0 A / 12.75V:\n");

    for _ in 0..100 {
        estimator.update(12.0, 10.0, 25.0, 0.1).unwrap();
    }
    println!(
        "  after load phase:  soc={:.2}%  soh_updates={}",
        estimator.soc_percent(),
        estimator.soh_update_count()
    );

    for _ in 0..350 {
        estimator.update(12.75, 0.0, 20.0, 0.1).unwrap();
    }
    println!(
        "  after rest phase:  soc={:.2}%  soh={:.2}%  soh_updates={}",
        estimator.soc_percent(),
        estimator.soh_percent(),
        estimator.soh_update_count()
    );
}
