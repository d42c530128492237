use std::env;

use fullback::{CameraComponent, ControlInputs, Jet, JetConfig, ThrottleCommand};

const DT: f64 = 1.0 / 120.0;
const DURATION: f64 = 30.0;
const REPORT_EVERY: f64 = 0.25;

/// Scripted input profile: spool up with afterburner, pull into a climb,
/// then roll off into a banked turn.
fn scripted_inputs(t: f64) -> ControlInputs {
    let mut inputs = ControlInputs {
        throttle: ThrottleCommand::Increase,
        afterburner: t < 10.0,
        ..Default::default()
    };
    if (5.0..12.0).contains(&t) {
        inputs.pitch_down = -0.3;
    }
    if t >= 15.0 {
        inputs.roll_right = 0.4;
        inputs.pitch_down = -0.2;
    }
    inputs
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match env::args().nth(1) {
        Some(path) => {
            println!("Loading config from {}...", path);
            JetConfig::load(&path)?
        }
        None => JetConfig::default(),
    };
    println!("Assembling {}...", config.name);
    let mut jet = Jet::new(config)?;
    let mut camera = CameraComponent::default();

    let mut t = 0.0;
    let mut next_report = 0.0;
    while t < DURATION {
        let inputs = scripted_inputs(t);
        jet.step(&inputs, DT)?;
        camera.update(&jet.spatial().position, &jet.spatial().attitude, DT);
        t += DT;

        if t >= next_report {
            next_report += REPORT_EVERY;
            let rpy = jet.attitude_rpy_deg();
            let state = serde_json::json!({
                "t": (t * 1000.0).round() / 1000.0,
                "position": jet.spatial().position.as_slice(),
                "velocity": jet.spatial().velocity.as_slice(),
                "rpy_deg": rpy.as_slice(),
                "throttle": jet.controls().throttle_level,
                "fuel_fraction": jet.fuel_fraction(),
                "camera_position": camera.position.as_slice(),
            });
            println!("{}", serde_json::to_string(&state)?);
        }
    }

    println!(
        "Done: flew {:.0} s, {} force contributions in the last step",
        DURATION,
        jet.debug_forces().len()
    );
    Ok(())
}
