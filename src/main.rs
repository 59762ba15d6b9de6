use dock_sim::sim::{self, ScriptedPilot, Session, SessionConfig};
use dock_sim::telemetry::{format_angular_velocity, ClosureTier};
use dock_sim::vehicle::presets;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("dock_sim=info")))
        .init();

    run().inspect_err(|e| tracing::error!("Fatal error: {e}"))
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    // -----------------------------------------------------------------------
    // Ship and session
    // -----------------------------------------------------------------------
    let ship = presets::tug();
    let config = SessionConfig::default();
    let dt = 1.0 / 60.0;

    let mut session = Session::new(ship, config.clone());
    let mut pilot = ScriptedPilot::approach();
    let duration = pilot.total_duration();

    // -----------------------------------------------------------------------
    // Fly the scripted approach
    // -----------------------------------------------------------------------
    let log = sim::fly(&mut session, &mut pilot, duration, dt);
    let last = log.last().ok_or("flight produced no samples")?;

    let peak_speed = log
        .iter()
        .map(|f| f.telemetry.velocity.norm())
        .fold(0.0_f64, f64::max);

    let peak_closure = log
        .iter()
        .map(|f| f.telemetry.closure_rate.abs())
        .fold(0.0_f64, f64::max);

    // -----------------------------------------------------------------------
    // Print results
    // -----------------------------------------------------------------------
    println!();
    println!("====================================================================");
    println!("  DOCKING APPROACH (scripted)");
    println!("====================================================================");
    println!();
    println!("  Ship");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Mass:          {:>8.0} kg    Thrust/axis:  {:>8.0} N",
        ship.mass, ship.thruster_force
    );
    println!(
        "  RCS torque:    {:>8.0} N·m   Accel/axis:   {:>8.3} m/s^2",
        ship.rcs_torque,
        ship.max_linear_accel()
    );
    println!(
        "  Inertia:       {:>8.0} / {:.0} / {:.0} kg·m^2",
        ship.inertia.x, ship.inertia.y, ship.inertia.z
    );
    println!(
        "  Spawn:         {:>8.1} m from station",
        (config.spawn_position - config.station_position).norm()
    );
    println!();

    println!("  Approach");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  {:>7}  {:>8}  {:>8}  {:>7}  {:>22}  {:>7}  {:>6}",
        "t (s)", "dist (m)", "closure", "|v|", "omega", "tier", "phase"
    );
    println!("  {}", "─".repeat(76));

    let sample_interval = (log.len() / 30).max(1);
    for (i, f) in log.iter().enumerate() {
        if i % sample_interval != 0 && i != log.len() - 1 {
            continue;
        }
        let t = &f.telemetry;
        let tier = match t.closure_tier() {
            ClosureTier::Nominal => "OK",
            ClosureTier::Caution => "SLOW",
            ClosureTier::Danger => "HOT",
        };
        // Sample 0 is the spawn state; no controls were applied yet.
        let phase = if i == 0 {
            "-"
        } else {
            pilot
                .phase_at((f.time - dt).max(0.0))
                .map_or("-", |p| p.label.as_str())
        };
        println!(
            "  {:>7.2}  {:>8.1}  {:>8.2}  {:>7.2}  {:>22}  {:>7}  {:>6}",
            f.time,
            t.distance,
            t.closure_rate,
            t.velocity.norm(),
            format_angular_velocity(&t.angular_velocity),
            tier,
            phase
        );
    }

    println!();
    println!("  Summary");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!("  Final distance: {:>8.2} m", last.telemetry.distance);
    println!("  Peak speed:     {:>8.2} m/s", peak_speed);
    println!("  Peak |closure|: {:>8.2} m/s", peak_closure);
    println!(
        "  Simulation: {} frames, dt={:.4} s, {:.1} s",
        session.frames(),
        dt,
        session.elapsed()
    );
    println!("====================================================================");
    println!();

    Ok(())
}
