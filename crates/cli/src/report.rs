use cockpit_sim::{Airflow, HeatFlows, SimulationState};
use serde::Serialize;

/// One sampled tick, as emitted in JSON mode.
#[derive(Debug, Serialize)]
pub struct Sample<'a> {
    pub tick: u64,
    pub state: &'a SimulationState,
    pub heat_flows: HeatFlows,
}

/// Formats a single-line dashboard readout.
pub fn dashboard_line(state: &SimulationState) -> String {
    let hvac = &state.hvac;
    let ind = &state.indicators;

    let airflow = match hvac.airflow_mode {
        Airflow::Face => "face",
        Airflow::BiLevel => "bi-level",
        Airflow::Foot => "foot",
    };

    let flags: Vec<&str> = [
        (ind.left_lamp_lit(), "<"),
        (ind.right_lamp_lit(), ">"),
        (ind.hazard_lamp_lit(), "HAZ"),
        (ind.headlight_on, "HEAD"),
        (hvac.ac_on, "AC"),
        (hvac.auto_mode, "AUTO"),
        (hvac.recirculation_on, "RECIRC"),
        (hvac.defrost_on, "DEF"),
        (hvac.engine_warm, "WARM"),
    ]
    .into_iter()
    .filter_map(|(on, label)| on.then_some(label))
    .collect();

    format!(
        "t={:7.2}s speed={:5.1}km/h rpm={:4.0} fuel={:5.1}% cabin={:5.1}C set={:4.1}C out={:5.1}C fan={}/7 {} [{}]",
        state.runtime_s,
        state.velocity_kmh,
        state.rpm,
        state.fuel_pct,
        hvac.cabin_temp_c,
        hvac.setpoint_c,
        hvac.outside_temp_c,
        hvac.fan_level,
        airflow,
        flags.join(" "),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    use cockpit_sim::Simulation;

    #[test]
    fn power_on_readout() {
        let sim = Simulation::new();
        let line = dashboard_line(sim.state());

        assert!(line.contains("speed=  0.0km/h"));
        assert!(line.contains("rpm= 800"));
        assert!(line.contains("fan=3/7 face"));
        assert!(line.ends_with("[]"));
    }

    #[test]
    fn flags_follow_panel_state() {
        let mut sim = Simulation::new();
        sim.toggle_hazard();
        sim.toggle_ac();

        let line = dashboard_line(sim.state());
        assert!(line.ends_with("[< > HAZ AC]"));
    }
}
