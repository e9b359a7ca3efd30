//! Built-in crisis scenarios.
//!
//! Each scenario has a briefing and the opening menu offered before the
//! branch tree takes over.

use rand::Rng;

use crisis_core::enums::Metric::{Allies, Diplomacy, Intelligence, Military, Stability, Support};
use crisis_core::enums::PhaseId;
use crisis_core::types::PhaseOption;
use crisis_oracle::ScenarioBrief;

/// Ids of every compiled-in scenario, in catalog order.
pub const SCENARIO_IDS: [&str; 3] = ["strait_standoff", "border_mobilization", "embassy_siege"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub opening: Vec<PhaseOption>,
}

impl Scenario {
    pub fn brief(&self) -> ScenarioBrief {
        ScenarioBrief::new(self.title, self.description)
    }
}

/// Look up a scenario by id.
pub fn by_id(id: &str) -> Option<Scenario> {
    match id {
        "strait_standoff" => Some(Scenario {
            id: "strait_standoff",
            title: "Strait Standoff",
            description: "Naval forces from a hostile power have moved into a contested strait and declared an exclusion zone. Commercial shipping is stalled and allied patrol vessels are within weapons range.",
            opening: vec![
                PhaseOption::new(
                    "Deploy naval forces to escort commercial shipping",
                    &[(Stability, -10), (Military, 10), (Allies, 5), (Support, 5)],
                    "Escort groups sail at dawn. Adversary vessels shadow the convoy.",
                    Some(PhaseId::Standoff),
                ),
                PhaseOption::new(
                    "Call an emergency session with regional partners",
                    &[(Diplomacy, 10), (Allies, 10), (Military, -5)],
                    "Partners convene within hours. Joint statement under negotiation.",
                    Some(PhaseId::Coalition),
                ),
                PhaseOption::new(
                    "Open a direct channel to the adversary's leadership",
                    &[(Diplomacy, 10), (Stability, 5), (Support, -5)],
                    "Channel accepted. First exchanges are cold but professional.",
                    Some(PhaseId::Negotiation),
                ),
            ],
        }),
        "border_mobilization" => Some(Scenario {
            id: "border_mobilization",
            title: "Border Mobilization",
            description: "Satellite imagery shows armored divisions massing along an ally's border. The adversary calls it an exercise; the ally has requested immediate support.",
            opening: vec![
                PhaseOption::new(
                    "Send a rapid reaction force to the ally",
                    &[(Military, 10), (Allies, 10), (Stability, -10)],
                    "Lead elements arrive. Adversary state media denounces provocation.",
                    Some(PhaseId::Escalation),
                ),
                PhaseOption::new(
                    "Announce targeted sanctions on the adversary's defense sector",
                    &[(Allies, 5), (Diplomacy, -5), (Support, 5), (Stability, -5)],
                    "Sanctions take effect at midnight. Markets wobble.",
                    Some(PhaseId::EconomicWar),
                ),
                PhaseOption::new(
                    "Share intelligence publicly to expose the buildup",
                    &[(Intelligence, -10), (Diplomacy, 10), (Support, 10)],
                    "Imagery released. International pressure mounts on the adversary.",
                    Some(PhaseId::Negotiation),
                ),
            ],
        }),
        "embassy_siege" => Some(Scenario {
            id: "embassy_siege",
            title: "Embassy Siege",
            description: "Armed militia backed by a rival government have surrounded your embassy abroad. Staff are sheltering inside and the host government claims it cannot intervene.",
            opening: vec![
                PhaseOption::new(
                    "Prepare a special forces extraction",
                    &[(Military, 5), (Stability, -10), (Support, 10)],
                    "Extraction team staged offshore. The host government warns against violating its sovereignty.",
                    Some(PhaseId::Ultimatum),
                ),
                PhaseOption::new(
                    "Negotiate through a neutral intermediary",
                    &[(Diplomacy, 10), (Stability, 5), (Support, -5)],
                    "Intermediary opens talks with the militia leadership.",
                    Some(PhaseId::Negotiation),
                ),
            ],
        }),
        _ => None,
    }
}

/// Every scenario in catalog order.
pub fn all() -> Vec<Scenario> {
    SCENARIO_IDS.iter().filter_map(|id| by_id(id)).collect()
}

/// Pick one scenario uniformly at random.
pub fn pick_random<R: Rng + ?Sized>(rng: &mut R) -> Scenario {
    let mut scenarios = all();
    let index = rng.gen_range(0..scenarios.len());
    scenarios.swap_remove(index)
}
