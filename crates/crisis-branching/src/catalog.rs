//! Phase-specific option tables and consequence pools.
//!
//! Consolidates the literal content of every phase for the branch FSM.

use crisis_core::enums::Metric::{Allies, Diplomacy, Intelligence, Military, Stability, Support};
use crisis_core::enums::PhaseId;
use crisis_core::types::PhaseOption;

/// Phase a chain falls back to when an option has no next pointer.
pub const DEFAULT_PHASE: PhaseId = PhaseId::Escalation;

/// Content of one phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseNode {
    pub id: PhaseId,
    /// Situation text shown when the branch enters this phase.
    pub description: &'static str,
    pub options: Vec<PhaseOption>,
}

/// Get the node for a given phase.
pub fn phase_node(id: PhaseId) -> PhaseNode {
    match id {
        PhaseId::Escalation => PhaseNode {
            id,
            description: "Enemy forces continue buildup. Your military commanders request authorization for pre-emptive positioning. Allies watching closely.",
            options: vec![
                PhaseOption::new(
                    "Authorize military positioning while pursuing de-escalation",
                    &[(Stability, -5), (Military, 10), (Diplomacy, 5), (Allies, 5)],
                    "Forces positioned. Diplomatic channels remain open. Tense equilibrium.",
                    Some(PhaseId::Standoff),
                ),
                PhaseOption::new(
                    "Pull back and propose crisis resolution mechanism",
                    &[(Stability, 10), (Military, -15), (Diplomacy, 15), (Support, -10)],
                    "Withdrawal announced. Enemy claims victory. Resolution talks scheduled.",
                    Some(PhaseId::Negotiation),
                ),
            ],
        },
        PhaseId::Negotiation => PhaseNode {
            id,
            description: "Negotiations stall on key issues. Hardliners gaining influence. Opportunity for breakthrough or collapse.",
            options: vec![
                PhaseOption::new(
                    "Offer significant concessions to break deadlock",
                    &[(Stability, 15), (Diplomacy, 10), (Support, -15), (Allies, -10)],
                    "Concessions accepted. Agreement in sight. Domestic backlash building.",
                    Some(PhaseId::Resolution),
                ),
                PhaseOption::new(
                    "Hold firm on core demands",
                    &[(Stability, -10), (Support, 10), (Diplomacy, -10), (Military, 5)],
                    "Negotiations suspended. Enemy issues ultimatum. Countdown initiated.",
                    Some(PhaseId::Ultimatum),
                ),
            ],
        },
        PhaseId::Coalition => PhaseNode {
            id,
            description: "Partners are willing to act together but want a say in how. The adversary is probing for cracks in the coalition.",
            options: vec![
                PhaseOption::new(
                    "Commit forces to a joint allied task force",
                    &[(Allies, 15), (Military, -5), (Stability, -5), (Support, 5)],
                    "Task force assembled. Adversary protests encirclement.",
                    Some(PhaseId::Standoff),
                ),
                PhaseOption::new(
                    "Press partners for coordinated sanctions",
                    &[(Allies, 5), (Diplomacy, 5), (Stability, -5)],
                    "Sanctions package agreed in principle. Implementation uneven.",
                    Some(PhaseId::EconomicWar),
                ),
            ],
        },
        PhaseId::EconomicWar => PhaseNode {
            id,
            description: "Trade routes are disrupted and both economies are taking damage. Pressure is building for a decisive move.",
            options: vec![
                PhaseOption::new(
                    "Expand sanctions to the energy sector",
                    &[(Stability, -10), (Support, -5), (Allies, 5), (Diplomacy, -5)],
                    "Energy sanctions announced. Prices spike at home and abroad.",
                    Some(PhaseId::Ultimatum),
                ),
                PhaseOption::new(
                    "Offer sanctions relief in exchange for talks",
                    &[(Stability, 10), (Diplomacy, 10), (Allies, -5), (Support, -5)],
                    "Relief offer accepted as basis for talks. Critics cry appeasement.",
                    Some(PhaseId::Negotiation),
                ),
            ],
        },
        PhaseId::Standoff => PhaseNode {
            id,
            description: "Opposing forces face each other at close range. Neither side wants to blink first.",
            options: vec![
                PhaseOption::new(
                    "Maintain positions and open a military hotline",
                    &[(Stability, 5), (Diplomacy, 10), (Military, -5)],
                    "Hotline established. Both sides hold. Tension eases slightly.",
                    Some(PhaseId::Negotiation),
                ),
                PhaseOption::new(
                    "Reinforce forward deployments",
                    &[(Stability, -10), (Military, 10), (Allies, 5), (Support, 5)],
                    "Reinforcements arrive. Adversary matches deployments.",
                    Some(PhaseId::Escalation),
                ),
            ],
        },
        PhaseId::Ultimatum => PhaseNode {
            id,
            description: "The adversary has issued an ultimatum with a hard deadline. Allies await your answer.",
            options: vec![
                PhaseOption::new(
                    "Reject the ultimatum and rally allies",
                    &[(Stability, -10), (Allies, 10), (Support, 10), (Military, 5)],
                    "Ultimatum rejected. Allies close ranks. Deadline passes without a strike.",
                    Some(PhaseId::Coalition),
                ),
                PhaseOption::new(
                    "Seek last-minute mediation through a neutral party",
                    &[(Stability, 10), (Diplomacy, 15), (Support, -5)],
                    "Mediator accepted. Deadline extended pending talks.",
                    Some(PhaseId::Negotiation),
                ),
            ],
        },
        PhaseId::Resolution => PhaseNode {
            id,
            description: "A framework agreement is on the table. Verification details and domestic politics remain the last hurdles.",
            options: vec![
                PhaseOption::new(
                    "Sign the framework agreement",
                    &[(Stability, 15), (Diplomacy, 10), (Allies, 5), (Support, -5)],
                    "Agreement signed. Verification regime begins.",
                    None,
                ),
                PhaseOption::new(
                    "Demand stronger verification before signing",
                    &[(Stability, -5), (Intelligence, 10), (Diplomacy, -5), (Allies, 5)],
                    "Talks paused over verification. Framework intact.",
                    Some(PhaseId::Negotiation),
                ),
            ],
        },
    }
}

/// Consequence lines narrating the aftermath of a choice made in `id`.
pub fn consequence_pool(id: PhaseId) -> &'static [&'static str] {
    match id {
        PhaseId::Escalation => &[
            "Enemy forces respond with their own deployments. Regional tension increases significantly.",
            "Allied partners express concern about escalation trajectory. Intelligence indicates mobilization.",
            "International media reports crisis as \"brink of conflict.\" Markets volatile.",
        ],
        PhaseId::Negotiation => &[
            "Backchannels produce preliminary framework. Details remain contentious.",
            "Hardliners on both sides criticize negotiation approach as weakness.",
            "Intelligence suggests enemy buying time to consolidate position.",
        ],
        PhaseId::Coalition => &[
            "Partners agree to coordinate but disagree on specific actions. Unity fragile.",
            "Joint statement released. Impact on adversary unclear.",
            "Smaller allies request security guarantees before full commitment.",
        ],
        PhaseId::EconomicWar => &[
            "Sanctions begin to bite but also impact allied economies. Public pressure mounting.",
            "Counter-sanctions announced. Global supply chains disrupted.",
            "Economic warfare opens new fronts. Financial markets react negatively.",
        ],
        PhaseId::Standoff => &[
            "Opposing forces hold positions within visual range. Any incident could trigger escalation.",
            "Satellite imagery shows adversary logistics stretched thin.",
            "Commanders on both sides report near-misses at sea.",
        ],
        PhaseId::Ultimatum => &[
            "Adversary state media broadcasts a countdown. Markets brace for conflict.",
            "Neutral states urge restraint and offer mediation.",
            "Intelligence detects forces moving to higher readiness.",
        ],
        PhaseId::Resolution => &[
            "Negotiators report progress on a verification framework.",
            "Hardliners denounce the emerging deal, but public mood softens.",
            "Allies cautiously welcome signs of de-escalation.",
        ],
    }
}
