#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use crisis_core::constants::MENU_BRANCH_TURN_LIMIT;
    use crisis_core::enums::{Metric, PhaseId};
    use crisis_core::types::PhaseOption;

    use crate::catalog::{consequence_pool, phase_node, DEFAULT_PHASE};
    use crate::fsm::{advance, consequence_line, resolve_next, BranchPosition};

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    fn option_to(next: Option<PhaseId>) -> PhaseOption {
        PhaseOption::new("Test option", &[(Metric::Stability, 1)], "Test intel.", next)
    }

    #[test]
    fn test_every_phase_has_at_least_two_options() {
        for id in PhaseId::ALL {
            let node = phase_node(id);
            assert_eq!(node.id, id);
            assert!(node.options.len() >= 2, "{id} offers fewer than 2 options");
            assert!(!node.description.is_empty());
        }
    }

    #[test]
    fn test_every_phase_has_a_consequence_pool() {
        for id in PhaseId::ALL {
            assert!(!consequence_pool(id).is_empty(), "{id} has no consequence lines");
        }
    }

    #[test]
    fn test_catalog_options_have_effects_and_intel() {
        for id in PhaseId::ALL {
            for option in phase_node(id).options {
                assert!(!option.effects.is_empty(), "{}: no effects", option.text);
                assert!(!option.intel.is_empty(), "{}: no intel", option.text);
            }
        }
    }

    #[test]
    fn test_escalation_literal_options() {
        let node = phase_node(PhaseId::Escalation);
        let first = &node.options[0];
        assert_eq!(first.effects.get(&Metric::Military), Some(&10));
        assert_eq!(first.effects.get(&Metric::Stability), Some(&-5));
        assert_eq!(first.next_phase, Some(PhaseId::Standoff));
        assert_eq!(node.options[1].next_phase, Some(PhaseId::Negotiation));
    }

    #[test]
    fn test_unset_pointer_falls_back_to_escalation() {
        assert_eq!(resolve_next(&option_to(None)), DEFAULT_PHASE);
        assert_eq!(DEFAULT_PHASE, PhaseId::Escalation);
        assert_eq!(resolve_next(&option_to(Some(PhaseId::Coalition))), PhaseId::Coalition);
    }

    #[test]
    fn test_consequence_comes_from_current_phase_pool() {
        let mut rng = rng();
        for _ in 0..50 {
            let line = consequence_line(Some(PhaseId::Negotiation), &mut rng);
            assert!(consequence_pool(PhaseId::Negotiation).contains(&line));
        }
    }

    #[test]
    fn test_opening_uses_default_pool() {
        let mut rng = rng();
        let line = consequence_line(None, &mut rng);
        assert!(consequence_pool(DEFAULT_PHASE).contains(&line));
    }

    #[test]
    fn test_advance_keys_consequence_before_following_pointer() {
        let mut rng = rng();
        let option = option_to(Some(PhaseId::Ultimatum));
        let step = advance(Some(PhaseId::Coalition), &option, 1, true, &mut rng);
        assert!(consequence_pool(PhaseId::Coalition).contains(&step.consequence));
        let next = step.next.unwrap();
        assert_eq!(next.phase, Some(PhaseId::Ultimatum));
        assert_eq!(next.options, phase_node(PhaseId::Ultimatum).options);
    }

    #[test]
    fn test_advance_holds_at_turn_limit() {
        let mut rng = rng();
        let option = option_to(Some(PhaseId::Negotiation));
        let below = advance(None, &option, MENU_BRANCH_TURN_LIMIT - 1, true, &mut rng);
        assert!(below.next.is_some());
        let at = advance(None, &option, MENU_BRANCH_TURN_LIMIT, true, &mut rng);
        assert!(at.next.is_none());
    }

    #[test]
    fn test_advance_holds_when_game_ended() {
        let mut rng = rng();
        let step = advance(None, &option_to(Some(PhaseId::Standoff)), 1, false, &mut rng);
        assert!(step.next.is_none());
    }

    #[test]
    fn test_same_seed_same_consequences() {
        let mut a = rng();
        let mut b = rng();
        for _ in 0..10 {
            assert_eq!(
                consequence_line(Some(PhaseId::EconomicWar), &mut a),
                consequence_line(Some(PhaseId::EconomicWar), &mut b)
            );
        }
    }

    #[test]
    fn test_position_option_lookup() {
        let position = BranchPosition::enter(PhaseId::Standoff);
        assert!(position.option(0).is_some());
        assert!(position.option(position.options.len()).is_none());
        let opening = BranchPosition::opening("Crisis begins.", vec![option_to(None)]);
        assert_eq!(opening.phase, None);
        assert_eq!(opening.options.len(), 1);
    }

    #[test]
    fn test_every_pointer_targets_catalog_phase() {
        // Walk the whole graph; every reachable phase must resolve to a node.
        let mut seen = vec![DEFAULT_PHASE];
        let mut frontier = vec![DEFAULT_PHASE];
        while let Some(id) = frontier.pop() {
            for option in phase_node(id).options {
                let next = resolve_next(&option);
                if !seen.contains(&next) {
                    seen.push(next);
                    frontier.push(next);
                }
            }
        }
        assert_eq!(seen.len(), PhaseId::ALL.len(), "some phases are unreachable");
    }
}
