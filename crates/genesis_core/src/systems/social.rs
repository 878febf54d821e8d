use super::perception::SensedAgent;
use crate::config::SocialConfig;
use crate::genome::GenomeLogic;
use genesis_data::Agent;

/// Records newly seen kin. Returns how many were added.
pub fn recognise_kin(agent: &mut Agent, sensed: &[SensedAgent<'_>], config: &SocialConfig) -> usize {
    let Some(social) = agent.social.as_mut() else {
        return 0;
    };
    let mut added = 0;
    for other in sensed {
        if social.known_kin.len() >= config.max_known_kin {
            break;
        }
        let id = other.agent.id();
        if social.known_kin.contains(&id) {
            continue;
        }
        if agent.genome.is_kin(&other.agent.genome, config.kin_threshold) {
            social.known_kin.push(id);
            added += 1;
        }
    }
    added
}
