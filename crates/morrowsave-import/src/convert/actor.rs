//! Actor statistics and animation state.

use morrowsave_ess::anim::{animation_group, ANIMATION_GROUPS};
use morrowsave_ess::{Acdt, AcdtFlags, Acsc, AcscFlags, ActorData, Anis};
use morrowsave_omw::{AnimationState, CreatureStats, NpcStats, ScriptedAnimation, StatState};
use tracing::warn;

/// Map a legacy dynamic stat index (health, fatigue, magicka) to the
/// target order (health, magicka, fatigue).
pub fn translate_dynamic_index(index: usize) -> usize {
    match index {
        1 => 2,
        2 => 1,
        other => other,
    }
}

/// `ACDT`: attributes, dynamic stats, gold and the player flags.
pub fn convert_acdt(acdt: &Acdt, stats: &mut CreatureStats) {
    for (index, &[current, base]) in acdt.dynamic.iter().enumerate() {
        stats.dynamic[translate_dynamic_index(index)] = StatState {
            base,
            modified: 0.0,
            current,
            progress: 0.0,
        };
    }

    for (attribute, &[current, base]) in stats.attributes.iter_mut().zip(&acdt.attributes) {
        *attribute = StatState {
            base: base as i32,
            modified: current as i32,
            current: current as i32,
            progress: 0.0,
        };
    }

    let flags = acdt.flags();
    stats.gold_pool = acdt.gold_pool as i32;
    stats.talked_to = flags.contains(AcdtFlags::TALKED_TO_PLAYER);
    stats.attacked = flags.contains(AcdtFlags::ATTACKED);
}

/// `ACSC`: the dead flag.
pub fn convert_acsc(acsc: &Acsc, stats: &mut CreatureStats) {
    stats.dead = acsc.flags().contains(AcscFlags::DEAD);
}

/// Apply whichever stat blocks an actor has, flagging a missing `ACDT`.
pub fn convert_actor_stats(data: &ActorData, stats: &mut CreatureStats) {
    match &data.acdt {
        Some(acdt) => convert_acdt(acdt, stats),
        None => stats.missing_acdt = true,
    }
    if let Some(acsc) = &data.acsc {
        convert_acsc(acsc, stats);
    }
}

/// `CHRD` skills and the breath meter.
pub fn convert_npc_data(data: &ActorData, stats: &mut NpcStats) {
    for (skill, &[base, modified]) in stats.skills.iter_mut().zip(&data.skills) {
        skill.base = base;
        skill.modified = modified;
        skill.current = modified;
    }
    if let Some(acdt) = &data.acdt {
        stats.time_to_start_drowning = acdt.breath_meter;
    }
}

/// `ANIS`: a scripted animation. Unknown group indices are skipped.
pub fn convert_anis(anis: &Anis, state: &mut AnimationState) {
    let Some(group) = animation_group(anis.group_index) else {
        warn!(
            index = anis.group_index,
            known = ANIMATION_GROUPS.len(),
            "unknown animation group index"
        );
        return;
    };

    state.scripted_anims.push(ScriptedAnimation {
        group: group.to_lowercase(),
        time: anis.time,
        absolute: true,
        loop_count: u64::MAX,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use morrowsave_common::FromBytes;

    fn blank_acdt() -> Acdt {
        Acdt::read_from_bytes(&[0u8; Acdt::SIZE]).unwrap()
    }

    #[test]
    fn test_dynamic_index_is_involution() {
        for index in 0..3 {
            assert_eq!(translate_dynamic_index(translate_dynamic_index(index)), index);
        }
        assert_eq!(translate_dynamic_index(0), 0);
        assert_eq!(translate_dynamic_index(1), 2);
    }

    #[test]
    fn test_acdt_reorders_dynamic_stats() {
        let mut acdt = blank_acdt();
        acdt.dynamic = [[10.0, 10.0], [20.0, 20.0], [30.0, 30.0]];
        let mut stats = CreatureStats::default();
        convert_acdt(&acdt, &mut stats);

        let pairs: Vec<(f32, f32)> = stats.dynamic.iter().map(|s| (s.current, s.base)).collect();
        assert_eq!(pairs, [(10.0, 10.0), (30.0, 30.0), (20.0, 20.0)]);
    }

    #[test]
    fn test_acdt_attributes_and_flags() {
        let mut acdt = blank_acdt();
        acdt.attributes[0] = [55.7, 40.2];
        acdt.flags = 0x4 | 0x100;
        acdt.gold_pool = 250;
        let mut stats = CreatureStats::default();
        convert_acdt(&acdt, &mut stats);

        assert_eq!(stats.attributes[0].base, 40);
        assert_eq!(stats.attributes[0].modified, 55);
        assert_eq!(stats.attributes[0].current, 55);
        assert!(stats.talked_to);
        assert!(stats.attacked);
        assert_eq!(stats.gold_pool, 250);
    }

    #[test]
    fn test_missing_acdt_is_flagged() {
        let mut stats = CreatureStats::default();
        convert_actor_stats(&ActorData::default(), &mut stats);
        assert!(stats.missing_acdt);
        assert!(!stats.dead);
    }

    #[test]
    fn test_anis_lookup() {
        let mut state = AnimationState::default();
        convert_anis(&Anis { group_index: 19, unknown: [0; 3], time: 0.25 }, &mut state);
        assert_eq!(state.scripted_anims.len(), 1);
        assert_eq!(state.scripted_anims[0].group, "hit1");
        assert!(state.scripted_anims[0].absolute);
        assert_eq!(state.scripted_anims[0].loop_count, u64::MAX);
    }

    #[test]
    fn test_anis_out_of_range_is_skipped() {
        let mut state = AnimationState::default();
        convert_anis(&Anis { group_index: 0xff, unknown: [0; 3], time: 0.0 }, &mut state);
        assert!(state.scripted_anims.is_empty());
    }
}
