//! Player data and NPC change records.

use morrowsave_common::{Encoding, Position};
use morrowsave_ess::pcdt::FactionMembership;
use morrowsave_ess::{Npcc, Pcdt, PlayerFlags};
use morrowsave_omw::cellid::CELL_SIZE;
use morrowsave_omw::{
    CellId, ControlsFlags, DialogueState, DrawState, FactionEntry, NpcState, Player,
};

use super::inventory;

/// Player settings that have no place in the player record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerToggles {
    pub first_person: bool,
    pub teleporting_enabled: bool,
    pub levitation_enabled: bool,
}

impl Default for PlayerToggles {
    fn default() -> Self {
        Self {
            first_person: true,
            teleporting_enabled: true,
            levitation_enabled: true,
        }
    }
}

/// Legacy player flags that map one to one onto disabled controls.
const CONTROL_FLAGS: [(PlayerFlags, ControlsFlags); 7] = [
    (PlayerFlags::VIEW_SWITCH_DISABLED, ControlsFlags::VIEW_SWITCH_DISABLED),
    (PlayerFlags::CONTROLS_DISABLED, ControlsFlags::CONTROLS_DISABLED),
    (PlayerFlags::JUMPING_DISABLED, ControlsFlags::JUMPING_DISABLED),
    (PlayerFlags::LOOKING_DISABLED, ControlsFlags::LOOKING_DISABLED),
    (PlayerFlags::VANITY_MODE_DISABLED, ControlsFlags::VANITY_MODE_DISABLED),
    (PlayerFlags::WEAPON_DRAWING_DISABLED, ControlsFlags::WEAPON_DRAWING_DISABLED),
    (PlayerFlags::SPELL_DRAWING_DISABLED, ControlsFlags::SPELL_DRAWING_DISABLED),
];

pub fn convert_faction(membership: &FactionMembership, encoding: Encoding) -> (String, FactionEntry) {
    let name = &membership.faction_name;
    let end = name.iter().position(|&b| b == 0).unwrap_or(name.len());
    let id = encoding.decode(&name[..end]).to_lowercase();
    let entry = FactionEntry {
        expelled: membership.flags & FactionMembership::EXPELLED != 0,
        rank: i32::from(membership.rank),
        reputation: membership.reputation,
    };
    (id, entry)
}

/// `PCDT`: fold the extended player data into the player, dialogue and
/// controls states.
pub fn convert_pcdt(
    pcdt: &Pcdt,
    encoding: Encoding,
    player: &mut Player,
    dialogue: &mut DialogueState,
    controls: &mut ControlsFlags,
) -> PlayerToggles {
    let npc_stats = &mut player.object.npc_stats;
    let pnam = &pcdt.pnam;

    player.birthsign.clone_from(&pcdt.birthsign);
    npc_stats.bounty = pcdt.bounty;
    for membership in &pcdt.factions {
        let (id, entry) = convert_faction(membership, encoding);
        npc_stats.factions.insert(id, entry);
    }

    for (out, &value) in npc_stats.spec_increase.iter_mut().zip(&pnam.spec_increases) {
        *out = i32::from(value);
    }
    for (out, &value) in npc_stats.skill_increase.iter_mut().zip(&pnam.skill_increases) {
        *out = i32::from(value);
    }
    for (skill, &progress) in npc_stats.skills.iter_mut().zip(&pnam.skill_progress) {
        skill.progress = progress;
    }
    npc_stats.level_progress = pnam.level_progress as i32;

    let flags = pnam.flags();
    let draw_state = &mut player.object.creature_stats.draw_state;
    if flags.contains(PlayerFlags::WEAPON_DRAWN) {
        *draw_state = DrawState::Weapon;
    } else if flags.contains(PlayerFlags::SPELL_DRAWN) {
        *draw_state = DrawState::Spell;
    }

    for topic in &pcdt.known_topics {
        dialogue.add_topic(topic.to_lowercase());
    }

    for (legacy, target) in CONTROL_FLAGS {
        if flags.contains(legacy) {
            controls.insert(target);
        }
    }

    if let Some(mark_cell) = &pcdt.mark_cell {
        let mark = &pnam.mark_location;
        let position = Position {
            pos: [mark.x, mark.y, mark.z],
            rot: [0.0, 0.0, mark.rot_z],
        };
        let cell = if mark.cell_x == 0 && mark.cell_y == 0 {
            CellId::interior(mark_cell.as_str())
        } else {
            CellId::exterior(mark.cell_x, mark.cell_y)
        };
        player.mark = Some((position, cell));
    }

    if let Some(cell) = &pcdt.last_exterior {
        player.last_known_exterior_position = [
            (cell.cell_x as f32 + 0.5) * CELL_SIZE,
            (cell.cell_y as f32 + 0.5) * CELL_SIZE,
            0.0,
        ];
    }

    PlayerToggles {
        first_person: !flags.contains(PlayerFlags::THIRD_PERSON),
        teleporting_enabled: !flags.contains(PlayerFlags::TELEPORTING_DISABLED),
        levitation_enabled: !flags.contains(PlayerFlags::LEVITATION_DISABLED),
    }
}

/// `NPCC`: disposition, reputation and inventory.
pub fn convert_npcc(npcc: &Npcc, state: &mut NpcState) {
    state.npc_stats.disposition = i32::from(npcc.npdt.disposition);
    state.npc_stats.reputation = i32::from(npcc.npdt.reputation);
    inventory::convert_inventory(&npcc.inventory, &mut state.inventory);
}

#[cfg(test)]
mod tests {
    use super::*;
    use morrowsave_common::FromBytes;
    use morrowsave_ess::pcdt::{ExteriorCell, PlayerData};

    fn pcdt() -> Pcdt {
        Pcdt {
            known_topics: vec!["Latest Rumors".into(), "latest rumors".into()],
            mark_cell: None,
            pnam: PlayerData::read_from_bytes(&[0u8; PlayerData::SIZE]).unwrap(),
            bounty: 0,
            birthsign: "Lady's Favor".into(),
            last_exterior: None,
            factions: Vec::new(),
        }
    }

    fn faction(name: &str, rank: u8, flags: u8) -> FactionMembership {
        let mut membership = FactionMembership::read_from_bytes(&[0u8; 44]).unwrap();
        membership.faction_name[..name.len()].copy_from_slice(name.as_bytes());
        membership.rank = rank;
        membership.flags = flags;
        membership.reputation = 12;
        membership
    }

    #[test]
    fn test_faction_membership() {
        let (id, entry) = convert_faction(&faction("Mages Guild", 3, 0x2), Encoding::Win1252);
        assert_eq!(id, "mages guild");
        assert!(entry.expelled);
        assert_eq!(entry.rank, 3);
        assert_eq!(entry.reputation, 12);

        let (_, entry) = convert_faction(&faction("Fighters Guild", 0, 0x1), Encoding::Win1252);
        assert!(!entry.expelled);
    }

    #[test]
    fn test_flags_and_topics() {
        let mut data = pcdt();
        data.pnam.player_flags = (PlayerFlags::THIRD_PERSON
            | PlayerFlags::SPELL_DRAWN
            | PlayerFlags::JUMPING_DISABLED
            | PlayerFlags::LEVITATION_DISABLED)
            .bits();
        data.bounty = 40;

        let mut player = Player::default();
        let mut dialogue = DialogueState::default();
        let mut controls = ControlsFlags::empty();
        let toggles = convert_pcdt(&data, Encoding::Win1252, &mut player, &mut dialogue, &mut controls);

        assert!(!toggles.first_person);
        assert!(toggles.teleporting_enabled);
        assert!(!toggles.levitation_enabled);
        assert_eq!(player.object.creature_stats.draw_state, DrawState::Spell);
        assert_eq!(controls, ControlsFlags::JUMPING_DISABLED);
        assert_eq!(dialogue.known_topics, vec!["latest rumors"]);
        assert_eq!(player.object.npc_stats.bounty, 40);
        assert_eq!(player.birthsign, "Lady's Favor");
    }

    #[test]
    fn test_mark_and_last_exterior() {
        let mut data = pcdt();
        data.mark_cell = Some("Vivec, Arena".into());
        data.pnam.mark_location.x = 10.0;
        data.pnam.mark_location.rot_z = 1.5;
        data.last_exterior = Some(ExteriorCell { cell_x: -3, cell_y: 2 });

        let mut player = Player::default();
        convert_pcdt(
            &data,
            Encoding::Win1252,
            &mut player,
            &mut DialogueState::default(),
            &mut ControlsFlags::empty(),
        );

        let (position, cell) = player.mark.clone().unwrap();
        assert_eq!(position.pos, [10.0, 0.0, 0.0]);
        assert_eq!(position.rot, [0.0, 0.0, 1.5]);
        assert_eq!(cell, CellId::interior("Vivec, Arena"));
        assert_eq!(player.last_known_exterior_position, [-2.5 * 8192.0, 2.5 * 8192.0, 0.0]);
    }
}
