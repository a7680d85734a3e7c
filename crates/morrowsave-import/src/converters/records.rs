//! Converters for records that need little more than a decoder call.

use std::collections::BTreeMap;
use std::io::Write;

use morrowsave_common::{ChunkReader, ChunkWriter};
use morrowsave_ess::templates::{self, CHARGEN_CLASS_ID};
use morrowsave_ess::{
    Cntc, Crec, Dial, GameState, Info, Jour, KillCounter, Npcc, Owner, PassThrough, Pcdt,
    Ques, Refr, Scpt, Splm, StolenItem, PLAYER_REF_ID,
};
use morrowsave_omw::{DeathCounter, GlobalScript, QuestState, StolenItems, WeatherState};
use tracing::{debug, warn};

use crate::context::Context;
use crate::convert;
use crate::refid::RefKey;
use crate::{Error, Result};

/// Content records re-emitted whole, by id.
#[derive(Debug, Default)]
pub struct Templates {
    records: BTreeMap<String, PassThrough>,
}

impl Templates {
    pub fn read(&mut self, reader: &mut ChunkReader<'_>, flags: u32, ctx: &mut Context) -> Result<()> {
        let record = PassThrough::load(reader, flags)?;

        match record.name().as_bytes() {
            b"GLOB" => apply_global(&record, ctx),
            b"CLAS" if record.id == CHARGEN_CLASS_ID => {
                ctx.custom_player_class_name = record.text(b"FNAM");
            }
            b"BOOK" if templates::book_skill(&record)? == Some(-1) => {
                ctx.player.object.npc_stats.used_ids.push(record.id.to_lowercase());
            }
            _ => {}
        }

        self.records.insert(record.id.clone(), record);
        Ok(())
    }

    pub fn write<W: Write>(&self, writer: &mut ChunkWriter<W>) -> Result<()> {
        for record in self.records.values() {
            record.record.write(writer)?;
        }
        Ok(())
    }
}

/// Calendar globals.
fn apply_global(record: &PassThrough, ctx: &mut Context) {
    let Some(value) = templates::global_value(record) else {
        return;
    };
    match record.id.to_lowercase().as_str() {
        "gamehour" => ctx.hour = value,
        "day" => ctx.day = value as i32,
        "month" => ctx.month = value as i32,
        "year" => ctx.year = value as i32,
        _ => {}
    }
}

/// `NPC_`: the player template, or an override of a content NPC.
pub fn read_npc(reader: &mut ChunkReader<'_>, flags: u32, ctx: &mut Context) -> Result<()> {
    let mut record = PassThrough::load(reader, flags)?;
    if !record.id.eq_ignore_ascii_case("player") {
        ctx.npcs.insert(record.id.to_lowercase(), record);
        return Ok(());
    }

    let stats = &mut ctx.player.object.creature_stats;
    if let Some(level) = templates::npc_level(&record)? {
        stats.level = level;
    }
    stats.spells.extend(templates::npc_spells(&record));

    // The engine rebuilds both lists from the player state.
    record.strip(b"NPCS");
    record.strip(b"NPCO");
    ctx.player_base = Some(record);
    Ok(())
}

/// `CREA`: an override of a content creature.
pub fn read_creature(reader: &mut ChunkReader<'_>, flags: u32, ctx: &mut Context) -> Result<()> {
    let record = PassThrough::load(reader, flags)?;
    ctx.creatures.insert(record.id.to_lowercase(), record);
    Ok(())
}

/// `NPCC`: player changes apply at once, the rest wait for their reference.
pub fn read_npc_changes(reader: &mut ChunkReader<'_>, ctx: &mut Context) -> Result<()> {
    let id = reader.read_hn_string(b"NAME")?;
    let npcc = Npcc::load(reader)?;
    if id == PLAYER_REF_ID {
        convert::convert_npcc(&npcc, &mut ctx.player.object);
    } else {
        let key = RefKey::new(npcc.npdt.index as u32, &id);
        ctx.npc_changes.entry(key).or_insert(npcc);
    }
    Ok(())
}

pub fn read_creature_changes(reader: &mut ChunkReader<'_>, ctx: &mut Context) -> Result<()> {
    let id = reader.read_hn_string(b"NAME")?;
    let crec = Crec::load(reader)?;
    let key = RefKey::new(crec.index as u32, &id);
    ctx.creature_changes.entry(key).or_insert(crec);
    Ok(())
}

pub fn read_container_changes(reader: &mut ChunkReader<'_>, ctx: &mut Context) -> Result<()> {
    let id = reader.read_hn_string(b"NAME")?;
    let cntc = Cntc::load(reader)?;
    let key = RefKey::new(cntc.index as u32, &id);
    ctx.container_changes.entry(key).or_insert(cntc);
    Ok(())
}

/// `FACT`: changed reactions between factions.
pub fn read_faction(reader: &mut ChunkReader<'_>, flags: u32, ctx: &mut Context) -> Result<()> {
    let record = PassThrough::load(reader, flags)?;
    let reactions = ctx
        .dialogue_state
        .changed_faction_reaction
        .entry(record.id.to_lowercase())
        .or_default();
    for (other, value) in templates::faction_reactions(&record)? {
        reactions.entry(other.to_lowercase()).or_insert(value);
    }
    Ok(())
}

/// `SPLM`: active spells, kept for the projectiles that link to them.
pub fn read_active_spells(reader: &mut ChunkReader<'_>, ctx: &mut Context) -> Result<()> {
    let splm = Splm::load(reader)?;
    for spell in splm.spells {
        ctx.active_spells.insert(spell.index, spell);
    }
    Ok(())
}

/// `INFO`, `QUES` and `JOUR` have no usable target counterpart. They are
/// decoded so that malformed records still fail the run.
pub fn read_dropped(reader: &mut ChunkReader<'_>) -> Result<()> {
    match reader.record_name().as_bytes() {
        b"INFO" => {
            Info::load(reader)?;
        }
        b"QUES" => {
            reader.read_hn_string(b"NAME")?;
            Ques::load(reader)?;
        }
        b"JOUR" => {
            Jour::load(reader)?;
        }
        _ => {}
    }
    Ok(())
}

/// `REFR`: the player's own placement.
#[derive(Debug, Default)]
pub struct PlayerReference {
    selected_spell: String,
    selected_enchant_item: String,
}

impl PlayerReference {
    pub fn read(&mut self, reader: &mut ChunkReader<'_>, ctx: &mut Context) -> Result<()> {
        let refr = Refr::load(reader)?;
        if !refr.is_player() {
            warn!(id = %refr.ref_id, "ignoring reference outside any cell");
            return Ok(());
        }

        let player = &mut ctx.player.object;
        player.object.position = refr.position;
        player.object.cell_ref.position = refr.position;
        if let Some(acdt) = &refr.actor_data.acdt {
            convert::convert_acdt(acdt, &mut player.creature_stats);
        }
        convert::convert_npc_data(&refr.actor_data, &mut player.npc_stats);

        self.selected_spell = refr.actor_data.selected_spell;
        self.selected_enchant_item = refr.actor_data.selected_enchant_item;
        Ok(())
    }

    /// Runs after the whole inventory is known, so the enchanted item can
    /// be found by id.
    pub fn write<W: Write>(&self, writer: &mut ChunkWriter<W>, ctx: &mut Context) -> Result<()> {
        if !self.selected_enchant_item.is_empty() {
            let inventory = &mut ctx.player.object.inventory;
            let wanted = self.selected_enchant_item.to_lowercase();
            if let Some(index) = inventory
                .items
                .iter()
                .rposition(|item| item.cell_ref.ref_id.to_lowercase() == wanted)
            {
                inventory.selected_enchant_item = index as i32;
            } else {
                debug!(item = %self.selected_enchant_item, "selected enchanted item not in inventory");
            }
        }

        writer.start_record(b"ASPL")?;
        writer.write_hn_string(b"ID__", &self.selected_spell)?;
        writer.end_record(b"ASPL")?;
        Ok(())
    }
}

/// `PCDT`: the extended player data.
#[derive(Debug, Default)]
pub struct PlayerData {
    toggles: convert::PlayerToggles,
}

impl PlayerData {
    pub fn read(&mut self, reader: &mut ChunkReader<'_>, ctx: &mut Context) -> Result<()> {
        let pcdt = Pcdt::load(reader)?;
        self.toggles = convert::convert_pcdt(
            &pcdt,
            ctx.encoding,
            &mut ctx.player,
            &mut ctx.dialogue_state,
            &mut ctx.controls_state.flags,
        );
        Ok(())
    }

    pub fn write<W: Write>(&self, writer: &mut ChunkWriter<W>) -> Result<()> {
        writer.start_record(b"ENAB")?;
        writer.write_hn_bool(b"TELE", self.toggles.teleporting_enabled)?;
        writer.write_hn_bool(b"LEVT", self.toggles.levitation_enabled)?;
        writer.end_record(b"ENAB")?;

        writer.start_record(b"CAM_")?;
        writer.write_hn_bool(b"FIRS", self.toggles.first_person)?;
        writer.end_record(b"CAM_")?;
        Ok(())
    }
}

/// `KLST`: kill counts.
#[derive(Debug, Default)]
pub struct Kills {
    counter: DeathCounter,
}

impl Kills {
    pub fn read(&mut self, reader: &mut ChunkReader<'_>, ctx: &mut Context) -> Result<()> {
        let klst = KillCounter::load(reader)?;
        for (id, count) in klst.kills {
            self.counter.deaths.insert(id.to_lowercase(), count);
        }
        ctx.player.object.npc_stats.werewolf_kills = klst.werewolf_kills;
        Ok(())
    }

    pub fn write<W: Write>(&self, writer: &mut ChunkWriter<W>) -> Result<()> {
        writer.start_record(b"DCOU")?;
        self.counter.save(writer)?;
        writer.end_record(b"DCOU")?;
        Ok(())
    }
}

/// `STLN`: stolen items and their owners.
#[derive(Debug, Default)]
pub struct Stolen {
    items: StolenItems,
}

impl Stolen {
    pub fn read(&mut self, reader: &mut ChunkReader<'_>) -> Result<()> {
        let stolen = StolenItem::load(reader)?;
        let owners = self.items.items.entry(stolen.item).or_default();
        for owner in stolen.owners {
            let key = match owner {
                Owner::Faction(id) => (id, true),
                Owner::Npc(id) => (id, false),
            };
            // The legacy ledger has no counts; every item with this id
            // counts as stolen.
            owners.insert(key, i32::MAX);
        }
        Ok(())
    }

    pub fn write<W: Write>(&self, writer: &mut ChunkWriter<W>) -> Result<()> {
        writer.start_record(b"STLN")?;
        self.items.save(writer)?;
        writer.end_record(b"STLN")?;
        Ok(())
    }
}

/// `DIAL`: journal progress.
#[derive(Debug, Default)]
pub struct Dialogues {
    /// Journal index by lowercase topic.
    quests: BTreeMap<String, i32>,
}

impl Dialogues {
    pub fn read(&mut self, reader: &mut ChunkReader<'_>) -> Result<()> {
        let id = reader.read_hn_string(b"NAME")?;
        let dial = Dial::load(reader)?;
        if dial.index > 0 {
            self.quests.insert(id.to_lowercase(), dial.index);
        }
        Ok(())
    }

    pub fn write<W: Write>(&self, writer: &mut ChunkWriter<W>) -> Result<()> {
        for (topic, &state) in &self.quests {
            let quest = QuestState {
                topic: topic.clone(),
                state,
                finished: false,
            };
            writer.start_record(b"QUES")?;
            quest.save(writer)?;
            writer.end_record(b"QUES")?;
        }
        Ok(())
    }
}

/// Name of a weather by its index in the weather list.
pub fn weather_name(id: i32) -> Result<&'static str> {
    const WEATHERS: [&str; 10] = [
        "clear",
        "cloudy",
        "foggy",
        "overcast",
        "rain",
        "thunderstorm",
        "ashstorm",
        "blight",
        "snow",
        "blizzard",
    ];
    if id == -1 {
        return Ok("");
    }
    usize::try_from(id)
        .ok()
        .and_then(|index| WEATHERS.get(index).copied())
        .ok_or(Error::UnknownWeather(id))
}

/// Game seconds in one percent of a weather transition.
const TRANSITION_SECONDS_PER_PERCENT: f32 = 0.015 * 24.0 * 3600.0 / 100.0;

/// `GAME`: weather and moon phases.
#[derive(Debug, Default)]
pub struct Game {
    weather: Option<WeatherState>,
}

impl Game {
    pub fn read(&mut self, reader: &mut ChunkReader<'_>) -> Result<()> {
        let game = GameState::load(reader)?;
        self.weather = Some(WeatherState {
            current_region: String::new(),
            current_weather: weather_name(game.current_weather)?.to_string(),
            next_weather: weather_name(game.next_weather)?.to_string(),
            time_passed: 0.0,
            remaining_transition_time: game.weather_transition as f32 * TRANSITION_SECONDS_PER_PERCENT,
            hour: 0.0,
            wind_speed: 0.0,
            fast_forward: false,
            masser_phase: game.masser_phase,
            secunda_phase: game.secunda_phase,
        });
        Ok(())
    }

    pub fn write<W: Write>(&self, writer: &mut ChunkWriter<W>, ctx: &Context) -> Result<()> {
        let Some(weather) = &self.weather else {
            return Ok(());
        };
        let weather = WeatherState {
            hour: ctx.hour,
            ..weather.clone()
        };
        writer.start_record(b"WTHR")?;
        weather.save(writer)?;
        writer.end_record(b"WTHR")?;
        Ok(())
    }
}

/// `SCPT`: running global scripts.
#[derive(Debug, Default)]
pub struct Scripts {
    scripts: Vec<GlobalScript>,
}

impl Scripts {
    pub fn read(&mut self, reader: &mut ChunkReader<'_>) -> Result<()> {
        let scpt = Scpt::load(reader)?;
        self.scripts.push(convert::convert_scpt(&scpt));
        Ok(())
    }

    pub fn write<W: Write>(&self, writer: &mut ChunkWriter<W>) -> Result<()> {
        for script in &self.scripts {
            writer.start_record(b"GSCR")?;
            script.save(writer)?;
            writer.end_record(b"GSCR")?;
        }
        Ok(())
    }
}
