//! The two-phase import: read every legacy record, then write the target
//! records stage by stage.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use morrowsave_common::{ChunkReader, ChunkWriter, Encoding, Tag};
use morrowsave_ess::Header;
use morrowsave_omw::{CellId, FileHeader, PlayerClass, SavedGame, TimeStamp, FORMAT_VERSION};
use tracing::{debug, info, warn};

use crate::context::Context;
use crate::converters::{Converter, Stage};
use crate::summary::ImportSummary;
use crate::{Error, Result};

/// Extension the output of a run is expected to have.
pub const OUTPUT_EXTENSION: &str = "omwsave";

/// Id the player base template is written under.
const PLAYER_BASE_ID: &str = "Player";

#[derive(Debug, Clone, Copy, Default)]
pub struct ImportOptions {
    /// Code page of the legacy text fields.
    pub encoding: Encoding,
}

/// Converts legacy saved games.
#[derive(Debug, Clone, Default)]
pub struct Importer {
    options: ImportOptions,
}

impl Importer {
    pub fn new(options: ImportOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ImportOptions {
        &self.options
    }

    /// Convert the file at `ess_path` into `out_path`.
    ///
    /// Refuses to replace an existing file unless it is itself a saved
    /// game, checked before the input is even opened.
    pub fn run(&self, ess_path: &Path, out_path: &Path) -> Result<ImportSummary> {
        check_output_path(out_path)?;

        let data = fs::read(ess_path)?;
        let out = BufWriter::new(File::create(out_path)?);
        self.convert(&data, out)
    }

    pub fn convert<W: Write>(&self, input: &[u8], out: W) -> Result<ImportSummary> {
        self.convert_with_progress(input, out, |_, _| {})
    }

    /// Convert, calling `progress(offset, len)` after each input record.
    pub fn convert_with_progress<W, F>(&self, input: &[u8], out: W, mut progress: F) -> Result<ImportSummary>
    where
        W: Write,
        F: FnMut(usize, usize),
    {
        let mut reader = ChunkReader::new(input, self.options.encoding);
        let header = Header::load(&mut reader)?;
        debug!(
            version = header.version,
            masters = header.masters.len(),
            cell = %header.current_cell,
            "read legacy header"
        );

        let mut ctx = Context::new(self.options.encoding);
        ctx.player_cell_name.clone_from(&header.current_cell);
        ctx.player_name.clone_from(&header.player_name);

        let converters = read_records(&mut reader, &mut ctx, &mut progress)?;
        let mut writer = ChunkWriter::new(out);
        write_records(&mut writer, &header, &converters, &mut ctx)?;

        ctx.summary.records_written = writer.record_count();
        let mut out = writer.into_inner()?;
        out.flush()?;

        info!(
            records_read = ctx.summary.records_read,
            records_written = ctx.summary.records_written,
            cells = ctx.summary.cells_written,
            objects = ctx.summary.placed_objects(),
            unmerged = ctx.summary.unmerged_deltas,
            "import finished"
        );
        Ok(ctx.summary)
    }
}

/// Reject an existing output that does not look like a saved game.
pub fn check_output_path(path: &Path) -> Result<()> {
    let is_save = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(OUTPUT_EXTENSION));
    if path.exists() && !is_save {
        return Err(Error::OutputExists(path.to_path_buf()));
    }
    Ok(())
}

fn read_records(
    reader: &mut ChunkReader<'_>,
    ctx: &mut Context,
    progress: &mut impl FnMut(usize, usize),
) -> Result<BTreeMap<Tag, Converter>> {
    let mut converters: BTreeMap<Tag, Converter> = BTreeMap::new();
    let mut unknown: BTreeSet<Tag> = BTreeSet::new();

    while reader.has_more_recs() {
        let tag = reader.next_record_name()?;
        let header = reader.record_header()?;
        ctx.summary.records_read += 1;

        let converter = match converters.entry(tag) {
            Entry::Occupied(entry) => Some(entry.into_mut()),
            Entry::Vacant(entry) => Converter::for_tag(tag).map(|converter| entry.insert(converter)),
        };

        match converter {
            Some(converter) => {
                converter.read(reader, header.flags, ctx)?;
                let skipped = reader.skip_remaining_subs()?;
                if !skipped.is_empty() {
                    debug!(record = %tag, offset = reader.record_offset(), ?skipped, "skipped subrecords");
                }
            }
            None => {
                if unknown.insert(tag) {
                    warn!(record = %tag, offset = reader.record_offset(), "skipping unknown record");
                    ctx.summary.unknown_tags.push(tag);
                }
                reader.skip_record()?;
            }
        }

        progress(reader.file_offset(), reader.file_len());
    }
    Ok(converters)
}

fn write_stage<W: Write>(
    writer: &mut ChunkWriter<W>,
    converters: &BTreeMap<Tag, Converter>,
    stage: Stage,
    ctx: &mut Context,
) -> Result<()> {
    for converter in converters.values().filter(|c| c.stage() == stage) {
        converter.write(writer, ctx)?;
    }
    Ok(())
}

fn write_records<W: Write>(
    writer: &mut ChunkWriter<W>,
    header: &Header,
    converters: &BTreeMap<Tag, Converter>,
    ctx: &mut Context,
) -> Result<()> {
    let masters: Vec<String> = header.masters.iter().map(|m| m.name.clone()).collect();

    let file_header = FileHeader {
        format: FORMAT_VERSION,
        author: String::new(),
        description: String::new(),
        masters: masters.clone(),
    };
    writer.start_record(b"TES3")?;
    file_header.save(writer)?;
    writer.end_record(b"TES3")?;

    let profile = saved_game(header, masters, ctx);
    writer.start_record(b"SAVE")?;
    profile.save(writer)?;
    writer.end_record(b"SAVE")?;

    write_stage(writer, converters, Stage::Templates, ctx)?;

    match &ctx.player_base {
        Some(base) => {
            let mut base = base.clone();
            base.set_id(PLAYER_BASE_ID);
            base.record.write(writer)?;
        }
        None => warn!("save has no player base record"),
    }

    write_stage(writer, converters, Stage::World, ctx)?;
    report_unmerged(ctx);

    if ctx.player.cell_id.is_exterior() {
        let [x, y, _] = ctx.player.object.object.position.pos;
        ctx.player.cell_id = CellId::containing(x, y);
    }
    writer.start_record(b"PLAY")?;
    ctx.player.save(writer)?;
    writer.end_record(b"PLAY")?;

    writer.start_record(b"ACTC")?;
    writer.write_hn_i32(b"COUN", ctx.next_actor_id())?;
    writer.end_record(b"ACTC")?;

    write_stage(writer, converters, Stage::Late, ctx)?;

    writer.start_record(b"DIAS")?;
    ctx.dialogue_state.save(writer)?;
    writer.end_record(b"DIAS")?;

    writer.start_record(b"INPU")?;
    ctx.controls_state.save(writer)?;
    writer.end_record(b"INPU")?;
    Ok(())
}

fn saved_game(header: &Header, content_files: Vec<String>, ctx: &Context) -> SavedGame {
    let player_class = match (&ctx.player_base, &ctx.custom_player_class_name) {
        (Some(base), custom) => match base.text(b"CNAM") {
            Some(class) if class == morrowsave_ess::templates::CHARGEN_CLASS_ID => {
                PlayerClass::Custom(custom.clone().unwrap_or_default())
            }
            Some(class) => PlayerClass::Id(class),
            None => PlayerClass::default(),
        },
        (None, _) => PlayerClass::default(),
    };

    SavedGame {
        content_files,
        player_cell: header.current_cell.clone(),
        player_name: header.player_name.clone(),
        player_level: ctx.player.object.creature_stats.level,
        player_class,
        in_game_time: TimeStamp {
            hour: ctx.hour,
            day: ctx.day,
            month: ctx.month,
            year: ctx.year,
        },
        time_played: 0.0,
        description: header.description.clone(),
    }
}

/// Change records left over once every cell has been written.
fn report_unmerged(ctx: &mut Context) {
    let keys = ctx
        .npc_changes
        .keys()
        .map(|key| ("NPCC", key))
        .chain(ctx.creature_changes.keys().map(|key| ("CREC", key)))
        .chain(ctx.container_changes.keys().map(|key| ("CNTC", key)));
    let mut count = 0;
    for (record, key) in keys {
        debug!(record, %key, "change record matches no placed object");
        count += 1;
    }
    ctx.summary.unmerged_deltas = count;
}
